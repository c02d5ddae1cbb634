#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use warbler_backend::config::AppConfig;
use warbler_backend::db::init_sqlite_schema;

// One pooled connection, otherwise every checkout would see its own
// private in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect test db");
    init_sqlite_schema(&db).await;
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        sqlite_path: ":memory:".to_string(),
        database_url: None,
        session_secret: "test-secret".to_string(),
        token_header: "token".to_string(),
        message_max_len: 140,
    }
}
