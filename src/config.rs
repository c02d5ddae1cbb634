use std::env;

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

#[derive(Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub sqlite_path: String,
    pub database_url: Option<String>,
    pub session_secret: String,
    pub token_header: String,
    pub message_max_len: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let sqlite_path =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "/opt/warbler/data.sqlite".to_string());
        let database_url = env::var("DATABASE_URL").ok();

        let session_secret = env::var("SECRET_KEY")
            .or_else(|_| env::var("SESSION_SECRET"))
            .unwrap_or_else(|_| "it's a secret".to_string());

        let token_header = env::var("TOKEN_HEADER").unwrap_or_else(|_| "token".to_string());

        let message_max_len = env::var("MESSAGE_MAX_LEN")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(140);

        Self {
            server_port,
            sqlite_path,
            database_url,
            session_secret,
            token_header,
            message_max_len,
        }
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let path = self.sqlite_path.trim();
        if path.starts_with("sqlite:") || path.starts_with("file:") {
            return path.to_string();
        }
        format!("sqlite://{}", path)
    }
}
