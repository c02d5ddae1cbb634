mod common;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use warbler_backend::configure_app;

macro_rules! spawn_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(common::test_config()))
                .app_data(web::Data::new($db.clone()))
                .configure(configure_app),
        )
        .await
    };
}

async fn post_json<S>(app: &S, uri: &str, token: Option<&str>, body: Value) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let mut req = test::TestRequest::post().uri(uri).set_json(body);
    if let Some(token) = token {
        req = req.insert_header(("token", token));
    }
    let bytes = test::call_and_read_body(app, req.to_request()).await;
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login<S>(app: &S, username: &str, email: &str) -> (i64, String)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let res = post_json(
        app,
        "/api/user/register",
        None,
        json!({"username": username, "email": email, "password": "password"}),
    )
    .await;
    assert_eq!(res["code"], 0, "register failed: {}", res);
    let user_id = res["data"]["id"].as_i64().unwrap();

    let res = post_json(
        app,
        "/api/user/login",
        None,
        json!({"username": username, "password": "password"}),
    )
    .await;
    assert_eq!(res["code"], 0, "login failed: {}", res);
    let token = res["data"]["token"].as_str().unwrap().to_string();
    (user_id, token)
}

#[actix_rt::test]
async fn register_login_and_fetch_current_user() {
    let db = common::test_db().await;
    let app = spawn_app!(db);

    let (user_id, token) = register_and_login(&app, "apiuser", "api@test.com").await;

    let res = post_json(&app, "/api/user/current", Some(&token), json!({})).await;
    assert_eq!(res["code"], 0);
    assert_eq!(res["data"]["id"].as_i64(), Some(user_id));
    assert_eq!(res["data"]["username"], "apiuser");
    assert!(res["data"].get("passwordHash").is_none());
}

#[actix_rt::test]
async fn login_with_bad_credentials_returns_business_code() {
    let db = common::test_db().await;
    let app = spawn_app!(db);
    register_and_login(&app, "apiuser", "api@test.com").await;

    let res = post_json(
        &app,
        "/api/user/login",
        None,
        json!({"username": "apiuser", "password": "wrong"}),
    )
    .await;
    assert_eq!(res["code"], 2);
    assert_eq!(res["msg"], "Invalid credentials.");
}

#[actix_rt::test]
async fn message_endpoints_require_a_session() {
    let db = common::test_db().await;
    let app = spawn_app!(db);

    let res = post_json(&app, "/api/message/save", None, json!({"text": "hi"})).await;
    assert_eq!(res["code"], 3);
}

#[actix_rt::test]
async fn save_list_and_remove_a_message() {
    let db = common::test_db().await;
    let app = spawn_app!(db);
    let (user_id, token) = register_and_login(&app, "poster", "poster@test.com").await;

    let res = post_json(
        &app,
        "/api/message/save",
        Some(&token),
        json!({"text": "Hello world!"}),
    )
    .await;
    assert_eq!(res["code"], 0);
    let message_id = res["data"]["id"].as_i64().unwrap();
    assert_eq!(res["data"]["userId"].as_i64(), Some(user_id));

    let res = post_json(&app, "/api/message/list", Some(&token), json!({})).await;
    assert_eq!(res["data"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(res["data"][0]["text"], "Hello world!");

    let res = post_json(
        &app,
        "/api/message/remove",
        Some(&token),
        json!({"id": message_id}),
    )
    .await;
    assert_eq!(res["code"], 0);

    let res = post_json(&app, "/api/message/list", Some(&token), json!({})).await;
    assert_eq!(res["data"].as_array().map(|a| a.len()), Some(0));
}

#[actix_rt::test]
async fn only_the_owner_can_remove_a_message() {
    let db = common::test_db().await;
    let app = spawn_app!(db);
    let (_, owner_token) = register_and_login(&app, "owner", "owner@test.com").await;
    let (_, other_token) = register_and_login(&app, "other", "other@test.com").await;

    let res = post_json(
        &app,
        "/api/message/save",
        Some(&owner_token),
        json!({"text": "mine"}),
    )
    .await;
    let message_id = res["data"]["id"].as_i64().unwrap();

    let res = post_json(
        &app,
        "/api/message/remove",
        Some(&other_token),
        json!({"id": message_id}),
    )
    .await;
    assert_eq!(res["code"], 4);
}

#[actix_rt::test]
async fn follow_status_and_lists_over_the_api() {
    let db = common::test_db().await;
    let app = spawn_app!(db);
    let (u1, t1) = register_and_login(&app, "user1", "user1@test.com").await;
    let (u2, t2) = register_and_login(&app, "user2", "user2@test.com").await;

    let res = post_json(&app, "/api/follow/status", Some(&t1), json!({"userId": u2})).await;
    assert_eq!(res["data"]["isFollowing"], false);
    assert_eq!(res["data"]["isFollowedBy"], false);

    let res = post_json(&app, "/api/follow/follow", Some(&t1), json!({"userId": u2})).await;
    assert_eq!(res["code"], 0);

    let res = post_json(&app, "/api/follow/status", Some(&t1), json!({"userId": u2})).await;
    assert_eq!(res["data"]["isFollowing"], true);
    assert_eq!(res["data"]["isFollowedBy"], false);

    let res = post_json(&app, "/api/follow/status", Some(&t2), json!({"userId": u1})).await;
    assert_eq!(res["data"]["isFollowing"], false);
    assert_eq!(res["data"]["isFollowedBy"], true);

    let res = post_json(&app, "/api/follow/followers", Some(&t2), json!({})).await;
    assert_eq!(res["data"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(res["data"][0]["username"], "user1");

    let res = post_json(&app, "/api/follow/unfollow", Some(&t1), json!({"userId": u2})).await;
    assert_eq!(res["code"], 0);

    let res = post_json(&app, "/api/follow/status", Some(&t1), json!({"userId": u2})).await;
    assert_eq!(res["data"]["isFollowing"], false);
}

#[actix_rt::test]
async fn deleting_a_user_cascades_over_the_api() {
    let db = common::test_db().await;
    let app = spawn_app!(db);
    let (u1, t1) = register_and_login(&app, "doomed", "doomed@test.com").await;
    let (_, t2) = register_and_login(&app, "viewer", "viewer@test.com").await;

    post_json(&app, "/api/message/save", Some(&t1), json!({"text": "bye"})).await;
    let res = post_json(&app, "/api/user/delete", Some(&t1), json!({})).await;
    assert_eq!(res["code"], 0);

    let res = post_json(
        &app,
        "/api/message/list",
        Some(&t2),
        json!({"userId": u1}),
    )
    .await;
    assert_eq!(res["data"].as_array().map(|a| a.len()), Some(0));
}
