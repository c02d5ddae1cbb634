mod common;

use actix_web::http::header::LOCATION;
use actix_web::{test, web, App};

use warbler_backend::configure_app;
use warbler_backend::model::users::{self, NewUser};

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

async fn seed_user1(db: &sea_orm::DatabaseConnection) {
    users::signup(
        db,
        NewUser {
            username: "user1".to_string(),
            email: "user1@test.com".to_string(),
            password: "password".to_string(),
            image_url: None,
        },
    )
    .await
    .unwrap();
}

#[actix_rt::test]
async fn signup_page_renders() {
    let db = common::test_db().await;
    let app = spawn_app!(db);

    let req = test::TestRequest::get().uri("/signup").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Sign up"));
}

#[actix_rt::test]
async fn signup_redirects_to_a_page_with_the_new_username() {
    let db = common::test_db().await;
    let app = spawn_app!(db);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("username", "user2"),
            ("email", "user2@test.com"),
            ("password", "password2"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 303);

    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();

    let req = test::TestRequest::get().uri(&location).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("user2"));
}

#[actix_rt::test]
async fn duplicate_signup_re_renders_the_form() {
    let db = common::test_db().await;
    seed_user1(&db).await;
    let app = spawn_app!(db);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("username", "user1"),
            ("email", "fresh@test.com"),
            ("password", "password2"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Sign up"));
    assert!(text.contains("already taken"));
}

#[actix_rt::test]
async fn login_with_valid_credentials_reaches_the_profile() {
    let db = common::test_db().await;
    seed_user1(&db).await;
    let app = spawn_app!(db);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "user1"), ("password", "password")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 303);
    assert!(res.response().cookies().next().is_some());

    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(location, "/users/user1");

    let req = test::TestRequest::get().uri(&location).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("user1"));
}

#[actix_rt::test]
async fn login_with_wrong_password_shows_invalid_credentials() {
    let db = common::test_db().await;
    seed_user1(&db).await;
    let app = spawn_app!(db);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "user1"), ("password", "wrongpassword")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Invalid credentials."));
}

#[actix_rt::test]
async fn logout_confirms_and_links_back_to_signup() {
    let db = common::test_db().await;
    seed_user1(&db).await;
    let app = spawn_app!(db);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "user1"), ("password", "password")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 303);

    let req = test::TestRequest::get().uri("/logout").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Successfully Logged Out"));
    assert!(text.contains("Sign up"));
}
