use actix_web::{http::header::LOCATION, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::{clear_session_cookie, session_cookie, OptionalAuthUser};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::{messages, users, ModelError};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/signup")
            .route(web::get().to(signup_page))
            .route(web::post().to(signup)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .service(web::resource("/logout").route(web::get().to(logout)))
    .service(web::resource("/users/{username}").route(web::get().to(profile)))
    .service(web::resource("/").route(web::get().to(home)));
}

#[derive(Deserialize)]
struct SignupForm {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

async fn signup_page() -> HttpResponse {
    render(signup_form_html(None))
}

async fn signup(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    let new = users::NewUser {
        username: form.username.clone().unwrap_or_default(),
        email: form.email.clone().unwrap_or_default(),
        password: form.password.clone().unwrap_or_default(),
        image_url: None,
    };

    match users::signup(db.get_ref(), new).await {
        Ok(user) => {
            let cookie = session_cookie(&config, user.id)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, format!("/users/{}", user.username)))
                .cookie(cookie)
                .finish())
        }
        Err(err @ (ModelError::Validation(_) | ModelError::Integrity(_))) => {
            Ok(render(signup_form_html(Some(&err.to_string()))))
        }
        Err(err) => Err(err.into()),
    }
}

async fn login_page() -> HttpResponse {
    render(login_form_html(None))
}

async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let username = form.username.clone().unwrap_or_default();
    let password = form.password.clone().unwrap_or_default();

    let user = users::authenticate(db.get_ref(), &username, &password).await?;

    match user {
        Some(user) => {
            let cookie = session_cookie(&config, user.id)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, format!("/users/{}", user.username)))
                .cookie(cookie)
                .finish())
        }
        None => Ok(render(login_form_html(Some("Invalid credentials.")))),
    }
}

async fn logout() -> HttpResponse {
    let body = page(
        "Log out",
        r#"<p>Successfully Logged Out.</p>
<p><a href="/signup">Sign up</a> again, or <a href="/login">log in</a>.</p>"#,
    );
    HttpResponse::Ok()
        .cookie(clear_session_cookie())
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let user = users::find_by_username(db.get_ref(), &username)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    let posts = messages::for_user(db.get_ref(), user.id).await?;
    let items: String = posts
        .iter()
        .map(|m| format!("<li>{}</li>\n", escape(&m.text)))
        .collect();

    let body = format!(
        r#"<h1>@{username}</h1>
<p>{bio}</p>
<ul class="messages">
{items}</ul>"#,
        username = escape(&user.username),
        bio = escape(user.bio.as_deref().unwrap_or_default()),
        items = items,
    );
    Ok(render(page(&user.username, &body)))
}

async fn home(auth: OptionalAuthUser) -> HttpResponse {
    let body = match auth.0 {
        Some(auth) => format!(
            r#"<h1>Welcome back, @{}</h1>
<p><a href="/logout">Log out</a></p>"#,
            escape(&auth.username)
        ),
        None => r#"<h1>What's Happening?</h1>
<p><a href="/signup">Sign up</a> or <a href="/login">log in</a>.</p>"#
            .to_string(),
    };
    render(page("Warbler", &body))
}

fn render(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{} / Warbler</title></head>
<body>
{}
</body>
</html>"#,
        escape(title),
        body
    )
}

fn signup_form_html(error: Option<&str>) -> String {
    let flash = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    page(
        "Sign up",
        &format!(
            r#"<h1>Join Warbler today.</h1>
{flash}
<form method="POST" action="/signup">
  <input name="username" placeholder="Username">
  <input name="email" placeholder="E-mail address">
  <input name="password" type="password" placeholder="Password">
  <button>Sign up</button>
</form>"#
        ),
    )
}

fn login_form_html(error: Option<&str>) -> String {
    let flash = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    page(
        "Log in",
        &format!(
            r#"<h1>Welcome back.</h1>
{flash}
<form method="POST" action="/login">
  <input name="username" placeholder="Username">
  <input name="password" type="password" placeholder="Password">
  <button>Log in</button>
</form>"#
        ),
    )
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
