use actix_web::{web, HttpResponse};
use chrono::SecondsFormat;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::{issue_token, AuthUser};
use crate::config::AppConfig;
use crate::entity::user;
use crate::error::AppError;
use crate::model::users;
use crate::response::ResponseDto;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::post().to(logout)))
        .service(web::resource("/current").route(web::post().to(current_user)))
        .service(web::resource("/delete").route(web::post().to(delete_user)))
        .service(web::resource("/{id:\\d+}").route(web::post().to(get_user)));
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user_id: i32,
    username: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Serialize)]
struct EmptyResponse {}

async fn register(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let new = users::NewUser {
        username: payload.username.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        password: payload.password.clone().unwrap_or_default(),
        image_url: payload.image_url.clone(),
    };

    let user = users::signup(db.get_ref(), new).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(to_user_dto(user)))))
}

async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let username = payload.username.clone().unwrap_or_default();
    let password = payload.password.clone().unwrap_or_default();
    if username.trim().is_empty() {
        return Err(AppError::param_error("username cannot be null"));
    }
    if password.trim().is_empty() {
        return Err(AppError::param_error("password cannot be null"));
    }

    // A miss and a bad password get the same answer.
    let user = users::authenticate(db.get_ref(), &username, &password)
        .await?
        .ok_or_else(|| AppError::conflict("Invalid credentials."))?;

    let token = issue_token(&config, user.id)?;
    let response = LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
    };
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(response))))
}

async fn logout(_auth: AuthUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ResponseDto::<EmptyResponse>::success(None)))
}

async fn current_user(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    let user = users::find_by_id(db.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::success(user.map(to_user_dto))))
}

async fn get_user(
    db: web::Data<DatabaseConnection>,
    _auth: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user = users::find_by_id(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::success(user.map(to_user_dto))))
}

// Messages and follow edges cascade with the row.
async fn delete_user(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    users::delete_user(db.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::<EmptyResponse>::success(None)))
}

pub fn to_user_dto(model: user::Model) -> UserDto {
    UserDto {
        id: model.id,
        username: model.username,
        email: model.email,
        image_url: model.image_url,
        header_image_url: model.header_image_url,
        bio: model.bio,
        location: model.location,
        created: model.created.map(to_rfc3339),
        updated: model.updated.map(to_rfc3339),
    }
}

pub fn to_rfc3339(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, false)
}
