use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::model::follows;
use crate::response::ResponseDto;
use crate::routes::user::{to_user_dto, UserDto};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/follow").route(web::post().to(follow)))
        .service(web::resource("/unfollow").route(web::post().to(unfollow)))
        .service(web::resource("/status").route(web::post().to(status)))
        .service(web::resource("/followers").route(web::post().to(followers)))
        .service(web::resource("/following").route(web::post().to(following)));
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgeRequest {
    user_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRequest {
    user_id: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FollowStatusDto {
    is_following: bool,
    is_followed_by: bool,
}

#[derive(Serialize)]
struct EmptyResponse {}

async fn follow(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<EdgeRequest>,
) -> Result<HttpResponse, AppError> {
    follows::follow(db.get_ref(), auth.user_id, payload.user_id).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::<EmptyResponse>::success(None)))
}

async fn unfollow(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<EdgeRequest>,
) -> Result<HttpResponse, AppError> {
    follows::unfollow(db.get_ref(), auth.user_id, payload.user_id).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::<EmptyResponse>::success(None)))
}

async fn status(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<EdgeRequest>,
) -> Result<HttpResponse, AppError> {
    let is_following = follows::is_following(db.get_ref(), auth.user_id, payload.user_id).await?;
    let is_followed_by =
        follows::is_followed_by(db.get_ref(), auth.user_id, payload.user_id).await?;
    let dto = FollowStatusDto {
        is_following,
        is_followed_by,
    };
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(dto))))
}

async fn followers(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<ListRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = payload.user_id.unwrap_or(auth.user_id);
    let list = follows::followers(db.get_ref(), user_id).await?;
    let dtos: Vec<UserDto> = list.into_iter().map(to_user_dto).collect();
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(dtos))))
}

async fn following(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<ListRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = payload.user_id.unwrap_or(auth.user_id);
    let list = follows::following(db.get_ref(), user_id).await?;
    let dtos: Vec<UserDto> = list.into_iter().map(to_user_dto).collect();
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(dtos))))
}
