use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthUser, OptionalAuthUser};
use crate::config::AppConfig;
use crate::entity::message;
use crate::error::AppError;
use crate::model::messages;
use crate::response::ResponseDto;
use crate::routes::user::to_rfc3339;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/save").route(web::post().to(save)))
        .service(web::resource("/remove").route(web::post().to(remove)))
        .service(web::resource("/list").route(web::post().to(list)))
        .service(web::resource("/{id:\\d+}").route(web::post().to(get)));
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveMessageRequest {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveMessageRequest {
    id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMessagesRequest {
    user_id: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageDto {
    id: i32,
    text: String,
    user_id: i32,
    created: Option<String>,
}

#[derive(Serialize)]
struct EmptyResponse {}

async fn save(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    auth: AuthUser,
    payload: web::Json<SaveMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let text = payload.text.clone().unwrap_or_default();
    let created =
        messages::create(db.get_ref(), auth.user_id, &text, config.message_max_len).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(to_message_dto(created)))))
}

// Only the owner may remove a message.
async fn remove(
    db: web::Data<DatabaseConnection>,
    auth: AuthUser,
    payload: web::Json<RemoveMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let found = messages::find_by_id(db.get_ref(), payload.id)
        .await?
        .ok_or_else(|| AppError::not_found("message not found"))?;
    if found.user_id != auth.user_id {
        return Err(AppError::forbidden());
    }

    messages::delete(db.get_ref(), found.id).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::<EmptyResponse>::success(None)))
}

async fn list(
    db: web::Data<DatabaseConnection>,
    auth: OptionalAuthUser,
    payload: web::Json<ListMessagesRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = payload
        .user_id
        .or(auth.0.map(|a| a.user_id))
        .ok_or_else(|| AppError::param_error("userId cannot be null"))?;

    let list = messages::for_user(db.get_ref(), user_id).await?;
    let dtos: Vec<MessageDto> = list.into_iter().map(to_message_dto).collect();
    Ok(HttpResponse::Ok().json(ResponseDto::success(Some(dtos))))
}

async fn get(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let found = messages::find_by_id(db.get_ref(), *path).await?;
    Ok(HttpResponse::Ok().json(ResponseDto::success(found.map(to_message_dto))))
}

fn to_message_dto(model: message::Model) -> MessageDto {
    MessageDto {
        id: model.id,
        text: model.text,
        user_id: model.user_id,
        created: model.created.map(to_rfc3339),
    }
}
