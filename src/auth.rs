use actix_web::cookie::{Cookie, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::entity::user;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "warbler_session";

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

#[derive(Clone, Debug)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "loginId")]
    login_id: i32,
    exp: usize,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db = match req.app_data::<web::Data<DatabaseConnection>>() {
            Some(db) => db.clone(),
            None => {
                return Box::pin(async { Err(AppError::system_exception().into()) });
            }
        };
        let config = match req.app_data::<web::Data<AppConfig>>() {
            Some(cfg) => cfg.clone(),
            None => {
                return Box::pin(async { Err(AppError::system_exception().into()) });
            }
        };
        let token = extract_token(req, &config);

        Box::pin(async move {
            let token = token.ok_or_else(AppError::need_login)?;
            let auth = resolve_session(&db, &config, &token).await?;
            Ok(auth)
        })
    }
}

impl FromRequest for OptionalAuthUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db = match req.app_data::<web::Data<DatabaseConnection>>() {
            Some(db) => db.clone(),
            None => {
                return Box::pin(async { Ok(OptionalAuthUser(None)) });
            }
        };
        let config = match req.app_data::<web::Data<AppConfig>>() {
            Some(cfg) => cfg.clone(),
            None => {
                return Box::pin(async { Ok(OptionalAuthUser(None)) });
            }
        };
        let token = extract_token(req, &config);

        Box::pin(async move {
            if let Some(token) = token {
                let auth = resolve_session(&db, &config, &token).await.ok();
                return Ok(OptionalAuthUser(auth));
            }
            Ok(OptionalAuthUser(None))
        })
    }
}

// Session cookie first, then the API token header.
fn extract_token(req: &HttpRequest, config: &AppConfig) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }
    req.headers()
        .get(config.token_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn resolve_session(
    db: &DatabaseConnection,
    config: &AppConfig,
    token: &str,
) -> Result<AuthUser, AppError> {
    let user_id = decode_session(config, token)?;
    let user = user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|_| AppError::system_exception())?
        .ok_or_else(AppError::need_login)?;

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
    })
}

pub fn issue_token(config: &AppConfig, user_id: i32) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::days(30)).timestamp() as usize;
    let claims = Claims { login_id: user_id, exp };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .map_err(|_| AppError::system_exception())
}

fn decode_session(config: &AppConfig, token: &str) -> Result<i32, AppError> {
    let key = DecodingKey::from_secret(config.session_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims.login_id)
        .map_err(|_| AppError::need_login())
}

pub fn session_cookie(config: &AppConfig, user_id: i32) -> Result<Cookie<'static>, AppError> {
    let token = issue_token(config, user_id)?;
    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish())
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}
