//! Session cookies, password hashing and the [`CurrentUser`] extractor.

use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use log::info;
use serde::Serialize;
use sqlx::MySqlPool;
use time::{Duration, OffsetDateTime};

use crate::config::Config;
use crate::db::session_repo::SessionRepo;
use crate::db::user_repo::UserRepo;
use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "session_id";
pub const LOGIN_PATH: &str = "/accounts/login/";

/// The authenticated caller. Only these two facts flow into the
/// visibility and dashboard rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i32,
    pub is_staff: bool,
}

/// Rejects with [`AppError::Unauthenticated`] (a redirect to the login page)
/// when the cookie is missing, unknown or expired.
impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session_id = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let pool = req.app_data::<web::Data<MySqlPool>>().cloned();
        let path = req.path().to_string();

        Box::pin(async move {
            let session_id = match session_id {
                Some(session_id) => session_id,
                None => {
                    info!("No session cookie on request to {}", path);
                    return Err(AppError::Unauthenticated);
                }
            };
            let pool = pool.ok_or_else(|| AppError::Internal("database pool not configured".into()))?;
            resolve_session(pool.get_ref(), &session_id).await
        })
    }
}

pub async fn resolve_session(pool: &MySqlPool, session_id: &str) -> AppResult<CurrentUser> {
    let session = match SessionRepo::find(pool, session_id).await? {
        Some(session) => session,
        None => {
            info!("Invalid session ID: {}", session_id);
            return Err(AppError::Unauthenticated);
        }
    };

    if session.is_expired(OffsetDateTime::now_utc()) {
        SessionRepo::delete(pool, session_id).await?;
        info!("Session expired for session ID: {}", session_id);
        return Err(AppError::Unauthenticated);
    }

    let user = UserRepo::find_by_id(pool, session.user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(CurrentUser {
        id: user.user_id,
        is_staff: user.is_staff,
    })
}

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

pub fn session_expiry(config: &Config, remember_me: bool, now: OffsetDateTime) -> OffsetDateTime {
    if remember_me {
        now + Duration::days(config.remember_me_days)
    } else {
        now + Duration::minutes(config.session_minutes)
    }
}
