use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{info, warn};
use sqlx::MySqlPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::accounts_models::{
    LoginRequest, LoginResponse,
    LogoutResponse,
    RegisterRequest, RegisterResponse,
};
use crate::auth::{self, SESSION_COOKIE};
use crate::config::Config;
use crate::db::session_repo::SessionRepo;
use crate::db::user_repo::UserRepo;
use crate::error::{AppError, AppResult};
use crate::validation::{FieldErrors, ValidationError};

// Landing page that unauthenticated requests are redirected to
pub async fn login_get() -> impl Responder {
    HttpResponse::Ok().body("Please log in: POST username and password to /accounts/login/.")
}

pub async fn register(
    pool: web::Data<MySqlPool>,
    req: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let username = req.username.trim();
    let email = req.email.trim();
    info!("Received request to register user: {}", username);

    let mut errors = FieldErrors::new();
    if username.is_empty() {
        errors.push(ValidationError::Blank { field: "username" });
    }
    if email.is_empty() {
        errors.push(ValidationError::Blank { field: "email" });
    }
    if req.password.is_empty() {
        errors.push(ValidationError::Blank { field: "password" });
    }
    errors.into_result()?;

    if UserRepo::name_or_email_taken(pool.get_ref(), username, email).await? {
        info!("Username or email already registered: {}", username);
        return Err(AppError::Conflict("Username or email already registered".into()));
    }

    let password_hash = auth::hash_password(&req.password)?;
    let user_id = UserRepo::create(pool.get_ref(), username, email, &password_hash).await?;

    info!("User {} registered successfully", username);
    Ok(HttpResponse::Created().json(RegisterResponse {
        success: true,
        message: "User registered successfully".into(),
        user_id,
    }))
}

pub async fn login(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let username = &req.username;
    info!("Received login request for user: {}", username);

    // 1. Look the user up and check the password
    let user = match UserRepo::find_by_name(pool.get_ref(), username).await? {
        Some(user) => user,
        None => {
            info!("Invalid username: {}", username);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !auth::verify_password(&req.password, &user.password_hash)? {
        warn!("Invalid password for user: {}", username);
        return Err(AppError::InvalidCredentials);
    }

    // 2. Issue a fresh session, replacing any previous one
    let session_id = Uuid::new_v4().to_string();
    let expires_at = auth::session_expiry(&config, req.remember_me, OffsetDateTime::now_utc());
    SessionRepo::replace_for_user(pool.get_ref(), &session_id, user.user_id, expires_at, req.remember_me)
        .await?;

    // 3. Return the session ID inside a cookie
    info!("User {} logged in successfully", username);
    Ok(HttpResponse::Ok()
        .cookie(
            Cookie::build(SESSION_COOKIE, session_id)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .json(LoginResponse {
            success: true,
            message: "Login successful".into(),
        }))
}

pub async fn logout(
    pool: web::Data<MySqlPool>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let session_id = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            info!("Session ID does not exist in cookies for logout");
            return Err(AppError::Unauthenticated);
        }
    };

    info!("Received logout request with session ID: {}", session_id);
    if !SessionRepo::delete(pool.get_ref(), &session_id).await? {
        info!("Session not found for session ID: {}", session_id);
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();
    Ok(HttpResponse::Ok().cookie(removal).json(LogoutResponse {
        success: true,
        message: "Logout successful".into(),
    }))
}
