use crate::{
    auth::{generate_token, hash_password, verify_password},
    error::AppError,
    models::user::{LoginForm, SignupRequest},
    models::TokenResponse,
    store::users,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates the account and immediately issues a bearer token (auto-login:
/// no separate login call is needed after signup).
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    // Check if email already exists
    if users::find_by_email(&pool, &signup_data.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    // Hash password and insert the account
    let password_hash = hash_password(&signup_data.password)?;
    let user = users::create(&pool, &signup_data.email, &password_hash).await?;

    // Auto-login after signup
    let access_token = generate_token(&user.email)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token)))
}

/// Login
///
/// Form-encoded OAuth2 password flow: `username` carries the email. The
/// failure message is identical whether the email is unknown or the password
/// is wrong, so callers cannot enumerate accounts.
#[post("/token")]
pub async fn token(
    pool: web::Data<PgPool>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let user = users::find_by_email(&pool, &form.username).await?;

    match user {
        Some(user) if verify_password(&form.password, &user.password_hash).unwrap_or(false) => {
            let access_token = generate_token(&user.email)?;
            Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token)))
        }
        _ => Err(AppError::Unauthorized("Incorrect email or password".into())),
    }
}
