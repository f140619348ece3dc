use crate::{
    auth::{AuthenticatedUserId, RefreshRequest, SignInRequest, SignUpRequest},
    error::AppError,
    services::Services,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new account
///
/// Creates the user, schedules a welcome email and returns a token pair.
/// A taken email responds with 409.
#[post("/sign-up")]
pub async fn sign_up(
    services: web::Data<Services>,
    payload: web::Json<SignUpRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let payload = payload.into_inner();
    let tokens = services
        .users
        .sign_up(payload.name, payload.email, payload.password)
        .await?;

    Ok(HttpResponse::Created().json(tokens))
}

/// Sign in
///
/// Authenticates by credential equality and returns a fresh token pair,
/// replacing any previously issued refresh token. An unknown email and a
/// wrong password both respond with 404.
#[post("/sign-in")]
pub async fn sign_in(
    services: web::Data<Services>,
    payload: web::Json<SignInRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let payload = payload.into_inner();
    let tokens = services
        .users
        .sign_in(payload.email, payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// Refresh tokens
///
/// Exchanges a refresh token for a new pair. The presented token is
/// consumed: replaying it responds with 404, an expired session with 401.
#[post("/refresh")]
pub async fn refresh(
    services: web::Data<Services>,
    payload: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let tokens = services.users.refresh_tokens(&payload.token).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// Current user profile
///
/// Returns the authenticated user's id, name and email.
#[get("/me")]
pub async fn me(
    services: web::Data<Services>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let profile = services.users.get_user_by_id(user.0).await?;

    Ok(HttpResponse::Ok().json(profile))
}
