use actix_web::{http::StatusCode, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::errors::{ApiError, ApiResult, StatusBody};
use crate::middleware::AuthUser;
use crate::models::dto::{EmailLoginRequest, LoginRequest, RegisterRequest, VerifyTokenRequest};
use crate::services::auth_service::{AuthService, NewAccount};
use crate::utils::datetime;
use crate::utils::jwt::{self, AuthSettings};

/// POST /api/login - Connexion par username (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    settings: web::Data<AuthSettings>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let request = body.into_inner();

    let user = AuthService::authenticate_by_username(
        db.get_ref(),
        &request.username.unwrap_or_default(),
        &request.password.unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthService::issue_token(&settings, &user, false)?))
}

/// POST /api/check-token - Vérifier le token du header (PROTÉGÉE)
#[post("/check-token")]
pub async fn check_token(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(StatusBody::new(
        StatusCode::OK,
        format!("Token valid for user {}", auth_user.username),
    ))
}

/// POST /api/auth/login - Connexion par email (PUBLIC)
#[post("/login")]
pub async fn email_login(
    body: web::Json<EmailLoginRequest>,
    settings: web::Data<AuthSettings>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let request = body.into_inner();

    let user = AuthService::authenticate_by_email(
        db.get_ref(),
        &request.email.unwrap_or_default(),
        &request.password.unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthService::issue_token(&settings, &user, true)?))
}

/// POST /api/auth/verify - Vérifier un token passé dans le corps (PUBLIC)
#[post("/verify")]
pub async fn verify(
    body: web::Json<VerifyTokenRequest>,
    settings: web::Data<AuthSettings>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let token = body.into_inner().token.unwrap_or_default();

    let claims = jwt::verify_token(&settings, &token).map_err(ApiError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "valid": true,
        "user_id": claims.sub,
        "expires_at": datetime::format_datetime(&claims.expires_at()),
        "timestamp": datetime::timestamp()
    })))
}

/// POST /api/auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    settings: web::Data<AuthSettings>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let request = body.into_inner();

    let account = NewAccount {
        name: request.name.unwrap_or_default(),
        username: request.username.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
    };

    let user = AuthService::register(db.get_ref(), &settings, account).await?;

    Ok(HttpResponse::Created().json(AuthService::issue_token(&settings, &user, true)?))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(check_token).service(
        web::scope("/auth")
            .service(email_login)
            .service(verify)
            .service(register),
    );
}
