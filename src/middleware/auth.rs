use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::utils::jwt::{self, AuthSettings, Claims};

/// Structure qui contient les infos de l'utilisateur authentifié
/// Utilisée comme extracteur dans les routes protégées.
/// `Option<AuthUser>` pour les routes où le token est facultatif
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

/// Extrait le token du header (format: "Bearer <token>")
fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization format (expected: Bearer <token>)".to_string(),
        )
    })
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let settings = req
        .app_data::<web::Data<AuthSettings>>()
        .ok_or_else(|| ApiError::Internal("Auth settings not configured".to_string()))?;

    let token = bearer_token(req)?;
    let claims = jwt::verify_token(settings, token).map_err(ApiError::Unauthorized)?;

    Ok(AuthUser::from(claims))
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
