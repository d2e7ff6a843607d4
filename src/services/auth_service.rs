use sea_orm::*;
use tracing::{info, warn};

use crate::errors::{ApiError, ApiResult};
use crate::models::dto::{AuthResponse, AuthUserInfo};
use crate::models::users;
use crate::repositories::UserRepository;
use crate::utils::datetime;
use crate::utils::jwt::{self, AuthSettings};
use crate::utils::password;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Données validées d'une inscription
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct AuthService;

impl AuthService {
    /// Vérifie username + mot de passe (POST /api/login)
    pub async fn authenticate_by_username(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> ApiResult<users::Model> {
        let user = UserRepository::find_by_username(db, username).await?;
        Self::check_password(user, password, username)
    }

    /// Vérifie email + mot de passe (POST /api/auth/login)
    pub async fn authenticate_by_email(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> ApiResult<users::Model> {
        let user = UserRepository::find_by_email(db, email).await?;
        Self::check_password(user, password, email)
    }

    fn check_password(
        user: Option<users::Model>,
        password: &str,
        login: &str,
    ) -> ApiResult<users::Model> {
        // 1. L'utilisateur doit exister et avoir un mot de passe
        let Some(user) = user else {
            warn!("Login refused for `{}`: unknown user", login);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let Some(stored_hash) = user.password_hash.as_deref() else {
            warn!("Login refused for `{}`: account has no password", login);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        // 2. Vérifier le mot de passe
        let is_valid = password::verify_password(password, stored_hash)
            .map_err(|e| ApiError::Internal(format!("Password verification error: {}", e)))?;

        if !is_valid {
            warn!("Login refused for `{}`: wrong password", login);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    /// Crée un compte avec le rôle et l'avatar par défaut
    pub async fn register(
        db: &DatabaseConnection,
        settings: &AuthSettings,
        account: NewAccount,
    ) -> ApiResult<users::Model> {
        // 1. Vérifier si l'email existe déjà
        if UserRepository::find_by_email(db, &account.email).await?.is_some() {
            return Err(ApiError::Conflict("This email is already in use".to_string()));
        }

        // 2. Hash le mot de passe
        let password_hash = password::hash_password(&account.password, settings.password_iterations)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

        // 3. Créer l'utilisateur (name/username uniques: conflit -> 409 via DbErr)
        let new_user = users::ActiveModel {
            name: Set(account.name),
            username: Set(account.username),
            email: Set(account.email),
            password_hash: Set(Some(password_hash)),
            role: Set(users::DEFAULT_ROLE.to_string()),
            avatar: Set(users::DEFAULT_AVATAR.to_string()),
            created_at: Set(datetime::timestamp()),
            ..Default::default()
        };

        let user = new_user.insert(db).await?;
        info!("User {} registered ({})", user.id, user.username);

        Ok(user)
    }

    /// Génère le JWT et construit la réponse {user, token, expires_at}
    pub fn issue_token(
        settings: &AuthSettings,
        user: &users::Model,
        with_expiry: bool,
    ) -> ApiResult<AuthResponse> {
        let (token, claims) = jwt::generate_token(settings, user.id, &user.username, &user.role)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            user: AuthUserInfo::from(user),
            token,
            expires_at: with_expiry.then(|| datetime::format_datetime(&claims.expires_at())),
        })
    }
}
