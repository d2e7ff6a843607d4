use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration, DateTime, Local, NaiveDateTime};

/// Paramètres d'authentification partagés avec les handlers (web::Data)
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub password_iterations: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // user_id
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,        // expiration timestamp
}

impl Claims {
    /// Date d'expiration en heure locale (format des réponses API)
    pub fn expires_at(&self) -> NaiveDateTime {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
            .naive_local()
    }
}

/// Génère un JWT token pour un utilisateur
pub fn generate_token(
    settings: &AuthSettings,
    user_id: i32,
    username: &str,
    role: &str,
) -> Result<(String, Claims), String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(settings.token_ttl_hours))
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_ref()),
    )
        .map_err(|e| format!("Failed to generate token: {}", e))?;

    Ok((token, claims))
}

/// Vérifie et décode un JWT token
pub fn verify_token(settings: &AuthSettings, token: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
}
