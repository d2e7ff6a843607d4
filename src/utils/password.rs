use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use rand::Rng;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

type HmacSha256 = Hmac<Sha256>;

const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;
const SCHEME: &str = "pbkdf2:sha256";

/// Hash un mot de passe avec PBKDF2-HMAC-SHA256 et un salt aléatoire de 16 bytes
/// Format stocké: pbkdf2:sha256:iterations$salt$hash
pub fn hash_password(password: &str, iterations: u32) -> Result<String, String> {
    if iterations == 0 {
        return Err("Iterations must be greater than 0".to_string());
    }

    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut key)
        .map_err(|e| format!("PBKDF2 hash generation failed: {}", e))?;

    Ok(format!(
        "{}:{}${}${}",
        SCHEME,
        iterations,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash stocké
/// Retourne Err seulement si le hash est illisible
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let mut parts = stored_hash.split('$');
    let (Some(header), Some(salt_str), Some(hash_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err("Invalid hash format".to_string());
    };

    let iterations = header
        .strip_prefix(SCHEME)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| "Unsupported hash scheme".to_string())?
        .parse::<u32>()
        .map_err(|_| "Invalid iterations".to_string())?;

    let salt = URL_SAFE_NO_PAD
        .decode(salt_str)
        .map_err(|e| format!("Invalid salt: {}", e))?;
    let expected_hash = URL_SAFE_NO_PAD
        .decode(hash_str)
        .map_err(|e| format!("Invalid hash: {}", e))?;
    if expected_hash.is_empty() {
        return Err("Empty hash".to_string());
    }

    let mut computed = vec![0u8; expected_hash.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| format!("PBKDF2 hash verification failed: {}", e))?;

    // Comparaison sans court-circuit
    let diff = computed
        .iter()
        .zip(expected_hash.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));

    Ok(diff == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password123", 1_000).unwrap();

        assert!(hash.starts_with("pbkdf2:sha256:1000$"));
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("admin123", 1_000).unwrap();
        let second = hash_password("admin123", 1_000).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("admin123", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
        assert!(verify_password("x", "bcrypt:10$abc$def").is_err());
        assert!(verify_password("x", "pbkdf2:sha256:abc$AAAA$AAAA").is_err());
    }

    #[test]
    fn test_zero_iterations_refused() {
        assert!(hash_password("password123", 0).is_err());
    }
}
