use crate::models::Claims;
use jsonwebtoken::{DecodingKey, Validation, decode};

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

/// Tokens are minted by the identity service; tests mint their own.
#[cfg(test)]
pub fn issue_token(email: &str, role: u8, secret: &str, ttl_secs: usize) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: email.to_string(),
        role,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_tokens() {
        let token = issue_token("ana@acme.com", 3, "secret", 60);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "ana@acme.com");
        assert_eq!(claims.role, 3);
    }

    #[test]
    fn rejects_wrong_secret_and_garbage() {
        let token = issue_token("ana@acme.com", 3, "secret", 60);
        assert!(verify_token(&token, "other").is_err());
        assert!(verify_token("not.a.token", "secret").is_err());
    }
}
