use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl Claims {
    /// The user id as text, whether the issuer encodes it as a number or a string.
    pub fn user_id(&self) -> Option<String> {
        match self.user_id.as_ref()? {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub claims: Claims,
    /// False when no signing secret is configured and the claims were read unverified.
    pub verified: bool,
}

#[derive(Debug, Clone)]
pub enum TokenStatus {
    Valid(TokenInfo),
    Expired(TokenInfo),
    Invalid,
}

/// Reads the token's expiry. Signature is checked only when `secret` is given.
pub fn inspect_token(token: &str, secret: Option<&str>, now: i64) -> TokenStatus {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;

    let key = match secret {
        Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
        None => {
            validation.insecure_disable_signature_validation();
            DecodingKey::from_secret(&[])
        }
    };

    let claims = match decode::<Claims>(token, &key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!("Rejected access token: {}", e);
            return TokenStatus::Invalid;
        }
    };

    let info = TokenInfo {
        claims,
        verified: secret.is_some(),
    };

    if info.claims.exp <= now {
        TokenStatus::Expired(info)
    } else {
        TokenStatus::Valid(info)
    }
}
