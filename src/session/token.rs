use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::SessionError;
use crate::models::{TokenClaims, User};

/// Reads the claims segment of a JWT. The signature is not checked; the
/// backend stays the authority on whether the token is valid.
pub fn decode_claims(token: &str) -> Result<TokenClaims, SessionError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(SessionError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::MalformedToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::MalformedToken(format!("payload is not valid claims: {}", e)))
}

/// Builds the session user from the token claims and the email used to sign in.
pub fn user_from_claims(claims: &TokenClaims, email: &str) -> Result<User, SessionError> {
    let id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| SessionError::MalformedToken(format!("subject {:?} is not a user id", claims.sub)))?;

    Ok(User {
        id,
        name: String::new(),
        email: email.to_string(),
        role: claims.role,
        school_id: claims.school_id,
    })
}
