//! Session token decoding

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use crate::claims::SessionClaims;
use crate::error::DecodeError;

/// Decode a session token into validated claims.
///
/// With `secret` set the HS256 signature must verify. Without it the
/// payload is read as-is, the same trust level as a browser decoding its
/// own stored token. Expiry is checked against `now_secs`: a token whose
/// `exp` is at or before now is expired.
pub fn decode_session_token(
    token: &str,
    secret: Option<&str>,
    now_secs: i64,
) -> Result<SessionClaims, DecodeError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let decoding_key = match secret {
        Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
        None => {
            validation.insecure_disable_signature_validation();
            DecodingKey::from_secret(&[])
        }
    };

    let token_data =
        decode::<SessionClaims>(token.trim(), &decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Session token decode failed");
            classify(e)
        })?;

    let claims = token_data.claims.validate()?;

    if claims.exp <= now_secs {
        return Err(DecodeError::Expired {
            exp: claims.exp,
            now: now_secs,
        });
    }

    Ok(claims)
}

fn classify(error: jsonwebtoken::errors::Error) -> DecodeError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => DecodeError::InvalidSignature,
        ErrorKind::Json(e) if e.is_data() => DecodeError::InvalidClaims(e.to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            DecodeError::InvalidClaims(format!("missing `{}`", claim))
        }
        _ => DecodeError::Malformed(error.to_string()),
    }
}
