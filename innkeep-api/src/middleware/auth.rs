use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use innkeep_core::{IdentityError, IdentityVerifier, VerifiedIdentity};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::{AppState, AuthConfig};

// ============================================================================
// JWT Claims
// ============================================================================

/// `sub` carries the caller's email.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: usize,
}

// ============================================================================
// Token issuing / verification
// ============================================================================

pub struct JwtVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: u64,
}

impl JwtVerifier {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(auth.secret.as_bytes()),
            decoding: DecodingKey::from_secret(auth.secret.as_bytes()),
            expiration: auth.expiration,
        }
    }

    pub fn issue(&self, email: &str, is_admin: bool) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: email.to_owned(),
            is_admin,
            exp: (Utc::now() + Duration::seconds(self.expiration as i64)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }
}

impl IdentityVerifier for JwtVerifier {
    fn verify(&self, credential: &str) -> Result<VerifiedIdentity, IdentityError> {
        if credential.is_empty() {
            return Err(IdentityError::MissingCredential);
        }

        let token_data = decode::<Claims>(credential, &self.decoding, &Validation::default())
            .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?;

        Ok(VerifiedIdentity {
            email: token_data.claims.sub,
            is_admin: token_data.claims.is_admin,
        })
    }
}

// ============================================================================
// Bearer Authentication Middleware
// ============================================================================

/// Rejects requests without a valid bearer token and stores the
/// [`VerifiedIdentity`] in the request extensions.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| AppError::AuthenticationError("Missing Authorization Header".to_string()))?;

    // 2. Decode and validate JWT
    let identity = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::AuthenticationError("Invalid or expired token".to_string())
    })?;

    // 3. Inject identity into request extensions
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
