// ABOUTME: JWT bearer authentication for the calorie API
// ABOUTME: Issues and verifies HS256 access tokens whose subject is the user's email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Tokens are HS256-signed with a shared secret. A valid signature and an
//! unexpired `exp` are sufficient; no user lookup happens here.

use crate::constants::auth::DEFAULT_TOKEN_EXPIRY_MINUTES;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => write!(
                f,
                "JWT token expired at {}",
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid("Invalid token").with_source(other),
        }
    }
}

/// `JWT` claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: Duration,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a manager from a shared secret and token lifetime
    ///
    /// A lifetime outside chrono's range falls back to the default lifetime.
    #[must_use]
    pub fn new(secret: &str, token_expiry_minutes: i64) -> Self {
        let token_expiry = Duration::try_minutes(token_expiry_minutes).unwrap_or_else(|| {
            warn!(token_expiry_minutes, "Token lifetime out of range, using default");
            Duration::minutes(DEFAULT_TOKEN_EXPIRY_MINUTES)
        });
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Issue a token for `subject` with the configured lifetime
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn generate_token(&self, subject: &str) -> AppResult<String> {
        self.generate_token_with_expiry(subject, self.token_expiry)
    }

    /// Issue a token expiring `lifetime` from now (negative lifetimes yield expired tokens)
    ///
    /// # Errors
    ///
    /// Returns an internal error if the expiry is out of range or encoding fails
    pub fn generate_token_with_expiry(&self, subject: &str, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Token expiry is out of range"))?;
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError::TokenExpired`] when `exp` is in the past,
    /// otherwise `TokenMalformed`/`TokenInvalid` for anything that fails to verify
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below without leeway so it can be reported distinctly
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        if Utc::now().timestamp() >= claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
            warn!(subject = %claims.sub, expired_at = %expired_at.to_rfc3339(), "JWT token expired");
            return Err(JwtValidationError::TokenExpired { expired_at });
        }

        debug!(subject = %claims.sub, "JWT token validated");
        Ok(claims)
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        warn!("JWT token validation failed: {e}");

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
///
/// # Errors
///
/// `AuthRequired` when the header is absent, `AuthInvalid` when it is not a bearer credential
pub fn extract_bearer_token(header: Option<&str>) -> AppResult<&str> {
    let value = header.ok_or_else(AppError::auth_required)?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::auth_invalid("Invalid token"))?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::auth_invalid("Invalid token"));
    }
    Ok(token.trim())
}
