//! Bearer token issuance and validation.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

/// Lifetime of a session token.
pub const ACCESS_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

/// Lifetime of a password reset token.
pub const PASSWORD_RESET_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(1);

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Purpose a token was issued for, carried in the `typ` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Session token; subject is the user id.
    Access,

    /// Single-purpose reset token; subject is the account email.
    PasswordReset,
}

impl TokenKind {
    #[must_use]
    pub const fn ttl(self) -> SignedDuration {
        match self {
            Self::Access => ACCESS_TOKEN_TTL,
            Self::PasswordReset => PASSWORD_RESET_TOKEN_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenKind,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token was issued for a different purpose")]
    WrongKind,
}

/// HMAC key material used to sign tokens.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenIssuer(**redacted**)")
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token of the given kind for `subject`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be signed.
    pub fn issue(&self, kind: TokenKind, subject: &str) -> Result<String, TokenError> {
        self.issue_at(kind, subject, Timestamp::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be signed.
    pub fn issue_at(
        &self,
        kind: TokenKind,
        subject: &str,
        issued_at: Timestamp,
    ) -> Result<String, TokenError> {
        let iat = issued_at.as_second();

        let claims = Claims {
            sub: subject.to_owned(),
            iat,
            exp: iat.saturating_add(kind.ttl().as_secs()),
            typ: kind,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Check signature, expiry and purpose, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for bad signatures, malformed or expired
    /// tokens and [`TokenError::WrongKind`] when the `typ` claim does not match.
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::new(ALGORITHM))
            .map_err(TokenError::Invalid)?
            .claims;

        if claims.typ != kind {
            return Err(TokenError::WrongKind);
        }

        Ok(claims)
    }
}
