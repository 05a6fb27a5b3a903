//! Signed bearer tokens carrying a resolved [`Identity`].
//!
//! Tokens are HS256 JWTs. Signature and shape are checked by
//! `jsonwebtoken`; expiry is checked here against an injected [`Clock`] so
//! tests can move time without sleeping.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use ua_domain::config::AuthConfig;
use ua_domain::error::{Error, Result};
use ua_domain::identity::Identity;
use ua_domain::trace::TraceEvent;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Clock
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Source of "now" as Unix epoch seconds.
pub trait Clock: Send + Sync {
    fn now_epoch_secs(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> i64 {
        self.0
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Claims
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// User id (see [`ua_domain::identity::user_id_for`]).
    pub sub: String,
    pub email: String,
    pub name: String,
    pub team: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub.clone(),
            email: self.email.clone(),
            display_name: self.name.clone(),
            team: self.team.clone(),
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Unix epoch seconds.
    pub expires_at: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Issuer
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Issues and verifies session tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    leeway_secs: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64, leeway_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            leeway_secs,
            clock: Arc::new(SystemClock),
        }
    }

    /// Fails when no signing secret is configured.
    pub fn from_config(cfg: &AuthConfig) -> Result<Self> {
        let secret = cfg.resolve_secret().ok_or_else(|| {
            Error::Config(format!(
                "no signing secret: set auth.jwt_secret or ${}",
                cfg.jwt_secret_env
            ))
        })?;
        Ok(Self::new(&secret, cfg.token_ttl_secs, cfg.clock_skew_secs))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken> {
        let now = self.clock.now_epoch_secs();
        let claims = SessionClaims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.display_name.clone(),
            team: identity.team.clone(),
            is_admin: identity.is_admin,
            iat: now,
            exp: now + self.ttl_secs,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::Other(format!("signing token: {e}")))?;

        TraceEvent::TokenIssued {
            user_id: claims.sub.clone(),
            expires_at: claims.exp,
        }
        .emit();

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify_claims(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let claims = match decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature => "signature",
                    ErrorKind::MissingRequiredClaim(_) => "missing_claim",
                    _ => "malformed",
                };
                TraceEvent::TokenRejected { reason }.emit();
                return Err(Error::InvalidToken(e.to_string()));
            }
        };

        if claims.exp < self.clock.now_epoch_secs() - self.leeway_secs {
            TraceEvent::TokenRejected { reason: "expired" }.emit();
            return Err(Error::TokenExpired);
        }
        Ok(claims)
    }

    pub fn verify(&self, token: &str) -> Result<Identity> {
        self.verify_claims(token).map(|c| c.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2026-01-01 00:00:00 UTC
    const T0: i64 = 1_767_225_600;

    fn jane() -> Identity {
        Identity::new("jane.smith@enverus.com", "Jane Smith", "Customer Success", false)
    }

    fn issuer_at(now: i64) -> TokenIssuer {
        TokenIssuer::new("test-secret", 3600, 0).with_clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn issued_token_verifies_to_same_identity() {
        let issuer = issuer_at(T0);
        let issued = issuer.issue(&jane()).unwrap();
        assert_eq!(issued.expires_at, T0 + 3600);
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = issuer.verify_claims(&issued.token).unwrap();
        assert_eq!(claims.iat, T0);
        assert_eq!(claims.sub, "janesmithenveruscom");
        assert_eq!(issuer.verify(&issued.token).unwrap(), jane());
    }

    #[test]
    fn token_valid_until_exp() {
        let issued = issuer_at(T0).issue(&jane()).unwrap();
        assert!(issuer_at(T0 + 3600).verify(&issued.token).is_ok());
    }

    #[test]
    fn expired_token_is_distinguished() {
        let issued = issuer_at(T0).issue(&jane()).unwrap();
        let err = issuer_at(T0 + 3601).verify(&issued.token).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
    }

    #[test]
    fn leeway_extends_expiry() {
        let issued = issuer_at(T0).issue(&jane()).unwrap();
        let lenient = TokenIssuer::new("test-secret", 3600, 60).with_clock(Arc::new(FixedClock(T0 + 3650)));
        assert!(lenient.verify(&issued.token).is_ok());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issued = issuer_at(T0).issue(&jane()).unwrap();
        let other = TokenIssuer::new("another-secret", 3600, 0).with_clock(Arc::new(FixedClock(T0)));
        assert!(matches!(other.verify(&issued.token), Err(Error::InvalidToken(_))));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let issuer = issuer_at(T0);
        let a = issuer.issue(&jane()).unwrap().token;
        let admin = Identity::new("jane.smith@enverus.com", "Jane Smith", "Executive", true);
        let b = issuer.issue(&admin).unwrap().token;

        let a_parts: Vec<&str> = a.split('.').collect();
        let b_parts: Vec<&str> = b.split('.').collect();
        let forged = format!("{}.{}.{}", a_parts[0], b_parts[1], a_parts[2]);

        assert!(matches!(issuer.verify(&forged), Err(Error::InvalidToken(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        let issuer = issuer_at(T0);
        for token in ["", "not-a-token", "a.b.c"] {
            assert!(matches!(issuer.verify(token), Err(Error::InvalidToken(_))), "{token:?}");
        }
    }

    #[test]
    fn from_config_requires_secret() {
        let cfg = AuthConfig {
            jwt_secret: None,
            jwt_secret_env: "UA_TEST_SECRET_THAT_IS_NEVER_SET".into(),
            ..AuthConfig::default()
        };
        assert!(matches!(TokenIssuer::from_config(&cfg), Err(Error::Config(_))));

        let cfg = AuthConfig {
            jwt_secret: Some("s3cret".into()),
            token_ttl_secs: 120,
            ..cfg
        };
        assert_eq!(TokenIssuer::from_config(&cfg).unwrap().ttl_secs(), 120);
    }
}
