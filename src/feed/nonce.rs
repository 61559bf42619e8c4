//! Per-origin request nonces
//!
//! A nonce binds a request to the origin it claims to come from. It is a
//! short SHA-256 digest of a server secret, a time tick and the action name.
//! Each tick lasts half the configured lifetime and verification accepts the
//! current and previous tick, so a nonce stays valid for up to one lifetime.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct NonceIssuer {
    secret: String,
    lifetime_secs: i64,
}

impl NonceIssuer {
    pub fn new(secret: impl Into<String>, lifetime_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs: i64::try_from(lifetime_secs.max(2)).unwrap_or(i64::MAX),
        }
    }

    fn tick(&self, now: DateTime<Utc>) -> i64 {
        let half = self.lifetime_secs / 2;
        (now.timestamp() + half - 1).div_euclid(half)
    }

    fn digest(&self, tick: i64, action: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"|");
        hasher.update(tick.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(action.as_bytes());
        let hex = format!("{:x}", hasher.finalize());
        hex[..NONCE_LEN].to_string()
    }

    /// Issue a nonce for `action` at the given time
    pub fn issue_at(&self, action: &str, now: DateTime<Utc>) -> String {
        self.digest(self.tick(now), action)
    }

    pub fn issue(&self, action: &str) -> String {
        self.issue_at(action, Utc::now())
    }

    /// Verify a nonce for `action` at the given time
    pub fn verify_at(&self, nonce: &str, action: &str, now: DateTime<Utc>) -> bool {
        if nonce.is_empty() {
            return false;
        }
        let tick = self.tick(now);
        nonce == self.digest(tick, action) || nonce == self.digest(tick - 1, action)
    }

    pub fn verify(&self, nonce: &str, action: &str) -> bool {
        self.verify_at(nonce, action, Utc::now())
    }
}
