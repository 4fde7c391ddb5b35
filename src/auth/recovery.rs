//! Password recovery codes.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Range of the six-digit codes sent by SMS.
const CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// A one-time recovery code issued for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryCode {
    pub email: String,
    /// Phone number the code was "sent" to.
    pub sent_to: String,
    pub code: u32,
    pub expires_at: DateTime<Utc>,
}

impl RecoveryCode {
    /// Issue a fresh random code.
    pub fn issue(
        email: impl Into<String>,
        sent_to: impl Into<String>,
        ttl: std::time::Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let code = rand::thread_rng().gen_range(CODE_RANGE);
        Self {
            email: email.into(),
            sent_to: sent_to.into(),
            code,
            expires_at: now + chrono::Duration::seconds(ttl.as_secs() as i64),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check a code typed by the user.
    pub fn verify(&self, code: u32, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_expired(now) || code != self.code {
            return Err(AuthError::InvalidRecoveryCode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn codes_have_six_digits() {
        let now = Utc::now();
        for _ in 0..200 {
            let rc = RecoveryCode::issue("a@b.co", "987654321", Duration::from_secs(900), now);
            assert!(CODE_RANGE.contains(&rc.code), "{}", rc.code);
            assert_eq!(rc.code.to_string().len(), 6);
        }
    }

    #[test]
    fn expires_after_ttl() {
        let now = Utc::now();
        let rc = RecoveryCode::issue("a@b.co", "987654321", Duration::from_secs(900), now);
        assert_eq!(rc.expires_at - now, chrono::Duration::minutes(15));
        assert!(!rc.is_expired(now + chrono::Duration::minutes(14)));
        assert!(rc.is_expired(now + chrono::Duration::minutes(15)));
    }

    #[test]
    fn verify_checks_code_and_expiry() {
        let now = Utc::now();
        let rc = RecoveryCode::issue("a@b.co", "987654321", Duration::from_secs(60), now);
        assert!(rc.verify(rc.code, now).is_ok());
        let wrong = if rc.code == 999_999 { 100_000 } else { rc.code + 1 };
        assert!(matches!(rc.verify(wrong, now), Err(AuthError::InvalidRecoveryCode)));
        assert!(rc.verify(rc.code, now + chrono::Duration::minutes(2)).is_err());
    }
}
