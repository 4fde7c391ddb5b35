//! Login session handed back to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::{Account, Role};

/// The logged-in account and where to send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: Uuid,
    pub role: Role,
    /// "Remember me" was ticked.
    pub remember: bool,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn start(account: &Account, remember: bool, now: DateTime<Utc>) -> Self {
        Self {
            account_id: account.id,
            role: account.role(),
            remember,
            started_at: now,
        }
    }

    pub fn dashboard_route(&self) -> &'static str {
        self.role.dashboard_route()
    }
}
