use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account roles known to the client. The server may grow new roles;
/// anything unrecognized lands on `Readonly` so an old client still
/// routes such users to the read-only view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Scheduler,
    Approver,
    #[serde(other)]
    Readonly,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Scheduler => "scheduler",
            Role::Approver => "approver",
            Role::Readonly => "readonly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}
