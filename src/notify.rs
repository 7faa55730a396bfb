//! Navigation targets and the one-shot notification payload that rides
//! along with workflow redirects.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// How long the UI keeps a notification on screen before auto-dismiss.
pub const AUTO_DISMISS_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
}

/// Views the command layer can send the window to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Navigation {
    Dashboard,
    Approval,
    Viewer,
    Login,
}

impl Navigation {
    /// Landing view after a successful login. Schedulers get the
    /// generation dashboard, approvers their queue, everyone else the
    /// read-only viewer.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Scheduler => Navigation::Dashboard,
            Role::Approver => Navigation::Approval,
            Role::Readonly => Navigation::Viewer,
        }
    }
}
