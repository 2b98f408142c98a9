//! Admin-only projections: user directory and platform analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform user as listed in the admin directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Backend identifier, e.g. "user-001".
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Assigned role string.
    pub role: String,
    /// Account status, e.g. "active".
    pub status: String,
    /// Last sign-in timestamp, if any.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Response of `GET /api/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    /// Users in the directory.
    pub users: Vec<DirectoryUser>,
    /// Total user count.
    pub total: u64,
}

/// Response of `GET /api/admin/analytics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAnalytics {
    /// All-time proposal count.
    pub total_proposals: u64,
    /// Users active on the platform.
    pub active_users: u64,
    /// Proposals created this month.
    pub proposals_this_month: u64,
    /// Mean completion rate as a percentage.
    pub avg_completion_rate: u8,
    /// Total contract value as a display string, e.g. "$85.3M".
    pub total_contract_value: String,
    /// Win rate as a percentage.
    pub win_rate: u8,
}
