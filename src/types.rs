//! Common types used throughout the Matjip client
//!
//! Type aliases and small wire types shared by several modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// Numeric offset cursor used by the backend's list endpoints
pub type OffsetCursor = u64;

/// Identifier of a backend record
pub type RecordId = i64;

// ============================================================================
// Pagination Defaults
// ============================================================================

/// Page size used by the "my page" tabs
pub const DEFAULT_PAGE_SIZE: u32 = 21;

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// Sorting
// ============================================================================

/// Sort order for client-side list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently created/updated first
    #[default]
    Recent,
    /// Highest rating first
    Rating,
}

// ============================================================================
// Registration Request Status
// ============================================================================

/// Review status of a restaurant-registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Only pending requests may still be withdrawn
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}
