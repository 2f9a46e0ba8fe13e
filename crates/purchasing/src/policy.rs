//! Purchase policy: per-purchase ticket limit and the price table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PriceTable;

/// Maximum number of tickets in a single purchase.
pub const MAX_TICKETS_PER_PURCHASE: u64 = 25;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid policy document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_tickets_per_purchase must be positive")]
    ZeroTicketLimit,
}

/// Tunable purchase settings.
///
/// Missing fields in a policy document fall back to the standard values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchasePolicy {
    pub max_tickets_per_purchase: u64,
    pub prices: PriceTable,
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            max_tickets_per_purchase: MAX_TICKETS_PER_PURCHASE,
            prices: PriceTable::default(),
        }
    }
}

impl PurchasePolicy {
    /// Parse and check a JSON policy document.
    pub fn from_json_str(document: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(document)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_tickets_per_purchase == 0 {
            return Err(PolicyError::ZeroTicketLimit);
        }
        Ok(())
    }
}
