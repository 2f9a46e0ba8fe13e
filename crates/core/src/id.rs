//! Purchasing account identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::InvalidPurchase;

/// Identifier of the purchasing account.
///
/// Any integer can be carried; only strictly positive values are valid for a
/// purchase. Identity verification belongs to an external account store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this identifier may purchase tickets (strictly positive).
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<AccountId> for i64 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl FromStr for AccountId {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidPurchase::InvalidAccount)
    }
}
