//! Unit prices and payment totals.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ticketing_core::ValueObject;

use crate::ticket::{TicketCategory, TicketCountMap};

/// Computes the amount to charge for a purchase.
///
/// [`PriceTable`] is the standard implementation; the orchestrator can be
/// built with any other calculator (e.g. a fixed quote in tests).
pub trait TicketPriceCalculator: Send + Sync {
    fn calculate_total(&self, tickets: &TicketCountMap) -> u64;
}

impl<C> TicketPriceCalculator for Arc<C>
where
    C: TicketPriceCalculator + ?Sized,
{
    fn calculate_total(&self, tickets: &TicketCountMap) -> u64 {
        (**self).calculate_total(tickets)
    }
}

/// Unit price per ticket category, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct PriceTable {
    pub infant: u64,
    pub child: u64,
    pub adult: u64,
}

impl ValueObject for PriceTable {}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            infant: 0,
            child: 15,
            adult: 25,
        }
    }
}

impl PriceTable {
    /// Unit price for a category. Unrecognized categories are free.
    pub fn unit_price(&self, category: &TicketCategory) -> u64 {
        match category {
            TicketCategory::Infant => self.infant,
            TicketCategory::Child => self.child,
            TicketCategory::Adult => self.adult,
            TicketCategory::Other(_) => 0,
        }
    }

    /// Σ unit price × count over the map; 0 for an empty map.
    pub fn total_payment(&self, tickets: &TicketCountMap) -> u64 {
        tickets.iter().fold(0u64, |acc, (category, count)| {
            acc.saturating_add(self.unit_price(category).saturating_mul(count))
        })
    }
}

impl TicketPriceCalculator for PriceTable {
    fn calculate_total(&self, tickets: &TicketCountMap) -> u64 {
        self.total_payment(tickets)
    }
}
