//! Purchase-eligibility rules.
//!
//! Rules are pure checks evaluated in a fixed order; the first one that fails
//! is the only reason reported. The order decides which message a caller
//! sees when a request breaks several rules at once:
//!
//! ```text
//! account id > 0
//!   ↓
//! 0 < ticket total <= limit
//!   ↓
//! at least one adult
//!   ↓
//! infants <= adults
//! ```
//!
//! The account check runs on its own, before the requests are aggregated.

use ticketing_core::{AccountId, InvalidPurchase};

use crate::ticket::{TicketCategory, TicketCountMap};

/// A rule over the aggregated tickets of one purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketRule {
    /// `0 < total <= max_tickets`
    TicketTotal { max_tickets: u64 },
    AdultPresent,
    InfantRatio,
}

impl TicketRule {
    pub fn check(self, tickets: &TicketCountMap) -> Result<(), InvalidPurchase> {
        match self {
            TicketRule::TicketTotal { max_tickets } => check_ticket_total(tickets, max_tickets),
            TicketRule::AdultPresent => check_adult_present(tickets),
            TicketRule::InfantRatio => check_infant_ratio(tickets),
        }
    }
}

/// Ticket rules in evaluation order, for a given ticket limit.
pub fn ticket_rules(max_tickets: u64) -> [TicketRule; 3] {
    [
        TicketRule::TicketTotal { max_tickets },
        TicketRule::AdultPresent,
        TicketRule::InfantRatio,
    ]
}

pub fn check_account(account_id: AccountId) -> Result<(), InvalidPurchase> {
    if account_id.is_valid() {
        Ok(())
    } else {
        Err(InvalidPurchase::InvalidAccount)
    }
}

pub fn check_ticket_total(
    tickets: &TicketCountMap,
    max_tickets: u64,
) -> Result<(), InvalidPurchase> {
    let total = tickets.total();
    if total > 0 && total <= max_tickets {
        Ok(())
    } else {
        Err(InvalidPurchase::InvalidTicketCount)
    }
}

pub fn check_adult_present(tickets: &TicketCountMap) -> Result<(), InvalidPurchase> {
    if tickets.count(&TicketCategory::Adult) > 0 {
        Ok(())
    } else {
        Err(InvalidPurchase::NoAdultTicket)
    }
}

/// Every infant sits on an adult's lap, so infants may not outnumber adults.
pub fn check_infant_ratio(tickets: &TicketCountMap) -> Result<(), InvalidPurchase> {
    if tickets.count(&TicketCategory::Infant) <= tickets.count(&TicketCategory::Adult) {
        Ok(())
    } else {
        Err(InvalidPurchase::TooManyInfants)
    }
}

/// Run [`ticket_rules`] in order, stopping at the first violation.
pub fn validate_tickets(tickets: &TicketCountMap, max_tickets: u64) -> Result<(), InvalidPurchase> {
    ticket_rules(max_tickets)
        .into_iter()
        .try_for_each(|rule| rule.check(tickets))
}
