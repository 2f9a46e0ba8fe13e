//! Ticket purchase orchestration.
//!
//! One purchase is a one-shot pipeline; nothing is kept between calls:
//!
//! ```text
//! account check
//!   ↓
//! aggregate line items (pure fold)
//!   ↓
//! ticket rules (count bounds → adult present → infant ratio)
//!   ↓
//! payment total + reservation total
//!   ↓
//! make_payment → reserve_seat
//! ```
//!
//! Any rule failure returns before the first collaborator call, so a
//! rejected purchase has no side effects.

use serde::Serialize;

use ticketing_core::{AccountId, InvalidPurchase, PurchaseError, PurchaseResult};

use crate::collaborators::{SeatReservationService, TicketPaymentService};
use crate::policy::{MAX_TICKETS_PER_PURCHASE, PurchasePolicy};
use crate::pricing::{PriceTable, TicketPriceCalculator};
use crate::rules;
use crate::ticket::{TicketCountMap, TicketTypeRequest};

/// What a successful purchase charged and reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseSummary {
    pub account_id: AccountId,
    pub ticket_total: u64,
    pub payment_total: u64,
    pub reservation_total: u64,
}

/// Validates, prices and books ticket purchases.
///
/// ## Generic Parameters
///
/// - `P`: payment collaborator
/// - `R`: seat reservation collaborator
/// - `C`: price calculator (the embedded [`PriceTable`] by default)
///
/// All three are fixed at construction. The service itself holds no mutable
/// state, so one instance can serve any number of independent purchases.
#[derive(Debug)]
pub struct TicketService<P, R, C = PriceTable> {
    payment: P,
    reservation: R,
    calculator: C,
    max_tickets: u64,
}

impl<P, R> TicketService<P, R, PriceTable> {
    /// Standard policy: 25 tickets per purchase, default prices.
    pub fn new(payment: P, reservation: R) -> Self {
        Self::with_policy(payment, reservation, PurchasePolicy::default())
    }

    pub fn with_policy(payment: P, reservation: R, policy: PurchasePolicy) -> Self {
        Self {
            payment,
            reservation,
            calculator: policy.prices,
            max_tickets: policy.max_tickets_per_purchase,
        }
    }
}

impl<P, R, C> TicketService<P, R, C> {
    /// Use a custom price calculator instead of a price table.
    pub fn with_calculator(payment: P, reservation: R, calculator: C) -> Self {
        Self {
            payment,
            reservation,
            calculator,
            max_tickets: MAX_TICKETS_PER_PURCHASE,
        }
    }

    pub fn with_max_tickets(mut self, max_tickets: u64) -> Self {
        self.max_tickets = max_tickets;
        self
    }

    pub fn max_tickets(&self) -> u64 {
        self.max_tickets
    }

    pub fn into_parts(self) -> (P, R, C) {
        (self.payment, self.reservation, self.calculator)
    }
}

impl<P, R, C> TicketService<P, R, C>
where
    P: TicketPaymentService,
    R: SeatReservationService,
    C: TicketPriceCalculator,
{
    /// Purchase tickets for `account_id`.
    ///
    /// Line items of the same category add up. On success the payment
    /// collaborator is called once with the payment total, then the
    /// reservation collaborator once with the seat count (infants excluded).
    ///
    /// ## Errors
    ///
    /// - [`PurchaseError::InvalidPurchase`] with the first rule the request
    ///   breaks; no collaborator was called.
    /// - [`PurchaseError::Payment`] if the payment collaborator failed; no
    ///   seats were reserved.
    /// - [`PurchaseError::Reservation`] if the reservation collaborator
    ///   failed after the payment was taken. Nothing is rolled back.
    pub fn purchase_tickets(
        &self,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> PurchaseResult<PurchaseSummary> {
        rules::check_account(account_id).map_err(|reason| rejected(account_id, reason))?;

        let tickets = TicketCountMap::aggregate(requests);
        let ticket_total = tickets.total();
        tracing::debug!(
            %account_id,
            line_items = requests.len(),
            ticket_total,
            "aggregated ticket requests"
        );

        rules::validate_tickets(&tickets, self.max_tickets)
            .map_err(|reason| rejected(account_id, reason))?;

        let reservation_total = tickets.reservation_total();
        let payment_total = self.calculator.calculate_total(&tickets);

        self.payment
            .make_payment(account_id, payment_total)
            .map_err(|e| {
                tracing::error!(%account_id, payment_total, error = ?e, "payment failed");
                PurchaseError::payment(format!("{e:?}"))
            })?;

        self.reservation
            .reserve_seat(account_id, reservation_total)
            .map_err(|e| {
                tracing::error!(
                    %account_id,
                    reservation_total,
                    error = ?e,
                    "seat reservation failed after payment"
                );
                PurchaseError::reservation(format!("{e:?}"))
            })?;

        tracing::info!(
            %account_id,
            ticket_total,
            payment_total,
            reservation_total,
            "tickets purchased"
        );

        Ok(PurchaseSummary {
            account_id,
            ticket_total,
            payment_total,
            reservation_total,
        })
    }
}

fn rejected(account_id: AccountId, reason: InvalidPurchase) -> PurchaseError {
    tracing::warn!(%account_id, %reason, "purchase rejected");
    PurchaseError::InvalidPurchase(reason)
}
