//! Contracts for the external services a purchase calls.
//!
//! The payment processor and the seat reservation system live outside this
//! crate. [`TicketService`](crate::TicketService) depends on them only through
//! these traits, injected at construction:
//!
//! ```text
//! purchase_tickets
//!   ↓ (all rules passed)
//! TicketPaymentService::make_payment(account_id, payment_total)
//!   ↓
//! SeatReservationService::reserve_seat(account_id, reservation_total)
//! ```
//!
//! Both are called exactly once per successful purchase and never on a
//! rejected one. Neither call is retried; an error is handed back to the
//! caller as-is.

use std::sync::Arc;

use ticketing_core::AccountId;

/// Charges an account for a purchase.
pub trait TicketPaymentService: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), Self::Error>;
}

/// Holds seats for an account.
pub trait SeatReservationService: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), Self::Error>;
}

impl<P> TicketPaymentService for Arc<P>
where
    P: TicketPaymentService + ?Sized,
{
    type Error = P::Error;

    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), Self::Error> {
        (**self).make_payment(account_id, amount)
    }
}

impl<R> SeatReservationService for Arc<R>
where
    R: SeatReservationService + ?Sized,
{
    type Error = R::Error;

    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), Self::Error> {
        (**self).reserve_seat(account_id, seat_count)
    }
}
