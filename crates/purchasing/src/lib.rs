//! Ticket purchasing domain module.
//!
//! This crate contains the purchase-eligibility rules, pricing and the
//! orchestration of the payment and seat reservation collaborators. The rules
//! and pricing are pure; the only side effects are the two collaborator calls
//! made by [`TicketService`].

pub mod collaborators;
pub mod policy;
pub mod pricing;
pub mod recording;
pub mod rules;
pub mod service;
pub mod ticket;

pub use collaborators::{SeatReservationService, TicketPaymentService};
pub use policy::{MAX_TICKETS_PER_PURCHASE, PolicyError, PurchasePolicy};
pub use pricing::{PriceTable, TicketPriceCalculator};
pub use recording::{
    CallJournal, CollaboratorCall, RecordingError, RecordingPaymentService,
    RecordingReservationService,
};
pub use service::{PurchaseSummary, TicketService};
pub use ticket::{
    ParseTicketRequestError, TicketCategory, TicketCountMap, TicketTypeRequest, UnknownCategory,
};
