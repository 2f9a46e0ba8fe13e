//! Recording collaborators for tests/dev.
//!
//! Both recorders append to one shared [`CallJournal`], so the order of
//! payment and reservation calls across the two services can be asserted.

use std::sync::{Arc, Mutex, PoisonError};

use ticketing_core::AccountId;

use crate::collaborators::{SeatReservationService, TicketPaymentService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingError {
    /// Recording failed due to internal lock poisoning.
    Poisoned,
    /// The recorder was configured to fail.
    Rejected(String),
}

/// A collaborator call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorCall {
    Payment { account_id: AccountId, amount: u64 },
    Reservation { account_id: AccountId, seat_count: u64 },
}

/// Shared, append-only log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<CollaboratorCall>>>,
}

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: CollaboratorCall) -> Result<(), RecordingError> {
        let mut calls = self.calls.lock().map_err(|_| RecordingError::Poisoned)?;
        calls.push(call);
        Ok(())
    }

    /// Snapshot of all calls so far. A poisoned lock still yields what was
    /// recorded before the panic.
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn payments(&self) -> Vec<(AccountId, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CollaboratorCall::Payment { account_id, amount } => Some((account_id, amount)),
                CollaboratorCall::Reservation { .. } => None,
            })
            .collect()
    }

    pub fn reservations(&self) -> Vec<(AccountId, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CollaboratorCall::Reservation {
                    account_id,
                    seat_count,
                } => Some((account_id, seat_count)),
                CollaboratorCall::Payment { .. } => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls().is_empty()
    }
}

/// Payment service that records every call into a [`CallJournal`].
#[derive(Debug, Clone)]
pub struct RecordingPaymentService {
    journal: CallJournal,
    failure: Option<String>,
}

impl RecordingPaymentService {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            failure: None,
        }
    }

    /// Record the call, then fail with `reason`.
    pub fn failing(journal: CallJournal, reason: impl Into<String>) -> Self {
        Self {
            journal,
            failure: Some(reason.into()),
        }
    }
}

impl TicketPaymentService for RecordingPaymentService {
    type Error = RecordingError;

    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), Self::Error> {
        self.journal
            .record(CollaboratorCall::Payment { account_id, amount })?;
        match &self.failure {
            Some(reason) => Err(RecordingError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Seat reservation service that records every call into a [`CallJournal`].
#[derive(Debug, Clone)]
pub struct RecordingReservationService {
    journal: CallJournal,
    failure: Option<String>,
}

impl RecordingReservationService {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            failure: None,
        }
    }

    /// Record the call, then fail with `reason`.
    pub fn failing(journal: CallJournal, reason: impl Into<String>) -> Self {
        Self {
            journal,
            failure: Some(reason.into()),
        }
    }
}

impl SeatReservationService for RecordingReservationService {
    type Error = RecordingError;

    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), Self::Error> {
        self.journal.record(CollaboratorCall::Reservation {
            account_id,
            seat_count,
        })?;
        match &self.failure {
            Some(reason) => Err(RecordingError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}
