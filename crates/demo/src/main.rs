//! Purchase tickets from the command line.
//!
//! ```text
//! ticketing-demo <account_id> <CATEGORY:COUNT>...
//! ticketing-demo 7 ADULT:2 CHILD:1 INFANT:1
//! ```
//!
//! Environment:
//! - `TICKETING_POLICY_FILE`: optional JSON purchase policy
//! - `TICKETING_LOG_FORMAT`: `json` (default) or `pretty`
//! - `RUST_LOG`: log filter (default `info`)

use std::convert::Infallible;

use anyhow::{Context, Result};

use ticketing_core::{AccountId, PurchaseError};
use ticketing_observability::LogFormat;
use ticketing_purchasing::{
    PurchasePolicy, PurchaseSummary, SeatReservationService, TicketPaymentService, TicketService,
    TicketTypeRequest,
};

const USAGE: &str = "usage: ticketing-demo <account_id> <CATEGORY:COUNT>...";

/// Payment gateway stand-in: logs the charge and accepts it.
#[derive(Debug, Clone, Copy)]
struct LoggingPaymentService;

impl TicketPaymentService for LoggingPaymentService {
    type Error = Infallible;

    fn make_payment(&self, account_id: AccountId, amount: u64) -> Result<(), Self::Error> {
        tracing::info!(%account_id, amount, "payment taken");
        Ok(())
    }
}

/// Seat booking stand-in: logs the reservation and accepts it.
#[derive(Debug, Clone, Copy)]
struct LoggingReservationService;

impl SeatReservationService for LoggingReservationService {
    type Error = Infallible;

    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), Self::Error> {
        tracing::info!(%account_id, seat_count, "seats reserved");
        Ok(())
    }
}

fn log_format() -> Result<LogFormat> {
    match std::env::var("TICKETING_LOG_FORMAT") {
        Ok(value) => value.parse().context("TICKETING_LOG_FORMAT"),
        Err(_) => Ok(LogFormat::default()),
    }
}

fn load_policy() -> Result<PurchasePolicy> {
    let Ok(path) = std::env::var("TICKETING_POLICY_FILE") else {
        return Ok(PurchasePolicy::default());
    };
    let document = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read policy file {path}"))?;
    let policy = PurchasePolicy::from_json_str(&document)
        .with_context(|| format!("failed to load policy file {path}"))?;
    tracing::info!(
        %path,
        max_tickets = policy.max_tickets_per_purchase,
        "loaded purchase policy"
    );
    Ok(policy)
}

/// Split command-line arguments into the account and its line items.
fn parse_args<I>(args: I) -> Result<(AccountId, Vec<TicketTypeRequest>)>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let account_id = args
        .next()
        .context(USAGE)?
        .parse::<AccountId>()
        .context("account id must be an integer")?;

    let requests = args
        .map(|arg| {
            arg.parse::<TicketTypeRequest>()
                .with_context(|| format!("invalid line item `{arg}`"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((account_id, requests))
}

fn purchase(
    policy: PurchasePolicy,
    account_id: AccountId,
    requests: &[TicketTypeRequest],
) -> Result<PurchaseSummary, PurchaseError> {
    let service =
        TicketService::with_policy(LoggingPaymentService, LoggingReservationService, policy);
    service.purchase_tickets(account_id, requests)
}

fn main() -> Result<()> {
    ticketing_observability::init_with(log_format()?);

    let policy = load_policy()?;
    let (account_id, requests) = parse_args(std::env::args().skip(1))?;

    match purchase(policy, account_id, &requests) {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
