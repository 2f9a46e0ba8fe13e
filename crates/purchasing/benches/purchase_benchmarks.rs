use std::convert::Infallible;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use ticketing_core::AccountId;
use ticketing_purchasing::{
    PriceTable, SeatReservationService, TicketCategory, TicketCountMap, TicketPaymentService,
    TicketService, TicketTypeRequest,
};

/// Collaborator that accepts every call without recording it.
#[derive(Debug, Clone, Copy)]
struct Noop;

impl TicketPaymentService for Noop {
    type Error = Infallible;

    fn make_payment(&self, _account_id: AccountId, _amount: u64) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SeatReservationService for Noop {
    type Error = Infallible;

    fn reserve_seat(&self, _account_id: AccountId, _seat_count: u64) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// `line_items` single-ticket requests cycling through the three categories,
/// with at least as many adults as infants.
fn line_items(line_items: usize) -> Vec<TicketTypeRequest> {
    [TicketCategory::Adult, TicketCategory::Child, TicketCategory::Infant]
        .into_iter()
        .cycle()
        .take(line_items)
        .map(|category| TicketTypeRequest::new(category, 1))
        .collect()
}

fn bench_purchase(c: &mut Criterion) {
    let service = TicketService::new(Noop, Noop);
    let mut group = c.benchmark_group("purchase_tickets");

    for size in [1usize, 5, 25] {
        let requests = line_items(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("accepted", size), &requests, |b, requests| {
            b.iter(|| service.purchase_tickets(black_box(AccountId::new(1)), black_box(requests)))
        });
    }

    let rejected = line_items(30);
    group.bench_function("rejected_over_limit", |b| {
        b.iter(|| service.purchase_tickets(black_box(AccountId::new(1)), black_box(&rejected)))
    });

    group.finish();
}

fn bench_pricing(c: &mut Criterion) {
    let prices = PriceTable::default();
    let tickets = TicketCountMap::aggregate(&line_items(25));

    c.bench_function("total_payment", |b| {
        b.iter(|| prices.total_payment(black_box(&tickets)))
    });
}

criterion_group!(benches, bench_purchase, bench_pricing);
criterion_main!(benches);
