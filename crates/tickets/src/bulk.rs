//! Bulk operations and per-event reporting over ticket collections.
//!
//! Batch semantics are deliberately not transactional: every ticket is
//! attempted independently and a failure is recorded, never propagated, so
//! one ineligible ticket cannot abort the remainder of the batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use varsity_core::{DomainError, EventId, TicketId, UserId};

use crate::ticket::Ticket;

/// One ticket that could not be processed, with the guard failure that
/// rejected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub ticket_id: TicketId,
    pub reason: DomainError,
}

/// Outcome of a bulk reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkReserveReport {
    pub reserved: Vec<TicketId>,
    pub failures: Vec<BulkFailure>,
}

/// Outcome of a bulk purchase attempt. `total_amount` sums the prices of the
/// successful subset only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkPurchaseReport {
    pub purchased: Vec<TicketId>,
    pub failures: Vec<BulkFailure>,
    pub total_amount: Decimal,
}

/// Per-event ticket counts and revenue.
///
/// Tickets whose availability axis is neither available, reserved, nor sold
/// are folded into the `cancelled` bucket (used tickets included), matching
/// the back-office report this feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTicketSummary {
    pub event_id: EventId,
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
    pub cancelled: usize,
    /// Sum of prices over currently-sold tickets.
    pub revenue: Decimal,
}

impl EventTicketSummary {
    pub fn empty(event_id: EventId) -> Self {
        Self {
            event_id,
            total: 0,
            available: 0,
            reserved: 0,
            sold: 0,
            cancelled: 0,
            revenue: Decimal::ZERO,
        }
    }
}

/// Attempt to reserve every ticket in the batch for `user`.
pub fn bulk_reserve(tickets: &mut [Ticket], user: UserId, now: DateTime<Utc>) -> BulkReserveReport {
    let mut report = BulkReserveReport::default();
    for ticket in tickets.iter_mut() {
        match ticket.reserve(user, now) {
            Ok(()) => report.reserved.push(ticket.id_typed()),
            Err(reason) => report.failures.push(BulkFailure {
                ticket_id: ticket.id_typed(),
                reason,
            }),
        }
    }
    report
}

/// Attempt to purchase every ticket in the batch for `user`, accumulating
/// the amount charged for the successful subset.
pub fn bulk_purchase(
    tickets: &mut [Ticket],
    user: UserId,
    now: DateTime<Utc>,
) -> BulkPurchaseReport {
    let mut report = BulkPurchaseReport::default();
    for ticket in tickets.iter_mut() {
        match ticket.purchase(user, now) {
            Ok(()) => {
                report.total_amount += ticket.price();
                report.purchased.push(ticket.id_typed());
            }
            Err(reason) => report.failures.push(BulkFailure {
                ticket_id: ticket.id_typed(),
                reason,
            }),
        }
    }
    report
}

/// Group tickets by event and produce per-event counts and revenue.
///
/// Output is ordered by event id bytes for deterministic reporting.
pub fn summarize_by_event(tickets: &[Ticket]) -> Vec<EventTicketSummary> {
    let mut by_event: HashMap<EventId, EventTicketSummary> = HashMap::new();

    for ticket in tickets {
        let summary = by_event
            .entry(ticket.event_id())
            .or_insert_with(|| EventTicketSummary::empty(ticket.event_id()));
        summary.total += 1;

        let status = ticket.ticket_status();
        if status.is_available() {
            summary.available += 1;
        } else if status.is_reserved() {
            summary.reserved += 1;
        } else if status.is_sold() {
            summary.sold += 1;
            summary.revenue += ticket.price();
        } else {
            summary.cancelled += 1;
        }
    }

    let mut summaries: Vec<_> = by_event.into_values().collect();
    summaries.sort_by_key(|s| *s.event_id.as_uuid().as_bytes());
    summaries
}

/// Advisory purchase check: holder identity match plus payment eligibility.
///
/// Orchestration callers use this to pre-filter; the aggregate's own guard
/// stays authoritative.
pub fn can_purchase(ticket: &Ticket, user: UserId) -> bool {
    ticket.holder() == Some(user) && ticket.user_status().is_some_and(|u| u.can_be_paid())
}

/// Advisory cancel check: holder identity match plus cancel eligibility on
/// both axes.
pub fn can_cancel(ticket: &Ticket, user: UserId) -> bool {
    let status = ticket.ticket_status();
    ticket.holder() == Some(user)
        && !status.is_cancelled()
        && !status.is_used()
        && ticket.user_status().is_some_and(|u| u.can_be_cancelled())
}
