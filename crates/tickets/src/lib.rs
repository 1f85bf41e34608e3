//! Ticket lifecycle domain module.
//!
//! This crate contains the business rules for event tickets, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod bulk;
pub mod status;
pub mod ticket;

pub use bulk::{
    BulkFailure, BulkPurchaseReport, BulkReserveReport, EventTicketSummary, bulk_purchase,
    bulk_reserve, can_cancel, can_purchase, summarize_by_event,
};
pub use status::{TicketStatus, UserTicketStatus};
pub use ticket::{Ticket, TicketState};
