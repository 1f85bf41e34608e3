//! Ticket status value objects.
//!
//! Two orthogonal axes describe a ticket: the availability of the ticket
//! itself ([`TicketStatus`]) and the payment/usage position of its current
//! holder ([`UserTicketStatus`]). The aggregate stores a single sum type and
//! derives both axes from it; these value objects carry the classification
//! and eligibility predicates consumed by reporting and orchestration code.

use serde::{Deserialize, Serialize};

use varsity_core::ValueObject;

/// Availability axis of a ticket, independent of who holds it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Available,
    Reserved,
    Sold,
    Used,
    Cancelled,
}

impl TicketStatus {
    pub fn is_available(self) -> bool {
        matches!(self, TicketStatus::Available)
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, TicketStatus::Reserved)
    }

    pub fn is_sold(self) -> bool {
        matches!(self, TicketStatus::Sold)
    }

    pub fn is_used(self) -> bool {
        matches!(self, TicketStatus::Used)
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, TicketStatus::Cancelled)
    }

    /// A ticket can only be reserved while available.
    pub fn can_be_reserved(self) -> bool {
        self.is_available()
    }

    /// Entry is granted only for a sold ticket whose holder has paid.
    pub fn can_be_used(self, user_status: Option<UserTicketStatus>) -> bool {
        self.is_sold() && user_status.is_some_and(|u| u.is_paid())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Available => "available",
            TicketStatus::Reserved => "reserved",
            TicketStatus::Sold => "sold",
            TicketStatus::Used => "used",
            TicketStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueObject for TicketStatus {}

/// Payment/usage axis of a ticket, meaningful only while a holder is set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTicketStatus {
    NotPaid,
    Paid,
    Used,
    Expired,
    Cancelled,
    Refunded,
}

impl UserTicketStatus {
    pub fn is_not_paid(self) -> bool {
        matches!(self, UserTicketStatus::NotPaid)
    }

    pub fn is_paid(self) -> bool {
        matches!(self, UserTicketStatus::Paid)
    }

    pub fn is_used(self) -> bool {
        matches!(self, UserTicketStatus::Used)
    }

    pub fn is_expired(self) -> bool {
        matches!(self, UserTicketStatus::Expired)
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, UserTicketStatus::Cancelled)
    }

    pub fn is_refunded(self) -> bool {
        matches!(self, UserTicketStatus::Refunded)
    }

    /// Only an unpaid reservation can be purchased.
    pub fn can_be_paid(self) -> bool {
        self.is_not_paid()
    }

    /// A holder position can be cancelled before or after payment, but not
    /// once the ticket was used, expired, cancelled, or refunded.
    pub fn can_be_cancelled(self) -> bool {
        matches!(self, UserTicketStatus::NotPaid | UserTicketStatus::Paid)
    }

    /// Refunds apply to paid tickets, including already-used ones.
    pub fn can_be_refunded(self) -> bool {
        matches!(self, UserTicketStatus::Paid | UserTicketStatus::Used)
    }

    /// Reservations and unredeemed purchases can lapse.
    pub fn can_expire(self) -> bool {
        matches!(self, UserTicketStatus::NotPaid | UserTicketStatus::Paid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserTicketStatus::NotPaid => "not_paid",
            UserTicketStatus::Paid => "paid",
            UserTicketStatus::Used => "used",
            UserTicketStatus::Expired => "expired",
            UserTicketStatus::Cancelled => "cancelled",
            UserTicketStatus::Refunded => "refunded",
        }
    }
}

impl core::fmt::Display for UserTicketStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueObject for UserTicketStatus {}
