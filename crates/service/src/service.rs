//! Ticket lifecycle orchestrator.
//!
//! Coordinates existence verification, aggregate loading, transition
//! execution, and persistence for single-ticket and bulk operations. The
//! orchestrator composes the [`TicketRepository`] and [`ExistenceVerifier`]
//! traits, so it runs unchanged against in-memory fakes in tests and real
//! backends in production.
//!
//! Error policy: domain guard failures (`InvalidTransition`, `Validation`)
//! pass through untouched; a definitive verifier not-found surfaces as
//! `NotFound`; a verifier outage surfaces as the distinct
//! `VerificationUnavailable`. Bulk operations are the one place per-item
//! failures are absorbed into a report instead of propagated.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use varsity_core::{DomainError, DomainResult, EventId, TicketId, UserId};
use varsity_tickets::bulk::{
    BulkFailure, BulkPurchaseReport, BulkReserveReport, EventTicketSummary, bulk_purchase,
    bulk_reserve, summarize_by_event,
};
use varsity_tickets::{Ticket, TicketStatus, UserTicketStatus};

use crate::repository::{RepositoryError, TicketRepository};
use crate::verifier::{ExistenceVerifier, VerificationError};

/// Application-level error: domain failures plus storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<VerificationError> for ServiceError {
    fn from(value: VerificationError) -> Self {
        match value {
            VerificationError::NotFound => ServiceError::Domain(DomainError::NotFound),
            VerificationError::Unavailable(msg) => {
                ServiceError::Domain(DomainError::verification_unavailable(msg))
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Input for ticket creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub event_id: EventId,
}

/// Partial field update; `None` leaves the field untouched.
///
/// `description` and `expires_at` are nullable on the ticket, so they take
/// two levels of `Option`: the outer level selects the field, the inner
/// level carries the new value (`Some(None)` blanks the field).
///
/// Status transitions are never applied through updates; they go through the
/// named lifecycle operations only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub event_id: Option<EventId>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

/// Response projection: a serializable snapshot of a ticket with both
/// derived status axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    pub id: TicketId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub event_id: EventId,
    pub status: TicketStatus,
    pub user_status: Option<UserTicketStatus>,
    pub user_id: Option<UserId>,
    pub purchased_at: Option<DateTime<Utc>>,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketView {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id_typed(),
            name: ticket.name().to_string(),
            description: ticket.description().map(str::to_string),
            price: ticket.price(),
            event_id: ticket.event_id(),
            status: ticket.ticket_status(),
            user_status: ticket.user_status(),
            user_id: ticket.holder(),
            purchased_at: ticket.purchased_at(),
            used_at: ticket.used_at(),
            expires_at: ticket.expires_at(),
            created_at: ticket.created_at(),
            updated_at: ticket.updated_at(),
        }
    }
}

/// Coordinates ticket lookups, existence verification, and aggregate
/// mutation; produces [`TicketView`] projections.
#[derive(Debug)]
pub struct TicketService<R, V> {
    repository: R,
    verifier: V,
}

impl<R, V> TicketService<R, V>
where
    R: TicketRepository,
    V: ExistenceVerifier,
{
    pub fn new(repository: R, verifier: V) -> Self {
        Self {
            repository,
            verifier,
        }
    }

    async fn verify_event(&self, event_id: EventId) -> ServiceResult<()> {
        self.verifier.verify_event_exists(event_id).await.map_err(|e| {
            if let VerificationError::Unavailable(msg) = &e {
                tracing::warn!(%event_id, error = %msg, "event verifier unavailable");
            }
            ServiceError::from(e)
        })
    }

    async fn verify_user(&self, user_id: UserId) -> ServiceResult<()> {
        self.verifier.verify_user_exists(user_id).await.map_err(|e| {
            if let VerificationError::Unavailable(msg) = &e {
                tracing::warn!(%user_id, error = %msg, "user verifier unavailable");
            }
            ServiceError::from(e)
        })
    }

    async fn load(&self, ticket_id: TicketId) -> ServiceResult<Ticket> {
        self.repository
            .find_by_id(ticket_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotFound))
    }

    async fn apply(
        &self,
        ticket_id: TicketId,
        operation: &'static str,
        mutate: impl FnOnce(&mut Ticket) -> DomainResult<()>,
    ) -> ServiceResult<TicketView> {
        let mut ticket = self.load(ticket_id).await?;
        mutate(&mut ticket).map_err(ServiceError::Domain)?;
        self.repository.update(ticket.clone()).await?;
        tracing::info!(%ticket_id, operation, state = ticket.state().label(), "ticket transition applied");
        Ok(TicketView::from(&ticket))
    }

    /// Create a ticket after verifying the referenced event exists.
    pub async fn create(&self, input: NewTicket) -> ServiceResult<TicketView> {
        self.verify_event(input.event_id).await?;

        let ticket = Ticket::new(
            TicketId::new(),
            input.name,
            input.description,
            input.price,
            input.event_id,
            Utc::now(),
        )
        .map_err(ServiceError::Domain)?;

        self.repository.create(ticket.clone()).await?;
        tracing::info!(ticket_id = %ticket.id_typed(), event_id = %ticket.event_id(), "ticket created");
        Ok(TicketView::from(&ticket))
    }

    pub async fn get(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        Ok(TicketView::from(&self.load(ticket_id).await?))
    }

    pub async fn list(&self) -> ServiceResult<Vec<TicketView>> {
        let tickets = self.repository.find_all().await?;
        Ok(tickets.iter().map(TicketView::from).collect())
    }

    /// Partial field update. A changed `event_id` is re-verified before it
    /// is applied; other fields pass through without touching the lifecycle.
    pub async fn update(
        &self,
        ticket_id: TicketId,
        update: TicketUpdate,
    ) -> ServiceResult<TicketView> {
        let mut ticket = self.load(ticket_id).await?;
        let now = Utc::now();

        if let Some(event_id) = update.event_id {
            if event_id != ticket.event_id() {
                self.verify_event(event_id).await?;
                ticket.move_to_event(event_id, now);
            }
        }
        if let Some(name) = update.name {
            ticket.rename(name, now).map_err(ServiceError::Domain)?;
        }
        if let Some(description) = update.description {
            ticket.set_description(description, now);
        }
        if let Some(expires_at) = update.expires_at {
            ticket.set_expires_at(expires_at, now);
        }

        self.repository.update(ticket.clone()).await?;
        tracing::info!(%ticket_id, "ticket updated");
        Ok(TicketView::from(&ticket))
    }

    /// Delete unconditionally, regardless of lifecycle state. Fails with
    /// `NotFound` when the ticket does not exist.
    pub async fn delete(&self, ticket_id: TicketId) -> ServiceResult<()> {
        let removed = self.repository.delete(ticket_id).await?;
        if !removed {
            return Err(ServiceError::Domain(DomainError::NotFound));
        }
        tracing::info!(%ticket_id, "ticket deleted");
        Ok(())
    }

    pub async fn find_by_event_id(&self, event_id: EventId) -> ServiceResult<Vec<TicketView>> {
        self.verify_event(event_id).await?;
        let tickets = self.repository.find_by_event_id(event_id).await?;
        Ok(tickets.iter().map(TicketView::from).collect())
    }

    pub async fn find_by_user_id(&self, user_id: UserId) -> ServiceResult<Vec<TicketView>> {
        self.verify_user(user_id).await?;
        let tickets = self.repository.find_by_user_id(user_id).await?;
        Ok(tickets.iter().map(TicketView::from).collect())
    }

    pub async fn find_available_by_event_id(
        &self,
        event_id: EventId,
    ) -> ServiceResult<Vec<TicketView>> {
        self.verify_event(event_id).await?;
        let tickets = self.repository.find_available_by_event_id(event_id).await?;
        Ok(tickets.iter().map(TicketView::from).collect())
    }

    pub async fn reserve_ticket(
        &self,
        ticket_id: TicketId,
        user_id: UserId,
    ) -> ServiceResult<TicketView> {
        self.verify_user(user_id).await?;
        self.apply(ticket_id, "reserve", |t| t.reserve(user_id, Utc::now()))
            .await
    }

    pub async fn purchase_ticket(
        &self,
        ticket_id: TicketId,
        user_id: UserId,
    ) -> ServiceResult<TicketView> {
        self.verify_user(user_id).await?;
        self.apply(ticket_id, "purchase", |t| t.purchase(user_id, Utc::now()))
            .await
    }

    pub async fn use_ticket(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        self.apply(ticket_id, "use", |t| t.use_ticket(Utc::now()))
            .await
    }

    pub async fn cancel_ticket(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        self.apply(ticket_id, "cancel", |t| t.cancel(Utc::now()))
            .await
    }

    pub async fn refund_ticket(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        self.apply(ticket_id, "refund", |t| t.refund(Utc::now()))
            .await
    }

    pub async fn expire_ticket(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        self.apply(ticket_id, "expire", |t| t.expire(Utc::now()))
            .await
    }

    pub async fn make_available(&self, ticket_id: TicketId) -> ServiceResult<TicketView> {
        self.apply(ticket_id, "make_available", |t| {
            t.make_available(Utc::now());
            Ok(())
        })
        .await
    }

    /// Reserve a batch of tickets for one user. The user is verified once;
    /// each ticket is then attempted independently, with missing tickets and
    /// guard failures recorded per item. Successful reservations are
    /// persisted individually (no cross-item rollback).
    pub async fn bulk_reserve_tickets(
        &self,
        ticket_ids: &[TicketId],
        user_id: UserId,
    ) -> ServiceResult<BulkReserveReport> {
        self.verify_user(user_id).await?;
        let (mut loaded, missing) = self.load_batch(ticket_ids).await?;

        let mut report = bulk_reserve(&mut loaded, user_id, Utc::now());
        self.persist_batch(&loaded, &report.reserved).await?;
        report.failures.extend(missing);

        tracing::info!(
            %user_id,
            reserved = report.reserved.len(),
            failed = report.failures.len(),
            "bulk reserve finished"
        );
        Ok(report)
    }

    /// Purchase a batch of tickets for one user; same per-item semantics as
    /// bulk reserve, plus the total charged for the successful subset.
    pub async fn bulk_purchase_tickets(
        &self,
        ticket_ids: &[TicketId],
        user_id: UserId,
    ) -> ServiceResult<BulkPurchaseReport> {
        self.verify_user(user_id).await?;
        let (mut loaded, missing) = self.load_batch(ticket_ids).await?;

        let mut report = bulk_purchase(&mut loaded, user_id, Utc::now());
        self.persist_batch(&loaded, &report.purchased).await?;
        report.failures.extend(missing);

        tracing::info!(
            %user_id,
            purchased = report.purchased.len(),
            failed = report.failures.len(),
            total_amount = %report.total_amount,
            "bulk purchase finished"
        );
        Ok(report)
    }

    /// Counts and revenue for one event's tickets.
    pub async fn event_summary(&self, event_id: EventId) -> ServiceResult<EventTicketSummary> {
        self.verify_event(event_id).await?;
        let tickets = self.repository.find_by_event_id(event_id).await?;
        let summary = summarize_by_event(&tickets)
            .into_iter()
            .find(|s| s.event_id == event_id)
            .unwrap_or_else(|| EventTicketSummary::empty(event_id));
        Ok(summary)
    }

    /// Load a batch of tickets, preserving order. Repeated ids are loaded
    /// once: a batch must not clone the same aggregate twice, or each clone's
    /// transition would succeed (and be charged) independently.
    async fn load_batch(
        &self,
        ticket_ids: &[TicketId],
    ) -> ServiceResult<(Vec<Ticket>, Vec<BulkFailure>)> {
        let mut seen: HashSet<TicketId> = HashSet::with_capacity(ticket_ids.len());
        let mut loaded = Vec::with_capacity(ticket_ids.len());
        let mut missing = Vec::new();
        for &id in ticket_ids {
            if !seen.insert(id) {
                continue;
            }
            match self.repository.find_by_id(id).await? {
                Some(ticket) => loaded.push(ticket),
                None => missing.push(BulkFailure {
                    ticket_id: id,
                    reason: DomainError::NotFound,
                }),
            }
        }
        Ok((loaded, missing))
    }

    async fn persist_batch(
        &self,
        tickets: &[Ticket],
        succeeded: &[TicketId],
    ) -> ServiceResult<()> {
        let succeeded: HashSet<TicketId> = succeeded.iter().copied().collect();
        for ticket in tickets {
            if succeeded.contains(&ticket.id_typed()) {
                self.repository.update(ticket.clone()).await?;
            }
        }
        Ok(())
    }
}
