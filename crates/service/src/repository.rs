//! Ticket persistence seam.
//!
//! The orchestrator treats storage as an opaque CRUD collaborator with
//! last-write-wins update semantics. Note the consequence spelled out in the
//! design notes: two concurrent reserves of the same ticket race unless the
//! backing store adds a compare-and-swap on status or a row lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use varsity_core::{EventId, TicketId, UserId};
use varsity_tickets::Ticket;

/// Storage-level failure (infrastructure, not domain).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

/// CRUD store for tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError>;
    async fn find_by_event_id(&self, event_id: EventId) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Ticket>, RepositoryError>;
    async fn find_available_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Ticket>, RepositoryError>;
    async fn create(&self, ticket: Ticket) -> Result<(), RepositoryError>;
    /// Last-write-wins replacement of the stored ticket.
    async fn update(&self, ticket: Ticket) -> Result<(), RepositoryError>;
    /// Returns whether a ticket was actually removed.
    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl<R> TicketRepository for Arc<R>
where
    R: TicketRepository + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_event_id(&self, event_id: EventId) -> Result<Vec<Ticket>, RepositoryError> {
        (**self).find_by_event_id(event_id).await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Ticket>, RepositoryError> {
        (**self).find_by_user_id(user_id).await
    }

    async fn find_available_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        (**self).find_available_by_event_id(event_id).await
    }

    async fn create(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        (**self).create(ticket).await
    }

    async fn update(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        (**self).update(ticket).await
    }

    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError> {
        (**self).delete(id).await
    }
}

/// In-memory ticket store for dev/test.
#[derive(Debug, Default)]
pub struct InMemoryTicketRepository {
    inner: RwLock<HashMap<TicketId, Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets.sort_by_key(|t| *t.id_typed().as_uuid().as_bytes());
        tickets
    }

    fn read_filtered(
        &self,
        predicate: impl Fn(&Ticket) -> bool,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Storage("ticket store lock poisoned".into()))?;
        Ok(Self::sorted(
            map.values().filter(|t| predicate(t)).cloned().collect(),
        ))
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn find_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        self.read_filtered(|_| true)
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Storage("ticket store lock poisoned".into()))?;
        Ok(map.get(&id).cloned())
    }

    async fn find_by_event_id(&self, event_id: EventId) -> Result<Vec<Ticket>, RepositoryError> {
        self.read_filtered(|t| t.event_id() == event_id)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Ticket>, RepositoryError> {
        self.read_filtered(|t| t.holder() == Some(user_id))
    }

    async fn find_available_by_event_id(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Ticket>, RepositoryError> {
        self.read_filtered(|t| t.event_id() == event_id && t.ticket_status().is_available())
    }

    async fn create(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("ticket store lock poisoned".into()))?;
        map.insert(ticket.id_typed(), ticket);
        Ok(())
    }

    async fn update(&self, ticket: Ticket) -> Result<(), RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("ticket store lock poisoned".into()))?;
        map.insert(ticket.id_typed(), ticket);
        Ok(())
    }

    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("ticket store lock poisoned".into()))?;
        Ok(map.remove(&id).is_some())
    }
}
