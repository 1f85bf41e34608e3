//! Existence verification seam.
//!
//! Events and users are owned by sibling services; before a ticket is
//! created, reserved, or purchased the referenced id is checked against this
//! capability. The production implementation calls those services over HTTP
//! and lives with the transport glue; the core only depends on the pass/fail
//! contract defined here.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use varsity_core::{EventId, UserId};

/// Why a reference could not be verified.
///
/// `NotFound` is a definitive answer from the authority; `Unavailable` means
/// the verifier itself failed (network, timeout) and the reference may well
/// exist. The two are kept apart so callers can decide to retry instead of
/// treating the reference as absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("referenced id does not exist")]
    NotFound,
    #[error("verifier unreachable: {0}")]
    Unavailable(String),
}

/// Capability for confirming that externally-owned ids are valid.
#[async_trait]
pub trait ExistenceVerifier: Send + Sync {
    async fn verify_event_exists(&self, event_id: EventId) -> Result<(), VerificationError>;
    async fn verify_user_exists(&self, user_id: UserId) -> Result<(), VerificationError>;
}

#[async_trait]
impl<V> ExistenceVerifier for Arc<V>
where
    V: ExistenceVerifier + ?Sized,
{
    async fn verify_event_exists(&self, event_id: EventId) -> Result<(), VerificationError> {
        (**self).verify_event_exists(event_id).await
    }

    async fn verify_user_exists(&self, user_id: UserId) -> Result<(), VerificationError> {
        (**self).verify_user_exists(user_id).await
    }
}

/// In-memory verifier for dev/test: only ids registered up front are known.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    events: RwLock<HashSet<EventId>>,
    users: RwLock<HashSet<UserId>>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_event(&self, event_id: EventId) {
        if let Ok(mut events) = self.events.write() {
            events.insert(event_id);
        }
    }

    pub fn register_user(&self, user_id: UserId) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user_id);
        }
    }
}

#[async_trait]
impl ExistenceVerifier for StaticVerifier {
    async fn verify_event_exists(&self, event_id: EventId) -> Result<(), VerificationError> {
        let known = self
            .events
            .read()
            .map_err(|_| VerificationError::Unavailable("event registry lock poisoned".into()))?
            .contains(&event_id);
        if known {
            Ok(())
        } else {
            Err(VerificationError::NotFound)
        }
    }

    async fn verify_user_exists(&self, user_id: UserId) -> Result<(), VerificationError> {
        let known = self
            .users
            .read()
            .map_err(|_| VerificationError::Unavailable("user registry lock poisoned".into()))?
            .contains(&user_id);
        if known {
            Ok(())
        } else {
            Err(VerificationError::NotFound)
        }
    }
}
