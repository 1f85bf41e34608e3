//! Application layer: repository and verifier seams, ticket lifecycle
//! orchestration, response projections.

pub mod repository;
pub mod service;
pub mod telemetry;
pub mod verifier;

pub use repository::{InMemoryTicketRepository, RepositoryError, TicketRepository};
pub use service::{NewTicket, ServiceError, ServiceResult, TicketService, TicketUpdate, TicketView};
pub use verifier::{ExistenceVerifier, StaticVerifier, VerificationError};
