//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Compose the ownership guard explicitly into every note-scoped mutation.
//! - Keep transport layers decoupled from storage details.
//!
//! # Invariants
//! - Ownership is verified on every call and never cached.
//! - Services never log; the transport facade owns operation logging.

pub mod aggregate;
pub mod auth_service;
pub mod checklist_service;
mod error;
pub mod note_service;
pub mod ownership;
pub mod table_service;

pub use error::{ServiceError, ServiceResult};
