//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into transactional use-case APIs.
//! - Keep HTTP handlers decoupled from storage details.

pub mod entity_store;
