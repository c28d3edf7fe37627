//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — identifier of the completion model
//! - [`role::Role`] — the three fixed negotiation participants
//! - [`request::UserRequest`] — a validated product request from the user
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod request;
pub mod role;
pub mod string;
