//! # Quill Core
//!
//! The domain layer of the Quill blog API: entities, ports, and the services
//! that implement the business rules on top of them.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod paging;
pub mod ports;
pub mod services;

pub use error::DomainError;
