//! Tally backend: account management and expense tracking over HTTP.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] holds the services, ports, and value types.
//! - [`inbound`] adapts HTTP requests onto the domain.
//! - [`outbound`] implements the persistence ports against PostgreSQL.
//! - [`server`] assembles the application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
