//! Inbound adapters: interfaces through which the outside world drives the
//! domain.

pub mod http;
