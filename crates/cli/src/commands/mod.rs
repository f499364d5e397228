//! Subcommand implementations.
//!
//! Results are reported through `tracing` at info level.

pub mod cart;
pub mod checkout;
pub mod products;
