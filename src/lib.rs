//! bondcurve — bonding curve analyzer (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod curve;
pub mod env;
pub mod keypair;
pub mod models;
pub mod output;
