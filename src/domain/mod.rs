//! Core domain types and logic.

pub mod clock;
pub mod config;
pub mod error;
pub mod index;
pub mod ledger;
pub mod operations;
pub mod sample;
pub mod stock;
pub mod trade;
