//! Delivery-day capacity allocation and route estimation.
//!
//! Given transport jobs and per-day weight/volume limits, the crate splits
//! each delivery day into jobs that fit capacity (`regular`) and overflow
//! (`addon`), and estimates a depot-to-depot route for the whole day.
//! Everything here is synchronous and pure over its inputs.

pub mod config;
pub mod error;
pub mod import;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_support;

pub use error::{ScheduleError, ScheduleResult};
