//! Type definitions

pub mod capacity;
pub mod job;
pub mod location;
pub mod route;

pub use capacity::*;
pub use job::*;
pub use location::*;
pub use route::*;
