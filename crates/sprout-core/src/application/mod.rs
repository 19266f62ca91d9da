//! Application layer - orchestration of the materialization pipeline.
//!
//! Services coordinate the domain logic with the outside world through
//! ports. Nothing here touches `std::fs` or spawns processes directly.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{
    MaterializeReport, MaterializeRequest, MaterializeService, TreeMerger,
};
