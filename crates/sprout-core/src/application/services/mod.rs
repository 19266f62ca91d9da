//! Application services.

pub mod materialize;
pub mod merge;

pub use materialize::{MaterializeReport, MaterializeRequest, MaterializeService};
pub use merge::TreeMerger;
