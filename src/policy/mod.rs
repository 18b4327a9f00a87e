//! Seasonal persistence policy definitions.

pub mod roll;
pub mod v1;

pub use roll::{FixedRoll, RngRoll, SurvivalRoll};
pub use v1::PersistencePolicyV1;
