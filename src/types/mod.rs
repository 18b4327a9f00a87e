//! Core types for the trail engine.

pub mod event;
pub mod footprint;
pub mod hex;
pub mod meta;
pub mod season;
pub mod trail;

pub use event::{RolloverInput, SessionEvent, SessionInput};
pub use footprint::{EdgeSnapshot, EffectSummary, Footprint, FootprintKind};
pub use hex::{HexCoord, HexFormatError, HexId, Notation};
pub use meta::{MetaState, RolloverEntry, SessionEntry};
pub use season::{Season, SeasonId};
pub use trail::{TrailEdgeId, TrailRecord, TrailSet};
