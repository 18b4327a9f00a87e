//! Input documents: finalized session logs and rollover targets.
//!
//! Session inputs arrive pre-validated from the play-log pipeline; this
//! crate only reads the trail-relevant traversal markers and the session's
//! attributed season. Each input carries a `file_id`, the identifier the
//! exactly-once ledgers are keyed by.

use serde::{Deserialize, Serialize};

use crate::canonical::to_canonical_bytes;
use crate::fingerprint::fingerprint_hex;

use super::season::SeasonId;

/// One trail-relevant event from a finalized session log.
///
/// Closed set: anything that is not a hex-to-hex traversal is filtered out
/// upstream before the log reaches this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The party moved between two adjacent hexes.
    Traversal {
        /// Hex id the move started from.
        from: String,
        /// Hex id the move ended on.
        to: String,
    },
}

/// A finalized, externally validated session input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInput {
    /// Identifier of the session input file; ledger key.
    pub file_id: String,
    /// Season the session is attributed to.
    pub season: SeasonId,
    /// Trail-relevant events, in play order.
    pub events: Vec<SessionEvent>,
}

impl SessionInput {
    /// Content fingerprint of this input.
    ///
    /// Detects an already-applied `file_id` that now presents different
    /// content. Computed over the canonical serialization, so formatting
    /// changes to the source file do not count as content changes.
    pub fn fingerprint(&self) -> String {
        fingerprint_hex(&to_canonical_bytes(self))
    }
}

/// A rollover input naming a single target season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverInput {
    /// Identifier of the rollover input file; ledger key.
    pub file_id: String,
    /// The season boundary being crossed into.
    pub season: SeasonId,
}
