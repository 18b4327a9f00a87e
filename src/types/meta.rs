//! The applied-input ledger (`MetaState`).
//!
//! One versioned document holding the two independent exactly-once ledgers
//! (rollovers, sessions) plus the checkpoint the Session Apply Engine
//! consumes: the edge ids deleted by the most recent rollover. The lists
//! only ever grow, and every mutation routes through the guard operations
//! in [`crate::guard`], never ad hoc field writes.

use serde::{Deserialize, Serialize};

use super::season::SeasonId;
use super::trail::TrailEdgeId;

/// One applied rollover input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverEntry {
    /// Ledger key of the input.
    pub file_id: String,
    /// Season the rollover crossed into.
    pub season: SeasonId,
}

/// One applied session input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Ledger key of the input.
    pub file_id: String,
    /// Season the session was attributed to.
    pub season: SeasonId,
    /// Content fingerprint recorded at apply time.
    pub fingerprint: String,
}

/// Per-subsystem ledger of already-applied inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaState {
    /// Storage backend tag (`"fs"`, `"memory"`).
    #[serde(default)]
    pub backend: String,
    /// Applied rollovers, in apply order.
    #[serde(default)]
    pub rollovers: Vec<RolloverEntry>,
    /// Applied sessions, in apply order.
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
    /// Edge ids deleted by the most recent rollover; rediscovery checkpoint.
    #[serde(default)]
    pub last_deleted_trails: Vec<TrailEdgeId>,
}

impl MetaState {
    /// Create an empty ledger for the given backend tag.
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Self::default()
        }
    }

    /// Season of the last applied rollover, if any.
    pub fn last_rollover_season(&self) -> Option<SeasonId> {
        self.rollovers.last().map(|e| e.season)
    }

    /// Season of the last applied session, if any.
    pub fn last_session_season(&self) -> Option<SeasonId> {
        self.sessions.last().map(|e| e.season)
    }

    /// The season the campaign currently sits in, if initialized.
    ///
    /// Rollovers advance the season; before the first rollover the season of
    /// the first applied session anchors the calendar.
    pub fn current_season(&self) -> Option<SeasonId> {
        self.last_rollover_season().or(self.last_session_season())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::season::Season;

    #[test]
    fn test_current_season_prefers_rollover() {
        let mut meta = MetaState::new("memory");
        assert_eq!(meta.current_season(), None);

        meta.sessions.push(SessionEntry {
            file_id: "s1".into(),
            season: SeasonId::new(1165, Season::Winter),
            fingerprint: "fp".into(),
        });
        assert_eq!(
            meta.current_season(),
            Some(SeasonId::new(1165, Season::Winter))
        );

        meta.rollovers.push(RolloverEntry {
            file_id: "r1".into(),
            season: SeasonId::new(1165, Season::Spring),
        });
        assert_eq!(
            meta.current_season(),
            Some(SeasonId::new(1165, Season::Spring))
        );
    }
}
