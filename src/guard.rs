//! Chronology and idempotency guard.
//!
//! Two independent ledgers live in [`MetaState`]: applied rollovers and
//! applied sessions. Every apply runs the guard before any graph work:
//! already-recorded inputs short-circuit benignly, out-of-order inputs are
//! rejected naming the expected or missing seasons, and an already-applied
//! session presenting different content is the fatal fingerprint mismatch.
//! The ledgers only grow, and only through [`record_rollover`] and
//! [`record_session`].

use crate::types::{MetaState, RolloverEntry, SeasonId, SessionEntry, TrailEdgeId};

/// Chronology and fingerprint failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GuardError {
    /// A rollover skipped or repeated a season boundary.
    #[error("rollover targets {got} but the next season boundary is {expected}")]
    RolloverChronology {
        /// The strict successor of the last applied rollover season.
        expected: SeasonId,
        /// The season the input named.
        got: SeasonId,
    },
    /// A session ran ahead of the rollover chain.
    #[error("session '{file_id}' targets {got} but rollovers are missing for {}",
        .missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    MissingRollovers {
        /// Ledger key of the session input.
        file_id: String,
        /// The season the session named.
        got: SeasonId,
        /// Season boundaries that have not been rolled over yet.
        missing: Vec<SeasonId>,
    },
    /// A session targets a season the campaign has already moved past.
    #[error("session '{file_id}' targets past season {got}; the campaign is in {current}")]
    SessionBehind {
        /// Ledger key of the session input.
        file_id: String,
        /// The season the session named.
        got: SeasonId,
        /// The campaign's current season.
        current: SeasonId,
    },
    /// An already-applied session now presents different content.
    #[error(
        "input '{file_id}' was already applied with different content \
         (recorded fingerprint {recorded}, presented {presented}); \
         revert the prior apply or use a new identifier"
    )]
    FingerprintMismatch {
        /// Ledger key of the session input.
        file_id: String,
        /// Fingerprint recorded at apply time.
        recorded: String,
        /// Fingerprint of the content presented now.
        presented: String,
    },
}

/// Whether a rollover input id is already recorded.
pub fn rollover_already_applied(meta: &MetaState, file_id: &str) -> bool {
    meta.rollovers.iter().any(|e| e.file_id == file_id)
}

/// Validate that a rollover targets the next season boundary.
///
/// Only the strict successor of the last applied rollover season is valid;
/// an uninitialized ledger accepts any starting season.
pub fn rollover_chronology_valid(meta: &MetaState, season: SeasonId) -> Result<(), GuardError> {
    let expected = match meta.current_season() {
        None => return Ok(()),
        Some(current) => current.successor(),
    };
    if season == expected {
        Ok(())
    } else {
        Err(GuardError::RolloverChronology {
            expected,
            got: season,
        })
    }
}

/// Whether a session input id is already recorded with the same content.
///
/// `Ok(true)` is the benign already-applied short-circuit. A recorded id
/// with a different fingerprint is the fatal mismatch.
pub fn session_already_applied(
    meta: &MetaState,
    file_id: &str,
    fingerprint: &str,
) -> Result<bool, GuardError> {
    match meta.sessions.iter().find(|e| e.file_id == file_id) {
        None => Ok(false),
        Some(entry) if entry.fingerprint == fingerprint => Ok(true),
        Some(entry) => Err(GuardError::FingerprintMismatch {
            file_id: file_id.to_string(),
            recorded: entry.fingerprint.clone(),
            presented: fingerprint.to_string(),
        }),
    }
}

/// Validate that a session belongs to the campaign's current season.
///
/// Every season boundary between the current season and the session's
/// season must already have been rolled over; the error names the missing
/// seasons. A session behind the current season is equally out of order.
pub fn session_chronology_valid(
    meta: &MetaState,
    file_id: &str,
    season: SeasonId,
) -> Result<(), GuardError> {
    let Some(current) = meta.current_season() else {
        return Ok(());
    };
    if season == current {
        return Ok(());
    }
    if season < current {
        return Err(GuardError::SessionBehind {
            file_id: file_id.to_string(),
            got: season,
            current,
        });
    }
    let mut missing = Vec::new();
    let mut cursor = current.successor();
    while cursor <= season {
        missing.push(cursor);
        cursor = cursor.successor();
    }
    Err(GuardError::MissingRollovers {
        file_id: file_id.to_string(),
        got: season,
        missing,
    })
}

/// Append a rollover to the ledger and refresh the rediscovery checkpoint.
pub fn record_rollover(
    meta: &mut MetaState,
    file_id: impl Into<String>,
    season: SeasonId,
    deleted_trails: Vec<TrailEdgeId>,
) {
    let file_id = file_id.into();
    tracing::debug!(%season, file_id, "recording applied rollover");
    meta.rollovers.push(RolloverEntry { file_id, season });
    meta.last_deleted_trails = deleted_trails;
}

/// Append a session to the ledger.
pub fn record_session(
    meta: &mut MetaState,
    file_id: impl Into<String>,
    season: SeasonId,
    fingerprint: impl Into<String>,
) {
    let file_id = file_id.into();
    tracing::debug!(%season, file_id, "recording applied session");
    meta.sessions.push(SessionEntry {
        file_id,
        season,
        fingerprint: fingerprint.into(),
    });
}
