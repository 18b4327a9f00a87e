//! Plan/apply orchestration.
//!
//! The engine wires the guard, the rollover and session engines, and a
//! [`CampaignStore`] together. `plan_*` performs the full computation and
//! never writes; `apply_*` commits in write-then-record order: footprint
//! first, then the rewritten trail set, then the ledger append. A crash
//! between footprint and ledger leaves an orphaned footprint, which
//! [`CampaignEngine::reconcile`] surfaces; the reverse drift, a recorded
//! input with no footprint, cannot happen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::CampaignConfig;
use crate::graph::TrailGraph;
use crate::guard;
use crate::policy::SurvivalRoll;
use crate::rollover::{RolloverEffect, RolloverEngine};
use crate::session::{self, SessionEffect};
use crate::store::CampaignStore;
use crate::types::{
    EdgeSnapshot, EffectSummary, Footprint, FootprintKind, HexFormatError, HexId, RolloverInput,
    SessionInput, TrailEdgeId, TrailSet,
};

/// Number of edge ids quoted per effect list in a plan report.
const REPORT_SAMPLE_LIMIT: usize = 5;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A direct target (event hex, haven, query endpoint) failed to parse.
    #[error(transparent)]
    Format(#[from] HexFormatError),
    /// Chronology violation or fingerprint mismatch.
    #[error(transparent)]
    Guard(#[from] guard::GuardError),
    /// Store failure.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    fn from_store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Self::Store(Box::new(e))
    }
}

/// Count and sample of one effect list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDigest {
    /// List name (`created`, `maintained`, ...).
    pub name: String,
    /// Total entries.
    pub count: usize,
    /// Up to [`REPORT_SAMPLE_LIMIT`] sample edge ids, in comparator order.
    pub sample: Vec<TrailEdgeId>,
}

impl EffectDigest {
    fn new(name: &str, list: &[TrailEdgeId]) -> Self {
        Self {
            name: name.to_string(),
            count: list.len(),
            sample: list.iter().take(REPORT_SAMPLE_LIMIT).cloned().collect(),
        }
    }
}

/// What an operation did (or would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    /// Operation kind.
    pub kind: FootprintKind,
    /// Digest per effect list.
    pub digests: Vec<EffectDigest>,
}

impl EffectReport {
    fn for_rollover(effect: &RolloverEffect) -> Self {
        Self {
            kind: FootprintKind::Rollover,
            digests: vec![
                EffectDigest::new("maintained", &effect.maintained),
                EffectDigest::new("persisted", &effect.persisted),
                EffectDigest::new("deleted_trails", &effect.deleted_trails),
            ],
        }
    }

    fn for_session(effect: &SessionEffect) -> Self {
        Self {
            kind: FootprintKind::Session,
            digests: vec![
                EffectDigest::new("created", &effect.created),
                EffectDigest::new("used_flags", &effect.used_flags),
                EffectDigest::new("rediscovered", &effect.rediscovered),
            ],
        }
    }
}

/// Outcome of a dry run.
///
/// Validation failures and chronology violations surface as errors, not
/// outcomes; this enum only covers runs that would be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// The input would be applied with these effects.
    Changes(EffectReport),
    /// The input is valid but changes nothing.
    NoChanges,
    /// The input is already recorded; applying again would be a no-op.
    AlreadyApplied {
        /// Ledger key of the input.
        file_id: String,
    },
}

/// Outcome of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// Committed with changes.
    Applied {
        /// Id of the footprint written for this apply.
        footprint_id: String,
        /// What changed.
        report: EffectReport,
    },
    /// Committed and recorded, but the trail set did not change.
    NoChanges {
        /// Id of the footprint written for this apply.
        footprint_id: String,
    },
    /// The input was already recorded; nothing was written.
    AlreadyApplied {
        /// Ledger key of the input.
        file_id: String,
    },
}

fn touched_snapshots(before: &TrailSet, after: &TrailSet) -> BTreeMap<TrailEdgeId, EdgeSnapshot> {
    let mut touched = BTreeMap::new();
    for (id, old) in before.iter() {
        let new = after.get(id);
        if new != Some(old) {
            touched.insert(
                id.clone(),
                EdgeSnapshot {
                    before: Some(old.clone()),
                    after: new.cloned(),
                },
            );
        }
    }
    for (id, new) in after.iter() {
        if !before.contains(id) {
            touched.insert(
                id.clone(),
                EdgeSnapshot {
                    before: None,
                    after: Some(new.clone()),
                },
            );
        }
    }
    touched
}

/// The campaign engine: plan and apply over one store.
pub struct CampaignEngine<S: CampaignStore> {
    store: S,
    config: CampaignConfig,
}

impl<S: CampaignStore> CampaignEngine<S> {
    /// Create an engine over a store and configuration.
    pub fn new(store: S, config: CampaignConfig) -> Self {
        Self { store, config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn compute_rollover(
        &self,
        input: &RolloverInput,
        roll: &mut dyn SurvivalRoll,
    ) -> Result<(TrailSet, TrailSet, RolloverEffect), EngineError> {
        let trails = self.store.load_trails().map_err(EngineError::from_store)?;
        let havens = self.config.haven_hexes()?;
        let engine =
            RolloverEngine::new(&havens, self.config.haven_radius, &self.config.policy);
        let (next, effect) = engine.run(&trails, input.season, roll);
        Ok((trails, next, effect))
    }

    /// Dry-run a rollover: full computation, no writes.
    pub fn plan_rollover(
        &self,
        input: &RolloverInput,
        roll: &mut dyn SurvivalRoll,
    ) -> Result<PlanOutcome, EngineError> {
        let meta = self.store.load_meta().map_err(EngineError::from_store)?;
        if guard::rollover_already_applied(&meta, &input.file_id) {
            return Ok(PlanOutcome::AlreadyApplied {
                file_id: input.file_id.clone(),
            });
        }
        guard::rollover_chronology_valid(&meta, input.season)?;

        let (_, _, effect) = self.compute_rollover(input, roll)?;
        if effect.is_empty() {
            return Ok(PlanOutcome::NoChanges);
        }
        Ok(PlanOutcome::Changes(EffectReport::for_rollover(&effect)))
    }

    /// Commit a rollover.
    ///
    /// A no-change rollover still writes its footprint and ledger entry,
    /// so the season boundary counts as crossed, but skips the trail-set
    /// rewrite.
    pub fn apply_rollover(
        &mut self,
        input: &RolloverInput,
        roll: &mut dyn SurvivalRoll,
        vcs_mark: Option<String>,
    ) -> Result<ApplyOutcome, EngineError> {
        let mut meta = self.store.load_meta().map_err(EngineError::from_store)?;
        if guard::rollover_already_applied(&meta, &input.file_id) {
            tracing::info!(file_id = %input.file_id, "rollover already applied; skipping");
            return Ok(ApplyOutcome::AlreadyApplied {
                file_id: input.file_id.clone(),
            });
        }
        guard::rollover_chronology_valid(&meta, input.season)?;

        let (before, next, effect) = self.compute_rollover(input, roll)?;

        let footprint = Footprint::new(
            FootprintKind::Rollover,
            input.season,
            input.file_id.clone(),
            EffectSummary::Rollover(effect.clone()),
            touched_snapshots(&before, &next),
            Some(self.config.policy.params_hash()),
            vcs_mark,
        );
        self.store
            .write_footprint(&footprint)
            .map_err(EngineError::from_store)?;
        if !effect.is_empty() {
            self.store
                .save_trails(&next)
                .map_err(EngineError::from_store)?;
        }
        guard::record_rollover(
            &mut meta,
            input.file_id.clone(),
            input.season,
            effect.deleted_trails.clone(),
        );
        self.store
            .save_meta(&meta)
            .map_err(EngineError::from_store)?;

        tracing::info!(
            season = %input.season,
            footprint = %footprint.id,
            maintained = effect.maintained.len(),
            persisted = effect.persisted.len(),
            deleted = effect.deleted_trails.len(),
            "rollover applied"
        );
        if effect.is_empty() {
            Ok(ApplyOutcome::NoChanges {
                footprint_id: footprint.id,
            })
        } else {
            Ok(ApplyOutcome::Applied {
                footprint_id: footprint.id,
                report: EffectReport::for_rollover(&effect),
            })
        }
    }

    fn compute_session(
        &self,
        input: &SessionInput,
        deleted: &[TrailEdgeId],
    ) -> Result<(TrailSet, TrailSet, SessionEffect), EngineError> {
        let trails = self.store.load_trails().map_err(EngineError::from_store)?;
        let (next, effect) = session::apply_events(
            &trails,
            &input.events,
            input.season,
            deleted,
            &self.config.policy,
            self.config.notation,
        )?;
        Ok((trails, next, effect))
    }

    /// Dry-run a session apply: full computation, no writes.
    pub fn plan_session(&self, input: &SessionInput) -> Result<PlanOutcome, EngineError> {
        let meta = self.store.load_meta().map_err(EngineError::from_store)?;
        if guard::session_already_applied(&meta, &input.file_id, &input.fingerprint())? {
            return Ok(PlanOutcome::AlreadyApplied {
                file_id: input.file_id.clone(),
            });
        }
        guard::session_chronology_valid(&meta, &input.file_id, input.season)?;

        let (_, _, effect) = self.compute_session(input, &meta.last_deleted_trails)?;
        if effect.is_empty() {
            return Ok(PlanOutcome::NoChanges);
        }
        Ok(PlanOutcome::Changes(EffectReport::for_session(&effect)))
    }

    /// Commit a session apply.
    pub fn apply_session(
        &mut self,
        input: &SessionInput,
        vcs_mark: Option<String>,
    ) -> Result<ApplyOutcome, EngineError> {
        let mut meta = self.store.load_meta().map_err(EngineError::from_store)?;
        let fingerprint = input.fingerprint();
        if guard::session_already_applied(&meta, &input.file_id, &fingerprint)? {
            tracing::info!(file_id = %input.file_id, "session already applied; skipping");
            return Ok(ApplyOutcome::AlreadyApplied {
                file_id: input.file_id.clone(),
            });
        }
        guard::session_chronology_valid(&meta, &input.file_id, input.season)?;

        let (before, next, effect) = self.compute_session(input, &meta.last_deleted_trails)?;

        let footprint = Footprint::new(
            FootprintKind::Session,
            input.season,
            input.file_id.clone(),
            EffectSummary::Session(effect.clone()),
            touched_snapshots(&before, &next),
            Some(self.config.policy.params_hash()),
            vcs_mark,
        );
        self.store
            .write_footprint(&footprint)
            .map_err(EngineError::from_store)?;
        if !effect.is_empty() {
            self.store
                .save_trails(&next)
                .map_err(EngineError::from_store)?;
        }
        guard::record_session(&mut meta, input.file_id.clone(), input.season, fingerprint);
        self.store
            .save_meta(&meta)
            .map_err(EngineError::from_store)?;

        tracing::info!(
            season = %input.season,
            footprint = %footprint.id,
            created = effect.created.len(),
            used = effect.used_flags.len(),
            rediscovered = effect.rediscovered.len(),
            "session applied"
        );
        if effect.is_empty() {
            Ok(ApplyOutcome::NoChanges {
                footprint_id: footprint.id,
            })
        } else {
            Ok(ApplyOutcome::Applied {
                footprint_id: footprint.id,
                report: EffectReport::for_session(&effect),
            })
        }
    }

    /// Shortest trail path between two hexes, by the configured notation.
    ///
    /// Pure read+compute; endpoints are direct targets and must parse.
    pub fn find_path(&self, start: &str, dest: &str) -> Result<Option<Vec<HexId>>, EngineError> {
        let start = HexId::parse(start, self.config.notation)?;
        let dest = HexId::parse(dest, self.config.notation)?;
        let trails = self.store.load_trails().map_err(EngineError::from_store)?;
        let graph = TrailGraph::build(&trails);
        Ok(graph.find_path(&trails, &start, &dest))
    }

    /// Footprint ids that have no matching ledger entry.
    ///
    /// Write-then-record means a crash between the two writes leaves an
    /// orphaned footprint; a non-empty result is that drift.
    pub fn reconcile(&self) -> Result<Vec<String>, EngineError> {
        let meta = self.store.load_meta().map_err(EngineError::from_store)?;
        let footprints = self
            .store
            .footprint_ids()
            .map_err(EngineError::from_store)?;

        // Ledger entries key by input file id; footprints record it as
        // their source. Load each footprint's source via its document id.
        let mut recorded: Vec<&str> = meta
            .rollovers
            .iter()
            .map(|e| e.file_id.as_str())
            .chain(meta.sessions.iter().map(|e| e.file_id.as_str()))
            .collect();
        recorded.sort_unstable();

        let mut orphans = Vec::new();
        for id in footprints {
            let footprint = self
                .store
                .read_footprint(&id)
                .map_err(EngineError::from_store)?;
            match footprint {
                Some(fp) if recorded.binary_search(&fp.source.as_str()).is_ok() => {}
                _ => orphans.push(id),
            }
        }
        Ok(orphans)
    }
}
