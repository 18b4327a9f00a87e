//! PersistencePolicy v1: the far-haven survival function.
//!
//! ## Float Normalization for Deterministic Hashing
//!
//! Floats are quantized to integers before hashing (multiply by 1e6,
//! round to i64) so `params_hash` is stable across platforms and
//! serialization settings. Footprints can then record exactly which
//! policy produced an effect.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::TrailRecord;
use crate::DEFAULT_POLICY_VERSION;

/// Quantization factor for float normalization.
const FLOAT_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

fn quantize_float(value: f32) -> i64 {
    ((value as f64) * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

/// Persistence policy version 1.
///
/// Controls the survival chance a far-haven trail takes into the
/// [`crate::policy::SurvivalRoll`] at a season boundary:
///
/// ```text
/// chance = clamp(base_chance + used_bonus·[used this season] + streak_bonus·streak, 0, 1)
/// ```
///
/// Permanent trails never roll. The threshold at which a streak promotes a
/// trail to permanent also lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistencePolicyV1 {
    /// Policy version identifier.
    #[serde(default = "default_version")]
    pub version: String,
    /// Baseline survival chance for an untouched trail.
    pub base_chance: f32,
    /// Added when the trail was used this season.
    pub used_bonus: f32,
    /// Added per streak level.
    pub streak_bonus: f32,
    /// Streak at which a trail becomes permanent.
    pub permanent_streak_threshold: u32,
}

fn default_version() -> String {
    DEFAULT_POLICY_VERSION.to_string()
}

impl PersistencePolicyV1 {
    /// Create a policy with custom parameters.
    pub fn new(
        base_chance: f32,
        used_bonus: f32,
        streak_bonus: f32,
        permanent_streak_threshold: u32,
    ) -> Self {
        Self {
            version: default_version(),
            base_chance: base_chance.clamp(0.0, 1.0),
            used_bonus: used_bonus.clamp(0.0, 1.0),
            streak_bonus: streak_bonus.clamp(0.0, 1.0),
            permanent_streak_threshold,
        }
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Survival chance for one far-haven trail record.
    pub fn survival_chance(&self, record: &TrailRecord) -> f64 {
        let used = if record.used_this_season {
            self.used_bonus as f64
        } else {
            0.0
        };
        let streak = self.streak_bonus as f64 * f64::from(record.streak);
        (self.base_chance as f64 + used + streak).clamp(0.0, 1.0)
    }

    /// Hash of the policy parameters, quantized for determinism.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&QuantizedPolicyParams {
            version: self.version.clone(),
            base_chance: quantize_float(self.base_chance),
            used_bonus: quantize_float(self.used_bonus),
            streak_bonus: quantize_float(self.streak_bonus),
            permanent_streak_threshold: self.permanent_streak_threshold,
        })
    }
}

impl Default for PersistencePolicyV1 {
    fn default() -> Self {
        Self {
            version: default_version(),
            base_chance: 0.35,
            used_bonus: 0.40,
            streak_bonus: 0.10,
            permanent_streak_threshold: 3,
        }
    }
}

/// Quantized parameters for deterministic hashing.
#[derive(Serialize)]
struct QuantizedPolicyParams {
    version: String,
    base_chance: i64,
    used_bonus: i64,
    streak_bonus: i64,
    permanent_streak_threshold: u32,
}
