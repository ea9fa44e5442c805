//! Engine configuration.
//!
//! Defaults are the tuned values; every field can be overridden with an
//! `NPCSOCIAL_*` environment variable. Unparseable values keep the default.

use std::path::PathBuf;
use std::str::FromStr;

use npcsocial_domain::AcceptanceBounds;
use serde::{Deserialize, Serialize};

pub const ENV_STORAGE_DIR: &str = "NPCSOCIAL_STORAGE_DIR";
pub const ENV_SAVE_KEY: &str = "NPCSOCIAL_SAVE_KEY";
pub const ENV_MOOD_INTENSITY: &str = "NPCSOCIAL_MOOD_INTENSITY";
pub const ENV_MOOD_DURATION_MS: &str = "NPCSOCIAL_MOOD_DURATION_MS";
pub const ENV_ACCEPT_MIN: &str = "NPCSOCIAL_ACCEPT_MIN";
pub const ENV_ACCEPT_MAX: &str = "NPCSOCIAL_ACCEPT_MAX";
pub const ENV_HISTORY_LIMIT: &str = "NPCSOCIAL_HISTORY_LIMIT";
pub const ENV_MESSAGE_SPACING_MS: &str = "NPCSOCIAL_MESSAGE_SPACING_MS";
pub const ENV_MESSAGE_JITTER_MS: &str = "NPCSOCIAL_MESSAGE_JITTER_MS";
pub const ENV_FILLER_WORD: &str = "NPCSOCIAL_FILLER_WORD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory used by file-backed storage
    pub storage_dir: PathBuf,
    /// Key the save blob is stored under
    pub save_key: String,
    pub default_mood_intensity: f32,
    pub default_mood_duration_ms: u64,
    pub acceptance_bounds: AcceptanceBounds,
    /// Completed conversations kept in history
    pub history_limit: usize,
    /// Gap between consecutive conversation lines
    pub message_spacing_ms: u64,
    /// Upper bound of the random extra delay per line
    pub message_jitter_ms: u64,
    /// Substituted for placeholders nothing resolves
    pub filler_word: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".npcsocial"),
            save_key: "npc_social_state".to_string(),
            default_mood_intensity: 0.7,
            default_mood_duration_ms: 300_000,
            acceptance_bounds: AcceptanceBounds::DEFAULT,
            history_limit: 50,
            message_spacing_ms: 1500,
            message_jitter_ms: 500,
            filler_word: "someone".to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let bounds = AcceptanceBounds {
            min: parsed(&lookup, ENV_ACCEPT_MIN, defaults.acceptance_bounds.min),
            max: parsed(&lookup, ENV_ACCEPT_MAX, defaults.acceptance_bounds.max),
        };
        let acceptance_bounds = bounds.sanitized();
        if acceptance_bounds != bounds {
            tracing::warn!(
                min = bounds.min,
                max = bounds.max,
                "Unusable acceptance bounds, using defaults"
            );
        }

        Self {
            storage_dir: PathBuf::from(text(
                ENV_STORAGE_DIR,
                defaults.storage_dir.to_string_lossy().into_owned(),
            )),
            save_key: text(ENV_SAVE_KEY, defaults.save_key),
            default_mood_intensity: parsed(
                &lookup,
                ENV_MOOD_INTENSITY,
                defaults.default_mood_intensity,
            )
            .clamp(0.0, 1.0),
            default_mood_duration_ms: parsed(
                &lookup,
                ENV_MOOD_DURATION_MS,
                defaults.default_mood_duration_ms,
            ),
            acceptance_bounds,
            history_limit: parsed(&lookup, ENV_HISTORY_LIMIT, defaults.history_limit),
            message_spacing_ms: parsed(
                &lookup,
                ENV_MESSAGE_SPACING_MS,
                defaults.message_spacing_ms,
            ),
            message_jitter_ms: parsed(&lookup, ENV_MESSAGE_JITTER_MS, defaults.message_jitter_ms),
            filler_word: text(ENV_FILLER_WORD, defaults.filler_word),
        }
    }

    pub fn default_mood_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(
            i64::try_from(self.default_mood_duration_ms).unwrap_or(i64::MAX),
        )
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    error = %e,
                    "Invalid config value, using default"
                );
                default
            }
        },
    }
}
