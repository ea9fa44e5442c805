//! NPC mood value objects
//!
//! Mood is the temporary layer on top of permanent personality:
//!
//! - `MoodType`: the emotional label
//! - `MoodState`: label + intensity + optional expiry
//!
//! Expiry is lazy. Nothing ticks a mood down; whoever reads it checks the
//! timestamp and collapses it to neutral in place (see
//! `PersonalityRecord::mood_at`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Temporary emotional state of an NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MoodType {
    /// Default neutral state
    #[default]
    Neutral,
    /// Pleased, upbeat
    Happy,
    /// Irritated to hostile
    Angry,
    /// Down, withdrawn
    Sad,
    /// Wary, distrustful
    Suspicious,
    /// Thankful, owes a debt
    Grateful,
    /// Stabbed in the back
    Betrayed,
    /// On edge
    Nervous,
    /// Buzzing, eager
    Excited,
}

impl MoodType {
    /// Get all moods for UI dropdowns
    pub fn all() -> &'static [MoodType] {
        &[
            MoodType::Neutral,
            MoodType::Happy,
            MoodType::Angry,
            MoodType::Sad,
            MoodType::Suspicious,
            MoodType::Grateful,
            MoodType::Betrayed,
            MoodType::Nervous,
            MoodType::Excited,
        ]
    }

    /// Get a display name for the mood
    pub fn display_name(&self) -> &'static str {
        match self {
            MoodType::Neutral => "Neutral",
            MoodType::Happy => "Happy",
            MoodType::Angry => "Angry",
            MoodType::Sad => "Sad",
            MoodType::Suspicious => "Suspicious",
            MoodType::Grateful => "Grateful",
            MoodType::Betrayed => "Betrayed",
            MoodType::Nervous => "Nervous",
            MoodType::Excited => "Excited",
        }
    }

    /// Additive adjustment this mood applies to the chance of accepting a proposal
    pub fn acceptance_delta(&self) -> f32 {
        match self {
            MoodType::Happy => 0.2,
            MoodType::Angry => -0.3,
            MoodType::Grateful => 0.3,
            MoodType::Suspicious => -0.2,
            MoodType::Betrayed => -0.5,
            MoodType::Neutral | MoodType::Sad | MoodType::Nervous | MoodType::Excited => 0.0,
        }
    }
}

impl fmt::Display for MoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for MoodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(MoodType::Neutral),
            "happy" => Ok(MoodType::Happy),
            "angry" => Ok(MoodType::Angry),
            "sad" => Ok(MoodType::Sad),
            "suspicious" => Ok(MoodType::Suspicious),
            "grateful" => Ok(MoodType::Grateful),
            "betrayed" => Ok(MoodType::Betrayed),
            "nervous" => Ok(MoodType::Nervous),
            "excited" => Ok(MoodType::Excited),
            _ => Err(DomainError::parse(format!("Unknown mood: {}", s))),
        }
    }
}

/// Current mood with intensity and optional expiry.
///
/// `expires_at == None` means the mood never lapses on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodState {
    pub current: MoodType,
    /// 0.0 - 1.0
    pub intensity: f32,
    pub expires_at: Option<DateTime<Utc>>,
}

impl MoodState {
    pub const NEUTRAL_INTENSITY: f32 = 0.5;

    /// The resting mood every NPC starts in and every expired mood collapses to
    pub fn neutral() -> Self {
        Self {
            current: MoodType::Neutral,
            intensity: Self::NEUTRAL_INTENSITY,
            expires_at: None,
        }
    }

    /// A mood that lapses `duration` after `now`; `None` never lapses
    pub fn lasting(
        current: MoodType,
        intensity: f32,
        now: DateTime<Utc>,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            current,
            intensity: if intensity.is_finite() {
                intensity.clamp(0.0, 1.0)
            } else {
                Self::NEUTRAL_INTENSITY
            },
            expires_at: duration.map(|d| now + d),
        }
    }

    /// True once `now` is strictly past the expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    pub fn is_neutral(&self) -> bool {
        self.current == MoodType::Neutral
    }
}

impl Default for MoodState {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid date")
    }

    #[test]
    fn test_expiry_is_strict() {
        let mood = MoodState::lasting(
            MoodType::Angry,
            0.8,
            t0(),
            Some(Duration::milliseconds(1000)),
        );
        assert!(!mood.is_expired(t0() + Duration::milliseconds(999)));
        assert!(!mood.is_expired(t0() + Duration::milliseconds(1000)));
        assert!(mood.is_expired(t0() + Duration::milliseconds(1001)));
    }

    #[test]
    fn test_no_duration_never_expires() {
        let mood = MoodState::lasting(MoodType::Betrayed, 1.0, t0(), None);
        assert!(!mood.is_expired(t0() + Duration::days(3650)));
    }

    #[test]
    fn test_intensity_clamped() {
        let mood = MoodState::lasting(MoodType::Happy, 4.0, t0(), None);
        assert_eq!(mood.intensity, 1.0);
    }

    #[test]
    fn test_mood_parse() {
        assert_eq!("angry".parse::<MoodType>().expect("parse"), MoodType::Angry);
        assert_eq!("BETRAYED".parse::<MoodType>().expect("parse"), MoodType::Betrayed);
        assert!("gleeful".parse::<MoodType>().is_err());
    }
}
