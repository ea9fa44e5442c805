//! Temporary mood layer.

use std::sync::Arc;

use chrono::Duration;
use npcsocial_domain::{MoodState, MoodType, NpcId, SocialEvent};

use crate::infrastructure::ports::ClockPort;
use crate::stores::SocialState;

/// How long a newly set mood lasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoodDuration {
    /// The configured default duration
    #[default]
    Default,
    For(Duration),
    /// Never lapses; only `clear_mood` resets it
    Indefinite,
}

pub struct MoodController {
    clock: Arc<dyn ClockPort>,
    default_intensity: f32,
    default_duration: Duration,
}

impl MoodController {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        default_intensity: f32,
        default_duration: Duration,
    ) -> Self {
        Self {
            clock,
            default_intensity,
            default_duration,
        }
    }

    pub fn set_mood(
        &self,
        state: &mut SocialState,
        npc_id: &NpcId,
        mood: MoodType,
        intensity: Option<f32>,
        duration: MoodDuration,
    ) -> MoodState {
        let now = self.clock.now();
        let duration = match duration {
            MoodDuration::Default => Some(self.default_duration),
            MoodDuration::For(d) => Some(d),
            MoodDuration::Indefinite => None,
        };
        let next = MoodState::lasting(
            mood,
            intensity.unwrap_or(self.default_intensity),
            now,
            duration,
        );

        let (record, _) = state.personalities.get_or_create(npc_id);
        record.set_mood(next);

        tracing::debug!(
            npc_id = %npc_id,
            mood = %mood,
            intensity = next.intensity,
            expires_at = ?next.expires_at,
            "Mood set"
        );
        state.raise(SocialEvent::MoodChanged {
            npc_id: npc_id.clone(),
            mood,
            intensity: next.intensity,
        });
        next
    }

    /// Current mood; an expired one collapses to neutral and stays that way
    pub fn get_mood(&self, state: &mut SocialState, npc_id: &NpcId) -> MoodState {
        let now = self.clock.now();
        let created = !state.personalities.contains(npc_id);
        let (record, _) = state.personalities.get_or_create(npc_id);
        let before = *record.stored_mood();
        let mood = record.mood_at(now);
        if created || before != mood {
            if before != mood {
                tracing::debug!(npc_id = %npc_id, expired = %before.current, "Mood expired");
            }
            state.touch();
        }
        mood
    }

    pub fn clear_mood(&self, state: &mut SocialState, npc_id: &NpcId) {
        let Some(record) = state.personalities.get_mut(npc_id) else {
            return;
        };
        if record.stored_mood().is_neutral() && record.stored_mood().expires_at.is_none() {
            return;
        }
        record.clear_mood();
        let neutral = MoodState::neutral();
        state.raise(SocialEvent::MoodChanged {
            npc_id: npc_id.clone(),
            mood: neutral.current,
            intensity: neutral.intensity,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{epoch, manual_clock, state};

    fn controller(clock: Arc<dyn ClockPort>) -> MoodController {
        MoodController::new(clock, 0.7, Duration::milliseconds(300_000))
    }

    #[test]
    fn test_mood_expires_strictly_after_duration() {
        let clock = manual_clock();
        let moods = controller(clock.clone());
        let mut state = state();
        let sal = NpcId::new("Sal");

        moods.set_mood(
            &mut state,
            &sal,
            MoodType::Angry,
            Some(0.9),
            MoodDuration::For(Duration::milliseconds(1000)),
        );

        clock.advance(Duration::milliseconds(999));
        assert_eq!(moods.get_mood(&mut state, &sal).current, MoodType::Angry);

        clock.advance(Duration::milliseconds(2));
        assert_eq!(moods.get_mood(&mut state, &sal).current, MoodType::Neutral);

        // Stays neutral after collapse
        clock.advance(Duration::milliseconds(-1000));
        assert_eq!(moods.get_mood(&mut state, &sal).current, MoodType::Neutral);
    }

    #[test]
    fn test_defaults_applied() {
        let clock = manual_clock();
        let moods = controller(clock);
        let mut state = state();

        let mood = moods.set_mood(
            &mut state,
            &NpcId::new("Sal"),
            MoodType::Happy,
            None,
            MoodDuration::Default,
        );
        assert_eq!(mood.intensity, 0.7);
        assert_eq!(mood.expires_at, Some(epoch() + Duration::milliseconds(300_000)));

        let (_, events) = state.take_changes();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "mood_changed");
    }

    #[test]
    fn test_indefinite_mood_needs_explicit_clear() {
        let clock = manual_clock();
        let moods = controller(clock.clone());
        let mut state = state();
        let sal = NpcId::new("Sal");

        moods.set_mood(&mut state, &sal, MoodType::Betrayed, Some(1.0), MoodDuration::Indefinite);
        clock.advance(Duration::days(365));
        assert_eq!(moods.get_mood(&mut state, &sal).current, MoodType::Betrayed);

        moods.clear_mood(&mut state, &sal);
        assert!(moods.get_mood(&mut state, &sal).is_neutral());
    }

    #[test]
    fn test_get_mood_without_change_is_clean() {
        let moods = controller(manual_clock());
        let mut state = state();
        let sal = NpcId::new("Sal");
        moods.get_mood(&mut state, &sal);
        state.take_changes();

        moods.get_mood(&mut state, &sal);
        let (dirty, events) = state.take_changes();
        assert!(!dirty);
        assert!(events.is_empty());
    }
}
