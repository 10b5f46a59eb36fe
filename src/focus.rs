//! Light-target follow and label layer visibility.

use glam::Vec3;

use crate::interaction::InteractionState;
use crate::roster::{EntityId, Roster};

/// Fraction of the remaining distance the light target covers per tick.
const FOLLOW_FACTOR: f32 = 0.05;

/// Tracks which entity narration is currently about and eases the key
/// light's target towards it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spotlight {
    pub target: Vec3,
    pub active: Option<EntityId>,
    /// Whether the label overlay layer should be shown.
    pub labels_visible: bool,
}

impl Spotlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, state: InteractionState, media_time: f32, roster: &Roster) {
        let goal = if state == InteractionState::Guided {
            let active = roster.iter().find(|e| e.is_on_stage_at(media_time));
            self.active = active.map(|e| e.id);
            self.labels_visible = active.is_some();
            active.map_or(Vec3::ZERO, |e| e.pose.position)
        } else {
            self.active = None;
            self.labels_visible = false;
            Vec3::ZERO
        };

        self.target = self.target.lerp(goal, FOLLOW_FACTOR);
    }
}
