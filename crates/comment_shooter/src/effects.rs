//! Global debuffs and presentation triggers.

use bevy::prelude::*;

use crate::rng::GameRng;

/// Discrete "play effect X" requests for whoever renders the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FxKind {
    Success,
    Fail,
    Crack,
    Destroy,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FxSignal {
    pub kind: FxKind,
    pub position: Vec2,
    /// Faith actually gained (positive) or lost (negative).
    pub faith_delta: i32,
}

/// Screen-wide confusion left behind by a successful ohoe.
///
/// While active, taps land a little off target.
#[derive(Resource, Debug, Clone, Default)]
pub struct Confusion {
    remaining: f32,
}

impl Confusion {
    /// Starts or extends the debuff. A shorter duration never cuts it short.
    pub fn apply(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    /// Returns true on the tick the debuff ends.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - delta_secs).max(0.0);
        self.remaining <= 0.0
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    pub const fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Offsets `position` by up to `max_offset` on each axis while active.
    pub fn jitter(&self, position: Vec2, max_offset: f32, rng: &mut GameRng) -> Vec2 {
        if !self.is_active() || max_offset <= 0.0 {
            return position;
        }
        position + Vec2::new(rng.signed_unit(), rng.signed_unit()) * max_offset
    }
}

pub(crate) fn tick_confusion(time: Res<Time>, mut confusion: ResMut<Confusion>) {
    if confusion.tick(time.delta_secs()) {
        debug!("Confusion wore off");
    }
}
