//! Leftward drift with an optional vertical float.

use core::f32::consts::TAU;

use bevy::prelude::*;
use game_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};

use crate::comment::Comment;
use crate::config::{BASE_SPEED, FLOAT_AMPLITUDE, FLOAT_FREQUENCY, LEFT_BOUND_OFFSET, SPEED_VARIATION};
use crate::events::CommentEvent;
use crate::meters::inflammation::Inflammation;
use crate::rng::GameRng;
use crate::spawner::pool::ActiveComment;

/// Visible world rectangle, published by whoever owns the camera.
///
/// Defaults to the reference window centred on the origin so headless apps
/// work without a camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self {
            left: -WINDOW_WIDTH / 2.0,
            right: WINDOW_WIDTH / 2.0,
            bottom: -WINDOW_HEIGHT / 2.0,
            top: WINDOW_HEIGHT / 2.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MoverSettings {
    pub base_speed: f32,
    /// Fraction of `base_speed` a spawn may deviate by, both ways.
    pub speed_variation: f32,
    pub float_enabled: bool,
    pub float_amplitude: f32,
    pub float_frequency: f32,
    /// How far past the left edge a comment counts as gone.
    pub left_bound_offset: f32,
}

impl Default for MoverSettings {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_variation: SPEED_VARIATION,
            float_enabled: true,
            float_amplitude: FLOAT_AMPLITUDE,
            float_frequency: FLOAT_FREQUENCY,
            left_bound_offset: LEFT_BOUND_OFFSET,
        }
    }
}

impl MoverSettings {
    pub fn roll_speed(&self, rng: &mut GameRng) -> f32 {
        self.base_speed * self.speed_variation.mul_add(rng.signed_unit(), 1.0)
    }

    pub fn left_bound(&self, bounds: &ViewportBounds) -> f32 {
        bounds.left - self.left_bound_offset
    }

    pub fn build(&self, speed: f32, start: Vec2, rng: &mut GameRng) -> CommentMover {
        let mover = CommentMover::new(speed, start);
        if !self.float_enabled || self.float_amplitude <= 0.0 {
            return mover;
        }
        mover.with_float(FloatMotion {
            amplitude: self.float_amplitude,
            frequency: self.float_frequency,
            phase: rng.range(0.0, TAU),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

#[derive(Component, Debug, Clone)]
pub struct CommentMover {
    speed: f32,
    start_x: f32,
    base_y: f32,
    float: Option<FloatMotion>,
    elapsed: f32,
    reported: bool,
}

impl CommentMover {
    pub const fn new(speed: f32, start: Vec2) -> Self {
        Self {
            speed,
            start_x: start.x,
            base_y: start.y,
            float: None,
            elapsed: 0.0,
            reported: false,
        }
    }

    pub const fn with_float(mut self, float: FloatMotion) -> Self {
        self.float = Some(float);
        self
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub fn step(&mut self, translation: &mut Vec3, delta_secs: f32, speed_multiplier: f32) {
        self.elapsed += delta_secs;
        translation.x -= self.speed * speed_multiplier * delta_secs;

        if let Some(float) = self.float {
            let angle = (TAU * float.frequency).mul_add(self.elapsed, float.phase);
            translation.y = float.amplitude.mul_add(angle.sin(), self.base_y);
        }
    }

    /// True the first time `x` is past `left_bound`, false ever after.
    pub fn crossed_left_bound(&mut self, x: f32, left_bound: f32) -> bool {
        if self.reported || x >= left_bound {
            return false;
        }
        self.reported = true;
        true
    }

    /// 0 at the spawn point, 1 at the left bound.
    pub fn progress(&self, x: f32, left_bound: f32) -> f32 {
        let span = self.start_x - left_bound;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.start_x - x) / span).clamp(0.0, 1.0)
    }

    pub fn time_to_left_bound(&self, x: f32, left_bound: f32, speed_multiplier: f32) -> f32 {
        let speed = self.speed * speed_multiplier;
        if speed <= 0.0 {
            return f32::INFINITY;
        }
        ((x - left_bound) / speed).max(0.0)
    }
}

pub(crate) fn move_comments(
    time: Res<Time>,
    bounds: Res<ViewportBounds>,
    settings: Res<MoverSettings>,
    inflammation: Res<Inflammation>,
    mut comments: Query<
        (Entity, &mut Comment, &mut CommentMover, &mut Transform),
        With<ActiveComment>,
    >,
    mut events: EventWriter<CommentEvent>,
) {
    let delta_secs = time.delta_secs();
    let multiplier = inflammation.speed_multiplier();
    let left_bound = settings.left_bound(&bounds);

    for (entity, mut comment, mut mover, mut transform) in &mut comments {
        // Cracked comments hold still until the crack resolves.
        if !comment.start_moving() {
            continue;
        }

        mover.step(&mut transform.translation, delta_secs, multiplier);

        if mover.crossed_left_bound(transform.translation.x, left_bound) {
            let position = transform.translation.truncate();
            for signal in comment.miss() {
                debug!("{} left the screen: {signal}", comment.kind());
                events.send(CommentEvent::new(entity, &comment, signal, position));
            }
        }
    }
}

#[cfg(test)]
mod tests;
