use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::crossed_up;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflammationConfig {
    pub max: f32,
    pub critical: f32,
    /// Units lost per second once decay kicks in.
    pub decay_rate: f32,
    /// Seconds without an increase before decay starts.
    pub decay_delay: f32,
    /// How long the inflamed status lasts after an increase.
    pub inflamed_duration: f32,
    pub troll_spawn_multiplier: f32,
    pub speed_multiplier: f32,
}

impl InflammationConfig {
    /// Floors every rate and bound at zero. NaN becomes zero.
    pub fn normalized(self) -> Self {
        Self {
            max: self.max.max(0.0),
            decay_rate: self.decay_rate.max(0.0),
            decay_delay: self.decay_delay.max(0.0),
            inflamed_duration: self.inflamed_duration.max(0.0),
            troll_spawn_multiplier: self.troll_spawn_multiplier.max(0.0),
            speed_multiplier: self.speed_multiplier.max(0.0),
            ..self
        }
    }
}

impl Default for InflammationConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            critical: 100.0,
            decay_rate: 5.0,
            decay_delay: 2.0,
            inflamed_duration: 5.0,
            troll_spawn_multiplier: 1.5,
            speed_multiplier: 1.2,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InflammationEvent {
    Changed { previous: f32, current: f32 },
    Increased(f32),
    Decreased(f32),
    Started,
    Ended,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflammationSnapshot {
    pub current: f32,
    pub config: InflammationConfig,
}

/// Pressure built up by trolls. Decays after a quiet period.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Inflammation {
    config: InflammationConfig,
    current: f32,
    quiet_for: f32,
    inflamed_for: Option<f32>,
}

impl Default for Inflammation {
    fn default() -> Self {
        Self::new(InflammationConfig::default())
    }
}

impl Inflammation {
    pub fn new(config: InflammationConfig) -> Self {
        Self {
            config: config.normalized(),
            current: 0.0,
            quiet_for: 0.0,
            inflamed_for: None,
        }
    }

    pub const fn config(&self) -> &InflammationConfig {
        &self.config
    }

    pub const fn current(&self) -> f32 {
        self.current
    }

    pub fn fraction(&self) -> f32 {
        if self.config.max <= 0.0 {
            return 0.0;
        }
        self.current / self.config.max
    }

    pub const fn is_inflamed(&self) -> bool {
        self.inflamed_for.is_some()
    }

    pub fn is_critical(&self) -> bool {
        self.current >= self.config.critical
    }

    /// Troll weight multiplier for the spawner.
    pub fn spawn_multiplier(&self) -> f32 {
        if self.is_inflamed() {
            self.config.troll_spawn_multiplier
        } else {
            1.0
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.is_inflamed() {
            self.config.speed_multiplier
        } else {
            1.0
        }
    }

    /// Non-positive amounts are ignored. Any increase restarts the quiet period.
    pub fn add(&mut self, amount: f32) -> Vec<InflammationEvent> {
        if amount <= 0.0 {
            return Vec::new();
        }
        self.quiet_for = 0.0;

        let previous = self.current;
        let current = (previous + amount).clamp(0.0, self.config.max);
        let mut events = Vec::new();

        if current > previous {
            self.current = current;
            events.push(InflammationEvent::Changed { previous, current });
            events.push(InflammationEvent::Increased(current - previous));
            if crossed_up(previous, current, self.config.critical) {
                events.push(InflammationEvent::Critical);
            }
        }

        if self.current > 0.0 {
            if self.inflamed_for.is_none() {
                events.push(InflammationEvent::Started);
            }
            self.inflamed_for = Some(self.config.inflamed_duration);
        }

        events
    }

    /// Non-positive amounts are ignored.
    pub fn subtract(&mut self, amount: f32) -> Vec<InflammationEvent> {
        if amount <= 0.0 {
            return Vec::new();
        }
        self.decrease(amount)
    }

    /// Runs the inflamed timer and decays once the quiet period is over.
    pub fn tick(&mut self, delta_secs: f32) -> Vec<InflammationEvent> {
        let mut events = Vec::new();

        if let Some(remaining) = self.inflamed_for.as_mut() {
            *remaining -= delta_secs;
            if *remaining <= 0.0 {
                self.inflamed_for = None;
                events.push(InflammationEvent::Ended);
            }
        }

        self.quiet_for += delta_secs;
        if self.quiet_for >= self.config.decay_delay && self.current > 0.0 {
            events.extend(self.decrease(self.config.decay_rate * delta_secs));
        }

        events
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub const fn snapshot(&self) -> InflammationSnapshot {
        InflammationSnapshot {
            current: self.current,
            config: self.config,
        }
    }

    pub fn restore(&mut self, snapshot: &InflammationSnapshot) {
        self.config = snapshot.config.normalized();
        // `max` first so a NaN snapshot lands on zero.
        self.current = snapshot.current.max(0.0).min(self.config.max);
        self.quiet_for = 0.0;
        self.inflamed_for = None;
    }

    fn decrease(&mut self, amount: f32) -> Vec<InflammationEvent> {
        let previous = self.current;
        let current = (previous - amount).clamp(0.0, self.config.max);
        if current >= previous {
            return Vec::new();
        }
        self.current = current;

        let mut events = vec![
            InflammationEvent::Changed { previous, current },
            InflammationEvent::Decreased(previous - current),
        ];
        if current <= 0.0 && self.inflamed_for.take().is_some() {
            events.push(InflammationEvent::Ended);
        }
        events
    }
}
