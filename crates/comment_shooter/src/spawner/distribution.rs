//! Which kind to spawn and what it says.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comment::{CommentKind, PerKind};
use crate::rng::GameRng;

const EMBEDDED: &str = include_str!("../../assets/distribution.ron");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse distribution: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("spawn weight for {kind} must be a non-negative number, got {weight}")]
    NegativeWeight { kind: CommentKind, weight: f32 },
    #[error("every spawn weight is zero")]
    NoWeight,
    #[error("{0} can spawn but has no texts")]
    EmptyTexts(CommentKind),
}

/// Spawn weights (percentages) and candidate texts per kind.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub weights: PerKind<f32>,
    pub texts: PerKind<Vec<String>>,
}

impl Default for Distribution {
    fn default() -> Self {
        let texts = |lines: &[&str]| lines.iter().map(ToString::to_string).collect();

        Self {
            weights: PerKind {
                holy: 40.0,
                ohoe: 30.0,
                troll: 20.0,
                super_chat: 10.0,
            },
            texts: PerKind {
                holy: texts(&["Bless this stream", "Praying for you"]),
                ohoe: texts(&["Ohoe!", "ohoe~"]),
                troll: texts(&["boring", "cringe"]),
                super_chat: texts(&["¥500 keep going!", "¥1,000 love it"]),
            },
        }
    }
}

impl Distribution {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let distribution: Self = ron::from_str(source)?;
        distribution.validate()?;
        Ok(distribution)
    }

    /// Parses `source`, falling back to the built-in distribution on error.
    pub fn load(source: &str) -> Self {
        let distribution = match Self::from_ron(source) {
            Ok(distribution) => distribution,
            Err(error) => {
                warn!("Using default comment distribution: {error}");
                return Self::default();
            }
        };

        let total = distribution.total_weight();
        if (total - 100.0).abs() > 0.01 {
            warn!("Spawn weights sum to {total}, not 100; SuperChat absorbs the difference");
        }
        distribution
    }

    /// The distribution shipped in `assets/distribution.ron`.
    pub fn embedded() -> Self {
        Self::load(EMBEDDED)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, &weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::NegativeWeight { kind, weight });
            }
            if weight > 0.0 && self.texts.get(kind).is_empty() {
                return Err(ConfigError::EmptyTexts(kind));
            }
        }
        if self.total_weight() <= 0.0 {
            return Err(ConfigError::NoWeight);
        }
        Ok(())
    }

    pub fn total_weight(&self) -> f32 {
        self.weights.iter().map(|(_, weight)| weight).sum()
    }

    /// Scales the troll weight by `troll_multiplier` and shrinks the rest so
    /// the total stays the same.
    pub fn adjusted_weights(&self, troll_multiplier: f32) -> PerKind<f32> {
        let mut weights = self.weights.clone();
        if (troll_multiplier - 1.0).abs() <= f32::EPSILON {
            return weights;
        }

        let total = self.total_weight();
        let others = total - weights.troll;
        let troll = (weights.troll * troll_multiplier).clamp(0.0, total);
        let scale = if others > 0.0 {
            (total - troll) / others
        } else {
            0.0
        };

        weights.holy *= scale;
        weights.ohoe *= scale;
        weights.super_chat *= scale;
        weights.troll = troll;
        weights
    }

    /// Cumulative draw: `roll` in `[0, 1)` maps to `r` in `[0, 100)`, and the
    /// first kind whose running total reaches `r` wins.
    pub fn pick_kind(&self, roll: f32, troll_multiplier: f32) -> CommentKind {
        let r = roll * 100.0;
        let weights = self.adjusted_weights(troll_multiplier);
        let mut cumulative = 0.0;

        for (kind, &weight) in weights.iter() {
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if cumulative >= r {
                return kind;
            }
        }

        CommentKind::SuperChat
    }

    pub fn pick_text(&self, kind: CommentKind, rng: &mut GameRng) -> String {
        rng.choose(self.texts.get(kind)).map_or_else(
            || {
                let name: &'static str = kind.into();
                name.to_string()
            },
            Clone::clone,
        )
    }
}
