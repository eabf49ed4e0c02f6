//! Round lifecycle: menu, play, pause and game over, plus the round clock.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::state::state::StateTransitionEvent;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::TIME_LIMIT;
use crate::effects::Confusion;
use crate::events::WorldTap;
use crate::meters::faith::Faith;
use crate::meters::health::Health;
use crate::meters::inflammation::Inflammation;
use crate::rng::GameRng;
use crate::spawner::pool::CommentPool;
use crate::spawner::{SpawnSettings, SpawnTimer, clear_all, prewarm_pool};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    TimeUp,
}

/// How the last round ended, `None` while one is running.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome(pub Option<Outcome>);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnded(pub Outcome);

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub time_limit: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            time_limit: TIME_LIMIT,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameClock {
    elapsed: f32,
    limit: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(TIME_LIMIT)
    }
}

impl GameClock {
    pub const fn new(limit: f32) -> Self {
        Self {
            elapsed: 0.0,
            limit,
        }
    }

    /// Returns true on the tick the limit is reached.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if self.is_expired() {
            return false;
        }
        self.elapsed = (self.elapsed + delta_secs).min(self.limit);
        self.is_expired()
    }

    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub const fn limit(&self) -> f32 {
        self.limit
    }

    pub fn remaining(&self) -> f32 {
        (self.limit - self.elapsed).max(0.0)
    }

    /// Share of the round played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.limit <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.limit).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.limit
    }
}

/// Defeat outranks victory, which outranks running out of time.
pub fn decide_outcome(faith: &Faith, health: &Health, clock: &GameClock) -> Option<Outcome> {
    if faith.is_depleted() || health.is_zero() {
        Some(Outcome::Defeat)
    } else if faith.has_reached_target() {
        Some(Outcome::Victory)
    } else if clock.is_expired() {
        Some(Outcome::TimeUp)
    } else {
        None
    }
}

/// Everything a fresh round puts back to its starting values.
#[derive(SystemParam)]
pub struct RoundReset<'w, 's> {
    commands: Commands<'w, 's>,
    pool: ResMut<'w, CommentPool>,
    spawn_settings: Res<'w, SpawnSettings>,
    spawn_timer: ResMut<'w, SpawnTimer>,
    flow_settings: Res<'w, FlowSettings>,
    clock: ResMut<'w, GameClock>,
    outcome: ResMut<'w, GameOutcome>,
    faith: ResMut<'w, Faith>,
    health: ResMut<'w, Health>,
    inflammation: ResMut<'w, Inflammation>,
    confusion: ResMut<'w, Confusion>,
    rng: ResMut<'w, GameRng>,
    taps: ResMut<'w, Events<WorldTap>>,
}

impl RoundReset<'_, '_> {
    pub fn reset(&mut self) {
        clear_all(&mut self.commands, &mut self.pool);
        prewarm_pool(&mut self.commands, &mut self.pool, &self.spawn_settings);

        *self.spawn_timer = SpawnTimer::new(self.spawn_settings.roll_interval(&mut self.rng));
        *self.clock = GameClock::new(self.flow_settings.time_limit);
        *self.outcome = GameOutcome::default();

        self.faith.reset();
        self.health.reset();
        self.inflammation.reset();
        self.confusion.clear();
        // The tap that started the round must not reach the new board.
        self.taps.clear();
    }
}

pub(crate) fn start_round(mut round: RoundReset) {
    round.reset();
    info!("Round started");
}

pub(crate) fn tick_clock(time: Res<Time>, mut clock: ResMut<GameClock>) {
    if clock.tick(time.delta_secs()) {
        debug!("Round clock ran out after {:.1}s", clock.elapsed());
    }
}

pub(crate) fn check_outcome(
    faith: Res<Faith>,
    health: Res<Health>,
    clock: Res<GameClock>,
    mut outcome: ResMut<GameOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
    mut ended: EventWriter<RoundEnded>,
) {
    if outcome.0.is_some() {
        return;
    }
    let Some(result) = decide_outcome(&faith, &health, &clock) else {
        return;
    };

    info!(
        "Round over: {result} with faith {} and health {} at {:.1}s",
        faith.current(),
        health.current(),
        clock.elapsed()
    );
    outcome.0 = Some(result);
    ended.send(RoundEnded(result));
    next_state.set(GameState::GameOver);
}

/// Any tap on the menu or game over screen starts a round.
pub(crate) fn start_on_tap(
    mut taps: EventReader<WorldTap>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if taps.read().count() > 0 {
        next_state.set(GameState::Playing);
    }
}

pub(crate) fn log_transitions(mut transitions: EventReader<StateTransitionEvent<GameState>>) {
    for transition in transitions.read() {
        info!("Game state {:?} -> {:?}", transition.exited, transition.entered);
    }
}
