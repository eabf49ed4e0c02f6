pub mod comment;
pub mod config;
pub mod effects;
pub mod events;
pub mod flow;
pub mod hit_test;
pub mod input;
pub mod meters;
pub mod mover;
pub mod presentation;
pub mod rng;
pub mod spawner;

use bevy::prelude::*;

use comment::{CommentSettings, tick_comments};
use effects::{Confusion, FxSignal, tick_confusion};
use events::{CommentEvent, CommentSpawned, EmptyAreaTapped, WorldTap};
use flow::{
    FlowSettings, GameClock, GameOutcome, GameState, RoundEnded, check_outcome, log_transitions,
    start_on_tap, start_round, tick_clock,
};
use hit_test::{HitTestSettings, route_taps};
use meters::faith::{Faith, FaithEvent, FaithRewards};
use meters::health::{Health, HealthEvent};
use meters::inflammation::{Inflammation, InflammationEvent};
use meters::{apply_comment_effects, tick_meters};
use mover::{MoverSettings, ViewportBounds, move_comments};
use rng::GameRng;
use spawner::distribution::Distribution;
use spawner::pool::CommentPool;
use spawner::{SpawnSettings, SpawnTimer, recycle_comments, tick_spawner};

/// Gameplay stages within a tick, in the order they run.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, SystemSet)]
pub enum GameSet {
    Spawn,
    Movement,
    Timers,
    Input,
    Resolve,
    Recycle,
}

/// Everything gameplay needs, without windows, rendering or device input.
pub struct CommentShooterPlugin;

impl Plugin for CommentShooterPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameRng>()
            .insert_resource(Distribution::embedded())
            .init_resource::<SpawnSettings>()
            .init_resource::<SpawnTimer>()
            .init_resource::<CommentPool>()
            .init_resource::<MoverSettings>()
            .init_resource::<ViewportBounds>()
            .init_resource::<CommentSettings>()
            .init_resource::<HitTestSettings>()
            .init_resource::<FaithRewards>()
            .init_resource::<Faith>()
            .init_resource::<Health>()
            .init_resource::<Inflammation>()
            .init_resource::<Confusion>()
            .init_resource::<FlowSettings>()
            .init_resource::<GameClock>()
            .init_resource::<GameOutcome>()
            .add_event::<CommentEvent>()
            .add_event::<CommentSpawned>()
            .add_event::<WorldTap>()
            .add_event::<EmptyAreaTapped>()
            .add_event::<FxSignal>()
            .add_event::<FaithEvent>()
            .add_event::<HealthEvent>()
            .add_event::<InflammationEvent>()
            .add_event::<RoundEnded>()
            .configure_sets(
                Update,
                (
                    GameSet::Spawn,
                    GameSet::Movement,
                    GameSet::Timers,
                    GameSet::Input,
                    GameSet::Resolve,
                    GameSet::Recycle,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                OnTransition {
                    exited: GameState::MainMenu,
                    entered: GameState::Playing,
                },
                start_round,
            )
            .add_systems(
                OnTransition {
                    exited: GameState::GameOver,
                    entered: GameState::Playing,
                },
                start_round,
            )
            .add_systems(
                Update,
                (
                    tick_spawner.in_set(GameSet::Spawn),
                    move_comments.in_set(GameSet::Movement),
                    (tick_comments, tick_meters, tick_confusion, tick_clock)
                        .in_set(GameSet::Timers),
                    route_taps.in_set(GameSet::Input),
                    (apply_comment_effects, check_outcome)
                        .chain()
                        .in_set(GameSet::Resolve),
                    recycle_comments.in_set(GameSet::Recycle),
                ),
            )
            .add_systems(
                Update,
                (
                    start_on_tap
                        .run_if(in_state(GameState::MainMenu).or(in_state(GameState::GameOver))),
                    log_transitions,
                ),
            );
    }
}

/// Installs the gameplay plugin on an app that already has `MinimalPlugins`
/// and `StatesPlugin`.
pub fn configure_headless(app: &mut App) {
    app.add_plugins(CommentShooterPlugin);
}

pub fn run() {
    game_helpers::get_default_app("Comment Shooter")
        .add_plugins(CommentShooterPlugin)
        .add_plugins(input::ShooterInputPlugin)
        .add_plugins(presentation::PresentationPlugin)
        .run();
}
