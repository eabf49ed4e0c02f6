//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `configure_headless` installs gameplay without rendering or device input.
//! - time advances a fixed 100 ms per update.

use core::time::Duration;

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use comment_shooter::comment::{Comment, CommentKind, CommentSettings};
use comment_shooter::flow::GameState;
use comment_shooter::mover::CommentMover;
use comment_shooter::rng::GameRng;
use comment_shooter::spawner::pool::CommentPool;
use comment_shooter::spawner::{SpawnSettings, spawn_comment};

pub const TICK: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));

    comment_shooter::configure_headless(&mut app);
    app.insert_resource(GameRng::with_seed(7))
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    app
}

/// A headless app whose spawner never fires on its own.
pub fn app_quiet() -> App {
    let mut app = app_headless();
    app.insert_resource(SpawnSettings {
        interval: 1000.0,
        interval_variation: 0.0,
        ..SpawnSettings::default()
    });
    app
}

pub fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

/// Puts a comment into play the way the spawner does.
pub fn spawn(app: &mut App, kind: CommentKind, text: &str, position: Vec2, speed: f32) -> Entity {
    let world = app.world_mut();
    let comment = Comment::new(kind, text, world.resource::<CommentSettings>());
    let hit_box = world.resource::<SpawnSettings>().hit_box;
    let mover = CommentMover::new(speed, position);

    let mut queue = CommandQueue::default();
    let entity = world.resource_scope(|world, mut pool: Mut<CommentPool>| {
        let mut commands = Commands::new(&mut queue, world);
        spawn_comment(&mut commands, &mut pool, comment, mover, position, hit_box)
    });
    queue.apply(world);
    entity
}

pub fn comment(app: &App, entity: Entity) -> Option<&Comment> {
    app.world().get::<Comment>(entity)
}

pub fn is_active(app: &App, entity: Entity) -> bool {
    app.world().resource::<CommentPool>().is_active(entity)
}
