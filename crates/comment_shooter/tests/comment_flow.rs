mod common;

use bevy::prelude::*;
use comment_shooter::comment::{CommentKind, CommentState};
use comment_shooter::effects::Confusion;
use comment_shooter::events::{EmptyAreaTapped, WorldTap};
use comment_shooter::flow::{FlowSettings, GameOutcome, GameState, Outcome};
use comment_shooter::meters::faith::Faith;
use comment_shooter::meters::health::Health;
use comment_shooter::meters::inflammation::Inflammation;
use comment_shooter::spawner::SpawnSettings;
use comment_shooter::spawner::pool::CommentPool;
use strum::IntoEnumIterator;

use common::{app_headless, app_quiet, comment, is_active, run, set_state, spawn, state};

fn faith(app: &App) -> i32 {
    app.world().resource::<Faith>().current()
}

fn tap(app: &mut App, tap: WorldTap) {
    app.world_mut().send_event(tap);
    app.update();
}

/// Sends a tap from `PreUpdate`, the way device input arrives mid-frame.
#[derive(Resource, Default)]
struct PendingTap(Option<WorldTap>);

fn forward_pending_tap(mut pending: ResMut<PendingTap>, mut taps: EventWriter<WorldTap>) {
    if let Some(tap) = pending.0.take() {
        taps.send(tap);
    }
}

fn playing_quiet() -> App {
    let mut app = app_quiet();
    set_state(&mut app, GameState::Playing);
    app
}

#[test]
fn starting_a_round_prewarms_the_pool() {
    let app = playing_quiet();
    let pool = app.world().resource::<CommentPool>();

    assert_eq!(state(&app), GameState::Playing, "menu left");
    assert_eq!(pool.active_count(), 0, "nothing on screen yet");
    for kind in CommentKind::iter() {
        assert_eq!(pool.free_count(kind), 5, "five waiting per kind");
    }
}

#[test]
fn holy_processes_itself_and_returns_to_the_pool() {
    let mut app = playing_quiet();
    let holy = spawn(&mut app, CommentKind::Holy, "Bless", Vec2::ZERO, 0.0);
    assert!(is_active(&app, holy), "in play");

    run(&mut app, 10);
    assert_eq!(faith(&app), 8, "rewarded once");
    assert!(!is_active(&app, holy), "recycled");
    assert_eq!(
        app.world().get::<Visibility>(holy),
        Some(&Visibility::Hidden),
        "hidden until reused"
    );
}

#[test]
fn holy_tap_rewards_once_before_auto_process() {
    let mut app = playing_quiet();
    let holy = spawn(&mut app, CommentKind::Holy, "Bless", Vec2::ZERO, 0.0);

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    assert_eq!(faith(&app), 8, "tap processes the holy comment");
    assert!(!is_active(&app, holy), "recycled on tap");

    run(&mut app, 10);
    assert_eq!(faith(&app), 8, "auto-process does not reward again");
}

#[test]
fn troll_double_tap_rewards_faith_once() {
    let mut app = playing_quiet();
    let troll = spawn(&mut app, CommentKind::Troll, "boring", Vec2::ZERO, 0.0);

    tap(&mut app, WorldTap::Double(Vec2::ZERO));
    assert_eq!(faith(&app), 15, "troll reward");
    assert!(!is_active(&app, troll), "destroyed and recycled");

    tap(&mut app, WorldTap::Double(Vec2::ZERO));
    assert_eq!(faith(&app), 15, "nothing left to reward");
    assert_eq!(
        app.world()
            .resource::<Events<EmptyAreaTapped>>()
            .iter_current_update_events()
            .count(),
        1,
        "second tap hit empty space"
    );
}

#[test]
fn troll_two_quick_taps_destroy_it() {
    let mut app = playing_quiet();
    let troll = spawn(&mut app, CommentKind::Troll, "cringe", Vec2::ZERO, 0.0);

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    let cracked = comment(&app, troll).map(|c| (c.state(), c.health()));
    assert_eq!(cracked, Some((CommentState::Cracked, 1)), "first tap cracks");

    tap(&mut app, WorldTap::Single(Vec2::new(10.0, 0.0)));
    assert_eq!(faith(&app), 15, "second tap lands");
    assert!(!is_active(&app, troll), "gone");
}

#[test]
fn troll_crack_reverts_when_the_window_passes() {
    let mut app = playing_quiet();
    let troll = spawn(&mut app, CommentKind::Troll, "cringe", Vec2::ZERO, 0.0);

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    run(&mut app, 10);

    let healed = comment(&app, troll).map(|c| (c.health(), c.tap_count()));
    assert_eq!(healed, Some((2, 0)), "health restored and sequence reset");
    assert!(is_active(&app, troll), "still in play");
    assert_eq!(faith(&app), 0, "no faith change");
}

#[test]
fn epic_super_chat_pays_the_same_either_way() {
    let mut app = playing_quiet();
    spawn(&mut app, CommentKind::SuperChat, "¥1000 go!", Vec2::ZERO, 0.0);
    run(&mut app, 10);
    assert_eq!(faith(&app), 60, "auto processed");

    let tapped = spawn(
        &mut app,
        CommentKind::SuperChat,
        "¥1,000 love it",
        Vec2::new(0.0, 100.0),
        0.0,
    );
    tap(&mut app, WorldTap::Single(Vec2::new(0.0, 100.0)));
    assert_eq!(faith(&app), 120, "tap processed");
    assert!(!is_active(&app, tapped), "recycled");
}

#[test]
fn ohoe_tap_confuses_then_lingers_out() {
    let mut app = playing_quiet();
    let ohoe = spawn(&mut app, CommentKind::Ohoe, "Ohoe!", Vec2::ZERO, 0.0);

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    assert_eq!(faith(&app), 12, "ohoe reward");
    assert!(app.world().resource::<Confusion>().is_active(), "confused");
    assert!(is_active(&app, ohoe), "lingers while confusion lasts");

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    assert_eq!(faith(&app), 12, "processed comments ignore taps");

    run(&mut app, 25);
    assert!(!is_active(&app, ohoe), "retired after lingering");
    assert!(!app.world().resource::<Confusion>().is_active(), "confusion over");
    assert_eq!(faith(&app), 12, "retiring costs nothing");
}

#[test]
fn missed_ohoe_costs_faith() {
    let mut app = playing_quiet();
    let ohoe = spawn(&mut app, CommentKind::Ohoe, "ohoe~", Vec2::new(-235.0, 0.0), 120.0);

    run(&mut app, 5);
    assert_eq!(faith(&app), -15, "miss penalty");
    assert!(!is_active(&app, ohoe), "recycled");
}

#[test]
fn missed_troll_hurts_and_inflames() {
    let mut app = playing_quiet();
    spawn(&mut app, CommentKind::Troll, "boring", Vec2::new(-235.0, 0.0), 120.0);

    run(&mut app, 5);
    assert_eq!(faith(&app), -25, "troll penalty");
    assert_eq!(app.world().resource::<Health>().current(), 4, "one health lost");
    let inflammation = app.world().resource::<Inflammation>();
    assert!((inflammation.current() - 25.0).abs() < f32::EPSILON, "inflamed");
    assert!(inflammation.is_inflamed(), "inflamed status");
}

#[test]
fn reaching_the_target_wins() {
    let mut app = playing_quiet();
    app.world_mut().resource_mut::<Faith>().add(195);
    spawn(&mut app, CommentKind::Holy, "Bless", Vec2::ZERO, 0.0);

    run(&mut app, 10);
    assert_eq!(state(&app), GameState::GameOver, "round over");
    assert_eq!(
        *app.world().resource::<GameOutcome>(),
        GameOutcome(Some(Outcome::Victory)),
        "won"
    );
}

#[test]
fn clock_runs_out_and_a_tap_restarts() {
    let mut app = app_quiet();
    app.insert_resource(FlowSettings { time_limit: 1.0 });
    set_state(&mut app, GameState::Playing);
    app.world_mut().resource_mut::<Faith>().add(30);

    run(&mut app, 15);
    assert_eq!(state(&app), GameState::GameOver, "time up ends the round");
    assert_eq!(
        app.world().resource::<GameOutcome>().0,
        Some(Outcome::TimeUp),
        "time up"
    );

    tap(&mut app, WorldTap::Single(Vec2::ZERO));
    app.update();
    assert_eq!(state(&app), GameState::Playing, "tap starts a new round");
    assert_eq!(faith(&app), 0, "faith reset");
    assert_eq!(app.world().resource::<GameOutcome>().0, None, "outcome cleared");
}

#[test]
fn the_tap_that_starts_a_round_does_not_reach_the_board() {
    let mut app = app_quiet();
    app.init_resource::<PendingTap>()
        .add_systems(PreUpdate, forward_pending_tap);
    app.update();
    assert_eq!(state(&app), GameState::MainMenu, "starts on the menu");

    app.world_mut().resource_mut::<PendingTap>().0 = Some(WorldTap::Single(Vec2::ZERO));
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::Playing, "tap started the round");
    assert_eq!(
        app.world()
            .resource::<Events<EmptyAreaTapped>>()
            .iter_current_update_events()
            .count(),
        0,
        "start tap is not an empty-area tap"
    );
    assert!(
        app.world().resource::<Events<WorldTap>>().is_empty(),
        "start tap consumed"
    );
}

#[test]
fn pause_freezes_gameplay() {
    let mut app = playing_quiet();
    let holy = spawn(&mut app, CommentKind::Holy, "Bless", Vec2::ZERO, 0.0);

    set_state(&mut app, GameState::Paused);
    run(&mut app, 10);
    assert_eq!(faith(&app), 0, "timers frozen");
    assert!(is_active(&app, holy), "still waiting");

    set_state(&mut app, GameState::Playing);
    run(&mut app, 10);
    assert_eq!(faith(&app), 8, "resumes where it left off");
}

#[test]
fn natural_spawning_respects_the_pool() {
    let mut app = app_headless();
    set_state(&mut app, GameState::Playing);
    let max_active = app.world().resource::<SpawnSettings>().max_active;

    for _ in 0..300 {
        app.update();
        let pool = app.world().resource::<CommentPool>();
        let free: usize = CommentKind::iter().map(|kind| pool.free_count(kind)).sum();

        assert!(pool.active_count() <= max_active, "active cap honoured");
        assert_eq!(
            pool.active_count() + free,
            pool.total_allocated(),
            "every entity is either free or active"
        );
    }
}
