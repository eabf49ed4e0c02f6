//! Render-only view of the game. Nothing here feeds back into gameplay except
//! the viewport bounds.

use bevy::color::palettes::css::{GOLD, GRAY, HOT_PINK, LIGHT_SKY_BLUE, ORANGE_RED, WHITE};
use bevy::prelude::*;
use game_helpers::floating_text::{FloatingTextPlugin, spawn_floating_text};

use crate::GameSet;
use crate::comment::{Comment, CommentKind, CommentSettings, CommentState};
use crate::effects::{Confusion, FxKind, FxSignal};
use crate::flow::{GameClock, GameOutcome, GameState};
use crate::meters::faith::Faith;
use crate::meters::health::Health;
use crate::meters::inflammation::Inflammation;
use crate::mover::ViewportBounds;
use crate::rng::GameRng;
use crate::spawner::pool::ActiveComment;

#[derive(Component)]
struct MainCamera;

#[derive(Component)]
struct HudText;

#[derive(Component)]
struct BannerText;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FloatingTextPlugin)
            .add_systems(Startup, setup)
            .add_systems(PreUpdate, publish_viewport_bounds)
            .add_systems(
                Update,
                (
                    dress_new_comments,
                    tint_comments,
                    shake_camera,
                    show_fx,
                    update_hud,
                    update_banner,
                )
                    .after(GameSet::Recycle),
            );
    }
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d).insert(MainCamera);

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
        HudText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(GOLD.into()),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            justify_self: JustifySelf::Center,
            align_self: AlignSelf::Center,
            ..default()
        },
        BannerText,
    ));
}

/// The camera sits at the origin, so the visible area is the window centred on it.
fn publish_viewport_bounds(windows: Query<&Window>, mut bounds: ResMut<ViewportBounds>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let half = Vec2::new(window.width(), window.height()) / 2.0;
    let published = ViewportBounds {
        left: -half.x,
        right: half.x,
        bottom: -half.y,
        top: half.y,
    };
    if *bounds != published {
        *bounds = published;
    }
}

fn kind_color(kind: CommentKind) -> Color {
    match kind {
        CommentKind::Holy => LIGHT_SKY_BLUE.into(),
        CommentKind::Ohoe => HOT_PINK.into(),
        CommentKind::Troll => ORANGE_RED.into(),
        CommentKind::SuperChat => GOLD.into(),
    }
}

fn dress_new_comments(
    mut commands: Commands,
    comments: Query<(Entity, &Comment), Added<ActiveComment>>,
) {
    for (entity, comment) in &comments {
        commands.entity(entity).insert((
            Text2d::new(comment.text()),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(kind_color(comment.kind())),
        ));
    }
}

fn tint_comments(mut comments: Query<(&Comment, &mut TextColor), With<ActiveComment>>) {
    for (comment, mut color) in &mut comments {
        let base = kind_color(comment.kind());
        let tint = match comment.state() {
            CommentState::Cracked => WHITE.into(),
            CommentState::Destroyed => GRAY.into(),
            CommentState::Normal | CommentState::Moving if comment.is_processed() => {
                base.with_alpha(0.5)
            }
            CommentState::Normal | CommentState::Moving => base,
        };
        if color.0 != tint {
            color.0 = tint;
        }
    }
}

fn shake_camera(
    confusion: Res<Confusion>,
    settings: Res<CommentSettings>,
    mut rng: ResMut<GameRng>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    let offset = confusion.jitter(Vec2::ZERO, settings.confusion_shake, &mut rng);
    transform.translation.x = offset.x;
    transform.translation.y = offset.y;
}

fn show_fx(mut commands: Commands, mut fx: EventReader<FxSignal>) {
    for signal in fx.read() {
        let (text, color): (String, Color) = match signal.kind {
            FxKind::Crack => ("crack!".into(), WHITE.into()),
            _ if signal.faith_delta > 0 => (format!("+{}", signal.faith_delta), GOLD.into()),
            _ if signal.faith_delta < 0 => (signal.faith_delta.to_string(), ORANGE_RED.into()),
            FxKind::Success | FxKind::Destroy => continue,
            FxKind::Fail => ("miss".into(), ORANGE_RED.into()),
        };
        spawn_floating_text(&mut commands, signal.position, &text, color);
    }
}

fn update_hud(
    faith: Res<Faith>,
    health: Res<Health>,
    inflammation: Res<Inflammation>,
    clock: Res<GameClock>,
    mut hud: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = hud.get_single_mut() else {
        return;
    };
    let flame = if inflammation.is_inflamed() { " !" } else { "" };
    text.0 = format!(
        "Faith {} ({:.0}%)\nHealth {:.0}%\nInflammation {:.0}%{flame}\nTime {:.0}",
        faith.current(),
        faith.progress() * 100.0,
        health.fraction() * 100.0,
        inflammation.fraction() * 100.0,
        clock.remaining().ceil(),
    );
}

fn update_banner(
    state: Res<State<GameState>>,
    outcome: Res<GameOutcome>,
    mut banner: Query<&mut Text, With<BannerText>>,
) {
    if !state.is_changed() && !outcome.is_changed() {
        return;
    }
    let Ok(mut text) = banner.get_single_mut() else {
        return;
    };
    text.0 = match (state.get(), outcome.0) {
        (GameState::MainMenu, _) => "Comment Shooter\ntap to start".to_string(),
        (GameState::Paused, _) => "Paused".to_string(),
        (GameState::GameOver, Some(result)) => format!("{result}\ntap to play again"),
        (GameState::GameOver, None) => "Game over".to_string(),
        (GameState::Playing, _) => String::new(),
    };
}
