//! Player input: taps from the gesture detector and keyboard/gamepad actions.

use bevy::prelude::*;
use game_helpers::gesture::{GesturePlugin, GestureSet, Tap, TapDetector, TapEvent};
use game_helpers::input::screen_to_world;
use leafwing_input_manager::prelude::*;

use crate::GameSet;
use crate::events::WorldTap;
use crate::flow::{GameState, RoundReset};

#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum FlowAction {
    Pause,
    Restart,
}

pub fn create_input_map() -> InputMap<FlowAction> {
    let mut input_map = InputMap::default();

    input_map.insert(FlowAction::Pause, KeyCode::Escape);
    input_map.insert(FlowAction::Pause, KeyCode::KeyP);
    input_map.insert(FlowAction::Pause, GamepadButton::Start);
    input_map.insert(FlowAction::Restart, KeyCode::KeyR);
    input_map.insert(FlowAction::Restart, GamepadButton::Select);

    input_map
}

pub struct ShooterInputPlugin;

impl Plugin for ShooterInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GesturePlugin, InputManagerPlugin::<FlowAction>::default()))
            .add_systems(Startup, spawn_input_map)
            .add_systems(OnEnter(GameState::Paused), drop_held_tap)
            .add_systems(OnEnter(GameState::GameOver), drop_held_tap)
            .add_systems(PreUpdate, forward_taps.after(GestureSet))
            .add_systems(Update, handle_flow_actions.before(GameSet::Spawn));
    }
}

fn spawn_input_map(mut commands: Commands) {
    commands.spawn(InputManagerBundle::<FlowAction> {
        input_map: create_input_map(),
        ..default()
    });
}

/// A release held for double-tap detection must not land after the screen changed.
fn drop_held_tap(mut detector: ResMut<TapDetector>) {
    detector.cancel();
}

fn forward_taps(
    mut taps: EventReader<TapEvent>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut world_taps: EventWriter<WorldTap>,
) {
    for TapEvent(tap) in taps.read() {
        let Some(position) = screen_to_world(&camera, tap.position()) else {
            continue;
        };
        world_taps.send(match tap {
            Tap::Single(_) => WorldTap::Single(position),
            Tap::Double(_) => WorldTap::Double(position),
        });
    }
}

fn handle_flow_actions(
    actions: Query<&ActionState<FlowAction>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut round: RoundReset,
) {
    let Ok(action_state) = actions.get_single() else {
        return;
    };

    if action_state.just_pressed(&FlowAction::Pause) {
        match state.get() {
            GameState::Playing => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::Playing),
            GameState::MainMenu | GameState::GameOver => {}
        }
    }

    if action_state.just_pressed(&FlowAction::Restart) {
        match state.get() {
            // Entering play from these states resets the round already.
            GameState::MainMenu | GameState::GameOver => {}
            GameState::Playing | GameState::Paused => {
                round.reset();
                info!("Round restarted");
            }
        }
        next_state.set(GameState::Playing);
    }
}
