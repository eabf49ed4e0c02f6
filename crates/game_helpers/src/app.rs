use bevy::asset::{AssetMetaCheck, AssetMode, AssetPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority};
use bevy::window::{PresentMode, WindowResolution};

// Portrait phone, 9:16.
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 640.0;

const BACKGROUND: Color = Color::srgb(0.06, 0.05, 0.09);

/// Creates an app with the window, renderer and frame pacing every tap game
/// shares. Game plugins go on top.
pub fn get_default_app(title: &str) -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin())
            .set(window_plugin(title))
            .set(render_plugin()),
    )
    // Saves battery on phones.
    .add_plugins(bevy_framepace::FramepacePlugin)
    .insert_resource(ClearColor(BACKGROUND));

    app
}

fn asset_plugin() -> AssetPlugin {
    AssetPlugin {
        mode: AssetMode::Unprocessed,
        file_path: "assets".into(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    }
}

fn window_plugin(title: &str) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: title.into(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#game".into()),
            fit_canvas_to_parent: true,
            // Browser shortcuts keep working when embedded.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }
}

fn render_plugin() -> RenderPlugin {
    RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            power_preference: PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    }
}
