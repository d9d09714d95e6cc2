use avian2d::prelude::*;
use bevy::prelude::*;

use platformer_locomotion::config::MovementConfigPlugin;
use platformer_locomotion::dev::SandboxPlugin;
use platformer_locomotion::movement::Locomotion2dPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Locomotion Sandbox".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            MovementConfigPlugin::default(),
            Locomotion2dPlugin,
            SandboxPlugin,
        ))
        .run();
}
