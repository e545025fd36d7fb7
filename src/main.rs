#![cfg_attr(not(feature = "terminal"), windows_subsystem = "windows")]

use bevy::input::common_conditions::input_just_pressed;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use magpie::*;

fn main() {
	App::new()
		.add_plugins(
			DefaultPlugins
				.set(WindowPlugin {
					primary_window: Some(Window {
						title: "MAGPIE".to_string(),
						..default()
					}),
					..default()
				})
				.set(LogPlugin {
					filter: "info,magpie=debug,wgpu=error,naga=warn,calloop=error".into(),
					..default()
				}),
		)
		.add_plugins((
			#[cfg(feature = "rapier_debug")]
			RapierDebugRenderPlugin::default(),
			#[cfg(feature = "inspector")]
			bevy_inspector_egui::quick::WorldInspectorPlugin::new(),
			RapierPhysicsPlugin::<NoUserData>::default(),
			player_controller::PlayerControllerPlugin,
			inventory::InventoryPlugin,
			pickups::PickupPlugin,
			hud::HudPlugin,
		))
		.add_systems(Startup, (set_window_icon, hide_mouse, setup))
		.add_systems(
			Update,
			(
				quit.run_if(input_just_pressed(KeyCode::Escape)),
				util::despawn_after_timer,
			),
		)
		.run();
}
