use std::io::Cursor;

use bevy::color::palettes::css;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy::winit::WinitWindows;
use winit::window::Icon;

use self::main_bundles::*;

pub mod hud;
pub mod input;
pub mod inventory;
pub mod main_bundles;
pub mod pickups;
pub mod player_controller;
pub mod util;

pub fn set_window_icon(windows: NonSend<WinitWindows>) {
	let icon_buf = Cursor::new(include_bytes!("../assets/magpie.png"));
	let image = image::load(icon_buf, image::ImageFormat::Png).unwrap();
	let image = image.into_rgba8();
	let (width, height) = image.dimensions();
	let rgba = image.into_raw();
	let icon = Icon::from_rgba(rgba, width, height).unwrap();

	for window in windows.windows.values() {
		window.set_window_icon(Some(icon.clone()));
	}
}

pub fn flat_material(color: Color, materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
	materials.add(StandardMaterial {
		base_color: color,
		perceptual_roughness: 0.9,
		..default()
	})
}

pub fn setup(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	let gray_material = flat_material(Color::from(css::GRAY), &mut materials);
	let green_material = flat_material(Color::from(css::DARK_SEA_GREEN), &mut materials);

	commands.spawn((
		Ground,
		Mesh3d(meshes.add(Cuboid::new(80.0, 1.0, 80.0))),
		MeshMaterial3d(gray_material),
		Transform::from_translation(Vec3::Y * -0.5),
	));

	let crate_mesh = meshes.add(Cuboid::from_size(Vec3::ONE));
	for (name, position) in [
		("Crate 1", Vec3::new(3.0, 2.0, -4.0)),
		("Crate 2", Vec3::new(3.5, 3.5, -4.0)),
		("Crate 3", Vec3::new(-4.0, 2.0, -2.0)),
	] {
		commands.spawn((
			Name::new(name),
			WoodenCrate,
			Mesh3d(crate_mesh.clone()),
			MeshMaterial3d(green_material.clone()),
			Transform::from_translation(position),
		));
	}

	commands.spawn((
		Name::new("Sun"),
		DirectionalLight {
			illuminance: 4000.0,
			shadows_enabled: true,
			..default()
		},
		Transform {
			rotation: Quat::from_euler(EulerRot::XYZ, -1.9, 0.8, 0.0),
			..default()
		},
	));
}

pub fn hide_mouse(mut window: Query<&mut Window, With<PrimaryWindow>>) {
	let mut window = window.single_mut();
	window.cursor_options.grab_mode = CursorGrabMode::Locked;
	window.cursor_options.visible = false;
}

pub fn quit(mut ev_quit: EventWriter<AppExit>) {
	ev_quit.send(AppExit::Success);
}
