use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::input::*;
use crate::inventory::{Inventory, PickupSlot};

use self::movement::*;
pub use self::movement::{MouseSensitivity, Pitch, PlayerBody, PlayerHead, PlayerSpeed};
use self::weapons::*;
pub use self::weapons::{Gun, Muzzle, Projectile};

pub mod movement;
pub mod weapons;

pub struct PlayerControllerPlugin;
impl Plugin for PlayerControllerPlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(MouseSensitivity(0.003))
			.insert_resource(PlayerSpeed {
				speed: 5.0,
				sprint_modifier: 2.0,
				jump_speed: 5.0,
			})
			.add_plugins(InputManagerPlugin::<PlayerAction>::default())
			.add_systems(
				Startup,
				(
					spawn_player,
					setup_gun_assets,
					spawn_input_manager(
						InputMap::default()
							.with_dual_axis(PlayerAction::Move, VirtualDPad::wasd())
							.with(PlayerAction::Jump, KeyCode::Space)
							.with_dual_axis(PlayerAction::Look, MouseMove::default())
							.with(PlayerAction::Sprint, KeyCode::ShiftLeft)
							.with(PlayerAction::Fire, MouseButton::Left),
					),
				),
			)
			.add_systems(
				Update,
				(
					dual_axes_input(PlayerAction::Look).pipe(mouse_aim),
					clamped_dual_axes_input(PlayerAction::Move)
						.pipe(axes_to_ground_velocity)
						.pipe(strafe),
					jump.run_if(button_just_pressed(PlayerAction::Jump)),
					fire_gun.run_if(button_just_pressed(PlayerAction::Fire)),
					animate_gun_kick,
					collect_ammo,
				),
			);
	}
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Reflect, Debug)]
pub enum PlayerAction {
	Move,
	Jump,
	Look,
	Sprint,
	Fire,
}

impl Actionlike for PlayerAction {
	fn input_control_kind(&self) -> InputControlKind {
		match self {
			PlayerAction::Move => InputControlKind::DualAxis,
			PlayerAction::Jump => InputControlKind::Button,
			PlayerAction::Look => InputControlKind::DualAxis,
			PlayerAction::Sprint => InputControlKind::Button,
			PlayerAction::Fire => InputControlKind::Button,
		}
	}
}

fn spawn_player(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	asset_server: Res<AssetServer>,
) {
	let body = commands
		.spawn((
			Name::new("Player"),
			PlayerBody,
			Transform::from_translation(Vec3::new(0.0, 1.5, 8.0)),
			RigidBody::Dynamic,
			Collider::capsule_y(0.5, 0.4),
			LockedAxes::ROTATION_LOCKED,
			Velocity::default(),
		))
		.id();

	let head = commands
		.spawn((
			Name::new("Player Head"),
			PlayerHead,
			Camera3d::default(),
			Projection::Perspective(PerspectiveProjection {
				fov: 70_f32.to_radians(),
				..default()
			}),
			Transform::from_translation(Vec3::Y * 0.5),
		))
		.set_parent(body)
		.id();

	let gun = commands
		.spawn((
			Name::new("Gun"),
			Gun::new(
				asset_server.load("sounds/gunshot.wav"),
				asset_server.load("sounds/dry_fire.wav"),
			),
			Mesh3d(meshes.add(Cuboid::new(0.1, 0.1, 0.5))),
			MeshMaterial3d(crate::flat_material(
				Color::from(bevy::color::palettes::css::DIM_GRAY),
				&mut materials,
			)),
			Transform::from_translation(Vec3::new(0.25, -0.25, -0.5)),
		))
		.set_parent(head)
		.id();

	commands
		.spawn((
			Name::new("Muzzle"),
			Muzzle,
			Transform::from_translation(Vec3::new(0.0, 0.0, -0.35)),
		))
		.set_parent(gun);

	// Fixed slot order decides who gets filled first.
	let slots = [
		("Left Hip Slot", Vec3::new(-0.6, 0.1, 0.0)),
		("Right Hip Slot", Vec3::new(0.6, 0.1, 0.0)),
		("Back Slot", Vec3::new(0.0, 0.7, 0.5)),
	]
	.map(|(name, position)| {
		commands
			.spawn((
				Name::new(name),
				PickupSlot,
				Transform::from_translation(position),
			))
			.set_parent(body)
			.id()
	});

	commands.entity(body).insert(Inventory {
		slots: slots.to_vec(),
		items: Vec::new(),
	});
}
