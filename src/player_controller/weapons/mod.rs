use std::time::Duration;

use bevy::color::palettes::css;
use bevy::prelude::*;
use bevy_rapier3d::plugin::RapierContext;
use bevy_rapier3d::prelude::*;

use crate::inventory::ItemPickedUp;
use crate::pickups::AmmoPickup;
use crate::util::TransformEx;
use crate::{flat_material, ok_or_return};

pub use self::projectile::Projectile;

pub mod projectile;

#[derive(Component)]
#[require(Transform, Visibility)]
pub struct Gun {
	pub ammo: i32,
	pub gun_offset: Vec3,
	pub projectile_speed: f32,
	pub fire_sound: Handle<AudioSource>,
	pub dry_fire_sound: Handle<AudioSource>,
}

impl Gun {
	pub fn new(fire_sound: Handle<AudioSource>, dry_fire_sound: Handle<AudioSource>) -> Self {
		Self {
			ammo: 0,
			gun_offset: Vec3::new(0.0, 0.0, -0.25),
			projectile_speed: 30.0,
			fire_sound,
			dry_fire_sound,
		}
	}

	/// Ammo never goes below zero; there is no upper bound.
	pub fn update_ammo(&mut self, delta: i32) -> i32 {
		self.ammo = self.ammo.saturating_add(delta).max(0);
		self.ammo
	}
}

/// Where projectiles leave the barrel. Falls back to the gun's own
/// transform when absent.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct Muzzle;

#[derive(Component, Default)]
pub struct InAnimation {
	pub time: Duration,
}

#[derive(Resource)]
pub struct GunAssets {
	pub projectile_mesh: Handle<Mesh>,
	pub projectile_material: Handle<StandardMaterial>,
}

pub fn setup_gun_assets(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	commands.insert_resource(GunAssets {
		projectile_mesh: meshes.add(Sphere::new(projectile::RADIUS)),
		projectile_material: flat_material(Color::from(css::ORANGE_RED), &mut materials),
	});
}

pub fn fire_gun(
	mut commands: Commands,
	mut guns: Query<(Entity, &mut Gun, &GlobalTransform)>,
	muzzles: Query<&GlobalTransform, With<Muzzle>>,
	rapier_contexts: Query<&RapierContext>,
	assets: Res<GunAssets>,
) {
	let (gun_entity, mut gun, gun_transform) = ok_or_return!(guns.get_single_mut());

	if gun.ammo <= 0 {
		commands.spawn((
			Name::new("Dry Fire SFX"),
			AudioPlayer::new(gun.dry_fire_sound.clone()),
			PlaybackSettings::DESPAWN,
		));
		return;
	}

	let aim = muzzles.get_single().unwrap_or(gun_transform);
	let direction = Vec3::from(aim.forward());
	let spawn_location = aim.translation() + aim.transform_vector3(gun.gun_offset);

	commands.spawn((
		Name::new("Gunshot SFX"),
		AudioPlayer::new(gun.fire_sound.clone()),
		PlaybackSettings::DESPAWN,
	));
	commands.entity(gun_entity).insert(InAnimation::default());
	gun.update_ammo(-1);

	let rapier_context = ok_or_return!(rapier_contexts.get_single());

	// Nudge the spawn point forward out of whatever overlaps it; give up
	// on the projectile (the shot is already spent) if nothing is clear.
	let shape = Collider::ball(projectile::RADIUS);
	let location = (0..4)
		.map(|step| spawn_location + direction * (0.3 * step as f32))
		.find(|location| {
			rapier_context
				.intersection_with_shape(
					*location,
					Quat::IDENTITY,
					&shape,
					QueryFilter::new().exclude_sensors(),
				)
				.is_none()
		});
	let Some(location) = location else {
		debug!("no clear space in front of the muzzle");
		return;
	};

	commands.spawn((
		Name::new("Projectile"),
		Projectile,
		Transform::from_translation(location),
		Velocity::linear(direction * gun.projectile_speed),
		Mesh3d(assets.projectile_mesh.clone()),
		MeshMaterial3d(assets.projectile_material.clone()),
	));
}

pub fn animate_gun_kick(
	mut commands: Commands,
	mut guns: Query<(Entity, &mut Transform, &mut InAnimation), With<Gun>>,
	time: Res<Time>,
) {
	for (gun, mut transform, mut animation) in guns.iter_mut() {
		animation.time += time.delta();
		let time = animation.time.as_secs_f32();
		let angle = match time {
			0.0..0.05 => time / 0.05 * 0.2,
			0.05..0.25 => (1.0 - (time - 0.05) / 0.2) * 0.2,
			_ => {
				commands.entity(gun).remove::<InAnimation>();
				0.0
			}
		};
		transform.rotation = Quat::from_rotation_x(angle);
	}
}

pub fn collect_ammo(
	mut ev_picked_up: EventReader<ItemPickedUp>,
	ammo_pickups: Query<&AmmoPickup>,
	mut guns: Query<&mut Gun>,
) {
	for ev in ev_picked_up.read() {
		let Ok(ammo) = ammo_pickups.get(ev.item) else {
			continue;
		};
		let mut gun = ok_or_return!(guns.get_single_mut());
		let total = gun.update_ammo(ammo.rounds);
		info!("collected {} rounds, {total} carried", ammo.rounds);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_gun() -> Gun {
		Gun::new(Handle::default(), Handle::default())
	}

	#[test]
	fn update_ammo_clamps_at_zero() {
		let mut gun = test_gun();
		assert_eq!(gun.update_ammo(5), 5);
		assert_eq!(gun.update_ammo(-2), 3);
		assert_eq!(gun.update_ammo(-10), 0);
		assert_eq!(gun.ammo, 0);
		assert_eq!(gun.update_ammo(i32::MIN), 0);
		assert_eq!(gun.update_ammo(1000), 1000);
	}

	fn firing_app() -> App {
		let mut app = App::new();
		app.add_plugins((
			MinimalPlugins,
			bevy::transform::TransformPlugin,
			RapierPhysicsPlugin::<NoUserData>::default(),
		));
		app.insert_resource(GunAssets {
			projectile_mesh: Handle::default(),
			projectile_material: Handle::default(),
		});
		app.add_systems(Update, fire_gun);
		app
	}

	#[test]
	fn firing_on_empty_changes_nothing() {
		let mut app = firing_app();
		let gun = app.world_mut().spawn(test_gun()).id();

		app.update();

		assert_eq!(app.world().get::<Gun>(gun).unwrap().ammo, 0);
		let mut projectiles = app.world_mut().query::<&Projectile>();
		assert_eq!(projectiles.iter(app.world()).count(), 0);
	}

	#[test]
	fn firing_spends_one_round_and_spawns_one_projectile() {
		let mut app = firing_app();
		let gun = app.world_mut().spawn(test_gun()).id();
		app.world_mut().get_mut::<Gun>(gun).unwrap().ammo = 3;

		app.update();

		assert_eq!(app.world().get::<Gun>(gun).unwrap().ammo, 2);
		let mut projectiles = app.world_mut().query::<&Projectile>();
		assert_eq!(projectiles.iter(app.world()).count(), 1);
	}
}
