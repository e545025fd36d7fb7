use bevy::color::palettes::css;
use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use bevy_rapier3d::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::flat_material;
use crate::inventory::ItemPickedUp;
use crate::some_or_return;

pub struct PickupPlugin;
impl Plugin for PickupPlugin {
	fn build(&self, app: &mut App) {
		app.add_plugins(RonAssetPlugin::<PickupCatalog>::new(&["pickups.ron"]))
			.add_event::<PickupTick>()
			.add_systems(Startup, load_pickup_assets)
			.add_systems(
				Update,
				(
					spawn_catalog_pickups,
					tick_pickups,
					bob_pickups,
					show_held_depiction,
				),
			);
	}
}

/// A world item the player can walk into and carry away.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct Pickup {
	pub bob_speed: f32,
	pub bob_height: f32,
	pub picked_up: bool,
	pub time_alive: f32,
	pub bob_time: f32,
}

impl Pickup {
	pub fn new(bob_speed: f32, bob_height: f32) -> Self {
		Self {
			bob_speed,
			bob_height,
			picked_up: false,
			time_alive: 0.0,
			bob_time: 0.0,
		}
	}

	pub fn bob_offset(&self) -> f32 {
		self.bob_height * (self.bob_time * self.bob_speed).sin()
	}
}

/// How the pickup looks sitting in the world.
#[derive(Component)]
pub struct WorldDepiction;

/// How the pickup looks strapped to the player.
#[derive(Component)]
pub struct HeldDepiction;

#[derive(Component)]
pub struct Description(pub String);

/// Grants gun ammo when collected.
#[derive(Component)]
pub struct AmmoPickup {
	pub rounds: i32,
}

#[derive(Event)]
pub struct PickupTick {
	pub pickup: Entity,
	pub delta: f32,
	pub time_alive: f32,
}

pub fn description(
	description: Option<&Description>,
	name: Option<&Name>,
	entity: Entity,
) -> String {
	description
		.map(|description| description.0.clone())
		.or_else(|| name.map(|name| name.as_str().to_string()))
		.unwrap_or_else(|| format!("{entity}"))
}

#[derive(Asset, Deserialize, TypePath)]
pub struct PickupCatalog {
	pub pickups: Vec<PickupEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupEntry {
	pub name: String,
	pub bob_speed: f32,
	pub bob_height: f32,
	pub rounds: Option<i32>,
	pub position: [f32; 3],
	pub count: u32,
	pub scatter: f32,
}

#[derive(Resource)]
pub struct PickupAssets {
	catalog: Handle<PickupCatalog>,
	collect_sound: Handle<AudioSource>,
}

fn load_pickup_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
	commands.insert_resource(PickupAssets {
		catalog: asset_server.load("world.pickups.ron"),
		collect_sound: asset_server.load("sounds/collect.wav"),
	});
}

fn spawn_catalog_pickups(
	mut commands: Commands,
	assets: Res<PickupAssets>,
	catalogs: Res<Assets<PickupCatalog>>,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	mut spawned: Local<bool>,
) {
	if *spawned {
		return;
	}
	let catalog = some_or_return!(catalogs.get(&assets.catalog));
	*spawned = true;

	let world_material = flat_material(Color::from(css::GOLD), &mut materials);
	let held_material = flat_material(Color::from(css::DARK_GOLDENROD), &mut materials);
	let world_mesh = meshes.add(Cuboid::from_size(Vec3::splat(0.5)));
	let held_mesh = meshes.add(Cuboid::from_size(Vec3::splat(0.3)));

	let mut rng = rand::thread_rng();
	for entry in &catalog.pickups {
		for _ in 0..entry.count {
			let jitter = if entry.scatter > 0.0 {
				Vec3::new(
					rng.gen_range(-entry.scatter..=entry.scatter),
					0.0,
					rng.gen_range(-entry.scatter..=entry.scatter),
				)
			} else {
				Vec3::ZERO
			};
			spawn_pickup(
				&mut commands,
				entry,
				Vec3::from_array(entry.position) + jitter,
				world_mesh.clone(),
				world_material.clone(),
				held_mesh.clone(),
				held_material.clone(),
			);
		}
	}
	info!("scattered {} kinds of pickup", catalog.pickups.len());
}

fn spawn_pickup(
	commands: &mut Commands,
	entry: &PickupEntry,
	position: Vec3,
	world_mesh: Handle<Mesh>,
	world_material: Handle<StandardMaterial>,
	held_mesh: Handle<Mesh>,
	held_material: Handle<StandardMaterial>,
) -> Entity {
	let pickup = commands
		.spawn((
			Name::new(entry.name.clone()),
			Description(entry.name.clone()),
			Pickup::new(entry.bob_speed, entry.bob_height),
			Transform::from_translation(position),
			Collider::ball(0.6),
			Sensor,
			ActiveEvents::COLLISION_EVENTS,
		))
		.with_children(|parent| {
			parent.spawn((
				Name::new("World Depiction"),
				WorldDepiction,
				Mesh3d(world_mesh),
				MeshMaterial3d(world_material),
			));
			parent.spawn((
				Name::new("Held Depiction"),
				HeldDepiction,
				Mesh3d(held_mesh),
				MeshMaterial3d(held_material),
				Visibility::Hidden,
			));
		})
		.id();

	if let Some(rounds) = entry.rounds {
		commands.entity(pickup).insert(AmmoPickup { rounds });
	}

	pickup
}

/// Time alive keeps counting after pickup; only the bob freezes.
pub fn tick_pickups(
	time: Res<Time>,
	mut pickups: Query<(Entity, &mut Pickup)>,
	mut ev_tick: EventWriter<PickupTick>,
) {
	let delta = time.delta_secs();
	for (entity, mut pickup) in pickups.iter_mut() {
		pickup.time_alive += delta;
		if !pickup.picked_up {
			pickup.bob_time += delta;
		}
		ev_tick.send(PickupTick {
			pickup: entity,
			delta,
			time_alive: pickup.time_alive,
		});
	}
}

pub fn bob_pickups(
	pickups: Query<(&Pickup, &Children)>,
	mut depictions: Query<&mut Transform, With<WorldDepiction>>,
) {
	for (pickup, children) in pickups.iter() {
		if pickup.picked_up {
			continue;
		}
		for child in children.iter() {
			if let Ok(mut transform) = depictions.get_mut(*child) {
				transform.translation.y = pickup.bob_offset();
			}
		}
	}
}

pub fn show_held_depiction(
	mut commands: Commands,
	mut ev_picked_up: EventReader<ItemPickedUp>,
	assets: Option<Res<PickupAssets>>,
	pickups: Query<&Children, With<Pickup>>,
	mut world_depictions: Query<
		&mut Visibility,
		(With<WorldDepiction>, Without<HeldDepiction>),
	>,
	mut held_depictions: Query<(&mut Visibility, &mut Transform), With<HeldDepiction>>,
) {
	for ev in ev_picked_up.read() {
		let children = match pickups.get(ev.item) {
			Ok(children) => children,
			Err(_) => continue,
		};
		for child in children.iter() {
			if let Ok(mut visibility) = world_depictions.get_mut(*child) {
				*visibility = Visibility::Hidden;
			}
			if let Ok((mut visibility, mut transform)) = held_depictions.get_mut(*child) {
				*visibility = Visibility::Inherited;
				transform.translation = Vec3::ZERO;
				transform.rotation = Quat::IDENTITY;
			}
		}
		if let Some(assets) = &assets {
			commands.spawn((
				Name::new("Collect SFX"),
				AudioPlayer::new(assets.collect_sound.clone()),
				PlaybackSettings::DESPAWN,
			));
		}
	}
}

#[cfg(test)]
mod tests {
	use std::f32::consts::PI;
	use std::time::Duration;

	use super::*;

	#[test]
	fn bob_offset_follows_sine() {
		let mut pickup = Pickup::new(2.0, 10.0);
		assert_eq!(pickup.bob_offset(), 0.0);

		// accumulate deltas up to t = (pi/4) / bob_speed
		let target = PI / 4.0 / pickup.bob_speed;
		let step = target / 16.0;
		for _ in 0..16 {
			pickup.bob_time += step;
		}
		let expected = 10.0 * (PI / 4.0).sin();
		assert!((pickup.bob_offset() - expected).abs() < 1e-3);
	}

	#[test]
	fn ticking_keeps_time_alive_after_pickup_but_freezes_bob() {
		let mut app = App::new();
		app.add_event::<PickupTick>();
		app.init_resource::<Time>();
		app.add_systems(Update, tick_pickups);

		let pickup = app.world_mut().spawn(Pickup::new(2.0, 10.0)).id();

		app.world_mut()
			.resource_mut::<Time>()
			.advance_by(Duration::from_millis(250));
		app.update();

		{
			let mut state = app.world_mut().get_mut::<Pickup>(pickup).unwrap();
			assert!((state.time_alive - 0.25).abs() < 1e-6);
			assert!((state.bob_time - 0.25).abs() < 1e-6);
			state.picked_up = true;
		}

		app.world_mut()
			.resource_mut::<Time>()
			.advance_by(Duration::from_millis(250));
		app.update();

		let state = app.world().get::<Pickup>(pickup).unwrap();
		assert!((state.time_alive - 0.5).abs() < 1e-6);
		assert!((state.bob_time - 0.25).abs() < 1e-6);
		assert!(state.picked_up);

		let ticks = app.world().resource::<Events<PickupTick>>();
		assert!(!ticks.is_empty(), "tick hook must keep firing after pickup");
	}

	#[test]
	fn description_falls_back_to_name() {
		let entity = Entity::from_raw(7);
		let name = Name::new("Ammo Box");
		assert_eq!(
			description(Some(&Description("Shiny".to_string())), Some(&name), entity),
			"Shiny"
		);
		assert_eq!(description(None, Some(&name), entity), "Ammo Box");
		assert_eq!(description(None, None, entity), format!("{entity}"));
	}
}
