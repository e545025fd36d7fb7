//! End-to-end pickup flow against a headless world: overlap events in,
//! attachments and inventory state out.

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::prelude::CollisionEventFlags;

use magpie::inventory::{pick_up_on_contact, Inventory, ItemPickedUp, PickupSlot};
use magpie::pickups::{
	bob_pickups, show_held_depiction, tick_pickups, HeldDepiction, Pickup, PickupTick,
	WorldDepiction,
};

struct TestPickup {
	root: Entity,
	world_depiction: Entity,
	held_depiction: Entity,
}

fn scavenging_app() -> App {
	let mut app = App::new();
	app.add_event::<CollisionEvent>()
		.add_event::<ItemPickedUp>()
		.add_event::<PickupTick>()
		.init_resource::<Time>()
		.add_systems(
			Update,
			(
				pick_up_on_contact,
				tick_pickups,
				bob_pickups,
				show_held_depiction,
			)
				.chain(),
		);
	app
}

fn spawn_player(world: &mut World, slot_count: usize) -> (Entity, Vec<Entity>) {
	let body = world.spawn((Name::new("Player"), Transform::default())).id();
	let slots: Vec<Entity> = (0..slot_count)
		.map(|_| world.spawn((PickupSlot, Transform::default())).id())
		.collect();
	world.entity_mut(body).add_children(&slots);
	world.entity_mut(body).insert(Inventory {
		slots: slots.clone(),
		items: Vec::new(),
	});
	(body, slots)
}

fn spawn_pickup(world: &mut World, name: &str) -> TestPickup {
	let root = world
		.spawn((
			Name::new(name.to_string()),
			Pickup::new(2.0, 10.0),
			Transform::default(),
		))
		.id();
	let world_depiction = world
		.spawn((WorldDepiction, Transform::default(), Visibility::default()))
		.id();
	let held_depiction = world
		.spawn((HeldDepiction, Transform::default(), Visibility::Hidden))
		.id();
	world
		.entity_mut(root)
		.add_children(&[world_depiction, held_depiction]);
	TestPickup {
		root,
		world_depiction,
		held_depiction,
	}
}

fn overlap(app: &mut App, pickup: Entity, body: Entity) {
	app.world_mut()
		.send_event(CollisionEvent::Started(
			pickup,
			body,
			CollisionEventFlags::SENSOR,
		));
}

fn step(app: &mut App, seconds: f32) {
	app.world_mut()
		.resource_mut::<Time>()
		.advance_by(Duration::from_secs_f32(seconds));
	app.update();
}

#[test]
fn two_slots_fill_first_fit_and_third_pickup_is_refused() {
	let mut app = scavenging_app();
	let (body, slots) = spawn_player(app.world_mut(), 2);
	let p1 = spawn_pickup(app.world_mut(), "Scrap 1");
	let p2 = spawn_pickup(app.world_mut(), "Scrap 2");
	let p3 = spawn_pickup(app.world_mut(), "Scrap 3");

	// Duplicate events in one frame must not double-attach.
	overlap(&mut app, p1.root, body);
	overlap(&mut app, p1.root, body);
	step(&mut app, 0.1);

	assert_eq!(
		app.world().get::<Parent>(p1.root).map(|parent| parent.get()),
		Some(slots[0]),
		"first pickup lands on the first slot"
	);
	{
		let inventory = app.world().get::<Inventory>(body).unwrap();
		assert_eq!(inventory.items, vec![p1.root]);
		assert_eq!(inventory.live_item_count(app.world().entities()), 1);
	}
	assert!(app.world().get::<Pickup>(p1.root).unwrap().picked_up);
	assert_eq!(
		app.world().get::<Visibility>(p1.world_depiction),
		Some(&Visibility::Hidden)
	);
	assert_eq!(
		app.world().get::<Visibility>(p1.held_depiction),
		Some(&Visibility::Inherited)
	);

	// Reversed event order must resolve the same way.
	overlap(&mut app, body, p2.root);
	step(&mut app, 0.1);

	assert_eq!(
		app.world().get::<Parent>(p2.root).map(|parent| parent.get()),
		Some(slots[1]),
		"second pickup lands on the second slot"
	);
	assert_eq!(
		app.world()
			.get::<Inventory>(body)
			.unwrap()
			.live_item_count(app.world().entities()),
		2
	);

	// Both slots taken: the third pickup is refused and keeps bobbing.
	overlap(&mut app, p3.root, body);
	step(&mut app, 0.1);

	let inventory = app.world().get::<Inventory>(body).unwrap();
	assert_eq!(inventory.items.len(), 2);
	assert!(app.world().get::<Parent>(p3.root).is_none());
	assert!(!app.world().get::<Pickup>(p3.root).unwrap().picked_up);
	assert_eq!(
		app.world().get::<Visibility>(p3.held_depiction),
		Some(&Visibility::Hidden)
	);

	let bob_before = app
		.world()
		.get::<Transform>(p3.world_depiction)
		.unwrap()
		.translation
		.y;
	step(&mut app, 0.1);
	let bob_after = app
		.world()
		.get::<Transform>(p3.world_depiction)
		.unwrap()
		.translation
		.y;
	assert_ne!(bob_before, bob_after, "refused pickup keeps bobbing");

	// A refused pickup is still pickable once a slot frees up.
	app.world_mut().entity_mut(p1.root).despawn_recursive();
	overlap(&mut app, p3.root, body);
	step(&mut app, 0.1);

	let inventory = app.world().get::<Inventory>(body).unwrap();
	assert_eq!(
		inventory.items.len(),
		3,
		"stale entries stay in the item list"
	);
	assert_eq!(inventory.live_item_count(app.world().entities()), 2);
	assert_eq!(
		app.world().get::<Parent>(p3.root).map(|parent| parent.get()),
		Some(slots[0]),
		"freed slot is reused first-fit"
	);
}

#[test]
fn pickup_on_pickup_overlaps_are_ignored() {
	let mut app = scavenging_app();
	let (body, _slots) = spawn_player(app.world_mut(), 1);
	let p1 = spawn_pickup(app.world_mut(), "Scrap 1");
	let p2 = spawn_pickup(app.world_mut(), "Scrap 2");

	overlap(&mut app, p1.root, p2.root);
	step(&mut app, 0.1);

	assert!(!app.world().get::<Pickup>(p1.root).unwrap().picked_up);
	assert!(!app.world().get::<Pickup>(p2.root).unwrap().picked_up);
	assert!(app
		.world()
		.get::<Inventory>(body)
		.unwrap()
		.items
		.is_empty());
}
