use bevy::ecs::entity::Entities;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::pickups::Pickup;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
	fn build(&self, app: &mut App) {
		app.add_event::<ItemPickedUp>()
			.add_systems(Update, pick_up_on_contact);
	}
}

/// Anything with one of these can receive pickups; the overlap handler
/// never names a concrete character type.
#[derive(Component, Default)]
pub struct Inventory {
	pub slots: Vec<Entity>,
	pub items: Vec<Entity>,
}

impl Inventory {
	pub fn first_free_slot(&self, occupied: impl Fn(Entity) -> bool) -> Option<Entity> {
		self.slots.iter().copied().find(|slot| !occupied(*slot))
	}

	/// Items whose entity still exists. Stale entries stay in `items`.
	pub fn live_item_count(&self, entities: &Entities) -> usize {
		self.items
			.iter()
			.filter(|item| entities.contains(**item))
			.count()
	}
}

/// An anchor point on the body where one held item hangs.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct PickupSlot;

#[derive(Event)]
pub struct ItemPickedUp {
	pub item: Entity,
	pub owner: Entity,
	pub slot: Entity,
}

pub fn pick_up_on_contact(
	mut commands: Commands,
	mut collision_events: EventReader<CollisionEvent>,
	mut pickups: Query<(&mut Pickup, &mut Transform)>,
	mut inventories: Query<&mut Inventory>,
	slots: Query<&Children, With<PickupSlot>>,
	mut ev_picked_up: EventWriter<ItemPickedUp>,
) {
	// Attachment goes through Commands, so slots claimed this frame are
	// not yet in Children; remember them here.
	let mut just_filled: Vec<Entity> = Vec::new();

	for event in collision_events.read() {
		let CollisionEvent::Started(a, b, _flags) = event else {
			continue;
		};
		let (item, owner) = if pickups.contains(*a) && inventories.contains(*b) {
			(*a, *b)
		} else if pickups.contains(*b) && inventories.contains(*a) {
			(*b, *a)
		} else {
			continue;
		};

		let Ok((mut pickup, mut item_transform)) = pickups.get_mut(item) else {
			continue;
		};
		if pickup.picked_up {
			continue;
		}
		let Ok(mut inventory) = inventories.get_mut(owner) else {
			continue;
		};

		let occupied = |slot: Entity| {
			just_filled.contains(&slot)
				|| slots.get(slot).is_ok_and(|children| !children.is_empty())
		};
		let Some(slot) = inventory.first_free_slot(occupied) else {
			debug!("all {} pickup slots used", inventory.slots.len());
			continue;
		};

		pickup.picked_up = true;
		inventory.items.push(item);
		just_filled.push(slot);

		// Snap translation and rotation to the slot; scale stays the
		// pickup's own.
		item_transform.translation = Vec3::ZERO;
		item_transform.rotation = Quat::IDENTITY;
		commands
			.entity(item)
			.set_parent(slot)
			.remove::<RigidBody>()
			.insert(ColliderDisabled);

		debug!("attached {item} to slot {slot}");
		ev_picked_up.send(ItemPickedUp { item, owner, slot });
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_free_slot_is_first_fit() {
		let slots: Vec<Entity> = (0..3).map(Entity::from_raw).collect();
		let inventory = Inventory {
			slots: slots.clone(),
			items: Vec::new(),
		};

		assert_eq!(inventory.first_free_slot(|_| false), Some(slots[0]));
		assert_eq!(
			inventory.first_free_slot(|slot| slot == slots[0]),
			Some(slots[1])
		);
		assert_eq!(inventory.first_free_slot(|_| true), None);
	}

	#[test]
	fn live_item_count_skips_despawned_without_purging() {
		let mut world = World::new();
		let player = world.spawn_empty().id();
		let a = world.spawn_empty().id();
		let b = world.spawn_empty().id();
		let c = world.spawn_empty().id();
		world.entity_mut(player).insert(Inventory {
			slots: Vec::new(),
			items: vec![a, b, c],
		});

		world.despawn(b);

		let inventory = world.get::<Inventory>(player).unwrap();
		assert_eq!(inventory.live_item_count(world.entities()), 2);
		assert_eq!(inventory.items.len(), 3);
	}
}
