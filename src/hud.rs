use bevy::ecs::entity::Entities;
use bevy::prelude::*;
use itertools::Itertools;

use crate::inventory::Inventory;
use crate::ok_or_return;
use crate::pickups::{description, Description};
use crate::player_controller::Gun;

pub struct HudPlugin;
impl Plugin for HudPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(Startup, spawn_hud)
			.add_systems(Update, update_readout);
	}
}

#[derive(Component)]
struct ScavengeReadout;

fn spawn_hud(mut commands: Commands) {
	commands.spawn((
		Name::new("Crosshair"),
		Text::new("+"),
		Node {
			position_type: PositionType::Absolute,
			left: Val::Percent(50.0),
			top: Val::Percent(50.0),
			..default()
		},
	));

	commands.spawn((
		Name::new("Scavenge Readout"),
		ScavengeReadout,
		Text::new(""),
		Node {
			position_type: PositionType::Absolute,
			bottom: Val::Px(5.0),
			right: Val::Px(5.0),
			..default()
		},
	));
}

fn update_readout(
	mut readouts: Query<&mut Text, With<ScavengeReadout>>,
	guns: Query<&Gun>,
	inventories: Query<&Inventory>,
	items: Query<(Option<&Description>, Option<&Name>)>,
	entities: &Entities,
) {
	let mut readout = ok_or_return!(readouts.get_single_mut());
	let gun = ok_or_return!(guns.get_single());
	let inventory = ok_or_return!(inventories.get_single());

	let carried = inventory
		.items
		.iter()
		.filter(|item| entities.contains(**item))
		.map(|item| match items.get(*item) {
			Ok((item_description, name)) => description(item_description, name, *item),
			Err(_) => format!("{item}"),
		})
		.join(", ");

	readout.0 = format!(
		"Ammo: {}\nCarrying {}: {}",
		gun.ammo,
		inventory.live_item_count(entities),
		if carried.is_empty() { "-" } else { carried.as_str() },
	);
}
