use std::any::type_name;

use bevy::{ecs::schedule::SystemConfigs, prelude::*};
use leafwing_input_manager::prelude::*;

pub fn spawn_input_manager<Action: Actionlike>(input_map: InputMap<Action>) -> SystemConfigs {
	(move |mut commands: Commands| {
		commands.spawn(input_manager_bundle(input_map.clone()));
	})
	.into_configs()
}

pub fn input_manager_bundle<Action: Actionlike>(input_map: InputMap<Action>) -> impl Bundle {
	(
		Name::new(format!(
			"InputManager<{}>",
			type_name::<Action>().split("::").last().unwrap()
		)),
		InputManagerBundle::<Action> {
			input_map,
			action_state: default(),
		},
	)
}

macro_rules! value_input {
	($function_name:ident, $value_type:ident, $default_value:expr => $default_value_type:ident) => {
		pub fn $function_name<Action: Actionlike + Copy>(
			action: Action,
		) -> impl Fn(Query<&ActionState<Action>>) -> $default_value_type {
			move |input: Query<&ActionState<Action>>| {
				if let Some(input) = input.iter().find(|input| !input.disabled()) {
					input.$value_type(&action)
				} else {
					$default_value
				}
			}
		}
	};
}

value_input!(button_just_pressed, just_pressed, false => bool);
value_input!(dual_axes_input, axis_pair, Vec2::ZERO => Vec2);
value_input!(clamped_dual_axes_input, clamped_axis_pair, Vec2::ZERO => Vec2);
