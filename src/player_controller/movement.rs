use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use crate::ok_or_return;

use super::PlayerAction;

#[derive(Component)]
#[require(Transform, Visibility)]
pub struct PlayerBody;

#[derive(Component)]
#[require(Transform, Visibility, Pitch)]
pub struct PlayerHead;

#[derive(Component, Default)]
pub struct Pitch(pub f32);

/// Probably in radians per pixel?
#[derive(Resource)]
pub struct MouseSensitivity(pub f32);

#[derive(Resource)]
pub struct PlayerSpeed {
	pub speed: f32,
	pub sprint_modifier: f32,
	pub jump_speed: f32,
}

pub fn mouse_aim(
	In(delta): In<Vec2>,
	sensitivity: Res<MouseSensitivity>,
	mut heads: Query<(&mut Transform, &mut Pitch), (With<PlayerHead>, Without<PlayerBody>)>,
	mut bodies: Query<&mut Transform, With<PlayerBody>>,
) {
	let (mut head_transform, mut pitch) = ok_or_return!(heads.get_single_mut());
	pitch.0 = (pitch.0 + delta.y * sensitivity.0).clamp(-PI / 2., PI / 2.);
	head_transform.rotation = Quat::from_rotation_x(-pitch.0);

	let mut body_transform = ok_or_return!(bodies.get_single_mut());
	body_transform.rotation *= Quat::from_rotation_y(-delta.x * sensitivity.0);
}

pub fn axes_to_ground_velocity(
	In(axes_input): In<Vec2>,
	input: Query<&ActionState<PlayerAction>>,
	speed: Res<PlayerSpeed>,
) -> Vec2 {
	let sprinting = input
		.iter()
		.find(|input| !input.disabled())
		.is_some_and(|input| input.pressed(&PlayerAction::Sprint));
	axes_input * speed.speed * if sprinting { speed.sprint_modifier } else { 1.0 }
}

pub fn strafe(
	In(speed): In<Vec2>,
	mut bodies: Query<(&mut Velocity, &Transform), With<PlayerBody>>,
) {
	let (mut velocity, transform) = ok_or_return!(bodies.get_single_mut());
	let delta = transform.rotation * Vec3::new(speed.x, 0., -speed.y);
	velocity.linvel = Vec3::Y * velocity.linvel.y + delta;
}

// TODO: ground check so jump can't be spammed midair
pub fn jump(
	mut bodies: Query<&mut Velocity, With<PlayerBody>>,
	speed: Res<PlayerSpeed>,
) {
	let mut velocity = ok_or_return!(bodies.get_single_mut());
	velocity.linvel.y = speed.jump_speed;
}
