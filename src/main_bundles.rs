use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

#[derive(Component)]
#[require(
	Name(|| Name::new("Ground")),
	RigidBody(|| RigidBody::Fixed),
	Collider(|| Collider::cuboid(40.0, 0.5, 40.0)),
	Transform,
	Visibility,
)]
pub struct Ground;

#[derive(Component)]
#[require(
	RigidBody(|| RigidBody::Dynamic),
	Collider(|| Collider::cuboid(0.5, 0.5, 0.5)),
	Velocity,
	Transform,
	Visibility,
)]
pub struct WoodenCrate;
