use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::util::DespawnTimer;

pub const RADIUS: f32 = 0.12;

/// A bouncy ball with a short fuse; rapier does the rest.
#[derive(Component)]
#[require(
	RigidBody(|| RigidBody::Dynamic),
	Collider(|| Collider::ball(RADIUS)),
	Restitution(|| Restitution::coefficient(0.6)),
	Ccd(|| Ccd::enabled()),
	Velocity,
	DespawnTimer(|| DespawnTimer::new(3.0)),
	Transform,
	Visibility,
)]
pub struct Projectile;
