use bevy::prelude::*;

#[macro_export]
macro_rules! ok_or_return {
	($result:expr) => {
		match $result {
			Ok(value) => value,
			Err(_) => return,
		}
	};
}

#[macro_export]
macro_rules! some_or_return {
	($option:expr) => {
		match $option {
			Some(value) => value,
			None => return,
		}
	};
}

pub trait TransformEx {
	fn transform_vector3(&self, vector: Vec3) -> Vec3;
}
impl TransformEx for GlobalTransform {
	fn transform_vector3(&self, vector: Vec3) -> Vec3 {
		self.affine().transform_vector3(vector)
	}
}

#[derive(Component, Deref, DerefMut)]
pub struct DespawnTimer(Timer);

impl DespawnTimer {
	pub fn new(duration: f32) -> Self {
		Self(Timer::from_seconds(duration, TimerMode::Once))
	}
}

pub fn despawn_after_timer(
	mut commands: Commands,
	time: Res<Time>,
	mut query: Query<(Entity, &mut DespawnTimer)>,
) {
	for (entity, mut despawn_timer) in query.iter_mut() {
		despawn_timer.tick(time.delta());
		if despawn_timer.finished() {
			commands.entity(entity).despawn_recursive();
		}
	}
}
