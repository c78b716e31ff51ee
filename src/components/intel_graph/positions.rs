use std::collections::HashMap;

use super::model::Entity;

pub const LAYOUT_CENTER: (f64, f64) = (400.0, 300.0);
pub const BASE_RADIUS: f64 = 140.0;
pub const RING_GROWTH: f64 = 6.0;
pub const ANGLE_STEP: f64 = 0.9;

/// World-space coordinate per node id. Only node drags write to it after seeding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionStore {
	positions: HashMap<String, (f64, f64)>,
}

/// Initial coordinate of the `i`-th node: the first node sits at the centre,
/// the rest follow an outward spiral.
pub fn seed_position(i: usize) -> (f64, f64) {
	let (cx, cy) = LAYOUT_CENTER;
	if i == 0 {
		return (cx, cy);
	}
	let angle = i as f64 * ANGLE_STEP;
	let radius = BASE_RADIUS + RING_GROWTH * i as f64;
	(cx + radius * angle.cos(), cy + radius * angle.sin())
}

impl PositionStore {
	pub fn seed(entities: &[Entity]) -> Self {
		Self {
			positions: entities
				.iter()
				.enumerate()
				.map(|(i, e)| (e.id.clone(), seed_position(i)))
				.collect(),
		}
	}

	pub fn get(&self, id: &str) -> Option<(f64, f64)> {
		self.positions.get(id).copied()
	}

	/// Overwrite a known node's coordinate. Returns false for unknown ids.
	pub fn set(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.positions.get_mut(id) {
			Some(pos) => {
				*pos = (x, y);
				true
			}
			None => false,
		}
	}
}
