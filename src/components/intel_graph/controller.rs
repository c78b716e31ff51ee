//! Pointer/wheel state machine.
//!
//! A gesture is exactly one of idle, panning, or dragging a node. Hover and
//! selection are tracked beside it and survive every gesture transition.

use super::model::{Entity, GraphModel};
use super::positions::PositionStore;
use super::style::style_for;
use super::viewport::{Viewport, wheel_factor};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	Panning {
		anchor: (f64, f64),
	},
	DraggingNode {
		id: String,
	},
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
	#[default]
	Grab,
	Pointer,
	Grabbing,
}

impl Cursor {
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Grab => "grab",
			Cursor::Pointer => "pointer",
			Cursor::Grabbing => "grabbing",
		}
	}
}

/// What an input event changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
	pub redraw: bool,
	pub hover_changed: bool,
	pub selection_changed: bool,
}

impl Outcome {
	pub const fn redraw() -> Self {
		Self {
			redraw: true,
			hover_changed: false,
			selection_changed: false,
		}
	}
}

/// First node in draw order whose circle contains the screen point.
pub fn hit_test<'a>(
	model: &'a GraphModel,
	positions: &PositionStore,
	viewport: &Viewport,
	sx: f64,
	sy: f64,
) -> Option<&'a Entity> {
	let (gx, gy) = viewport.screen_to_world(sx, sy);
	model.entities().iter().find(|entity| {
		positions.get(&entity.id).is_some_and(|(x, y)| {
			let (dx, dy) = (x - gx, y - gy);
			(dx * dx + dy * dy).sqrt() <= style_for(&entity.kind).radius
		})
	})
}

#[derive(Clone, Debug, Default)]
pub struct Interaction {
	pub(super) gesture: Gesture,
	hovered: Option<String>,
	selected: Option<String>,
	cursor: Cursor,
}

impl Interaction {
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	pub fn pointer_down(
		&mut self,
		sx: f64,
		sy: f64,
		model: &GraphModel,
		positions: &PositionStore,
		viewport: &Viewport,
	) -> Outcome {
		if !(sx.is_finite() && sy.is_finite()) {
			return Outcome::default();
		}
		self.gesture = match hit_test(model, positions, viewport, sx, sy) {
			Some(entity) => Gesture::DraggingNode {
				id: entity.id.clone(),
			},
			None => Gesture::Panning { anchor: (sx, sy) },
		};
		self.cursor = Cursor::Grabbing;
		Outcome::default()
	}

	pub fn pointer_move(
		&mut self,
		sx: f64,
		sy: f64,
		model: &GraphModel,
		positions: &mut PositionStore,
		viewport: &mut Viewport,
	) -> Outcome {
		if !(sx.is_finite() && sy.is_finite()) {
			return Outcome::default();
		}
		match &mut self.gesture {
			Gesture::DraggingNode { id } => {
				let (gx, gy) = viewport.screen_to_world(sx, sy);
				if positions.get(id) == Some((gx, gy)) || !positions.set(id, gx, gy) {
					return Outcome::default();
				}
				Outcome::redraw()
			}
			Gesture::Panning { anchor } => {
				let (dx, dy) = (sx - anchor.0, sy - anchor.1);
				if dx == 0.0 && dy == 0.0 {
					return Outcome::default();
				}
				viewport.pan(dx, dy);
				*anchor = (sx, sy);
				Outcome::redraw()
			}
			Gesture::Idle => {
				let hit = hit_test(model, positions, viewport, sx, sy).map(|e| e.id.clone());
				self.cursor = if hit.is_some() {
					Cursor::Pointer
				} else {
					Cursor::Grab
				};
				self.set_hover(hit)
			}
		}
	}

	/// Ends any gesture. Safe to call when already idle.
	pub fn pointer_up(&mut self) -> Outcome {
		self.gesture = Gesture::Idle;
		self.cursor = if self.hovered.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Grab
		};
		Outcome::default()
	}

	pub fn pointer_leave(&mut self) -> Outcome {
		self.pointer_up();
		self.cursor = Cursor::Grab;
		self.set_hover(None)
	}

	/// Select whatever lies under the pointer, or clear the selection on a miss.
	pub fn click(
		&mut self,
		sx: f64,
		sy: f64,
		model: &GraphModel,
		positions: &PositionStore,
		viewport: &Viewport,
	) -> Outcome {
		if !(sx.is_finite() && sy.is_finite()) {
			return Outcome::default();
		}
		let hit = hit_test(model, positions, viewport, sx, sy).map(|e| e.id.clone());
		self.set_selection(hit)
	}

	pub fn wheel(&mut self, delta_y: f64, viewport: &mut Viewport) -> Outcome {
		// Horizontal-only wheel events carry no vertical delta.
		if !delta_y.is_finite() || delta_y == 0.0 || !viewport.zoom_by(wheel_factor(delta_y)) {
			return Outcome::default();
		}
		Outcome::redraw()
	}

	pub fn clear_selection(&mut self) -> Outcome {
		self.set_selection(None)
	}

	fn set_hover(&mut self, hovered: Option<String>) -> Outcome {
		if self.hovered == hovered {
			return Outcome::default();
		}
		self.hovered = hovered;
		Outcome {
			redraw: true,
			hover_changed: true,
			selection_changed: false,
		}
	}

	fn set_selection(&mut self, selected: Option<String>) -> Outcome {
		if self.selected == selected {
			return Outcome::default();
		}
		self.selected = selected;
		Outcome {
			redraw: true,
			hover_changed: false,
			selection_changed: true,
		}
	}
}
