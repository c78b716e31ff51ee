use log::info;

use super::controller::{Cursor, Interaction, Outcome};
use super::model::{Entity, GraphModel};
use super::positions::PositionStore;
use super::viewport::{CONTROL_ZOOM_STEP, Viewport};
use super::types::GraphData;

/// Everything the canvas owns for one graph payload. A new payload means a
/// new state, so viewport and interaction start from their defaults.
#[derive(Clone, Debug)]
pub struct IntelGraphState {
	pub model: GraphModel,
	pub positions: PositionStore,
	pub viewport: Viewport,
	interaction: Interaction,
}

impl IntelGraphState {
	pub fn new(data: &GraphData) -> Self {
		let model = GraphModel::build(data);
		let positions = PositionStore::seed(model.entities());
		info!(
			"graph built: {} entities, {} relations",
			model.entities().len(),
			model.relations().len()
		);
		Self {
			model,
			positions,
			viewport: Viewport::default(),
			interaction: Interaction::default(),
		}
	}

	pub fn cursor(&self) -> Cursor {
		self.interaction.cursor()
	}

	pub fn hovered_id(&self) -> Option<&str> {
		self.interaction.hovered()
	}

	pub fn selected_id(&self) -> Option<&str> {
		self.interaction.selected()
	}

	pub fn is_highlighted(&self, id: &str) -> bool {
		self.hovered_id() == Some(id) || self.selected_id() == Some(id)
	}

	pub fn selected_entity(&self) -> Option<&Entity> {
		self.selected_id().and_then(|id| self.model.entity(id))
	}

	/// The hovered entity, unless a selection panel is open.
	pub fn tooltip_entity(&self) -> Option<&Entity> {
		if self.selected_id().is_some() {
			return None;
		}
		self.hovered_id().and_then(|id| self.model.entity(id))
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) -> Outcome {
		self.interaction
			.pointer_down(x, y, &self.model, &self.positions, &self.viewport)
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> Outcome {
		self.interaction.pointer_move(
			x,
			y,
			&self.model,
			&mut self.positions,
			&mut self.viewport,
		)
	}

	pub fn pointer_up(&mut self) -> Outcome {
		self.interaction.pointer_up()
	}

	pub fn pointer_leave(&mut self) -> Outcome {
		self.interaction.pointer_leave()
	}

	pub fn click(&mut self, x: f64, y: f64) -> Outcome {
		self.interaction
			.click(x, y, &self.model, &self.positions, &self.viewport)
	}

	pub fn wheel(&mut self, delta_y: f64) -> Outcome {
		self.interaction.wheel(delta_y, &mut self.viewport)
	}

	pub fn zoom_in(&mut self) -> Outcome {
		self.zoom_by(CONTROL_ZOOM_STEP)
	}

	pub fn zoom_out(&mut self) -> Outcome {
		self.zoom_by(1.0 / CONTROL_ZOOM_STEP)
	}

	fn zoom_by(&mut self, factor: f64) -> Outcome {
		if self.viewport.zoom_by(factor) {
			Outcome::redraw()
		} else {
			Outcome::default()
		}
	}

	pub fn reset_view(&mut self) -> Outcome {
		if self.viewport == Viewport::default() {
			return Outcome::default();
		}
		self.viewport.reset();
		Outcome::redraw()
	}

	pub fn clear_selection(&mut self) -> Outcome {
		self.interaction.clear_selection()
	}
}
