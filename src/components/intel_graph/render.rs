use std::borrow::Cow;

use super::state::IntelGraphState;
use super::style::{edge_color, style_for};
use super::surface::{Surface, SurfaceError};

const BACKGROUND: &str = "#0f172a";
const EDGE_ALPHA: f64 = 0.6;
const EDGE_LABEL_FONT: &str = "10px sans-serif";
const EDGE_LABEL_COLOR: &str = "#cbd5e1";
const EDGE_CHIP_COLOR: &str = "rgba(15, 23, 42, 0.85)";
const EDGE_CHIP_PADDING: f64 = 4.0;
const EDGE_CHIP_HEIGHT: f64 = 14.0;
const NODE_LABEL_FONT: &str = "12px sans-serif";
const NODE_LABEL_COLOR: &str = "#e2e8f0";
const NODE_LABEL_GAP: f64 = 12.0;
const GLYPH_FONT: &str = "bold 16px sans-serif";
const WARNING_GLYPH: &str = "\u{26a0}";
const GLOW_COLOR: &str = "rgba(239, 68, 68, 0.45)";
const GLOW_SPREAD: f64 = 2.2;
const DIM_ALPHA: f64 = 0.7;
const HIGHLIGHT_BORDER: (&str, f64) = ("#f8fafc", 3.0);
const PLAIN_BORDER: (&str, f64) = ("#1e293b", 1.0);

pub const LABEL_MAX_CHARS: usize = 15;

/// Shorten `label` to `LABEL_MAX_CHARS` characters plus an ellipsis.
pub fn truncate_label(label: &str) -> Cow<'_, str> {
	match label.char_indices().nth(LABEL_MAX_CHARS) {
		Some((cut, _)) => Cow::Owned(format!("{}...", &label[..cut])),
		None => Cow::Borrowed(label),
	}
}

/// Paint the whole scene. Skips the frame when the surface has no area.
pub fn render(state: &IntelGraphState, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
	let size = surface.size();
	if !size.has_area() {
		return Err(SurfaceError::ZeroSize {
			width: size.width,
			height: size.height,
		});
	}
	let ratio = size.scale();

	surface.set_transform(ratio, 0.0, 0.0);
	surface.fill_rect(0.0, 0.0, size.width, size.height, BACKGROUND);

	let vp = &state.viewport;
	surface.set_transform(ratio * vp.k, ratio * vp.x, ratio * vp.y);
	draw_edges(state, surface);
	draw_nodes(state, surface);
	Ok(())
}

fn draw_edges(state: &IntelGraphState, surface: &mut dyn Surface) {
	let k = state.viewport.k;

	for rel in state.model.relations() {
		let (Some(a), Some(b)) = (
			state.positions.get(&rel.source),
			state.positions.get(&rel.target),
		) else {
			continue;
		};
		surface.line(
			a,
			b,
			edge_color(rel.strength),
			EDGE_ALPHA,
			(1.0 + 2.0 * rel.strength) / k,
		);

		if rel.label.is_empty() {
			continue;
		}
		let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
		let width = surface.measure_text(&rel.label, EDGE_LABEL_FONT) + 2.0 * EDGE_CHIP_PADDING;
		surface.fill_rect(
			mid.0 - width / 2.0,
			mid.1 - EDGE_CHIP_HEIGHT / 2.0,
			width,
			EDGE_CHIP_HEIGHT,
			EDGE_CHIP_COLOR,
		);
		surface.centered_text(&rel.label, mid, EDGE_LABEL_FONT, EDGE_LABEL_COLOR);
	}
}

fn draw_nodes(state: &IntelGraphState, surface: &mut dyn Surface) {
	for entity in state.model.entities() {
		let Some(center) = state.positions.get(&entity.id) else {
			continue;
		};
		let style = style_for(&entity.kind);
		let highlighted = state.is_highlighted(&entity.id);

		if style.sensitive {
			surface.radial_glow(
				center,
				style.radius * 0.5,
				style.radius * GLOW_SPREAD,
				GLOW_COLOR,
			);
		}

		let alpha = if highlighted { 1.0 } else { DIM_ALPHA };
		surface.fill_circle(center, style.radius, style.color, alpha);

		let (border, border_width) = if highlighted {
			HIGHLIGHT_BORDER
		} else {
			PLAIN_BORDER
		};
		surface.stroke_circle(center, style.radius, border, border_width);

		if style.sensitive {
			surface.centered_text(WARNING_GLYPH, center, GLYPH_FONT, "#ffffff");
		}

		let label = if entity.label.is_empty() {
			&entity.id
		} else {
			&entity.label
		};
		surface.centered_text(
			&truncate_label(label),
			(center.0, center.1 + style.radius + NODE_LABEL_GAP),
			NODE_LABEL_FONT,
			NODE_LABEL_COLOR,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::intel_graph::surface::SurfaceSize;
	use crate::components::intel_graph::types::{GraphData, GraphEdge, GraphNode};

	#[derive(Clone, Debug, PartialEq)]
	enum Op {
		Transform(f64, f64, f64),
		Rect(String),
		Line((f64, f64), (f64, f64), String),
		Fill { radius: f64, color: String, alpha: f64 },
		Stroke { color: String, width: f64 },
		Glow((f64, f64)),
		Text(String, (f64, f64)),
	}

	struct Recorder {
		size: SurfaceSize,
		ops: Vec<Op>,
	}

	impl Recorder {
		fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
			Self {
				size: SurfaceSize {
					width,
					height,
					pixel_ratio,
				},
				ops: Vec::new(),
			}
		}

		fn texts(&self) -> Vec<&str> {
			self.ops
				.iter()
				.filter_map(|op| match op {
					Op::Text(t, _) => Some(t.as_str()),
					_ => None,
				})
				.collect()
		}

		fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
			self.ops.iter().filter(|op| pred(op)).count()
		}
	}

	impl Surface for Recorder {
		fn size(&self) -> SurfaceSize {
			self.size
		}
		fn set_transform(&mut self, k: f64, x: f64, y: f64) {
			self.ops.push(Op::Transform(k, x, y));
		}
		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: &str) {
			self.ops.push(Op::Rect(color.into()));
		}
		fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, _: f64, _: f64) {
			self.ops.push(Op::Line(from, to, color.into()));
		}
		fn fill_circle(&mut self, _: (f64, f64), radius: f64, color: &str, alpha: f64) {
			self.ops.push(Op::Fill {
				radius,
				color: color.into(),
				alpha,
			});
		}
		fn stroke_circle(&mut self, _: (f64, f64), _: f64, color: &str, width: f64) {
			self.ops.push(Op::Stroke {
				color: color.into(),
				width,
			});
		}
		fn radial_glow(&mut self, center: (f64, f64), _: f64, _: f64, _: &str) {
			self.ops.push(Op::Glow(center));
		}
		fn centered_text(&mut self, text: &str, at: (f64, f64), _: &str, _: &str) {
			self.ops.push(Op::Text(text.into(), at));
		}
		fn measure_text(&mut self, text: &str, _: &str) -> f64 {
			text.chars().count() as f64 * 6.0
		}
	}

	fn state() -> IntelGraphState {
		IntelGraphState::new(&GraphData {
			nodes: vec![
				GraphNode::new("user", "Target User", "person"),
				GraphNode::new("repo", "an-extremely-long-repository-name", "repository"),
				GraphNode::new("secret", "aws_key", "sensitive_data"),
			],
			edges: vec![
				GraphEdge::new("user", "repo", "owns_repository"),
				GraphEdge::new("repo", "secret", "contains_secret"),
				GraphEdge::new("repo", "ghost", "dangling"),
			],
		})
	}

	#[test]
	fn draws_every_relation_and_entity() {
		let state = state();
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		assert_eq!(surface.count(|op| matches!(op, Op::Line(..))), 2);
		assert_eq!(surface.count(|op| matches!(op, Op::Fill { .. })), 3);
		assert_eq!(surface.count(|op| matches!(op, Op::Stroke { .. })), 3);
		let texts = surface.texts();
		assert!(texts.contains(&"owns_repository"));
		assert!(texts.contains(&"contains_secret"));
		assert!(!texts.contains(&"dangling"));
	}

	#[test]
	fn edge_endpoints_follow_positions() {
		let mut state = state();
		state.positions.set("user", 0.0, 0.0);
		state.positions.set("repo", 40.0, 20.0);
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		assert!(
			surface
				.ops
				.contains(&Op::Line((0.0, 0.0), (40.0, 20.0), "#ffff00".into()))
		);
		assert!(
			surface
				.ops
				.contains(&Op::Text("owns_repository".into(), (20.0, 10.0)))
		);
	}

	#[test]
	fn edges_are_colored_by_strength() {
		let mut data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A", "person"),
				GraphNode::new("b", "B", "email"),
			],
			edges: vec![
				GraphEdge::new("a", "b", "uses_email"),
				GraphEdge::new("a", "b", "mentions"),
				GraphEdge::new("a", "b", "maybe"),
			],
		};
		data.edges[0].strength = Some(0.8);
		data.edges[1].strength = Some(0.2);
		data.edges[2].strength = Some(0.1);
		let state = IntelGraphState::new(&data);
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		let colors: Vec<&str> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Line(_, _, color) => Some(color.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(colors, vec!["#00ff00", "#ffa500", "#ff0000"]);
	}

	#[test]
	fn only_sensitive_nodes_glow_and_carry_a_glyph() {
		let state = state();
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		let secret = state.positions.get("secret").unwrap();
		assert_eq!(
			surface.ops.iter().filter(|op| matches!(op, Op::Glow(_))).collect::<Vec<_>>(),
			vec![&Op::Glow(secret)]
		);
		assert!(surface.ops.contains(&Op::Text(WARNING_GLYPH.into(), secret)));
	}

	#[test]
	fn long_labels_are_truncated() {
		let state = state();
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		let texts = surface.texts();
		assert!(texts.contains(&"an-extremely-lo..."));
		assert!(texts.contains(&"Target User"));
		assert_eq!(truncate_label("exactly-15-char"), "exactly-15-char");
		assert_eq!(truncate_label("ünïcödé-länger-als-15"), "ünïcödé-länger-...");
	}

	#[test]
	fn highlighted_nodes_are_opaque_with_light_border() {
		let mut state = state();
		let (x, y) = state.positions.get("user").unwrap();
		state.click(x, y);
		let mut surface = Recorder::new(800.0, 600.0, 1.0);
		render(&state, &mut surface).unwrap();

		let fills: Vec<f64> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Fill { alpha, .. } => Some(*alpha),
				_ => None,
			})
			.collect();
		assert_eq!(fills, vec![1.0, DIM_ALPHA, DIM_ALPHA]);
		assert_eq!(
			surface.count(|op| *op
				== Op::Stroke {
					color: HIGHLIGHT_BORDER.0.into(),
					width: HIGHLIGHT_BORDER.1,
				}),
			1
		);
	}

	#[test]
	fn unknown_kinds_use_default_style() {
		let state = IntelGraphState::new(&GraphData {
			nodes: vec![GraphNode::new("x", "X", "satellite")],
			edges: vec![],
		});
		let mut surface = Recorder::new(100.0, 100.0, 1.0);
		render(&state, &mut surface).unwrap();

		let default = crate::components::intel_graph::style::DEFAULT_STYLE;
		assert!(surface.ops.contains(&Op::Fill {
			radius: default.radius,
			color: default.color.into(),
			alpha: DIM_ALPHA,
		}));
	}

	#[test]
	fn transforms_apply_pixel_ratio_then_viewport() {
		let mut state = state();
		state.viewport.pan(10.0, 20.0);
		state.viewport.zoom_by(1.5);
		let mut surface = Recorder::new(800.0, 600.0, 2.0);
		render(&state, &mut surface).unwrap();

		assert_eq!(surface.ops[0], Op::Transform(2.0, 0.0, 0.0));
		assert_eq!(surface.ops[1], Op::Rect(BACKGROUND.into()));
		assert_eq!(surface.ops[2], Op::Transform(3.0, 20.0, 40.0));
	}

	#[test]
	fn zero_size_surface_skips_the_frame() {
		let state = state();
		let mut surface = Recorder::new(0.0, 600.0, 1.0);
		assert_eq!(
			render(&state, &mut surface),
			Err(SurfaceError::ZeroSize {
				width: 0.0,
				height: 600.0
			})
		);
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn empty_graph_only_paints_background() {
		let state = IntelGraphState::new(&GraphData::default());
		let mut surface = Recorder::new(320.0, 240.0, 1.0);
		render(&state, &mut surface).unwrap();
		assert_eq!(surface.ops.len(), 3);
	}
}
