//! Per-category node styling.

pub const SENSITIVE_KIND: &str = "sensitive_data";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	pub color: &'static str,
	pub radius: f64,
	/// Drawn with a glow and a warning glyph.
	pub sensitive: bool,
}

const fn style(color: &'static str, radius: f64) -> NodeStyle {
	NodeStyle {
		color,
		radius,
		sensitive: false,
	}
}

pub const DEFAULT_STYLE: NodeStyle = style("#94a3b8", 20.0);

const STYLES: &[(&str, NodeStyle)] = &[
	("person", style("#ff6b6b", 30.0)),
	("identity", style("#4ecdc4", 22.0)),
	("platform", style("#4ecdc4", 22.0)),
	("repository", style("#a78bfa", 20.0)),
	(
		SENSITIVE_KIND,
		NodeStyle {
			color: "#ef4444",
			radius: 24.0,
			sensitive: true,
		},
	),
	("organization", style("#96ceb4", 22.0)),
	("email", style("#dda0dd", 18.0)),
	("location", style("#45b7d1", 18.0)),
	("website", style("#ffeaa7", 18.0)),
	("domain", style("#98d8c8", 18.0)),
];

pub fn style_for(kind: &str) -> NodeStyle {
	STYLES
		.iter()
		.find(|(k, _)| *k == kind)
		.map(|(_, s)| *s)
		.unwrap_or(DEFAULT_STYLE)
}

/// Lower strength bound of each edge color band, strongest first.
const EDGE_COLORS: &[(f64, &str)] = &[
	(0.8, "#00ff00"),
	(0.6, "#90ee90"),
	(0.4, "#ffff00"),
	(0.2, "#ffa500"),
];

pub const WEAK_EDGE_COLOR: &str = "#ff0000";

/// Red for weak relations through to green for strong ones.
pub fn edge_color(strength: f64) -> &'static str {
	EDGE_COLORS
		.iter()
		.find(|(min, _)| strength >= *min)
		.map(|(_, c)| *c)
		.unwrap_or(WEAK_EDGE_COLOR)
}
