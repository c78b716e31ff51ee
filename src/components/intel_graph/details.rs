//! Text content of the hover tooltip and the selection panel.

use serde_json::Value;

use super::model::{Entity, GraphModel};

pub const NO_DETAILS: &str = "No details";

/// `snake_case` tags to display words.
pub fn humanize(tag: &str) -> String {
	tag.replace('_', " ")
}

fn format_value(value: &Value) -> Option<String> {
	match value {
		Value::Null | Value::Bool(false) => None,
		Value::Number(n) if n.as_f64() == Some(0.0) => None,
		Value::String(s) if s.is_empty() => None,
		Value::String(s) => Some(s.clone()),
		Value::Array(items) => {
			let parts: Vec<String> = items.iter().filter_map(format_value).collect();
			(!parts.is_empty()).then(|| parts.join(", "))
		}
		Value::Object(map) if map.is_empty() => None,
		other => Some(other.to_string()),
	}
}

/// `key: value` lines for every attribute carrying something worth showing.
pub fn attribute_lines(entity: &Entity) -> Vec<String> {
	entity
		.attributes
		.iter()
		.filter_map(|(key, value)| format_value(value).map(|v| format!("{}: {v}", humanize(key))))
		.collect()
}

fn display_label(entity: &Entity) -> String {
	if entity.label.is_empty() {
		entity.id.clone()
	} else {
		entity.label.clone()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub label: String,
	pub kind: String,
	pub lines: Vec<String>,
	pub x: f64,
	pub y: f64,
}

impl Tooltip {
	pub fn new(entity: &Entity, x: f64, y: f64) -> Self {
		let mut lines = attribute_lines(entity);
		if lines.is_empty() {
			lines.push(NO_DETAILS.into());
		}
		Self {
			label: display_label(entity),
			kind: humanize(&entity.kind),
			lines,
			x,
			y,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub relationship: String,
	pub other_id: String,
	pub other_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
	pub id: String,
	pub label: String,
	pub kind: String,
	pub lines: Vec<String>,
	pub connections: Vec<Connection>,
}

impl DetailPanel {
	pub fn new(entity: &Entity, model: &GraphModel) -> Self {
		Self {
			id: entity.id.clone(),
			label: display_label(entity),
			kind: humanize(&entity.kind),
			lines: attribute_lines(entity),
			connections: model
				.connections(&entity.id)
				.map(|(rel, other)| Connection {
					relationship: humanize(&rel.label),
					other_id: other.id.clone(),
					other_label: display_label(other),
				})
				.collect(),
		}
	}
}
