use serde::Deserialize;
use serde_json::{Map, Value};

/// A raw node record as delivered by the scan backend.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default = "unknown_type", rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub attributes: Map<String, Value>,
}

/// A raw edge record. Accepts both the dashboard field names and the
/// `from`/`to` names used by the backend export.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphEdge {
	#[serde(alias = "sourceId", alias = "from")]
	pub source: String,
	#[serde(alias = "targetId", alias = "to")]
	pub target: String,
	#[serde(
		default = "connected",
		alias = "relationshipLabel",
		alias = "relationship"
	)]
	pub label: String,
	#[serde(default)]
	pub strength: Option<f64>,
}

/// A whole scan graph: node records plus the edges between them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

fn unknown_type() -> String {
	"unknown".into()
}

fn connected() -> String {
	"connected".into()
}

impl GraphData {
	/// Parse the `{ "nodes": [...], "edges": [...] }` payload of a scan result.
	pub fn from_json(payload: &str) -> serde_json::Result<Self> {
		serde_json::from_str(payload)
	}
}

#[cfg(test)]
impl GraphNode {
	pub fn new(id: impl Into<String>, label: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind: kind.into(),
			attributes: Map::new(),
		}
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}
}

#[cfg(test)]
impl GraphEdge {
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		label: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: label.into(),
			strength: None,
		}
	}
}
