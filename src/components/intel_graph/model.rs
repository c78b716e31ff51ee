use std::collections::HashMap;

use log::debug;
use serde_json::{Map, Value};

use super::types::GraphData;

pub const DEFAULT_STRENGTH: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
	pub id: String,
	pub label: String,
	pub kind: String,
	pub attributes: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
	pub source: String,
	pub target: String,
	pub label: String,
	pub strength: f64,
}

impl Relation {
	/// The endpoint opposite to `id`, if `id` is one of this relation's endpoints.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Sanitised entity/relation set. Entity order is draw order.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	entities: Vec<Entity>,
	relations: Vec<Relation>,
	index: HashMap<String, usize>,
}

impl GraphModel {
	pub fn build(data: &GraphData) -> Self {
		let mut entities: Vec<Entity> = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());

		for node in &data.nodes {
			let entity = Entity {
				id: node.id.clone(),
				label: node.label.clone(),
				kind: node.kind.clone(),
				attributes: node.attributes.clone(),
			};
			// Duplicate ids: the later record replaces the earlier one in place.
			match index.get(&node.id) {
				Some(&slot) => {
					debug!("duplicate node id {:?}, keeping last record", node.id);
					entities[slot] = entity;
				}
				None => {
					index.insert(node.id.clone(), entities.len());
					entities.push(entity);
				}
			}
		}

		let mut relations = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if !index.contains_key(&edge.source) || !index.contains_key(&edge.target) {
				debug!(
					"dropping edge {:?} -> {:?}: unknown endpoint",
					edge.source, edge.target
				);
				continue;
			}
			relations.push(Relation {
				source: edge.source.clone(),
				target: edge.target.clone(),
				label: edge.label.clone(),
				strength: edge
					.strength
					.filter(|s| s.is_finite())
					.map(|s| s.clamp(0.0, 1.0))
					.unwrap_or(DEFAULT_STRENGTH),
			});
		}

		Self {
			entities,
			relations,
			index,
		}
	}

	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn relations(&self) -> &[Relation] {
		&self.relations
	}

	pub fn entity(&self, id: &str) -> Option<&Entity> {
		self.index.get(id).map(|&i| &self.entities[i])
	}

	/// Every relation touching `id`, paired with the entity at the other end.
	pub fn connections<'a>(&'a self, id: &'a str) -> impl Iterator<Item = (&'a Relation, &'a Entity)> {
		self.relations.iter().filter_map(move |rel| {
			rel.other_end(id)
				.and_then(|other| self.entity(other))
				.map(|other| (rel, other))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::intel_graph::types::{GraphEdge, GraphNode};

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("user", "Target User", "person"),
				GraphNode::new("repo", "dotfiles", "repository"),
				GraphNode::new("secret", "api_key", "sensitive_data"),
			],
			edges: vec![
				GraphEdge::new("user", "repo", "owns_repository"),
				GraphEdge::new("repo", "secret", "contains_secret"),
			],
		}
	}

	#[test]
	fn empty_input_builds_empty_graph() {
		let model = GraphModel::build(&GraphData::default());
		assert!(model.entities().is_empty());
		assert!(model.relations().is_empty());
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let mut data = sample();
		data.edges.push(GraphEdge::new("user", "ghost", "knows"));
		data.edges.push(GraphEdge::new("ghost", "repo", "knows"));

		let model = GraphModel::build(&data);
		assert_eq!(model.relations().len(), 2);
		assert!(model.relations().iter().all(|r| r.label != "knows"));
	}

	#[test]
	fn duplicate_ids_keep_last_record_in_first_slot() {
		let mut data = sample();
		data.nodes.push(GraphNode::new("user", "Renamed", "person"));

		let model = GraphModel::build(&data);
		assert_eq!(model.entities().len(), 3);
		assert_eq!(model.entities()[0].label, "Renamed");
		assert_eq!(model.entity("user").unwrap().label, "Renamed");
	}

	#[test]
	fn parallel_edges_are_kept() {
		let mut data = sample();
		data.edges.push(GraphEdge::new("repo", "user", "starred_by"));

		let model = GraphModel::build(&data);
		assert_eq!(model.relations().len(), 3);
	}

	#[test]
	fn strength_defaults_and_clamps() {
		let mut data = sample();
		data.edges[0].strength = Some(3.0);
		data.edges[1].strength = Some(f64::NAN);

		let model = GraphModel::build(&data);
		assert_eq!(model.relations()[0].strength, 1.0);
		assert_eq!(model.relations()[1].strength, DEFAULT_STRENGTH);
	}

	#[test]
	fn connections_list_other_endpoints() {
		let model = GraphModel::build(&sample());
		let repo: Vec<_> = model
			.connections("repo")
			.map(|(rel, other)| (rel.label.as_str(), other.id.as_str()))
			.collect();
		assert_eq!(
			repo,
			vec![("owns_repository", "user"), ("contains_secret", "secret")]
		);
		assert_eq!(model.connections("nobody").count(), 0);
	}
}
