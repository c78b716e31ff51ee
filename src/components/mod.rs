pub mod intel_graph;
