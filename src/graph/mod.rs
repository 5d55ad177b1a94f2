pub mod entity_graph;

pub use entity_graph::EntityGraph;
