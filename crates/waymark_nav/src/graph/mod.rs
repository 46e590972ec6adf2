//! Graph domain — anchors, ноды и proximity adjacency
//!
//! Содержит:
//! - Anchor (позиция + AABB внешнего объекта)
//! - NodeId / Node (arena handles + список соседей)
//! - NodeGraph (add/remove, bake adjacency, поиск ближайшей ноды)

pub mod anchor;
pub mod node_graph;


pub use anchor::*;
pub use node_graph::*;
