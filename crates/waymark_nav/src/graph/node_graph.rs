//! Node graph: arena нод + proximity adjacency.

use bevy::prelude::*;
use std::fmt;

use super::anchor::Anchor;
use crate::config::GraphConfig;

/// Stable handle ноды внутри одного NodeGraph.
///
/// Handles не переиспользуются после remove_node, поэтому устаревший id
/// просто перестаёт резолвиться (а не указывает на чужую ноду).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Нода графа
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    anchor: Anchor,
    /// Соседи (заполняются только в calculate_node_connections)
    connections: Vec<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }

    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }
}

/// Набор нод + adjacency по proximity.
///
/// Adjacency пересчитывается только целиком (calculate_node_connections),
/// add/remove/set_anchor её не трогают.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    next_id: u32,
    connect_distance: f32,
}

impl NodeGraph {
    pub fn new(connect_distance: f32) -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 0,
            connect_distance,
        }
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self::new(config.connect_distance)
    }

    pub fn connect_distance(&self) -> f32 {
        self.connect_distance
    }

    pub fn add_node(&mut self, anchor: Anchor) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes.push(Node {
            id,
            anchor,
            connections: Vec::new(),
        });

        id
    }

    /// Удаляет ноду по identity, порядок остальных сохраняется
    pub fn remove_node(&mut self, id: NodeId) -> Option<Anchor> {
        let index = self.index_of(id)?;
        Some(self.nodes.remove(index).anchor)
    }

    /// Заменяет anchor существующей ноды (host двигает объект между bake'ами)
    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.nodes[index].anchor = anchor;
        true
    }

    /// Полный пересчёт adjacency, O(n²).
    ///
    /// B сосед A если `|A - B| - halfExtent(A) - halfExtent(B) <= connect_distance`.
    /// Формула симметрична, обе стороны добавляются независимо.
    pub fn calculate_node_connections(&mut self) {
        let anchors: Vec<(NodeId, Anchor)> = self
            .nodes
            .iter()
            .map(|node| (node.id, node.anchor))
            .collect();

        for node in self.nodes.iter_mut() {
            node.connections.clear();

            for &(other_id, other_anchor) in &anchors {
                if other_id == node.id {
                    continue;
                }

                if node.anchor.gap_to(&other_anchor) <= self.connect_distance {
                    node.connections.push(other_id);
                }
            }
        }
    }

    /// Ближайшая нода к точке (linear scan, при равенстве — первая)
    pub fn find_closest_node(&self, point: Vec3) -> Option<NodeId> {
        let mut closest = None;
        let mut closest_distance = f32::INFINITY;

        for node in &self.nodes {
            let distance = node.position().distance(point);
            if distance < closest_distance {
                closest = Some(node.id);
                closest_distance = distance;
            }
        }

        closest
    }

    /// Live список нод (меняется после add/remove/bake)
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(Node::position)
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().map(|node| node.id)
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a).is_some_and(|node| node.is_connected_to(b))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }
}
