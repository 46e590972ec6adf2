//! Path catalog: enumeration, дедупликация и ранжирование маршрутов по графу.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::config::GraphConfig;
use crate::graph::{NodeGraph, NodeId};

/// Маршрут: simple path из ≥2 нод + суммарная евклидова длина
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: Vec<NodeId>,
    length: f32,
}

impl Route {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Sub-route от `start` до `end` включительно.
    ///
    /// None если одной из нод нет или `end` стоит раньше `start`.
    pub fn trimmed(&self, start: NodeId, end: NodeId, graph: &NodeGraph) -> Option<Route> {
        let from = self.nodes.iter().position(|&id| id == start)?;
        let to = self.nodes.iter().position(|&id| id == end)?;
        if to < from {
            return None;
        }

        let nodes = self.nodes[from..=to].to_vec();
        let length = route_length(&nodes, graph)?;
        Some(Route { nodes, length })
    }

    /// Позиции нод маршрута (None если нода удалена после bake)
    pub fn positions(&self, graph: &NodeGraph) -> Option<Vec<Vec3>> {
        self.nodes.iter().map(|&id| graph.position(id)).collect()
    }
}

/// Сумма расстояний между соседними нодами
fn route_length(nodes: &[NodeId], graph: &NodeGraph) -> Option<f32> {
    let mut length = 0.0;
    for pair in nodes.windows(2) {
        let a = graph.position(pair[0])?;
        let b = graph.position(pair[1])?;
        length += a.distance(b);
    }
    Some(length)
}

/// Предрассчитанный каталог маршрутов.
///
/// Полностью пересобирается в calculate_paths. Количество simple paths растёт
/// экспоненциально с плотностью графа, поэтому для плотных графов задавайте
/// `max_route_nodes`.
#[derive(Debug, Clone, Default)]
pub struct PathCatalog {
    routes: Vec<Route>,
    max_route_nodes: Option<usize>,
}

impl PathCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self {
            routes: Vec::new(),
            max_route_nodes: config.max_route_nodes,
        }
    }

    pub fn max_route_nodes(&self) -> Option<usize> {
        self.max_route_nodes
    }

    /// Пересобирает все маршруты по текущей adjacency графа
    pub fn calculate_paths(&mut self, graph: &NodeGraph) {
        self.routes.clear();

        // 1. Enumeration: DFS из каждой ноды, каждый префикс длины ≥ 2
        let mut walks: Vec<Vec<NodeId>> = Vec::new();
        let mut walk = Vec::new();
        for node in graph.nodes() {
            self.walk_from(node.id(), graph, &mut walk, &mut walks);
        }

        // 2-3. Scoring + дедупликация (первое вхождение остаётся)
        let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
        for nodes in walks {
            let Some(length) = route_length(&nodes, graph) else {
                continue;
            };
            if seen.insert(nodes.clone()) {
                self.routes.push(Route { nodes, length });
            }
        }

        // 4. Ranking: stable sort, равные длины сохраняют порядок enumeration
        self.routes.sort_by(|a, b| a.length.total_cmp(&b.length));
    }

    fn walk_from(
        &self,
        id: NodeId,
        graph: &NodeGraph,
        walk: &mut Vec<NodeId>,
        walks: &mut Vec<Vec<NodeId>>,
    ) {
        if walk.contains(&id) {
            return;
        }
        let Some(node) = graph.node(id) else {
            return;
        };

        walk.push(id);
        if walk.len() > 1 {
            walks.push(walk.clone());
        }

        let can_extend = self.max_route_nodes.map_or(true, |max| walk.len() < max);
        if can_extend {
            for &next in node.connections() {
                self.walk_from(next, graph, walk, walks);
            }
        }

        walk.pop();
    }

    /// Первый маршрут (в порядке ранжирования), содержащий обе ноды.
    ///
    /// Membership lookup: возвращает позиции ВСЕГО маршрута, без обрезки и
    /// без учёта направления.
    pub fn find_path(&self, start: NodeId, end: NodeId, graph: &NodeGraph) -> Option<Vec<Vec3>> {
        self.routes
            .iter()
            .find(|route| route.contains(start) && route.contains(end))
            .and_then(|route| route.positions(graph))
    }

    /// Кратчайший маршрут от `start` до `end`.
    ///
    /// Кандидаты: маршруты с обеими нодами, обрезанные до [start..=end].
    /// Ранжируются по длине обрезанного маршрута, при равенстве — первый.
    pub fn find_shortest_route(&self, start: NodeId, end: NodeId, graph: &NodeGraph) -> Option<Route> {
        let mut shortest: Option<Route> = None;

        for route in &self.routes {
            if !route.contains(start) || !route.contains(end) {
                continue;
            }
            let Some(candidate) = route.trimmed(start, end, graph) else {
                continue;
            };

            let is_shorter = shortest
                .as_ref()
                .map_or(true, |best| candidate.length < best.length);
            if is_shorter {
                shortest = Some(candidate);
            }
        }

        shortest
    }

    /// Позиции кратчайшего маршрута (см. find_shortest_route)
    pub fn find_shortest_path(&self, start: NodeId, end: NodeId, graph: &NodeGraph) -> Option<Vec<Vec3>> {
        self.find_shortest_route(start, end, graph)
            .and_then(|route| route.positions(graph))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }
}
