//! Navigation session: граф + каталог маршрутов + реестр агентов.

use bevy::prelude::*;
use std::fmt;

use crate::agent::Agent;
use crate::config::{AgentConfig, NavigationConfig};
use crate::error::{NavigationError, NavigationResult};
use crate::graph::{Anchor, Node, NodeGraph, NodeId};
use crate::logger;
use crate::routes::{PathCatalog, Route};

/// Stable handle агента внутри одной Navigation сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Параметры add_agent
#[derive(Debug, Clone, Default)]
pub struct AgentOptions {
    /// None → AgentConfig из NavigationConfig
    pub config: Option<AgentConfig>,
    /// None → первая нода графа
    pub start_node: Option<NodeId>,
}

impl AgentOptions {
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn starting_at(mut self, node: NodeId) -> Self {
        self.start_node = Some(node);
        self
    }
}

/// Зарегистрированный агент: steering + bound transform + home нода
#[derive(Debug, Clone)]
struct AgentSlot {
    id: AgentId,
    agent: Agent,
    transform: Transform,
    /// Нода, от которой строится следующий маршрут
    home: NodeId,
}

/// Navigation facade.
///
/// Явно создаваемая сессия (без глобального состояния): несколько сессий
/// могут жить параллельно, в Bevy app — одна как Resource.
///
/// Topology изменения (add/remove node, set_anchor) не пересчитывают граф:
/// после них нужен явный `bake()`.
#[derive(Resource, Debug, Clone)]
pub struct Navigation {
    config: NavigationConfig,
    graph: NodeGraph,
    catalog: PathCatalog,
    agents: Vec<AgentSlot>,
    next_agent_id: u32,
    needs_bake: bool,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl Navigation {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            graph: NodeGraph::with_config(&config.graph),
            catalog: PathCatalog::with_config(&config.graph),
            config,
            agents: Vec::new(),
            next_agent_id: 0,
            needs_bake: false,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    // --- Agents ---

    /// Регистрирует агента и ставит его transform ровно на позицию стартовой ноды
    pub fn add_agent(&mut self, mut transform: Transform, options: AgentOptions) -> NavigationResult<AgentId> {
        let Some(first) = self.graph.first_node() else {
            logger::log_error("add_agent: no nodes found, add nodes before adding agents");
            return Err(NavigationError::NoNodes);
        };

        let home = options.start_node.unwrap_or(first);
        let position = self
            .graph
            .position(home)
            .ok_or(NavigationError::UnknownNode(home))?;

        transform.translation = position;

        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;

        let config = options.config.unwrap_or(self.config.agent);
        self.agents.push(AgentSlot {
            id,
            agent: Agent::new(config),
            transform,
            home,
        });

        logger::log(&format!("{} bound to node {} at {:?}", id, home, position));
        Ok(id)
    }

    /// Снимает агента с update. false если агент не зарегистрирован
    pub fn remove_agent(&mut self, id: AgentId) -> bool {
        let Some(index) = self.agents.iter().position(|slot| slot.id == id) else {
            return false;
        };
        self.agents.remove(index);
        true
    }

    /// Один тик для всех агентов (в порядке регистрации)
    pub fn update(&mut self, delta: f32) {
        for slot in self.agents.iter_mut() {
            slot.agent.update(&mut slot.transform, delta);
        }
    }

    /// Строит маршрут до ноды, ближайшей к `target`, и ставит его в очередь
    /// waypoints. Возвращает количество waypoints.
    ///
    /// Idle агент стартует от home ноды. Агент в пути стартует от ноды, к
    /// которой идёт: текущая destination остаётся, хвост очереди заменяется.
    ///
    /// При ошибке очередь агента не меняется. После успеха home нода агента
    /// становится конечной нодой маршрута.
    pub fn move_agent_to(&mut self, id: AgentId, target: Vec3) -> NavigationResult<usize> {
        let index = self
            .agents
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(NavigationError::UnknownAgent(id))?;

        let closest = self
            .graph
            .find_closest_node(target)
            .ok_or(NavigationError::EmptyGraph)?;

        if self.needs_bake {
            logger::log_warning(&format!(
                "move_agent_to({}): graph changed since last bake, routes may be stale",
                id
            ));
        }

        let home = self.route_origin(index).ok_or(NavigationError::EmptyGraph)?;
        let route = self
            .catalog
            .find_shortest_route(home, closest, &self.graph)
            .ok_or(NavigationError::NoRoute { from: home, to: closest })?;
        let points = route
            .positions(&self.graph)
            .ok_or(NavigationError::NoRoute { from: home, to: closest })?;

        let count = points.len();
        let slot = &mut self.agents[index];
        slot.agent.set_path(points);
        slot.home = closest;

        logger::log(&format!(
            "{}: route {} → {} ({} waypoints, length {:.2})",
            id,
            home,
            closest,
            count,
            route.length()
        ));
        Ok(count)
    }

    /// Нода, от которой строится новый маршрут.
    ///
    /// В пути — нода текущей destination (или следующего waypoint), чтобы
    /// новый маршрут продолжал ребро, по которому агент уже идёт. Idle —
    /// home нода; если её удалили, ближайшая к агенту.
    fn route_origin(&self, index: usize) -> Option<NodeId> {
        let slot = &self.agents[index];
        let heading = if slot.agent.has_destination() {
            Some(slot.agent.destination())
        } else {
            slot.agent.path().front().copied()
        };

        match heading {
            Some(point) => self.graph.find_closest_node(point),
            None if self.graph.contains(slot.home) => Some(slot.home),
            None => self.graph.find_closest_node(slot.transform.translation),
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.slot(id).map(|slot| &slot.agent)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.agent)
    }

    /// Transform, который мутирует агент (читается рендером)
    pub fn agent_transform(&self, id: AgentId) -> Option<&Transform> {
        self.slot(id).map(|slot| &slot.transform)
    }

    pub fn home_node(&self, id: AgentId) -> Option<NodeId> {
        self.slot(id).map(|slot| slot.home)
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|slot| slot.id)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn slot(&self, id: AgentId) -> Option<&AgentSlot> {
        self.agents.iter().find(|slot| slot.id == id)
    }

    // --- Graph ---

    pub fn add_node(&mut self, anchor: Anchor) -> NodeId {
        self.needs_bake = true;
        self.graph.add_node(anchor)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Anchor> {
        let removed = self.graph.remove_node(id);
        if removed.is_some() {
            self.needs_bake = true;
        }
        removed
    }

    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) -> bool {
        let updated = self.graph.set_anchor(id, anchor);
        if updated {
            self.needs_bake = true;
        }
        updated
    }

    /// Полный пересчёт adjacency и маршрутов. Блокирующий и дорогой —
    /// не вызывать каждый тик. Возвращает количество маршрутов.
    pub fn bake(&mut self) -> usize {
        self.graph.calculate_node_connections();
        self.catalog.calculate_paths(&self.graph);
        self.needs_bake = false;

        logger::log_info(&format!(
            "Navigation baked: {} nodes, {} routes",
            self.graph.len(),
            self.catalog.len()
        ));
        self.catalog.len()
    }

    /// true если граф менялся после последнего bake
    pub fn needs_bake(&self) -> bool {
        self.needs_bake
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &PathCatalog {
        &self.catalog
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn routes(&self) -> &[Route] {
        self.catalog.routes()
    }
}
