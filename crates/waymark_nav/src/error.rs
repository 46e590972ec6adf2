//! Ошибки navigation core.
//!
//! Query miss (нет маршрута в каталоге, пустой граф при поиске ближайшей ноды)
//! возвращается как `None`. Здесь только то, что caller обязан обработать.

use thiserror::Error;

use crate::graph::NodeId;
use crate::navigation::AgentId;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("no nodes found, add nodes before adding agents")]
    NoNodes,

    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeId),

    #[error("agent {0} is not registered")]
    UnknownAgent(AgentId),

    #[error("navigation graph is empty")]
    EmptyGraph,

    #[error("no route from node {from} to node {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type NavigationResult<T> = Result<T, NavigationError>;
