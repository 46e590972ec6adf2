//! Navigation параметры: граф (connect distance, лимит маршрутов) и агенты (speed, stopping distance).
//!
//! Все структуры читаются из TOML, отсутствующие поля берутся из Default:
//!
//! ```toml
//! [graph]
//! connect_distance = 6.0
//! max_route_nodes = 8
//!
//! [agent]
//! speed = 1.0
//! stopping_distance = 0.5
//! look_at = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NavigationResult;

/// Параметры графа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Максимальный зазор между bounding boxes соседних нод (world units)
    pub connect_distance: f32,
    /// Лимит длины маршрута в нодах при enumeration (None = без лимита)
    pub max_route_nodes: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            connect_distance: 0.0, // касающиеся/пересекающиеся anchors
            max_route_nodes: None,
        }
    }
}

/// Параметры steering агента (фиксируются при создании)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Радиус прибытия к текущей destination
    pub stopping_distance: f32,
    /// Шаг за тик (units per tick, delta не масштабирует)
    pub speed: f32,
    /// Поворачивать Transform к destination при движении
    pub look_at: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            stopping_distance: 0.5,
            speed: 0.5,
            look_at: false,
        }
    }
}

/// Конфиг navigation сессии
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub graph: GraphConfig,
    /// Дефолт для агентов без явного AgentOptions::config
    pub agent: AgentConfig,
}

impl NavigationConfig {
    pub fn from_toml_str(content: &str) -> NavigationResult<Self> {
        let config: NavigationConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> NavigationResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
