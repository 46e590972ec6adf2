//! Waymark Navigation Core
//!
//! Waypoint-graph навигация для 3D агентов:
//! anchors → proximity граф → каталог маршрутов → steering агентов по waypoints.
//!
//! Два уровня API:
//! - Navigation facade (plain Rust, без App) — add_node/bake/add_agent/move_agent_to/update
//! - NavigationPlugin — тот же facade как Resource + events + FixedUpdate системы
//!
//! Рендер, камеры и выбор объектов — забота host'а: он поставляет anchors и
//! delta time, читает Transform агентов.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod logger;
pub mod navigation;
pub mod routes;

// Re-export базовых типов для удобства
pub use agent::{Agent, AgentState};
pub use config::{AgentConfig, GraphConfig, NavigationConfig};
pub use error::{NavigationError, NavigationResult};
pub use graph::{Anchor, Node, NodeGraph, NodeId};
pub use navigation::{
    AgentArrived, AgentId, AgentOptions, BakeRequest, MoveAgentRequest, NavAgentLink, Navigation,
    NavigationPlugin,
};
pub use routes::{PathCatalog, Route};

pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};

/// Частота FixedUpdate headless симуляции
pub const TICK_HZ: f64 = 60.0;

/// Создаёт minimal Bevy App для headless навигации
///
/// Время ручное: каждый app.update() = ровно один FixedUpdate тик,
/// независимо от wall clock (детерминизм тестов и demo).
pub fn create_headless_app(config: NavigationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(NavigationPlugin::new(config))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    app
}
