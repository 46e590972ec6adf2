//! Navigation events (host ↔ NavigationPlugin)

use bevy::prelude::*;

use super::session::AgentId;

/// Запрос: построить маршрут агента к world позиции
///
/// Обрабатывается handle_move_requests в FixedUpdate.
/// Отказ (нет агента/графа/маршрута) логируется как warning, очередь агента не меняется.
#[derive(Event, Debug, Clone)]
pub struct MoveAgentRequest {
    pub agent: AgentId,
    pub target: Vec3,
}

/// Запрос: пересчитать adjacency и маршруты
///
/// Несколько запросов за тик схлопываются в один bake.
#[derive(Event, Debug, Clone, Default)]
pub struct BakeRequest;

/// Агент дошёл до последнего waypoint (Moving → Idle)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AgentArrived {
    pub agent: AgentId,
    pub position: Vec3,
}
