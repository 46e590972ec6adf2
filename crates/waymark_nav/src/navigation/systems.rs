//! Navigation systems (FixedUpdate).
//!
//! Порядок:
//! 1. handle_bake_requests — bake только по явному запросу
//! 2. handle_move_requests — MoveAgentRequest → очередь waypoints
//! 3. tick_navigation — steering всех агентов + AgentArrived
//! 4. sync_agent_transforms — Transform агента → entity с NavAgentLink

use bevy::prelude::*;

use super::events::{AgentArrived, BakeRequest, MoveAgentRequest};
use super::session::{AgentId, Navigation};
use crate::agent::AgentState;
use crate::logger;

/// Связь entity ↔ агент в Navigation resource
///
/// Transform entity перезаписывается каждый тик из bound transform агента.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct NavAgentLink(pub AgentId);

/// Система: bake по BakeRequest
pub fn handle_bake_requests(mut requests: EventReader<BakeRequest>, mut navigation: ResMut<Navigation>) {
    if requests.is_empty() {
        return;
    }
    // Несколько запросов за тик → один bake
    requests.clear();
    navigation.bake();
}

/// Система: MoveAgentRequest → Navigation::move_agent_to
pub fn handle_move_requests(mut requests: EventReader<MoveAgentRequest>, mut navigation: ResMut<Navigation>) {
    for request in requests.read() {
        if let Err(error) = navigation.move_agent_to(request.agent, request.target) {
            logger::log_warning(&format!(
                "MoveAgentRequest {} → {:?} rejected: {}",
                request.agent, request.target, error
            ));
        }
    }
}

/// Система: один steering тик для всех агентов
///
/// delta берётся из Time<Fixed>, но шаг агента фиксирован (speed за тик).
pub fn tick_navigation(
    mut navigation: ResMut<Navigation>,
    time: Res<Time<Fixed>>,
    mut arrived_events: EventWriter<AgentArrived>,
) {
    let before: Vec<(AgentId, AgentState)> = navigation
        .agent_ids()
        .filter_map(|id| navigation.agent(id).map(|agent| (id, agent.state())))
        .collect();

    navigation.update(time.delta_secs());

    for (id, previous) in before {
        let Some(agent) = navigation.agent(id) else {
            continue;
        };
        if previous == AgentState::Moving && agent.state() == AgentState::Idle {
            let position = navigation
                .agent_transform(id)
                .map(|transform| transform.translation)
                .unwrap_or_default();
            arrived_events.write(AgentArrived { agent: id, position });
        }
    }
}

/// Система: копирование transform агентов в связанные entities
pub fn sync_agent_transforms(navigation: Res<Navigation>, mut query: Query<(&NavAgentLink, &mut Transform)>) {
    for (link, mut transform) in query.iter_mut() {
        let Some(agent_transform) = navigation.agent_transform(link.0) else {
            continue;
        };
        // Проверка перед записью — иначе Changed<Transform> срабатывает каждый тик
        if *transform != *agent_transform {
            *transform = *agent_transform;
        }
    }
}
