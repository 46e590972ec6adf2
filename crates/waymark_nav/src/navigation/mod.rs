//! Navigation domain — facade сессии и Bevy интеграция
//!
//! Содержит:
//! - Navigation (Resource: NodeGraph + PathCatalog + реестр агентов)
//! - AgentId / AgentOptions
//! - MoveAgentRequest / BakeRequest / AgentArrived (events)
//! - NavAgentLink + системы FixedUpdate
//!
//! Facade работает и без Bevy App (прямые вызовы add_agent/bake/update);
//! NavigationPlugin только прокидывает events и Time<Fixed>.

use bevy::prelude::*;

pub mod events;
pub mod session;
pub mod systems;


pub use events::*;
pub use session::*;
pub use systems::*;

use crate::config::NavigationConfig;

/// Navigation Plugin
///
/// Регистрирует Navigation resource, events и системы в FixedUpdate.
/// Порядок выполнения — см. systems.rs.
#[derive(Default)]
pub struct NavigationPlugin {
    pub config: NavigationConfig,
}

impl NavigationPlugin {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Navigation::new(self.config.clone()))
            .register_type::<NavAgentLink>()
            .add_event::<MoveAgentRequest>()
            .add_event::<BakeRequest>()
            .add_event::<AgentArrived>()
            .add_systems(
                FixedUpdate,
                (
                    handle_bake_requests,
                    handle_move_requests,
                    tick_navigation,
                    sync_agent_transforms,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
