//! Agent domain — steering одного агента по очереди waypoints
//!
//! Agent не владеет позицией: update мутирует переданный Transform
//! (bound объект, который читает рендер).

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::config::AgentConfig;


/// Производное состояние агента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AgentState {
    /// Нет destination, очередь пуста
    Idle,
    /// Нет destination, следующий waypoint заберётся на ближайшем update
    Queued,
    /// Движется к destination
    Moving,
}

/// Steering агента: destination, velocity и FIFO очередь waypoints.
///
/// Инвариант: `has_destination` == true пока destination задана и агент
/// ещё не подошёл ближе stopping_distance.
#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    destination: Vec3,
    velocity: Vec3,
    has_destination: bool,
    path: VecDeque<Vec3>,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            destination: Vec3::ZERO,
            velocity: Vec3::ZERO,
            has_destination: false,
            path: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Один тик steering.
    ///
    /// `delta` не масштабирует шаг: агент проходит `speed` units за тик
    /// независимо от длительности тика.
    pub fn update(&mut self, transform: &mut Transform, _delta: f32) {
        if !self.has_destination {
            // Waypoint забирается отдельным тиком, движение начнётся на следующем
            self.set_next_waypoint();
            return;
        }

        let distance = transform.translation.distance(self.destination);
        if distance < self.config.stopping_distance {
            self.arrive();
            return;
        }

        // stopping_distance = 0 и агент ровно в точке: направления нет
        let Some(direction) = (self.destination - transform.translation).try_normalize() else {
            self.arrive();
            return;
        };

        self.velocity = direction * self.config.speed;
        transform.translation += self.velocity;

        if self.config.look_at {
            transform.look_at(self.destination, Vec3::Y);
        }
    }

    fn set_next_waypoint(&mut self) {
        if let Some(next) = self.path.pop_front() {
            self.set_destination(next);
        }
    }

    fn arrive(&mut self) {
        self.has_destination = false;
        self.velocity = Vec3::ZERO;
    }

    /// Одиночная цель (без проверки достижимости)
    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = destination;
        self.has_destination = true;
    }

    /// Заменяет очередь waypoints. Destination не трогается.
    pub fn set_path(&mut self, points: impl IntoIterator<Item = Vec3>) {
        self.path.clear();
        self.path.extend(points);
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    /// Сбрасывает destination, очередь остаётся.
    ///
    /// Следующий update заберёт очередной waypoint, если он есть.
    pub fn stop(&mut self) {
        self.arrive();
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn path(&self) -> &VecDeque<Vec3> {
        &self.path
    }

    pub fn has_destination(&self) -> bool {
        self.has_destination
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn state(&self) -> AgentState {
        match (self.has_destination, self.has_path()) {
            (true, _) => AgentState::Moving,
            (false, true) => AgentState::Queued,
            (false, false) => AgentState::Idle,
        }
    }
}
