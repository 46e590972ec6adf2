//! Anchor: пространственный объект ноды (позиция + bounding box)

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

/// Spatial anchor ноды графа.
///
/// Host владеет реальным объектом сцены; здесь копия того, что нужно для bake:
/// world position и world-space AABB. Позиция не обязана совпадать с центром box'а.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
    pub bounds: Aabb3d,
}

impl Anchor {
    /// Anchor с box'ом `half_size` вокруг позиции
    pub fn new(position: Vec3, half_size: Vec3) -> Self {
        Self {
            position,
            bounds: Aabb3d::new(position, half_size),
        }
    }

    /// Точечный anchor (box нулевого размера)
    pub fn point(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    pub fn with_bounds(position: Vec3, bounds: Aabb3d) -> Self {
        Self { position, bounds }
    }

    /// Половина диагонали AABB
    pub fn half_extent(&self) -> f32 {
        let size = Vec3::from(self.bounds.max) - Vec3::from(self.bounds.min);
        size.length() / 2.0
    }

    /// Зазор между anchors: расстояние центров минус half extents обоих
    pub fn gap_to(&self, other: &Anchor) -> f32 {
        // Сумма extents одним слагаемым: результат не зависит от порядка a/b
        self.position.distance(other.position) - (self.half_extent() + other.half_extent())
    }
}

impl From<Vec3> for Anchor {
    fn from(position: Vec3) -> Self {
        Self::point(position)
    }
}
