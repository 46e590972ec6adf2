//! Routes domain — каталог маршрутов поверх NodeGraph
//!
//! Bake пересобирает каталог целиком; запросы (find_path, find_shortest_path)
//! только читают его.

pub mod catalog;

#[cfg(test)]
mod catalog_tests;

pub use catalog::*;
