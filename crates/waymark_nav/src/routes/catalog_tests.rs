//! Tests for PathCatalog enumeration and queries.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    use crate::config::GraphConfig;
    use crate::graph::{Anchor, NodeGraph, NodeId};
    use crate::routes::PathCatalog;

    fn baked(points: &[Vec3], connect_distance: f32) -> (NodeGraph, PathCatalog, Vec<NodeId>) {
        let mut graph = NodeGraph::new(connect_distance);
        let ids = points
            .iter()
            .map(|&p| graph.add_node(Anchor::point(p)))
            .collect();
        graph.calculate_node_connections();

        let mut catalog = PathCatalog::new();
        catalog.calculate_paths(&graph);
        (graph, catalog, ids)
    }

    fn chain() -> (NodeGraph, PathCatalog, Vec<NodeId>) {
        baked(
            &[Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
            6.0,
        )
    }

    /// Прямоугольник 4x3 без диагоналей
    ///
    /// ```text
    /// 0 (0,0,0) ── 1 (4,0,0)
    /// │            │
    /// 3 (0,0,3) ── 2 (4,0,3)
    /// ```
    fn square() -> (NodeGraph, PathCatalog, Vec<NodeId>) {
        // half_extent = 1.0: сторона 3 → зазор 1, сторона 4 → 2, диагональ 5 → 3
        let mut graph = NodeGraph::new(2.0);
        let ids = [
            Vec3::ZERO,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 3.0),
        ]
        .into_iter()
        .map(|p| graph.add_node(Anchor::new(p, Vec3::new(1.0, 0.0, 0.0))))
        .collect();
        graph.calculate_node_connections();

        let mut catalog = PathCatalog::new();
        catalog.calculate_paths(&graph);
        (graph, catalog, ids)
    }

    #[test]
    fn test_chain_routes() {
        let (_, catalog, ids) = chain();

        let sequences: Vec<&[NodeId]> = catalog.routes().iter().map(|r| r.nodes()).collect();
        assert_eq!(catalog.len(), 6);
        assert!(sequences.contains(&[ids[0], ids[1], ids[2]].as_slice()));
        assert!(sequences.contains(&[ids[2], ids[1], ids[0]].as_slice()));
        assert!(!sequences.contains(&[ids[0], ids[2]].as_slice()));
    }

    #[test]
    fn test_find_path_returns_whole_route() {
        let (graph, catalog, ids) = chain();

        let path = catalog.find_path(ids[0], ids[2], &graph).unwrap();
        assert_eq!(
            path,
            vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_find_path_ignores_direction() {
        let (graph, catalog, ids) = chain();

        // Membership lookup: первый маршрут длины 5 с обеими нодами — [0, 1]
        let path = catalog.find_path(ids[1], ids[0], &graph).unwrap();
        assert_eq!(path, vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_find_shortest_path_is_directed_and_trimmed() {
        let (graph, catalog, ids) = chain();

        let forward = catalog.find_shortest_path(ids[2], ids[1], &graph).unwrap();
        assert_eq!(forward, vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)]);

        let backward = catalog.find_shortest_path(ids[2], ids[0], &graph).unwrap();
        assert_eq!(backward.len(), 3);
        assert_eq!(backward[0], Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(backward[2], Vec3::ZERO);
    }

    #[test]
    fn test_find_shortest_path_same_node() {
        let (graph, catalog, ids) = chain();

        let path = catalog.find_shortest_path(ids[1], ids[1], &graph).unwrap();
        assert_eq!(path, vec![Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_find_shortest_ranks_by_trimmed_length() {
        let (graph, catalog, ids) = square();

        // Диагоналей нет
        assert!(!graph.are_connected(ids[0], ids[2]));
        assert!(!graph.are_connected(ids[1], ids[3]));

        // 0→1: напрямую 4 против 3 + 4 + 3 = 10 в обход
        let route = catalog.find_shortest_route(ids[0], ids[1], &graph).unwrap();
        assert_eq!(route.nodes(), &[ids[0], ids[1]]);
        assert!((route.length() - 4.0).abs() < 1e-5);

        // 3→1: через 0 или через 2, оба по 7
        let route = catalog.find_shortest_route(ids[3], ids[1], &graph).unwrap();
        assert_eq!(route.len(), 3);
        assert!((route.length() - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_disconnected_clusters_have_no_route() {
        let (graph, catalog, ids) = baked(
            &[
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(500.0, 0.0, 0.0),
                Vec3::new(501.0, 0.0, 0.0),
            ],
            2.0,
        );

        assert!(catalog.find_shortest_path(ids[0], ids[3], &graph).is_none());
        assert!(catalog.find_path(ids[1], ids[2], &graph).is_none());
        assert!(catalog.find_shortest_path(ids[2], ids[3], &graph).is_some());
    }

    #[test]
    fn test_empty_graph_has_no_routes() {
        let graph = NodeGraph::new(1.0);
        let mut catalog = PathCatalog::new();
        catalog.calculate_paths(&graph);

        assert!(catalog.is_empty());
    }

    #[test]
    fn test_recalculation_replaces_routes() {
        let (mut graph, mut catalog, ids) = chain();
        assert_eq!(catalog.len(), 6);

        graph.remove_node(ids[2]);
        graph.calculate_node_connections();
        catalog.calculate_paths(&graph);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.routes().iter().all(|r| !r.contains(ids[2])));
    }

    #[test]
    fn test_removed_node_before_bake_is_query_miss() {
        let (mut graph, catalog, ids) = chain();

        graph.remove_node(ids[1]);
        // Каталог ещё ссылается на удалённую ноду — позиции не резолвятся
        assert!(catalog.find_shortest_path(ids[0], ids[2], &graph).is_none());
    }

    #[test]
    fn test_max_route_nodes_bounds_enumeration() {
        let config = GraphConfig {
            connect_distance: 6.0,
            max_route_nodes: Some(2),
        };
        let mut graph = NodeGraph::with_config(&config);
        for x in [0.0, 5.0, 10.0, 15.0] {
            graph.add_node(Anchor::point(Vec3::new(x, 0.0, 0.0)));
        }
        graph.calculate_node_connections();

        let mut catalog = PathCatalog::with_config(&config);
        catalog.calculate_paths(&graph);

        assert_eq!(catalog.max_route_nodes(), Some(2));
        assert_eq!(catalog.len(), 6); // только рёбра в обе стороны
        assert!(catalog.routes().iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_route_invariants_random_layouts() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..10 {
            let points: Vec<Vec3> = (0..7)
                .map(|_| Vec3::new(rng.gen_range(0.0..20.0), 0.0, rng.gen_range(0.0..20.0)))
                .collect();
            let (graph, catalog, _) = baked(&points, rng.gen_range(3.0..8.0));

            let mut seen = HashSet::new();
            let mut previous_length = 0.0;

            for route in catalog.routes() {
                // Validity: ≥2 разных нод, соседние пары смежны
                assert!(route.len() >= 2);
                let unique: HashSet<_> = route.nodes().iter().collect();
                assert_eq!(unique.len(), route.len());
                for pair in route.nodes().windows(2) {
                    assert!(graph.are_connected(pair[0], pair[1]));
                }

                // Uniqueness
                assert!(seen.insert(route.nodes().to_vec()));

                // Ordering
                assert!(route.length() >= previous_length);
                previous_length = route.length();
            }
        }
    }
}
