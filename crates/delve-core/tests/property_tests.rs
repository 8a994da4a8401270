use proptest::prelude::*;

use delve_core::algorithm::{Edge, UnionFind, minimum_spanning_tree};
use delve_core::dungeon::{Dungeon, Point};
use delve_core::{CorridorType, DungeonConfig, DungeonGenerator};

fn corridor_type() -> impl Strategy<Value = CorridorType> {
    prop_oneof![
        Just(CorridorType::Direct),
        Just(CorridorType::Bsp),
        Just(CorridorType::Mst),
    ]
}

prop_compose! {
    fn config()(
        width in 20_i32..120,
        height in 20_i32..120,
        min_room_size in 2_i32..12,
        min_split_size in 6_i32..30,
        max_split_depth in 0_i32..6,
        room_count in 0_usize..20,
        corridor_type in corridor_type(),
        seed in any::<u64>(),
    ) -> DungeonConfig {
        DungeonConfig {
            width,
            height,
            min_room_size,
            min_split_size,
            max_split_depth,
            room_count,
            corridor_type,
            seed,
            ..Default::default()
        }
    }
}

fn generate(config: DungeonConfig) -> Dungeon {
    DungeonGenerator::new(config).unwrap().generate()
}

/// Total weight of the cheapest spanning tree, by trying every edge subset
fn brute_force_mst_weight(n: usize, edges: &[Edge]) -> f64 {
    let mut best = f64::INFINITY;
    for mask in 0_u32..(1 << edges.len()) {
        if mask.count_ones() as usize != n - 1 {
            continue;
        }
        let mut sets = UnionFind::new(n);
        let mut weight = 0.0;
        let mut acyclic = true;
        for (i, edge) in edges.iter().enumerate() {
            if mask & (1 << i) != 0 {
                acyclic &= sets.union(edge.from, edge.to);
                weight += edge.weight;
            }
        }
        if acyclic && weight < best {
            best = weight;
        }
    }
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generation_is_deterministic(config in config()) {
        let a = generate(config.clone());
        let b = generate(config);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn rooms_never_overlap(config in config()) {
        let dungeon = generate(config);
        for (i, a) in dungeon.rooms.iter().enumerate() {
            prop_assert_eq!(a.id, i);
            for b in &dungeon.rooms[i + 1..] {
                prop_assert!(!a.rect.overlaps(&b.rect), "{:?} / {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn room_graph_is_symmetric(config in config()) {
        let dungeon = generate(config);
        prop_assert!(dungeon.graph.is_symmetric());
        for a in 0..dungeon.rooms.len() {
            for &b in dungeon.adjacent_rooms(a) {
                prop_assert!(dungeon.adjacent_rooms(b).contains(&a));
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn exit_reachable_after_repair(config in config()) {
        let dungeon = generate(config);
        match (dungeon.start_room, dungeon.end_room) {
            (Some(start), Some(end)) => {
                let path = dungeon.find_path(start, end);
                prop_assert!(path.is_some());
                let path = path.unwrap();
                prop_assert_eq!(path.first(), Some(&start));
                prop_assert_eq!(path.last(), Some(&end));
                for pair in path.windows(2) {
                    prop_assert!(dungeon.graph.contains_edge(pair[0], pair[1]));
                }
            }
            _ => prop_assert!(dungeon.rooms.is_empty()),
        }
    }

    #[test]
    fn every_room_is_typed(config in config()) {
        let dungeon = generate(config);
        prop_assert_eq!(dungeon.area_types.len(), dungeon.rooms.len());
        if !dungeon.rooms.is_empty() {
            prop_assert_eq!(
                dungeon.area_types.count(delve_core::dungeon::AreaType::Entrance),
                1
            );
        }
    }

    #[test]
    fn mst_strategy_makes_n_minus_one_corridors(mut config in config()) {
        config.corridor_type = CorridorType::Mst;
        let dungeon = generate(config);
        let n = dungeon.rooms.len();
        prop_assert_eq!(dungeon.corridors.len(), n.saturating_sub(1));
        prop_assert!(!dungeon.repaired);
        prop_assert!(dungeon.graph.is_connected());
    }

    #[test]
    fn mst_weight_is_minimal(
        points in prop::collection::vec((0_i32..50, 0_i32..50), 2..=6),
    ) {
        let points: Vec<Point> = points.into_iter().map(Point::from).collect();
        let n = points.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                edges.push(Edge::new(i, j, points[i].distance(points[j])));
            }
        }

        let mst = minimum_spanning_tree(n, edges.clone());
        prop_assert_eq!(mst.len(), n - 1);
        let weight: f64 = mst.iter().map(|e| e.weight).sum();
        let best = brute_force_mst_weight(n, &edges);
        prop_assert!((weight - best).abs() < 1e-9, "{} vs {}", weight, best);
    }

    #[test]
    fn union_find_tracks_components(
        n in 1_usize..40,
        pairs in prop::collection::vec((0_usize..40, 0_usize..40), 0..60),
    ) {
        let mut sets = UnionFind::new(n);
        let mut label: Vec<usize> = (0..n).collect();

        for (a, b) in pairs.into_iter().filter(|&(a, b)| a < n && b < n) {
            let joined = label[a] != label[b];
            prop_assert_eq!(sets.union(a, b), joined);
            if joined {
                let (from, to) = (label[b], label[a]);
                for l in &mut label {
                    if *l == from {
                        *l = to;
                    }
                }
            }
        }

        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(sets.connected(a, b), label[a] == label[b]);
            }
        }
        let mut distinct = label.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(sets.set_count(), distinct.len());
    }
}
