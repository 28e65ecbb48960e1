// Property-based tests for coordinate wrapping, move planning and framing.

use ant_forager::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// A step followed by its reverse lands where it started, edges included.
    #[test]
    fn prop_step_and_reverse_cancel(
        col in -1000i32..1000,
        row in -1000i32..1000,
        width in 1i32..64,
        height in 1i32..64,
        dir in direction(),
    ) {
        let c = Coordinate::new(col, row);
        let there = c.apply_direction(dir).normalize(width, height);
        let back = there.apply_direction(dir.reverse()).normalize(width, height);

        prop_assert_eq!(back, c.normalize(width, height));
        prop_assert!(there.in_bounds(width, height));
    }

    /// Planned destinations are unique and never walls, turn after turn.
    #[test]
    fn prop_no_collisions(
        width in 2i32..10,
        height in 2i32..10,
        cells in prop::collection::vec((0i32..10, 0i32..10, 0u8..5), 1..60),
        seed in any::<u64>(),
        turns in 1usize..6,
    ) {
        let mut world = World::new(width, height).unwrap();
        let mut ant_cells = HashSet::new();
        for (col, row, kind) in cells {
            let c = Coordinate::new(col, row).normalize(width, height);
            match kind {
                0 => world.report_wall(c),
                1 => world.report_food(c),
                2 => world.report_enemy(c),
                _ => { ant_cells.insert(c); }
            }
        }
        for c in &ant_cells {
            if !world.is_wall(*c) {
                world.report_living_ant(*c);
            }
        }
        let mut rng = fastrand::Rng::with_seed(seed);
        let planner = MovePlanner::default();

        for _ in 0..turns {
            let before = world.ant_count();
            let positions: Vec<Coordinate> = world.ants().map(|(p, _)| *p).collect();

            let plan = planner.plan(&mut world, &mut rng);

            prop_assert_eq!(world.ant_count(), before);
            let mut seen = HashSet::new();
            for mv in &plan.moves {
                prop_assert!(seen.insert(mv.to), "two ants sent to {}", mv.to);
                prop_assert!(!world.is_wall(mv.to));
                prop_assert_eq!(world.step(mv.from, mv.direction), mv.to);
            }
            for (p, _) in world.ants() {
                prop_assert!(!world.is_wall(*p));
                prop_assert!(p.in_bounds(width, height));
            }

            // the server confirms every move
            let moved: Vec<Coordinate> = world.ants().map(|(p, _)| *p).collect();
            prop_assert_eq!(moved.len(), positions.len());
            world.begin_round();
            for p in moved {
                world.report_living_ant(p);
            }
            prop_assert_eq!(world.end_round(), 0);
        }
    }

    /// Any chunking of a stream yields the same frames.
    #[test]
    fn prop_frames_survive_any_chunking(
        payloads in prop::collection::vec("[a-z{}:,\"0-9]{0,12}", 0..8),
        chunk in 1usize..16,
    ) {
        let mut stream = Vec::new();
        for p in &payloads {
            stream.extend_from_slice(p.as_bytes());
            stream.push(b'\n');
        }

        let mut reader = FrameReader::default();
        let mut frames = Vec::new();
        for piece in stream.chunks(chunk) {
            frames.extend(reader.feed(piece));
        }

        let expected: Vec<Vec<u8>> = payloads.iter().map(|p| p.as_bytes().to_vec()).collect();
        prop_assert_eq!(frames, expected);
        prop_assert_eq!(reader.pending(), 0);
    }

    /// Frames over the size limit are dropped the same way wherever the reads split.
    #[test]
    fn prop_size_limit_ignores_chunking(
        payloads in prop::collection::vec("[a-z0-9]{0,10}", 0..10),
        limit in 1usize..8,
        chunk in 1usize..16,
    ) {
        let mut stream = Vec::new();
        for p in &payloads {
            stream.extend_from_slice(p.as_bytes());
            stream.push(b'\n');
        }

        let mut reader = FrameReader::new(limit);
        let mut frames = Vec::new();
        for piece in stream.chunks(chunk) {
            frames.extend(reader.feed(piece));
        }

        let expected: Vec<Vec<u8>> = payloads
            .iter()
            .filter(|p| p.len() <= limit)
            .map(|p| p.as_bytes().to_vec())
            .collect();
        let dropped: usize = payloads.iter().filter(|p| p.len() > limit).map(|p| p.len()).sum();
        prop_assert_eq!(frames, expected);
        prop_assert_eq!(reader.discarded_bytes(), dropped as u64);
        prop_assert_eq!(reader.pending(), 0);
    }
}
