//! Tests for the bounded-window greedy assigner

#[cfg(test)]
mod tests {
    use pixel_reassign::algorithm::greedy::{GreedyAssigner, SlotPick, greedy_assignment};
    use pixel_reassign::color::{Color, squared_distance};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::opaque(r, g, b)
    }

    fn random_colors(rng: &mut StdRng, n: usize) -> Vec<Color> {
        (0..n)
            .map(|_| rgb(rng.random(), rng.random(), rng.random()))
            .collect()
    }

    // Tests the hand-computed 2x2 scenario with an exhaustive window
    // Verified by breaking ties toward the highest index
    #[test]
    fn test_two_by_two_nearest_available() {
        let target = [rgb(0, 0, 0), rgb(255, 255, 255), rgb(10, 10, 10), rgb(245, 245, 245)];
        let source = [rgb(12, 8, 9), rgb(250, 248, 247), rgb(1, 1, 1), rgb(254, 254, 254)];

        let mut greedy = GreedyAssigner::new(&source, &target, 4);
        let picks: Vec<SlotPick> = std::iter::from_fn(|| greedy.assign_next()).collect();
        assert_eq!(
            picks,
            vec![
                SlotPick::Windowed(2),
                SlotPick::Windowed(3),
                SlotPick::Windowed(0),
                SlotPick::Windowed(1),
            ]
        );
        assert_eq!(greedy.pool().used_count(), 4);
        assert!(greedy.is_finished());
    }

    // Tests equal-cost candidates resolve to the lowest source index
    // Verified by using <= in the comparison
    #[test]
    fn test_ties_go_to_lowest_index() {
        let source = [rgb(9, 9, 9), rgb(11, 11, 11), rgb(9, 9, 9)];
        let target = [rgb(10, 10, 10), rgb(10, 10, 10), rgb(10, 10, 10)];
        let assignment = greedy_assignment(&source, &target, 3);
        assert_eq!(assignment.as_slice(), &[Some(0), Some(1), Some(2)]);
    }

    // Tests a window of one takes the first unused pixel every time
    // Verified by scanning the whole pool regardless of window
    #[test]
    fn test_window_of_one_is_scan_order() {
        let source = [rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255)];
        let target = [rgb(0, 0, 255), rgb(0, 255, 0), rgb(255, 0, 0)];
        let assignment = greedy_assignment(&source, &target, 1);
        assert_eq!(assignment.to_permutation(), Some(vec![0, 1, 2]));
    }

    // Tests the window only counts unused candidates
    // Verified by counting used pixels toward the window
    #[test]
    fn test_window_counts_only_unused() {
        let source = [rgb(0, 0, 0), rgb(100, 100, 100), rgb(200, 200, 200), rgb(50, 50, 50)];
        let target = [rgb(0, 0, 0), rgb(60, 60, 60), rgb(0, 0, 0), rgb(0, 0, 0)];
        let mut greedy = GreedyAssigner::new(&source, &target, 2);

        assert_eq!(greedy.assign_next(), Some(SlotPick::Windowed(0)));
        // Window now covers sources 1 and 2; source 3 is closer but out of reach
        assert_eq!(greedy.assign_next(), Some(SlotPick::Windowed(1)));
        assert_eq!(greedy.next_slot(), 2);
    }

    // Tests a zero window is raised to one
    // Verified by allowing a zero window
    #[test]
    fn test_zero_window_raised() {
        let source = [rgb(1, 1, 1)];
        let target = [rgb(1, 1, 1)];
        let greedy = GreedyAssigner::new(&source, &target, 0);
        assert_eq!(greedy.window(), 1);
    }

    // Tests the single-pixel case
    // Verified by skipping assignment when the window equals the pool
    #[test]
    fn test_single_pixel() {
        let source = [rgb(7, 8, 9)];
        let target = [rgb(200, 100, 0)];
        let assignment = greedy_assignment(&source, &target, 1);
        assert_eq!(assignment.source_of(0), Some(0));
    }

    // Tests an exhausted pool falls back to the slot's own color without reuse
    // Verified by reassigning the last used pixel on exhaustion
    #[test]
    fn test_exhausted_pool_uses_target_color() {
        let source = [rgb(1, 1, 1), rgb(2, 2, 2)];
        let target = [rgb(1, 1, 1), rgb(2, 2, 2), rgb(3, 3, 3)];
        let mut greedy = GreedyAssigner::new(&source, &target, 10);

        greedy.assign_next();
        greedy.assign_next();
        assert_eq!(greedy.assign_next(), Some(SlotPick::TargetColor));
        assert_eq!(greedy.assign_next(), None);
        assert_eq!(greedy.stats().target_color_fills, 1);

        let assignment = greedy.into_assignment();
        assert_eq!(assignment.target_color_fills(), 1);
        assert!(assignment.is_injective(source.len()));
        assert_eq!(assignment.render(&source, &target)[2], rgb(3, 3, 3));
    }

    // Tests later slots degrade once the best candidates are consumed
    // Verified by sorting candidates before selection
    #[test]
    fn test_costs_degrade_as_pool_is_consumed() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut levels: Vec<u8> = (0..64).map(|v| v * 4).collect();
        levels.shuffle(&mut rng);
        let source: Vec<Color> = levels.iter().map(|&v| rgb(v, v, v)).collect();
        let target = vec![rgb(0, 0, 0); source.len()];

        let assignment = greedy_assignment(&source, &target, source.len());
        let costs: Vec<u32> = assignment
            .render(&source, &target)
            .iter()
            .map(|&c| squared_distance(c, rgb(0, 0, 0)))
            .collect();

        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(costs.first(), Some(&0));
        assert!(costs.last() > costs.first());
    }

    // Tests random runs always produce a total, injective, repeatable assignment
    // Verified by skipping the used marker update
    #[test]
    fn test_random_runs_total_injective_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let n = rng.random_range(0..80);
            let source = random_colors(&mut rng, n);
            let target = random_colors(&mut rng, n);
            let window = rng.random_range(1..=n.max(1));

            let first = greedy_assignment(&source, &target, window);
            let second = greedy_assignment(&source, &target, window);

            assert_eq!(first.len(), n);
            assert_eq!(first.target_color_fills(), 0);
            assert!(first.is_injective(n));
            assert_eq!(first, second);
        }
    }

    // Tests every slot is filled from the window when sizes match
    // Verified by recording every pick as a target color fill
    #[test]
    fn test_stats_all_windowed_on_equal_sizes() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = random_colors(&mut rng, 30);
        let target = random_colors(&mut rng, 30);
        let mut greedy = GreedyAssigner::new(&source, &target, 5);
        while greedy.assign_next().is_some() {}

        let stats = greedy.stats();
        assert_eq!(stats.windowed, 30);
        assert_eq!(stats.target_color_fills, 0);
    }

    // Tests a narrow window still reaches unused pixels behind a used prefix
    // Verified by counting used pixels toward the window
    #[test]
    fn test_narrow_window_reaches_past_used_prefix() {
        let source = [rgb(0, 0, 0), rgb(10, 10, 10), rgb(20, 20, 20), rgb(30, 30, 30)];
        let target = [rgb(30, 30, 30); 4];
        let mut greedy = GreedyAssigner::new(&source, &target, 1);

        let picks: Vec<SlotPick> = std::iter::from_fn(|| greedy.assign_next()).collect();
        assert_eq!(
            picks,
            vec![
                SlotPick::Windowed(0),
                SlotPick::Windowed(1),
                SlotPick::Windowed(2),
                SlotPick::Windowed(3),
            ]
        );
        assert_eq!(greedy.stats().target_color_fills, 0);
    }
}
