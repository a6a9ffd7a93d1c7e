use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use salvo::prelude::*;
use salvo::{ShotResult, TOTAL_SHIP_CELLS};

fn random_grid(seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    random_fleet(&mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleets_are_valid(seed in any::<u64>()) {
        let grid = random_grid(seed);
        prop_assert_eq!(grid.ship_tile_count(), TOTAL_SHIP_CELLS);
        prop_assert!(is_fleet_valid(&grid));

        let mut lens: Vec<usize> = extract_ships(&grid).iter().map(|s| s.len()).collect();
        lens.sort_unstable();
        prop_assert_eq!(lens, vec![2, 3, 3, 4, 5]);
    }

    #[test]
    fn valid_fleets_have_no_diagonal_contact(seed in any::<u64>()) {
        let grid = random_grid(seed);
        for at in grid.ship_tiles() {
            prop_assert!(!grid.is_diagonally_adjacent_to_ship(at));
        }
    }

    #[test]
    fn diagonal_check_matches_definition(cells in proptest::collection::vec((0usize..10, 0usize..10), 0..20),
                                         x in 0usize..10, y in 0usize..10) {
        let grid = Grid::with_ships(cells.iter().filter_map(|&(cx, cy)| Coord::from_indices(cx, cy)));
        let at = Coord::from_indices(x, y).unwrap();
        let expected = [(-1isize, -1isize), (-1, 1), (1, -1), (1, 1)].iter().any(|&(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            (0..10).contains(&nx) && (0..10).contains(&ny)
                && cells.contains(&(nx as usize, ny as usize))
        });
        prop_assert_eq!(grid.is_diagonally_adjacent_to_ship(at), expected);
    }

    #[test]
    fn dropping_any_cell_invalidates(seed in any::<u64>(), pick in 0usize..TOTAL_SHIP_CELLS) {
        let mut grid = random_grid(seed);
        let at = grid.ship_tiles()[pick];
        grid.toggle_ship(at);
        prop_assert!(!is_fleet_valid(&grid));
    }

    #[test]
    fn repeat_shot_changes_nothing(seed in any::<u64>(), x in 0usize..10, y in 0usize..10) {
        let mut defender = random_grid(seed);
        let mut view = Grid::new();
        let at = Coord::from_indices(x, y).unwrap();
        fire(&mut defender, &mut view, at).unwrap();
        let snapshot = (defender, view);
        prop_assert!(fire(&mut defender, &mut view, at).is_err());
        prop_assert_eq!((defender, view), snapshot);
    }

    #[test]
    fn view_never_shows_unshot_ships(seed in any::<u64>(), shots in proptest::collection::vec((0usize..10, 0usize..10), 1..60)) {
        let mut defender = random_grid(seed);
        let mut view = Grid::new();
        for (x, y) in shots {
            let at = Coord::from_indices(x, y).unwrap();
            let _ = fire(&mut defender, &mut view, at);
        }
        for (at, seen) in view.iter() {
            if seen.is_untouched() {
                prop_assert_eq!(seen, Cell::EMPTY);
            } else {
                prop_assert_eq!(seen, defender.get(at));
            }
        }
    }

    #[test]
    fn full_game_ends_after_all_ship_cells(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        let (alice, bob) = (PlayerId(1), PlayerId(2));
        let mut game = Match::new("55555".parse().unwrap());
        game.join(alice).unwrap();
        game.join(bob).unwrap();
        for (player, seed) in [(alice, seed_a), (bob, seed_b)] {
            for at in random_grid(seed).ship_tiles() {
                game.place_ship(player, at.x() as i32, at.y() as i32).unwrap();
            }
            game.ready(player).unwrap();
        }
        prop_assert_eq!(game.phase(), Phase::Playing);

        // Alice sweeps the board; Bob always fires at the next cell of his own sweep.
        let mut alice_targets = Coord::all();
        let mut bob_targets = Coord::all();
        let mut hits = 0;
        while game.phase() == Phase::Playing {
            let (shooter, targets) = if game.current_turn() == 0 {
                (alice, &mut alice_targets)
            } else {
                (bob, &mut bob_targets)
            };
            let at = targets.next().unwrap();
            if let Ok(notes) = game.shoot(shooter, at.x() as i32, at.y() as i32) {
                prop_assert!(!notes.is_empty());
            }
            if shooter == alice && game.player(bob).unwrap().own.get(at).is_ship() {
                hits += 1;
            }
        }
        prop_assert_eq!(game.phase(), Phase::End);
        prop_assert!(hits <= TOTAL_SHIP_CELLS);
        let loser_left = game.players().iter().map(|p| p.own.remaining_ship_tiles()).min();
        prop_assert_eq!(loser_left, Some(0));
    }
}

#[test]
fn random_fleet_is_reproducible() {
    assert_eq!(random_grid(7), random_grid(7));
    let sunk = {
        let mut defender = random_grid(7);
        let mut view = Grid::new();
        let ship = extract_ships(&defender).into_iter().next().unwrap();
        let mut last = None;
        for at in ship.coords() {
            last = Some(fire(&mut defender, &mut view, at).unwrap().result);
        }
        last.unwrap()
    };
    assert!(matches!(sunk, ShotResult::Sunk(_)));
}
