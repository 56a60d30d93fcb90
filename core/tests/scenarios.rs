use std::collections::HashSet;

use minesweeper_core::*;

fn mines_of(board: &GameBoard) -> HashSet<Coord2> {
    board
        .cells()
        .filter(|cell| cell.is_mine())
        .map(Cell::position)
        .collect()
}

#[test]
fn placement_is_exact_and_distinct_for_every_shape() {
    for width in 1..=10 {
        for height in 1..=10 {
            let max = width * height - 1;
            for requested in [0, 1, max / 2, max, max + 1] {
                let mut board = GameBoard::new(u64::from((width * 31 + height) as u32));
                let config = board.configure(width, height, requested);
                let expected = requested.min(max);
                assert_eq!(i64::from(config.mines), expected, "{width}x{height} with {requested}");
                board.place_mines().unwrap();

                let placed = mines_of(&board);
                assert_eq!(placed.len() as i64, expected, "{width}x{height} with {requested}");
                assert_eq!(i64::from(board.mine_count()), expected);
                assert!(placed.iter().all(|&(x, y)| i64::from(x) < width && i64::from(y) < height));
            }
        }
    }
}

#[test]
fn hitting_a_mine_is_local() {
    for seed in 0..64 {
        let mut board = GameBoard::new(seed);
        board.configure(6, 6, 12);
        board.place_mines().unwrap();
        let mine = *mines_of(&board).iter().next().unwrap();

        let result = board.reveal(mine).unwrap();

        assert!(result.triggered_mine);
        let revealed: Vec<_> = board.cells().filter(|cell| cell.is_revealed()).collect();
        assert_eq!(revealed.len(), 1);
        assert_eq!(revealed[0].position(), mine);
        assert_eq!(board.state(), GameState::Lost);
    }
}

#[test]
fn zero_cell_reveals_all_safe_neighbors() {
    for mode in [CascadeMode::FloodFill, CascadeMode::SingleRing] {
        for seed in 0..64 {
            let mut board = GameBoard::new(seed).with_cascade_mode(mode);
            board.configure(8, 8, 8);
            board.place_mines().unwrap();

            let Some(zero) = board
                .cells()
                .find(|cell| !cell.is_mine() && board.count_adjacent_mines(cell.position()) == Ok(0))
                .map(Cell::position)
            else {
                continue;
            };

            board.reveal(zero).unwrap();
            let neighbor_cells: Vec<_> = board
                .cells()
                .filter(|cell| cell.is_adjacent_to(board.cell(zero).unwrap()))
                .collect();

            assert!(!neighbor_cells.is_empty());
            for cell in neighbor_cells {
                assert!(!cell.is_mine());
                assert!(cell.is_revealed(), "{:?} hidden next to {:?}", cell.position(), zero);
            }
        }
    }
}

#[test]
fn first_click_in_corner_cascades_with_correct_counts() {
    let mut exercised = false;
    for seed in 0..256 {
        let mut board = GameBoard::new(seed);
        board.configure(8, 8, 8);
        board.place_mines().unwrap();

        let corner = board.cell_state((0, 0)).unwrap();
        if corner.is_mine || board.count_adjacent_mines((0, 0)) != Ok(0) {
            continue;
        }
        exercised = true;

        let result = board.reveal((0, 0)).unwrap();
        assert!(!result.triggered_mine);
        assert_eq!(result.revealed_cells[0].position, (0, 0));

        for pos in [(1, 0), (0, 1), (1, 1)] {
            let state = board.cell_state(pos).unwrap();
            assert!(state.is_revealed);
            let expected = NeighborIter::new(pos, (8, 8))
                .filter(|&n| board.cell(n).unwrap().is_mine())
                .count();
            assert_eq!(usize::from(state.adjacent_mine_count), expected);
        }
    }
    assert!(exercised);
}

#[test]
fn fullest_board_has_one_safe_cell_with_eight_mines_around() {
    for seed in 0..16 {
        let mut board = GameBoard::new(seed);
        let config = board.configure(3, 3, 8);
        assert_eq!(config.mines, 8);
        board.place_mines().unwrap();

        let safe: Vec<_> = board
            .cells()
            .filter(|cell| !cell.is_mine())
            .map(Cell::position)
            .collect();
        assert_eq!(safe.len(), 1);

        let result = board.reveal(safe[0]).unwrap();
        let expected = NeighborIter::new(safe[0], (3, 3)).count() as u8;
        assert_eq!(result.revealed_cells.len(), 1);
        assert_eq!(result.revealed_cells[0].adjacent_mine_count, expected);
        assert!(result.won);
    }
}

#[test]
fn safe_center_of_fullest_board_counts_eight() {
    let mut board = GameBoard::new(0);
    board.configure(3, 3, 8);
    let ring = NeighborIter::new((1, 1), (3, 3));
    board
        .place_mines_with(&mut FixedMineGenerator::new(ring))
        .unwrap();

    let result = board.reveal((1, 1)).unwrap();

    assert_eq!(result.revealed_cells, vec![RevealedCell {
        position: (1, 1),
        adjacent_mine_count: 8,
    }]);
}

#[test]
fn corner_count_stays_in_bounds() {
    let mut board = GameBoard::new(0);
    board.configure(10, 10, 0);
    board
        .place_mines_with(&mut FixedMineGenerator::new([(1, 0), (0, 1), (1, 1), (2, 2)]))
        .unwrap();

    assert_eq!(board.count_adjacent_mines((0, 0)), Ok(3));
    assert_eq!(board.count_adjacent_mines((9, 9)), Ok(0));
}

#[test]
fn full_game_until_win() {
    let mut board = GameBoard::new(11).with_safe_first_move(true);
    board.configure_from_text("8", "8", "8").unwrap();
    board.place_mines().unwrap();

    let positions: Vec<_> = board.cells().map(Cell::position).collect();
    let mut won = false;
    for pos in positions {
        if board.cell(pos).unwrap().is_mine() || board.cell(pos).unwrap().is_revealed() {
            continue;
        }
        let result = board.reveal(pos).unwrap();
        assert!(!result.triggered_mine);
        won |= result.won;
    }

    assert!(won);
    assert!(board.check_win_condition());
    assert_eq!(board.state(), GameState::Won);
    assert_eq!(board.revealed_safe_count(), 56);
}
