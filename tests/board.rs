use tile_signal::board::{Board, BoardConfig, CollisionRule, DirectionVector, Tile, TileKind};

fn board_with(width: usize, height: usize, tiles: &[(i64, i64, Tile)]) -> Board {
    let mut board = Board::new(width, height).unwrap();
    place(&mut board, tiles);
    board
}

fn place(board: &mut Board, tiles: &[(i64, i64, Tile)]) {
    for &(x, y, tile) in tiles {
        board.replace_cell(x, y, tile).unwrap();
    }
}

fn assert_active(board: &Board, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        assert!(board.has_signal(x, y).unwrap(), "expected active at ({x},{y})");
    }
}

fn assert_inactive(board: &Board, cells: &[(i64, i64)]) {
    for &(x, y) in cells {
        assert!(
            !board.has_signal(x, y).unwrap(),
            "expected inactive at ({x},{y})"
        );
    }
}

fn collect_active(board: &Board) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    board.for_each_active(|x, y| out.push((x, y)));
    out
}

const RIGHT: DirectionVector = DirectionVector::RIGHT;
const LEFT: DirectionVector = DirectionVector::LEFT;
const UP: DirectionVector = DirectionVector::UP;
const DOWN: DirectionVector = DirectionVector::DOWN;

#[test]
fn new_board_holds_blank_empty_tiles() {
    let board = Board::new(1, 1).unwrap();
    let tile = board.get_cell(0, 0).unwrap();
    assert_eq!(tile.kind(), TileKind::Empty);
    assert_eq!(tile.as_empty().unwrap().direction(), DirectionVector::ZERO);
    assert!(!tile.has_signal());
}

#[test]
fn signal_leaving_the_board_disappears() {
    let mut board = board_with(1, 1, &[(0, 0, Tile::empty(RIGHT, true))]);
    board.update();
    assert_inactive(&board, &[(0, 0)]);
    assert_eq!(board.last_tick().dropped, 1);
}

#[test]
fn signal_moves_across_empty_tiles() {
    let mut board = board_with(3, 1, &[(0, 0, Tile::empty(RIGHT, true))]);
    board.update();
    assert_active(&board, &[(1, 0)]);
    assert_inactive(&board, &[(0, 0), (2, 0)]);
    board.update();
    assert_active(&board, &[(2, 0)]);
    assert_inactive(&board, &[(0, 0), (1, 0)]);
}

#[test]
fn signal_travels_one_cell_per_tick_until_it_exits() {
    let mut board = board_with(8, 3, &[(0, 1, Tile::empty(RIGHT, true))]);
    for step in 1..8 {
        board.update();
        assert_eq!(collect_active(&board), vec![(step, 1)]);
        assert_eq!(
            board.get_cell(step, 1).unwrap().as_empty().unwrap().direction(),
            RIGHT
        );
    }
    board.update();
    assert_eq!(board.active_count(), 0);
}

#[test]
fn zero_facing_empty_holds_its_signal() {
    let mut board = board_with(1, 1, &[(0, 0, Tile::empty(DirectionVector::ZERO, true))]);
    for _ in 0..5 {
        board.update();
        assert_active(&board, &[(0, 0)]);
        assert_eq!(board.last_tick().delivered, 1);
    }
    assert_eq!(
        board.get_cell(0, 0).unwrap().as_empty().unwrap().direction(),
        DirectionVector::ZERO
    );
}

#[test]
fn zero_facing_redirector_holds_its_signal() {
    let mut board = board_with(
        1,
        1,
        &[(0, 0, Tile::redirector(DirectionVector::ZERO, true))],
    );
    board.update_n(5);
    assert_active(&board, &[(0, 0)]);
    assert_eq!(board.last_tick().dropped, 0);
}

#[test]
fn stationary_signal_collides_with_arrival() {
    let mut board = board_with(
        2,
        1,
        &[
            (0, 0, Tile::empty(RIGHT, true)),
            (1, 0, Tile::empty(DirectionVector::ZERO, true)),
        ],
    );
    board.update();
    assert_inactive(&board, &[(0, 0), (1, 0)]);
}

#[test]
fn jumper_axis_without_heading_emits_nothing() {
    let mut board = board_with(3, 3, &[(1, 1, Tile::jumper(true, true))]);
    board.update();
    assert_eq!(board.active_count(), 0);
    assert_eq!(board.last_tick().rejected, 0);
}

#[test]
fn head_on_signals_cancel() {
    let mut board = board_with(
        3,
        1,
        &[(0, 0, Tile::empty(RIGHT, true)), (2, 0, Tile::empty(LEFT, true))],
    );
    board.update();
    assert_inactive(&board, &[(0, 0), (1, 0), (2, 0)]);
}

fn three_way_into(center: Tile, config: BoardConfig) -> Board {
    let mut board = Board::with_config(3, 3, config).unwrap();
    place(
        &mut board,
        &[
            (0, 1, Tile::empty(RIGHT, true)),
            (2, 1, Tile::empty(LEFT, true)),
            (1, 0, Tile::empty(DOWN, true)),
            (1, 1, center),
        ],
    );
    board.update();
    board
}

#[test]
fn three_way_collision_cancels() {
    let board = three_way_into(Tile::blank(), BoardConfig::default());
    assert_inactive(&board, &[(1, 1)]);
}

#[test]
fn three_way_collision_survives_under_parity() {
    let config = BoardConfig::default().collision(CollisionRule::Parity);
    let board = three_way_into(Tile::blank(), config);
    assert_active(&board, &[(1, 1)]);
}

#[test]
fn splitter_fans_out_to_every_neighbor() {
    let mut board = board_with(
        3,
        3,
        &[(0, 1, Tile::empty(RIGHT, true)), (1, 1, Tile::splitter(false))],
    );
    board.update();
    assert_active(&board, &[(1, 1)]);
    board.update();
    assert_active(&board, &[(0, 1), (2, 1), (1, 0), (1, 2)]);
    assert_inactive(&board, &[(1, 1)]);

    let headings = [((0, 1), LEFT), ((2, 1), RIGHT), ((1, 0), UP), ((1, 2), DOWN)];
    for ((x, y), heading) in headings {
        let tile = board.get_cell(x, y).unwrap();
        assert_eq!(tile.as_empty().unwrap().direction(), heading, "({x},{y})");
    }
}

#[test]
fn splitter_in_a_corner_only_reaches_in_bounds_neighbors() {
    let mut board = board_with(2, 2, &[(0, 0, Tile::splitter(true))]);
    board.update();
    assert_eq!(collect_active(&board), vec![(1, 0), (0, 1)]);
    assert_eq!(board.last_tick().dropped, 2);
}

#[test]
fn splitter_row_keeps_generating() {
    let mut board = board_with(
        3,
        2,
        &[
            (0, 0, Tile::splitter(true)),
            (1, 0, Tile::splitter(true)),
            (2, 0, Tile::splitter(true)),
        ],
    );
    board.update_n(20);
    assert_active(&board, &[(0, 0), (1, 0), (2, 0), (1, 1)]);
    assert_eq!(board.generation(), 20);
}

#[test]
fn splitter_ignores_collisions() {
    let board = three_way_into(Tile::splitter(false), BoardConfig::default());
    assert_active(&board, &[(1, 1)]);
}

#[test]
fn redirector_turns_signal() {
    let mut board = board_with(
        2,
        2,
        &[
            (0, 0, Tile::empty(RIGHT, true)),
            (1, 0, Tile::redirector(DOWN, false)),
        ],
    );
    board.update_n(2);
    assert_active(&board, &[(1, 1)]);
    assert_inactive(&board, &[(0, 0), (1, 0), (0, 1)]);
    assert_eq!(
        board.get_cell(1, 1).unwrap().as_empty().unwrap().direction(),
        DOWN
    );
}

#[test]
fn redirector_collisions_cancel() {
    let board = three_way_into(Tile::redirector(DOWN, false), BoardConfig::default());
    assert_inactive(&board, &[(1, 1)]);
}

#[test]
fn redirector_pair_bounces_signal_forever() {
    let mut board = board_with(
        2,
        1,
        &[
            (0, 0, Tile::redirector(RIGHT, true)),
            (1, 0, Tile::redirector(LEFT, false)),
        ],
    );
    for tick in 1..=12u64 {
        board.update();
        let expected = if tick % 2 == 0 { (0, 0) } else { (1, 0) };
        assert_eq!(collect_active(&board), vec![expected], "tick {tick}");
    }
    assert_eq!(
        board.get_cell(0, 0).unwrap().as_redirector().unwrap().direction(),
        RIGHT
    );
    assert_eq!(
        board.get_cell(1, 0).unwrap().as_redirector().unwrap().direction(),
        LEFT
    );
}

#[test]
fn wall_blocks_signals() {
    let mut board = board_with(
        3,
        1,
        &[(0, 0, Tile::empty(RIGHT, true)), (1, 0, Tile::wall())],
    );
    board.update();
    assert_inactive(&board, &[(1, 0)]);
    board.update();
    assert_inactive(&board, &[(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn wall_cannot_be_activated() {
    let mut board = board_with(1, 1, &[(0, 0, Tile::wall())]);
    for _ in 0..3 {
        board.try_activate_at(0, 0, LEFT).unwrap();
    }
    assert_inactive(&board, &[(0, 0)]);
}

#[test]
fn jumper_lets_perpendicular_signals_cross() {
    let mut board = board_with(
        3,
        3,
        &[
            (1, 0, Tile::empty(DOWN, true)),
            (0, 1, Tile::empty(RIGHT, true)),
            (1, 1, Tile::jumper(false, false)),
        ],
    );
    board.update();
    let jumper = *board.get_cell(1, 1).unwrap().as_jumper().unwrap();
    assert_eq!(jumper.signals(), (true, true));
    assert_eq!(jumper.directions(), (RIGHT, DOWN));
    board.update();
    assert_active(&board, &[(1, 2), (2, 1)]);
    assert_inactive(&board, &[(1, 1)]);
}

#[test]
fn jumper_collides_parallel_signals() {
    let mut board = board_with(
        3,
        3,
        &[
            (0, 1, Tile::empty(RIGHT, true)),
            (2, 1, Tile::empty(LEFT, true)),
            (1, 0, Tile::empty(DOWN, true)),
            (1, 2, Tile::empty(UP, true)),
            (1, 1, Tile::jumper(false, false)),
        ],
    );
    board.update();
    assert_inactive(&board, &[(1, 1)]);
}

#[test]
fn jumper_same_axis_collision_leaves_other_axis_intact() {
    let mut board = board_with(
        3,
        3,
        &[
            (0, 1, Tile::empty(RIGHT, true)),
            (2, 1, Tile::empty(LEFT, true)),
            (1, 0, Tile::empty(DOWN, true)),
            (1, 1, Tile::jumper(false, false)),
        ],
    );
    board.update();
    let jumper = *board.get_cell(1, 1).unwrap().as_jumper().unwrap();
    assert_eq!(jumper.signals(), (false, true));
    board.update();
    assert_eq!(collect_active(&board), vec![(1, 2)]);
}

#[test]
fn replaced_cell_keeps_board_dimensions() {
    let mut board = Board::new(4, 2).unwrap();
    board.replace_cell(3, 1, Tile::splitter(true)).unwrap();
    assert_eq!((board.width(), board.height()), (4, 2));
    assert!(board.replace_cell(4, 1, Tile::wall()).is_err());
    assert!(board.replace_cell(0, 2, Tile::wall()).is_err());
}

#[test]
fn cloned_board_evolves_independently() {
    let mut board = board_with(3, 1, &[(0, 0, Tile::empty(RIGHT, true))]);
    let snapshot = board.clone();
    board.update();
    assert_active(&snapshot, &[(0, 0)]);
    assert_active(&board, &[(1, 0)]);
    assert_eq!(snapshot.generation(), 0);
}

#[test]
fn describe_cell_tracks_signal_state() {
    let mut board = board_with(
        2,
        1,
        &[
            (0, 0, Tile::empty(RIGHT, true)),
            (1, 0, Tile::redirector(DirectionVector::new(0, 1).unwrap(), false)),
        ],
    );
    assert_eq!(board.describe_cell(0, 0).unwrap().glyph(), '▓');
    assert_eq!(board.describe_cell(1, 0).unwrap().glyph(), '▾');
    board.update();
    assert_eq!(board.describe_cell(0, 0).unwrap().glyph(), '░');
    assert_eq!(board.describe_cell(1, 0).unwrap().glyph(), '▼');
    assert!(board.describe_cell(2, 0).is_err());
}
