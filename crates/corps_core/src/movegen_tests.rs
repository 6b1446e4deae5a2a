use super::*;
use std::collections::BTreeSet;

fn lone(kind: PieceKind, side: Side, at: Square, budget: u8) -> Board {
    let mut board = Board::empty();
    board.place(at, Piece::new(kind, side, 1, budget));
    board
}

fn set(squares: Vec<Square>) -> BTreeSet<Square> {
    squares.into_iter().collect()
}

fn manhattan(a: Square, b: Square) -> u8 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

#[test]
fn test_white_pawn_steps_forward_only() {
    let from = Square::at(1, 1);
    let board = lone(PieceKind::Pawn, Side::White, from, 1);
    let moves = set(get_moves(&board, from, 1));
    assert_eq!(moves, set(vec![Square::at(2, 1)]));
    assert!(!moves.contains(&Square::at(2, 0)));
    assert!(!moves.contains(&Square::at(2, 2)));
}

#[test]
fn test_black_pawn_steps_down() {
    let from = Square::at(6, 3);
    let board = lone(PieceKind::Pawn, Side::Black, from, 2);
    let moves = set(get_moves(&board, from, 2));
    assert_eq!(moves, set(vec![Square::at(5, 3), Square::at(4, 3)]));
}

#[test]
fn test_rook_two_rings_on_empty_board() {
    let from = Square::at(3, 3);
    let board = lone(PieceKind::Rook, Side::White, from, 2);
    let moves = set(get_moves(&board, from, 2));

    let expected: BTreeSet<Square> = Square::all()
        .filter(|&s| (1..=2).contains(&manhattan(from, s)))
        .collect();
    assert_eq!(moves.len(), 12);
    assert_eq!(moves, expected);
}

#[test]
fn test_reach_reports_ring() {
    let from = Square::at(0, 0);
    let board = lone(PieceKind::Knight, Side::White, from, 4);
    for (sq, ring) in reach(&board, from, 4) {
        assert_eq!(ring, manhattan(from, sq));
    }
}

#[test]
fn test_zero_budget_and_boxed_in() {
    let from = Square::at(3, 3);
    let mut board = lone(PieceKind::Queen, Side::White, from, 3);
    assert!(get_moves(&board, from, 0).is_empty());

    for (dr, dc) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let sq = from.offset(dr, dc).unwrap();
        board.place(sq, Piece::new(PieceKind::Pawn, Side::Black, 1, 1));
    }
    assert!(get_moves(&board, from, 3).is_empty());
}

#[test]
fn test_flood_fill_walks_around_blockers() {
    let from = Square::at(3, 3);
    let mut board = lone(PieceKind::Knight, Side::White, from, 4);
    board.place(
        Square::at(3, 4),
        Piece::new(PieceKind::Pawn, Side::White, 1, 1),
    );

    // Straight line is blocked; the detour via row 2 takes four hops.
    let short = set(get_moves(&board, from, 2));
    assert!(!short.contains(&Square::at(3, 5)));
    assert!(!short.contains(&Square::at(3, 4)));

    let ring = reach(&board, from, 4)
        .into_iter()
        .find(|&(s, _)| s == Square::at(3, 5))
        .map(|(_, r)| r);
    assert_eq!(ring, Some(4));
}

#[test]
fn test_moves_never_include_enemies() {
    let from = Square::at(3, 3);
    let mut board = lone(PieceKind::King, Side::White, from, 3);
    board.place(
        Square::at(4, 3),
        Piece::new(PieceKind::Pawn, Side::Black, 1, 1),
    );
    let moves = get_moves(&board, from, 3);
    assert!(!moves.contains(&Square::at(4, 3)));
    assert!(moves.iter().all(|&s| board.is_empty(s)));
}

#[test]
fn test_empty_source_generates_nothing() {
    let board = Board::empty();
    let from = Square::at(4, 4);
    assert!(get_moves(&board, from, 3).is_empty());
    assert!(get_attackable(&board, from).is_empty());
    assert!(get_attackable_range(&board, from).is_empty());
}

#[test]
fn test_king_attack_box() {
    let from = Square::at(3, 3);
    let mut board = lone(PieceKind::King, Side::White, from, 3);
    board.place(
        Square::at(4, 4),
        Piece::new(PieceKind::Pawn, Side::Black, 1, 1),
    );
    board.place(
        Square::at(5, 5),
        Piece::new(PieceKind::Pawn, Side::Black, 1, 1),
    );
    board.place(
        Square::at(2, 2),
        Piece::new(PieceKind::Pawn, Side::White, 1, 1),
    );

    assert_eq!(get_attackable_range(&board, from).len(), 8);
    assert_eq!(get_attackable(&board, from), vec![Square::at(4, 4)]);
}

#[test]
fn test_attack_box_clamps_at_corner() {
    let from = Square::at(0, 0);
    let board = lone(PieceKind::Bishop, Side::White, from, 2);
    assert_eq!(
        set(get_attackable_range(&board, from)),
        set(vec![Square::at(0, 1), Square::at(1, 0), Square::at(1, 1)])
    );
}

#[test]
fn test_ranged_box_follows_budget() {
    let from = Square::at(3, 3);
    let board = lone(PieceKind::Rook, Side::White, from, 2);
    // rows 1..=5, cols 1..=5, minus the rook itself
    assert_eq!(get_attackable_range(&board, from).len(), 24);

    let board = lone(PieceKind::Knight, Side::Black, Square::at(7, 7), 3);
    // rows 4..=7, cols 4..=7
    assert_eq!(get_attackable_range(&board, Square::at(7, 7)).len(), 15);
}

#[test]
fn test_pawn_attack_box_is_forward_row() {
    let from = Square::at(1, 1);
    let board = lone(PieceKind::Pawn, Side::White, from, 1);
    assert_eq!(
        set(get_attackable_range(&board, from)),
        set(vec![Square::at(2, 0), Square::at(2, 1), Square::at(2, 2)])
    );

    let from = Square::at(6, 0);
    let board = lone(PieceKind::Pawn, Side::Black, from, 1);
    assert_eq!(
        set(get_attackable_range(&board, from)),
        set(vec![Square::at(5, 0), Square::at(5, 1)])
    );

    let from = Square::at(7, 4);
    let board = lone(PieceKind::Pawn, Side::White, from, 1);
    assert!(get_attackable_range(&board, from).is_empty());
}

#[test]
fn test_standard_opening_options() {
    let board = Board::standard();
    // Back-rank pieces are boxed in by their own pawns
    assert!(get_moves(&board, Square::at(0, 4), 3).is_empty());
    assert_eq!(get_moves(&board, Square::at(1, 4), 1), vec![Square::at(2, 4)]);
    assert!(get_attackable(&board, Square::at(1, 4)).is_empty());
}
