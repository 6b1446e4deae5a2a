use super::*;
use crate::movegen::get_moves;

/// White corp 1 under a bishop, white king corp 2, a black bishop corp and king.
fn skirmish_board() -> Board {
    let mut b = Board::empty();
    let w = Side::White;
    let bl = Side::Black;
    b.place(Square::at(3, 3), Piece::new(PieceKind::Bishop, w, 1, 2));
    b.place(Square::at(1, 1), Piece::new(PieceKind::Pawn, w, 1, 1));
    b.place(Square::at(0, 0), Piece::new(PieceKind::Rook, w, 1, 2));
    b.place(Square::at(0, 4), Piece::new(PieceKind::King, w, 2, 3));
    b.place(Square::at(1, 4), Piece::new(PieceKind::Queen, w, 2, 3));
    b.place(Square::at(4, 4), Piece::new(PieceKind::Bishop, bl, 1, 2));
    b.place(Square::at(6, 0), Piece::new(PieceKind::Pawn, bl, 1, 1));
    b.place(Square::at(7, 4), Piece::new(PieceKind::King, bl, 2, 3));
    b
}

#[test]
fn test_apply_move_relocates_and_locks_mover() {
    let mut board = skirmish_board();
    let (from, to) = (Square::at(1, 1), Square::at(2, 1));
    board.apply_move(from, to).unwrap();

    assert!(board.is_empty(from));
    let pawn = board.piece_at(to).unwrap();
    assert_eq!(pawn.position, to);
    assert!(pawn.has_moved);
    // Corp mates are untouched by a subordinate's move
    assert!(!board.piece_at(Square::at(3, 3)).unwrap().has_moved);
    assert!(!board.piece_at(Square::at(0, 0)).unwrap().has_moved);
    assert!(board.corp_members(1).contains(&to));
}

#[test]
fn test_commander_move_locks_corp() {
    let mut board = skirmish_board();
    board
        .apply_move(Square::at(3, 3), Square::at(3, 5))
        .unwrap();

    for &sq in board.corp_members(1) {
        assert!(board.piece_at(sq).unwrap().has_moved, "{sq}");
    }
    assert!(!board.piece_at(Square::at(0, 4)).unwrap().has_moved);
    assert!(!board.piece_at(Square::at(4, 4)).unwrap().has_moved);
    // Two hops spent from the bishop's budget
    assert_eq!(board.piece_at(Square::at(3, 5)).unwrap().move_budget, 0);
}

#[test]
fn test_undo_move_restores_board() {
    let mut board = skirmish_board();
    let before = board.clone();
    let (from, to) = (Square::at(3, 3), Square::at(2, 2));
    let undo = board.apply_move(from, to).unwrap();
    board.undo_move(from, to, undo);
    assert_eq!(board, before);
}

#[test]
fn test_undo_keeps_earlier_locks() {
    let mut board = skirmish_board();
    board
        .apply_move(Square::at(1, 1), Square::at(2, 1))
        .unwrap();
    let before = board.clone();

    let (from, to) = (Square::at(3, 3), Square::at(3, 2));
    let undo = board.apply_move(from, to).unwrap();
    board.undo_move(from, to, undo);

    assert_eq!(board, before);
    assert!(board.piece_at(Square::at(2, 1)).unwrap().has_moved);
    assert!(!board.piece_at(Square::at(0, 0)).unwrap().has_moved);
}

#[test]
fn test_invalid_moves_leave_board_unchanged() {
    let mut board = skirmish_board();
    let before = board.clone();

    assert_eq!(
        board.apply_move(Square::at(5, 5), Square::at(5, 6)),
        Err(EngineError::EmptySource(Square::at(5, 5)))
    );
    assert!(matches!(
        board.apply_move(Square::at(0, 4), Square::at(1, 4)),
        Err(EngineError::InvalidMove { .. })
    ));
    // Out of reach for a one-step pawn
    assert!(matches!(
        board.apply_move(Square::at(1, 1), Square::at(3, 1)),
        Err(EngineError::InvalidMove { .. })
    ));
    // Pawns never step sideways
    assert!(matches!(
        board.apply_move(Square::at(1, 1), Square::at(1, 2)),
        Err(EngineError::InvalidMove { .. })
    ));
    assert_eq!(board, before);
}

#[test]
fn test_apply_attack_captures() {
    let mut board = skirmish_board();
    let (from, to) = (Square::at(1, 4), Square::at(2, 5));
    board.place(to, Piece::new(PieceKind::Pawn, Side::Black, 1, 1));

    let undo = board.apply_attack(from, to).unwrap();
    let captured = undo.captured().unwrap();
    assert_eq!(captured.code(), -1);
    assert!(board.is_empty(from));
    let queen = board.piece_at(to).unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert!(queen.has_moved);
}

#[test]
fn test_undo_attack_restores_captured() {
    let mut board = skirmish_board();
    let (from, to) = (Square::at(3, 3), Square::at(4, 4));
    let before = board.clone();

    let undo = board.apply_attack(from, to).unwrap();
    assert_eq!(undo.captured().map(|p| p.kind), Some(PieceKind::Bishop));
    board.undo_attack(from, to, undo);
    assert_eq!(board, before);
}

#[test]
fn test_attack_on_vacated_square_is_noop_capture() {
    let mut board = skirmish_board();
    let (from, to) = (Square::at(3, 3), Square::at(2, 4));
    let before = board.clone();

    let undo = board.apply_attack(from, to).unwrap();
    assert!(undo.captured().is_none());
    assert!(board.is_empty(to));
    assert!(board.piece_at(from).unwrap().has_moved);
    board.undo_attack(from, to, undo);
    assert_eq!(board, before);
}

#[test]
fn test_empty_attack_is_not_a_move() {
    // A knight boxed in by its own pawns cannot hop out through an attack.
    let mut board = Board::empty();
    let from = Square::at(0, 0);
    board.place(from, Piece::new(PieceKind::Knight, Side::White, 1, 4));
    board.place(Square::at(0, 1), Piece::new(PieceKind::Pawn, Side::White, 1, 1));
    board.place(Square::at(1, 0), Piece::new(PieceKind::Pawn, Side::White, 1, 1));
    assert!(get_moves(&board, from, 4).is_empty());
    let before = board.clone();

    let undo = board.apply_attack(from, Square::at(4, 4)).unwrap();
    assert!(undo.captured().is_none());
    assert_eq!(board.piece_at(from).unwrap().kind, PieceKind::Knight);
    assert!(board.is_empty(Square::at(4, 4)));
    board.undo_attack(from, Square::at(4, 4), undo);
    assert_eq!(board, before);
}

#[test]
fn test_invalid_attacks() {
    let mut board = skirmish_board();
    let before = board.clone();

    // Friendly target
    assert!(matches!(
        board.apply_attack(Square::at(0, 4), Square::at(1, 4)),
        Err(EngineError::InvalidAttack { .. })
    ));
    // Outside the box
    assert!(matches!(
        board.apply_attack(Square::at(3, 3), Square::at(7, 4)),
        Err(EngineError::InvalidAttack { .. })
    ));
    assert!(matches!(
        board.apply_attack(Square::at(5, 5), Square::at(4, 4)),
        Err(EngineError::EmptySource(_))
    ));
    assert_eq!(board, before);
}

#[test]
fn test_fallen_commander_hands_corp_to_king() {
    let mut board = skirmish_board();
    let (from, to) = (Square::at(3, 3), Square::at(4, 4));
    let before = board.clone();

    let undo = board.apply_attack(from, to).unwrap();
    let orphan = board.piece_at(Square::at(6, 0)).unwrap();
    assert_eq!(orphan.corp_id, -2);
    assert_eq!(orphan.delegation_id, -1);
    assert!(board.corp_members(-1).is_empty());
    assert_eq!(board.corp_members(-2).len(), 2);

    board.undo_attack(from, to, undo);
    assert_eq!(board, before);
    assert_eq!(board.piece_at(Square::at(6, 0)).unwrap().corp_id, -1);
}

#[test]
fn test_exhaust_locks_in_place() {
    let mut board = skirmish_board();
    let before = board.clone();
    let undo = board.exhaust(Square::at(0, 4)).unwrap();
    assert!(board.piece_at(Square::at(0, 4)).unwrap().has_moved);
    assert!(board.piece_at(Square::at(1, 4)).unwrap().has_moved);
    board.undo_move(Square::at(0, 4), Square::at(0, 4), undo);
    assert_eq!(board, before);
}

#[test]
fn test_refresh_turn_state() {
    let mut board = skirmish_board();
    board
        .apply_move(Square::at(3, 3), Square::at(3, 5))
        .unwrap();
    board
        .apply_move(Square::at(1, 4), Square::at(2, 4))
        .unwrap();
    board.refresh_turn_state();

    assert!(board.pieces().all(|(_, p)| !p.has_moved));
    let bishop = board.piece_at(Square::at(3, 5)).unwrap();
    assert_eq!(bishop.move_budget, bishop.default_move_budget);
}

#[test]
fn test_delegate_and_recall() {
    let mut board = skirmish_board();
    let rook = Square::at(0, 0);
    board.delegate(rook, 2).unwrap();
    let pc = board.piece_at(rook).unwrap();
    assert_eq!((pc.corp_id, pc.delegation_id), (2, 1));
    assert!(board.corp_members(2).contains(&rook));

    // The king now locks the delegated rook with its corp
    board
        .apply_move(Square::at(0, 4), Square::at(0, 3))
        .unwrap();
    assert!(board.piece_at(rook).unwrap().has_moved);

    board.recall(rook).unwrap();
    let pc = board.piece_at(rook).unwrap();
    assert_eq!((pc.corp_id, pc.delegation_id), (1, 0));
}

#[test]
fn test_delegation_errors() {
    let mut board = skirmish_board();
    assert!(matches!(
        board.delegate(Square::at(3, 3), 2),
        Err(EngineError::InvalidDelegation(_))
    ));
    assert!(matches!(
        board.delegate(Square::at(1, 1), -2),
        Err(EngineError::InvalidDelegation(_))
    ));
    assert!(matches!(
        board.delegate(Square::at(1, 1), 3),
        Err(EngineError::InvalidDelegation(_))
    ));
    assert!(matches!(
        board.recall(Square::at(1, 1)),
        Err(EngineError::InvalidDelegation(_))
    ));
}
