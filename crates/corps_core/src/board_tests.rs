use super::*;

#[test]
fn test_standard_layout() {
    let board = Board::standard();
    assert_eq!(board.pieces().count(), 32);
    assert_eq!(board.pieces_of(Side::White).count(), 16);
    assert_eq!(board.king_square(Side::White), Some(Square::at(0, 4)));
    assert_eq!(board.king_square(Side::Black), Some(Square::at(7, 4)));

    let rook = board.piece_at(Square::at(0, 0)).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert_eq!(rook.code(), 2);
    assert_eq!(board.piece_at(Square::at(6, 3)).unwrap().code(), -1);
}

#[test]
fn test_standard_corps() {
    let board = Board::standard();
    assert_eq!(board.corp_members(1).len(), 6);
    assert_eq!(board.corp_members(2).len(), 4);
    assert_eq!(board.corp_members(3).len(), 6);
    assert_eq!(board.corp_members(-2).len(), 4);

    assert_eq!(board.commander_of(1), Some(Square::at(0, 2)));
    assert_eq!(board.commander_of(2), Some(Square::at(0, 4)));
    assert_eq!(board.commander_of(3), Some(Square::at(0, 5)));
    assert_eq!(board.commander_of(-3), Some(Square::at(7, 5)));
    assert_eq!(board.king_corp(Side::Black), Some(-2));

    // One commander per corp
    for corp in board.corps().corp_ids() {
        let commanders = board
            .corp_members(corp)
            .iter()
            .filter(|&&s| board.piece_at(s).unwrap().is_commander)
            .count();
        assert_eq!(commanders, 1, "corp {corp}");
    }
}

#[test]
fn test_place_and_remove_keep_index() {
    let mut board = Board::empty();
    let knight = Piece::new(PieceKind::Knight, Side::White, 1, 4);
    assert!(board.place(Square::at(3, 3), knight).is_none());

    let placed = board.piece_at(Square::at(3, 3)).unwrap();
    assert_eq!(placed.position, Square::at(3, 3));
    assert_eq!(board.corp_members(1), &[Square::at(3, 3)]);

    let removed = board.remove(Square::at(3, 3)).unwrap();
    assert_eq!(removed.kind, PieceKind::Knight);
    assert!(board.corp_members(1).is_empty());
    assert!(board.remove(Square::at(3, 3)).is_none());
}

#[test]
fn test_virtual_copy_is_independent() {
    let board = Board::standard();
    let mut probe = board.virtual_copy();
    probe.remove(Square::at(1, 0));
    probe.apply_move(Square::at(1, 1), Square::at(2, 1)).unwrap();

    assert!(board.piece_at(Square::at(1, 0)).is_some());
    assert!(board.piece_at(Square::at(2, 1)).is_none());
    assert_eq!(board, Board::standard());
}

#[test]
fn test_mark_options() {
    let mut board = Board::empty();
    board.place(
        Square::at(1, 1),
        Piece::new(PieceKind::Pawn, Side::White, 1, 1),
    );
    board.place(
        Square::at(2, 2),
        Piece::new(PieceKind::Pawn, Side::Black, 1, 1),
    );

    board.mark_options(Square::at(1, 1));
    assert!(board.flags(Square::at(1, 1)).visited);
    assert!(board.flags(Square::at(2, 1)).movable);
    assert!(board.flags(Square::at(2, 2)).attackable);
    assert!(!board.flags(Square::at(2, 0)).attackable);
    assert_eq!(
        Square::all().filter(|&s| board.flags(s).movable).count(),
        1
    );

    board.mark_options(Square::at(5, 5));
    assert!(Square::all().all(|s| board.flags(s) == CellFlags::default()));
}

#[test]
fn test_record_capture() {
    let mut board = Board::standard();
    let pawn = *board.piece_at(Square::at(6, 0)).unwrap();
    board.record_capture(&pawn);
    assert_eq!(board.captured(Side::Black), &[-1]);
    assert!(board.captured(Side::White).is_empty());
}

#[test]
fn test_corp_for_file() {
    let corps: Vec<u8> = (0..8).map(corp_for_file).collect();
    assert_eq!(corps, vec![1, 1, 1, 2, 2, 3, 3, 3]);
}

#[test]
fn test_piece_corp_number_is_clamped() {
    assert_eq!(Piece::new(PieceKind::Pawn, Side::Black, 200, 1).corp_id, -127);
    assert_eq!(Piece::new(PieceKind::Pawn, Side::White, 128, 1).corp_id, 127);
}
