//! Text rendering of FEN position snapshots.

use shakmaty::fen::Fen;
use shakmaty::{File, Rank, Square};

/// Render the placement part of a FEN as an 8x8 grid, rank 8 on top.
///
/// Returns `None` when the snapshot is not a parseable FEN. Only the board
/// layout is read; no legality checks are made.
pub fn render_fen(snapshot: &str) -> Option<String> {
    let fen: Fen = snapshot.trim().parse().ok()?;
    let setup = fen.as_setup();

    let mut out = String::new();
    for rank in Rank::ALL.iter().rev() {
        out.push(rank.char());
        out.push(' ');
        for file in File::ALL {
            let square = Square::from_coords(file, *rank);
            let c = setup.board.piece_at(square).map_or('.', |piece| piece.char());
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out.push_str(if setup.turn.is_white() {
        "White to move"
    } else {
        "Black to move"
    });
    Some(out)
}
