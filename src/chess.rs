use svgr::{Color, ParseError, Style, Transform};
use tracing::debug;

use crate::scene::Scene;

///Pieces are drawn in a `PIECE_SIZE` square
pub const PIECE_SIZE: f64 = 45.0;

const LIGHT_SQUARE: (f64, f64, f64, f64) = (0.93, 0.85, 0.71, 1.0);
const DARK_SQUARE: (f64, f64, f64, f64) = (0.71, 0.53, 0.39, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn style(self) -> Style {
	let fill = match self {
	    Side::White => Color::RGB(1.0, 1.0, 1.0),
	    Side::Black => Color::RGB(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0),
	};

	Style {
	    fill: Some(fill),
	    stroke: Some(Color::RGB(0.0, 0.0, 0.0)),
	    stroke_width: Some(1.5),
	    ..Style::new()
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl Piece {
    pub const ALL: [Piece; 6] = [Piece::King, Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight, Piece::Pawn];

    /// Outline of the piece, one entry per separately painted shape.
    pub fn path_data(self) -> &'static [&'static str] {
	match self {
	    Piece::King => &[
		"M 22.5,6 V 12 M 19.5,9 H 25.5",
		"M 22.5,12 C 25.5,12 27,14.5 27,17 C 27,20 24.5,22 22.5,25 \
		 C 20.5,22 18,20 18,17 S 19.5,12 22.5,12 Z",
		"M 12,37 Q 9,28 13,23 Q 17,19 22.5,25 Q 28,19 32,23 Q 36,28 33,37 Z",
		"M 11,37 H 34 V 40 H 11 Z",
	    ],
	    Piece::Queen => &[
		"M 9,26 L 12,12 L 17,24 L 22.5,10 L 28,24 L 33,12 L 36,26 \
		 Q 30,30 30,37 H 15 Q 15,30 9,26 Z",
		"M 14,12 A 2,2 0 1 1 10,12 A 2,2 0 1 1 14,12 Z",
		"M 24.5,10 a 2 2 0 1 1 -4 0 2 2 0 1 1 4 0 z",
		"M 35,12 A 2,2 0 1 1 31,12 A 2,2 0 1 1 35,12 Z",
		"M 12,37 H 33 V 40 H 12 Z",
	    ],
	    Piece::Rook => &[
		"M 9,39 H 36 V 36 H 33 V 32 H 12 V 36 H 9 Z",
		"M 12.5,32 L 14,29.5 H 31 L 32.5,32 Z",
		"M 14,29.5 V 16.5 H 31 V 29.5 Z",
		"M 14,16.5 L 11,14 V 9 h 4 v 2 h 5 V 9 h 5 v 2 h 5 V 9 h 4 v 5 L 31,16.5 Z",
	    ],
	    Piece::Bishop => &[
		"M 9,39.5 C 13,36.5 17,35.5 22.5,35.5 S 32,36.5 36,39.5 Z",
		"M 15,30 H 30 V 32.5 H 15 Z",
		"M 22.5,10.5 C 28,14 31,19 29,25 Q 27,28 22.5,28 T 16,25 C 14,19 17,14 22.5,10.5 Z",
		"M 22.5,8 m -2,0 a 2,2 0 1 0 4,0 a 2,2 0 1 0 -4,0 z",
		"M 24.5,14.5 L 20.5,20",
	    ],
	    Piece::Knight => &[
		"M 14,39 H 35 C 35,30 34,20 30,14 C 27,9.5 22,8 20,8 L 19,5 L 16.5,9 L 14.5,8 V 11.5 \
		 C 11,15 8,20 8.5,24 C 9,26.5 11,27 12.5,26 C 14,24.5 15.5,23 18,22.5 \
		 C 19,25 17,28 15.5,31 C 14.5,33.5 14,36 14,39 Z",
		"M 18.5,14.5 a 1 1 0 1 0 -2 0 a 1 1 0 1 0 2 0 z",
	    ],
	    Piece::Pawn => &[
		"M 22.5,9 A 4,4 0 0 0 20.1,16.2 C 17.8,17.5 16.5,19.6 16.5,22 S 17.4,25.7 18.8,26.8 \
		 C 15.5,28 11.5,32 11.5,39.5 H 33.5 C 33.5,32 29.5,28 26.2,26.8 \
		 C 27.6,25.7 28.5,24 28.5,22 S 27.2,17.5 24.9,16.2 A 4,4 0 0 0 22.5,9 Z",
	    ],
	}
    }
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

///`(file, row, side, piece)`, row 0 at the top of the board
pub fn starting_position() -> Vec<(usize, usize, Side, Piece)> {
    let mut pieces = Vec::with_capacity(32);

    for (file, &piece) in BACK_RANK.iter().enumerate() {
	pieces.push((file, 0, Side::Black, piece));
	pieces.push((file, 1, Side::Black, Piece::Pawn));
	pieces.push((file, 6, Side::White, Piece::Pawn));
	pieces.push((file, 7, Side::White, piece));
    }

    pieces
}

/// Queues one piece scaled into the square at `(x, y)`.
pub fn push_piece(scene: &mut Scene, piece: Piece, side: Side, x: f64, y: f64, square: f64) -> Result<(), ParseError> {
    let s = square / PIECE_SIZE;
    let transform = Transform::translate(x, y).multiply(&Transform::scale(s, s));
    let style = side.style();

    for data in piece.path_data() {
	scene.push_path(data, transform, &style)?;
    }

    Ok(())
}

/// An 8x8 board with the starting position.
pub fn board_scene(size: u32) -> Result<Scene, ParseError> {
    let mut scene = Scene::new(size);
    let square = f64::from(size) / 8.0;

    for row in 0..8 {
	for file in 0..8 {
	    let color = if (row + file) % 2 == 0 { LIGHT_SQUARE } else { DARK_SQUARE };
	    scene.push_rect(file as f64 * square, row as f64 * square, square, square, color);
	}
    }

    for (file, row, side, piece) in starting_position() {
	push_piece(&mut scene, piece, side, file as f64 * square, row as f64 * square, square)?;
    }

    debug!("board scene with {} items", scene.items.len());
    Ok(scene)
}
