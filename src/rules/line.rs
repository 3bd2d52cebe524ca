//! Direction-aware run scanning shared by win detection and evaluation

use crate::board::{Board, Pos, Stone};

/// A unit step `(d_row, d_col)`.
pub type Direction = (i32, i32);

/// The four line directions. Each unordered line through a cell is covered
/// exactly once by a direction and its opposite.
pub const DIRECTIONS: [Direction; 4] = [
    (1, 0),  // Vertical
    (0, 1),  // Horizontal
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// A maximal contiguous line of same-colored stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub color: Stone,
    /// First stone in `direction` order
    pub start: Pos,
    pub direction: Direction,
    pub length: u8,
    /// Ends blocked by the board edge or an opposing stone (0..=2)
    pub walls: u8,
}

impl Run {
    /// Stones of the run, in direction order
    pub fn stones(&self) -> impl Iterator<Item = Pos> + '_ {
        let (dr, dc) = self.direction;
        (0..i32::from(self.length)).map(move |i| offset(self.start, dr * i, dc * i))
    }
}

#[inline]
fn offset(pos: Pos, dr: i32, dc: i32) -> Pos {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let moved = Pos::new((i32::from(pos.row) + dr) as u8, (i32::from(pos.col) + dc) as u8);
    moved
}

/// Walk from `origin` (exclusive) while cells match `color`.
///
/// Returns the number of matching stones and what lies just past them:
/// `Some(Stone::Empty)` for an open end, anything else for a wall.
#[inline]
fn walk(board: &Board, origin: Pos, (dr, dc): Direction, color: Stone) -> (u8, Option<Stone>) {
    let mut count = 0u8;
    let mut r = i32::from(origin.row) + dr;
    let mut c = i32::from(origin.col) + dc;
    loop {
        match board.cell(r, c) {
            Some(s) if s == color => {
                count += 1;
                r += dr;
                c += dc;
            }
            end => return (count, end),
        }
    }
}

/// Scan the run through `origin` along one direction, extending both ways.
///
/// Returns `None` if `origin` is empty or off-board.
pub fn scan_run(board: &Board, origin: Pos, direction: Direction) -> Option<Run> {
    let color = board.get(origin);
    if color == Stone::Empty {
        return None;
    }
    let (dr, dc) = direction;
    let (back, back_end) = walk(board, origin, (-dr, -dc), color);
    let (fwd, fwd_end) = walk(board, origin, direction, color);

    let back_i = i32::from(back);
    let start = offset(origin, -dr * back_i, -dc * back_i);
    let length = back + fwd + 1;
    let walls = u8::from(back_end != Some(Stone::Empty)) + u8::from(fwd_end != Some(Stone::Empty));

    Some(Run {
        color,
        start,
        direction,
        length,
        walls,
    })
}

/// Every maximal run on the board, each reported once.
///
/// A run is emitted only from its first stone: a stone whose predecessor in
/// the direction has the same color is skipped. Ladder thresholds therefore
/// count distinct runs, so a single open three is one `OpenThree`.
pub fn runs(board: &Board) -> impl Iterator<Item = Run> + '_ {
    board.occupied().flat_map(move |(pos, color)| {
        DIRECTIONS.into_iter().filter_map(move |direction| {
            let (dr, dc) = direction;
            let prev = board.cell(i32::from(pos.row) - dr, i32::from(pos.col) - dc);
            if prev == Some(color) {
                return None;
            }
            scan_run(board, pos, direction)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn board_with(size: BoardSize, stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(size);
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_scan_open_run() {
        let board = board_with(
            BoardSize::NINE,
            &[(4, 3, Stone::Black), (4, 4, Stone::Black), (4, 5, Stone::Black)],
        );
        let run = scan_run(&board, Pos::new(4, 4), (0, 1)).unwrap();
        assert_eq!(run.length, 3);
        assert_eq!(run.walls, 0);
        assert_eq!(run.start, Pos::new(4, 3));
        let stones: Vec<Pos> = run.stones().collect();
        assert_eq!(stones, vec![Pos::new(4, 3), Pos::new(4, 4), Pos::new(4, 5)]);
    }

    #[test]
    fn test_scan_walls_edge_and_opponent() {
        let board = board_with(
            BoardSize::NINE,
            &[(0, 0, Stone::White), (0, 1, Stone::White), (0, 2, Stone::Black)],
        );
        let run = scan_run(&board, Pos::new(0, 1), (0, 1)).unwrap();
        assert_eq!(run.length, 2);
        assert_eq!(run.walls, 2, "edge and opposing stone are both walls");

        // Vertical through the same stone: edge above, empty below
        let run = scan_run(&board, Pos::new(0, 1), (1, 0)).unwrap();
        assert_eq!(run.length, 1);
        assert_eq!(run.walls, 1);
    }

    #[test]
    fn test_scan_anti_diagonal() {
        let board = board_with(
            BoardSize::NINE,
            &[(2, 6, Stone::Black), (3, 5, Stone::Black), (4, 4, Stone::Black)],
        );
        let run = scan_run(&board, Pos::new(4, 4), (1, -1)).unwrap();
        assert_eq!(run.length, 3);
        assert_eq!(run.start, Pos::new(2, 6));
    }

    #[test]
    fn test_scan_empty_origin() {
        let board = Board::new(BoardSize::NINE);
        assert!(scan_run(&board, Pos::new(4, 4), (1, 0)).is_none());
    }

    #[test]
    fn test_runs_counted_once() {
        let board = board_with(
            BoardSize::NINE,
            &[(4, 2, Stone::Black), (4, 3, Stone::Black), (4, 4, Stone::Black)],
        );
        let horizontal: Vec<Run> = runs(&board).filter(|r| r.direction == (0, 1)).collect();
        assert_eq!(horizontal.len(), 1, "a three-stone run must appear once");
        assert_eq!(horizontal[0].length, 3);
        // 3 singles per remaining direction
        assert_eq!(runs(&board).count(), 1 + 3 * 3);
    }
}
