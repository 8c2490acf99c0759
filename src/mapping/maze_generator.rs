//! Randomized depth-first maze carving
//!
//! Starts from a grid of walls and carves passages two cells at a time from
//! the top-left corner, backtracking when a cell has no unvisited
//! neighbours. The backtracking uses an explicit stack so large grids do not
//! grow the call stack.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{Grid, MazeError, MazeResult};

const WALL: u8 = 1;
const PASSAGE: u8 = 0;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

struct Frame {
    row: usize,
    col: usize,
    directions: [(isize, isize); 4],
    next: usize,
}

/// Maze generator for a `height` x `width` grid
#[derive(Debug, Clone, Copy)]
pub struct MazeGenerator {
    pub width: usize,
    pub height: usize,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        MazeGenerator { width, height }
    }

    /// Carve a maze; every cell with even row and column ends up connected
    /// to (0, 0) by exactly one passage.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MazeResult<Grid> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidGrid(format!(
                "maze dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let mut maze = Grid::from_element(self.height, self.width, WALL);
        maze[(0, 0)] = PASSAGE;
        let mut stack = vec![Self::frame(0, 0, rng)];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.directions.len() {
                stack.pop();
                continue;
            }
            let (dr, dc) = frame.directions[frame.next];
            frame.next += 1;
            let (row, col) = (frame.row, frame.col);

            let target = row
                .checked_add_signed(2 * dr)
                .zip(col.checked_add_signed(2 * dc))
                .filter(|&(r, c)| r < self.height && c < self.width);

            if let Some((r, c)) = target {
                if maze[(r, c)] == WALL {
                    maze[((row + r) / 2, (col + c) / 2)] = PASSAGE;
                    maze[(r, c)] = PASSAGE;
                    stack.push(Self::frame(r, c, rng));
                }
            }
        }

        debug!(
            "Maze: carved {} of {} cells",
            maze.iter().filter(|&&cell| cell == PASSAGE).count(),
            maze.len()
        );
        Ok(maze)
    }

    fn frame<R: Rng + ?Sized>(row: usize, col: usize, rng: &mut R) -> Frame {
        let mut directions = DIRECTIONS;
        directions.shuffle(rng);
        Frame {
            row,
            col,
            directions,
            next: 0,
        }
    }
}

/// Render a maze with `#` for walls and spaces for passages
pub fn render_maze(maze: &Grid) -> String {
    let mut out = String::with_capacity(maze.len() + maze.nrows());
    for row in maze.row_iter() {
        out.extend(row.iter().map(|&cell| if cell == PASSAGE { ' ' } else { '#' }));
        out.push('\n');
    }
    out
}
