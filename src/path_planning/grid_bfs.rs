//! Breadth-first search on a 0/1 maze grid
//!
//! 4-connected moves only, so the returned path has the fewest cells of
//! any path through free cells.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::common::{Grid, GridCell, GridPathPlanner, GridSolution, MazeError, MazeResult};

static DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// BFS grid planner
#[derive(Debug, Clone)]
pub struct GridBfs {
    grid: Grid,
}

impl GridBfs {
    pub fn new(grid: Grid) -> MazeResult<Self> {
        if grid.nrows() == 0 || grid.ncols() == 0 {
            return Err(MazeError::InvalidGrid("grid must not be empty".to_string()));
        }
        Ok(GridBfs { grid })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn in_bounds(&self, cell: GridCell) -> bool {
        cell.row < self.grid.nrows() && cell.col < self.grid.ncols()
    }

    fn is_free(&self, cell: GridCell) -> bool {
        self.grid[(cell.row, cell.col)] == 0
    }

    fn neighbors(&self, cell: GridCell) -> impl Iterator<Item = GridCell> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let next = GridCell::new(row, col);
            (self.in_bounds(next) && self.is_free(next)).then(|| next)
        })
    }

    fn check_cell(&self, name: &str, cell: GridCell) -> MazeResult<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(MazeError::InvalidGrid(format!(
                "{} ({}, {}) outside {}x{} grid",
                name,
                cell.row,
                cell.col,
                self.grid.nrows(),
                self.grid.ncols()
            )))
        }
    }
}

impl GridPathPlanner for GridBfs {
    fn plan(&self, start: GridCell, goal: GridCell) -> MazeResult<Option<GridSolution>> {
        self.check_cell("start", start)?;
        self.check_cell("goal", goal)?;
        if !self.is_free(start) || !self.is_free(goal) {
            return Ok(None);
        }

        let mut parents: HashMap<GridCell, GridCell> = HashMap::new();
        let mut explored = Vec::new();
        let mut queue = VecDeque::from(vec![start]);
        parents.insert(start, start);

        while let Some(current) = queue.pop_front() {
            explored.push(current);

            if current == goal {
                let mut path = vec![goal];
                let mut node = goal;
                while node != start {
                    node = parents[&node];
                    path.push(node);
                }
                path.reverse();
                debug!("BFS: path of {} cells, {} explored", path.len(), explored.len());
                return Ok(Some(GridSolution { path, explored }));
            }

            for next in self.neighbors(current) {
                if !parents.contains_key(&next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        debug!("BFS: goal unreachable, {} explored", explored.len());
        Ok(None)
    }
}
