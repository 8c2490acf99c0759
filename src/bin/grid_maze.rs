//! Grid maze demo
//!
//! Carves a random maze and solves it corner to corner with BFS.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rrt_maze::mapping::MazeGenerator;
use rrt_maze::path_planning::GridBfs;
use rrt_maze::{GridCell, GridPathPlanner, MazeResult};

const WIDTH: usize = 21;
const HEIGHT: usize = 7;

fn main() -> MazeResult<()> {
    env_logger::init();

    let mut rng = ChaCha8Rng::from_entropy();
    let maze = MazeGenerator::new(WIDTH, HEIGHT).generate(&mut rng)?;

    let start = GridCell::new(0, 0);
    let goal = GridCell::new(HEIGHT - 1, WIDTH - 1);
    let bfs = GridBfs::new(maze.clone())?;

    match bfs.plan(start, goal)? {
        Some(solution) => {
            for r in 0..HEIGHT {
                let line: String = (0..WIDTH)
                    .map(|c| {
                        let cell = GridCell::new(r, c);
                        if maze[(r, c)] != 0 {
                            '█'
                        } else if solution.path.contains(&cell) {
                            '·'
                        } else {
                            ' '
                        }
                    })
                    .collect();
                println!("{}", line);
            }
            println!(
                "Path of {} cells, {} cells explored",
                solution.path.len(),
                solution.explored.len()
            );
        }
        None => {
            print!("{}", rrt_maze::mapping::render_maze(&maze));
            println!("No path found");
        }
    }

    Ok(())
}
