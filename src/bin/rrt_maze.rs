//! RRT maze solving demo
//!
//! Runs the planner through a hand-authored 10x10 maze with an entry at the
//! top-left and an exit at the bottom-right, then plots the tree and path.

use log::info;

use rrt_maze::utils::Visualizer;
use rrt_maze::{MazeResult, Point2D, RRTConfig, RRTPlanner, Segment, Visualizable};

fn default_maze() -> Vec<Segment> {
    let walls: &[((f64, f64), (f64, f64))] = &[
        // Outer boundary, gap at top-left for entry and bottom-right for exit
        ((0.0, 0.0), (0.0, 10.0)),
        ((1.0, 10.0), (10.0, 10.0)),
        ((10.0, 10.0), (10.0, 1.0)),
        ((10.0, 0.0), (0.0, 0.0)),
        // Top band
        ((1.0, 9.0), (4.0, 9.0)),
        ((4.0, 9.0), (4.0, 6.0)),
        ((4.0, 7.0), (6.0, 7.0)),
        ((6.0, 9.0), (9.0, 9.0)),
        ((8.0, 10.0), (8.0, 9.2)),
        // Upper-left cluster
        ((1.5, 8.0), (3.5, 8.0)),
        ((1.5, 8.0), (1.5, 6.5)),
        ((3.5, 8.0), (3.5, 7.0)),
        ((1.5, 6.5), (2.5, 6.5)),
        // Upper-center and upper-right connectors
        ((5.0, 10.0), (5.0, 8.2)),
        ((6.5, 8.0), (6.5, 6.0)),
        ((7.5, 8.5), (7.5, 7.5)),
        ((9.0, 8.0), (9.0, 6.2)),
        // Middle barriers
        ((0.8, 6.0), (3.2, 6.0)),
        ((3.2, 6.0), (3.2, 4.0)),
        ((3.2, 4.0), (6.8, 4.0)),
        ((6.8, 4.0), (6.8, 2.0)),
        // Center corridors
        ((2.8, 5.2), (2.8, 3.2)),
        ((4.8, 6.2), (4.8, 5.0)),
        ((5.8, 6.2), (5.8, 4.4)),
        ((7.2, 5.5), (7.2, 3.8)),
        // Middle-left connectors
        ((0.5, 4.5), (2.5, 4.5)),
        ((1.0, 3.2), (2.2, 3.2)),
        // Lower-middle meander
        ((1.8, 3.2), (1.8, 1.8)),
        ((1.8, 1.8), (4.2, 1.8)),
        ((4.2, 1.8), (4.2, 3.6)),
        ((4.2, 3.6), (6.2, 3.6)),
        ((6.2, 3.6), (6.2, 2.4)),
        ((6.2, 2.4), (8.2, 2.4)),
        // Lower-left spiral
        ((0.8, 2.2), (0.8, 0.8)),
        ((0.8, 2.2), (2.2, 2.2)),
        ((2.2, 2.2), (2.2, 0.8)),
        ((2.2, 0.8), (4.6, 0.8)),
        // Lower-right connectors and dead ends
        ((5.6, 1.6), (8.0, 1.6)),
        ((8.0, 1.6), (8.0, 3.2)),
        ((8.0, 3.2), (9.2, 3.2)),
        ((7.2, 0.8), (7.2, 2.0)),
        ((9.2, 4.2), (9.2, 6.2)),
        ((7.8, 5.2), (9.2, 5.2)),
        // Interior stubs
        ((3.8, 2.8), (5.0, 2.8)),
        ((4.6, 4.8), (5.6, 4.8)),
        ((2.8, 7.2), (4.6, 7.2)),
        // Short separators
        ((6.8, 7.8), (6.8, 7.0)),
        ((3.0, 0.8), (3.0, 1.8)),
        ((8.8, 0.8), (8.8, 1.4)),
    ];
    walls.iter().map(|&w| Segment::from(w)).collect()
}

fn main() -> MazeResult<()> {
    env_logger::init();
    println!("RRT maze solving start!!");

    let start = Point2D::new(0.5, 9.5);
    let goal = Point2D::new(10.0, 0.0);
    let config = RRTConfig {
        map_size: 10.0,
        max_iter: 50_000,
        step_size: 0.3,
        goal_bias: 0.3,
        seed: None,
    };

    let mut planner = RRTPlanner::new(start, goal, default_maze(), config)?;
    let result = planner.plan();
    info!("tree has {} nodes", result.tree.len());

    let title = match (&result.path, result.path_length()) {
        (Some(path), Some(length)) => {
            println!(
                "Goal reached! Path found with {} nodes, length {:.2}, after {} iterations",
                path.len(),
                length,
                result.iterations_used
            );
            "RRT Maze Solving - Final Result"
        }
        _ => {
            println!("Goal not reached after {} iterations", result.iterations_used);
            "RRT Maze Solving - No Path Found"
        }
    };

    let mut vis = Visualizer::new();
    vis.set_title(title).set_workspace(planner.config().map_size);
    planner.visualize(&mut vis);

    std::fs::create_dir_all("img")?;
    vis.save_png("img/rrt_maze_result.png", 800, 800)?;
    println!("Plot saved to: img/rrt_maze_result.png");
    if let Err(e) = vis.show() {
        println!("Cannot show plot: {}", e);
    }

    println!("RRT maze solving finish!!");
    Ok(())
}
