//! RRT (Rapidly-exploring Random Tree) planner for segment mazes
//!
//! Grows a tree from the start by steering a fixed step toward random
//! samples in the square `[0, map_size]^2`, rejecting any edge that
//! crosses an obstacle segment, until an accepted node lands within one
//! step of the goal.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::{MazeError, MazeResult, Path2D, Point2D, Segment, Visualizable};
use crate::path_planning::obstacle_set::ObstacleSet;
use crate::path_planning::tree::{reconstruct_path, RRTNode, RRTTree};
use crate::utils::{PathStyle, Visualizer};

/// Accepted-node count between progress messages
const PROGRESS_INTERVAL: usize = 1000;

/// Configuration for RRT planner
#[derive(Debug, Clone)]
pub struct RRTConfig {
    /// Side length of the square workspace
    pub map_size: f64,
    /// Iteration budget
    pub max_iter: usize,
    /// Maximum distance moved per steering step
    pub step_size: f64,
    /// Probability of sampling the goal itself (0.0-1.0)
    pub goal_bias: f64,
    /// Seed for the default random source, `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            map_size: 10.0,
            max_iter: 500,
            step_size: 1.0,
            goal_bias: 0.3,
            seed: None,
        }
    }
}

impl RRTConfig {
    /// Reject parameters the planner cannot run with
    pub fn validate(&self) -> MazeResult<()> {
        if !(self.map_size.is_finite() && self.map_size > 0.0) {
            return Err(MazeError::InvalidConfiguration(format!(
                "map_size must be positive, got {}",
                self.map_size
            )));
        }
        if self.max_iter == 0 {
            return Err(MazeError::InvalidConfiguration(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(MazeError::InvalidConfiguration(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(MazeError::InvalidConfiguration(format!(
                "goal_bias must be within [0, 1], got {}",
                self.goal_bias
            )));
        }
        Ok(())
    }
}

/// Where a planning run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Growing,
    /// An accepted node is within one step of the goal
    Reached,
    /// Iteration budget spent without reaching the goal
    Exhausted,
}

impl PlannerState {
    pub fn is_terminated(&self) -> bool {
        !matches!(self, PlannerState::Growing)
    }
}

/// Outcome of a planning run
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub reached: bool,
    /// Start to goal-adjacent node, present only when `reached`
    pub path: Option<Path2D>,
    /// Every node in discovery order
    pub tree: Vec<RRTNode>,
    pub iterations_used: usize,
}

impl PlanResult {
    pub fn path_length(&self) -> Option<f64> {
        self.path.as_ref().map(Path2D::total_length)
    }
}

/// Move at most `step_size` from `from` toward `to`.
///
/// The returned node has no parent yet; its cost extends `from.cost` by the
/// distance actually moved.
pub fn steer(from: &RRTNode, to: Point2D, step_size: f64) -> RRTNode {
    let origin = from.to_point().to_vector();
    let delta = to.to_vector() - origin;
    let d = delta.norm();

    let (target, moved) = if d < step_size {
        (to, d)
    } else {
        (Point2D::from(origin + delta.normalize() * step_size), step_size)
    };

    RRTNode {
        x: target.x,
        y: target.y,
        parent: None,
        cost: from.cost + moved,
    }
}

/// RRT path planner
pub struct RRTPlanner<R: Rng = ChaCha8Rng> {
    config: RRTConfig,
    start: Point2D,
    goal: Point2D,
    obstacles: ObstacleSet,
    tree: RRTTree,
    state: PlannerState,
    iterations: usize,
    goal_index: Option<usize>,
    rng: R,
}

impl RRTPlanner<ChaCha8Rng> {
    /// Create a planner seeded from `config.seed`
    pub fn new(
        start: Point2D,
        goal: Point2D,
        obstacles: Vec<Segment>,
        config: RRTConfig,
    ) -> MazeResult<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(start, goal, obstacles, config, rng)
    }
}

impl<R: Rng> RRTPlanner<R> {
    /// Create a planner drawing samples from `rng`; `config.seed` is ignored
    pub fn with_rng(
        start: Point2D,
        goal: Point2D,
        obstacles: Vec<Segment>,
        config: RRTConfig,
        rng: R,
    ) -> MazeResult<Self> {
        config.validate()?;

        Ok(RRTPlanner {
            config,
            start,
            goal,
            obstacles: ObstacleSet::new(obstacles),
            tree: RRTTree::new(start),
            state: PlannerState::Growing,
            iterations: 0,
            goal_index: None,
            rng,
        })
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn goal(&self) -> Point2D {
        self.goal
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn tree(&self) -> &RRTTree {
        &self.tree
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Path to the goal-adjacent node, once the goal has been reached
    pub fn path(&self) -> Option<Path2D> {
        self.goal_index
            .map(|index| reconstruct_path(self.tree.nodes(), index))
    }

    /// Draw the goal with probability `goal_bias`, otherwise a uniform point
    pub fn sample(&mut self) -> Point2D {
        if self.rng.gen_bool(self.config.goal_bias) {
            self.goal
        } else {
            let size = self.config.map_size;
            Point2D::new(
                self.rng.gen_range(0.0..=size),
                self.rng.gen_range(0.0..=size),
            )
        }
    }

    pub fn is_collision_free(&self, from: &RRTNode, to: &RRTNode) -> bool {
        self.obstacles.is_edge_free(from.to_point(), to.to_point())
    }

    pub fn reached_goal(&self, node: &RRTNode) -> bool {
        node.distance_to(&self.goal) <= self.config.step_size
    }

    /// Run a single sample/steer/check iteration
    pub fn step(&mut self) -> PlannerState {
        if self.state.is_terminated() {
            return self.state;
        }
        self.iterations += 1;

        let rnd = self.sample();
        let nearest_ind = self.tree.nearest(&rnd);
        let nearest_node = self.tree.node(nearest_ind);
        let mut new_node = steer(nearest_node, rnd, self.config.step_size);

        if self.is_collision_free(nearest_node, &new_node) {
            new_node.parent = Some(nearest_ind);
            let new_ind = self.tree.append(new_node);
            if new_ind % PROGRESS_INTERVAL == 0 {
                debug!(
                    "RRT: {} nodes after {} iterations",
                    self.tree.len(),
                    self.iterations
                );
            }

            // Only accepted nodes may end the run, so the path is always
            // anchored in the tree.
            if self.reached_goal(self.tree.node(new_ind)) {
                self.goal_index = Some(new_ind);
                self.state = PlannerState::Reached;
                info!(
                    "RRT: goal reached after {} iterations with {} nodes",
                    self.iterations,
                    self.tree.len()
                );
                return self.state;
            }
        } else {
            trace!(
                "RRT: rejected edge ({:.3}, {:.3}) -> ({:.3}, {:.3})",
                nearest_node.x,
                nearest_node.y,
                new_node.x,
                new_node.y
            );
        }

        if self.iterations >= self.config.max_iter {
            self.state = PlannerState::Exhausted;
            warn!(
                "RRT: cannot find path within {} iterations ({} nodes)",
                self.config.max_iter,
                self.tree.len()
            );
        }
        self.state
    }

    /// Grow the tree until the goal is reached or the budget is spent
    pub fn plan(&mut self) -> PlanResult {
        debug!(
            "RRT: planning from ({}, {}) to ({}, {}) against {} obstacles",
            self.start.x,
            self.start.y,
            self.goal.x,
            self.goal.y,
            self.obstacles.len()
        );
        while !self.step().is_terminated() {}
        self.result()
    }

    /// Like `plan`, but stops early once `cancel` is set.
    ///
    /// A cancelled planner stays `Growing` and can be resumed.
    pub fn plan_cancellable(&mut self, cancel: &AtomicBool) -> PlanResult {
        while !self.state.is_terminated() {
            if cancel.load(Ordering::Relaxed) {
                debug!("RRT: cancelled after {} iterations", self.iterations);
                break;
            }
            self.step();
        }
        self.result()
    }

    /// Snapshot of the run so far
    pub fn result(&self) -> PlanResult {
        PlanResult {
            reached: self.state == PlannerState::Reached,
            path: self.path(),
            tree: self.tree.nodes().to_vec(),
            iterations_used: self.iterations,
        }
    }

    /// Final result, handing over the tree instead of copying it
    pub fn into_result(self) -> PlanResult {
        let path = self.path();
        PlanResult {
            reached: self.state == PlannerState::Reached,
            path,
            tree: self.tree.into_nodes(),
            iterations_used: self.iterations,
        }
    }
}

impl<R: Rng> Visualizable for RRTPlanner<R> {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_segments(self.obstacles.segments());
        vis.plot_tree(&self.tree);
        if let Some(path) = self.path() {
            vis.plot_path(&path, &PathStyle::default());
        }
        vis.plot_start(self.start);
        vis.plot_goal(self.goal);

        vis.add_info(&format!("Iterations: {}", self.iterations))
            .add_info(&format!("Nodes: {}", self.tree.len()))
            .add_info(&format!(
                "Goal reached: {}",
                if self.state == PlannerState::Reached { "yes" } else { "no" }
            ));
        if let Some(path) = self.path() {
            vis.add_info(&format!("Path length: {:.2}", path.total_length()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::segments_intersect;

    fn config(max_iter: usize, seed: u64) -> RRTConfig {
        RRTConfig {
            max_iter,
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn doorway_wall() -> Vec<Segment> {
        vec![
            Segment::from_coords(5.0, 0.0, 5.0, 4.0),
            Segment::from_coords(5.0, 6.0, 5.0, 10.0),
        ]
    }

    fn assert_tree_is_consistent(result: &PlanResult, obstacles: &[Segment]) {
        assert_eq!(result.tree[0].parent, None);
        for (i, node) in result.tree.iter().enumerate().skip(1) {
            let parent_ind = node.parent.expect("non-root node without parent");
            assert!(parent_ind < i);
            let parent = &result.tree[parent_ind];

            let edge = Segment::new(parent.to_point(), node.to_point());
            for obstacle in obstacles {
                assert!(!segments_intersect(&edge, obstacle), "{:?} crosses {:?}", edge, obstacle);
            }
            assert!((node.cost - parent.cost - edge.length()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rrt_config_default() {
        let config = RRTConfig::default();
        assert_eq!(config.step_size, 1.0);
        assert_eq!(config.max_iter, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let bad = vec![
            RRTConfig { step_size: 0.0, ..Default::default() },
            RRTConfig { step_size: -1.0, ..Default::default() },
            RRTConfig { step_size: f64::NAN, ..Default::default() },
            RRTConfig { max_iter: 0, ..Default::default() },
            RRTConfig { goal_bias: 1.5, ..Default::default() },
            RRTConfig { goal_bias: -0.1, ..Default::default() },
            RRTConfig { map_size: 0.0, ..Default::default() },
        ];
        for config in bad {
            let planner = RRTPlanner::new(Point2D::origin(), Point2D::new(1.0, 1.0), Vec::new(), config);
            assert!(matches!(planner, Err(MazeError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_goal_bias_bounds_are_valid() {
        for goal_bias in [0.0, 1.0] {
            let config = RRTConfig { goal_bias, ..Default::default() };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_steer_short_distance_lands_on_target() {
        let mut from = RRTNode::new(1.0, 1.0);
        from.cost = 2.0;
        let new_node = steer(&from, Point2D::new(1.3, 1.4), 1.0);
        assert_eq!(new_node.to_point(), Point2D::new(1.3, 1.4));
        assert!((new_node.cost - 2.5).abs() < 1e-12);
        assert_eq!(new_node.parent, None);
    }

    #[test]
    fn test_steer_long_distance_moves_one_step() {
        let from = RRTNode::new(0.0, 0.0);
        let new_node = steer(&from, Point2D::new(3.0, 4.0), 1.0);
        assert!((new_node.x - 0.6).abs() < 1e-12);
        assert!((new_node.y - 0.8).abs() < 1e-12);
        assert!((new_node.cost - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_steer_never_exceeds_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let from = RRTNode::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0));
            let to = Point2D::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0));
            let step_size = rng.gen_range(0.05..3.0);
            let new_node = steer(&from, to, step_size);
            let moved = from.distance_to(&new_node.to_point());
            assert!(moved <= step_size + 1e-9);
            if from.distance_to(&to) < step_size {
                assert_eq!(new_node.to_point(), to);
            }
        }
    }

    #[test]
    fn test_samples_stay_in_workspace() {
        let mut planner = RRTPlanner::new(
            Point2D::origin(),
            Point2D::new(5.0, 5.0),
            Vec::new(),
            RRTConfig { goal_bias: 0.0, ..config(10, 11) },
        )
        .unwrap();
        for _ in 0..1000 {
            let p = planner.sample();
            assert!((0.0..=10.0).contains(&p.x) && (0.0..=10.0).contains(&p.y));
        }
    }

    #[test]
    fn test_full_goal_bias_always_samples_goal() {
        let goal = Point2D::new(7.5, 2.5);
        let mut planner = RRTPlanner::new(
            Point2D::origin(),
            goal,
            Vec::new(),
            RRTConfig { goal_bias: 1.0, ..config(10, 5) },
        )
        .unwrap();
        for _ in 0..100 {
            assert_eq!(planner.sample(), goal);
        }
    }

    #[test]
    fn test_open_workspace_reaches_goal() {
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 5.0),
            Vec::new(),
            config(1000, 42),
        )
        .unwrap();
        let result = planner.plan();

        assert!(result.reached);
        assert_eq!(planner.state(), PlannerState::Reached);
        let path = result.path.as_ref().unwrap();
        assert_eq!(path.first(), Some(&Point2D::new(0.0, 0.0)));
        assert!(path.last().unwrap().distance(&Point2D::new(5.0, 5.0)) <= 1.0 + 1e-9);
        assert!(result.iterations_used <= 1000);
        assert_tree_is_consistent(&result, &[]);
    }

    #[test]
    fn test_full_wall_exhausts_budget() {
        let wall = vec![Segment::from_coords(5.0, 0.0, 5.0, 10.0)];
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 5.0),
            Point2D::new(10.0, 5.0),
            wall.clone(),
            config(2000, 1),
        )
        .unwrap();
        let result = planner.plan();

        assert!(!result.reached);
        assert!(result.path.is_none());
        assert!(result.path_length().is_none());
        assert_eq!(result.iterations_used, 2000);
        assert_eq!(planner.state(), PlannerState::Exhausted);
        assert!(result.tree.iter().all(|node| node.x < 5.0));
        assert_tree_is_consistent(&result, &wall);
    }

    #[test]
    fn test_collinear_walls_leave_gap_open() {
        let planner = RRTPlanner::new(
            Point2D::new(1.0, 4.0),
            Point2D::new(6.0, 4.0),
            vec![
                Segment::from_coords(3.0, 0.0, 3.0, 2.0),
                Segment::from_coords(3.0, 5.0, 3.0, 7.0),
            ],
            config(100, 0),
        )
        .unwrap();
        assert!(planner.is_collision_free(&RRTNode::new(2.0, 4.0), &RRTNode::new(4.0, 4.0)));
        assert!(!planner.is_collision_free(&RRTNode::new(2.0, 1.0), &RRTNode::new(4.0, 1.0)));
    }

    #[test]
    fn test_doorway_is_found() {
        let obstacles = doorway_wall();
        let mut planner = RRTPlanner::new(
            Point2D::new(1.0, 5.0),
            Point2D::new(9.0, 5.0),
            obstacles.clone(),
            RRTConfig { step_size: 0.5, ..config(5000, 9) },
        )
        .unwrap();
        let result = planner.plan();

        assert!(result.reached);
        assert_tree_is_consistent(&result, &obstacles);
        let path = result.path.as_ref().unwrap();
        assert!(path.total_length() >= 8.0 - 0.5 - 1e-9);
        // The run stops right after appending the goal-adjacent node
        let terminal = result.tree.last().unwrap();
        assert_eq!(Some(&terminal.to_point()), path.last());
        assert!((terminal.cost - path.total_length()).abs() < 1e-9);
    }

    #[test]
    fn test_rejected_candidate_near_goal_does_not_finish() {
        // Every candidate lands on the wall at x = 1, half a step from the
        // goal, and must be rejected rather than treated as arrival.
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 5.0),
            Point2D::new(1.5, 5.0),
            vec![Segment::from_coords(1.0, 0.0, 1.0, 10.0)],
            RRTConfig { goal_bias: 1.0, ..config(50, 2) },
        )
        .unwrap();
        let result = planner.plan();

        assert!(!result.reached);
        assert!(result.path.is_none());
        assert_eq!(result.tree.len(), 1);
        assert_eq!(result.iterations_used, 50);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let run = |seed| {
            RRTPlanner::new(
                Point2D::new(1.0, 5.0),
                Point2D::new(9.0, 5.0),
                doorway_wall(),
                config(300, seed),
            )
            .unwrap()
            .plan()
        };

        let first = run(17);
        let second = run(17);
        assert_eq!(first.tree, second.tree);
        assert_eq!(first.iterations_used, second.iterations_used);
        assert_eq!(first.reached, second.reached);
    }

    #[test]
    fn test_injected_rng() {
        let rng = ChaCha8Rng::seed_from_u64(23);
        let mut planner = RRTPlanner::with_rng(
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 5.0),
            Vec::new(),
            RRTConfig { seed: None, ..config(1000, 0) },
            rng,
        )
        .unwrap();
        assert!(planner.plan().reached);
    }

    #[test]
    fn test_step_grows_incrementally() {
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(9.0, 9.0),
            Vec::new(),
            RRTConfig { goal_bias: 1.0, ..config(100, 4) },
        )
        .unwrap();

        assert_eq!(planner.step(), PlannerState::Growing);
        assert_eq!(planner.iterations(), 1);
        assert_eq!(planner.tree().len(), 2);
        assert!(planner.path().is_none());

        let result = planner.plan();
        assert!(result.reached);
        // Straight run along the diagonal: ceil(9 * sqrt(2)) - 1 steps
        assert_eq!(result.iterations_used, 12);

        // Terminated planners do not move
        assert_eq!(planner.step(), PlannerState::Reached);
        assert_eq!(planner.iterations(), 12);
    }

    #[test]
    fn test_cancelled_plan_can_resume() {
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 5.0),
            Vec::new(),
            config(1000, 8),
        )
        .unwrap();

        let cancel = AtomicBool::new(true);
        let result = planner.plan_cancellable(&cancel);
        assert!(!result.reached);
        assert_eq!(result.iterations_used, 0);
        assert_eq!(planner.state(), PlannerState::Growing);

        cancel.store(false, Ordering::Relaxed);
        assert!(planner.plan_cancellable(&cancel).reached);
    }

    #[test]
    fn test_visualize_reports_run_info() {
        let mut planner = RRTPlanner::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(9.0, 9.0),
            Vec::new(),
            RRTConfig { goal_bias: 1.0, ..config(100, 4) },
        )
        .unwrap();

        let mut before = Visualizer::new();
        planner.visualize(&mut before);
        assert_eq!(before.info(), ["Iterations: 0", "Nodes: 1", "Goal reached: no"]);

        let result = planner.plan();
        let mut after = Visualizer::new();
        planner.visualize(&mut after);
        assert_eq!(after.info().len(), 4);
        assert_eq!(after.info()[0], format!("Iterations: {}", result.iterations_used));
        assert_eq!(after.info()[2], "Goal reached: yes");
        assert!(after.info()[3].starts_with("Path length: "));
    }

    #[test]
    fn test_into_result_matches_snapshot() {
        let mut planner = RRTPlanner::new(
            Point2D::new(1.0, 5.0),
            Point2D::new(9.0, 5.0),
            doorway_wall(),
            RRTConfig { step_size: 0.5, ..config(5000, 9) },
        )
        .unwrap();
        let snapshot = planner.plan();
        let owned = planner.into_result();

        assert_eq!(owned.reached, snapshot.reached);
        assert_eq!(owned.path, snapshot.path);
        assert_eq!(owned.tree, snapshot.tree);
        assert_eq!(owned.iterations_used, snapshot.iterations_used);
    }

    #[test]
    fn test_long_run_keeps_tree_consistent() {
        // Enough accepted nodes to pass several progress milestones
        let obstacles = vec![Segment::from_coords(5.0, 0.0, 5.0, 10.0)];
        let mut planner = RRTPlanner::new(
            Point2D::new(1.0, 5.0),
            Point2D::new(9.0, 5.0),
            obstacles.clone(),
            RRTConfig { step_size: 0.2, goal_bias: 0.0, ..config(3000, 12) },
        )
        .unwrap();
        let result = planner.plan();

        assert!(!result.reached);
        assert!(result.tree.len() > PROGRESS_INTERVAL);
        assert_tree_is_consistent(&result, &obstacles);
    }
}
