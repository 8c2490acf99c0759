//! Visualization utilities for rrt_maze
//!
//! Provides a unified interface for plotting using gnuplot. Plot calls only
//! record layers; every layer is drawn onto a single set of axes when the
//! figure is shown or saved.

use gnuplot::{
    AutoOption, AxesCommon, Caption, Color, Coordinate, Figure, LineWidth, PointSize, PointSymbol,
};

use crate::common::{MazeError, MazeResult, Path2D, Point2D, Segment};
use crate::path_planning::RRTTree;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00AA00";
    pub const BLUE: &str = "#0000FF";
    pub const LIGHT_BLUE: &str = "#ADD8E6";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const TREE: &str = LIGHT_BLUE;
    pub const START: &str = GREEN;
    pub const GOAL: &str = RED;
    pub const PATH: &str = RED;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 3.0,
            caption: "Final Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone)]
enum Layer {
    Lines { x: Vec<f64>, y: Vec<f64>, style: PathStyle },
    Points { x: Vec<f64>, y: Vec<f64>, style: PointStyle },
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    layers: Vec<Layer>,
    info: Vec<String>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            layers: Vec::new(),
            info: Vec::new(),
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Fit both axes to a square workspace with a unit margin
    pub fn set_workspace(&mut self, map_size: f64) -> &mut Self {
        self.set_x_range(-1.0, map_size + 1.0)
            .set_y_range(-1.0, map_size + 1.0)
    }

    /// Add a line to the text box in the top-left corner of the plot
    pub fn add_info(&mut self, line: &str) -> &mut Self {
        self.info.push(line.to_string());
        self
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Plot a path
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: path.x_coords(),
            y: path.y_coords(),
            style: style.clone(),
        });
        self
    }

    /// Plot disjoint segments as one series, NaN-separated so gnuplot
    /// breaks the line between them
    pub fn plot_segments_styled<I>(&mut self, segments: I, style: &PathStyle) -> &mut Self
    where
        I: IntoIterator<Item = (Point2D, Point2D)>,
    {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for (a, b) in segments {
            x.extend_from_slice(&[a.x, b.x, f64::NAN]);
            y.extend_from_slice(&[a.y, b.y, f64::NAN]);
        }
        if !x.is_empty() {
            self.layers.push(Layer::Lines { x, y, style: style.clone() });
        }
        self
    }

    /// Plot obstacle segments
    pub fn plot_segments(&mut self, segments: &[Segment]) -> &mut Self {
        let style = PathStyle::new(colors::OBSTACLE, "Obstacles").with_line_width(3.0);
        self.plot_segments_styled(segments.iter().map(|s| (s.a, s.b)), &style)
    }

    /// Plot tree edges and nodes
    pub fn plot_tree(&mut self, tree: &RRTTree) -> &mut Self {
        let edge_style = PathStyle::new(colors::TREE, "").with_line_width(0.5);
        self.plot_segments_styled(tree.edges(), &edge_style);

        let nodes: Vec<Point2D> = tree.nodes().iter().map(|n| n.to_point()).collect();
        let node_style = PointStyle::new(colors::BLUE, "RRT Nodes")
            .with_size(0.3)
            .with_symbol('o');
        self.plot_points(&nodes, &node_style)
    }

    /// Plot a single point (start, goal, etc.)
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.plot_points(&[point], style)
    }

    /// Plot multiple points
    pub fn plot_points(&mut self, points: &[Point2D], style: &PointStyle) -> &mut Self {
        self.layers.push(Layer::Points {
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
            style: style.clone(),
        });
        self
    }

    /// Plot start position
    pub fn plot_start(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(2.0))
    }

    /// Plot goal position
    pub fn plot_goal(&mut self, point: Point2D) -> &mut Self {
        self.plot_point(
            point,
            &PointStyle::new(colors::GOAL, "Goal").with_size(2.5).with_symbol('*'),
        )
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> MazeResult<()> {
        self.render();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| MazeError::Visualization(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> MazeResult<()> {
        self.render();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| MazeError::Visualization(e.to_string()))
    }

    fn render(&mut self) {
        self.figure.clear_axes();
        let axes = self.figure.axes2d();

        for layer in &self.layers {
            match layer {
                Layer::Lines { x, y, style } => {
                    axes.lines(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                Layer::Points { x, y, style } => {
                    axes.points(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
            }
        }

        for (i, line) in self.info.iter().enumerate() {
            axes.label(
                line,
                Coordinate::Graph(0.02),
                Coordinate::Graph(0.96 - 0.05 * i as f64),
                &[],
            );
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
