//! Render-boundary geometry.
//!
//! Everything a drawing surface needs is derived here from the grid and the mouse, in scene
//! units with the y axis growing downwards. The terminal front end flips the y axis when it hands
//! these primitives to its canvas; nothing in this module depends on a graphics library.

use crate::{config::SimConfig, direction::Direction, grid::Grid};

/// Interpolated position and rotation of the mouse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Horizontal scene coordinate of the mouse center.
    pub x: f32,
    /// Vertical scene coordinate of the mouse center.
    pub y: f32,
    /// Rotation in degrees clockwise from north.
    pub rotation: f32,
}

/// Straight line segment between two scene points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point as `(x, y)`.
    pub from: (f32, f32),
    /// End point as `(x, y)`.
    pub to: (f32, f32),
}

/// Size of the scene as `(width, height)`: the maze plus a one cell margin on every side.
pub fn extent(grid: &Grid, config: &SimConfig) -> (f32, f32) {
    (
        (grid.columns() + 2) as f32 * config.cell_size,
        (grid.rows() + 2) as f32 * config.cell_size,
    )
}

/// One segment per wall present in the grid, running along the matching cell side.
pub fn wall_segments(grid: &Grid, config: &SimConfig) -> Vec<Segment> {
    let half = config.cell_size / 2.;

    grid.cells()
        .flat_map(|(_, _, cell)| {
            let (x, y) = (cell.center_x, cell.center_y);

            cell.walls.iter().map(move |side| match side {
                Direction::North => Segment {
                    from: (x - half, y - half),
                    to: (x + half, y - half),
                },
                Direction::East => Segment {
                    from: (x + half, y - half),
                    to: (x + half, y + half),
                },
                Direction::South => Segment {
                    from: (x - half, y + half),
                    to: (x + half, y + half),
                },
                Direction::West => Segment {
                    from: (x - half, y - half),
                    to: (x - half, y + half),
                },
            })
        })
        .collect()
}

/// Centers of the cells holding a bread crumb.
pub fn bread_crumbs(grid: &Grid) -> Vec<(f32, f32)> {
    grid.cells()
        .filter(|(_, _, cell)| cell.visited)
        .map(|(_, _, cell)| (cell.center_x, cell.center_y))
        .collect()
}

/// Corners of the mouse triangle inscribed in a circle of `radius` around the pose.
///
/// The first corner is the nose: straight up at rotation zero, turning clockwise with the
/// rotation.
pub fn mouse_triangle(pose: Pose, radius: f32) -> [(f32, f32); 3] {
    [0., 120., 240.].map(|offset: f32| {
        let angle = (pose.rotation + offset).to_radians();

        (
            radius.mul_add(angle.sin(), pose.x),
            radius.mul_add(-angle.cos(), pose.y),
        )
    })
}

/// Converts a scene point to canvas coordinates, whose y axis grows upwards from the bottom of a
/// scene `height` tall.
pub fn to_canvas(point: (f32, f32), height: f32) -> (f64, f64) {
    (f64::from(point.0), f64::from(height - point.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid from a description with the default configuration.
    fn grid(input: &str) -> Grid {
        Grid::parse(input, &SimConfig::default()).expect("test maze should parse")
    }

    /// Whether two points are within rounding distance.
    fn close(left: (f32, f32), right: (f32, f32)) -> bool {
        (left.0 - right.0).abs() < 1e-3 && (left.1 - right.1).abs() < 1e-3
    }

    #[test]
    fn test_extent_adds_margin() {
        let config = SimConfig::default();
        let (width, height) = extent(&grid("2 3 0 0 0 0 0 0"), &config);

        assert!((width - 200.).abs() < f32::EPSILON);
        assert!((height - 160.).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wall_segments_follow_cell_sides() {
        let config = SimConfig::default();
        let segments = wall_segments(&grid("1 2 9 2"), &config);

        assert_eq!(
            segments,
            vec![
                Segment {
                    from: (40., 40.),
                    to: (80., 40.)
                },
                Segment {
                    from: (40., 40.),
                    to: (40., 80.)
                },
                Segment {
                    from: (120., 40.),
                    to: (120., 80.)
                },
            ]
        );
    }

    #[test]
    fn test_no_walls_no_segments() {
        let config = SimConfig::default();

        assert!(wall_segments(&grid("2 2 0 0 0 0"), &config).is_empty());
    }

    #[test]
    fn test_bread_crumbs_follow_visited_cells() {
        let mut grid = grid("1 3 0 0 0");
        grid.mark_visited(0, 2);

        assert_eq!(bread_crumbs(&grid), vec![(60., 60.), (140., 60.)]);
    }

    #[test]
    fn test_mouse_triangle_nose_follows_rotation() {
        let north = mouse_triangle(
            Pose {
                x: 100.,
                y: 100.,
                rotation: 0.,
            },
            10.,
        );
        let east = mouse_triangle(
            Pose {
                x: 100.,
                y: 100.,
                rotation: 90.,
            },
            10.,
        );

        assert!(close(north[0], (100., 90.)), "nose should point up: {north:?}");
        assert!(close(east[0], (110., 100.)), "nose should point right: {east:?}");
    }

    #[test]
    fn test_to_canvas_flips_y() {
        assert_eq!(to_canvas((10., 30.), 100.), (10., 70.));
    }
}
