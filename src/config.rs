//! Simulation constants.
//!
//! Everything the core needs to place cells and move the mouse is held in one immutable
//! [`SimConfig`] that is handed to constructors, so the core can be exercised without a terminal.

use std::time::Duration;

/// Default simulation rate in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Immutable simulation configuration.
#[expect(
    clippy::module_name_repetitions,
    reason = "The name reads better than a bare `Sim` at the call sites that import it."
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Width and height of one cell in scene units.
    pub cell_size: f32,
    /// Radius of the circle the mouse triangle is inscribed in.
    pub mouse_size: f32,
    /// Linear speed of the mouse in scene units per second.
    pub moving_speed: f32,
    /// Angular speed of the mouse in degrees per second.
    pub turning_speed: f32,
    /// Radius of a bread crumb dropped in a visited cell.
    pub bread_crumb_size: f32,
    /// Whether cells are marked visited as the mouse reaches them.
    pub bread_crumbs: bool,
    /// Duration of one simulation tick.
    pub tick: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Creates the standard configuration: 40 unit cells, one cell every half second, a quarter
    /// turn every half second and 60 ticks per second.
    pub fn new() -> Self {
        let cell_size = 40.;

        Self {
            cell_size,
            mouse_size: cell_size * (1. - 0.25) / 2.,
            moving_speed: cell_size * 2.,
            turning_speed: 90. * 2.,
            bread_crumb_size: 4.,
            bread_crumbs: false,
            tick: tick_duration(DEFAULT_TICK_RATE),
        }
    }

    /// Returns this configuration running at `rate` ticks per second.
    ///
    /// A rate of zero is treated as one tick per second.
    #[must_use]
    pub fn with_tick_rate(self, rate: u32) -> Self {
        Self {
            tick: tick_duration(rate),
            ..self
        }
    }

    /// Returns this configuration with bread crumbs switched on or off.
    #[must_use]
    pub const fn with_bread_crumbs(self, bread_crumbs: bool) -> Self {
        Self {
            bread_crumbs,
            ..self
        }
    }

    /// Length of one tick in seconds, the `dt` of every state machine update.
    pub fn tick_seconds(&self) -> f32 {
        self.tick.as_secs_f32()
    }

    /// Scene coordinate of the center of the cell at `index` along either axis.
    ///
    /// The maze is drawn with a one cell margin, so cell zero is centered one and a half cells in.
    /// Indices past the last cell are valid and lie outside the maze.
    pub fn cell_center(&self, index: usize) -> f32 {
        self.cell_size.mul_add(index as f32, self.cell_size * 1.5)
    }
}

/// Duration of one tick at `rate` ticks per second.
fn tick_duration(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_standard_values() {
        let config = SimConfig::default();

        assert!((config.cell_size - 40.).abs() < f32::EPSILON);
        assert!((config.mouse_size - 15.).abs() < f32::EPSILON);
        assert!((config.moving_speed - 80.).abs() < f32::EPSILON);
        assert!((config.turning_speed - 180.).abs() < f32::EPSILON);
        assert!(!config.bread_crumbs);
        assert_eq!(config.tick, Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_with_tick_rate() {
        let config = SimConfig::new().with_tick_rate(120);

        assert_eq!(config.tick, Duration::from_secs(1) / 120);
        assert!((config.tick_seconds() - 1. / 120.).abs() < 1e-6);
    }

    #[test]
    fn test_zero_tick_rate_falls_back_to_one_hertz() {
        let config = SimConfig::new().with_tick_rate(0);

        assert_eq!(config.tick, Duration::from_secs(1));
    }

    #[test]
    fn test_cell_center_includes_margin() {
        let config = SimConfig::new();

        assert!((config.cell_center(0) - 60.).abs() < f32::EPSILON);
        assert!((config.cell_center(1) - 100.).abs() < f32::EPSILON);
        assert!((config.cell_center(9) - 420.).abs() < f32::EPSILON);
    }
}
