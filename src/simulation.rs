//! Fixed-timestep simulation driver.
//!
//! Real elapsed time is added to a lag accumulator; while the lag holds at least one tick the
//! mouse is advanced by exactly one tick and the lag shrinks by one tick. The simulation is
//! therefore identical at any frame rate. There is no cap on the ticks run per frame, so a long
//! stall is followed by a burst of catch-up ticks.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    config::SimConfig,
    error::SimulationError,
    grid::Grid,
    mouse::{Mouse, Progress},
    scene::Pose,
};

/// Number of catch-up ticks in one frame above which a burst is logged.
const BURST_WARNING_TICKS: u32 = 240;

/// Owner of the maze and the mouse, advanced by a frame clock.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Constants shared by every component.
    config: SimConfig,
    /// The loaded maze.
    grid: Grid,
    /// The mouse being simulated.
    mouse: Mouse,
    /// Elapsed time not yet consumed by ticks.
    lag: Duration,
    /// Number of ticks run so far.
    ticks: u64,
    /// Whether the mouse has left the maze.
    completed: bool,
}

impl Simulation {
    /// Creates a simulation with a fresh mouse at the entry of `grid`.
    pub fn new(grid: Grid, config: SimConfig) -> Self {
        Self {
            mouse: Mouse::new(&config),
            config,
            grid,
            lag: Duration::ZERO,
            ticks: 0,
            completed: false,
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The mouse.
    pub const fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    /// Elapsed time not yet consumed by ticks.
    pub const fn lag(&self) -> Duration {
        self.lag
    }

    /// Number of ticks run so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the mouse has left the maze.
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Simulated time covered by the ticks run so far.
    pub fn elapsed(&self) -> Duration {
        self.config
            .tick
            .saturating_mul(u32::try_from(self.ticks).unwrap_or(u32::MAX))
    }

    /// Pose to draw now, interpolated over the leftover lag.
    pub fn pose(&self) -> Pose {
        self.mouse.pose(self.lag.as_secs_f32())
    }

    /// Adds `elapsed` real time to the lag and runs every whole tick it covers.
    ///
    /// This function is called once per rendered frame with the wall-clock time since the
    /// previous one. It runs [`Self::step`] while the lag holds at least one tick, taking one
    /// tick off the lag each time, and leaves the remainder for the next frame and for
    /// [`Self::pose`] to interpolate with. The number of ticks per call is not capped: a long
    /// stall is followed by a burst of catch-up ticks, which is logged as a warning when it
    /// exceeds a few seconds of simulated time.
    ///
    /// Returns the number of ticks run. Once the mouse has left the maze no more time is
    /// accumulated and the call returns zero.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.completed {
            return 0;
        }

        self.lag = self.lag.saturating_add(elapsed);

        let mut ticks = 0;
        while !self.completed && self.lag >= self.config.tick {
            let _ = self.step();
            self.lag = self.lag.saturating_sub(self.config.tick);
            ticks += 1;
        }

        if ticks > BURST_WARNING_TICKS {
            warn!(ticks, ?elapsed, "simulation caught up after a long frame");
        }

        ticks
    }

    /// Runs exactly one tick.
    pub fn step(&mut self) -> Progress {
        let progress = self
            .mouse
            .update(&self.grid, &self.config, self.config.tick_seconds());
        self.ticks += 1;

        match progress {
            Progress::Arrived { row, column } => {
                debug!(row, column, tick = self.ticks, "mouse reached cell");
                if self.config.bread_crumbs {
                    self.grid.mark_visited(row, column);
                }
            }
            Progress::Completed if !self.completed => {
                self.completed = true;
                info!(
                    ticks = self.ticks,
                    elapsed = ?self.elapsed(),
                    "mouse left the maze"
                );
            }
            Progress::Completed | Progress::Running => {}
        }

        progress
    }

    /// Runs ticks back to back until the mouse leaves the maze, without a frame clock.
    ///
    /// Returns the number of ticks run in total.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::TickLimit`] if the mouse is still inside after `max_ticks` ticks
    pub fn run_to_completion(&mut self, max_ticks: u64) -> Result<u64, SimulationError> {
        while !self.completed {
            if self.ticks >= max_ticks {
                let (row, column) = self.mouse.cell();
                return Err(SimulationError::TickLimit {
                    limit: max_ticks,
                    row,
                    column,
                });
            }

            let _ = self.step();
        }

        Ok(self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{direction::Direction, file_loader, mouse::Mode};

    /// Builds a simulation from a description with the default configuration.
    fn simulation(input: &str) -> Simulation {
        let config = SimConfig::default();
        let grid = Grid::parse(input, &config).expect("test maze should parse");

        Simulation::new(grid, config)
    }

    #[test]
    fn test_new_simulation_is_idle() {
        let simulation = simulation("1 2 13 0");

        assert_eq!(simulation.ticks(), 0);
        assert_eq!(simulation.lag(), Duration::ZERO);
        assert!(!simulation.is_completed());
        assert_eq!(simulation.mouse().cell(), (0, 0));
    }

    #[test]
    fn test_advance_runs_whole_ticks_only() {
        let mut simulation = simulation("1 2 13 0");
        let tick = simulation.config().tick;

        assert_eq!(simulation.advance(tick / 2), 0);
        assert_eq!(simulation.ticks(), 0);
        assert_eq!(simulation.lag(), tick / 2);

        assert_eq!(simulation.advance(tick), 1);
        assert_eq!(simulation.ticks(), 1);
        assert_eq!(simulation.lag(), tick / 2);

        assert_eq!(simulation.advance(tick * 3), 3);
        assert_eq!(simulation.lag(), tick / 2);
    }

    #[test]
    fn test_same_result_at_any_frame_rate() {
        let mut coarse = simulation("1 2 13 0");
        let mut fine = simulation("1 2 13 0");
        let tick = coarse.config().tick;

        for _ in 0..20 {
            let _ = coarse.advance(tick * 10);
        }
        for _ in 0..200 {
            let _ = fine.advance(tick);
        }

        assert_eq!(coarse.ticks(), fine.ticks());
        assert_eq!(coarse.mouse(), fine.mouse());
    }

    #[test]
    fn test_two_cell_maze_completes() {
        // Cell (0, 0) is closed except to the east; cell (0, 1) records no walls.
        let mut simulation = simulation("1 2 13 0");

        let ticks = simulation
            .run_to_completion(10_000)
            .expect("mouse should leave a two cell maze");

        assert!(simulation.is_completed());
        assert!(ticks < 1_000, "two cells should not take {ticks} ticks");
        assert_eq!(simulation.mouse().cell(), (0, 2));
        assert_eq!(simulation.mouse().mode(), Mode::Stopped);
        assert_eq!(simulation.mouse().facing(), Direction::East);
    }

    #[test]
    fn test_two_cell_maze_probes_north_first() {
        let mut simulation = simulation("1 2 13 0");

        let _ = simulation.step();

        assert_eq!(simulation.mouse().facing(), Direction::North);
        assert_eq!(simulation.mouse().mode(), Mode::Turning);
    }

    #[test]
    fn test_no_ticks_after_completion() {
        let mut simulation = simulation("1 1 13");
        let _ = simulation
            .run_to_completion(10_000)
            .expect("mouse should leave a single cell maze");
        let ticks = simulation.ticks();
        let mouse = simulation.mouse().clone();

        assert_eq!(simulation.advance(Duration::from_secs(5)), 0);
        assert_eq!(simulation.ticks(), ticks);
        assert_eq!(simulation.lag(), Duration::ZERO);
        assert_eq!(simulation.mouse(), &mouse);
    }

    #[test]
    fn test_sealed_maze_hits_tick_limit() {
        let mut simulation = simulation("1 2 9 6");

        let result = simulation.run_to_completion(5_000);

        assert!(
            matches!(result, Err(SimulationError::TickLimit { limit: 5_000, .. })),
            "a sealed maze should never complete, got {result:?}"
        );
        assert_eq!(simulation.ticks(), 5_000);
    }

    #[test]
    fn test_bread_crumbs_mark_path() {
        let config = SimConfig::default().with_bread_crumbs(true);
        let grid = Grid::parse("1 3 13 5 4", &config).expect("test maze should parse");
        let mut simulation = Simulation::new(grid, config);

        let _ = simulation
            .run_to_completion(10_000)
            .expect("mouse should leave a straight corridor");

        assert!(simulation.grid().cells().all(|(_, _, cell)| cell.visited));
    }

    #[test]
    fn test_visited_flag_untouched_without_crumbs() {
        let mut simulation = simulation("1 3 13 5 4");

        let _ = simulation
            .run_to_completion(10_000)
            .expect("mouse should leave a straight corridor");

        let visited = simulation
            .grid()
            .cells()
            .filter(|(_, _, cell)| cell.visited)
            .count();
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_default_maze_is_solved() {
        let config = SimConfig::default();
        let grid = file_loader::default_maze(&config).expect("built-in maze should parse");
        let mut simulation = Simulation::new(grid, config);

        let ticks = simulation
            .run_to_completion(1_000_000)
            .expect("mouse should solve the built-in maze");

        assert!(ticks > 0);
        assert_eq!(simulation.mouse().cell(), (9, 10));
    }

    #[test]
    fn test_pose_uses_leftover_lag() {
        let mut simulation = simulation("1 1 13");
        let tick = simulation.config().tick;

        // First tick turns north, so the pose rotates back from east by the leftover lag.
        let _ = simulation.advance(tick + tick / 2);
        let pose = simulation.pose();

        assert!(pose.rotation < 90., "pose should lead the last tick");
        assert!(pose.rotation > 80., "pose should lag less than a tick");
    }
}
