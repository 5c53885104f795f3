//! Mouse motion state machine.
//!
//! The mouse is always in one of three modes. While [`Mode::Stopped`] it asks the
//! [`policy`](crate::policy) which way to probe and starts turning. While [`Mode::Turning`] it
//! rotates at a constant angular speed until it passes its new heading, snaps to it, and either
//! starts moving (passage open) or stops again (wall). While [`Mode::Moving`] it travels at a
//! constant speed until it reaches the center of the next cell, snaps to it and stops.
//!
//! Positions are only compared for equality at snap points; in between they are floating point
//! values that cross a threshold.

use tracing::trace;

use crate::{
    config::SimConfig,
    direction::{Direction, FULL_TURN},
    grid::Grid,
    policy::{self, LookPhase, Turn},
    scene::Pose,
};

/// A quarter rotation in degrees, the angle of every turn.
const QUARTER_TURN: f32 = FULL_TURN / 4.;

/// Motion sub-state of the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Resting on a cell center, about to choose a direction.
    Stopped,
    /// Rotating on the spot towards its facing direction.
    Turning,
    /// Travelling towards the center of a neighbouring cell.
    Moving,
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The mouse is still working its way through the maze.
    Running,
    /// The mouse finished a move and stopped on the center of this cell.
    Arrived {
        /// Row of the cell reached.
        row: usize,
        /// Column of the cell reached.
        column: usize,
    },
    /// The mouse has left the maze; no further ticks change anything.
    Completed,
}

/// Mutable state of the simulated mouse.
#[derive(Clone, Debug, PartialEq)]
pub struct Mouse {
    /// Current motion sub-state.
    mode: Mode,
    /// Row of the cell the mouse is in (or leaving).
    row: usize,
    /// Column of the cell the mouse is in (or leaving).
    column: usize,
    /// Cell the mouse is moving to; equal to the current cell unless moving.
    destination: (usize, usize),
    /// Horizontal scene coordinate of the mouse center.
    x: f32,
    /// Vertical scene coordinate of the mouse center.
    y: f32,
    /// Horizontal speed in scene units per second.
    velocity_x: f32,
    /// Vertical speed in scene units per second.
    velocity_y: f32,
    /// Direction the mouse faces, or is turning to face.
    facing: Direction,
    /// Next relative direction to probe.
    look: LookPhase,
    /// Rotation of the nose in degrees, within `[0, 360)`.
    pointing: f32,
    /// Angular speed in degrees per second; negative turns left.
    angular_velocity: f32,
    /// Degrees still to rotate before the current turn reaches its heading; negative once the
    /// turn has overshot.
    turn_remaining: f32,
}

impl Mouse {
    /// Creates a stopped mouse on the center of the entry cell, facing east and about to look
    /// left.
    pub fn new(config: &SimConfig) -> Self {
        let start = config.cell_center(0);

        Self {
            mode: Mode::Stopped,
            row: 0,
            column: 0,
            destination: (0, 0),
            x: start,
            y: start,
            velocity_x: 0.,
            velocity_y: 0.,
            facing: Direction::East,
            look: LookPhase::Left,
            pointing: Direction::East.degrees(),
            angular_velocity: 0.,
            turn_remaining: 0.,
        }
    }

    /// Current motion sub-state.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current cell as `(row, column)`.
    pub const fn cell(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Current scene position as `(x, y)`.
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Current velocity as `(x, y)` scene units per second.
    pub const fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    /// Direction the mouse faces, or is turning to face.
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Next relative direction to probe.
    pub const fn look(&self) -> LookPhase {
        self.look
    }

    /// Rotation of the nose in degrees.
    pub const fn pointing(&self) -> f32 {
        self.pointing
    }

    /// Angular speed in degrees per second; negative while turning left.
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Whether the mouse has passed the exit of `grid`.
    pub fn has_exited(&self, grid: &Grid) -> bool {
        self.x >= grid.exit_x()
    }

    /// Pose to draw `lag` seconds after the last tick, extrapolated along the current velocities.
    pub fn pose(&self, lag: f32) -> Pose {
        Pose {
            x: self.velocity_x.mul_add(lag, self.x),
            y: self.velocity_y.mul_add(lag, self.y),
            rotation: self
                .angular_velocity
                .mul_add(lag, self.pointing)
                .rem_euclid(FULL_TURN),
        }
    }

    /// Advances the mouse by one tick of `dt` seconds.
    ///
    /// This function runs one step of the motion state machine. A stopped mouse that has already
    /// passed the exit of `grid` reports [`Progress::Completed`] and is left untouched, so calling
    /// it again is harmless. Any other stopped mouse asks the [`policy`](crate::policy) for the
    /// next probe and starts turning. A turning mouse rotates by its angular velocity and, once
    /// the quarter turn is done, snaps onto its heading and either starts moving through an open
    /// side or stops in front of a wall. A moving mouse travels along its heading and reports
    /// [`Progress::Arrived`] on the tick it snaps onto the center of the next cell.
    pub fn update(&mut self, grid: &Grid, config: &SimConfig, dt: f32) -> Progress {
        match self.mode {
            Mode::Stopped => {
                if self.has_exited(grid) {
                    return Progress::Completed;
                }

                policy::look_next(self, config.turning_speed);
                Progress::Running
            }
            Mode::Turning => {
                self.turn(grid, config, dt);
                Progress::Running
            }
            Mode::Moving => self.travel(config, dt),
        }
    }

    /// Replaces the look phase.
    pub(crate) fn set_look(&mut self, look: LookPhase) {
        self.look = look;
    }

    /// Turns the facing a quarter in the direction of `turn` and starts rotating towards it.
    pub(crate) fn start_turning(&mut self, turn: Turn, turning_speed: f32) {
        self.facing = match turn {
            Turn::Left => self.facing.turn_left(),
            Turn::Right => self.facing.turn_right(),
        };
        self.angular_velocity = turn.sign() * turning_speed;
        self.turn_remaining = QUARTER_TURN;
        self.mode = Mode::Turning;
    }

    /// One tick of [`Mode::Turning`].
    ///
    /// The angle still to turn is tracked apart from the wrapped pointing angle, so a tick that
    /// rotates half a turn or more still ends the turn on that tick.
    fn turn(&mut self, grid: &Grid, config: &SimConfig, dt: f32) {
        let rotation = self.angular_velocity * dt;
        self.pointing = (self.pointing + rotation).rem_euclid(FULL_TURN);
        self.turn_remaining -= rotation.abs();

        if self.turn_remaining >= 0. && self.angular_velocity != 0. {
            return;
        }

        self.pointing = self.facing.degrees();
        self.angular_velocity = 0.;
        self.turn_remaining = 0.;

        match self.facing.step(self.row, self.column) {
            Some(destination) if grid.is_open(self.row, self.column, self.facing) => {
                self.start_moving(destination, config);
            }
            _ => {
                trace!(
                    row = self.row,
                    column = self.column,
                    facing = %self.facing,
                    "probe blocked"
                );
                self.mode = Mode::Stopped;
            }
        }
    }

    /// Sets the velocity for a move towards `destination` along the facing direction.
    fn start_moving(&mut self, destination: (usize, usize), config: &SimConfig) {
        let (row_delta, column_delta) = self.facing.delta();

        self.destination = destination;
        self.velocity_x = f32::from(column_delta) * config.moving_speed;
        self.velocity_y = f32::from(row_delta) * config.moving_speed;
        self.mode = Mode::Moving;
    }

    /// One tick of [`Mode::Moving`].
    fn travel(&mut self, config: &SimConfig, dt: f32) -> Progress {
        self.x = self.velocity_x.mul_add(dt, self.x);
        self.y = self.velocity_y.mul_add(dt, self.y);

        let (row, column) = self.destination;
        let (target_x, target_y) = (config.cell_center(column), config.cell_center(row));
        let arrived = match self.facing {
            Direction::East => self.x >= target_x,
            Direction::West => self.x <= target_x,
            Direction::South => self.y >= target_y,
            Direction::North => self.y <= target_y,
        };
        if !arrived {
            return Progress::Running;
        }

        self.x = target_x;
        self.y = target_y;
        self.row = row;
        self.column = column;
        self.velocity_x = 0.;
        self.velocity_y = 0.;
        self.look = LookPhase::Left;
        self.mode = Mode::Stopped;

        Progress::Arrived { row, column }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "Snapped values are assigned exactly, so exact comparison is the property under test."
)]
mod tests {
    use super::*;

    /// Builds a grid from a description with the default configuration.
    fn grid(input: &str) -> Grid {
        Grid::parse(input, &SimConfig::default()).expect("test maze should parse")
    }

    /// Ticks the mouse until `done` holds, returning the number of ticks taken.
    fn tick_until<F>(mouse: &mut Mouse, grid: &Grid, config: &SimConfig, mut done: F) -> usize
    where
        F: FnMut(&Mouse, Progress) -> bool,
    {
        for tick in 1..=10_000 {
            let progress = mouse.update(grid, config, config.tick_seconds());
            if done(mouse, progress) {
                return tick;
            }
        }

        panic!("mouse never reached the expected state");
    }

    #[test]
    fn test_new_mouse_starts_at_entry() {
        let config = SimConfig::default();
        let mouse = Mouse::new(&config);

        assert_eq!(mouse.mode(), Mode::Stopped);
        assert_eq!(mouse.cell(), (0, 0));
        assert_eq!(mouse.facing(), Direction::East);
        assert_eq!(mouse.look(), LookPhase::Left);
        assert_eq!(mouse.position(), (config.cell_center(0), config.cell_center(0)));
        assert_eq!(mouse.velocity(), (0., 0.));
        assert!((mouse.pointing() - 90.).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stopped_probes_left_first() {
        let config = SimConfig::default();
        let grid = grid("2 2 0 0 0 0");
        let mut mouse = Mouse::new(&config);

        let progress = mouse.update(&grid, &config, config.tick_seconds());

        assert_eq!(progress, Progress::Running);
        assert_eq!(mouse.mode(), Mode::Turning);
        assert_eq!(mouse.facing(), Direction::North);
        assert_eq!(mouse.look(), LookPhase::Forward);
        assert!((mouse.angular_velocity() + config.turning_speed).abs() < f32::EPSILON);
    }

    #[test]
    fn test_turn_snaps_exactly_to_target() {
        let config = SimConfig::default();
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);

        let _ = mouse.update(&grid, &config, config.tick_seconds());
        let ticks = tick_until(&mut mouse, &grid, &config, |mouse, _| {
            mouse.mode() != Mode::Turning
        });

        // A quarter turn at 180 degrees per second takes half a second.
        assert!((29..=32).contains(&ticks), "turn took {ticks} ticks");
        assert_eq!(mouse.pointing(), Direction::North.degrees());
        assert_eq!(mouse.angular_velocity(), 0.);
        assert_eq!(mouse.mode(), Mode::Stopped, "north of the entry is walled");
        assert_eq!(mouse.position(), (config.cell_center(0), config.cell_center(0)));
    }

    #[test]
    fn test_turn_wraps_through_north() {
        let config = SimConfig::default();
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);

        // Four blocked probes walk the heading round, then a fresh left probe follows.
        let mut facings = Vec::new();
        for _ in 0..5 {
            let _ = mouse.update(&grid, &config, config.tick_seconds());
            let _ = tick_until(&mut mouse, &grid, &config, |mouse, _| {
                mouse.mode() == Mode::Stopped
            });
            assert_eq!(mouse.pointing(), mouse.facing().degrees());
            facings.push(mouse.facing());
        }

        assert_eq!(
            facings,
            vec![
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West,
                Direction::South,
            ]
        );
    }

    #[test]
    fn test_right_turn_from_west_to_north() {
        let config = SimConfig::default();
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);
        mouse.facing = Direction::West;
        mouse.pointing = Direction::West.degrees();
        mouse.start_turning(Turn::Right, config.turning_speed);

        let ticks = tick_until(&mut mouse, &grid, &config, |mouse, _| {
            mouse.mode() == Mode::Stopped
        });

        assert!(ticks > 1, "the turn should take time, not snap at once");
        assert_eq!(mouse.facing(), Direction::North);
        assert_eq!(mouse.pointing(), 0.);
    }

    #[test]
    fn test_move_snaps_to_next_center() {
        let config = SimConfig::default();
        // Entry open to the east only.
        let grid = grid("1 2 13 15");
        let mut mouse = Mouse::new(&config);
        mouse.set_look(LookPhase::Forward);
        mouse.facing = Direction::North;
        mouse.pointing = Direction::North.degrees();

        let _ = tick_until(&mut mouse, &grid, &config, |mouse, _| {
            mouse.mode() == Mode::Moving
        });
        assert_eq!(mouse.facing(), Direction::East);
        assert_eq!(mouse.velocity(), (config.moving_speed, 0.));

        let mut arrival = None;
        let ticks = tick_until(&mut mouse, &grid, &config, |_, progress| {
            if let Progress::Arrived { row, column } = progress {
                arrival = Some((row, column));
                true
            } else {
                false
            }
        });

        // One cell at two cells per second takes half a second.
        assert!((29..=32).contains(&ticks), "move took {ticks} ticks");
        assert_eq!(arrival, Some((0, 1)));
        assert_eq!(mouse.cell(), (0, 1));
        assert_eq!(mouse.position(), (config.cell_center(1), config.cell_center(0)));
        assert_eq!(mouse.velocity(), (0., 0.));
        assert_eq!(mouse.look(), LookPhase::Left);
        assert_eq!(mouse.mode(), Mode::Stopped);
    }

    #[test]
    fn test_move_north_decrements_row() {
        let config = SimConfig::default();
        let grid = grid("2 1 11 14");
        let mut mouse = Mouse::new(&config);
        mouse.row = 1;
        mouse.y = config.cell_center(1);
        mouse.facing = Direction::East;
        mouse.pointing = Direction::East.degrees();

        // Left probe from east faces north, which is open.
        let _ = tick_until(&mut mouse, &grid, &config, |_, progress| {
            matches!(progress, Progress::Arrived { .. })
        });

        assert_eq!(mouse.cell(), (0, 0));
        assert_eq!(mouse.facing(), Direction::North);
        assert_eq!(mouse.position(), (config.cell_center(0), config.cell_center(0)));
    }

    #[test]
    fn test_blocked_probe_returns_to_stopped() {
        let config = SimConfig::default();
        let grid = grid("1 2 15 15");
        let mut mouse = Mouse::new(&config);

        let _ = mouse.update(&grid, &config, config.tick_seconds());
        let _ = tick_until(&mut mouse, &grid, &config, |mouse, _| {
            mouse.mode() != Mode::Turning
        });

        assert_eq!(mouse.mode(), Mode::Stopped);
        assert_eq!(mouse.cell(), (0, 0));
        assert_eq!(mouse.look(), LookPhase::Forward);
    }

    #[test]
    fn test_stopped_at_exit_is_idempotent() {
        let config = SimConfig::default();
        let grid = grid("1 1 13");
        let mut mouse = Mouse::new(&config);
        mouse.column = 1;
        mouse.x = config.cell_center(1);
        let before = mouse.clone();

        for _ in 0..10 {
            assert_eq!(
                mouse.update(&grid, &config, config.tick_seconds()),
                Progress::Completed
            );
        }

        assert_eq!(mouse, before);
    }

    #[test]
    fn test_single_open_cell_completes() {
        let config = SimConfig::default();
        let grid = grid("1 1 13");
        let mut mouse = Mouse::new(&config);

        let _ = tick_until(&mut mouse, &grid, &config, |_, progress| {
            progress == Progress::Completed
        });

        assert_eq!(mouse.cell(), (0, 1));
        assert!(mouse.has_exited(&grid));
    }

    #[test]
    fn test_pose_interpolates_along_velocity() {
        let config = SimConfig::default();
        let mut mouse = Mouse::new(&config);
        mouse.velocity_x = 80.;
        mouse.angular_velocity = -180.;
        mouse.pointing = 0.;

        let pose = mouse.pose(0.25);

        assert!((pose.x - (config.cell_center(0) + 20.)).abs() < 1e-4);
        assert!((pose.y - config.cell_center(0)).abs() < 1e-4);
        assert!((pose.rotation - 315.).abs() < 1e-4);
    }

    #[test]
    fn test_turn_ends_when_a_tick_covers_a_full_turn() {
        let config = SimConfig {
            turning_speed: FULL_TURN * 60.,
            ..SimConfig::default()
        };
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);

        let _ = mouse.update(&grid, &config, config.tick_seconds());
        let _ = mouse.update(&grid, &config, config.tick_seconds());

        assert_eq!(mouse.mode(), Mode::Stopped, "the turn should end on its first tick");
        assert_eq!(mouse.facing(), Direction::North);
        assert_eq!(mouse.pointing(), Direction::North.degrees());
        assert_eq!(mouse.angular_velocity(), 0.);
    }

    #[test]
    fn test_turn_ends_when_a_tick_covers_more_than_half_a_turn() {
        let config = SimConfig {
            turning_speed: 250. * 60.,
            ..SimConfig::default()
        };
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);
        mouse.facing = Direction::West;
        mouse.pointing = Direction::West.degrees();
        mouse.start_turning(Turn::Right, config.turning_speed);

        let _ = mouse.update(&grid, &config, config.tick_seconds());

        assert_eq!(mouse.mode(), Mode::Stopped, "the turn should end on its first tick");
        assert_eq!(mouse.pointing(), Direction::North.degrees());
    }

    #[test]
    fn test_turn_overshoot_is_snapped() {
        let config = SimConfig::default();
        let grid = grid("1 1 15");
        let mut mouse = Mouse::new(&config);
        mouse.start_turning(Turn::Left, config.turning_speed);

        // Twenty five degrees per tick passes the heading on the fourth tick.
        for _ in 0..3 {
            let _ = mouse.update(&grid, &config, 25. / config.turning_speed);
            assert_eq!(mouse.mode(), Mode::Turning);
        }
        let _ = mouse.update(&grid, &config, 25. / config.turning_speed);

        assert_eq!(mouse.mode(), Mode::Stopped);
        assert_eq!(mouse.pointing(), Direction::North.degrees());
    }
}
