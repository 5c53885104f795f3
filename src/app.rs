//! Core application state and main loop of the terminal front end.

use std::{
    io,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{events, simulation::Simulation, ui};

/// Application state container for the maze animation.
///
/// This structure holds the state from which Ratatui renders every frame and which Crossterm
/// events write to.
pub struct App {
    /// Application exit flag.
    ///
    /// Set when the user asks to close the window; the main loop returns on the next pass.
    pub(crate) exit: bool,
    /// The running simulation.
    ///
    /// The app only feeds it elapsed time and reads it back for drawing.
    pub(crate) simulation: Simulation,
    /// Instant the previous frame started, the base of the frame clock.
    pub(crate) last_frame: Instant,
}

impl App {
    /// Creates the application around a simulation that has not run yet.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            exit: false,
            simulation,
            last_frame: Instant::now(),
        }
    }

    /// The simulation driven by this application.
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Runs the main loop of the application.
    ///
    /// Each pass measures the time since the previous frame, lets the simulation catch up, draws
    /// the maze and handles pending input. The loop keeps drawing after the mouse has left the
    /// maze and returns once the user closes the application.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.last_frame = Instant::now();

        while !self.exit {
            let _ = self.tick_frame(Instant::now());
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Advances the frame clock to `now` and feeds the elapsed time to the simulation.
    ///
    /// Returns the time elapsed since the previous frame.
    pub(crate) fn tick_frame(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let _ = self.simulation.advance(elapsed);

        elapsed
    }
}
