//! A mouse finds its way out of a rectangular grid maze by always keeping a wall on its left.
//!
//! The simulation core ([`grid`], [`mouse`], [`policy`], [`simulation`]) runs on a fixed
//! timestep and knows nothing about terminals. The [`scene`] module turns its state into plain
//! geometry, which the Ratatui front end behind [`App`] draws on a canvas. A headless run drives
//! the same core through [`simulation::Simulation::run_to_completion`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod file_loader;
pub mod grid;
pub mod logging;
pub mod mouse;
pub mod policy;
pub mod scene;
pub mod simulation;

mod app;
mod events;
mod ui;

pub use app::App;
