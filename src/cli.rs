//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{SimConfig, DEFAULT_TICK_RATE};

/// Watch a mouse find its way out of a maze by following the wall on its left.
#[derive(Debug, Parser)]
#[command(name = "mazemouse", version, about)]
pub struct Cli {
    /// Maze description file: rows, columns, then one wall mask per cell (N=1 E=2 S=4 W=8).
    /// The built-in 10x10 maze is used when omitted.
    pub maze: Option<PathBuf>,
    /// Simulation ticks per second.
    #[arg(
        long,
        default_value_t = DEFAULT_TICK_RATE,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub tick_rate: u32,
    /// Drop a bread crumb in every cell the mouse reaches.
    #[arg(long)]
    pub crumbs: bool,
    /// Run the simulation without the terminal interface and print a summary.
    #[arg(long)]
    pub headless: bool,
    /// Give up a headless run after this many ticks.
    #[arg(long, default_value_t = 1_000_000)]
    pub max_ticks: u64,
    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log at debug level instead of info.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Simulation configuration selected by the arguments.
    pub fn config(&self) -> SimConfig {
        SimConfig::new()
            .with_tick_rate(self.tick_rate)
            .with_bread_crumbs(self.crumbs)
    }
}
