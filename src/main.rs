//! This crate contains the source code for the binary of the mazemouse animation.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazemouse::{
    cli::Cli,
    file_loader,
    logging::{self, Target},
    simulation::Simulation,
    App,
};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    logging::init(Target::select(cli.log_file.as_deref(), cli.headless), cli.verbose)?;

    let config = cli.config();
    let loaded = match &cli.maze {
        Some(path) => file_loader::load(path, &config),
        None => file_loader::default_maze(&config),
    };
    let grid = match loaded {
        Ok(grid) => grid,
        Err(err) => {
            tracing::error!(error = %err, "failed to load maze");
            eprintln!("Could not initialize maze: {err}");
            return Ok(());
        }
    };

    let mut simulation = Simulation::new(grid, config);

    if cli.headless {
        let ticks = simulation.run_to_completion(cli.max_ticks)?;
        let (row, column) = simulation.mouse().cell();
        println!(
            "Mouse left the maze after {ticks} ticks ({:.2}s simulated) at cell ({row}, {column}).",
            simulation.elapsed().as_secs_f64()
        );

        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = App::new(simulation).run(&mut terminal);
    ratatui::restore();

    result
}
