//! User interface rendering of the maze, the mouse and the status line.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{scene, simulation::Simulation, App};

/// Color of the maze walls.
pub(crate) const WALL_COLOR: Color = Color::Rgb(30, 144, 255);

/// Color of the mouse outline.
pub(crate) const MOUSE_COLOR: Color = Color::Rgb(138, 43, 226);

/// Color of the bread crumbs.
pub(crate) const BREAD_CRUMB_COLOR: Color = Color::Rgb(218, 165, 32);

/// Renders one frame of the application.
///
/// The frame is split into the maze canvas and a status block at the bottom. The canvas is
/// shrunk to keep the aspect ratio of the scene, counting a terminal cell as twice as tall as it
/// is wide.
///
/// # Errors
///
/// This function may return errors from layout retrieval or from scenes too large to fit the
/// integer arithmetic of the terminal layout.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze area
        Constraint::Length(3), // Status block
    ])
    .split(frame.area());

    let maze_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze area from layout")?;
    let status_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    maze(&app.simulation, frame, maze_area)?;
    status(&app.simulation, frame, status_area);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Largest area inside `area`, centered, with the aspect ratio of a scene `columns` cells wide and
/// `rows` cells tall.
///
/// # Errors
///
/// This function may return errors if the scene dimensions do not fit the layout arithmetic.
pub(crate) fn fit(area: Rect, columns: usize, rows: usize) -> Result<Rect> {
    let columns = i32::try_from(columns)?;
    let rows = i32::try_from(rows)?;
    let area_width = i32::from(area.width);
    let area_height = i32::from(area.height);

    // A terminal cell is about half as wide as it is tall, hence the factor of two.
    let width = rounded_div::i32(
        area_height
            .checked_mul(2)
            .and_then(|height| height.checked_mul(columns))
            .ok_or_eyre("scene too wide for the terminal layout")?,
        rows,
    );
    let (width, height) = if width <= area_width {
        (width, area_height)
    } else {
        let height = rounded_div::i32(
            area_width
                .checked_mul(rows)
                .ok_or_eyre("scene too tall for the terminal layout")?,
            columns
                .checked_mul(2)
                .ok_or_eyre("scene too wide for the terminal layout")?,
        );
        (area_width, height.min(area_height))
    };

    let [space] = Layout::horizontal([Constraint::Length(u16::try_from(width)?)])
        .flex(Flex::Center)
        .areas(area);
    let [space] = Layout::vertical([Constraint::Length(u16::try_from(height)?)])
        .flex(Flex::Center)
        .areas(space);

    Ok(space)
}

/// Renders the walls, the bread crumbs and the mouse on a canvas spanning the whole scene.
///
/// # Errors
///
/// This function may return errors if the canvas area cannot be computed.
pub(crate) fn maze(simulation: &Simulation, frame: &mut Frame, area: Rect) -> Result<()> {
    let grid = simulation.grid();
    let config = simulation.config();
    let (width, height) = scene::extent(grid, config);
    let space = fit(area, grid.columns() + 2, grid.rows() + 2)?;

    // Pre-compute canvas coordinates outside the paint closure
    let walls: Vec<CanvasLine> = scene::wall_segments(grid, config)
        .into_iter()
        .map(|segment| {
            let (x1, y1) = scene::to_canvas(segment.from, height);
            let (x2, y2) = scene::to_canvas(segment.to, height);
            CanvasLine::new(x1, y1, x2, y2, WALL_COLOR)
        })
        .collect();
    let crumbs: Vec<Circle> = if config.bread_crumbs {
        scene::bread_crumbs(grid)
            .into_iter()
            .map(|point| {
                let (x, y) = scene::to_canvas(point, height);
                Circle {
                    x,
                    y,
                    radius: f64::from(config.bread_crumb_size),
                    color: BREAD_CRUMB_COLOR,
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    let corners = scene::mouse_triangle(simulation.pose(), config.mouse_size)
        .map(|corner| scene::to_canvas(corner, height));
    let outline: Vec<CanvasLine> = corners
        .iter()
        .zip(corners.iter().cycle().skip(1))
        .map(|(from, to)| CanvasLine::new(from.0, from.1, to.0, to.1, MOUSE_COLOR))
        .collect();

    let canvas = Canvas::default()
        .x_bounds([0., f64::from(width)])
        .y_bounds([0., f64::from(height)])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for wall in &walls {
                ctx.draw(wall);
            }
            for crumb in &crumbs {
                ctx.draw(crumb);
            }
            for side in &outline {
                ctx.draw(side);
            }
        });

    frame.render_widget(canvas, space);

    Ok(())
}

/// Text shown in the status block.
pub(crate) fn status_text(simulation: &Simulation) -> String {
    if simulation.is_completed() {
        format!(
            "Solved in {:.1}s ({} ticks)",
            simulation.elapsed().as_secs_f32(),
            simulation.ticks()
        )
    } else {
        let (row, column) = simulation.mouse().cell();
        format!(
            "Tick {} / cell ({row}, {column}) facing {}",
            simulation.ticks(),
            simulation.mouse().facing()
        )
    }
}

/// Renders the status block with a top border at the bottom of the screen.
pub(crate) fn status(simulation: &Simulation, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(status_text(simulation))
        .title_bottom("(q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(WALL_COLOR))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(block, area);
}
