//! routeviz: interactive terminal pathfinding visualizer.
//!
//! Paint walls and highlights on a grid, move the start and target tiles,
//! then watch a uniform-cost search flood the map one step per tick and
//! trace the shortest path back.

mod mapgen;
mod model;
mod render;

use std::io;
use std::time::Duration;

use crossterm::{
    cursor, event, execute,
    terminal::{self, ClearType},
};

use model::{Outcome, VizModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_terminal()?;
    let result = run();
    restore_terminal();
    result
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let mut model = VizModel::new();
    render::draw(&mut stdout, &model)?;

    loop {
        // Poll with the animation interval as timeout so ticks fire on
        // time; fall back to a relaxed poll while idle.
        let timeout = model
            .tick_interval()
            .unwrap_or(Duration::from_millis(100));
        if event::poll(timeout)? {
            while event::poll(Duration::ZERO)? {
                if model.handle_event(event::read()?) == Outcome::Quit {
                    return Ok(());
                }
            }
        }
        model.tick();
        render::draw(&mut stdout, &model)?;
    }
}

fn init_terminal() -> Result<(), Box<dyn std::error::Error>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All),
        event::EnableMouseCapture
    )?;
    Ok(())
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}
