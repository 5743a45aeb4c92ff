//! Terminal rendering via queued crossterm commands.
//!
//! Every frame redraws the whole map: tiles are two columns wide so they
//! come out roughly square, with the search state (frontier, visited, path)
//! overlaid on top of the tile colors.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use routeviz_grid::{Point, Tile};
use routeviz_search::CellStatus;

use crate::model::{Phase, VizModel, MAP_HEIGHT, MAP_TOP, MAP_WIDTH};

// Tile colors, following the original editor legend.
const EMPTY_BG: Color = Color::White;
const WALL_BG: Color = Color::DarkGrey;
const HIGHLIGHT_BG: Color = Color::Cyan;
const START_BG: Color = Color::Green;
const TARGET_BG: Color = Color::Rgb { r: 255, g: 165, b: 0 };

// Search overlay colors.
const FRONTIER_BG: Color = Color::Yellow;
const VISITED_BG: Color = Color::Blue;
const PATH_BG: Color = Color::Magenta;

const LABEL_FG: Color = Color::Black;

pub fn draw(w: &mut impl Write, model: &VizModel) -> io::Result<()> {
    draw_status(w, model)?;
    draw_map(w, model)?;
    draw_help(w)?;
    w.flush()
}

fn draw_map(w: &mut impl Write, model: &VizModel) -> io::Result<()> {
    for y in 0..MAP_HEIGHT {
        queue!(w, MoveTo(0, (y + MAP_TOP) as u16))?;
        for x in 0..MAP_WIDTH {
            let p = Point::new(x, y);
            let (bg, label) = cell_appearance(model, p);
            queue!(w, SetBackgroundColor(bg), SetForegroundColor(LABEL_FG))?;
            queue!(w, Print(label))?;
        }
        queue!(w, ResetColor)?;
    }
    Ok(())
}

/// Background color and two-character label for one map cell.
fn cell_appearance(model: &VizModel, p: Point) -> (Color, &'static str) {
    match model.map().at(p) {
        Some(Tile::Start) => return (START_BG, "S "),
        Some(Tile::Target) => return (TARGET_BG, "T "),
        _ => {}
    }
    if model.path().contains(&p) {
        return (PATH_BG, "  ");
    }
    if let Some(session) = model.session() {
        match session.status_at(p) {
            CellStatus::Frontier => return (FRONTIER_BG, "  "),
            CellStatus::Visited => return (VISITED_BG, "  "),
            CellStatus::Unvisited => {}
        }
    }
    match model.map().at(p) {
        Some(Tile::Wall) => (WALL_BG, "  "),
        Some(Tile::Highlight) => (HIGHLIGHT_BG, "  "),
        _ => (EMPTY_BG, "  "),
    }
}

fn draw_status(w: &mut impl Write, model: &VizModel) -> io::Result<()> {
    let phase = match model.phase() {
        Phase::Editing => "editing".to_string(),
        Phase::Searching => format!("searching... step {}", model.steps()),
        Phase::Tracing(_) => "tracing path".to_string(),
        Phase::Done { route: true } => {
            let cost = model
                .session()
                .map(|s| s.distance_at(model.map().target()))
                .unwrap_or(0);
            format!("done: path cost {cost}")
        }
        Phase::Done { route: false } => "done: no route exists".to_string(),
    };
    let line = format!(
        "routeviz   cursor: {}   speed: {}   {}",
        model.cursor().label(),
        model.speed_label(),
        phase
    );
    queue!(
        w,
        MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        Print(line)
    )
}

fn draw_help(w: &mut impl Write) -> io::Result<()> {
    queue!(
        w,
        MoveTo(0, (MAP_TOP + MAP_HEIGHT) as u16),
        Clear(ClearType::CurrentLine),
        Print("click/drag: paint   h/w/s/t: cursor   r: run   space: step   g: random walls   x: clear   1-5: speed   q: quit")
    )
}
