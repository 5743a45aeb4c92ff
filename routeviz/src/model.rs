//! Application model: editor state, run phases, input handling.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use routeviz_grid::{Point, Tile, TileMap};
use routeviz_search::SearchSession;

use crate::mapgen;

pub const MAP_WIDTH: i32 = 40;
pub const MAP_HEIGHT: i32 = 20;

/// Screen row of the first map row (row 0 is the status line).
pub const MAP_TOP: i32 = 1;

/// Tick intervals selectable with the number keys; `None` is manual mode
/// (advance with the space bar).
pub const SPEEDS: [(&str, Option<Duration>); 5] = [
    ("10ms", Some(Duration::from_millis(10))),
    ("50ms", Some(Duration::from_millis(50))),
    ("100ms", Some(Duration::from_millis(100))),
    ("500ms", Some(Duration::from_millis(500))),
    ("manual", None),
];

const DEFAULT_SPEED: usize = 2;

/// What a mouse click paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Highlight,
    Wall,
    Start,
    Target,
}

impl Cursor {
    pub fn label(self) -> &'static str {
        match self {
            Cursor::Highlight => "highlight",
            Cursor::Wall => "wall",
            Cursor::Start => "start",
            Cursor::Target => "target",
        }
    }
}

/// Animation phase of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    /// One search step per tick.
    Searching,
    /// Walking the found path backward from this cell, one hop per tick.
    Tracing(Point),
    Done {
        route: bool,
    },
}

/// What the event loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// The visualizer model: the editable map, the active search session (if
/// any), and the UI state machine around them.
pub struct VizModel {
    map: TileMap,
    session: Option<SearchSession>,
    cursor: Cursor,
    phase: Phase,
    speed: usize,
    path: Vec<Point>,
    steps: usize,
    last_tick: Instant,
}

impl VizModel {
    pub fn new() -> Self {
        let start = Point::new(MAP_WIDTH / 4, MAP_HEIGHT / 2);
        let target = Point::new(MAP_WIDTH * 3 / 4, MAP_HEIGHT / 2);
        Self {
            map: TileMap::new(MAP_WIDTH, MAP_HEIGHT, &[], start, target),
            session: None,
            cursor: Cursor::Wall,
            phase: Phase::Editing,
            speed: DEFAULT_SPEED,
            path: Vec::new(),
            steps: 0,
            last_tick: Instant::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn handle_event(&mut self, event: Event) -> Outcome {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some(p) = screen_to_map(column, row) {
                    self.apply_cursor(p);
                }
                Outcome::Continue
            }
            _ => Outcome::Continue,
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Outcome {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Outcome::Quit,
            KeyCode::Char('h') => self.cursor = Cursor::Highlight,
            KeyCode::Char('w') => self.cursor = Cursor::Wall,
            KeyCode::Char('s') => self.cursor = Cursor::Start,
            KeyCode::Char('t') => self.cursor = Cursor::Target,
            KeyCode::Char(c @ '1'..='5') => {
                self.speed = c as usize - '1' as usize;
            }
            KeyCode::Char('r') => self.start_search(),
            KeyCode::Char(' ') => {
                // Manual advance; harmless when an interval is active.
                self.advance();
            }
            KeyCode::Char('g') => {
                self.abandon_run();
                mapgen::scatter_walls(&mut self.map, &mut rand::rng());
            }
            KeyCode::Char('x') => {
                self.abandon_run();
                self.clear_board();
            }
            _ => {}
        }
        Outcome::Continue
    }

    /// Apply the active cursor to a map tile. Any edit invalidates a running
    /// or finished search.
    fn apply_cursor(&mut self, p: Point) {
        let changed = match self.cursor {
            // Toggle between empty and highlighted.
            Cursor::Highlight => match self.map.at(p) {
                Some(Tile::Empty) => self.map.set_highlight(p),
                Some(Tile::Highlight) => self.map.set_empty(p),
                _ => false,
            },
            // Toggle between wall and empty; highlights become walls.
            Cursor::Wall => match self.map.at(p) {
                Some(Tile::Wall) => self.map.set_empty(p),
                Some(Tile::Empty | Tile::Highlight) => self.map.set_wall(p),
                _ => false,
            },
            Cursor::Start => self.map.move_start(p),
            Cursor::Target => self.map.move_target(p),
        };
        if changed {
            self.abandon_run();
        }
    }

    fn clear_board(&mut self) {
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                self.map.set_empty(Point::new(x, y));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search control
    // -----------------------------------------------------------------------

    fn start_search(&mut self) {
        self.map.clear_highlights();
        self.path.clear();
        self.steps = 0;
        self.session = Some(SearchSession::new(&self.map));
        self.phase = Phase::Searching;
        self.last_tick = Instant::now();
        log::debug!("search started from {} to {}", self.map.start(), self.map.target());
    }

    fn abandon_run(&mut self) {
        self.session = None;
        self.path.clear();
        self.steps = 0;
        self.phase = Phase::Editing;
    }

    /// How long until the next animation tick, when one is due at all.
    pub fn tick_interval(&self) -> Option<Duration> {
        match self.phase {
            Phase::Searching | Phase::Tracing(_) => SPEEDS[self.speed].1,
            _ => None,
        }
    }

    /// Advance the animation if its tick interval has elapsed.
    pub fn tick(&mut self) {
        let Some(interval) = self.tick_interval() else {
            return;
        };
        if self.last_tick.elapsed() >= interval {
            self.advance();
            self.last_tick = Instant::now();
        }
    }

    /// One unit of animation: a search step while searching, one backward
    /// hop while tracing the path.
    fn advance(&mut self) {
        match self.phase {
            Phase::Searching => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                session.step(&self.map);
                self.steps += 1;
                if session.done() {
                    if session.route_exists() {
                        log::debug!(
                            "route found after {} steps, cost {}",
                            self.steps,
                            session.distance_at(self.map.target())
                        );
                        self.path.push(self.map.target());
                        self.phase = Phase::Tracing(self.map.target());
                    } else {
                        log::debug!("no route after {} steps", self.steps);
                        self.phase = Phase::Done { route: false };
                    }
                }
            }
            Phase::Tracing(cur) => {
                let Some(session) = self.session.as_ref() else {
                    return;
                };
                let prev = session.backtrack(cur);
                self.path.push(prev);
                self.phase = if prev == self.map.start() {
                    Phase::Done { route: true }
                } else {
                    Phase::Tracing(prev)
                };
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Render access
    // -----------------------------------------------------------------------

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn speed_label(&self) -> &'static str {
        SPEEDS[self.speed].0
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Default for VizModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a terminal cell to a map coordinate. Map tiles are drawn two
/// columns wide below the status line.
fn screen_to_map(column: u16, row: u16) -> Option<Point> {
    let x = column as i32 / 2;
    let y = row as i32 - MAP_TOP;
    if x >= 0 && x < MAP_WIDTH && y >= 0 && y < MAP_HEIGHT {
        Some(Point::new(x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeviz_search::CellStatus;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), crossterm::event::KeyModifiers::NONE))
    }

    fn run_until_done(model: &mut VizModel) {
        // Manual speed so advance() is driven directly.
        model.handle_event(key('5'));
        let bound = (MAP_WIDTH * MAP_HEIGHT * 2) as usize;
        for _ in 0..bound {
            if let Phase::Done { .. } = model.phase() {
                return;
            }
            model.advance();
        }
        panic!("animation did not finish");
    }

    #[test]
    fn quit_keys() {
        let mut model = VizModel::new();
        assert_eq!(model.handle_event(key('q')), Outcome::Quit);
        assert_eq!(
            model.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Esc,
                crossterm::event::KeyModifiers::NONE
            ))),
            Outcome::Quit
        );
        assert_eq!(model.handle_event(key('w')), Outcome::Continue);
    }

    #[test]
    fn cursor_selection_and_painting() {
        let mut model = VizModel::new();
        model.handle_event(key('w'));
        assert_eq!(model.cursor(), Cursor::Wall);

        let p = Point::new(0, 0);
        model.apply_cursor(p);
        assert_eq!(model.map().at(p), Some(Tile::Wall));
        // Second application toggles back.
        model.apply_cursor(p);
        assert_eq!(model.map().at(p), Some(Tile::Empty));

        model.handle_event(key('h'));
        model.apply_cursor(p);
        assert_eq!(model.map().at(p), Some(Tile::Highlight));
    }

    #[test]
    fn full_run_reaches_done_with_route() {
        let mut model = VizModel::new();
        model.handle_event(key('r'));
        assert_eq!(model.phase(), Phase::Searching);
        run_until_done(&mut model);
        assert_eq!(model.phase(), Phase::Done { route: true });
        // The traced path spans start to target.
        assert_eq!(model.path().first(), Some(&model.map().target()));
        assert_eq!(model.path().last(), Some(&model.map().start()));
    }

    #[test]
    fn editing_resets_a_finished_run() {
        let mut model = VizModel::new();
        model.handle_event(key('r'));
        run_until_done(&mut model);
        assert!(model.session().is_some());

        model.apply_cursor(Point::new(0, 0));
        assert_eq!(model.phase(), Phase::Editing);
        assert!(model.session().is_none());
        assert!(model.path().is_empty());
    }

    #[test]
    fn search_state_visible_while_running() {
        let mut model = VizModel::new();
        model.handle_event(key('5'));
        model.handle_event(key('r'));
        model.advance();
        let session = model.session().expect("session exists while searching");
        assert_eq!(
            session.status_at(model.map().start()),
            CellStatus::Visited
        );
        assert!(!session.new_frontier().is_empty());
    }

    #[test]
    fn speed_keys_select_presets() {
        let mut model = VizModel::new();
        model.handle_event(key('1'));
        assert_eq!(model.speed_label(), "10ms");
        model.handle_event(key('5'));
        assert_eq!(model.speed_label(), "manual");
        // Manual mode has no tick interval even while searching.
        model.handle_event(key('r'));
        assert_eq!(model.tick_interval(), None);
    }

    #[test]
    fn screen_to_map_translation() {
        assert_eq!(screen_to_map(0, MAP_TOP as u16), Some(Point::new(0, 0)));
        assert_eq!(screen_to_map(7, MAP_TOP as u16 + 3), Some(Point::new(3, 3)));
        assert_eq!(screen_to_map(0, 0), None);
        assert_eq!(
            screen_to_map((MAP_WIDTH as u16) * 2, MAP_TOP as u16),
            None
        );
    }
}
