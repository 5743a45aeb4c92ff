//! The incremental uniform-cost search engine: [`SearchSession`].

use routeviz_grid::Point;

use crate::direction::Direction;
use crate::traits::SearchGrid;

/// Sentinel distance for cells without a known finite distance.
pub const UNREACHABLE: i32 = i32::MAX;

/// Lifecycle of a cell during one search.
///
/// A cell only ever moves forward: `Unvisited` → `Frontier` → `Visited`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Unvisited,
    /// Discovered with a tentative distance, not yet finalized.
    Frontier,
    /// Finalized; the recorded distance is the shortest possible.
    Visited,
}

/// One search over one grid snapshot.
///
/// A session owns all per-cell bookkeeping (status, best-known distance,
/// came-from direction) plus the step-level observability the animation
/// layer reads: the cell finalized by the latest [`step`](Self::step) and
/// the cells it newly discovered. Sessions are independent of each other;
/// create one per search (or [`reset`](Self::reset) an old one).
///
/// Distances are exact integers: 10 per cardinal step, 14 per diagonal step.
pub struct SearchSession {
    width: usize,
    height: usize,
    status: Vec<CellStatus>,
    distance: Vec<i32>,
    came_from: Vec<Option<Direction>>,
    start: Point,
    target: Point,
    frontier_len: usize,
    done: bool,
    route_exists: bool,
    last_searched: Option<Point>,
    new_frontier: Vec<Point>,
}

impl SearchSession {
    /// Set up a fresh session against `grid`: the start cell enters the
    /// frontier at distance 0, everything else is undiscovered (distance
    /// [`UNREACHABLE`], the sentinel the termination check relies on before
    /// the target is ever reached).
    pub fn new<G: SearchGrid>(grid: &G) -> Self {
        let width = grid.width().max(0) as usize;
        let height = grid.height().max(0) as usize;
        let len = width * height;
        let mut session = Self {
            width,
            height,
            status: vec![CellStatus::default(); len],
            distance: vec![UNREACHABLE; len],
            came_from: vec![None; len],
            start: grid.start(),
            target: grid.target(),
            frontier_len: 0,
            done: false,
            route_exists: false,
            last_searched: None,
            new_frontier: Vec::with_capacity(8),
        };
        session.seed();
        session
    }

    /// Reinitialize against `grid`, reusing the allocations when the grid
    /// size is unchanged.
    pub fn reset<G: SearchGrid>(&mut self, grid: &G) {
        let width = grid.width().max(0) as usize;
        let height = grid.height().max(0) as usize;
        let len = width * height;
        if len != self.status.len() {
            self.status = vec![CellStatus::default(); len];
            self.distance = vec![UNREACHABLE; len];
            self.came_from = vec![None; len];
        } else {
            self.status.fill(CellStatus::default());
            self.distance.fill(UNREACHABLE);
            self.came_from.fill(None);
        }
        self.width = width;
        self.height = height;
        self.start = grid.start();
        self.target = grid.target();
        self.seed();
    }

    fn seed(&mut self) {
        let si = self.idx(self.start);
        self.status[si] = CellStatus::Frontier;
        self.distance[si] = 0;
        self.frontier_len = 1;
        self.done = false;
        self.route_exists = false;
        self.last_searched = None;
        self.new_frontier.clear();
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        assert!(self.contains(p), "coordinate {p} outside the session grid");
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Advance the search by one unit of work: finalize the cheapest frontier
    /// cell and expand its neighbors. Designed to be called once per
    /// animation tick until [`done`](Self::done) reports `true`.
    ///
    /// Ties for the cheapest frontier cell go to the first cell in row-major
    /// scan order (increasing row, then increasing column). This tie-break
    /// is a committed contract: it decides which of several equal-cost paths
    /// gets reconstructed.
    ///
    /// # Panics
    ///
    /// If the search is already done.
    pub fn step<G: SearchGrid>(&mut self, grid: &G) {
        assert!(!self.done, "step called on a finished search");
        self.new_frontier.clear();

        let selected = self
            .lowest_frontier()
            .expect("a live search always has a frontier cell");
        let si = self.idx(selected);
        let ti = self.idx(self.target);

        // Dijkstra early exit: once no frontier cell is cheaper than the
        // target's tentative distance, that distance can no longer improve.
        if self.distance[si] >= self.distance[ti] {
            self.route_exists = true;
            self.done = true;
            self.last_searched = Some(selected);
            return;
        }

        self.status[si] = CellStatus::Visited;
        self.frontier_len -= 1;

        for dir in Direction::ALL {
            let np = selected + dir.delta();
            if !grid.in_bounds(np) || grid.is_wall(np) {
                continue;
            }
            let ni = self.idx(np);
            let candidate = self.distance[si] + dir.cost();
            match self.status[ni] {
                CellStatus::Unvisited => {
                    self.status[ni] = CellStatus::Frontier;
                    self.frontier_len += 1;
                    self.distance[ni] = candidate;
                    // Stored backwards, so walking the path from the target
                    // means literally stepping along the stored direction.
                    self.came_from[ni] = Some(dir.opposite());
                    self.new_frontier.push(np);
                }
                CellStatus::Frontier if candidate < self.distance[ni] => {
                    self.distance[ni] = candidate;
                    self.came_from[ni] = Some(dir.opposite());
                }
                _ => {}
            }
        }

        if self.frontier_len == 0 {
            self.route_exists = false;
            self.done = true;
        }
        self.last_searched = Some(selected);
    }

    /// The cheapest frontier cell in row-major scan order.
    fn lowest_frontier(&self) -> Option<Point> {
        let mut lowest = None;
        let mut low = UNREACHABLE;
        for (i, &st) in self.status.iter().enumerate() {
            // Strict comparison keeps the first cell found on ties.
            if st != CellStatus::Frontier || self.distance[i] >= low {
                continue;
            }
            low = self.distance[i];
            lowest = Some(self.point(i));
        }
        lowest
    }

    // -----------------------------------------------------------------------
    // Path reconstruction
    // -----------------------------------------------------------------------

    /// One step of backward path reconstruction: the cell that precedes
    /// `from` on the shortest path. Start with `from = target` and stop once
    /// the returned cell is the start.
    ///
    /// # Panics
    ///
    /// If the search is unfinished or found no route, or if `from` has no
    /// recorded predecessor (the start cell never has one).
    pub fn backtrack(&self, from: Point) -> Point {
        assert!(
            self.done && self.route_exists,
            "backtrack on an unfinished or failed search"
        );
        let dir = self.came_from[self.idx(from)]
            .expect("backtrack from a cell without a predecessor");
        from + dir.delta()
    }

    /// The whole shortest path, start and target inclusive, for callers that
    /// don't need the step-by-step animation of [`backtrack`](Self::backtrack).
    ///
    /// # Panics
    ///
    /// Under the same conditions as `backtrack`.
    pub fn path(&self) -> Vec<Point> {
        assert!(
            self.done && self.route_exists,
            "path of an unfinished or failed search"
        );
        let mut path = Vec::new();
        let mut cur = self.target;
        while cur != self.start {
            path.push(cur);
            cur = self.backtrack(cur);
        }
        path.push(self.start);
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Whether the search has terminated.
    #[inline]
    pub fn done(&self) -> bool {
        self.done
    }

    /// Whether a route was found. Meaningful only once [`done`](Self::done)
    /// reports `true`.
    #[inline]
    pub fn route_exists(&self) -> bool {
        self.route_exists
    }

    /// The cell processed by the most recent [`step`](Self::step).
    #[inline]
    pub fn last_searched(&self) -> Option<Point> {
        self.last_searched
    }

    /// The cells that entered the frontier during the most recent
    /// [`step`](Self::step), for incremental rendering.
    #[inline]
    pub fn new_frontier(&self) -> &[Point] {
        &self.new_frontier
    }

    /// Search status of the cell at `p`.
    pub fn status_at(&self, p: Point) -> CellStatus {
        self.status[self.idx(p)]
    }

    /// Best known distance of the cell at `p` from the start, or
    /// [`UNREACHABLE`] while undiscovered.
    pub fn distance_at(&self, p: Point) -> i32 {
        self.distance[self.idx(p)]
    }

    /// The start cell of this session's grid snapshot.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The target cell of this session's grid snapshot.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeviz_grid::TileMap;

    fn open_map(width: i32, height: i32, start: Point, target: Point) -> TileMap {
        TileMap::new(width, height, &[], start, target)
    }

    fn run_to_completion(session: &mut SearchSession, map: &TileMap) -> usize {
        let mut steps = 0;
        while !session.done() {
            session.step(map);
            steps += 1;
            assert!(steps <= (map.width() * map.height() + 1) as usize);
        }
        steps
    }

    fn step_cost(a: Point, b: Point) -> i32 {
        let d = b - a;
        assert!(d.x.abs() <= 1 && d.y.abs() <= 1 && (d.x != 0 || d.y != 0));
        if d.x != 0 && d.y != 0 { 14 } else { 10 }
    }

    #[test]
    fn three_by_three_cardinal_path() {
        let map = open_map(3, 3, Point::new(0, 0), Point::new(2, 0));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);

        assert!(session.route_exists());
        assert_eq!(session.distance_at(map.target()), 20);
        // Backward reconstruction: (2,0) -> (1,0) -> (0,0).
        let prev = session.backtrack(map.target());
        assert_eq!(prev, Point::new(1, 0));
        assert_eq!(session.backtrack(prev), Point::new(0, 0));
        assert_eq!(
            session.path(),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn diagonal_adjacency_costs_fourteen() {
        let map = open_map(2, 2, Point::new(0, 0), Point::new(1, 1));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);

        assert!(session.route_exists());
        assert_eq!(session.distance_at(map.target()), 14);
        // A single backward hop reaches the start.
        assert_eq!(session.backtrack(map.target()), map.start());
        assert_eq!(session.path().len(), 2);
    }

    #[test]
    fn enclosed_start_fails_in_one_step() {
        // Start boxed into the corner by walls: the one and only step
        // expands nothing and exhausts the frontier.
        let walls = [Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)];
        let map = TileMap::new(5, 5, &walls, Point::new(0, 0), Point::new(4, 4));
        let mut session = SearchSession::new(&map);

        session.step(&map);
        assert!(session.done());
        assert!(!session.route_exists());
        assert_eq!(session.last_searched(), Some(map.start()));
        assert!(session.new_frontier().is_empty());
    }

    #[test]
    fn walled_off_target_exhausts_frontier() {
        let walls = [Point::new(3, 3), Point::new(3, 4), Point::new(4, 3)];
        let map = TileMap::new(5, 5, &walls, Point::new(0, 0), Point::new(4, 4));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);

        assert!(!session.route_exists());
        assert_eq!(session.distance_at(map.target()), UNREACHABLE);
        assert_eq!(session.status_at(map.target()), CellStatus::Unvisited);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let walls = [
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(5, 0),
            Point::new(5, 1),
        ];
        let map = TileMap::new(7, 5, &walls, Point::new(0, 2), Point::new(6, 2));

        let run = |map: &TileMap| {
            let mut session = SearchSession::new(map);
            let mut visited = Vec::new();
            while !session.done() {
                session.step(map);
                visited.push(session.last_searched().unwrap());
            }
            (visited, session.route_exists(), session.path())
        };

        let (visited_a, found_a, path_a) = run(&map);
        let (visited_b, found_b, path_b) = run(&map);
        assert!(found_a && found_b);
        assert_eq!(visited_a, visited_b);
        assert_eq!(path_a, path_b);
    }

    #[test]
    fn tie_break_selects_lowest_row_then_column() {
        // After the first step the frontier holds (1,0) and (0,1) at
        // distance 10 and (1,1) at 14; row-major order must pick (1,0),
        // then (0,1).
        let map = open_map(2, 2, Point::new(0, 0), Point::new(1, 1));
        let mut session = SearchSession::new(&map);
        session.step(&map);
        assert_eq!(session.last_searched(), Some(Point::new(0, 0)));
        session.step(&map);
        assert_eq!(session.last_searched(), Some(Point::new(1, 0)));
        session.step(&map);
        assert_eq!(session.last_searched(), Some(Point::new(0, 1)));
    }

    #[test]
    fn equal_cost_paths_resolve_deterministically() {
        // Two shortest paths to (1,2) cost 24: south then south-east, or
        // south-east then south. The first discovery wins because
        // relaxation requires a strict improvement, and (0,1) is finalized
        // before (1,1).
        let map = open_map(3, 3, Point::new(0, 0), Point::new(1, 2));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);

        assert_eq!(session.distance_at(map.target()), 24);
        assert_eq!(
            session.path(),
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 2)]
        );
    }

    #[test]
    fn path_cost_matches_target_distance() {
        let walls = [
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(3, 1),
            Point::new(3, 2),
            Point::new(3, 3),
        ];
        let map = TileMap::new(6, 6, &walls, Point::new(0, 0), Point::new(5, 5));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);

        assert!(session.route_exists());
        let path = session.path();
        let cost: i32 = path.windows(2).map(|w| step_cost(w[0], w[1])).sum();
        assert_eq!(cost, session.distance_at(map.target()));
    }

    #[test]
    fn statuses_and_distances_are_monotone() {
        let walls = [Point::new(2, 0), Point::new(2, 1), Point::new(2, 2)];
        let map = TileMap::new(5, 4, &walls, Point::new(0, 0), Point::new(4, 0));
        let mut session = SearchSession::new(&map);

        let len = (map.width() * map.height()) as usize;
        let mut prev_status = vec![CellStatus::Unvisited; len];
        let mut prev_distance = vec![UNREACHABLE; len];

        while !session.done() {
            session.step(&map);
            for y in 0..map.height() {
                for x in 0..map.width() {
                    let p = Point::new(x, y);
                    let i = (y * map.width() + x) as usize;
                    let st = session.status_at(p);
                    let d = session.distance_at(p);
                    match prev_status[i] {
                        // Unvisited may become anything.
                        CellStatus::Unvisited => {}
                        // Frontier may stay or be finalized, and its
                        // distance only ever improves.
                        CellStatus::Frontier => {
                            assert_ne!(st, CellStatus::Unvisited);
                            assert!(d <= prev_distance[i]);
                        }
                        // Visited is terminal and its distance is frozen.
                        CellStatus::Visited => {
                            assert_eq!(st, CellStatus::Visited);
                            assert_eq!(d, prev_distance[i]);
                        }
                    }
                    prev_status[i] = st;
                    prev_distance[i] = d;
                }
            }
        }
    }

    #[test]
    fn new_frontier_reports_only_fresh_cells() {
        let map = open_map(3, 3, Point::new(1, 1), Point::new(2, 2));
        let mut session = SearchSession::new(&map);

        // Expanding the center discovers all eight neighbors.
        session.step(&map);
        assert_eq!(session.new_frontier().len(), 8);

        // The next expansion touches only cells that are already frontier
        // or visited, so nothing new is reported.
        session.step(&map);
        assert_eq!(session.last_searched(), Some(Point::new(1, 0)));
        assert!(session.new_frontier().is_empty());
    }

    #[test]
    #[should_panic(expected = "finished search")]
    fn step_after_done_panics() {
        let map = open_map(2, 2, Point::new(0, 0), Point::new(1, 1));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);
        session.step(&map);
    }

    #[test]
    #[should_panic(expected = "without a predecessor")]
    fn backtrack_past_start_panics() {
        let map = open_map(2, 2, Point::new(0, 0), Point::new(1, 1));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);
        session.backtrack(map.start());
    }

    #[test]
    #[should_panic(expected = "failed search")]
    fn backtrack_without_route_panics() {
        let walls = [Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)];
        let map = TileMap::new(4, 4, &walls, Point::new(0, 0), Point::new(3, 3));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);
        session.backtrack(map.target());
    }

    #[test]
    fn reset_reruns_cleanly() {
        let map = open_map(4, 4, Point::new(0, 0), Point::new(3, 3));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);
        let first_path = session.path();

        // Same grid again, reusing the allocations.
        session.reset(&map);
        assert!(!session.done());
        assert_eq!(session.status_at(map.start()), CellStatus::Frontier);
        assert_eq!(session.distance_at(map.target()), UNREACHABLE);
        run_to_completion(&mut session, &map);
        assert_eq!(session.path(), first_path);

        // A differently sized grid forces reallocation.
        let bigger = open_map(6, 7, Point::new(5, 6), Point::new(0, 0));
        session.reset(&bigger);
        run_to_completion(&mut session, &bigger);
        assert!(session.route_exists());
        assert_eq!(session.path().first(), Some(&Point::new(5, 6)));
        assert_eq!(session.path().last(), Some(&Point::new(0, 0)));
    }

    #[test]
    fn single_row_corridor_is_cardinal_only() {
        // A 1-wide corridor: only cardinal moves are possible, so the
        // distance is a plain multiple of 10.
        let map = open_map(5, 1, Point::new(0, 0), Point::new(4, 0));
        let mut session = SearchSession::new(&map);
        run_to_completion(&mut session, &map);
        assert_eq!(session.distance_at(map.target()), 40);
    }
}
