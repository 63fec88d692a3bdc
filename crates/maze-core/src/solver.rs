//! A* search that records the event trace training consumers learn from.
//!
//! The open set is an ordered list scanned linearly: when several entries
//! share the minimum f-score, the one inserted earliest wins. That tie-break
//! is visible in the emitted trace, so a binary heap is not a drop-in
//! replacement here.

use crate::grid::{Grid, Point, WALL};

/// Neighbor expansion order. The trace depends on it.
const NEIGHBOR_ORDER: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// What a reasoning event records about a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The node was popped from the open set.
    Close,
    /// The node received an improved score.
    Create,
}

/// One solver event in emission order.
///
/// `g` is the path cost from the start; `h` the heuristic estimate to the
/// goal. A `Create` is emitted every time a neighbor's score improves, even
/// when the node already sits in the open set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReasoningEvent {
    pub kind: EventKind,
    pub x: u32,
    pub y: u32,
    pub g: u32,
    pub h: u32,
}

/// Search outcome: the full event trace plus the final plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTrace {
    pub events: Vec<ReasoningEvent>,
    /// Start-to-goal path inclusive; `None` when the goal was unreachable.
    pub plan: Option<Vec<Point>>,
}

/// Manhattan distance between two cells, the canonical heuristic.
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Solvers known to the dataset pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverKind {
    AStar,
}

impl SolverKind {
    /// Look up a solver by its dataset name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "astar" => Some(Self::AStar),
            _ => None,
        }
    }

    /// All registered names, sorted.
    pub fn names() -> &'static [&'static str] {
        &["astar"]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AStar => "astar",
        }
    }

    /// Run the solver with its canonical heuristic.
    pub fn solve(self, grid: &Grid, start: Point, goal: Point) -> SearchTrace {
        match self {
            Self::AStar => solve_astar(grid, start, goal, manhattan),
        }
    }
}

/// Synchronous A* over the grid. Grid boundaries are treated as walls; the
/// search never steps off the grid.
pub fn solve_astar(
    grid: &Grid,
    start: Point,
    goal: Point,
    heuristic: impl Fn(Point, Point) -> u32,
) -> SearchTrace {
    let cols = grid.cols() as usize;
    let total = grid.rows() as usize * cols;
    let at = |p: Point| p.y as usize * cols + p.x as usize;

    let mut g_score = vec![u32::MAX; total];
    let mut f_score = vec![u32::MAX; total];
    let mut came_from: Vec<Option<Point>> = vec![None; total];
    let mut closed = vec![false; total];

    g_score[at(start)] = 0;
    f_score[at(start)] = heuristic(start, goal);
    let mut open: Vec<Point> = vec![start];

    let mut events = Vec::new();
    let mut reached_goal = false;

    while !open.is_empty() {
        let mut best = 0;
        for i in 1..open.len() {
            if f_score[at(open[i])] < f_score[at(open[best])] {
                best = i;
            }
        }
        let current = open.remove(best);
        events.push(ReasoningEvent {
            kind: EventKind::Close,
            x: current.x,
            y: current.y,
            g: g_score[at(current)],
            h: heuristic(current, goal),
        });
        if current == goal {
            reached_goal = true;
            break;
        }
        closed[at(current)] = true;

        for (dx, dy) in NEIGHBOR_ORDER {
            let nx = i64::from(current.x) + dx;
            let ny = i64::from(current.y) + dy;
            let Some(cell) = grid.cell_at(nx, ny) else {
                continue;
            };
            if cell == WALL {
                continue;
            }
            let neighbor = Point::new(nx as u32, ny as u32);
            if closed[at(neighbor)] {
                continue;
            }
            let tentative = g_score[at(current)] + 1;
            if tentative < g_score[at(neighbor)] {
                came_from[at(neighbor)] = Some(current);
                g_score[at(neighbor)] = tentative;
                let h = heuristic(neighbor, goal);
                f_score[at(neighbor)] = tentative + h;
                if !open.contains(&neighbor) {
                    open.push(neighbor);
                }
                events.push(ReasoningEvent {
                    kind: EventKind::Create,
                    x: neighbor.x,
                    y: neighbor.y,
                    g: tentative,
                    h,
                });
            }
        }
    }

    let plan = reached_goal.then(|| {
        let mut path = Vec::new();
        let mut cursor = goal;
        while cursor != start {
            path.push(cursor);
            match came_from[at(cursor)] {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        path.push(start);
        path.reverse();
        path
    });

    SearchTrace { events, plan }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PASSAGE;

    /// 3x3 grid, all passages except a wall in the middle.
    fn ring_grid() -> Grid {
        let mut grid = Grid::filled(3, 3, PASSAGE);
        grid.set(1, 1, WALL);
        grid
    }

    fn ev(kind: EventKind, x: u32, y: u32, g: u32, h: u32) -> ReasoningEvent {
        ReasoningEvent { kind, x, y, g, h }
    }

    #[test]
    fn trace_around_center_wall() {
        let trace = solve_astar(&ring_grid(), Point::new(0, 0), Point::new(2, 2), manhattan);
        use EventKind::{Close, Create};
        assert_eq!(
            trace.events,
            vec![
                ev(Close, 0, 0, 0, 4),
                ev(Create, 1, 0, 1, 3),
                ev(Create, 0, 1, 1, 3),
                ev(Close, 1, 0, 1, 3),
                ev(Create, 2, 0, 2, 2),
                ev(Close, 0, 1, 1, 3),
                ev(Create, 0, 2, 2, 2),
                ev(Close, 2, 0, 2, 2),
                ev(Create, 2, 1, 3, 1),
                ev(Close, 0, 2, 2, 2),
                ev(Create, 1, 2, 3, 1),
                ev(Close, 2, 1, 3, 1),
                ev(Create, 2, 2, 4, 0),
                ev(Close, 1, 2, 3, 1),
                ev(Close, 2, 2, 4, 0),
            ]
        );
        assert_eq!(
            trace.plan,
            Some(vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ])
        );
    }

    #[test]
    fn first_close_is_start_and_last_is_goal() {
        let trace = solve_astar(&ring_grid(), Point::new(0, 0), Point::new(2, 2), manhattan);
        let closes: Vec<&ReasoningEvent> = trace
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Close)
            .collect();
        let first = closes.first().expect("trace has close events");
        let last = closes.last().expect("trace has close events");
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!((last.x, last.y), (2, 2));
    }

    #[test]
    fn unreachable_goal_yields_no_plan() {
        let mut grid = Grid::filled(3, 3, PASSAGE);
        grid.set(1, 0, WALL);
        grid.set(1, 1, WALL);
        grid.set(1, 2, WALL);
        let trace = solve_astar(&grid, Point::new(0, 0), Point::new(2, 0), manhattan);
        assert!(trace.plan.is_none());
        assert!(!trace.events.is_empty());
    }

    #[test]
    fn open_grid_plan_is_optimal() {
        let grid = Grid::filled(4, 4, PASSAGE);
        let start = Point::new(0, 0);
        let goal = Point::new(3, 3);
        let trace = solve_astar(&grid, start, goal, manhattan);
        let plan = trace.plan.expect("open grid is solvable");
        assert_eq!(plan.len() as u32, manhattan(start, goal) + 1);
        assert_eq!(plan[0], start);
        assert_eq!(*plan.last().expect("plan is non-empty"), goal);
        for pair in plan.windows(2) {
            let step = manhattan(pair[0], pair[1]);
            assert_eq!(step, 1, "plan cells must be 4-connected");
        }
    }

    #[test]
    fn close_events_are_monotone_in_f() {
        let trace = solve_astar(&ring_grid(), Point::new(0, 0), Point::new(2, 2), manhattan);
        let mut last_f = 0;
        for event in trace.events.iter().filter(|e| e.kind == EventKind::Close) {
            let f = event.g + event.h;
            assert!(f >= last_f, "close events must not decrease in g + h");
            last_f = f;
        }
    }

    #[test]
    fn solver_registry_resolves_names() {
        assert_eq!(SolverKind::from_name("astar"), Some(SolverKind::AStar));
        assert_eq!(SolverKind::from_name("dijkstra"), None);
        assert_eq!(SolverKind::names(), &["astar"]);
        assert_eq!(SolverKind::AStar.name(), "astar");
    }
}
