//! Canonical single-line example format.
//!
//! The token stream is assembled first and JSON-encoded second, so escaping
//! never interleaves with token layout. Order: the `query` header with the
//! endpoints, every wall cell row-major, the `reasoning` trace flattened in
//! emission order, the `solution` plan, and a trailing `end`. Cost tokens
//! carry a `c` prefix (`c0`, `c37`).

use std::fmt::Write as _;

use maze_core::{EventKind, MazeSpec, Point, ReasoningEvent, WALL};
use serde::Serialize;

#[derive(Serialize)]
struct ExampleRecord<'a> {
    text: &'a str,
}

/// Render one example as `{"text":"<tokens>"}` plus the mandatory newline.
pub fn example_line(spec: &MazeSpec, events: &[ReasoningEvent], plan: &[Point]) -> String {
    let text = token_stream(spec, events, plan);
    let mut line = serde_json::to_string(&ExampleRecord { text: &text })
        .expect("a string-only record always serializes");
    line.push('\n');
    line
}

fn token_stream(spec: &MazeSpec, events: &[ReasoningEvent], plan: &[Point]) -> String {
    let grid = &spec.grid;
    let mut text = String::new();
    let _ = write!(
        text,
        "query start {} {} goal {} {}",
        spec.start.x, spec.start.y, spec.goal.x, spec.goal.y
    );
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            if grid.get(x, y) == WALL {
                let _ = write!(text, " wall {x} {y}");
            }
        }
    }
    text.push_str(" reasoning");
    for event in events {
        let tag = match event.kind {
            EventKind::Close => "close",
            EventKind::Create => "create",
        };
        let _ = write!(text, " {tag} {} {} c{} c{}", event.x, event.y, event.g, event.h);
    }
    text.push_str(" solution");
    for cell in plan {
        let _ = write!(text, " plan {} {}", cell.x, cell.y);
    }
    text.push_str(" end");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Grid, PASSAGE, manhattan, solve_astar};

    #[test]
    fn golden_line_for_center_wall_maze() {
        let mut grid = Grid::filled(3, 3, PASSAGE);
        grid.set(1, 1, WALL);
        let spec = MazeSpec {
            grid,
            start: Point::new(0, 0),
            goal: Point::new(2, 2),
        };
        let trace = solve_astar(&spec.grid, spec.start, spec.goal, manhattan);
        let plan = trace.plan.expect("maze is solvable");
        let line = example_line(&spec, &trace.events, &plan);
        assert_eq!(
            line,
            "{\"text\":\"query start 0 0 goal 2 2 wall 1 1 reasoning close 0 0 c0 c4 \
             create 1 0 c1 c3 create 0 1 c1 c3 close 1 0 c1 c3 create 2 0 c2 c2 \
             close 0 1 c1 c3 create 0 2 c2 c2 close 2 0 c2 c2 create 2 1 c3 c1 \
             close 0 2 c2 c2 create 1 2 c3 c1 close 2 1 c3 c1 create 2 2 c4 c0 \
             close 1 2 c3 c1 close 2 2 c4 c0 solution plan 0 0 plan 1 0 plan 2 0 \
             plan 2 1 plan 2 2 end\"}\n"
        );
    }

    #[test]
    fn line_parses_back_as_single_field_json() {
        let grid = Grid::filled(2, 2, PASSAGE);
        let spec = MazeSpec {
            grid,
            start: Point::new(0, 0),
            goal: Point::new(1, 1),
        };
        let trace = solve_astar(&spec.grid, spec.start, spec.goal, manhattan);
        let plan = trace.plan.expect("open grid is solvable");
        let line = example_line(&spec, &trace.events, &plan);
        assert!(line.ends_with('\n'));
        let value: serde_json::Value =
            serde_json::from_str(line.trim_end()).expect("line is valid JSON");
        let object = value.as_object().expect("line is a JSON object");
        assert_eq!(object.len(), 1);
        let text = object["text"].as_str().expect("text field is a string");
        assert!(text.starts_with("query start 0 0 goal 1 1 "));
        assert!(text.ends_with(" end"));
    }
}
