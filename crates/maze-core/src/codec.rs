//! Fixed binary encoding used to move maze specs between pipeline threads.
//!
//! The layout is a 24-byte header of six little-endian u32 values
//! (rows, cols, startX, startY, goalX, goalY) followed by `rows * cols`
//! row-major cell bytes. The buffer is opaque to the transport layer and is
//! always handed off by move, never cloned.

use thiserror::Error;

use crate::grid::{Grid, MazeSpec, Point};

/// Byte length of the fixed header.
pub const HEADER_LEN: usize = 24;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoded maze spec has {got} bytes, expected {expected}")]
    Length { expected: usize, got: usize },
    #[error("endpoint ({x}, {y}) lies outside a {rows}x{cols} grid")]
    EndpointOutOfBounds { x: u32, y: u32, rows: u32, cols: u32 },
}

/// Serialize a maze spec into its wire form.
pub fn encode(spec: &MazeSpec) -> Vec<u8> {
    let grid = &spec.grid;
    let mut buf = Vec::with_capacity(HEADER_LEN + grid.cells().len());
    for value in [
        grid.rows(),
        grid.cols(),
        spec.start.x,
        spec.start.y,
        spec.goal.x,
        spec.goal.y,
    ] {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf.extend_from_slice(grid.cells());
    buf
}

/// Rebuild a maze spec from its wire form.
pub fn decode(bytes: &[u8]) -> Result<MazeSpec, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Length {
            expected: HEADER_LEN,
            got: bytes.len(),
        });
    }
    let mut header = [0u32; 6];
    for (i, slot) in header.iter_mut().enumerate() {
        let mut word = [0u8; 4];
        word.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
        *slot = u32::from_le_bytes(word);
    }
    let [rows, cols, start_x, start_y, goal_x, goal_y] = header;

    let expected = HEADER_LEN + rows as usize * cols as usize;
    if bytes.len() != expected {
        return Err(CodecError::Length {
            expected,
            got: bytes.len(),
        });
    }
    let grid = Grid::from_cells(rows, cols, bytes[HEADER_LEN..].to_vec()).ok_or(
        CodecError::Length {
            expected,
            got: bytes.len(),
        },
    )?;

    for &(x, y) in &[(start_x, start_y), (goal_x, goal_y)] {
        if !grid.in_bounds(i64::from(x), i64::from(y)) {
            return Err(CodecError::EndpointOutOfBounds { x, y, rows, cols });
        }
    }

    Ok(MazeSpec {
        grid,
        start: Point::new(start_x, start_y),
        goal: Point::new(goal_x, goal_y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{PASSAGE, WALL};

    fn sample_spec() -> MazeSpec {
        let mut grid = Grid::filled(3, 2, WALL);
        grid.set(0, 0, PASSAGE);
        grid.set(1, 2, PASSAGE);
        MazeSpec {
            grid,
            start: Point::new(0, 0),
            goal: Point::new(1, 2),
        }
    }

    #[test]
    fn round_trip() {
        let spec = sample_spec();
        let bytes = encode(&spec);
        assert_eq!(bytes.len(), HEADER_LEN + 6);
        let back = decode(&bytes).expect("well-formed buffer decodes");
        assert_eq!(back, spec);
    }

    #[test]
    fn header_is_little_endian() {
        let bytes = encode(&sample_spec());
        assert_eq!(&bytes[0..4], &[3, 0, 0, 0]); // rows
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]); // cols
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let mut bytes = encode(&sample_spec());
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(CodecError::Length { .. })));
        assert!(matches!(decode(&[0; 10]), Err(CodecError::Length { .. })));
    }

    #[test]
    fn out_of_bounds_endpoint_is_rejected() {
        let mut spec = sample_spec();
        spec.goal = Point::new(5, 5);
        let bytes = encode(&spec);
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::EndpointOutOfBounds { .. })
        ));
    }
}
