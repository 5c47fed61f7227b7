//! Level records and the text level format.
//!
//! A `Level` is the immutable load-time description of one puzzle: the
//! tile-code grid, camera metadata (passed through untouched), and the
//! move budget.
//!
//! ## Text format
//!
//! ```text
//! 5;2;1;-10;12        <- camera_size;target_x;target_y;target_z;budget
//! 0;1;4;1;0           <- top row of tile codes
//! 2;4;;4;3            <- empty field = 0
//! ```
//!
//! Rows are listed top first. Trailing blank lines and `\r` are ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating or loading level data.
///
/// A level that fails validation is rejected as a whole; no partially
/// built grid is ever exposed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelDataError {
    #[error("level has no tile rows")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized tile code {code} at row {row}, column {column}")]
    UnknownTileCode { code: i32, row: usize, column: usize },

    #[error("missing header field `{0}`")]
    MissingHeaderField(&'static str),

    #[error("line {line}, field {field}: `{value}` is not an integer")]
    InvalidNumber {
        line: usize,
        field: usize,
        value: String,
    },
}

/// Camera metadata. Opaque to the engine; handed back to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSetup {
    pub size: i32,
    pub target: [i32; 3],
}

impl CameraSetup {
    #[must_use]
    pub const fn new(size: i32, target: [i32; 3]) -> Self {
        Self { size, target }
    }
}

/// Header fields, in file order.
const HEADER_FIELDS: [&str; 5] = ["camera_size", "target_x", "target_y", "target_z", "budget"];

/// Immutable description of one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    rows: Vec<Vec<i32>>,
    camera: CameraSetup,
    budget: u32,
}

impl Level {
    /// Create a level from rows of tile codes (top row first).
    ///
    /// Fails if there are no rows, a row is empty, or row lengths differ.
    /// Tile codes are checked when the grid is loaded.
    pub fn new(rows: Vec<Vec<i32>>, camera: CameraSetup, budget: u32) -> Result<Self, LevelDataError> {
        check_rectangular(&rows)?;
        Ok(Self { rows, camera, budget })
    }

    /// Parse the `;`-separated text format.
    ///
    /// ```
    /// use pipe_swipe::core::Level;
    ///
    /// let level = Level::parse("4;1;0;-10;3\n2;4;3\n").unwrap();
    /// assert_eq!(level.width(), 3);
    /// assert_eq!(level.height(), 1);
    /// assert_eq!(level.budget(), 3);
    /// ```
    pub fn parse(text: &str) -> Result<Self, LevelDataError> {
        let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

        let header_line = lines.next().unwrap_or("");
        let header = parse_header(header_line)?;

        let mut rows: Vec<Vec<i32>> = lines
            .enumerate()
            .map(|(i, line)| parse_row(line, i + 2))
            .collect::<Result<_, _>>()?;
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        let camera = CameraSetup::new(header[0], [header[1], header[2], header[3]]);
        let budget = u32::try_from(header[4]).map_err(|_| LevelDataError::InvalidNumber {
            line: 1,
            field: 4,
            value: header[4].to_string(),
        })?;

        Self::new(rows, camera, budget)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Tile codes, top row first.
    #[must_use]
    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    #[must_use]
    pub fn camera(&self) -> CameraSetup {
        self.camera
    }

    /// Initial move budget.
    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }
}

/// Reject empty or ragged code grids.
pub(crate) fn check_rectangular(rows: &[Vec<i32>]) -> Result<(), LevelDataError> {
    let expected = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(LevelDataError::EmptyGrid),
    };
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(LevelDataError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

fn parse_header(line: &str) -> Result<[i32; 5], LevelDataError> {
    let fields: Vec<&str> = if line.trim().is_empty() {
        Vec::new()
    } else {
        line.split(';').collect()
    };

    let mut header = [0; 5];
    for (i, &name) in HEADER_FIELDS.iter().enumerate() {
        let raw = fields
            .get(i)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .ok_or(LevelDataError::MissingHeaderField(name))?;
        header[i] = parse_int(raw, 1, i)?;
    }
    Ok(header)
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<i32>, LevelDataError> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }
    line.split(';')
        .enumerate()
        .map(|(field, raw)| {
            let raw = raw.trim();
            if raw.is_empty() {
                Ok(0)
            } else {
                parse_int(raw, line_no, field)
            }
        })
        .collect()
}

fn parse_int(raw: &str, line: usize, field: usize) -> Result<i32, LevelDataError> {
    raw.parse().map_err(|_| LevelDataError::InvalidNumber {
        line,
        field,
        value: raw.to_string(),
    })
}
