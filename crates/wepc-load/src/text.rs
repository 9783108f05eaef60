use std::fs;
use std::path::Path;

use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_core::PcoordArray;

/// Parses one real-valued token. Accepts the usual decimal and exponent
/// forms plus `inf`/`nan`.
pub fn parse_real(token: &str) -> Option<f32> {
    token.parse::<f32>().ok()
}

pub(crate) fn read_text(path: &Path) -> Result<String, WepcError> {
    fs::read_to_string(path).map_err(|err| {
        WepcError::Io(
            ErrorInfo::new("text-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Parses whitespace-separated reals, one row per non-blank line.
///
/// Everything after a `#` on a line is ignored. All rows must have the same
/// number of columns. An input without data rows yields a `0 x 0` array.
pub fn parse_table(text: &str) -> Result<PcoordArray, WepcError> {
    let mut cols = None;
    let mut rows = 0;
    let mut values = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let data = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let mut width = 0;
        for token in data.split_whitespace() {
            let value = parse_real(token).ok_or_else(|| {
                WepcError::Parse(
                    ErrorInfo::new("text-token", format!("could not parse {token:?} as a real"))
                        .with_context("line", (line_no + 1).to_string()),
                )
            })?;
            values.push(value);
            width += 1;
        }
        if width == 0 {
            continue;
        }
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(WepcError::Shape(
                    ErrorInfo::new(
                        "text-columns",
                        format!("line has {width} columns, expected {expected}"),
                    )
                    .with_context("line", (line_no + 1).to_string()),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }
    PcoordArray::new(rows, cols.unwrap_or(0), values)
}

/// Reads and parses a whitespace-delimited table of reals.
pub fn load_table(path: &Path) -> Result<PcoordArray, WepcError> {
    parse_table(&read_text(path)?).map_err(|err| with_path(err, path))
}

pub(crate) fn with_path(err: WepcError, path: &Path) -> WepcError {
    let path = path.display().to_string();
    match err {
        WepcError::Parse(info) => WepcError::Parse(info.with_context("path", path)),
        WepcError::Shape(info) => WepcError::Shape(info.with_context("path", path)),
        other => other,
    }
}
