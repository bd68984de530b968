use crate::error::{ErrorMessage::*, InventoryError};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::Timelike;
use log::{debug, info, warn};
use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::ErrorKind,
    path::Path,
};

pub const COLUMN_COUNT: usize = 6;

/// Accepted header names per column, lowercase. The first entry is the
/// canonical one.
const HEADERS: [&[&str]; COLUMN_COUNT] = [
    &["host", "hostname", "name"],
    &["group", "groups"],
    &["address", "ip", "ansible_host"],
    &["user", "ansible_user"],
    &["description"],
    &["interpreter", "python_interpreter", "ansible_python_interpreter"],
];

pub type Cell = Option<String>;

/// One data row of the sheet. `number` is the 1-based row number as shown
/// by spreadsheet applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

impl Display for SheetRow {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let values: Vec<String> = self
            .cells
            .iter()
            .map(|c| match c {
                Some(value) => format!("'{}'", value),
                None => "None".to_string(),
            })
            .collect();
        write!(f, "({})", values.join(", "))
    }
}

pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, InventoryError> {
    // Probe the file first: calamine folds I/O failures into format errors.
    if let Err(e) = File::open(path) {
        return Err(match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => InventoryError::new(
                FileNotAccessible,
                format!(
                    "file '{}' could not be opened ({}). Check that it is in the right location.",
                    path.display(),
                    e
                ),
            ),
            _ => InventoryError::new(ParseError, format!("'{}': {}", path.display(), e)),
        });
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| InventoryError::new(ParseError, format!("'{}': {}", path.display(), e)))?;

    let sheet_name = match workbook.sheet_names().first() {
        Some(name) => name.clone(),
        None => {
            return Err(InventoryError::new(
                ParseError,
                format!("'{}' has no sheets", path.display()),
            ))
        }
    };
    debug!("reading sheet '{}' from {}", sheet_name, path.display());

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        InventoryError::new(ParseError, format!("sheet '{}': {}", sheet_name, e))
    })?;

    let rows = rows_from_range(&range)?;
    info!(rows = rows.len(), sheet = sheet_name.as_str(); "loaded inventory rows");
    Ok(rows)
}

/// Reads absolute columns A..F from row 2 onwards, regardless of where the
/// used range starts.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<SheetRow>, InventoryError> {
    let (start, end) = match (range.start(), range.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Ok(Vec::new()),
    };

    check_width(range, start, end)?;

    if start.0 == 0 {
        check_header(&read_row(range, 0)?);
    }

    let mut rows = Vec::new();
    for row in 1..=end.0 {
        rows.push(SheetRow {
            number: row as usize + 1,
            cells: read_row(range, row)?,
        });
    }
    Ok(rows)
}

fn check_width(
    range: &Range<Data>,
    start: (u32, u32),
    end: (u32, u32),
) -> Result<(), InventoryError> {
    let first_extra = (COLUMN_COUNT as u32).max(start.1);
    for row in start.0..=end.0 {
        for col in first_extra..=end.1 {
            match range.get_value((row, col)) {
                None | Some(Data::Empty) => {}
                Some(_) => {
                    return Err(InventoryError::new(
                        UnexpectedError,
                        format!(
                            "cell {}{} is outside the {} inventory columns A-{}",
                            column_name(col as usize),
                            row + 1,
                            COLUMN_COUNT,
                            column_name(COLUMN_COUNT - 1)
                        ),
                    ))
                }
            }
        }
    }
    Ok(())
}

fn read_row(range: &Range<Data>, row: u32) -> Result<Vec<Cell>, InventoryError> {
    (0..COLUMN_COUNT)
        .map(|col| match range.get_value((row, col as u32)) {
            Some(data) => cell_text(data).map_err(|e| {
                InventoryError::new(
                    UnexpectedError,
                    format!("cell {}{} holds {}", column_name(col), row + 1, e),
                )
            }),
            None => Ok(None),
        })
        .collect()
}

/// Text form of a cell. Empty cells and empty strings are `None`.
pub fn cell_text(data: &Data) -> Result<Cell, String> {
    match data {
        Data::Empty => Ok(None),
        Data::String(s) if s.is_empty() => Ok(None),
        Data::String(s) => Ok(Some(s.clone())),
        Data::Int(i) => Ok(Some(i.to_string())),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Ok(Some((*f as i64).to_string()))
            } else {
                Ok(Some(f.to_string()))
            }
        }
        Data::Bool(b) => Ok(Some(b.to_string())),
        Data::DateTime(dt) => date_text(dt).map(Some),
        Data::Error(e) => Err(format!("the error value {}", e)),
        other => Ok(Some(other.to_string())),
    }
}

/// Dates as `YYYY-MM-DD`, timestamps as `YYYY-MM-DDTHH:MM:SS`, durations
/// in ISO 8601 form. Never the raw serial number.
fn date_text(dt: &ExcelDateTime) -> Result<String, String> {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(duration) => Ok(duration.to_string()),
            None => Err(format!("the unreadable duration {}", dt.as_f64())),
        };
    }
    match dt.as_datetime() {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 => {
            Ok(datetime.format("%Y-%m-%d").to_string())
        }
        Some(datetime) => Ok(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => Err(format!("the out-of-range date serial {}", dt.as_f64())),
    }
}

fn check_header(header: &[Cell]) {
    for (col, accepted) in HEADERS.iter().enumerate() {
        let found = header
            .get(col)
            .and_then(|c| c.as_deref())
            .map(|name| name.trim().to_lowercase())
            .unwrap_or_default();
        if !accepted.contains(&found.as_str()) {
            warn!(
                "header of column {} is '{}', expected '{}'; columns are read by position",
                column_name(col),
                found,
                accepted[0]
            );
        }
    }
}

pub fn column_name(mut col: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}
