//! Type-directed result display.
//!
//! The inferred type picks the layout: scalars echo value and type, file
//! lists become an autocomplete-like grid filled down the columns, tuple
//! lists become a table, nested lists indent, and a lone file gets a
//! parenthetical description (plus a listing when it is a directory).
//!
//! Rendering is a pure function of `(value, type, terminal width)`, modulo
//! the filesystem reads behind file results. Widths are measured in
//! terminal columns, not bytes.

use std::fs;
use std::io;
use std::path::Path;

use unicode_width::UnicodeWidthStr;

use crate::style::Style;
use crate::types::{TypeId, TypePool};
use crate::value::Value;

/// Columns of breathing room between grid and table entries.
const GAP: usize = 2;

const SIZE_MAGNITUDE: u64 = 1024;
/// Unit labels are decimal by default even though the magnitudes are
/// binary; flip for IEC names.
const USE_SI_UNIT_NAMES: bool = false;
const UNITS: [&str; 5] = ["bytes", "kB", "MB", "GB", "TB"];
const UNITS_SI: [&str; 5] = ["bytes", "kiB", "MiB", "GiB", "TiB"];

const BRACES_ON_OWN_LINE: bool = false;
const BRACES_ON_OWN_LINE_IF_RECURSING: bool = true;

/// Current terminal width in columns, defaulting to 80 and never reporting
/// fewer than 40.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(width, _)| width.0 as usize)
        .unwrap_or(80)
        .max(40)
}

/// Render a pipeline result. `width` is the terminal width in columns.
pub fn display_result(pool: &TypePool, value: &Value, ty: TypeId, width: usize) -> String {
    let mut out = String::new();
    let mut value = value.clone();
    let mut ty = ty;

    // A result of `() -> a` is applied once, not iterated.
    if pool.unit_applies_to_fn(ty) {
        out.push_str(&format!(
            "(A value of {} has been automatically applied.)\n",
            pool.name(ty)
        ));
        value = value.call(&Value::Unit);
        ty = pool.fn_result(ty).unwrap_or(TypeId::INVALID);
    }

    if value.is_invalid() {
        out.push_str(&scalar(pool, &value, ty));
    } else if pool.is_list(ty) {
        let element = pool.list_element(ty).unwrap_or(TypeId::INVALID);

        if pool.is_list(element) {
            render_list_list(pool, &value, ty, 0, &mut out);
        } else if value.as_vector().map_or(0, <[Value]>::len) <= 1 {
            // Empty and singleton lists take the scalar path.
            out.push_str(&scalar(pool, &value, ty));
        } else if pool.is_file(element) {
            render_file_list(pool, &value, ty, width, &mut out);
        } else if pool.is_tuple(element) {
            render_table(pool, &value, ty, &mut out);
        } else {
            out.push_str(&scalar(pool, &value, ty));
        }
    } else if pool.is_str(ty) {
        render_str(pool, &value, ty, &mut out);
    } else {
        out.push_str(&scalar(pool, &value, ty));

        if pool.is_file(ty) {
            if let Some(name) = value.as_filename() {
                render_file(name, width, &mut out);
            }
        }
    }

    out
}

/// A rendered fragment plus its visible width (styling excluded).
struct Cell {
    text: String,
    width: usize,
}

/// Directory names render as `{name}/` in blue.
fn entry_cell(name: &str, is_dir: bool) -> Cell {
    if is_dir {
        let text = format!("{{{}}}/", name);
        Cell {
            width: text.as_str().width(),
            text: Style::blue(&text),
        }
    } else {
        Cell {
            width: name.width(),
            text: name.to_string(),
        }
    }
}

fn filename_cell(name: &str) -> Cell {
    entry_cell(name, Path::new(name).is_dir())
}

fn value_cell(value: &Value) -> Cell {
    match value.as_filename() {
        Some(name) => filename_cell(name),
        None => Cell {
            text: value.text(),
            width: value.width(),
        },
    }
}

fn scalar(pool: &TypePool, value: &Value, ty: TypeId) -> String {
    format!("{} :: {}\n", value_cell(value).text, pool.name(ty))
}

/// Pick the largest unit keeping the scaled value at or under 1024, then
/// three significant figures or so.
pub fn format_size(size: u64) -> String {
    let mut magnitude = 1u64;
    let mut order = 0usize;

    while size > SIZE_MAGNITUDE * magnitude {
        magnitude *= SIZE_MAGNITUDE;
        order += 1;
        if order >= 4 {
            break;
        }
    }

    let relative = size as f64 / magnitude as f64;
    let unit = if USE_SI_UNIT_NAMES {
        UNITS_SI[order]
    } else {
        UNITS[order]
    };
    let digits = if relative > 100.0 {
        0
    } else if relative > 10.0 {
        1
    } else {
        2
    };

    format!("{:.*} {}", digits, relative, unit)
}

fn stat_failure(error: &io::Error) -> &'static str {
    match error.kind() {
        io::ErrorKind::NotFound => "This file does not exist",
        io::ErrorKind::NotADirectory => "This file has an invalid path",
        io::ErrorKind::PermissionDenied => "You do not have permission to access this path",
        _ => "",
    }
}

/// The parenthetical after a file scalar: size for regular files, mode
/// otherwise, or why the stat failed. Directories then list their
/// contents.
fn render_file(name: &str, width: usize, out: &mut String) {
    match fs::metadata(name) {
        Ok(meta) => {
            if meta.is_file() {
                out.push_str(&format!("({})\n", format_size(meta.len())));
            } else if meta.is_dir() {
                out.push_str("(A Dir)\n");
                render_directory(name, width, out);
            } else {
                out.push_str("(A Special file)\n");
            }
        }
        Err(error) => {
            out.push_str(&format!("({})\n", stat_failure(&error)));
        }
    }
}

fn render_directory(name: &str, width: usize, out: &mut String) {
    let Ok(entries) = fs::read_dir(name) else {
        return;
    };

    let mut listing: Vec<(String, bool)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
            (entry.file_name().to_string_lossy().into_owned(), is_dir)
        })
        .collect();
    listing.sort();

    let cells: Vec<Cell> = listing
        .iter()
        .map(|(entry, is_dir)| entry_cell(entry, *is_dir))
        .collect();
    render_grid(&cells, width, out);
}

/// Entries fill down the columns: the cell at (row, col) is entry
/// `row + col * rows`. Missing tail cells stay blank.
fn render_grid(cells: &[Cell], term_width: usize, out: &mut String) {
    let widest = cells.iter().map(|cell| cell.width).max().unwrap_or(0);
    let column_width = widest + GAP;

    let columns = (term_width / column_width).max(1);
    let rows = cells.len().div_ceil(columns);

    for row in 0..rows {
        for col in 0..columns {
            let Some(cell) = cells.get(row + col * rows) else {
                break;
            };
            out.push_str(&cell.text);
            out.push_str(&" ".repeat(column_width - cell.width));
        }
        out.push('\n');
    }
}

fn render_file_list(pool: &TypePool, value: &Value, ty: TypeId, width: usize, out: &mut String) {
    let cells: Vec<Cell> = value
        .as_vector()
        .unwrap_or(&[])
        .iter()
        .map(value_cell)
        .collect();

    render_grid(&cells, width, out);
    out.push_str(&format!(" :: {}\n", pool.name(ty)));
}

/// A tuple list is square, so it tabulates: every column padded to its
/// widest cell plus the gap.
fn render_table(pool: &TypePool, value: &Value, ty: TypeId, out: &mut String) {
    let rows = value.as_vector().unwrap_or(&[]);
    let columns = pool
        .list_element(ty)
        .and_then(|element| pool.tuple_fields(element))
        .map_or(0, <[TypeId]>::len);

    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| {
            row.as_vector()
                .unwrap_or(&[])
                .iter()
                .map(value_cell)
                .collect()
        })
        .collect();

    let mut widths = vec![0usize; columns];
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            if col < columns && widths[col] < cell.width {
                widths[col] = cell.width;
            }
        }
    }

    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            out.push_str(&cell.text);
            let target = widths.get(col).copied().unwrap_or(cell.width) + GAP;
            out.push_str(&" ".repeat(target.saturating_sub(cell.width)));
        }
        out.push('\n');
    }

    out.push_str(&format!(" :: {}\n", pool.name(ty)));
}

/// Lists of lists print one element per line; braces move to their own
/// lines once the elements are themselves lists of lists.
fn render_list_list(pool: &TypePool, value: &Value, ty: TypeId, depth: usize, out: &mut String) {
    let elements = value.as_vector().unwrap_or(&[]);
    let element_ty = pool.list_element(ty).unwrap_or(TypeId::INVALID);
    let recursing = pool
        .list_element(element_ty)
        .is_some_and(|inner| pool.is_list(inner));

    let braces_on_own_line =
        BRACES_ON_OWN_LINE || (recursing && BRACES_ON_OWN_LINE_IF_RECURSING);

    out.push('[');
    if braces_on_own_line {
        out.push('\n');
        out.push_str(&" ".repeat(depth + 1));
    }

    for (i, element) in elements.iter().enumerate() {
        if i != 0 {
            out.push_str(&" ".repeat(depth + 1));
        }

        if recursing {
            render_list_list(pool, element, element_ty, depth + 1, out);
        } else {
            out.push_str(&value_cell(element).text);
        }

        if i + 1 < elements.len() {
            out.push_str(",\n");
        }
    }

    if braces_on_own_line {
        out.push('\n');
        out.push_str(&" ".repeat(depth));
    }
    out.push(']');

    if depth == 0 {
        if !braces_on_own_line {
            out.push('\n');
        }
        out.push_str(&format!(" :: {}\n", pool.name(ty)));
    }
}

/// Multi-line strings print verbatim, with a warning when the final end of
/// line is missing. Single-line strings take the scalar path (quoted).
fn render_str(pool: &TypePool, value: &Value, ty: TypeId, out: &mut String) {
    let Some(s) = value.as_str() else {
        out.push_str(&scalar(pool, value, ty));
        return;
    };

    if s.contains('\n') {
        let missing_eol = !s.ends_with('\n');
        if missing_eol {
            out.push_str(&format!("{}\n :: {}\n", s, pool.name(ty)));
            out.push_str("(This string was missing a final end of line character.)\n");
        } else {
            out.push_str(&format!("{} :: {}\n", s, pool.name(ty)));
        }
    } else {
        out.push_str(&scalar(pool, value, ty));
    }
}
