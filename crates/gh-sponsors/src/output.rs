//! Table and JSON rendering of a sponsor list.
use std::io::{self, Write};

use comfy_table::{ContentArrangement, Row, Table, presets::NOTHING};

use crate::jsonpretty;
use crate::sponsors::{JsonField, Sponsor, project};

const NO_SPONSORS: &str = "no sponsor found";
const COLUMN_GAP: u16 = 2;
const TRUNCATION_INDICATOR: &str = "...";

/// How output will be presented. Detected once by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputCaps {
    pub interactive: bool,
    pub color: bool,
    pub width: Option<u16>,
}

/// Render `sponsors` as JSON when `fields` is set, otherwise as a table.
pub fn render_sponsors(
    sponsors: &[Sponsor],
    fields: Option<&[JsonField]>,
    caps: OutputCaps,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<()> {
    if let Some(fields) = fields {
        let data = project(sponsors, fields);
        if caps.interactive {
            return jsonpretty::write(out, &data, "  ", caps.color);
        }
        serde_json::to_writer(&mut *out, &data)?;
        return writeln!(out);
    }

    if sponsors.is_empty() {
        if caps.interactive {
            writeln!(err, "{NO_SPONSORS}")?;
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = sponsors.iter().map(|s| vec![s.login.clone()]).collect();
    write_table(out, &["SPONSOR"], &rows, caps)
}

/// One line per row, cut to fit the width rather than wrapped.
fn single_line_row(cells: Vec<String>) -> Row {
    let mut row = Row::from(cells);
    row.max_height(1);
    row
}

/// Aligned columns on a terminal; headerless tab-separated lines otherwise.
fn write_table(
    out: &mut dyn Write,
    headers: &[&str],
    rows: &[Vec<String>],
    caps: OutputCaps,
) -> io::Result<()> {
    if !caps.interactive {
        for row in rows {
            writeln!(out, "{}", row.join("\t"))?;
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_truncation_indicator(TRUNCATION_INDICATOR)
        .set_header(single_line_row(
            headers.iter().map(|h| h.to_string()).collect(),
        ));
    // Some ptys report a zero width; treat that as unknown.
    if let Some(width) = caps.width.filter(|w| *w > 0) {
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(width);
    }
    for row in rows {
        table.add_row(single_line_row(row.clone()));
    }

    let last = headers.len().saturating_sub(1);
    for (i, column) in table.column_iter_mut().enumerate() {
        let right = if i == last { 0 } else { COLUMN_GAP };
        column.set_padding((0, right));
    }

    for line in table.lines() {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
