use crate::types::Row;
use crate::types::value::value_to_string;

const SEPARATOR: &str = " | ";

/// Formats rows as an aligned text table.
///
/// Each column is as wide as its header or widest cell, cells are
/// left-justified and joined with `" | "`, and the header is underlined with
/// dashes spanning its full width.
pub fn format_table(columns: &[String], rows: &[Row]) -> String {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(value_to_string).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rendered
                .iter()
                .filter_map(|cells| cells.get(i))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count(), usize::max)
        })
        .collect();

    let header = pad_line(columns.iter().map(String::as_str), &widths);
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![header, rule];
    for cells in &rendered {
        lines.push(pad_line(cells.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
