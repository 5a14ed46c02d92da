//! Plain-text rendering of a table view.

use ngs360_lib::SortDirection;
use ngs360_lib::table::{HeaderCell, TableView, ViewRow};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "  ";

fn sort_marker(header: &HeaderCell) -> &'static str {
    match header.sort {
        Some(SortDirection::Ascending) => " ^",
        Some(SortDirection::Descending) => " v",
        None => "",
    }
}

fn header_text(header: &HeaderCell) -> String {
    format!("{}{}", header.label, sort_marker(header))
}

/// Pad or truncate `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let current = text.width();
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn column_widths(view: &TableView) -> Vec<usize> {
    view.headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            if let Some(size) = header.size {
                return size as usize;
            }
            view.data_rows()
                .filter_map(|cells| cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header_text(header).width()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn join_line(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join(SEPARATOR).trim_end().to_string()
}

/// Render the header, body and footer as lines of text.
pub fn render(view: &TableView) -> String {
    let widths = column_widths(view);
    let gaps = widths.len().saturating_sub(1);
    let total_width = widths.iter().sum::<usize>() + SEPARATOR.len() * gaps;
    let mut lines = Vec::with_capacity(view.rows.len() + 3);

    lines.push(join_line(
        view.headers
            .iter()
            .zip(&widths)
            .map(|(header, &w)| fit(&header_text(header), w)),
    ));
    lines.push("-".repeat(total_width));

    for row in &view.rows {
        match row {
            ViewRow::Leading { label, .. } => lines.push(label.clone()),
            ViewRow::Data { cells } => {
                lines.push(join_line(cells.iter().zip(&widths).map(|(cell, &w)| fit(cell, w))));
            }
            ViewRow::Placeholder { message, .. } => {
                let pad = total_width.saturating_sub(message.width()) / 2;
                lines.push(format!("{}{}", " ".repeat(pad), message));
            }
        }
    }

    if let Some(footer) = &view.footer {
        lines.push("-".repeat(total_width));
        lines.push(format!("{}  ({} per page)", footer, footer.page_size_label));
    }

    lines.join("\n")
}
