//! Column-aligned text tables for the list views.
//!
//! Widths adapt to the longest cell in each column, capped columns clip
//! with an ellipsis, and the width math skips ANSI color codes so styled
//! cells line up with plain ones.

use crate::cli::output::current_preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: &'static str,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl TableColumn {
    pub fn new(header: &'static str, alignment: Alignment) -> Self {
        Self {
            header,
            alignment,
            max_width: None,
        }
    }

    pub fn capped(header: &'static str, alignment: Alignment, max_width: usize) -> Self {
        Self {
            header,
            alignment,
            max_width: Some(max_width),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, rule, then one line per row. No trailing newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.to_string())
            .collect();
        lines.push(self.render_line(&header, &widths));
        lines.push(horizontal_rule(&widths));
        for row in &self.rows {
            lines.push(self.render_line(row, &widths));
        }

        lines.join("\n")
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = visible_width(column.header);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(visible_width(cell));
                    }
                }
                match column.max_width {
                    Some(cap) => width.min(cap),
                    None => width,
                }
            })
            .collect()
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = cells.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, widths[idx], column.alignment)
            })
            .collect();
        rendered.join("  ").trim_end().to_string()
    }
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = clip_text(text, width);
    let gap = width.saturating_sub(visible_width(&fitted));
    match alignment {
        Alignment::Left => format!("{}{}", fitted, " ".repeat(gap)),
        Alignment::Right => format!("{}{}", " ".repeat(gap), fitted),
    }
}

fn horizontal_rule(widths: &[usize]) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let span: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(span)
}

/// Character count excluding ANSI escape sequences.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Clips to `width` visible characters, ending with `…` and, when any
/// color codes were kept, a style reset.
fn clip_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut out = String::new();
    let mut visible = 0;
    let mut styled = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            out.push(ch);
            if chars.peek() == Some(&'[') {
                for follow in chars.by_ref() {
                    out.push(follow);
                    if follow != '[' && ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            styled = true;
            continue;
        }
        if visible + 1 >= width {
            break;
        }
        out.push(ch);
        visible += 1;
    }

    out.push('…');
    if styled {
        out.push_str("\u{1b}[0m");
    }
    out
}
