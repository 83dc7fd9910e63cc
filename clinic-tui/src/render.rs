//! Text rendering of engine views.
//!
//! Pages build [`Line`]s of styled [`Span`]s; [`write_lines`] prints them
//! with crossterm. Widths are measured in terminal columns.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use trellis::calendar::{CalendarEvent, CalendarFrame, EventId, GridScale, MonthGrid};
use trellis::table::{Alignment, TableView};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column width used when a field has none.
const DEFAULT_COLUMN_WIDTH: usize = 12;

/// Width of one month-view cell.
const MONTH_CELL_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Muted,
    Accent,
    Danger,
    Success,
    /// `#rrggbb` color.
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One output line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self::new(vec![Span::new(text, tone)])
    }

    /// The line without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

// =============================================================================
// Text measurement
// =============================================================================

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cut `s` to `max_width` columns, ending with `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Truncate or pad `s` to exactly `width` columns.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(display_width(&text));
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(gap)),
        Alignment::Right => format!("{}{}", " ".repeat(gap), text),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

/// Tone for a `#rrggbb` color; anything else is the accent color.
pub fn hex_tone(color: &str) -> Tone {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (hex.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Tone::Rgb(r, g, b),
        _ => Tone::Accent,
    }
}

// =============================================================================
// Table
// =============================================================================

/// Lines for a rendered table: header, rows (or the empty state) and footer.
pub fn table_lines<K: Display>(view: &TableView<K>) -> Vec<Line> {
    let widths: Vec<usize> = view
        .headers
        .iter()
        .map(|h| h.width.map_or(DEFAULT_COLUMN_WIDTH, usize::from))
        .collect();
    let mut lines = Vec::new();

    let mut header = Vec::new();
    if let Some(all) = view.select_all {
        header.push(Span::new(format!("{} ", all.indicator()), Tone::Muted));
    }
    header.push(Span::new(fit("#", 4, Alignment::Left), Tone::Muted));
    for (cell, width) in view.headers.iter().zip(&widths) {
        let label = match cell.sorted {
            Some(direction) => format!("{} {}", cell.label, direction.indicator()),
            None => cell.label.clone(),
        };
        let tone = if cell.sorted.is_some() { Tone::Accent } else { Tone::Normal };
        header.push(Span::new(format!("{} ", fit(&label, *width, cell.align)), tone).bold());
    }
    lines.push(Line::new(header));

    if view.is_empty() {
        lines.push(Line::text("  No results.", Tone::Muted));
    }

    for row in &view.rows {
        let mut spans = Vec::new();
        if view.select_all.is_some() {
            let mark = if row.selected { "[x] " } else { "[ ] " };
            spans.push(Span::new(mark, Tone::Accent));
        }
        spans.push(Span::new(fit(&row.key.to_string(), 4, Alignment::Left), Tone::Muted));
        for ((text, header), width) in row.cells.iter().zip(&view.headers).zip(&widths) {
            spans.push(Span::new(format!("{} ", fit(text, *width, header.align)), Tone::Normal));
        }
        lines.push(Line::new(spans));
    }

    let mut footer = vec![Span::new(view.summary(), Tone::Muted)];
    if let Some(window) = view.pagination.as_ref().filter(|w| w.page_count > 1) {
        footer.push(Span::new(
            format!("  page {}/{}", window.page + 1, window.page_count),
            Tone::Muted,
        ));
    }
    if view.selected_count > 0 {
        footer.push(Span::new(format!("  {} selected", view.selected_count), Tone::Accent));
    }
    lines.push(Line::new(footer));

    if !view.actions.is_empty() {
        let actions: Vec<Span> = view
            .actions
            .iter()
            .map(|a| {
                let tone = if a.destructive { Tone::Danger } else { Tone::Muted };
                Span::new(format!("[{}] ", a.id), tone)
            })
            .collect();
        lines.push(Line::new(actions));
    }

    lines
}

// =============================================================================
// Calendar
// =============================================================================

/// Lines for a calendar frame.
///
/// Time-grid views list each day's blocks by start time, indented by their
/// overlap column. The month view prints each week as a row of cells.
pub fn calendar_lines(frame: &CalendarFrame, events: &[CalendarEvent], scale: &GridScale) -> Vec<Line> {
    let find = |id: &EventId| events.iter().find(|e| &e.id == id);

    match frame {
        CalendarFrame::Grid { days, preview, .. } => {
            let mut lines = Vec::new();
            for day in days {
                lines.push(Line::text(day.date.format("%a %Y-%m-%d").to_string(), Tone::Normal));
                let mut blocks: Vec<_> = day.blocks.iter().collect();
                blocks.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.column.cmp(&b.column)));
                if blocks.is_empty() {
                    lines.push(Line::text("    -", Tone::Muted));
                }
                for block in blocks {
                    let Some(event) = find(&block.id) else { continue };
                    let start = scale.minute_at(block.top);
                    let end = scale.minute_at(block.top + block.height);
                    let indent = "      ".repeat(block.column);
                    let mut spans = vec![
                        Span::new(format!("  {}{}-{} ", indent, clock(start), clock(end)), Tone::Muted),
                        Span::new(event.title.clone(), hex_tone(&event.color)).bold(),
                        Span::new(format!("  {} · {}", event.category, event.id), Tone::Muted),
                    ];
                    if block.column_count > 1 {
                        spans.push(Span::new(
                            format!("  [{}/{}]", block.column + 1, block.column_count),
                            Tone::Muted,
                        ));
                    }
                    lines.push(Line::new(spans));
                }
            }
            if let Some(preview) = preview {
                let title = find(&preview.id).map_or("?", |e| e.title.as_str());
                lines.push(Line::text(
                    format!(
                        "moving {} to {} {}-{}",
                        title,
                        preview.start.format("%a %Y-%m-%d"),
                        preview.start.format("%H:%M"),
                        preview.end.format("%H:%M"),
                    ),
                    Tone::Accent,
                ));
            }
            lines
        }
        CalendarFrame::Month(grid) => month_lines(grid, events),
    }
}

fn month_lines(grid: &MonthGrid, events: &[CalendarEvent]) -> Vec<Line> {
    let mut lines = Vec::new();

    if let Some(week) = grid.weeks.first() {
        let names: String = week
            .iter()
            .map(|cell| fit(&cell.date.format("%a").to_string(), MONTH_CELL_WIDTH, Alignment::Left))
            .collect();
        lines.push(Line::text(names, Tone::Muted));
    }

    for week in &grid.weeks {
        let days = week
            .iter()
            .map(|cell| {
                let tone = if cell.in_month { Tone::Normal } else { Tone::Muted };
                Span::new(fit(&cell.date.day().to_string(), MONTH_CELL_WIDTH, Alignment::Left), tone)
            })
            .collect();
        lines.push(Line::new(days));

        let rows = week.iter().map(|cell| cell.events.len() + usize::from(cell.overflow > 0)).max();
        for index in 0..rows.unwrap_or(0) {
            let spans = week
                .iter()
                .map(|cell| match cell.events.get(index) {
                    Some(id) => {
                        let event = events.iter().find(|e| &e.id == id);
                        let title = event.map_or(id.as_str(), |e| e.title.as_str());
                        let tone = event.map_or(Tone::Normal, |e| hex_tone(&e.color));
                        Span::new(fit(title, MONTH_CELL_WIDTH - 1, Alignment::Left) + " ", tone)
                    }
                    None if index == cell.events.len() && cell.overflow > 0 => Span::new(
                        fit(&format!("+{} more", cell.overflow), MONTH_CELL_WIDTH, Alignment::Left),
                        Tone::Muted,
                    ),
                    None => Span::new(" ".repeat(MONTH_CELL_WIDTH), Tone::Normal),
                })
                .collect();
            lines.push(Line::new(spans));
        }
    }
    lines
}

fn clock(minute_of_day: u32) -> String {
    if minute_of_day >= 24 * 60 {
        return "24:00".to_string();
    }
    let time = NaiveTime::MIN + TimeDelta::minutes(i64::from(minute_of_day));
    time.format("%H:%M").to_string()
}

/// `"week of Mar 9, 2025"` style title for a visible range.
pub fn range_title(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%A, %b %-d, %Y").to_string()
    } else {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    }
}

// =============================================================================
// Output
// =============================================================================

/// Print lines with their colors.
pub fn write_lines(out: &mut impl Write, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            let color = match span.tone {
                Tone::Normal => Color::Reset,
                Tone::Muted => Color::DarkGrey,
                Tone::Accent => Color::Cyan,
                Tone::Danger => Color::Red,
                Tone::Success => Color::Green,
                Tone::Rgb(r, g, b) => Color::Rgb { r, g, b },
            };
            queue!(out, SetForegroundColor(color))?;
            if span.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
