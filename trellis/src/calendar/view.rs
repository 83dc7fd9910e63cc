//! Calendar view granularity, visible ranges and navigation state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::drag::DragState;
use super::event::CalendarEvent;

/// Grid granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarView {
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarView::Day => "day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown view name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown calendar view '{0}' (expected day, week or month)")]
pub struct ParseViewError(pub String);

impl FromStr for CalendarView {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(CalendarView::Day),
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            other => Err(ParseViewError(other.to_string())),
        }
    }
}

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering one day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day in the range, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// First day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// Navigation state of a calendar: which view, around which day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub view: CalendarView,
    /// The day the view is centered on.
    pub anchor: NaiveDate,
    pub week_start: Weekday,
    /// Categories whose events are hidden.
    pub hidden_categories: BTreeSet<String>,
    /// In-progress drag, if any.
    pub drag: Option<DragState>,
}

impl CalendarState {
    pub fn new(view: CalendarView, anchor: NaiveDate) -> Self {
        Self {
            view,
            anchor,
            week_start: Weekday::Sun,
            hidden_categories: BTreeSet::new(),
            drag: None,
        }
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Days covered by the current view.
    ///
    /// Month view spans whole weeks, so it starts before the 1st and ends
    /// after the last day of the month when those fall mid-week.
    pub fn visible_range(&self) -> DateRange {
        match self.view {
            CalendarView::Day => DateRange::day(self.anchor),
            CalendarView::Week => {
                let start = week_start_of(self.anchor, self.week_start);
                DateRange::new(start, end_of_week(start))
            }
            CalendarView::Month => {
                let first = self.anchor.with_day(1).unwrap_or(self.anchor);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                let start = week_start_of(first, self.week_start);
                let end = end_of_week(week_start_of(last, self.week_start));
                DateRange::new(start, end)
            }
        }
    }

    /// Returns `true` if the event is on a visible day and not filtered out.
    pub fn is_visible(&self, event: &CalendarEvent) -> bool {
        self.visible_range().contains(event.date())
            && !self.hidden_categories.contains(&event.category)
    }

    /// Move the anchor one view-length forward (`steps > 0`) or back.
    ///
    /// Month steps keep the day of month where possible and clamp to the
    /// last day otherwise (Jan 31 → Feb 29 → Mar 29).
    ///
    /// At the edges of the calendar the anchor stays put.
    pub fn shifted(&self, steps: i32) -> NaiveDate {
        let days = |n: u64| Days::new(n * u64::from(steps.unsigned_abs()));
        let moved = match (self.view, steps >= 0) {
            (CalendarView::Day, true) => self.anchor.checked_add_days(days(1)),
            (CalendarView::Day, false) => self.anchor.checked_sub_days(days(1)),
            (CalendarView::Week, true) => self.anchor.checked_add_days(days(7)),
            (CalendarView::Week, false) => self.anchor.checked_sub_days(days(7)),
            (CalendarView::Month, true) => {
                self.anchor.checked_add_months(Months::new(steps.unsigned_abs()))
            }
            (CalendarView::Month, false) => {
                self.anchor.checked_sub_months(Months::new(steps.unsigned_abs()))
            }
        };
        moved.unwrap_or(self.anchor)
    }
}

fn end_of_week(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}
