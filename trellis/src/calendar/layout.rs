//! Overlap layout for time-grid (day and week) views.
//!
//! Events of one day are placed with interval partitioning:
//!
//! 0. Drop events with no minute inside the grid hours; they take no space.
//! 1. Sort by start, then end (shorter first), then input order.
//! 2. Split into clusters. A new cluster starts when an event starts at or
//!    after the latest end seen in the current cluster.
//! 3. Inside a cluster, give each event the lowest column whose previous
//!    event has already ended (greedy interval colouring). The number of
//!    columns used is the cluster's width divisor.
//!
//! Because events are visited in start order, the greedy colouring uses
//! exactly as many columns as the largest number of events active at one
//! instant.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, warn};

use super::event::{CalendarEvent, EventId};
use super::view::DateRange;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Vertical scale of the time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    /// First minute of the day shown by the grid.
    pub day_start_minute: u32,
    /// Last minute (exclusive) shown by the grid.
    pub day_end_minute: u32,
    /// Vertical units per minute.
    pub px_per_minute: f32,
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            day_start_minute: 0,
            day_end_minute: MINUTES_PER_DAY,
            px_per_minute: 1.0,
        }
    }
}

impl GridScale {
    /// A grid showing `start_hour..end_hour` at `px_per_minute`.
    pub fn hours(start_hour: u32, end_hour: u32, px_per_minute: f32) -> Self {
        let start = (start_hour * 60).min(MINUTES_PER_DAY);
        let end = (end_hour * 60).clamp(start, MINUTES_PER_DAY);
        Self {
            day_start_minute: start,
            day_end_minute: end,
            px_per_minute,
        }
    }

    /// Total grid height for one day.
    pub fn height(&self) -> f32 {
        self.day_end_minute.saturating_sub(self.day_start_minute) as f32 * self.px_per_minute
    }

    /// Vertical offset of a minute-of-day, clamped into the grid.
    pub fn offset(&self, minute_of_day: i64) -> f32 {
        let clamped = minute_of_day.clamp(self.day_start_minute as i64, self.day_end_minute as i64);
        (clamped - self.day_start_minute as i64) as f32 * self.px_per_minute
    }

    /// Minute-of-day under a vertical offset (inverse of [`offset`](Self::offset)).
    pub fn minute_at(&self, y: f32) -> u32 {
        if self.px_per_minute <= 0.0 {
            return self.day_start_minute;
        }
        let minute = self.day_start_minute as f32 + (y / self.px_per_minute).max(0.0);
        (minute as u32).min(self.day_end_minute)
    }
}

/// Placement of one event on the time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub id: EventId,
    pub date: NaiveDate,
    /// Zero-based column inside the event's cluster.
    pub column: usize,
    /// Number of columns in the event's cluster.
    pub column_count: usize,
    pub top: f32,
    pub height: f32,
    /// Horizontal offset as a fraction of the day column width.
    pub left: f32,
    /// Width as a fraction of the day column width.
    pub width: f32,
}

/// Blocks of one visible day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub blocks: Vec<EventBlock>,
}

struct Slot<'a> {
    event: &'a CalendarEvent,
    start: NaiveDateTime,
    end: NaiveDateTime,
    top: f32,
    bottom: f32,
}

/// Lay out the events of a single day.
///
/// Events not starting on `date` are ignored. Empty or inverted ranges get
/// the minimum duration; events running past midnight are clipped to the
/// end of `date`.
pub fn layout_day<'a>(
    date: NaiveDate,
    events: impl IntoIterator<Item = &'a CalendarEvent>,
    scale: &GridScale,
) -> Vec<EventBlock> {
    let midnight = date.and_time(NaiveTime::MIN);
    let next_midnight = midnight
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDateTime::MAX);

    let mut slots: Vec<Slot<'a>> = events
        .into_iter()
        .filter(|event| event.date() == date)
        .filter_map(|event| {
            if !event.is_valid() {
                warn!(
                    "event {} has start {} not before end {}, clamping duration",
                    event.id, event.start, event.end
                );
            }
            let end = event.effective_end().min(next_midnight);
            let top = scale.offset((event.start - midnight).num_minutes());
            let bottom = scale.offset((end - midnight).num_minutes());
            if bottom <= top {
                debug!("event {} is outside grid hours, not drawn", event.id);
                return None;
            }
            Some(Slot {
                event,
                start: event.start,
                end,
                top,
                bottom,
            })
        })
        .collect();

    slots.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut blocks = Vec::with_capacity(slots.len());
    let mut cluster: Vec<(&Slot<'a>, usize)> = Vec::new();
    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut cluster_end: Option<NaiveDateTime> = None;

    for slot in &slots {
        if cluster_end.is_some_and(|end| slot.start >= end) {
            flush_cluster(&mut cluster, column_ends.len(), midnight, &mut blocks);
            column_ends.clear();
            cluster_end = None;
        }

        let column = match column_ends.iter().position(|end| *end <= slot.start) {
            Some(free) => {
                column_ends[free] = slot.end;
                free
            }
            None => {
                column_ends.push(slot.end);
                column_ends.len() - 1
            }
        };
        cluster.push((slot, column));
        cluster_end = Some(cluster_end.map_or(slot.end, |end| end.max(slot.end)));
    }
    flush_cluster(&mut cluster, column_ends.len(), midnight, &mut blocks);

    blocks
}

fn flush_cluster(
    cluster: &mut Vec<(&Slot<'_>, usize)>,
    column_count: usize,
    midnight: NaiveDateTime,
    blocks: &mut Vec<EventBlock>,
) {
    for (slot, column) in cluster.drain(..) {
        let width = 1.0 / column_count as f32;
        blocks.push(EventBlock {
            id: slot.event.id.clone(),
            date: midnight.date(),
            column,
            column_count,
            top: slot.top,
            height: slot.bottom - slot.top,
            left: column as f32 * width,
            width,
        });
    }
}

/// Lay out every day of `range`.
///
/// Only events accepted by `visible` and starting inside the range are
/// placed; everything else is simply not drawn.
pub fn layout_range<'a>(
    events: &'a [CalendarEvent],
    range: DateRange,
    scale: &GridScale,
    visible: impl Fn(&CalendarEvent) -> bool,
) -> Vec<DayLayout> {
    let in_view: Vec<&'a CalendarEvent> = events
        .iter()
        .filter(|event| range.contains(event.date()) && visible(*event))
        .collect();

    range
        .days()
        .map(|date| DayLayout {
            date,
            blocks: layout_day(date, in_view.iter().copied(), scale),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new(id, id, start, end)
    }

    #[test]
    fn test_geometry_is_linear_in_minutes() {
        let scale = GridScale::hours(8, 18, 2.0);
        let events = [event("a", at(9, 0), at(9, 30))];
        let blocks = layout_day(at(0, 0).date(), &events, &scale);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].top, 120.0);
        assert_eq!(blocks[0].height, 60.0);
        assert_eq!((blocks[0].left, blocks[0].width), (0.0, 1.0));
    }

    #[test]
    fn test_touching_events_share_a_column() {
        let events = [event("a", at(9, 0), at(10, 0)), event("b", at(10, 0), at(11, 0))];
        let blocks = layout_day(at(0, 0).date(), &events, &GridScale::default());

        assert!(blocks.iter().all(|b| b.column == 0 && b.column_count == 1));
    }

    #[test]
    fn test_column_reuse_inside_cluster() {
        // a spans the whole cluster; b then c fit one after another in column 1
        let events = [
            event("a", at(9, 0), at(12, 0)),
            event("b", at(9, 0), at(10, 0)),
            event("c", at(10, 30), at(11, 0)),
        ];
        let blocks = layout_day(at(0, 0).date(), &events, &GridScale::default());
        let column = |id: &str| blocks.iter().find(|b| b.id.as_str() == id).unwrap().column;

        assert_eq!(column("b"), 0, "shorter event placed first");
        assert_eq!(column("a"), 1);
        assert_eq!(column("c"), 0);
        assert!(blocks.iter().all(|b| b.column_count == 2));
    }

    #[test]
    fn test_past_midnight_is_clipped() {
        let end = at(0, 0) + TimeDelta::days(1) + TimeDelta::hours(2);
        let events = [event("late", at(23, 0), end)];
        let blocks = layout_day(at(0, 0).date(), &events, &GridScale::default());

        assert_eq!(blocks[0].height, 60.0);
    }

    #[test]
    fn test_outside_grid_hours_not_drawn() {
        let scale = GridScale::hours(8, 18, 1.0);
        let events = [event("early", at(6, 0), at(7, 0))];
        assert!(layout_day(at(0, 0).date(), &events, &scale).is_empty());
    }

    #[test]
    fn test_hidden_early_event_takes_no_column() {
        let scale = GridScale::hours(8, 18, 1.0);
        let events = [
            event("early", at(6, 0), at(8, 0)),
            event("visible", at(7, 30), at(9, 0)),
        ];
        let blocks = layout_day(at(0, 0).date(), &events, &scale);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id.as_str(), "visible");
        assert_eq!((blocks[0].column, blocks[0].column_count), (0, 1));
        assert_eq!(blocks[0].width, 1.0);
    }
}
