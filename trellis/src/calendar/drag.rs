//! Drag-to-reschedule.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use log::warn;

use super::event::{CalendarEvent, CalendarIntent, EventId, EventPatch};

/// Default snapping interval for dragged and created events.
pub const DEFAULT_SNAP_MINUTES: u32 = 15;

/// Round `time` to the nearest multiple of `snap_minutes` since midnight.
///
/// Seconds are dropped. A snap of zero is treated as one minute. Rounding
/// can roll over into the next day (23:55 snapped to 15 is 00:00). `None`
/// when that rollover leaves the representable range.
pub fn snap(time: NaiveDateTime, snap_minutes: u32) -> Option<NaiveDateTime> {
    let step = i64::from(snap_minutes.max(1));
    let midnight = time.date().and_time(NaiveTime::MIN);
    let minutes = (time - midnight).num_minutes();
    let snapped = (minutes + step / 2).div_euclid(step) * step;
    midnight.checked_add_signed(TimeDelta::try_minutes(snapped)?)
}

/// An in-progress drag of one event.
///
/// The pointer offset is tracked relative to where the drag started, in
/// minutes along the time axis and whole days across columns. The preview
/// keeps the original duration and snaps the start to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub id: EventId,
    pub origin_start: NaiveDateTime,
    pub duration: TimeDelta,
    pub offset_minutes: i64,
    pub offset_days: i64,
    pub snap_minutes: u32,
}

impl DragState {
    /// Start dragging `event`.
    pub fn begin(event: &CalendarEvent, snap_minutes: u32) -> Self {
        Self {
            id: event.id.clone(),
            origin_start: event.start,
            duration: event.effective_duration(),
            offset_minutes: 0,
            offset_days: 0,
            snap_minutes,
        }
    }

    /// Set the pointer offset from the drag origin.
    pub fn move_to(&mut self, offset_minutes: i64, offset_days: i64) {
        self.offset_minutes = offset_minutes;
        self.offset_days = offset_days;
    }

    /// Returns `true` if the pointer has not left its origin.
    pub fn is_unmoved(&self) -> bool {
        self.offset_minutes == 0 && self.offset_days == 0
    }

    /// The `(start, end)` the event would get if dropped now.
    ///
    /// `None` when the offset moves the event out of the representable
    /// date range.
    pub fn preview(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let raw = self
            .origin_start
            .checked_add_signed(TimeDelta::try_days(self.offset_days)?)?
            .checked_add_signed(TimeDelta::try_minutes(self.offset_minutes)?)?;
        let start = snap(raw, self.snap_minutes)?;
        Some((start, start.checked_add_signed(self.duration)?))
    }

    /// Finish the drag, producing the reschedule intent.
    ///
    /// Returns `None` when the event would land where it started or out of
    /// range.
    pub fn finish(self) -> Option<CalendarIntent> {
        if self.is_unmoved() {
            return None;
        }
        let Some((start, end)) = self.preview() else {
            warn!("drag of {} moved out of range; dropped", self.id);
            return None;
        };
        if start == self.origin_start {
            return None;
        }
        Some(CalendarIntent::Update {
            id: self.id,
            patch: EventPatch::reschedule(start, end),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(at(9, 7), 15), Some(at(9, 0)));
        assert_eq!(snap(at(9, 8), 15), Some(at(9, 15)));
        assert_eq!(snap(at(9, 52), 15), Some(at(9, 45)));
        assert_eq!(snap(at(9, 53), 15), Some(at(10, 0)));
    }

    #[test]
    fn test_snap_rolls_into_next_day() {
        let next_midnight = NaiveDate::from_ymd_opt(2024, 5, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(snap(at(23, 55), 15), Some(next_midnight));
        assert_eq!(snap(NaiveDateTime::MAX, 15), None);
    }

    #[test]
    fn test_drag_preserves_duration() {
        let event = CalendarEvent::new("a", "Checkup", at(9, 0), at(9, 45));
        let mut drag = DragState::begin(&event, 15);
        drag.move_to(38, 1);

        let (start, end) = drag.preview().unwrap();
        assert_eq!(start, at(9, 45) + TimeDelta::days(1));
        assert_eq!(end - start, TimeDelta::minutes(45));
    }

    #[test]
    fn test_unmoved_drag_yields_nothing() {
        let event = CalendarEvent::new("a", "Checkup", at(9, 0), at(9, 30));
        let drag = DragState::begin(&event, 15);
        assert_eq!(drag.finish(), None);

        let mut drag = DragState::begin(&event, 15);
        drag.move_to(5, 0);
        assert_eq!(drag.finish(), None, "snaps back onto the origin");
    }

    #[test]
    fn test_out_of_range_offset_yields_nothing() {
        let event = CalendarEvent::new("a", "Checkup", at(9, 0), at(9, 30));
        for (minutes, days) in [(i64::MAX, 0), (i64::MIN, 0), (0, i64::MAX), (1_000_000_000_000, 0)] {
            let mut drag = DragState::begin(&event, 15);
            drag.move_to(minutes, days);
            assert_eq!(drag.preview(), None);
            assert_eq!(drag.finish(), None);
        }
    }

    #[test]
    fn test_drag_of_invalid_event_uses_minimum_duration() {
        let event = CalendarEvent::new("a", "Broken", at(9, 0), at(8, 0));
        let mut drag = DragState::begin(&event, 15);
        drag.move_to(60, 0);
        assert_eq!(
            drag.finish(),
            Some(CalendarIntent::Update {
                id: EventId::from("a"),
                patch: EventPatch::reschedule(at(10, 0), at(10, 15)),
            })
        );
    }
}
