use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A planned power outage expressed on the slot grid.
///
/// Convention: `start_slot` is inclusive, `end_slot` exclusive - the window
/// covers `start_slot..end_slot`. During the window only essential
/// appliances draw power, and every EV must have reached its emergency SoC
/// by slot `start_slot - 1`. An outage starting at slot 0 leaves no slot to
/// enforce that floor and is rejected at validation whenever any EV carries
/// a non-zero emergency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutageWindow {
    pub start_slot: usize,
    pub end_slot: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OutageWindow {
    pub fn new(start_slot: usize, end_slot: usize) -> Self {
        Self {
            start_slot,
            end_slot,
            reason: None,
        }
    }

    pub fn contains(&self, slot: usize) -> bool {
        slot >= self.start_slot && slot < self.end_slot
    }

    pub fn len_slots(&self) -> usize {
        self.end_slot.saturating_sub(self.start_slot)
    }

    /// Project a wall-clock outage announcement onto the slot grid.
    ///
    /// `reference` is the start of slot 0. The window is widened to whole
    /// slots (floor the start, ceil the end) so the essential-only demand
    /// rule covers every partially affected slot. Returns `None` for
    /// windows that end before the horizon starts or are otherwise empty.
    pub fn from_times(
        reference: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        slot_duration_hours: f64,
    ) -> Option<Self> {
        if slot_duration_hours <= 0.0 || end <= start || end <= reference {
            return None;
        }
        let hours_from = |t: DateTime<Utc>| (t - reference).num_minutes() as f64 / 60.0;
        let start_slot = (hours_from(start).max(0.0) / slot_duration_hours).floor() as usize;
        let end_slot = (hours_from(end) / slot_duration_hours).ceil() as usize;
        if end_slot <= start_slot {
            return None;
        }
        Some(Self {
            start_slot,
            end_slot,
            reason: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_is_start_inclusive_end_exclusive() {
        let outage = OutageWindow::new(4, 6);
        assert!(!outage.contains(3));
        assert!(outage.contains(4));
        assert!(outage.contains(5));
        assert!(!outage.contains(6));
        assert_eq!(outage.len_slots(), 2);
    }

    #[test]
    fn test_from_times_rounds_to_whole_slots() {
        let reference = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 4, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 5, 30, 0).unwrap();

        let outage = OutageWindow::from_times(reference, start, end, 1.0).unwrap();
        assert_eq!(outage.start_slot, 4);
        assert_eq!(outage.end_slot, 6);
    }

    #[test]
    fn test_from_times_clamps_past_start_to_slot_zero() {
        let reference = Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 5, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();

        let outage = OutageWindow::from_times(reference, start, end, 1.0).unwrap();
        assert_eq!(outage.start_slot, 0);
        assert_eq!(outage.end_slot, 2);
    }

    #[test]
    fn test_from_times_rejects_expired_window() {
        let reference = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 4, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap();

        assert!(OutageWindow::from_times(reference, start, end, 1.0).is_none());
    }
}
