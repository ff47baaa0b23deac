use log::{debug, trace};
use std::fmt;
use time::Date;

/// One of the two calendars of a range picker
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

/// A pair of optional endpoints.
///
/// As the committed selection, a `DateRange` with both ends set always has
/// `from <= to`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

/// Dates staged by a picker but not yet applied
pub type PendingSelection = DateRange;

impl DateRange {
    pub const EMPTY: DateRange = DateRange {
        from: None,
        to: None,
    };

    pub fn new(from: Option<Date>, to: Option<Date>) -> DateRange {
        DateRange { from, to }
    }

    pub fn get(&self, side: Side) -> Option<Date> {
        match side {
            Side::From => self.from,
            Side::To => self.to,
        }
    }

    fn slot(&mut self, side: Side) -> &mut Option<Date> {
        match side {
            Side::From => &mut self.from,
            Side::To => &mut self.to,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns `true` if `date` lies between both ends, inclusive
    pub fn contains(&self, date: Date) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from <= date && date <= to)
    }
}

/// Inclusive limits on selectable dates
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bounds {
    pub min: Option<Date>,
    pub max: Option<Date>,
}

impl Bounds {
    pub fn new(min: Option<Date>, max: Option<Date>) -> Bounds {
        Bounds { min, max }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }
}

/// Whether a picker is open, and which
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PickerState {
    #[default]
    Idle,
    Picking(Side),
}

/// The committed/pending selection model behind a two-calendar range picker.
///
/// Days are staged into a pending buffer while a calendar is open and only
/// become part of the committed range when that calendar is applied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RangeSelection {
    committed: DateRange,
    pending: PendingSelection,
    bounds: Bounds,
    state: PickerState,
}

impl RangeSelection {
    pub fn new(bounds: Bounds) -> RangeSelection {
        RangeSelection {
            bounds,
            ..RangeSelection::default()
        }
    }

    /// Replace the committed range wholesale and reseed both pending values
    /// from it.  If the ends are out of order, the end date is dropped.
    pub fn restore(&mut self, mut range: DateRange) {
        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                debug!("Discarding end date {to} as it precedes start date {from}");
                range.to = None;
            }
        }
        self.committed = range;
        self.pending = range;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn committed(&self) -> DateRange {
        self.committed
    }

    pub fn pending(&self) -> PendingSelection {
        self.pending
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn open_side(&self) -> Option<Side> {
        match self.state {
            PickerState::Idle => None,
            PickerState::Picking(side) => Some(side),
        }
    }

    pub fn is_open(&self, side: Side) -> bool {
        self.state == PickerState::Picking(side)
    }

    /// Open the calendar for `side`, closing the other one, and seed its
    /// pending value from the committed one
    pub fn open(&mut self, side: Side) {
        *self.pending.slot(side) = self.committed.get(side);
        self.state = PickerState::Picking(side);
        debug!("Opened {side} picker");
    }

    /// Close the calendar for `side` if it is open, otherwise open it.
    /// Returns whether it is now open.
    pub fn toggle(&mut self, side: Side) -> bool {
        if self.is_open(side) {
            self.close();
            false
        } else {
            self.open(side);
            true
        }
    }

    /// Close whatever calendar is open without applying or discarding
    /// anything
    pub fn dismiss(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let PickerState::Picking(side) = self.state {
            debug!("Closed {side} picker");
        }
        self.state = PickerState::Idle;
    }

    /// Returns `true` if `date` is outside the bounds or on the wrong side of
    /// the committed opposite end
    pub fn is_disabled(&self, side: Side, date: Date) -> bool {
        !self.bounds.contains(date)
            || match side {
                Side::From => self.committed.to.is_some_and(|to| date > to),
                Side::To => self.committed.from.is_some_and(|from| date < from),
            }
    }

    /// Returns `true` if [`select_day()`](Self::select_day) would accept
    /// `date` for `side` (ignoring whether the calendar is open).
    ///
    /// This differs from [`is_disabled()`](Self::is_disabled) for start
    /// dates after the committed end date: those are accepted, and selecting
    /// one clears the pending end date so that it has to be picked again.
    pub fn is_selectable(&self, side: Side, date: Date) -> bool {
        match side {
            Side::From => self.bounds.contains(date),
            Side::To => !self.is_disabled(Side::To, date),
        }
    }

    /// Stage `date` as the pending value for `side`.  Returns `false` and
    /// changes nothing if the calendar for `side` is not open or the date is
    /// not selectable.
    pub fn select_day(&mut self, side: Side, date: Date) -> bool {
        if !self.is_open(side) {
            trace!("Ignoring {side} selection of {date}: picker is closed");
            return false;
        }
        if !self.is_selectable(side, date) {
            trace!("Ignoring disabled {side} selection of {date}");
            return false;
        }
        *self.pending.slot(side) = Some(date);
        if side == Side::From && self.committed.to.is_some_and(|to| date > to) {
            debug!("Start date {date} is after end date; clearing pending end date");
            self.pending.to = None;
        }
        debug!("Staged {side} date {date}");
        true
    }

    /// Returns `true` if `date` is the pending value of the open calendar
    pub fn is_selected(&self, date: Date) -> bool {
        self.open_side()
            .and_then(|side| self.pending.get(side))
            .is_some_and(|d| d == date)
    }

    /// Commit the pending value for `side` and close its calendar.  Returns
    /// the new committed range, or `None` (changing nothing) if the calendar
    /// for `side` is not open.
    ///
    /// Committing a start date after the committed end date also clears the
    /// committed end date.
    pub fn apply(&mut self, side: Side) -> Option<DateRange> {
        if !self.is_open(side) {
            trace!("Ignoring apply of closed {side} picker");
            return None;
        }
        let value = self.pending.get(side);
        *self.committed.slot(side) = value;
        if let (Some(from), Some(to)) = (self.committed.from, self.committed.to) {
            if from > to {
                self.committed.to = None;
            }
        }
        self.close();
        debug!("Applied {side} date: committed range is now {:?}", self.committed);
        Some(self.committed)
    }

    /// Discard and clear both the pending and committed values for `side`
    /// and close its calendar.  The reported range is always empty, whatever
    /// the other side still holds.
    pub fn cancel(&mut self, side: Side) -> DateRange {
        *self.pending.slot(side) = None;
        *self.committed.slot(side) = None;
        if self.is_open(side) {
            self.close();
        }
        debug!("Cancelled {side} selection");
        DateRange::EMPTY
    }

    /// Clear everything and close any open calendar
    pub fn reset(&mut self) -> DateRange {
        self.committed = DateRange::EMPTY;
        self.pending = DateRange::EMPTY;
        self.close();
        debug!("Reset selection");
        DateRange::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn jan_10_to_20() -> RangeSelection {
        let mut sel = RangeSelection::default();
        sel.restore(DateRange::new(
            Some(date!(2024 - 01 - 10)),
            Some(date!(2024 - 01 - 20)),
        ));
        sel
    }

    #[test]
    fn test_open_seeds_pending_and_closes_other() {
        let mut sel = jan_10_to_20();
        sel.open(Side::From);
        assert_eq!(sel.state(), PickerState::Picking(Side::From));
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 12)));
        sel.open(Side::To);
        assert_eq!(sel.state(), PickerState::Picking(Side::To));
        assert!(!sel.is_open(Side::From));
        assert_eq!(sel.pending().to, Some(date!(2024 - 01 - 20)));
        // The other side's pending value survives the switch
        assert_eq!(sel.pending().from, Some(date!(2024 - 01 - 12)));
    }

    #[test]
    fn test_open_without_committed_value() {
        let mut sel = RangeSelection::default();
        sel.open(Side::To);
        assert_eq!(sel.pending().to, None);
    }

    #[test]
    fn test_toggle() {
        let mut sel = jan_10_to_20();
        assert!(sel.toggle(Side::From));
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 11)));
        assert!(!sel.toggle(Side::From));
        assert_eq!(sel.state(), PickerState::Idle);
        assert_eq!(sel.committed().from, Some(date!(2024 - 01 - 10)));
        assert!(sel.toggle(Side::To));
        assert!(sel.toggle(Side::From));
        assert!(!sel.is_open(Side::To));
    }

    #[test]
    fn test_disabled_to_dates() {
        let sel = jan_10_to_20();
        let mut d = date!(2023 - 12 - 01);
        while d < date!(2024 - 01 - 10) {
            assert!(sel.is_disabled(Side::To, d), "{d} should be disabled");
            d = d.next_day().unwrap();
        }
        while d <= date!(2024 - 01 - 20) {
            assert!(!sel.is_disabled(Side::To, d), "{d} should be enabled");
            d = d.next_day().unwrap();
        }
    }

    #[test]
    fn test_disabled_from_dates() {
        let sel = jan_10_to_20();
        assert!(!sel.is_disabled(Side::From, date!(2024 - 01 - 01)));
        assert!(!sel.is_disabled(Side::From, date!(2024 - 01 - 20)));
        assert!(sel.is_disabled(Side::From, date!(2024 - 01 - 21)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let sel = RangeSelection::new(Bounds::new(
            Some(date!(2024 - 01 - 01)),
            Some(date!(2024 - 01 - 31)),
        ));
        assert!(sel.is_disabled(Side::From, date!(2023 - 12 - 31)));
        assert!(!sel.is_disabled(Side::From, date!(2024 - 01 - 01)));
        assert!(!sel.is_disabled(Side::From, date!(2024 - 01 - 15)));
        assert!(!sel.is_disabled(Side::To, date!(2024 - 01 - 31)));
        assert!(sel.is_disabled(Side::To, date!(2024 - 02 - 01)));
    }

    #[test]
    fn test_from_after_to_clears_pending_to() {
        let mut sel = jan_10_to_20();
        sel.open(Side::From);
        assert_eq!(sel.pending().to, Some(date!(2024 - 01 - 20)));
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 25)));
        assert_eq!(sel.pending().from, Some(date!(2024 - 01 - 25)));
        assert_eq!(sel.pending().to, None);
    }

    #[test]
    fn test_applying_late_from_clears_committed_to() {
        let mut sel = jan_10_to_20();
        sel.open(Side::From);
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 25)));
        assert_eq!(
            sel.apply(Side::From),
            Some(DateRange::new(Some(date!(2024 - 01 - 25)), None))
        );
    }

    #[test]
    fn test_to_before_from_is_refused() {
        let mut sel = jan_10_to_20();
        sel.open(Side::To);
        assert!(!sel.select_day(Side::To, date!(2024 - 01 - 05)));
        assert_eq!(sel.pending().to, Some(date!(2024 - 01 - 20)));
        assert!(sel.select_day(Side::To, date!(2024 - 01 - 10)));
        assert_eq!(sel.pending().to, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn test_out_of_bounds_from_is_refused() {
        let mut sel = RangeSelection::new(Bounds::new(Some(date!(2024 - 01 - 01)), None));
        sel.open(Side::From);
        assert!(!sel.select_day(Side::From, date!(2023 - 12 - 31)));
        assert_eq!(sel.pending().from, None);
    }

    #[test]
    fn test_select_requires_open_picker() {
        let mut sel = RangeSelection::default();
        assert!(!sel.select_day(Side::From, date!(2024 - 01 - 01)));
        sel.open(Side::To);
        assert!(!sel.select_day(Side::From, date!(2024 - 01 - 01)));
        assert_eq!(sel.pending(), DateRange::EMPTY);
    }

    #[test]
    fn test_apply_commits_and_closes() {
        let mut sel = RangeSelection::default();
        sel.open(Side::From);
        assert!(sel.select_day(Side::From, date!(2024 - 03 - 01)));
        assert_eq!(sel.committed(), DateRange::EMPTY);
        assert_eq!(
            sel.apply(Side::From),
            Some(DateRange::new(Some(date!(2024 - 03 - 01)), None))
        );
        assert_eq!(sel.state(), PickerState::Idle);
        sel.open(Side::To);
        assert!(sel.select_day(Side::To, date!(2024 - 03 - 09)));
        assert_eq!(
            sel.apply(Side::To),
            Some(DateRange::new(
                Some(date!(2024 - 03 - 01)),
                Some(date!(2024 - 03 - 09))
            ))
        );
    }

    #[test]
    fn test_apply_closed_picker_does_nothing() {
        let mut sel = jan_10_to_20();
        assert_eq!(sel.apply(Side::To), None);
        sel.open(Side::From);
        assert_eq!(sel.apply(Side::To), None);
        assert!(sel.is_open(Side::From));
    }

    #[test]
    fn test_cancel_clears_side() {
        let mut sel = jan_10_to_20();
        sel.open(Side::From);
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 12)));
        assert_eq!(sel.cancel(Side::From), DateRange::EMPTY);
        assert_eq!(sel.state(), PickerState::Idle);
        assert_eq!(
            sel.committed(),
            DateRange::new(None, Some(date!(2024 - 01 - 20)))
        );
        assert_eq!(sel.pending().from, None);
    }

    #[test]
    fn test_cancel_leaves_other_picker_open() {
        let mut sel = jan_10_to_20();
        sel.open(Side::To);
        assert_eq!(sel.cancel(Side::From), DateRange::EMPTY);
        assert!(sel.is_open(Side::To));
    }

    #[test]
    fn test_reset() {
        let mut sel = jan_10_to_20();
        sel.open(Side::To);
        assert!(sel.select_day(Side::To, date!(2024 - 01 - 15)));
        assert_eq!(sel.reset(), DateRange::EMPTY);
        assert_eq!(sel.committed(), DateRange::EMPTY);
        assert_eq!(sel.pending(), DateRange::EMPTY);
        assert_eq!(sel.state(), PickerState::Idle);
        assert_eq!(sel.reset(), DateRange::EMPTY);
    }

    #[test]
    fn test_dismiss_keeps_values() {
        let mut sel = jan_10_to_20();
        sel.open(Side::From);
        assert!(sel.select_day(Side::From, date!(2024 - 01 - 11)));
        sel.dismiss();
        assert_eq!(sel.state(), PickerState::Idle);
        assert_eq!(sel.pending().from, Some(date!(2024 - 01 - 11)));
        assert_eq!(sel.committed().from, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn test_is_selected() {
        let mut sel = jan_10_to_20();
        assert!(!sel.is_selected(date!(2024 - 01 - 10)));
        sel.open(Side::From);
        assert!(sel.is_selected(date!(2024 - 01 - 10)));
        assert!(!sel.is_selected(date!(2024 - 01 - 20)));
        sel.open(Side::To);
        assert!(sel.is_selected(date!(2024 - 01 - 20)));
    }

    #[test]
    fn test_restore_drops_misordered_end() {
        let mut sel = RangeSelection::default();
        sel.restore(DateRange::new(
            Some(date!(2024 - 02 - 01)),
            Some(date!(2024 - 01 - 01)),
        ));
        assert_eq!(
            sel.committed(),
            DateRange::new(Some(date!(2024 - 02 - 01)), None)
        );
    }

    #[test]
    fn test_range_contains() {
        let range = jan_10_to_20().committed();
        assert!(range.contains(date!(2024 - 01 - 10)));
        assert!(range.contains(date!(2024 - 01 - 20)));
        assert!(!range.contains(date!(2024 - 01 - 21)));
        assert!(!DateRange::EMPTY.contains(date!(2024 - 01 - 15)));
    }
}
