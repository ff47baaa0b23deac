use std::iter::successors;
use std::ops::RangeInclusive;
use std::slice::ChunksExact;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// Number of days shown by a [`MonthGrid`]: five full weeks
pub const GRID_CELLS: usize = 35;

pub const DAYS_IN_WEEK: usize = 7;

/// How many years before the current one are offered by [`year_choices()`]
const YEARS_BEFORE: i32 = 5;

/// How many years after the current one are offered by [`year_choices()`]
const YEARS_AFTER: i32 = 4;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// A single cell of a [`MonthGrid`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarDay {
    pub date: Date,
    pub day_number: u8,
    /// `false` for the padding days borrowed from the previous and next months
    pub current_month: bool,
}

/// Which month a calendar is currently showing
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ViewCursor {
    year: i32,
    month: Month,
}

impl ViewCursor {
    /// Returns the cursor for the month containing `date`
    pub fn containing(date: Date) -> ViewCursor {
        ViewCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn first_day(&self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, 1).ok()
    }

    pub fn grid(&self) -> Result<MonthGrid, OutOfTimeError> {
        MonthGrid::new(self.year, self.month)
    }

    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let year = if self.month == Month::December {
            self.year.checked_add(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        self.move_to(year, self.month.next())
    }

    pub fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let year = if self.month == Month::January {
            self.year.checked_sub(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        self.move_to(year, self.month.previous())
    }

    pub fn set_month(&mut self, month: Month) -> Result<(), OutOfTimeError> {
        self.move_to(self.year, month)
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), OutOfTimeError> {
        self.move_to(year, self.month)
    }

    // The cursor is only moved if the target month can actually be laid out
    fn move_to(&mut self, year: i32, month: Month) -> Result<(), OutOfTimeError> {
        let _ = MonthGrid::new(year, month)?;
        self.year = year;
        self.month = month;
        Ok(())
    }
}

/// A fixed five-week, Sunday-first layout of a month.
///
/// Leading cells are filled with the trailing days of the previous month and
/// trailing cells with the first days of the next month.  A month that would
/// need a sixth row (e.g., a 31-day month starting on a Friday) is cut off
/// after the 35th cell; its last days are not part of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    cursor: ViewCursor,
    days: [CalendarDay; GRID_CELLS],
}

impl MonthGrid {
    pub fn new(year: i32, month: Month) -> Result<MonthGrid, OutOfTimeError> {
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        let leading_qty = first.weekday().index0();
        let mut dates = iter_days_before(first)
            .take(leading_qty)
            .collect::<Vec<_>>();
        if dates.len() < leading_qty {
            return Err(OutOfTimeError);
        }
        dates.reverse();
        dates.extend(iter_days_from(first).take(GRID_CELLS - leading_qty));
        let days = dates
            .into_iter()
            .map(|date| CalendarDay {
                date,
                day_number: date.day(),
                current_month: date.month() == month,
            })
            .collect::<Vec<_>>();
        let days = <[CalendarDay; GRID_CELLS]>::try_from(days).map_err(|_| OutOfTimeError)?;
        Ok(MonthGrid {
            cursor: ViewCursor { year, month },
            days,
        })
    }

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarDay> {
        self.days.iter()
    }

    /// Iterate over the grid one seven-day row at a time
    pub fn weeks(&self) -> ChunksExact<'_, CalendarDay> {
        self.days.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn first_date(&self) -> Date {
        self.days[0].date
    }

    pub fn last_date(&self) -> Date {
        self.days[GRID_CELLS - 1].date
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.first_date()..=self.last_date()).contains(&date)
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarDay;
    type IntoIter = std::slice::Iter<'a, CalendarDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The years a host should offer in a year dropdown, centered on `today`'s
/// year
pub fn year_choices(today: Date) -> RangeInclusive<i32> {
    let year = today.year();
    year.saturating_sub(YEARS_BEFORE)..=year.saturating_add(YEARS_AFTER)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
