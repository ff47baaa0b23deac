use crate::theme::{calendar::*, field, BASE_STYLE, LABEL_STYLE};
use rangepick::{
    CalendarDay, DateRangePicker, Language, MonthGrid, RangeListener, Side, TranslationKey,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};
use std::marker::PhantomData;
use time::Date;

/// Width of an input field, including its brackets
const FIELD_WIDTH: u16 = 26;

/// Columns between the two input fields
const FIELD_GAP: u16 = 4;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of a calendar, including its border
const CALENDAR_WIDTH: u16 = DAY_WIDTH * 7 + 2;

/// Height of a calendar, including its border: the weekday header, five
/// weeks, a blank line, and the buttons
const CALENDAR_HEIGHT: u16 = 1 + 5 + 1 + 1 + 2;

/// Number of characters of a weekday name shown in the calendar header
const WEEKDAY_ABBREV_LEN: usize = 3;

/// The Arabic definite article, which every Arabic weekday name starts with
const AR_ARTICLE: &str = "ال";

/// The date range form: the field for each end and, below the field being
/// edited, that end's calendar.
///
/// `highlight` is the day the keyboard cursor is on, if any.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct RangeForm<L> {
    highlight: Option<Date>,
    _data: PhantomData<L>,
}

impl<L> RangeForm<L> {
    pub(crate) fn new(highlight: Option<Date>) -> RangeForm<L> {
        RangeForm {
            highlight,
            _data: PhantomData,
        }
    }

    fn form_width(show_to_date: bool) -> u16 {
        if show_to_date {
            FIELD_WIDTH * 2 + FIELD_GAP
        } else {
            FIELD_WIDTH.max(CALENDAR_WIDTH)
        }
    }

    // Arabic puts the start date on the right
    fn field_column(side: Side, rtl: bool, show_to_date: bool) -> u16 {
        if !show_to_date {
            return 0;
        }
        match (side, rtl) {
            (Side::From, false) | (Side::To, true) => 0,
            (Side::To, false) | (Side::From, true) => FIELD_WIDTH + FIELD_GAP,
        }
    }

    fn calendar_column(side: Side, rtl: bool, show_to_date: bool) -> u16 {
        if Self::field_column(side, rtl, show_to_date) == 0 {
            0
        } else {
            Self::form_width(show_to_date) - CALENDAR_WIDTH
        }
    }
}

impl<L: RangeListener> StatefulWidget for RangeForm<L> {
    type State = DateRangePicker<L>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let show_to_date = state.show_to_date();
        let rtl = state.language().is_rtl();
        let [area] = Layout::horizontal([Self::form_width(show_to_date)])
            .flex(Flex::Center)
            .areas(area);
        let sides: &[Side] = if show_to_date {
            &[Side::From, Side::To]
        } else {
            &[Side::From]
        };
        let mut canvas = BufferCanvas::new(area, &mut *buf);
        let mut y = 0;
        if state.show_label() {
            for &side in sides {
                let x = Self::field_column(side, rtl, show_to_date);
                canvas.mvprint(y, x, state.field_label(side), Some(LABEL_STYLE));
            }
            y += 1;
        }
        for &side in sides {
            let x = Self::field_column(side, rtl, show_to_date);
            canvas.draw_field(y, x, state, side);
        }
        let Some(side) = state.open_side() else {
            return;
        };
        let Ok(grid) = state.calendar_days().cloned() else {
            return;
        };
        let top = y + 2;
        if top >= area.height {
            return;
        }
        let cal_area = Rect {
            x: area.x + Self::calendar_column(side, rtl, show_to_date),
            y: area.y + top,
            width: CALENDAR_WIDTH,
            height: CALENDAR_HEIGHT,
        }
        .intersection(area);
        MonthView {
            grid: &grid,
            picker: state,
            side,
            highlight: self.highlight,
        }
        .render(cal_area, buf);
    }
}

#[derive(Debug)]
struct MonthView<'a, L> {
    grid: &'a MonthGrid,
    picker: &'a DateRangePicker<L>,
    side: Side,
    highlight: Option<Date>,
}

impl<L: RangeListener> MonthView<'_, L> {
    fn day_style(&self, day: &CalendarDay) -> Style {
        let picker = self.picker;
        let mut style = if !picker.is_selectable(self.side, day.date) {
            DISABLED_STYLE
        } else if picker.is_selected(day.date) {
            SELECTED_STYLE
        } else if picker.pending().contains(day.date) {
            IN_RANGE_STYLE
        } else if !day.current_month {
            OTHER_MONTH_STYLE
        } else {
            BASE_STYLE
        };
        if day.date == picker.today() {
            style = style.patch(TODAY_STYLE);
        }
        if self.highlight == Some(day.date) {
            style = style.patch(HIGHLIGHT_STYLE);
        }
        style
    }
}

impl<L: RangeListener> Widget for MonthView<'_, L> {
    /*
     * ┌──────── January 2024 ──────┐
     * │Sun Mon Tue Wed Thu Fri Sat │
     * │ 31   1   2   3   4   5   6 │
     * │  7   8   9  10  11  12  13 │
     * │ 14  15  16  17  18  19  20 │
     * │ 21  22  23  24  25  26  27 │
     * │ 28  29  30  31   1   2   3 │
     * │                            │
     * │[Apply]              [Clear]│
     * └────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.picker;
        let cursor = self.grid.cursor();
        let title = format!(" {} {} ", state.month_label(cursor.month()), cursor.year());
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(title)
            .title_alignment(HorizontalAlignment::Center)
            .title_style(TITLE_STYLE)
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        let mut canvas = BufferCanvas::new(inner, buf);
        for (i, name) in (0u16..).zip(state.weekday_labels()) {
            let abbrev = abbreviate_weekday(name, state.language());
            canvas.mvprint(0, DAY_WIDTH * i, abbrev, Some(WEEKDAY_STYLE));
        }
        for (week_no, week) in (1u16..).zip(self.grid.weeks()) {
            for (i, day) in (0u16..).zip(week) {
                let style = self.day_style(day);
                canvas.mvprint(
                    week_no,
                    DAY_WIDTH * i,
                    format!("{:>3}", day.day_number),
                    Some(style),
                );
            }
        }
        let buttons_y = CALENDAR_HEIGHT - 3;
        let apply = format!("[{}]", state.label(TranslationKey::Apply));
        let clear = format!("[{}]", state.label(TranslationKey::Clear));
        canvas.mvprint(buttons_y, 0, apply, Some(BUTTON_STYLE));
        let clear_width = u16::try_from(Text::raw(clear.as_str()).width()).unwrap_or(u16::MAX);
        canvas.mvprint(
            buttons_y,
            inner.width.saturating_sub(clear_width),
            clear,
            Some(BUTTON_STYLE),
        );
    }
}

// Arabic names share their first letters ("الأحد", "الأربعاء"), so the
// article is dropped before cutting them down
fn abbreviate_weekday(name: &str, language: Language) -> String {
    let name = match language {
        Language::Ar => name.strip_prefix(AR_ARTICLE).unwrap_or(name),
        Language::En => name,
    };
    name.chars().take(WEEKDAY_ABBREV_LEN).collect()
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_field<L: RangeListener>(
        &mut self,
        y: u16,
        x: u16,
        picker: &DateRangePicker<L>,
        side: Side,
    ) {
        let value = picker.display_value(side);
        let (text, style) = if value.is_empty() {
            (picker.placeholder(side).to_owned(), field::PLACEHOLDER_STYLE)
        } else {
            (value, field::VALUE_STYLE)
        };
        let bracket_style = if picker.open_side() == Some(side) {
            field::OPEN_STYLE
        } else {
            BASE_STYLE
        };
        self.mvprint(y, x, "[", Some(bracket_style));
        self.mvprint(y, x + 2, text, Some(style));
        self.mvprint(y, x + FIELD_WIDTH - 1, "]", Some(bracket_style));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // canvas's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
