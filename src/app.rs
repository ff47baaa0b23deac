use crate::form::RangeForm;
use crate::help::Help;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use log::info;
use rangepick::{DateRange, DateRangeChange, DateRangePicker, PickerEvent, Side, ViewCursor};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration};

pub(crate) type Picker = DateRangePicker<Vec<PickerEvent>>;

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: Picker,
    highlight: Option<Date>,
    last_change: Option<DateRangeChange>,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: Picker) -> App {
        App {
            picker,
            highlight: None,
            last_change: None,
            state: AppState::Picking,
        }
    }

    /// Run the event loop until the user quits, and return the committed
    /// range at that point
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<DateRange>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.picker.committed())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let valid = match self.state {
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
            AppState::Picking => match (self.picker.open_side(), key) {
                (_, KeyCode::Char('f')) => self.toggle(Side::From),
                (_, KeyCode::Char('t')) => self.toggle(Side::To),
                (_, KeyCode::Char('L')) => {
                    self.picker.switch_language(self.picker.language().other());
                    true
                }
                (_, KeyCode::Char('r')) => {
                    self.picker.reset();
                    self.highlight = None;
                    true
                }
                (_, KeyCode::Char('?')) => {
                    self.state = AppState::Helping;
                    true
                }
                (_, KeyCode::Char('q')) | (None, KeyCode::Esc) => {
                    self.state = AppState::Quitting;
                    true
                }
                (Some(_), KeyCode::Esc) => {
                    self.picker.dismiss();
                    true
                }
                (Some(_), KeyCode::Char('h') | KeyCode::Left) => self.move_highlight(-1),
                (Some(_), KeyCode::Char('l') | KeyCode::Right) => self.move_highlight(1),
                (Some(_), KeyCode::Char('k') | KeyCode::Up) => self.move_highlight(-7),
                (Some(_), KeyCode::Char('j') | KeyCode::Down) => self.move_highlight(7),
                (Some(_), KeyCode::Char('[')) => {
                    let ok = self.picker.previous_month().is_ok();
                    ok && self.rehighlight()
                }
                (Some(_), KeyCode::Char(']')) => {
                    let ok = self.picker.next_month().is_ok();
                    ok && self.rehighlight()
                }
                (Some(_), KeyCode::Char('{')) => {
                    let year = self.picker.cursor().year().saturating_sub(1);
                    let ok = self.picker.set_year(year).is_ok();
                    ok && self.rehighlight()
                }
                (Some(_), KeyCode::Char('}')) => {
                    let year = self.picker.cursor().year().saturating_add(1);
                    let ok = self.picker.set_year(year).is_ok();
                    ok && self.rehighlight()
                }
                (Some(side), KeyCode::Enter | KeyCode::Char(' ')) => self
                    .highlight
                    .is_some_and(|date| self.picker.select_day(side, date)),
                (Some(side), KeyCode::Char('a')) => self.picker.apply(side),
                (Some(side), KeyCode::Char('c')) => {
                    self.picker.cancel(side);
                    true
                }
                _ => false,
            },
        };
        self.collect_events();
        valid
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn toggle(&mut self, side: Side) -> bool {
        if self.picker.open_side() == Some(side) {
            self.picker.dismiss();
            return true;
        }
        if !self.picker.open(side) {
            return false;
        }
        let cursor = self.picker.cursor();
        self.highlight = self
            .picker
            .pending()
            .get(side)
            .filter(|&d| shows(cursor, d))
            .or_else(|| self.default_highlight());
        true
    }

    // Today if it is in view, otherwise the first of the month in view
    fn default_highlight(&self) -> Option<Date> {
        let cursor = self.picker.cursor();
        let today = self.picker.today();
        if ViewCursor::containing(today) == cursor && shows(cursor, today) {
            Some(today)
        } else {
            cursor.first_day()
        }
    }

    fn move_highlight(&mut self, days: i64) -> bool {
        let Some(date) = self
            .highlight
            .and_then(|d| d.checked_add(Duration::days(days)))
        else {
            return false;
        };
        let cursor = ViewCursor::containing(date);
        if !shows(cursor, date) {
            return false;
        }
        if cursor != self.picker.cursor() {
            self.picker.show_date(date);
        }
        self.highlight = Some(date);
        true
    }

    // After the month in view changes, keep the highlight on the same day of
    // the month where possible
    fn rehighlight(&mut self) -> bool {
        let cursor = self.picker.cursor();
        self.highlight = self
            .highlight
            .and_then(|d| Date::from_calendar_date(cursor.year(), cursor.month(), d.day()).ok())
            .filter(|&d| shows(cursor, d))
            .or_else(|| cursor.first_day());
        true
    }

    fn collect_events(&mut self) {
        for event in self.picker.listener_mut().drain(..) {
            match event {
                PickerEvent::DateRangeChange(change) => {
                    info!(
                        "Date range changed: from = {:?}, to = {:?}",
                        change.from_date, change.to_date
                    );
                    self.last_change = Some(change);
                }
                PickerEvent::LanguageChange(lang) => info!("Language changed to {lang}"),
            }
        }
    }

    fn status_line(&self) -> String {
        match &self.last_change {
            Some(DateRangeChange { from_date, to_date }) => format!(
                "Range: {} to {}    ? for help",
                from_date.as_deref().unwrap_or("(none)"),
                to_date.as_deref().unwrap_or("(none)"),
            ),
            None => String::from("? for help"),
        }
    }
}

// Days cut off the end of a month's five-week grid are never highlighted
fn shows(cursor: ViewCursor, date: Date) -> bool {
    cursor.grid().is_ok_and(|grid| grid.contains(date))
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [form_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let form: RangeForm<Vec<PickerEvent>> = RangeForm::new(self.highlight);
        form.render(form_area, buf, &mut self.picker);
        Line::styled(self.status_line(), STATUS_STYLE).render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
