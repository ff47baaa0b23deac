use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod field {
    use super::*;

    pub(crate) const VALUE_STYLE: Style = BASE_STYLE;

    pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const OPEN_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);
}

pub(crate) mod calendar {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const OTHER_MONTH_STYLE: Style = BASE_STYLE.fg(Color::Gray);

    pub(crate) const DISABLED_STYLE: Style = BASE_STYLE
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT);

    pub(crate) const IN_RANGE_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

    pub(crate) const SELECTED_STYLE: Style = BASE_STYLE
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const TODAY_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

    pub(crate) const HIGHLIGHT_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

    pub(crate) const BUTTON_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}
