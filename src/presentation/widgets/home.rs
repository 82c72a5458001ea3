use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Wrap},
};

use crate::model::home::Home;

/// Content the drawer slides over
pub struct HomeWidget<'a> {
    home: &'a Home,
    style: Style,
    title_style: Style,
}

impl<'a> HomeWidget<'a> {
    pub fn new(home: &'a Home) -> Self {
        Self {
            home,
            style: Style::default(),
            title_style: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    fn drawer_line(&self) -> String {
        match self.home.last_change() {
            Some(true) => format!("Drawer: open ({} transitions)", self.home.transitions()),
            Some(false) => format!("Drawer: closed ({} transitions)", self.home.transitions()),
            None => "Drawer: closed".to_owned(),
        }
    }

    fn click_line(&self) -> String {
        match self.home.last_click() {
            Some((column, row)) => {
                format!("Content clicks: {} (last at {column},{row})", self.home.clicks())
            }
            None => "Content clicks: 0".to_owned(),
        }
    }
}

impl Widget for HomeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(0), Constraint::Length(1)],
        )
        .split(area);

        let lines = vec![
            Line::from(""),
            Line::from("<space> toggle  <o> open  <c> close  <q> quit"),
            Line::from("Click the dimmed area to close the drawer."),
            Line::from(""),
            Line::from(self.drawer_line()),
            Line::from(self.click_line()),
        ];
        Paragraph::new(lines)
            .block(Block::bordered().title(Span::styled(env!("CARGO_PKG_NAME"), self.title_style)))
            .style(self.style)
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);

        let status = self.home.status().unwrap_or_default();
        Paragraph::new(Span::styled(status, Style::default().add_modifier(Modifier::DIM)))
            .render(layout[1], buf);
    }
}
