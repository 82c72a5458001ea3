use ratatui::{
    prelude::*,
    widgets::{Block, List, ListItem},
};

/// Static menu hosted inside the drawer panel
#[derive(Debug, Clone, PartialEq)]
pub struct MenuWidget {
    items: Vec<String>,
    style: Style,
    title_style: Style,
}

impl MenuWidget {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            style: Style::default(),
            title_style: Style::default(),
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
}

impl Default for MenuWidget {
    fn default() -> Self {
        Self::new(["Home", "Profile", "Settings", "About"])
    }
}

impl Widget for MenuWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self.items.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(Block::default().title(Span::styled(" Menu", self.title_style)))
            .style(self.style);
        Widget::render(list, area, buf);
    }
}
