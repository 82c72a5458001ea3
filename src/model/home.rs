/// Background content shown under the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The drawer settled open (`true`) or closed (`false`)
    DrawerChanged(bool),
    /// A click reached the content (the overlay did not take it)
    ContentClicked { column: u16, row: u16 },
    StatusChanged(String),
    StatusCleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Home {
    last_change: Option<bool>,
    transitions: u32,
    last_click: Option<(u16, u16)>,
    clicks: u32,
    status: Option<String>,
}

impl Home {
    pub fn last_change(&self) -> Option<bool> {
        self.last_change
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn last_click(&self) -> Option<(u16, u16)> {
        self.last_click
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::DrawerChanged(is_open) => {
                self.last_change = Some(is_open);
                self.transitions += 1;
            }
            Message::ContentClicked { column, row } => {
                self.last_click = Some((column, row));
                self.clicks += 1;
            }
            Message::StatusChanged(status) => {
                self.status = Some(status.replace('\n', " "));
            }
            Message::StatusCleared => {
                self.status = None;
            }
        }
    }
}
