use crate::action::Action;

/// Render and resize requests gathered over one pass of the host loop
///
/// Any number of render requests collapse into one draw, and only the
/// last resize is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coalescer {
    render: bool,
    resize: Option<(u16, u16)>,
}

impl Coalescer {
    /// Take `action` if it is a render or resize request.
    pub fn absorb(&mut self, action: &Action) -> bool {
        match action {
            Action::Render => {
                self.render = true;
                true
            }
            Action::Resize(w, h) => {
                self.resize = Some((*w, *h));
                self.render = true;
                true
            }
            _ => false,
        }
    }

    /// Ask for a draw without an explicit render action.
    pub fn request_render(&mut self) {
        self.render = true;
    }

    pub fn resize(&self) -> Option<(u16, u16)> {
        self.resize
    }

    pub fn should_render(&self) -> bool {
        self.render
    }
}
