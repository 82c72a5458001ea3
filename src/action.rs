use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    ToggleDrawer,
    OpenDrawer,
    CloseDrawer,
    /// A drawer transition settled with the given open flag
    DrawerChanged(bool),
}
