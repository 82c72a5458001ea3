use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::model::drawer::Drawer;
use crate::model::position::Placement;

use super::overlay::OverlayWidget;

/// Where the full-width panel sits in `area` at the drawer's current
/// offset, before clipping. `None` when the panel has no width.
pub fn panel_rect(drawer: &Drawer, area: Rect) -> Option<(i32, i32, u16, u16)> {
    let width = drawer.drawer_width().round().clamp(0.0, f64::from(u16::MAX)) as u16;
    if width == 0 || area.height == 0 {
        return None;
    }
    let anchor_x = match drawer.placement() {
        Placement::Right => i32::from(area.right()) - i32::from(width),
        Placement::Left | Placement::Unanchored => i32::from(area.x),
    };
    let offset = drawer.offset();
    let x = anchor_x + offset.x.round() as i32;
    let y = i32::from(area.y) + offset.y.round() as i32;
    Some((x, y, width, area.height))
}

/// Visible part of the panel inside `area`
pub fn visible_panel(drawer: &Drawer, area: Rect) -> Option<Rect> {
    let (x, y, width, height) = panel_rect(drawer, area)?;
    let left = x.max(i32::from(area.left()));
    let top = y.max(i32::from(area.top()));
    let right = (x + i32::from(width)).min(i32::from(area.right()));
    let bottom = (y + i32::from(height)).min(i32::from(area.bottom()));
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Renders a [`Drawer`]: the dimming overlay (while raised) and the panel
/// with its child content, translated by the live offset.
pub struct DrawerWidget<'a, W> {
    drawer: &'a Drawer,
    child: Option<W>,
    overlay_color: Color,
}

impl<'a> DrawerWidget<'a, Block<'a>> {
    pub fn new(drawer: &'a Drawer) -> Self {
        Self {
            drawer,
            child: None,
            overlay_color: Color::Black,
        }
    }
}

impl<'a, W> DrawerWidget<'a, W> {
    pub fn child<C: Widget>(self, child: C) -> DrawerWidget<'a, C> {
        DrawerWidget {
            drawer: self.drawer,
            child: Some(child),
            overlay_color: self.overlay_color,
        }
    }

    pub fn overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = color;
        self
    }
}

impl<W: Widget> Widget for DrawerWidget<'_, W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.drawer.stack_order() > 0 {
            OverlayWidget::new(self.drawer.overlay_opacity())
                .color(self.overlay_color)
                .render(area, buf);
        }

        let Some(visible) = visible_panel(self.drawer, area) else {
            return;
        };
        let Some((x, y, width, height)) = panel_rect(self.drawer, area) else {
            return;
        };

        // Draw the whole panel off to the side, then copy the part that is
        // on screen. Widgets cannot render into a partly negative Rect.
        let local = Rect::new(0, 0, width, height);
        let mut panel = Buffer::empty(local);
        Block::default()
            .style(Style::default().bg(self.drawer.background_color()))
            .render(local, &mut panel);
        if let Some(child) = self.child {
            child.render(local, &mut panel);
        }

        for row in visible.top()..visible.bottom() {
            for col in visible.left()..visible.right() {
                let src = ((i32::from(col) - x) as u16, (i32::from(row) - y) as u16);
                if let (Some(from), Some(to)) = (panel.cell(src), buf.cell_mut((col, row))) {
                    *to = from.clone();
                }
            }
        }
    }
}
