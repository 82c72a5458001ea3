use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use color_eyre::eyre::Result;
use futures::future;
use ratatui::backend::TestBackend;
use ratatui::prelude::*;

use crate::infrastructure::tui::{Event, Frame, TuiLike};

/// In-memory terminal for tests
///
/// Events come from a queue and `next()` returns `None` once it is empty,
/// which ends the host loop. Draws land in a [`TestBackend`] buffer.
pub struct TestTui {
    term: Terminal<TestBackend>,
    events: VecDeque<Event>,
    draws: usize,
    entered: bool,
}

impl TestTui {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let backend = TestBackend::new(width, height);
        let term = Terminal::new(backend)?;
        Ok(Self {
            term,
            events: VecDeque::new(),
            draws: 0,
            entered: false,
        })
    }

    pub fn with_events(
        width: u16,
        height: u16,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<Self> {
        let mut this = Self::new(width, height)?;
        this.events.extend(events);
        Ok(this)
    }

    pub fn draw_count(&self) -> usize {
        self.draws
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn enqueue_event(&mut self, ev: Event) {
        self.events.push_back(ev);
    }

    /// Last drawn frame
    pub fn buffer(&self) -> &Buffer {
        self.term.backend().buffer()
    }
}

impl TuiLike for TestTui {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()> {
        self.term.draw(|frame| f(frame))?;
        self.draws += 1;
        Ok(())
    }

    fn resize(&mut self, area: Rect) -> Result<()> {
        self.term.backend_mut().resize(area.width, area.height);
        self.term.resize(area)?;
        Ok(())
    }

    fn size(&self) -> Result<Rect> {
        let size = self.term.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn next(&mut self) -> Pin<Box<dyn Future<Output = Option<Event>> + Send + '_>> {
        let ev = self.events.pop_front();
        Box::pin(future::ready(ev))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::widgets::Paragraph;

    use super::*;

    #[tokio::test]
    async fn test_events_drain_then_none() -> Result<()> {
        let mut tui = TestTui::with_events(10, 2, [Event::Init, Event::Tick])?;
        tui.enqueue_event(Event::Quit);

        assert!(matches!(tui.next().await, Some(Event::Init)));
        assert!(matches!(tui.next().await, Some(Event::Tick)));
        assert!(matches!(tui.next().await, Some(Event::Quit)));
        assert!(tui.next().await.is_none());
        Ok(())
    }

    #[test]
    fn test_draw_and_resize() -> Result<()> {
        let mut tui = TestTui::new(10, 2)?;
        tui.enter()?;
        assert!(tui.is_entered());

        tui.draw(&mut |f: &mut Frame<'_>| f.render_widget(Paragraph::new("hi"), f.area()))?;
        assert_eq!(tui.draw_count(), 1);
        assert_eq!(tui.buffer()[(0, 0)].symbol(), "h");

        tui.resize(Rect::new(0, 0, 20, 4))?;
        assert_eq!(tui.size()?, Rect::new(0, 0, 20, 4));

        tui.exit()?;
        assert!(!tui.is_entered());
        Ok(())
    }
}
