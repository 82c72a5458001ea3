use std::sync::Arc;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use tokio::sync::{mpsc, Mutex};

use crate::{
    action::Action,
    infrastructure::{
        config::Config,
        tui::{Event, Frame, TuiLike},
    },
    integration::coalescer::Coalescer,
    model::{
        drawer::{Drawer, EventStatus},
        home::{self, Home},
    },
    presentation::widgets::{drawer::visible_panel, DrawerWidget, HomeWidget, MenuWidget},
};

type Clock = Box<dyn FnMut() -> Instant + Send>;

/// Host loop: feeds terminal events to the drawer and the content behind
/// it, and draws both.
pub struct AppRunner {
    config: Config,
    tui: Arc<Mutex<dyn TuiLike + Send>>,
    drawer: Drawer,
    home: Home,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    pending_keys: Vec<KeyEvent>,
    should_quit: bool,
    clock: Clock,
    area: Rect,
}

impl AppRunner {
    pub async fn new(config: Config, tui: Arc<Mutex<dyn TuiLike + Send>>) -> Result<Self> {
        let area = tui.lock().await.size()?;
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let tx = action_tx.clone();
        let props = config.drawer.props()?.on_change(move |is_open| {
            if tx.send(Action::DrawerChanged(is_open)).is_err() {
                log::warn!("drawer change dropped, runner is gone");
            }
        });
        let drawer = Drawer::new(props, f64::from(area.width));

        Ok(Self {
            config,
            tui,
            drawer,
            home: Home::default(),
            action_tx,
            action_rx,
            pending_keys: Vec::new(),
            should_quit: false,
            clock: Box::new(Instant::now),
            area,
        })
    }

    /// Replace the time source animations are sampled with.
    pub fn with_clock(mut self, clock: impl FnMut() -> Instant + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run until quit is requested or the event source is exhausted.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;

        loop {
            let event = {
                let mut tui = self.tui.lock().await;
                tui.next().await
            };
            let Some(event) = event else {
                break;
            };
            self.handle_event(event);
            self.process_actions().await?;
            if self.should_quit {
                break;
            }
        }

        self.tui.lock().await.exit()?;
        Ok(())
    }

    fn send(&self, action: Action) {
        if self.action_tx.send(action).is_err() {
            log::error!("action channel closed");
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit | Event::Closed => self.send(Action::Quit),
            Event::Tick => self.send(Action::Tick),
            Event::Render => self.send(Action::Render),
            Event::Resize(w, h) => self.send(Action::Resize(w, h)),
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Error => self.send(Action::Error(String::from("terminal event error"))),
            Event::Init | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.config.keybindings.action_for(&[key]).cloned() {
            self.pending_keys.clear();
            self.send(action);
            return;
        }
        self.pending_keys.push(key);
        if let Some(action) = self
            .config
            .keybindings
            .action_for(&self.pending_keys)
            .cloned()
        {
            self.pending_keys.clear();
            self.send(action);
            return;
        }
        if !self.config.keybindings.is_prefix(&self.pending_keys) {
            // dead sequence; the key may still start a new one
            self.pending_keys.clear();
            if self.config.keybindings.is_prefix(&[key]) {
                self.pending_keys.push(key);
            }
        }
    }

    pub fn pending_keys(&self) -> &[KeyEvent] {
        &self.pending_keys
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        if visible_panel(&self.drawer, self.area).is_some_and(|panel| panel.contains(position)) {
            return;
        }
        // a raised overlay sits above the content and takes the click
        if self.drawer.stack_order() > 0 {
            let now = (self.clock)();
            if self.drawer.overlay_tapped(now) == EventStatus::Ignored {
                log::debug!("overlay click ignored while the drawer is closed");
            }
            return;
        }
        self.home.update(home::Message::ContentClicked {
            column: mouse.column,
            row: mouse.row,
        });
        self.send(Action::Render);
    }

    async fn process_actions(&mut self) -> Result<()> {
        let mut frame = Coalescer::default();
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                log::debug!("{action:?}");
            }
            if frame.absorb(&action) {
                continue;
            }
            match action {
                Action::Tick => {
                    let was_animating = self.drawer.is_animating();
                    let now = (self.clock)();
                    self.drawer.tick(now);
                    if was_animating {
                        frame.request_render();
                    }
                }
                Action::Quit => self.should_quit = true,
                Action::Error(message) => {
                    log::error!("{message}");
                    self.home
                        .update(home::Message::StatusChanged(format!("[Error] {message}")));
                }
                Action::ToggleDrawer => {
                    let target = !self.drawer.is_open_prop();
                    self.set_drawer_open(target);
                }
                Action::OpenDrawer => self.set_drawer_open(true),
                Action::CloseDrawer => self.set_drawer_open(false),
                Action::DrawerChanged(is_open) => {
                    self.drawer.sync_is_open(is_open);
                    self.home.update(home::Message::DrawerChanged(is_open));
                    frame.request_render();
                }
                Action::Render | Action::Resize(..) => {}
            }
        }

        if let Some((w, h)) = frame.resize() {
            self.area = Rect::new(0, 0, w, h);
            self.tui.lock().await.resize(self.area)?;
            self.drawer.viewport_resized(f64::from(w));
        }
        if frame.should_render() {
            self.render().await?;
        }
        Ok(())
    }

    fn set_drawer_open(&mut self, is_open: bool) {
        let now = (self.clock)();
        self.drawer.receive_is_open(is_open, now);
    }

    async fn render(&mut self) -> Result<()> {
        let styles = &self.config.styles;
        let overlay_color = styles.style("overlay").bg.unwrap_or(Color::Black);
        let home = HomeWidget::new(&self.home)
            .style(styles.style("content"))
            .title_style(styles.style("title"));
        let drawer = DrawerWidget::new(&self.drawer)
            .child(
                MenuWidget::default()
                    .style(styles.style("panel"))
                    .title_style(styles.style("panel_title")),
            )
            .overlay_color(overlay_color);

        let mut widgets = Some((home, drawer));
        let mut tui = self.tui.lock().await;
        tui.draw(&mut |f: &mut Frame<'_>| {
            if let Some((home, drawer)) = widgets.take() {
                let area = f.area();
                f.render_widget(home, area);
                f.render_widget(drawer, area);
            }
        })
    }
}
