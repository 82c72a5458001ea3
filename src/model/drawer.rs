//! Drawer model
//!
//! Owns the animated panel offset, the animated overlay value and the
//! overlay stack order. The host feeds it open/close requests and clock
//! ticks; the drawer reports settled transitions through the callbacks in
//! [`DrawerProps`].

use std::fmt;
use std::time::Instant;

use ratatui::style::Color;

use super::animation::{AnimatedXY, Parallel};
use super::position::{closed_position, open_position, Placement, Position};
use super::spring::{AnimatedValue, SpringConfig};

/// Overlay value the open transition animates toward
pub const OVERLAY_OPEN_VALUE: f64 = 0.7;
/// Rendered overlay opacity at overlay value 1.0
pub const OVERLAY_MAX_OPACITY: f64 = 0.3;
/// Stack order of the overlay while open or transitioning
pub const OVERLAY_RAISED_STACK_ORDER: u16 = 3002;

pub type Callback = Box<dyn FnMut(bool) + Send>;

fn noop() -> Callback {
    Box::new(|_| {})
}

/// Construction-time and updatable configuration of a [`Drawer`]
pub struct DrawerProps {
    /// Open flag owned by the parent
    pub is_open: bool,
    pub placement: Placement,
    pub drawer_width: f64,
    pub drawer_background_color: Color,
    /// Re-derive the closed position when the viewport width changes
    pub recompute_on_resize: bool,
    /// Fired after every settled transition
    pub on_change: Callback,
    /// Fired with `true` after an open transition settles
    pub open_drawer: Callback,
    /// Fired with `false` after a close transition settles
    pub close_drawer: Callback,
}

impl Default for DrawerProps {
    fn default() -> Self {
        Self {
            is_open: false,
            placement: Placement::Left,
            drawer_width: 300.0,
            drawer_background_color: Color::White,
            recompute_on_resize: false,
            on_change: noop(),
            open_drawer: noop(),
            close_drawer: noop(),
        }
    }
}

impl fmt::Debug for DrawerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerProps")
            .field("is_open", &self.is_open)
            .field("placement", &self.placement)
            .field("drawer_width", &self.drawer_width)
            .field("drawer_background_color", &self.drawer_background_color)
            .field("recompute_on_resize", &self.recompute_on_resize)
            .finish_non_exhaustive()
    }
}

impl DrawerProps {
    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn drawer_width(mut self, drawer_width: f64) -> Self {
        self.drawer_width = drawer_width;
        self
    }

    pub fn drawer_background_color(mut self, color: Color) -> Self {
        self.drawer_background_color = color;
        self
    }

    pub fn recompute_on_resize(mut self, enabled: bool) -> Self {
        self.recompute_on_resize = enabled;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_change = Box::new(f);
        self
    }

    pub fn open_drawer(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.open_drawer = Box::new(f);
        self
    }

    pub fn close_drawer(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.close_drawer = Box::new(f);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Opening,
    Closing,
}

/// Observable phase of the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Whether an input event was used up by the drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Consumed,
    Ignored,
}

#[derive(Debug)]
struct Transition {
    direction: Direction,
    group: Parallel,
}

pub enum Message {
    OpenRequested { now: Option<Instant> },
    CloseRequested { now: Option<Instant> },
    /// The parent changed its open flag
    OpenChanged { is_open: bool, now: Option<Instant> },
    Tick { now: Option<Instant> },
    ViewportResized { width: u16 },
}

/// Map an overlay value onto rendered opacity, clamped to the output range.
pub fn overlay_opacity(value: f64) -> f64 {
    (value * OVERLAY_MAX_OPACITY).clamp(0.0, OVERLAY_MAX_OPACITY)
}

#[derive(Debug)]
pub struct Drawer {
    props: DrawerProps,
    device_width: f64,
    spring: SpringConfig,
    offset: AnimatedXY,
    overlay: AnimatedValue,
    stack_order: u16,
    transition: Option<Transition>,
    next_generation: u64,
}

impl Drawer {
    /// Build a closed drawer. `device_width` is the viewport width now;
    /// it is only re-read when `recompute_on_resize` is set.
    pub fn new(props: DrawerProps, device_width: f64) -> Self {
        let closed = closed_position(props.placement, props.drawer_width, device_width);
        Self {
            props,
            device_width,
            spring: SpringConfig::default().clamped(),
            offset: AnimatedXY::new(closed),
            overlay: AnimatedValue::new(0.0),
            stack_order: 0,
            transition: None,
            next_generation: 0,
        }
    }

    pub fn props(&self) -> &DrawerProps {
        &self.props
    }

    pub fn placement(&self) -> Placement {
        self.props.placement
    }

    pub fn drawer_width(&self) -> f64 {
        self.props.drawer_width
    }

    pub fn background_color(&self) -> Color {
        self.props.drawer_background_color
    }

    pub fn is_open_prop(&self) -> bool {
        self.props.is_open
    }

    pub fn device_width(&self) -> f64 {
        self.device_width
    }

    pub fn offset(&self) -> Position {
        self.offset.position()
    }

    pub fn overlay_value(&self) -> f64 {
        self.overlay.value()
    }

    pub fn overlay_opacity(&self) -> f64 {
        overlay_opacity(self.overlay.value())
    }

    pub fn stack_order(&self) -> u16 {
        self.stack_order
    }

    pub fn closed_position(&self) -> Position {
        closed_position(self.props.placement, self.props.drawer_width, self.device_width)
    }

    pub fn phase(&self) -> Phase {
        match &self.transition {
            Some(t) if t.direction == Direction::Opening => Phase::Opening,
            Some(_) => Phase::Closing,
            None if self.stack_order > 0 => Phase::Open,
            None => Phase::Closed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Overlay input is gated on the parent's flag, not on the animation.
    pub fn accepts_overlay_input(&self) -> bool {
        self.props.is_open
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::OpenRequested { now } => self.open(now.unwrap_or_else(Instant::now)),
            Message::CloseRequested { now } => self.close(now.unwrap_or_else(Instant::now)),
            Message::OpenChanged { is_open, now } => {
                self.receive_is_open(is_open, now.unwrap_or_else(Instant::now))
            }
            Message::Tick { now } => self.tick(now.unwrap_or_else(Instant::now)),
            Message::ViewportResized { width } => self.viewport_resized(f64::from(width)),
        }
    }

    pub fn open(&mut self, now: Instant) {
        self.stack_order = OVERLAY_RAISED_STACK_ORDER;
        self.start(Direction::Opening, open_position(), OVERLAY_OPEN_VALUE, now);
    }

    pub fn close(&mut self, now: Instant) {
        let target = self.closed_position();
        self.start(Direction::Closing, target, 0.0, now);
    }

    pub fn set_open(&mut self, target: bool, now: Instant) {
        if target {
            self.open(now);
        } else {
            self.close(now);
        }
    }

    /// Store the parent's flag and animate when it actually changed.
    pub fn receive_is_open(&mut self, is_open: bool, now: Instant) {
        let changed = is_open != self.props.is_open;
        self.props.is_open = is_open;
        if changed {
            self.set_open(is_open, now);
        }
    }

    /// Record the parent's flag without animating. For a parent that
    /// mirrors `on_change` back into its own state after the drawer closed
    /// itself from an overlay tap.
    pub fn sync_is_open(&mut self, is_open: bool) {
        self.props.is_open = is_open;
    }

    /// A tap landed on the overlay.
    pub fn overlay_tapped(&mut self, now: Instant) -> EventStatus {
        if !self.accepts_overlay_input() {
            return EventStatus::Ignored;
        }
        log::debug!("overlay tapped, closing drawer");
        self.close(now);
        EventStatus::Consumed
    }

    pub fn viewport_resized(&mut self, width: f64) {
        if !self.props.recompute_on_resize {
            return;
        }
        self.device_width = width;
        if self.phase() == Phase::Closed {
            self.offset.set_position(self.closed_position());
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let [x, y] = self.offset.advance(now);
        let overlay = self.overlay.advance(now);

        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        let mut completed = false;
        for (member, progress) in [x, y, overlay].into_iter().enumerate() {
            completed |= transition.group.report(member, progress);
        }
        if completed {
            let direction = transition.direction;
            self.transition = None;
            self.settle(direction);
        }
    }

    fn start(&mut self, direction: Direction, offset: Position, overlay: f64, now: Instant) {
        let generation = self.next_generation;
        self.next_generation += 1;
        if let Some(previous) = &self.transition {
            log::debug!(
                "transition {} superseded by {direction:?} ({generation})",
                previous.group.generation()
            );
        }

        self.offset.animate_to(offset, self.spring, now, generation);
        self.overlay.animate_to(overlay, self.spring, now, generation);
        self.transition = Some(Transition {
            direction,
            group: Parallel::new(generation, 3),
        });
    }

    fn settle(&mut self, direction: Direction) {
        log::debug!("drawer settled after {direction:?}");
        match direction {
            Direction::Opening => {
                (self.props.open_drawer)(true);
                (self.props.on_change)(true);
            }
            Direction::Closing => {
                (self.props.close_drawer)(false);
                (self.props.on_change)(false);
                self.stack_order = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    type Log = Arc<Mutex<Vec<(&'static str, bool)>>>;

    fn recorded_props(log: &Log) -> DrawerProps {
        let (a, b, c) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
        DrawerProps::default()
            .on_change(move |v| a.lock().unwrap().push(("on_change", v)))
            .open_drawer(move |v| b.lock().unwrap().push(("open_drawer", v)))
            .close_drawer(move |v| c.lock().unwrap().push(("close_drawer", v)))
    }

    fn entries(log: &Log) -> Vec<(&'static str, bool)> {
        log.lock().unwrap().clone()
    }

    fn settle(drawer: &mut Drawer, start: Instant) -> Instant {
        let end = start + Duration::from_secs(5);
        drawer.tick(end);
        end
    }

    #[test]
    fn test_new_drawer_is_closed_offscreen() {
        let drawer = Drawer::new(DrawerProps::default(), 80.0);
        assert_eq!(drawer.offset(), Position::new(-300.0, 0.0));
        assert_eq!(drawer.overlay_value(), 0.0);
        assert_eq!(drawer.stack_order(), 0);
        assert_eq!(drawer.phase(), Phase::Closed);
        assert!(!drawer.is_animating());
    }

    #[test]
    fn test_open_raises_stack_order_before_motion() {
        let start = Instant::now();
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.open(start);

        assert_eq!(drawer.stack_order(), OVERLAY_RAISED_STACK_ORDER);
        assert_eq!(drawer.phase(), Phase::Opening);
        assert_eq!(drawer.offset(), Position::new(-300.0, 0.0));
    }

    #[test]
    fn test_open_fires_callbacks_once_in_order() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.open(start);

        let mut now = start;
        for _ in 0..10 {
            now += Duration::from_millis(16);
            drawer.tick(now);
            assert!(drawer.stack_order() > 0);
        }
        assert!(entries(&log).is_empty());

        let end = settle(&mut drawer, now);
        assert_eq!(
            entries(&log),
            vec![("open_drawer", true), ("on_change", true)]
        );
        assert_eq!(drawer.offset(), Position::ORIGIN);
        assert_eq!(drawer.overlay_value(), OVERLAY_OPEN_VALUE);
        assert_eq!(drawer.phase(), Phase::Open);

        drawer.tick(end + Duration::from_secs(1));
        assert_eq!(entries(&log).len(), 2);
    }

    #[test]
    fn test_close_fires_callbacks_then_lowers_stack_order() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.open(start);
        let opened = settle(&mut drawer, start);
        log.lock().unwrap().clear();

        drawer.close(opened);
        assert_eq!(drawer.phase(), Phase::Closing);
        drawer.tick(opened + Duration::from_millis(16));
        assert_eq!(drawer.stack_order(), OVERLAY_RAISED_STACK_ORDER);

        settle(&mut drawer, opened);
        assert_eq!(
            entries(&log),
            vec![("close_drawer", false), ("on_change", false)]
        );
        assert_eq!(drawer.stack_order(), 0);
        assert_eq!(drawer.offset(), Position::new(-300.0, 0.0));
        assert_eq!(drawer.overlay_value(), 0.0);
        assert_eq!(drawer.phase(), Phase::Closed);
    }

    #[test]
    fn test_right_placement_scenario() {
        let props = DrawerProps::default()
            .placement(Placement::Right)
            .drawer_width(250.0);
        let mut drawer = Drawer::new(props, 400.0);
        assert_eq!(drawer.offset(), Position::new(400.0, 0.0));

        let start = Instant::now();
        drawer.open(start);
        settle(&mut drawer, start);
        assert_eq!(drawer.offset(), Position::ORIGIN);
        assert_eq!(drawer.overlay_value(), OVERLAY_OPEN_VALUE);
        assert!((drawer.overlay_opacity() - 0.21).abs() < 1e-9);
    }

    #[test]
    fn test_superseded_open_never_fires() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.open(start);
        let mid = start + Duration::from_millis(48);
        drawer.tick(mid);
        let in_flight = drawer.offset();
        assert!(in_flight.x > -300.0 && in_flight.x < 0.0);

        drawer.close(mid);
        assert_eq!(drawer.phase(), Phase::Closing);
        assert_eq!(drawer.stack_order(), OVERLAY_RAISED_STACK_ORDER);

        settle(&mut drawer, mid);
        assert_eq!(
            entries(&log),
            vec![("close_drawer", false), ("on_change", false)]
        );
        assert_eq!(drawer.stack_order(), 0);
    }

    #[test]
    fn test_reopen_while_closing_keeps_stack_raised() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.open(start);
        let opened = settle(&mut drawer, start);
        log.lock().unwrap().clear();

        drawer.close(opened);
        let mid = opened + Duration::from_millis(32);
        drawer.tick(mid);
        drawer.open(mid);
        settle(&mut drawer, mid);

        assert_eq!(
            entries(&log),
            vec![("open_drawer", true), ("on_change", true)]
        );
        assert_eq!(drawer.stack_order(), OVERLAY_RAISED_STACK_ORDER);
        assert_eq!(drawer.phase(), Phase::Open);
    }

    #[test]
    fn test_repeated_open_restarts_toward_same_target() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.open(start);
        drawer.tick(start + Duration::from_millis(16));
        drawer.open(start + Duration::from_millis(16));
        settle(&mut drawer, start);

        assert_eq!(
            entries(&log),
            vec![("open_drawer", true), ("on_change", true)]
        );
    }

    #[rstest]
    #[case(true, Phase::Opening)]
    #[case(false, Phase::Closing)]
    fn test_set_open_dispatches(#[case] target: bool, #[case] expected: Phase) {
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.set_open(target, Instant::now());
        assert_eq!(drawer.phase(), expected);
    }

    #[test]
    fn test_receive_is_open_only_animates_on_change() {
        let start = Instant::now();
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);

        drawer.receive_is_open(false, start);
        assert!(!drawer.is_animating());

        drawer.receive_is_open(true, start);
        assert!(drawer.is_open_prop());
        assert_eq!(drawer.phase(), Phase::Opening);
    }

    #[test]
    fn test_sync_is_open_does_not_animate() {
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.sync_is_open(true);
        assert!(drawer.is_open_prop());
        assert!(!drawer.is_animating());
        assert_eq!(drawer.phase(), Phase::Closed);
    }

    #[test]
    fn test_overlay_tap_gated_on_open_prop() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);

        drawer.open(start);
        assert_eq!(drawer.overlay_tapped(start), EventStatus::Ignored);
        assert_eq!(drawer.phase(), Phase::Opening);

        drawer.receive_is_open(true, start);
        let opened = settle(&mut drawer, start);
        log.lock().unwrap().clear();

        assert_eq!(drawer.overlay_tapped(opened), EventStatus::Consumed);
        assert_eq!(drawer.phase(), Phase::Closing);
        settle(&mut drawer, opened);
        assert_eq!(
            entries(&log),
            vec![("close_drawer", false), ("on_change", false)]
        );
    }

    #[test]
    fn test_second_tap_during_tap_close_restarts_close() {
        let log = Log::default();
        let start = Instant::now();
        let mut drawer = Drawer::new(recorded_props(&log), 80.0);
        drawer.receive_is_open(true, start);
        let opened = settle(&mut drawer, start);
        log.lock().unwrap().clear();

        assert_eq!(drawer.overlay_tapped(opened), EventStatus::Consumed);
        let mid = opened + Duration::from_millis(40);
        drawer.tick(mid);
        assert!(drawer.is_open_prop());
        assert_eq!(drawer.overlay_tapped(mid), EventStatus::Consumed);
        assert_eq!(drawer.phase(), Phase::Closing);

        settle(&mut drawer, mid);
        assert_eq!(
            entries(&log),
            vec![("close_drawer", false), ("on_change", false)]
        );

        // a parent-driven close clears the prop, so taps are ignored
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.receive_is_open(true, start);
        let opened = settle(&mut drawer, start);
        drawer.receive_is_open(false, opened);
        assert_eq!(drawer.overlay_tapped(opened), EventStatus::Ignored);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.25)]
    #[case(0.5)]
    #[case(1.0)]
    fn test_overlay_opacity_interpolation(#[case] progress: f64) {
        let expected = (progress * OVERLAY_OPEN_VALUE * OVERLAY_MAX_OPACITY).clamp(0.0, 0.3);
        assert!((overlay_opacity(progress * OVERLAY_OPEN_VALUE) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_overlay_opacity_clamps() {
        assert_eq!(overlay_opacity(-1.0), 0.0);
        assert_eq!(overlay_opacity(2.0), OVERLAY_MAX_OPACITY);
        assert_eq!(overlay_opacity(1.0), OVERLAY_MAX_OPACITY);
    }

    #[test]
    fn test_opacity_follows_overlay_value_while_animating() {
        let start = Instant::now();
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.open(start);
        for i in 1..20 {
            drawer.tick(start + Duration::from_millis(i * 16));
            let value = drawer.overlay_value();
            assert!((0.0..=OVERLAY_OPEN_VALUE).contains(&value));
            assert_eq!(drawer.overlay_opacity(), overlay_opacity(value));
        }
    }

    #[test]
    fn test_resize_ignored_by_default() {
        let props = DrawerProps::default().placement(Placement::Right);
        let mut drawer = Drawer::new(props, 80.0);
        drawer.update(Message::ViewportResized { width: 120 });
        assert_eq!(drawer.device_width(), 80.0);
        assert_eq!(drawer.offset(), Position::new(80.0, 0.0));
    }

    #[test]
    fn test_resize_recomputes_when_enabled() {
        let props = DrawerProps::default()
            .placement(Placement::Right)
            .recompute_on_resize(true);
        let mut drawer = Drawer::new(props, 80.0);
        drawer.update(Message::ViewportResized { width: 120 });
        assert_eq!(drawer.offset(), Position::new(120.0, 0.0));

        let start = Instant::now();
        drawer.open(start);
        let opened = settle(&mut drawer, start);
        drawer.update(Message::ViewportResized { width: 100 });
        assert_eq!(drawer.offset(), Position::ORIGIN);

        drawer.close(opened);
        settle(&mut drawer, opened);
        assert_eq!(drawer.offset(), Position::new(100.0, 0.0));
    }

    #[test]
    fn test_update_messages() {
        let start = Instant::now();
        let mut drawer = Drawer::new(DrawerProps::default(), 80.0);
        drawer.update(Message::OpenRequested { now: Some(start) });
        drawer.update(Message::Tick {
            now: Some(start + Duration::from_secs(5)),
        });
        assert_eq!(drawer.phase(), Phase::Open);

        drawer.update(Message::OpenChanged {
            is_open: true,
            now: Some(start),
        });
        assert!(drawer.is_open_prop());

        drawer.update(Message::CloseRequested { now: Some(start) });
        assert_eq!(drawer.phase(), Phase::Closing);
    }

    #[test]
    fn test_props_debug_skips_callbacks() {
        let debug = format!("{:?}", DrawerProps::default());
        assert!(debug.contains("drawer_width: 300.0"));
        assert!(debug.contains(".."));
    }
}
