use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;

use road_dodge::config::Settings;
use road_dodge::game::{FrameOutcome, FrameQueue, InputEvent, Key, Session, SessionState};
use road_dodge::render::DrawList;

pub struct App {
    pub should_quit: bool,
    pub session: Session<FrameQueue, StdRng>,
    /// Last frame the session drew; the UI rasterises it on every redraw.
    pub canvas: DrawList,
    origin: Instant,
    /// Whether the terminal reports key releases.
    release_events: bool,
    hold_timeout: Duration,
    // Synthetic release deadlines for steering, used without release events
    held_until: [Option<Instant>; 2],
}

impl App {
    pub fn new(settings: &Settings, rng: StdRng, release_events: bool) -> Self {
        let origin = Instant::now();
        let mut session = Session::new(settings, FrameQueue::new(), rng, 0.0);
        session.start();
        Self {
            should_quit: false,
            session,
            canvas: DrawList::new(),
            origin,
            release_events,
            hold_timeout: Duration::from_millis(settings.input.hold_timeout_ms),
            held_until: [None; 2],
        }
    }

    /// Milliseconds since launch; the session's monotonic clock.
    fn millis_at(&self, at: Instant) -> f64 {
        at.saturating_duration_since(self.origin).as_secs_f64() * 1000.0
    }

    pub fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, at: Instant) {
        self.release_expired_holds(at);

        let Some(token) = self.session.scheduler_mut().take_pending() else {
            return;
        };
        let now = self.millis_at(at);
        if self.session.on_frame(token, now, &mut self.canvas) == FrameOutcome::Crashed {
            log::info!("crashed after {} frames", self.canvas.frames());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.key_at(key, Instant::now());
    }

    fn key_at(&mut self, key: KeyEvent, at: Instant) {
        if key.kind == KeyEventKind::Press {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                self.should_quit = true;
                return;
            }
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                self.should_quit = true;
                return;
            }
        }

        let Some(game_key) = map_key(key.code) else {
            return;
        };
        let now = self.millis_at(at);

        // Some terminals deliver releases without announcing support for them.
        if !self.release_events && key.kind == KeyEventKind::Release {
            log::debug!("key release received, dropping the hold timeout");
            self.release_events = true;
            self.held_until = [None; 2];
        }

        if self.release_events {
            let event = match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::Pressed(game_key),
                KeyEventKind::Release => InputEvent::Released(game_key),
            };
            self.session.handle_input(event, now);
            return;
        }

        // No release events: triggers fire straight away, steering is held
        // until repeats stop arriving.
        match steering_slot(game_key) {
            Some(slot) => {
                self.held_until[slot] = Some(at + self.hold_timeout);
                self.session.handle_input(InputEvent::Pressed(game_key), now);
            }
            None => {
                self.session.handle_input(InputEvent::Pressed(game_key), now);
                self.session.handle_input(InputEvent::Released(game_key), now);
            }
        }
    }

    fn release_expired_holds(&mut self, at: Instant) {
        for (slot, key) in [Key::SteerLeft, Key::SteerRight].into_iter().enumerate() {
            if self.held_until[slot].is_some_and(|deadline| at >= deadline) {
                self.held_until[slot] = None;
                let now = self.millis_at(at);
                self.session.handle_input(InputEvent::Released(key), now);
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.session.state() == SessionState::Paused
    }

    pub fn is_over(&self) -> bool {
        self.session.state() == SessionState::Ended
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::SteerLeft),
        KeyCode::Right => Some(Key::SteerRight),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Resume),
        KeyCode::Enter => Some(Key::Restart),
        _ => None,
    }
}

fn steering_slot(key: Key) -> Option<usize> {
    match key {
        Key::SteerLeft => Some(0),
        Key::SteerRight => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn app(release_events: bool) -> App {
        App::new(&Settings::default(), StdRng::seed_from_u64(3), release_events)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn maps_only_game_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Key::SteerLeft));
        assert_eq!(map_key(KeyCode::Enter), Some(Key::Restart));
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Up), None);
    }

    #[test]
    fn quit_keys() {
        let mut app = app(true);
        app.on_key(key(KeyCode::Char('z'), KeyEventKind::Press));
        assert!(!app.should_quit);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn release_events_drive_pause() {
        let mut app = app(true);
        app.on_key(key(KeyCode::Char('p'), KeyEventKind::Press));
        assert!(!app.is_paused());
        app.on_key(key(KeyCode::Char('p'), KeyEventKind::Release));
        assert!(app.is_paused());
        app.on_key(key(KeyCode::Char('r'), KeyEventKind::Release));
        assert!(!app.is_paused());
    }

    #[test]
    fn without_release_events_a_press_triggers() {
        let mut app = app(false);
        app.on_key(key(KeyCode::Char('p'), KeyEventKind::Press));
        assert!(app.is_paused());
    }

    #[test]
    fn without_release_events_steering_times_out() {
        let mut app = app(false);
        let start = app.origin;
        app.key_at(key(KeyCode::Right, KeyEventKind::Press), start);
        assert!(app.session.input().right_held());

        app.release_expired_holds(start + Duration::from_millis(100));
        assert!(app.session.input().right_held());

        app.release_expired_holds(start + Duration::from_millis(250));
        assert!(!app.session.input().right_held());
    }

    #[test]
    fn unannounced_release_stops_steering_at_once() {
        let mut app = app(false);
        let start = app.origin;
        app.key_at(key(KeyCode::Right, KeyEventKind::Press), start);
        app.key_at(
            key(KeyCode::Right, KeyEventKind::Release),
            start + Duration::from_millis(50),
        );
        assert!(!app.session.input().right_held());

        app.release_expired_holds(start + Duration::from_millis(260));
        assert!(!app.session.input().right_held());

        // From now on releases are trusted: a press holds until its release.
        app.key_at(key(KeyCode::Left, KeyEventKind::Press), start + Duration::from_millis(300));
        app.release_expired_holds(start + Duration::from_millis(900));
        assert!(app.session.input().left_held());
    }

    #[test]
    fn ticks_deliver_frames() {
        let mut app = app(true);
        let start = app.origin;
        app.tick_at(start + Duration::from_millis(16));
        app.tick_at(start + Duration::from_millis(32));
        assert_eq!(app.canvas.frames(), 2);
        assert_eq!(app.canvas.score(), Some(0));
    }
}
