use rand::rngs::StdRng;
use rand::SeedableRng;

use road_dodge::config::Settings;
use road_dodge::game::{
    check_collision, Car, FrameOutcome, FrameQueue, InputEvent, Key, Obstacle, Session,
    SessionState,
};
use road_dodge::render::{DrawCommand, DrawList};

const FRAME_MS: f64 = 16.0;

/// Stands in for the display: advances a fake millisecond clock and
/// delivers whatever frame the session asked for.
struct Harness {
    session: Session<FrameQueue, StdRng>,
    draw: DrawList,
    now: f64,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        let mut session = Session::new(&settings, FrameQueue::new(), StdRng::seed_from_u64(42), 0.0);
        session.start();
        Self {
            session,
            draw: DrawList::new(),
            now: 0.0,
        }
    }

    /// Advances the clock one refresh and runs the pending frame, if any.
    fn step(&mut self) -> Option<FrameOutcome> {
        self.now += FRAME_MS;
        let token = self.session.scheduler_mut().take_pending()?;
        Some(self.session.on_frame(token, self.now, &mut self.draw))
    }

    fn wait(&mut self, ms: f64) {
        self.now += ms;
    }

    fn release(&mut self, key: Key) {
        self.session.handle_input(InputEvent::Released(key), self.now);
    }

    fn press(&mut self, key: Key) {
        self.session.handle_input(InputEvent::Pressed(key), self.now);
    }
}

/// Every bar is far wider than the road, so the car cannot steer around it.
fn wall_settings() -> Settings {
    let mut settings = Settings::default();
    settings.obstacles.min_width = 10_000.0;
    settings
}

#[test]
fn frame_draws_in_order() {
    let mut h = Harness::new(Settings::default());
    assert_eq!(h.step(), Some(FrameOutcome::Continue));

    let commands = h.draw.commands();
    assert!(matches!(commands[0], DrawCommand::RoadTile { index: 0, .. }));
    assert!(matches!(commands[1], DrawCommand::RoadTile { index: 1, .. }));
    assert!(matches!(commands[2], DrawCommand::RoadTile { index: 2, .. }));
    assert!(matches!(commands[3], DrawCommand::Obstacle { y, height, .. } if y == -30.0 && height == 30.0));
    assert_eq!(commands[4], DrawCommand::Score(0));
    assert!(matches!(commands[5], DrawCommand::Car { .. }));
    assert_eq!(commands.len(), 6);
}

#[test]
fn obstacles_follow_the_cooldown_and_cap() {
    let mut h = Harness::new(Settings::default());
    let mut spawned_at: Vec<f64> = Vec::new();
    // About 30 seconds of frames, or up to the first crash.
    for _ in 0..2000 {
        let outcome = h.step();
        assert!(h.session.obstacles().len() <= 10);
        if let Some(newest) = h.session.obstacles().iter().last() {
            if spawned_at.last() != Some(&newest.created_at) {
                spawned_at.push(newest.created_at);
            }
        }
        if outcome != Some(FrameOutcome::Continue) {
            break;
        }
    }

    assert!(spawned_at.len() > 1);
    for pair in spawned_at.windows(2) {
        assert!(pair[1] - pair[0] >= 1000.0, "{pair:?}");
        assert!(pair[1] - pair[0] < 1000.0 + FRAME_MS, "{pair:?}");
    }
    let live: Vec<f64> = h.session.obstacles().iter().map(|o| o.created_at).collect();
    assert_eq!(live, spawned_at[spawned_at.len() - live.len()..]);
}

#[test]
fn wall_crashes_on_a_known_frame() {
    let mut h = Harness::new(wall_settings());
    let mut frames = 0;
    let outcome = loop {
        frames += 1;
        match h.step() {
            Some(FrameOutcome::Continue) => continue,
            other => break other,
        }
    };
    // Spawned at y=-30 on frame 1, it crosses the car's top (590) once
    // y > 560, i.e. after 237 more steps of 2.5.
    assert_eq!(outcome, Some(FrameOutcome::Crashed));
    assert_eq!(frames, 238);
    assert_eq!(h.session.state(), SessionState::Ended);
    assert!(h.draw.shows_game_over());
    assert_eq!(h.draw.commands().last(), Some(&DrawCommand::GameOver));

    // No orphaned frame after the crash.
    assert_eq!(h.step(), None);
    assert_eq!(h.draw.frames(), 238);
}

#[test]
fn restart_after_crash_starts_fresh() {
    let mut h = Harness::new(wall_settings());
    h.press(Key::SteerRight);
    while h.step() == Some(FrameOutcome::Continue) {}
    assert_ne!(h.session.car().x, h.session.geometry().car_initial_x);

    // Enter only counts on release.
    h.wait(3000.0);
    h.press(Key::Restart);
    assert_eq!(h.session.state(), SessionState::Ended);
    h.release(Key::Restart);
    assert_eq!(h.session.state(), SessionState::Running);

    assert!(h.session.obstacles().is_empty());
    assert!(!h.session.input().right_held());
    assert_eq!(h.session.car().x, h.session.geometry().car_initial_x);
    assert_eq!(h.session.car().y, h.session.geometry().car_initial_y);

    assert_eq!(h.step(), Some(FrameOutcome::Continue));
    assert_eq!(h.draw.score(), Some(0));
    assert_eq!(h.session.obstacles().len(), 1);
}

#[test]
fn pause_stops_frames_until_resume() {
    let mut h = Harness::new(Settings::default());
    for _ in 0..10 {
        h.step();
    }
    let drawn = h.draw.frames();
    let car = h.session.car().clone();

    h.release(Key::Pause);
    for _ in 0..100 {
        assert_eq!(h.step(), None);
    }
    assert_eq!(h.draw.frames(), drawn);
    assert_eq!(h.session.car(), &car);

    h.release(Key::Resume);
    assert_eq!(h.step(), Some(FrameOutcome::Continue));
    assert_eq!(h.draw.frames(), drawn + 1);
}

#[test]
fn paused_time_counts_toward_score_by_default() {
    let mut h = Harness::new(Settings::default());
    h.step();
    h.release(Key::Pause);
    h.wait(10_000.0);
    h.release(Key::Resume);
    h.step();
    // 16 + 16 + 10000 ms after the start
    assert_eq!(h.draw.score(), Some(10));
}

#[test]
fn paused_time_can_be_left_out_of_the_score() {
    let mut settings = Settings::default();
    settings.score.freeze_while_paused = true;
    let mut h = Harness::new(settings);
    for _ in 0..100 {
        h.step();
    }
    h.release(Key::Pause);
    h.wait(10_000.0);
    h.release(Key::Resume);
    h.step();
    // 101 frames of 16ms
    assert_eq!(h.draw.score(), Some(2));
}

#[test]
fn steering_moves_the_car_each_frame() {
    let mut h = Harness::new(Settings::default());
    let start = h.session.car().x;
    let speed = h.session.car().speed;

    h.press(Key::SteerLeft);
    h.step();
    h.step();
    h.release(Key::SteerLeft);
    h.step();
    assert_eq!(h.session.car().x, start - 2.0 * speed);
}

#[test]
fn road_stays_stacked_through_a_session() {
    let mut h = Harness::new(Settings::default());
    let height = h.session.geometry().canvas_height;
    for _ in 0..600 {
        h.press(Key::SteerLeft);
        if h.step() != Some(FrameOutcome::Continue) {
            break;
        }
        let [a, b, c] = *h.session.road().offsets();
        assert!((b - (a - height)).abs() < 1e-3);
        assert!((c - (b - height)).abs() < 1e-3);
    }
}

#[test]
fn collision_scenarios() {
    let settings = Settings::default();
    let mut car = Car::new(&settings.geometry());

    car.x = 100.0;
    car.y = 500.0;
    car.width = 50.0;
    car.height = 100.0;
    let overlapping = Obstacle { x: 100.0, y: 520.0, width: 50.0, created_at: 0.0 };
    assert!(check_collision(&car, [&overlapping], 30.0));

    car.x = 0.0;
    car.y = 0.0;
    car.width = 50.0;
    car.height = 50.0;
    let apart = Obstacle { x: 200.0, y: 0.0, width: 50.0, created_at: 0.0 };
    assert!(!check_collision(&car, [&apart], 30.0));
}
