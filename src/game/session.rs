use rand::Rng;

use crate::config::{Geometry, Settings};
use crate::render::Renderer;

use super::car::Car;
use super::collision::check_collision;
use super::input::{InputEvent, InputState, Trigger};
use super::obstacles::ObstacleField;
use super::road::RoadScroller;
use super::scheduler::{FrameScheduler, FrameToken};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Ended,
}

/// What a delivered frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The token was cancelled or superseded; nothing ran.
    Stale,
    /// The frame ran and the next one is scheduled.
    Continue,
    /// The car hit a bar and the session ended.
    Crashed,
}

/// Score is read off the clock rather than accumulated.
#[derive(Clone, Debug)]
struct ScoreClock {
    started_at: f64,
    paused_at: Option<f64>,
    paused_total: f64,
    freeze_while_paused: bool,
}

impl ScoreClock {
    fn new(now: f64, freeze_while_paused: bool) -> Self {
        Self {
            started_at: now,
            paused_at: None,
            paused_total: 0.0,
            freeze_while_paused,
        }
    }

    fn reset(&mut self, now: f64) {
        *self = Self::new(now, self.freeze_while_paused);
    }

    fn pause(&mut self, now: f64) {
        self.paused_at.get_or_insert(now);
    }

    fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += (now - paused_at).max(0.0);
        }
    }

    fn seconds_at(&self, now: f64) -> u32 {
        let mut elapsed = now - self.started_at;
        if self.freeze_while_paused {
            elapsed -= self.paused_total;
            if let Some(paused_at) = self.paused_at {
                elapsed -= (now - paused_at).max(0.0);
            }
        }
        (elapsed / 1000.0).round().max(0.0) as u32
    }
}

/// One game from start to crash, and any number of restarts after that.
///
/// The session never drives itself: it asks `scheduler` for a frame and
/// the owner delivers that frame back through [`Session::on_frame`].
pub struct Session<S, R> {
    geometry: Geometry,
    car: Car,
    road: RoadScroller,
    obstacles: ObstacleField,
    input: InputState,
    state: SessionState,
    clock: ScoreClock,
    last_frame_at: f64,
    frame: Option<FrameToken>,
    scheduler: S,
    rng: R,
}

impl<S: FrameScheduler, R: Rng> Session<S, R> {
    pub fn new(settings: &Settings, scheduler: S, rng: R, now: f64) -> Self {
        let geometry = settings.geometry();
        Self {
            car: Car::new(&geometry),
            road: RoadScroller::new(&geometry),
            obstacles: ObstacleField::new(&geometry),
            input: InputState::default(),
            state: SessionState::Running,
            clock: ScoreClock::new(now, settings.score.freeze_while_paused),
            last_frame_at: now,
            frame: None,
            scheduler,
            rng,
            geometry,
        }
    }

    /// Schedules the first frame.
    pub fn start(&mut self) {
        if self.state == SessionState::Running && self.frame.is_none() {
            log::info!("session started");
            self.schedule();
        }
    }

    /// Stops the frame loop for good; only a restart brings it back.
    pub fn end(&mut self) {
        if self.state == SessionState::Ended {
            return;
        }
        self.cancel();
        self.state = SessionState::Ended;
        log::info!("game over, score {}", self.score_at(self.last_frame_at));
    }

    /// Starts over from a finished game. Returns false, doing nothing, if the
    /// game has not ended.
    pub fn restart(&mut self, now: f64) -> bool {
        if self.state != SessionState::Ended {
            log::debug!("restart ignored while {:?}", self.state);
            return false;
        }
        self.input.clear();
        self.obstacles.clear();
        self.car.reset();
        self.clock.reset(now);
        self.last_frame_at = now;
        self.state = SessionState::Running;
        log::info!("session restarted");
        self.schedule();
        true
    }

    pub fn handle_input(&mut self, event: InputEvent, now: f64) {
        // Once ended, only key releases get through (the restart path).
        if self.state == SessionState::Ended && matches!(event, InputEvent::Pressed(_)) {
            return;
        }
        match self.input.dispatch(event) {
            Some(Trigger::Pause) => self.pause(now),
            Some(Trigger::Resume) => self.resume(now),
            Some(Trigger::Restart) => {
                self.restart(now);
            }
            None => {}
        }
    }

    fn pause(&mut self, now: f64) {
        if self.state != SessionState::Running {
            return;
        }
        self.cancel();
        self.clock.pause(now);
        self.state = SessionState::Paused;
        log::debug!("paused at {:.0}ms", now);
    }

    fn resume(&mut self, now: f64) {
        if self.state != SessionState::Paused {
            return;
        }
        self.clock.resume(now);
        self.state = SessionState::Running;
        log::debug!("resumed at {:.0}ms", now);
        self.schedule();
    }

    /// Runs one frame: scroll, spawn, steer, draw, then check for a crash.
    pub fn on_frame<D: Renderer>(
        &mut self,
        token: FrameToken,
        now: f64,
        renderer: &mut D,
    ) -> FrameOutcome {
        if self.state != SessionState::Running || self.frame != Some(token) {
            log::trace!("dropping stale frame {:?}", token);
            return FrameOutcome::Stale;
        }
        self.frame = None;
        self.last_frame_at = now;

        renderer.clear();

        self.road.advance();
        for (index, &y) in self.road.offsets().iter().enumerate() {
            renderer.draw_road_tile(index, y);
        }

        self.obstacles.advance();
        self.obstacles.maybe_spawn(now, &mut self.rng);
        let bar_height = self.obstacles.bar_height();
        for obstacle in self.obstacles.iter() {
            renderer.draw_obstacle(obstacle.x, obstacle.y, obstacle.width, bar_height);
        }

        renderer.draw_score(self.clock.seconds_at(now));

        self.car.steer(&self.input);
        renderer.draw_car(self.car.x, self.car.y, self.car.width, self.car.height);

        if check_collision(&self.car, self.obstacles.iter(), bar_height) {
            self.end();
            renderer.draw_game_over();
            return FrameOutcome::Crashed;
        }

        self.schedule();
        FrameOutcome::Continue
    }

    fn schedule(&mut self) {
        if let Some(previous) = self.frame.take() {
            self.scheduler.cancel_frame(previous);
        }
        self.frame = Some(self.scheduler.request_frame());
    }

    fn cancel(&mut self) {
        if let Some(token) = self.frame.take() {
            self.scheduler.cancel_frame(token);
        }
    }

    pub fn score_at(&self, now: f64) -> u32 {
        self.clock.seconds_at(now)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn road(&self) -> &RoadScroller {
        &self.road
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
