use std::collections::VecDeque;

use rand::Rng;

use crate::config::Geometry;

/// A horizontal bar across part of the road. All bars share one height,
/// kept in [`Geometry::bar_height`].
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub created_at: f64,
}

/// Bounded FIFO of live obstacles. Bars are never culled when they leave
/// the screen; the oldest one is evicted once the field is full.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
    capacity: usize,
    scroll_speed: f32,
    bar_height: f32,
    min_width: f32,
    max_width: f32,
    min_x: f32,
    max_x: f32,
    cooldown_ms: f64,
}

impl ObstacleField {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            obstacles: VecDeque::with_capacity(geometry.obstacle_capacity),
            capacity: geometry.obstacle_capacity,
            scroll_speed: geometry.scroll_speed,
            bar_height: geometry.bar_height,
            min_width: geometry.obstacle_min_width,
            max_width: geometry.obstacle_max_width,
            min_x: geometry.obstacle_min_x,
            max_x: geometry.obstacle_max_x,
            cooldown_ms: geometry.spawn_cooldown_ms,
        }
    }

    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.y += self.scroll_speed;
        }
    }

    /// Adds a bar unless the newest one is younger than the cooldown.
    /// Returns whether a bar was added.
    pub fn maybe_spawn<R: Rng>(&mut self, now: f64, rng: &mut R) -> bool {
        if let Some(last) = self.obstacles.back() {
            if now - last.created_at < self.cooldown_ms {
                return false;
            }
        }

        let obstacle = self.generate(now, rng);
        if self.obstacles.len() >= self.capacity {
            if let Some(evicted) = self.obstacles.pop_front() {
                log::trace!("evicting obstacle created at {:.0}ms", evicted.created_at);
            }
        }
        log::debug!(
            "spawned obstacle x={} width={} at {:.0}ms",
            obstacle.x,
            obstacle.width,
            now
        );
        self.obstacles.push_back(obstacle);
        true
    }

    /// Width and x are drawn uniformly and then clamped up to their minimum
    /// rather than redrawn, so the minimums come up more often than the rest.
    fn generate<R: Rng>(&self, now: f64, rng: &mut R) -> Obstacle {
        let width = uniform_below(rng, self.max_width).max(self.min_width);
        let x = uniform_below(rng, self.max_x - width).max(self.min_x);
        Obstacle {
            x,
            y: -self.bar_height,
            width,
            created_at: now,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn bar_height(&self) -> f32 {
        self.bar_height
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }
}

/// `floor(u * upper)` for a uniform `u` in `[0, 1)`: an integer below
/// `upper`, so a fractional bound can still yield `floor(upper)`. Zero when
/// the range is empty.
fn uniform_below<R: Rng>(rng: &mut R, upper: f32) -> f32 {
    if upper <= 0.0 {
        return 0.0;
    }
    (rng.gen::<f64>() * f64::from(upper)).floor() as f32
}
