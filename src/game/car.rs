use crate::config::Geometry;

use super::input::InputState;

#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    initial_x: f32,
    initial_y: f32,
}

impl Car {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            x: geometry.car_initial_x,
            y: geometry.car_initial_y,
            width: geometry.car_width,
            height: geometry.car_height,
            speed: geometry.car_speed,
            initial_x: geometry.car_initial_x,
            initial_y: geometry.car_initial_y,
        }
    }

    /// Only x moves; the car is not kept on the road.
    pub fn steer(&mut self, input: &InputState) {
        if input.left_held() {
            self.x -= self.speed;
        }
        if input.right_held() {
            self.x += self.speed;
        }
    }

    pub fn reset(&mut self) {
        self.x = self.initial_x;
        self.y = self.initial_y;
    }
}
