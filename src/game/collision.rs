use super::car::Car;
use super::obstacles::Obstacle;

/// True when the car touches any bar, checked in collection order.
///
/// Horizontal overlap counts touching edges as a hit, vertical overlap does
/// not; a bar whose top sits exactly on the car's top edge is a miss.
pub fn check_collision<'a, I>(car: &Car, obstacles: I, bar_height: f32) -> bool
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles
        .into_iter()
        .any(|obstacle| overlaps_x(car, obstacle) && overlaps_y(car, obstacle, bar_height))
}

fn overlaps_x(car: &Car, obstacle: &Obstacle) -> bool {
    let (left, right) = (car.x, car.x + car.width);
    let (obs_left, obs_right) = (obstacle.x, obstacle.x + obstacle.width);

    (left >= obs_left && left <= obs_right)
        || (right >= obs_left && right <= obs_right)
        // bar narrower than the car
        || (left < obs_left && right > obs_right)
}

fn overlaps_y(car: &Car, obstacle: &Obstacle, bar_height: f32) -> bool {
    let (top, bottom) = (car.y, car.y + car.height);
    let (obs_top, obs_bottom) = (obstacle.y, obstacle.y + bar_height);

    (top > obs_top && top < obs_bottom)
        || (bottom > obs_top && bottom < obs_bottom)
        // bar fully alongside the car
        || (obs_top > top && obs_bottom < bottom)
}
