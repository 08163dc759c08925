pub mod car;
pub mod collision;
pub mod input;
pub mod obstacles;
pub mod road;
pub mod scheduler;
pub mod session;

pub use car::Car;
pub use collision::check_collision;
pub use input::{InputEvent, InputState, Key, Trigger};
pub use obstacles::{Obstacle, ObstacleField};
pub use road::{RoadScroller, ROAD_TILES};
pub use scheduler::{FrameQueue, FrameScheduler, FrameToken};
pub use session::{FrameOutcome, Session, SessionState};
