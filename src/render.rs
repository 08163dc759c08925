/// Drawing surface the session feeds every frame. Implementations only
/// draw; they make no game decisions.
pub trait Renderer {
    fn clear(&mut self);
    /// `index` is the tile's position in the scroll window, `y` its top edge.
    fn draw_road_tile(&mut self, index: usize, y: f32);
    fn draw_car(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn draw_obstacle(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn draw_score(&mut self, seconds: u32);
    fn draw_game_over(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    RoadTile { index: usize, y: f32 },
    Car { x: f32, y: f32, width: f32, height: f32 },
    Obstacle { x: f32, y: f32, width: f32, height: f32 },
    Score(u32),
    GameOver,
}

/// Records the commands of the latest frame. `clear` starts a new frame, so
/// the list always holds exactly one frame's worth of drawing.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn score(&self) -> Option<u32> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn shows_game_over(&self) -> bool {
        self.commands.contains(&DrawCommand::GameOver)
    }
}

impl Renderer for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn draw_road_tile(&mut self, index: usize, y: f32) {
        self.commands.push(DrawCommand::RoadTile { index, y });
    }

    fn draw_car(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Car { x, y, width, height });
    }

    fn draw_obstacle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Obstacle { x, y, width, height });
    }

    fn draw_score(&mut self, seconds: u32) {
        self.commands.push(DrawCommand::Score(seconds));
    }

    fn draw_game_over(&mut self) {
        self.commands.push(DrawCommand::GameOver);
    }
}
