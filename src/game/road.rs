use crate::config::Geometry;

pub const ROAD_TILES: usize = 3;

/// Three full-height road tiles stacked back to back. The lowest one is
/// recycled to the top once it has scrolled past the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadScroller {
    offsets: [f32; ROAD_TILES],
    tile_height: f32,
    speed: f32,
}

impl RoadScroller {
    pub fn new(geometry: &Geometry) -> Self {
        let h = geometry.canvas_height;
        Self {
            offsets: [0.0, -h, -h * 2.0],
            tile_height: h,
            speed: geometry.scroll_speed,
        }
    }

    pub fn advance(&mut self) {
        for offset in &mut self.offsets {
            *offset += self.speed;
        }
        if self.offsets[0] > self.tile_height {
            let top = self.offsets[ROAD_TILES - 1] - self.tile_height;
            self.offsets.rotate_left(1);
            self.offsets[ROAD_TILES - 1] = top;
        }
    }

    /// Top edge of each tile, lowest tile first.
    pub fn offsets(&self) -> &[f32; ROAD_TILES] {
        &self.offsets
    }
}
