use ratatui::prelude::*;

use road_dodge::config::Geometry;
use road_dodge::render::DrawCommand;

const GRASS: Color = Color::Rgb(40, 120, 45);
const GRASS_DARK: Color = Color::Rgb(30, 100, 38);
const ASPHALT: Color = Color::Rgb(70, 70, 78);
const LANE_MARK: Color = Color::Rgb(235, 235, 235);
const BAR: Color = Color::Rgb(150, 80, 35);
const BAR_EDGE: Color = Color::Rgb(110, 55, 20);
const CAR_BODY: Color = Color::Rgb(220, 40, 40);
const CAR_GLASS: Color = Color::Rgb(120, 190, 240);

/// Length of one dash of the centre line plus its gap, in canvas units.
const DASH_PERIOD: f32 = 80.0;

type Cell = (char, Style);

/// Maps canvas units onto a grid of terminal cells.
struct Raster {
    grid: Vec<Vec<Cell>>,
    cols: usize,
    rows: usize,
    scale_x: f32,
    scale_y: f32,
}

impl Raster {
    fn new(cols: usize, rows: usize, geometry: &Geometry) -> Self {
        Self {
            grid: vec![vec![(' ', Style::default()); cols]; rows],
            cols,
            rows,
            scale_x: cols as f32 / geometry.canvas_width.max(1.0),
            scale_y: rows as f32 / geometry.canvas_height.max(1.0),
        }
    }

    /// Cell range covering `[from, to)` in canvas units.
    fn span(from: f32, to: f32, scale: f32, limit: usize) -> std::ops::Range<usize> {
        let start = (from * scale).floor().max(0.0) as usize;
        let end = (to * scale).ceil().max(0.0) as usize;
        start.min(limit)..end.min(limit)
    }

    fn col_center(&self, col: usize) -> f32 {
        (col as f32 + 0.5) / self.scale_x
    }

    fn row_center(&self, row: usize) -> f32 {
        (row as f32 + 0.5) / self.scale_y
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, cell: impl Fn(usize, usize) -> Cell) {
        let rows = Self::span(y, y + height, self.scale_y, self.rows);
        let cols = Self::span(x, x + width, self.scale_x, self.cols);
        for (i, row) in rows.clone().enumerate() {
            for (j, col) in cols.clone().enumerate() {
                self.grid[row][col] = cell(i, j);
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Rasterises one recorded frame into terminal lines.
pub fn render_field(commands: &[DrawCommand], geometry: &Geometry, cols: usize, rows: usize) -> Vec<Line<'static>> {
    let mut raster = Raster::new(cols, rows, geometry);

    for command in commands {
        match *command {
            DrawCommand::RoadTile { y, .. } => draw_road_tile(&mut raster, geometry, y),
            // Bars are a stroke centred on their y, as wide as they are tall.
            DrawCommand::Obstacle { x, y, width, height } => {
                raster.fill(x, y - height / 2.0, width, height, |_, j| {
                    if j == 0 {
                        ('▐', Style::default().fg(BAR_EDGE).bg(ASPHALT))
                    } else {
                        ('█', Style::default().fg(BAR))
                    }
                });
            }
            DrawCommand::Car { x, y, width, height } => {
                raster.fill(x, y, width, height, |i, _| match i {
                    0 => ('▄', Style::default().fg(CAR_BODY)),
                    1 => ('▀', Style::default().fg(CAR_GLASS).bg(CAR_BODY)),
                    _ => ('█', Style::default().fg(CAR_BODY)),
                });
            }
            // Text layers are drawn by the HUD and overlay.
            DrawCommand::Score(_) | DrawCommand::GameOver => {}
        }
    }

    raster.into_lines()
}

fn draw_road_tile(raster: &mut Raster, geometry: &Geometry, top: f32) {
    let rows = Raster::span(top, top + geometry.canvas_height, raster.scale_y, raster.rows);
    let left_edge = geometry.grass_margin;
    let right_edge = geometry.canvas_width - geometry.grass_margin;
    let center = geometry.canvas_width / 2.0;
    let half_cell = 0.5 / raster.scale_x;

    for row in rows {
        let within_tile = raster.row_center(row) - top;
        let dash = within_tile.rem_euclid(DASH_PERIOD) < DASH_PERIOD / 2.0;
        for col in 0..raster.cols {
            let x = raster.col_center(col);
            raster.grid[row][col] = if x < left_edge || x > right_edge {
                let shade = if (row + col) % 3 == 0 { GRASS_DARK } else { GRASS };
                (' ', Style::default().bg(shade))
            } else if (x - center).abs() <= half_cell && dash {
                ('┃', Style::default().fg(LANE_MARK).bg(ASPHALT))
            } else {
                (' ', Style::default().bg(ASPHALT))
            };
        }
    }
}
