use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Space kept clear below the car.
const CAR_BOTTOM_GAP: f32 = 10.0;
/// Free road width an obstacle must leave, in car widths.
const PASSAGE_IN_CAR_WIDTHS: f32 = 3.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
    /// Width of each green strip on the sides of the road.
    pub grass_margin: f32,
    /// Road and obstacle speed as a fraction of the canvas width, per frame.
    pub scroll_speed_factor: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 700.0,
            grass_margin: 35.0,
            scroll_speed_factor: 0.005,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSettings {
    pub width: f32,
    /// Natural pixel size of the car sprite; only the ratio matters.
    pub sprite_width: f32,
    pub sprite_height: f32,
    /// Steering speed as a fraction of the canvas width, per frame.
    pub speed_factor: f32,
}

impl Default for CarSettings {
    fn default() -> Self {
        Self {
            width: 50.0,
            sprite_width: 240.0,
            sprite_height: 480.0,
            speed_factor: 0.01,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    pub bar_height: f32,
    pub min_width: f32,
    pub spawn_cooldown_ms: f64,
    pub capacity: usize,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            bar_height: 30.0,
            min_width: 50.0,
            spawn_cooldown_ms: 1000.0,
            capacity: 10,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    /// Leave time spent paused out of the score. Off by default: the score is
    /// plain time since the session started.
    pub freeze_while_paused: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Terminals without key-release reporting: a steering key counts as
    /// released when no repeat arrives within this window.
    pub hold_timeout_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { hold_timeout_ms: 250 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub fps: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasSettings,
    pub car: CarSettings,
    pub obstacles: ObstacleSettings,
    pub score: ScoreSettings,
    pub input: InputSettings,
    pub display: DisplaySettings,
    /// Fixed seed for the obstacle generator; entropy when absent.
    pub seed: Option<u64>,
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    /// `settings.json` inside the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "road-dodge", "RoadDodge")
            .context("could not resolve project directories")?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::from_settings(self)
    }
}

/// Fixed world dimensions and speeds, all derived once from [`Settings`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub grass_margin: f32,
    pub scroll_speed: f32,
    pub car_width: f32,
    pub car_height: f32,
    pub car_speed: f32,
    pub car_initial_x: f32,
    pub car_initial_y: f32,
    pub bar_height: f32,
    pub obstacle_min_width: f32,
    pub obstacle_max_width: f32,
    pub obstacle_min_x: f32,
    pub obstacle_max_x: f32,
    pub spawn_cooldown_ms: f64,
    /// At least one; a zero in the settings file would leave the field unbounded.
    pub obstacle_capacity: usize,
}

impl Geometry {
    pub fn from_settings(settings: &Settings) -> Self {
        let canvas = &settings.canvas;
        let car = &settings.car;
        let obstacles = &settings.obstacles;

        let car_height = if car.sprite_width > 0.0 {
            car.width * car.sprite_height / car.sprite_width
        } else {
            car.width
        };
        let road_width = canvas.width - canvas.grass_margin * 2.0;

        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            grass_margin: canvas.grass_margin,
            scroll_speed: canvas.width * canvas.scroll_speed_factor,
            car_width: car.width,
            car_height,
            car_speed: canvas.width * car.speed_factor,
            car_initial_x: canvas.width / 2.0 - car.width / 2.0,
            car_initial_y: canvas.height - car_height - CAR_BOTTOM_GAP,
            bar_height: obstacles.bar_height,
            obstacle_min_width: obstacles.min_width,
            obstacle_max_width: road_width - car.width * PASSAGE_IN_CAR_WIDTHS,
            obstacle_min_x: canvas.grass_margin,
            obstacle_max_x: canvas.width - canvas.grass_margin,
            spawn_cooldown_ms: obstacles.spawn_cooldown_ms,
            obstacle_capacity: obstacles.capacity.max(1),
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Settings::default().geometry()
    }
}
