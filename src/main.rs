mod app;
mod event;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use road_dodge::config::Settings;

use app::App;
use event::{Event, EventHandler};

#[derive(Parser, Debug)]
#[command(name = "road-dodge")]
#[command(about = "Steer a car around scrolling obstacles for as long as you can", long_about = None)]
struct Args {
    /// Settings file (JSON). Defaults to settings.json in the config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the obstacle generator
    #[arg(long)]
    seed: Option<u64>,

    /// Leave time spent paused out of the score
    #[arg(long, default_value_t = false)]
    freeze_score_on_pause: bool,

    /// Frame rate cap
    #[arg(long)]
    fps: Option<u64>,
}

fn init_logging() -> Result<()> {
    // The terminal belongs to the game, so logs go to a file.
    let path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("road-dodge.log")))
        .unwrap_or_else(|| PathBuf::from("road-dodge.log"));
    let file = File::create(&path).with_context(|| format!("creating log file {}", path.display()))?;

    let env = env_logger::Env::default()
        .filter_or("ROAD_DODGE_LOG", "info")
        .write_style_or("ROAD_DODGE_LOG_STYLE", "never");
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load(&path)?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if args.freeze_score_on_pause {
        settings.score.freeze_while_paused = true;
    }
    if let Some(fps) = args.fps {
        settings.display.fps = fps;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;
    let settings = load_settings(&args)?;
    log::info!("starting with {:?}", settings);

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        log::warn!("terminal does not report key releases, steering uses a hold timeout");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&settings, rng, release_events);
    let fps = settings.display.fps.clamp(10, 240);
    let event_handler = EventHandler::new(1000 / fps);

    let result = run(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            log::info!("quitting");
            return Ok(());
        }
    }
}
