use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use snake::audio::Speaker;
use snake::config::{DEFAULT_TICK_INTERVAL_MS, Difficulty, MapPreset, ROUND_END_HOLD_MS};
use snake::driver::{Driver, Ticker};
use snake::error::AppError;
use snake::game::{GameSession, GameState, TickEvent};
use snake::input::{GameInput, KeyboardInput, wait_for_input};
use snake::logging::init_file_logging;
use snake::renderer::TerminalRenderer;
use snake::settings::{PersistedSettings, load_settings, save_settings};
use snake::terminal_runtime::{TerminalSession, install_panic_hook};
use snake::ui::menu::{MenuAction, SettingsMenu};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Override the stored difficulty.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Override the stored map size.
    #[arg(long = "map-size", value_enum)]
    map_size: Option<MapPreset>,

    /// Disable the fruit beep.
    #[arg(long)]
    mute: bool,

    /// Seed for fruit placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start playing immediately with the stored settings.
    #[arg(long = "skip-menu")]
    skip_menu: bool,

    /// Length of one tick in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Write logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let mut settings = load_settings();
    apply_overrides(&mut settings, &cli);

    install_panic_hook();
    let mut renderer = TerminalRenderer::new(TerminalSession::enter()?);

    if !cli.skip_menu {
        let Some(chosen) = run_menu(&mut renderer, settings)? else {
            return Ok(());
        };
        settings = chosen;

        if let Err(error) = save_settings(&settings) {
            tracing::warn!(%error, "failed to save settings");
        }
    }

    let config = settings.configuration();
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut session = GameSession::new(config, seed)?;
    tracing::info!(seed, ?config, "session ready");

    let mut driver = Driver::new(renderer, Speaker::new(config.sound_enabled));
    run_game(
        &mut driver,
        &mut session,
        Duration::from_millis(cli.tick_ms.max(1)),
    )?;

    Ok(())
}

fn apply_overrides(settings: &mut PersistedSettings, cli: &Cli) {
    if let Some(difficulty) = cli.difficulty {
        settings.set_difficulty(difficulty);
    }
    if let Some(map) = cli.map_size {
        settings.set_map_preset(map);
    }
    if cli.mute {
        settings.set_sound_enabled(false);
    }
}

/// Shows the title screen and settings menu. Returns `None` when the player quits.
fn run_menu(
    renderer: &mut TerminalRenderer,
    settings: PersistedSettings,
) -> Result<Option<PersistedSettings>, AppError> {
    renderer.draw_title()?;
    if wait_for_input()? == GameInput::Quit {
        return Ok(None);
    }

    let mut menu = SettingsMenu::new(settings);
    loop {
        renderer.draw_menu(&menu)?;

        match menu.handle(wait_for_input()?) {
            MenuAction::Changed => {}
            MenuAction::Start => return Ok(Some(menu.settings())),
            MenuAction::Quit => return Ok(None),
        }
    }
}

fn run_game(
    driver: &mut Driver<TerminalRenderer, Speaker>,
    session: &mut GameSession,
    tick_period: Duration,
) -> Result<(), AppError> {
    let mut input = KeyboardInput::new();
    let mut ticker = Ticker::new(tick_period);
    let mut hold_until = Instant::now();

    driver.redraw(session)?;

    loop {
        input.pump()?;
        if input.quit_requested() {
            tracing::info!(score = session.score(), "quit");
            return Ok(());
        }

        let round_over = matches!(session.state(), GameState::GameOver | GameState::Finished);
        if round_over && Instant::now() < hold_until {
            input.clear();
        }

        let report = driver.tick(session, &mut input)?;
        if matches!(report.event, TickEvent::Collision | TickEvent::Won) {
            hold_until = Instant::now() + Duration::from_millis(ROUND_END_HOLD_MS);
        }

        ticker.wait();
    }
}
