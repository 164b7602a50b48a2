mod app;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, ensure};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use triangle_duel::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "triangle_duel")]
#[command(about = "A one-on-one terminal shooter against a homing turret")]
struct Cli {
    /// Milliseconds per game tick
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    #[arg(long, default_value_t = 3)]
    lives: u32,
    #[arg(long, default_value_t = 5)]
    enemy_health: u32,
    /// Ticks between player shots while fire is held
    #[arg(long, default_value_t = 10)]
    fire_cooldown: u32,
    /// Ticks between enemy shots
    #[arg(long, default_value_t = 50)]
    enemy_cooldown: u32,
    #[arg(long, default_value_t = 60)]
    respawn_ticks: u32,
    /// Log output goes here; the terminal itself is taken by the game
    #[arg(long, default_value = "triangle_duel.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            player_lives: self.lives,
            enemy_health: self.enemy_health,
            fire_cooldown_max: self.fire_cooldown,
            enemy_shoot_cooldown_max: self.enemy_cooldown,
            respawn_ticks: self.respawn_ticks,
            ..GameConfig::default()
        }
    }
}

/// `RUST_LOG` wins when it is set and parses; otherwise everything at `info` and above
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

const DEFAULT_LOG_FILTER: &str = "info";

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    ensure!(cli.tick_ms > 0, "--tick-ms must be at least 1");
    let config = cli.game_config();
    config.validate()?;
    init_logging(&cli.log_file)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(?config, supports_keyboard_enhancement, "starting");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let result = run_in_terminal(config, &cli, supports_keyboard_enhancement);
    restore_terminal(supports_keyboard_enhancement);

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}

/// Everything that needs raw mode. Any error comes back to the caller, which
/// restores the terminal before reporting it.
fn run_in_terminal(config: GameConfig, cli: &Cli, keyboard_enhancement: bool) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events are only reported once enhancement is pushed
    if keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    App::new(
        config,
        Duration::from_millis(cli.tick_ms),
        keyboard_enhancement,
    )
    .run(&mut terminal)
}

/// Best-effort cleanup. Every step runs even if an earlier one failed.
fn restore_terminal(keyboard_enhancement: bool) {
    let mut stdout = stdout();
    if keyboard_enhancement && let Err(err) = execute!(stdout, PopKeyboardEnhancementFlags) {
        tracing::warn!(%err, "could not pop keyboard enhancement flags");
    }
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "could not disable raw mode");
    }
    if let Err(err) = execute!(stdout, LeaveAlternateScreen, Show) {
        tracing::warn!(%err, "could not leave the alternate screen");
    }
}
