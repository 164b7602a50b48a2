use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use triangle_duel::renderer::GameRenderer;
use triangle_duel::{GameConfig, GameState, InputManager};

/// Ticks run back to back before a redraw when the loop falls behind
const MAX_CATCH_UP_TICKS: u32 = 8;

/// The frame driver: polls input, ticks the game at a fixed rate and redraws.
pub struct App {
    running: bool,
    game: GameState,
    tick_rate: Duration,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, tick_rate: Duration, release_events: bool) -> Self {
        Self {
            running: true,
            game: GameState::new(config),
            tick_rate,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    ///
    /// Every due tick runs, in order, even if rendering fell behind. A long stall
    /// is worked off over several frames instead of in one burst.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(tick_ms = self.tick_rate.as_millis() as u64, "starting game loop");
        let mut next_tick = Instant::now();

        while self.running {
            self.input_manager.poll_events()?;
            if self.input_manager.quit_requested() {
                self.running = false;
                continue;
            }

            let mut ticks_run = 0;
            while Instant::now() >= next_tick && ticks_run < MAX_CATCH_UP_TICKS {
                let input = self.input_manager.take_input();
                self.game.tick(&input);
                next_tick += self.tick_rate;
                ticks_run += 1;
            }
            if ticks_run == MAX_CATCH_UP_TICKS {
                debug!("frame driver behind schedule");
            }

            terminal.draw(|frame| {
                let view = self.game.snapshot();
                self.renderer.render(frame, &view);
            })?;

            std::thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        }

        info!(
            ticks = self.game.tick_count,
            lives = self.game.player.lives,
            "game loop finished"
        );
        Ok(())
    }
}
