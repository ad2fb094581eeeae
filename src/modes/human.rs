use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use std::io::{self, Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::game::GameController;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{PixelCanvas, Renderer, SceneRenderer};

pub struct HumanMode {
    controller: GameController,
    metrics: GameMetrics,
    scene: SceneRenderer,
    canvas: PixelCanvas,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_rate: u32,
    /// Screen area of the restart button as of the last drawn frame
    restart_button: Rect,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: AppConfig) -> Self {
        let controller = GameController::new(config.game);
        let grid = *controller.grid();

        Self {
            controller,
            metrics: GameMetrics::new(),
            scene: SceneRenderer::new(),
            canvas: PixelCanvas::new(grid.pixel_width(), grid.pixel_height()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_rate: config.ui.frame_rate.max(1),
            restart_button: Rect::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Once raw mode is on, the terminal is restored whatever happens next
        let result = match open_terminal() {
            Ok(mut terminal) => self.run_game_loop(&mut terminal).await,
            Err(err) => Err(err),
        };

        finish(result, restore_terminal())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation update and one draw per frame
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(self.frame_rate));
        let mut frame_timer = interval(frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let start = Instant::now();
        info!(frame_rate = self.frame_rate, "entering game loop");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    self.on_input(maybe_event);
                }

                // Advance the game and render
                _ = frame_timer.tick() => {
                    self.on_frame(start.elapsed());
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    high_score = self.metrics.high_score,
                    games_played = self.metrics.games_played,
                    "quitting"
                );
                break;
            }
        }

        Ok(())
    }

    /// Run the simulation up to `now`, fold its events into the HUD and
    /// repaint the canvas
    fn on_frame(&mut self, now: Duration) {
        self.controller.frame(now);
        for event in self.controller.drain_events() {
            self.metrics.apply(&event);
        }
        self.metrics.update();

        self.scene
            .render(self.controller.session(), self.controller.grid(), &mut self.canvas);
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let (renderer, canvas, metrics) = (&self.renderer, &self.canvas, &self.metrics);
        let phase = self.controller.session().phase;
        let mut button = self.restart_button;

        terminal
            .draw(|frame| {
                button = renderer.render(frame, canvas, metrics, phase);
            })
            .context("Failed to draw frame")?;

        self.restart_button = button;
        Ok(())
    }

    /// One item from the terminal event stream. The stream ending means
    /// no more input can arrive, so the game quits.
    fn on_input(&mut self, maybe_event: Option<io::Result<Event>>) {
        match maybe_event {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => warn!(error = %err, "failed to read terminal event"),
            None => {
                info!("terminal input closed");
                self.should_quit = true;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.handle_action(action);
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if self.restart_button.contains(Position::new(column, row)) {
                    debug!("restart button clicked");
                    self.handle_action(KeyAction::Restart);
                }
            }
            _ => {}
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => self.controller.steer(direction),
            KeyAction::TogglePause => self.controller.toggle_pause(),
            KeyAction::Restart => self.controller.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }
}

/// Enter the alternate screen with mouse capture; raw mode must already be on
fn open_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo `enable_raw_mode` and `open_terminal`. Every step runs even when an
/// earlier one fails.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(stderr(), DisableMouseCapture, LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

/// The game's own error wins over a restore error; the latter is logged
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let (Err(_), Err(restore_err)) = (&result, &restored) {
        warn!(error = %restore_err, "terminal restore failed after an error");
    }
    result.and(restored)
}
