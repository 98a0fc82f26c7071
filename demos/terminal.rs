//! Terminal Example - factorization circles in the terminal
//!
//! Controls:
//! - Up / `+`: next number
//! - Down / `-`: previous number
//! - digits then Enter: jump to a number (Backspace edits, Esc cancels)
//! - `d`: toggle debug overlay
//! - `q` / Esc / Ctrl+C: quit
//!
//! Run with: cargo run --example terminal -- 12

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};

use factor_circles::{
    paint_scene, pixel_size, DiffRenderer, FactorConfig, FactorResult, FactorScene,
};

const TICK: Duration = Duration::from_millis(10);

struct App {
    scene: FactorScene,
    renderer: DiffRenderer,
    cols: u16,
    rows: u16,
    typed: String,
    /// Why the last input was rejected, shown until the next accepted one.
    status: Option<String>,
    running: bool,
}

impl App {
    fn new(start: i64) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Self::with_size(start, cols, rows)
    }

    fn with_size(start: i64, cols: u16, rows: u16) -> io::Result<Self> {
        let mut scene = FactorScene::new(FactorConfig::default(), pixel_size(cols, rows))
            .map_err(io::Error::other)?;
        scene.set_target_number(start).map_err(io::Error::other)?;

        Ok(Self {
            scene,
            renderer: DiffRenderer::new(),
            cols,
            rows,
            typed: String::new(),
            status: None,
            running: true,
        })
    }

    fn step(&mut self, delta: i64) {
        let current = self.scene.number().unwrap_or(1) as i64;
        // Out of range input keeps the current picture
        let result = self.scene.set_target_number(current + delta);
        self.record(result);
    }

    fn record(&mut self, result: FactorResult<bool>) {
        match result {
            Ok(_) => self.status = None,
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Text for the bottom row: the number being typed, else the last error.
    fn prompt_line(&self) -> Option<String> {
        if !self.typed.is_empty() {
            Some(format!("> {}", self.typed))
        } else {
            self.status.as_ref().map(|err| format!("! {err}"))
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Char(c) if c.is_ascii_digit() => self.typed.push(c),
            KeyCode::Backspace => {
                self.typed.pop();
            }
            KeyCode::Enter if !self.typed.is_empty() => {
                let text = std::mem::take(&mut self.typed);
                let result = self.scene.set_target_text(&text);
                self.record(result);
            }
            KeyCode::Esc if !self.typed.is_empty() => self.typed.clear(),
            KeyCode::Up | KeyCode::Char('+') => self.step(1),
            KeyCode::Down | KeyCode::Char('-') => self.step(-1),
            KeyCode::Char('d') => {
                let debug = !self.scene.is_debug();
                self.scene.set_debug_mode(debug);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.scene.set_canvas_size(pixel_size(cols, rows));
        self.renderer.invalidate();
    }

    fn draw(&mut self) -> io::Result<()> {
        let mut fb = paint_scene(&self.scene, self.cols, self.rows).map_err(io::Error::other)?;
        if let Some(prompt) = self.prompt_line() {
            let last_row = self.rows.saturating_sub(1);
            fb.draw_text(1, last_row, &prompt, (0, 0, 0), (255, 255, 255));
        }
        self.renderer.render(&fb)?;
        Ok(())
    }

    fn run(&mut self) -> io::Result<()> {
        self.draw()?;
        let mut next_tick = Instant::now() + TICK;

        while self.running {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(cols, rows) => self.resize(cols, rows),
                    _ => {}
                }
                self.draw()?;
            }

            if Instant::now() >= next_tick {
                next_tick += TICK;
                let animating = self.scene.is_animating();
                self.scene.tick();
                if animating {
                    self.draw()?;
                }
            }
        }
        Ok(())
    }
}

fn main() -> io::Result<()> {
    let start = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<i64>().ok())
        .unwrap_or(4);

    let mut app = App::new(start)?;

    enable_raw_mode()?;
    app.renderer.enter_fullscreen()?;

    let result = app.run();

    app.renderer.exit_fullscreen()?;
    disable_raw_mode()?;

    result
}

// =============================================================================
// Tests
// =============================================================================
