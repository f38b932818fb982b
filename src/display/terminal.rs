use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::ipc::{self, IpcCommand};
use crate::render::{braille, Canvas};
use crate::sim::scene::Scene;
use crate::sim::schedule;
use crate::text::Layout;

pub async fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// What the loop is currently showing.
enum Phase {
    /// Waiting for the start trigger.
    Idle,
    /// Reveal running since `started`.
    Revealing {
        started: Instant,
        angle: f32,
        scene: Scene,
    },
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut config: Config,
) -> Result<()> {
    // IPC trigger channel; the server dies with the process.
    let (cmd_tx, mut cmd_rx) = mpsc::channel(16);
    tokio::spawn(async move {
        if let Err(e) = ipc::start_server(cmd_tx).await {
            warn!("IPC server error: {}", e);
        }
    });

    let mut rng = StdRng::from_entropy();
    let mut color_scheme = config.display.color_scheme;
    let mut phase = Phase::Idle;
    let mut running = true;
    let mut pending_start = config.display.autostart;

    let mut canvas = Canvas::new(0, 0);
    let update_budget = Duration::from_millis(1000 / config.display.fps.max(1));
    let mut last_update = Instant::now() - update_budget;

    // Stop flag checked at the top of every iteration; `q`, Ctrl-C and the
    // IPC quit command clear it. Nothing else ends the loop - a settled
    // reveal simply holds its final state.
    while running {
        // Match the canvas to the terminal at braille dot resolution.
        let size = terminal.size()?;
        canvas.resize(
            size.width as usize * braille::CELL_W,
            size.height as usize * braille::CELL_H,
        );

        if pending_start {
            pending_start = false;
            phase = start_reveal(&mut canvas, &config, &mut rng)?;
        }

        // Gate simulation updates to the configured rate. A slow tick delays
        // the next one; frames are never dropped or coalesced.
        if last_update.elapsed() >= update_budget {
            last_update = Instant::now();

            if let Phase::Revealing {
                started,
                angle,
                scene,
            } = &mut phase
            {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                let step = schedule::step_for(config.animation.duration_ms, elapsed_ms);

                canvas.clear();
                let triangles = scene.tick(step, &mut rng);

                if elapsed_ms > config.animation.reveal_delay_ms {
                    let count = triangles.len().max(1);
                    for (i, tri) in triangles.iter().enumerate() {
                        let color = color_scheme.stroke_color(i as f32 / count as f32);
                        tri.stroke(&mut canvas, *angle, color);
                    }
                }

                *angle += config.animation.rotation_step;
            }

            terminal.draw(|frame| {
                let area = frame.area();
                match &phase {
                    Phase::Idle => render_hint(frame, area),
                    Phase::Revealing { .. } => braille::submit(&canvas, frame, area),
                }
            })?;
        }

        // Drain IPC commands between frames
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                IpcCommand::Play { text, reply } => {
                    if let Some(text) = text {
                        config.text.text = text;
                    }
                    pending_start = true;
                    let _ = reply.send(format!("ok: playing \"{}\"", config.text.text));
                }
                IpcCommand::Replay { reply } => {
                    pending_start = true;
                    let _ = reply.send("ok: replaying".to_string());
                }
                IpcCommand::Status { reply } => {
                    let status = match &phase {
                        Phase::Idle => format!("ok: idle colors={}", color_scheme.name()),
                        Phase::Revealing { started, scene, .. } => {
                            let dying =
                                scene.particles().iter().filter(|p| p.dying).count();
                            format!(
                                "ok: revealing elapsed={}ms particles={} dying={} colors={}",
                                started.elapsed().as_millis(),
                                scene.len(),
                                dying,
                                color_scheme.name(),
                            )
                        }
                    };
                    let _ = reply.send(status);
                }
                IpcCommand::Ping { reply } => {
                    let _ = reply.send("ok: pong".to_string());
                }
                IpcCommand::Quit { reply } => {
                    let _ = reply.send("ok: quitting".to_string());
                    running = false;
                }
            }
        }

        // Handle input for the rest of the frame budget
        let timeout = update_budget
            .saturating_sub(last_update.elapsed())
            .max(Duration::from_millis(1));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    } => {
                        running = false;
                    }
                    KeyEvent {
                        code: KeyCode::Enter,
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char(' '),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('r'),
                        ..
                    } => {
                        pending_start = true;
                    }
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::NONE,
                        ..
                    } => {
                        color_scheme = color_scheme.next();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Seed a fresh scene from the configured text and restart the clock.
fn start_reveal(canvas: &mut Canvas, config: &Config, rng: &mut StdRng) -> Result<Phase> {
    let layout = Layout {
        font_size: config.text.font_size,
        line_height: config.text.line_height,
    };
    let scene = Scene::seed(
        canvas,
        &config.text.text,
        layout,
        config.animation.frequency,
        config.animation.gravity,
        rng,
    )?;

    if scene.is_empty() {
        warn!("no glyph coverage for \"{}\"", config.text.text);
    }
    info!(
        "reveal started: {} particles on {}x{}",
        scene.len(),
        scene.width,
        scene.height
    );

    Ok(Phase::Revealing {
        started: Instant::now(),
        angle: 0.0,
        scene,
    })
}

/// Idle hint line, centered.
fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = " enter: reveal | c: colors | q: quit ";
    let x = area.x + area.width.saturating_sub(hint.len() as u16) / 2;
    let y = area.y + area.height / 2;

    for (i, ch) in hint.chars().enumerate() {
        if let Some(cell) = frame.buffer_mut().cell_mut((x + i as u16, y)) {
            cell.set_char(ch);
            cell.set_fg(Color::DarkGray);
        }
    }
}
