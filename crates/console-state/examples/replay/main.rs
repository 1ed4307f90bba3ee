mod fixture;
mod renderer;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use fixture::Fixture;
use ratatui::DefaultTerminal;
use vigil_console_interface::ConsoleEvent;
use vigil_console_state::ConsoleState;
use vigil_viz::MotionConfig;

#[derive(clap::Parser)]
#[command(
    name = "replay",
    about = "Replay a recorded console event stream in the terminal"
)]
struct Args {
    #[arg(short, long, default_value_t = Fixture::Briefing)]
    fixture: Fixture,

    #[arg(short, long, default_value_t = 120)]
    speed: u64,
}

struct App {
    events: Vec<ConsoleEvent>,
    position: usize,
    paused: bool,
    speed_ms: u64,
    state: ConsoleState,
    motion: MotionConfig,
    started: Instant,
    fixture_name: String,
}

impl App {
    fn new(events: Vec<ConsoleEvent>, speed_ms: u64, fixture_name: String) -> Self {
        Self {
            events,
            position: 0,
            paused: false,
            speed_ms,
            state: ConsoleState::new(),
            motion: MotionConfig::default(),
            started: Instant::now(),
            fixture_name,
        }
    }

    fn total(&self) -> usize {
        self.events.len()
    }

    fn seek_to(&mut self, target: usize) {
        let target = target.min(self.total());
        self.state = ConsoleState::new();
        for event in &self.events[..target] {
            self.state.apply(event.clone());
        }
        self.position = target;
    }

    fn advance(&mut self) -> bool {
        if self.position >= self.total() {
            return false;
        }
        self.state.apply(self.events[self.position].clone());
        self.position += 1;
        true
    }

    fn is_done(&self) -> bool {
        self.position >= self.total()
    }

    fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

fn main() {
    use clap::Parser;
    let args = Args::parse();
    let fixture = args.fixture;
    let speed_ms = args.speed;
    let fixture_name = fixture.to_string();

    let events: Vec<ConsoleEvent> =
        serde_json::from_str(fixture.json()).expect("fixture must parse as ConsoleEvent[]");

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, events, speed_ms, fixture_name.clone());
    ratatui::restore();

    match result {
        Ok(app) => {
            println!(
                "Done. {} messages on screen after {} events ({} fixture).",
                app.state.frame().messages.len(),
                app.total(),
                fixture_name,
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    events: Vec<ConsoleEvent>,
    speed_ms: u64,
    fixture_name: String,
) -> std::io::Result<App> {
    let mut app = App::new(events, speed_ms, fixture_name);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| renderer::render(frame, &app))?;

        let tick_duration = Duration::from_millis(app.speed_ms);
        let elapsed = last_tick.elapsed();
        let timeout = tick_duration.saturating_sub(elapsed);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        app.paused = !app.paused;
                        last_tick = Instant::now();
                    }
                    KeyCode::Right => {
                        app.seek_to(app.position + 1);
                    }
                    KeyCode::Left => {
                        app.seek_to(app.position.saturating_sub(1));
                    }
                    KeyCode::Up => {
                        app.speed_ms = app.speed_ms.saturating_sub(10).max(5);
                    }
                    KeyCode::Down => {
                        app.speed_ms += 10;
                    }
                    KeyCode::Home => {
                        app.seek_to(0);
                    }
                    KeyCode::End => {
                        let total = app.total();
                        app.seek_to(total);
                    }
                    _ => {}
                }
            }
        } else if !app.paused {
            if last_tick.elapsed() >= tick_duration {
                app.advance();
                last_tick = Instant::now();

                if app.is_done() {
                    terminal.draw(|frame| renderer::render(frame, &app))?;
                    app.paused = true;
                }
            }
        }
    }

    Ok(app)
}
