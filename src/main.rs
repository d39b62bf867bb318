use std::io;
use std::io::Stdout;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use gridlife::config::Config;
use gridlife::events::AppEvent;
use gridlife::events::Event;
use gridlife::io::convert_event;
use gridlife::life::Life;
use gridlife::render::Canvas;
use gridlife::seed::SelectionState;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_millis((1_000 / FRAMERATE) as u64);

const HELP: &str = "click: pick  enter: confirm  right click: confirm & start  space: start  \
                    r: random  g: gridlines  s: shape  q: quit";

fn main() -> anyhow::Result<()> {
    // stdout belongs to the grid, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let mut life = Life::from_config(&config).context("Failed to create the grid")?;
    let mut canvas = Canvas::new(config.width, config.height, config.style);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut stdout, &mut life, &mut canvas, &config);

    execute!(
        stdout,
        cursor::Show,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(
    stdout: &mut Stdout,
    life: &mut Life,
    canvas: &mut Canvas,
    config: &Config,
) -> anyhow::Result<()> {
    let tick = config.tick_interval();

    // When the next generation is due. The first one waits a full interval so the seed stays on
    // screen for a frame.
    let mut next_tick: Option<Instant> = None;
    let mut message: Option<String> = None;

    loop {
        draw(stdout, life, canvas, message.as_deref())?;

        let timeout = next_tick
            .map(|t| t.saturating_duration_since(Instant::now()).min(FRAMETIME))
            .unwrap_or(FRAMETIME);

        if event::poll(timeout)? {
            match convert_event(event::read()?, canvas) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => break,
                Some(Event::AppEvent(AppEvent::ToggleGridlines)) => canvas.toggle_gridlines(),
                Some(Event::AppEvent(AppEvent::ToggleShape)) => canvas.toggle_shape(),
                Some(Event::AppEvent(AppEvent::Resize { .. })) => {
                    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                Some(Event::SeedEvent(event)) => match life.handle(event) {
                    Ok(()) => message = None,
                    Err(e) if e.is_recoverable() => {
                        warn!(?event, "{e}");
                        message = Some(e.to_string());
                    }
                    Err(e) => return Err(e).context("Failed to handle input"),
                },
            }
        }

        if life.state() == SelectionState::Running {
            let now = Instant::now();

            match next_tick {
                None => next_tick = Some(now + tick),
                Some(t) if now >= t => {
                    life.on_tick().context("Failed to advance a generation")?;
                    next_tick = Some(now + tick);
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

fn draw(
    stdout: &mut Stdout,
    life: &Life,
    canvas: &mut Canvas,
    message: Option<&str>,
) -> io::Result<()> {
    let status = format!(
        "{} | {} | generation {} | population {} | picked {}",
        life.state(),
        life.rules(),
        life.generation(),
        life.grid().population(),
        life.selected().len(),
    );

    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in canvas.render(life.grid()).lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::FromCursorDown),
        style::Print(status),
        cursor::MoveToNextLine(1),
        style::Print(message.unwrap_or(HELP)),
    )?;

    io::Write::flush(stdout)
}
