use std::{
    fs::File,
    io::stdout,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use tstack::constants::INPUT_POLL;
use tstack::input::{handle_key, Input};
use tstack::ui::ui;
use tstack::{Args, Driver, Game, HighScore};

fn init_logging(args: &Args) -> anyhow::Result<()> {
    // The terminal belongs to the game, so logs only go to a file
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let config = args.game_config().context("invalid game settings")?;

    let mut high_score = match &args.score_file {
        Some(path) => HighScore::load(path)?,
        None => HighScore::in_memory(),
    };

    // Setup terminal
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut driver = Driver::new(Game::new(config));
    driver.start(Instant::now());
    info!("tstack running");

    let result = run(&mut terminal, &mut driver, &mut high_score);

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    driver: &mut Driver,
    high_score: &mut HighScore,
) -> anyhow::Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui(f, driver, high_score.best(), now))?;

        if event::poll(Duration::from_millis(INPUT_POLL))? {
            if let Event::Key(key) = event::read()? {
                match handle_key(key) {
                    Some(Input::Quit) => break,
                    Some(Input::Command(command)) => {
                        driver.apply(command, Instant::now());
                    }
                    None => {}
                }
            }
        }

        driver.update(Instant::now());

        if driver.game().score() > high_score.best() {
            if let Err(err) = high_score.record(driver.game().score()) {
                warn!(error = %err, "high score not saved");
            }
        }
    }

    Ok(())
}
