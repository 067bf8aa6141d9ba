use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};
use scopeguard::defer;
use tracing::{Level, info};
use tvfocus::{Config, event::key::codes};
use tvfocus_examples::storefront::App;

/// Drive the storefront demo with the arrow keys, Enter and Escape.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Load engine configuration from a TOML file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Run a comma separated list of keys (up, down, left, right, enter,
    /// back, wait) and print each frame instead of reading the terminal
    #[clap(short, long)]
    script: Option<String>,

    /// Write logs to this file. In script mode logs go to stderr.
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Log at debug level
    #[clap(short, long)]
    verbose: bool,
}

/// Map a script word to a key code. `None` means "let time pass".
fn script_key(word: &str) -> Result<Option<u32>> {
    Ok(Some(match word {
        "up" => codes::UP,
        "down" => codes::DOWN,
        "left" => codes::LEFT,
        "right" => codes::RIGHT,
        "enter" => codes::ENTER,
        "back" => codes::ESCAPE,
        "wait" => return Ok(None),
        other => bail!("unknown script key: {other}"),
    }))
}

/// Map a terminal key to the code a TV remote would send.
fn terminal_key(code: KeyCode) -> Option<u32> {
    Some(match code {
        KeyCode::Up => codes::UP,
        KeyCode::Down => codes::DOWN,
        KeyCode::Left => codes::LEFT,
        KeyCode::Right => codes::RIGHT,
        KeyCode::Enter => codes::ENTER,
        KeyCode::Char(' ') => codes::SPACE,
        KeyCode::Esc => codes::ESCAPE,
        KeyCode::Backspace => codes::BACKSPACE,
        _ => return None,
    })
}

/// Write one rendered frame.
fn print_frame(out: &mut impl Write, app: &App) -> io::Result<()> {
    for line in app.render() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Replay a script against a simulated clock.
fn run_script(mut app: App, script: &str) -> Result<()> {
    let mut now = Instant::now();
    app.start(now);
    let mut out = io::stdout().lock();
    print_frame(&mut out, &app)?;
    for word in script.split(',').map(str::trim).filter(|w| !w.is_empty()) {
        match script_key(word)? {
            Some(code) => {
                app.key(code, now)?;
                now += Duration::from_millis(50);
            }
            None => now += Duration::from_millis(3500),
        }
        app.tick(now)?;
        writeln!(out, "--- {word}")?;
        print_frame(&mut out, &app)?;
    }
    Ok(())
}

/// Run interactively until `q` is pressed.
fn run_terminal(mut app: App) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        #[allow(unused_must_use)]
        {
            let mut stdout = io::stdout();
            execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
            terminal::disable_raw_mode();
        }
    }

    app.start(Instant::now());
    loop {
        execute!(out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
        for line in app.render() {
            write!(out, "{line}\r\n")?;
        }
        out.flush()?;

        let wait = app
            .next_wait(Instant::now())
            .unwrap_or(Duration::from_millis(500));
        if event::poll(wait)?
            && let Event::Key(k) = event::read()?
            && k.kind == KeyEventKind::Press
        {
            if k.code == KeyCode::Char('q') {
                break;
            }
            if let Some(code) = terminal_key(k.code) {
                app.key(code, Instant::now())?;
            }
        }
        app.tick(Instant::now())?;
    }
    app.session.shutdown();
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_ansi(false);
    match (&args.log, &args.script) {
        (Some(path), _) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        (None, Some(_)) => builder.with_writer(io::stderr).init(),
        (None, None) => {}
    }

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let app = App::new(config)?;
    info!("storefront starting");
    match &args.script {
        Some(script) => run_script(app, script),
        None => run_terminal(app),
    }
}
