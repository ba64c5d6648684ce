use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use keycoach::analytics::LogSink;
use keycoach::config::load_config;
use keycoach::engine::engine_from_config;
use keycoach::entitlement::LocalQuota;
use keycoach::keyboard::{FieldMetadata, InputClass, SubmitAction};
use keycoach::{KeyboardSession, SessionSettings};

mod app;

use app::App;

/// How long to wait for a key before driving timers
const TICK_RATE: Duration = Duration::from_millis(50);

/// Type into a simulated chat field with reply suggestions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host application identifier, used for platform detection
    #[arg(long, default_value = "com.tinder.android")]
    app: String,

    /// Config file (default: <config dir>/keycoach/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input class declared by the field
    #[arg(long, value_enum, default_value_t = InputClassArg::Text)]
    input_class: InputClassArg,

    /// Submit action for the enter key
    #[arg(long, value_enum, default_value_t = SubmitArg::None)]
    submit: SubmitArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputClassArg {
    Text,
    Number,
    Phone,
}

impl From<InputClassArg> for InputClass {
    fn from(arg: InputClassArg) -> Self {
        match arg {
            InputClassArg::Text => InputClass::Text,
            InputClassArg::Number => InputClass::Number,
            InputClassArg::Phone => InputClass::Phone,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SubmitArg {
    None,
    Send,
    Search,
    Go,
}

impl From<SubmitArg> for SubmitAction {
    fn from(arg: SubmitArg) -> Self {
        match arg {
            SubmitArg::None => SubmitAction::None,
            SubmitArg::Send => SubmitAction::Send,
            SubmitArg::Search => SubmitAction::Search,
            SubmitArg::Go => SubmitAction::Go,
        }
    }
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    init_logging();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let engine = engine_from_config(&config.engine)?;
    let entitlements = Arc::new(LocalQuota::new(
        config.entitlements.tier,
        config.entitlements.daily_limit,
    ));
    let session = KeyboardSession::new(
        SessionSettings::from_config(&config),
        engine,
        entitlements,
        Arc::new(LogSink),
    );
    let metadata = FieldMetadata {
        input_class: args.input_class.into(),
        submit_action: args.submit.into(),
    };
    let app = App::new(session, metadata, &args.app)?;

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let result = run(terminal, app);
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(TICK_RATE)? {
            // Only process key press events (avoid duplicates)
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key);
                }
            }
        }

        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Write debug logs to `<cache dir>/keycoach/keycoach.log`
///
/// Never logs to the terminal, which is owned by the UI.
#[cfg(debug_assertions)]
fn init_logging() {
    use std::io::Write;

    let Some(dir) = dirs::cache_dir().map(|dir| dir.join("keycoach")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("keycoach.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("keycoach=debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

#[cfg(not(debug_assertions))]
fn init_logging() {}
