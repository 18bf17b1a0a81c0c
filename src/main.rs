use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use mailsmith::App;
use mailsmith::assistant::ConversationStore;
use mailsmith::assistant::engine;
use mailsmith::assistant::worker::spawn_worker;
use mailsmith::config::{self, Config, ConfigResult};
use mailsmith::template::{EmailTemplate, TemplateEditor};

/// How often `--ask` checks for the reply
const ASK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Terminal email template builder with an AI assistant
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build email templates in the terminal with an AI assistant that suggests content blocks"
)]
struct Args {
    /// Template JSON file (if not provided, starts an empty template)
    template: Option<PathBuf>,

    /// Config file (defaults to ~/.config/mailsmith/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ask the assistant once, print the reply as JSON and exit
    #[arg(long, value_name = "UTTERANCE")]
    ask: Option<String>,
}

fn main() -> Result<()> {
    #[cfg(debug_assertions)]
    init_logging()?;

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    // Fail on a bad template before the terminal is touched
    let editor = match &args.template {
        Some(path) => TemplateEditor::load(path)?,
        None => TemplateEditor::new(EmailTemplate::untitled()),
    };

    if let Some(utterance) = args.ask {
        if let Some(warning) = &config_result.warning {
            eprintln!("Warning: {}", warning);
        }
        return ask(&utterance, &config_result.config);
    }

    let terminal = init_terminal()?;
    let result = run(terminal, App::new(editor), config_result);
    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    println!("{}", app.editor().to_json()?);

    #[cfg(debug_assertions)]
    log::debug!("=== MAILSMITH DEBUG SESSION ENDED ===");

    Ok(())
}

/// Writes to /tmp/mailsmith-debug.log at DEBUG level
#[cfg(debug_assertions)]
fn init_logging() -> Result<()> {
    use std::io::Write;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/mailsmith-debug.log")?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== MAILSMITH DEBUG SESSION STARTED ===");
    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, config_result: ConfigResult) -> Result<App> {
    if let Some(warning) = config_result.warning {
        app.notification.show_warning(&warning);
    }

    if let Some(warning) = setup_worker(app.panel.store_mut(), &config_result.config) {
        app.notification.show_warning(&warning);
    }

    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Build the configured engine and attach a worker to the store
///
/// The worker is started even when the engine is misconfigured so every
/// submission still resolves, with a failure reply. Returns the configuration
/// problem, if any, for the caller to surface.
fn setup_worker(store: &mut ConversationStore, config: &Config) -> Option<String> {
    let engine = engine::from_config(&config.assistant);
    let config_error = engine.as_ref().err().map(|e| e.to_string());
    if let Some(message) = &config_error {
        log::warn!("Suggestion engine unavailable: {}", message);
    }

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    store.set_channels(request_tx, response_rx);
    spawn_worker(engine, config.assistant.timeout(), request_rx, response_tx);

    config_error
}

/// Non-interactive mode: one utterance, reply printed as JSON
fn ask(utterance: &str, config: &Config) -> Result<()> {
    let mut store = ConversationStore::new();
    if let Some(warning) = setup_worker(&mut store, config) {
        eprintln!("Warning: {}", warning);
    }

    if !store.submit(utterance) {
        return Err(color_eyre::eyre::eyre!("Nothing to ask: the utterance is blank"));
    }
    while store.is_generating() {
        store.poll();
        std::thread::sleep(ASK_POLL_INTERVAL);
    }

    let reply = store
        .messages()
        .last()
        .ok_or_else(|| color_eyre::eyre::eyre!("Conversation is empty"))?;
    let output = serde_json::json!({
        "text": reply.content,
        "blocks": reply.suggestions.blocks(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
