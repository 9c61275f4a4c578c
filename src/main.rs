//! Binary entry point: wiring, terminal lifecycle, event loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use zenalyze::adapters::ReqwestHttpClient;
use zenalyze::app::{spawn_chat_worker, App, AppMessage};
use zenalyze::auth::SessionStore;
use zenalyze::chat::ChatClient;
use zenalyze::config::BackendConfig;
use zenalyze::store::StoreClient;
use zenalyze::traits::{HttpClient, SessionProvider};
use zenalyze::ui;

/// Redraw/animation cadence while idle.
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    setup_panic_hook();
    init_tracing()?;

    let config = BackendConfig::load().wrap_err("loading backend configuration")?;
    let session = SessionStore::new().load();

    // The chat function accepts the publishable key as bearer for
    // anonymous use; signed-in users send their own token.
    let bearer = session
        .bearer_token()
        .unwrap_or_else(|| config.publishable_key.clone());

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let chat_client = ChatClient::from_config(http.clone(), &config);
    let store = StoreClient::new(http, &config);

    let (msg_tx, msg_rx) = mpsc::unbounded_channel::<AppMessage>();
    let chat_tx = spawn_chat_worker(
        chat_client,
        bearer,
        store.clone(),
        session.clone(),
        msg_tx.clone(),
    );

    let mut app = App::new(chat_tx, msg_tx, store, session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, msg_rx).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut msg_rx: mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    B::Error: Send + Sync + 'static,
{
    let mut events = EventStream::new();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "terminal event stream failed");
                        break;
                    }
                    None => break,
                }
            }
            message = msg_rx.recv() => {
                match message {
                    Some(message) => app.handle_message(message),
                    None => break,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Log to a file under the config dir; the terminal belongs to the TUI.
fn init_tracing() -> Result<()> {
    let log_dir = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("zenalyze");
    std::fs::create_dir_all(&log_dir).wrap_err("creating log directory")?;
    let log_file = std::fs::File::create(log_dir.join("zenalyze.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn restore_terminal<B>(terminal: &mut Terminal<B>) -> Result<()>
where
    B: ratatui::backend::Backend + io::Write,
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
