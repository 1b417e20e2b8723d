use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use midnight_ace::commentary::PhraseBook;
use midnight_ace::Table;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::time::{Duration, Instant};
use std::{error::Error, io};

mod app;
use app::App;

mod cli;
use cli::Cli;

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_buffer = TuiLogger::install(cli.log_level)?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Shoe seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let commentator = PhraseBook::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    let table = Table::new(cli.table_config(), &mut rng)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let app = App::new(
        table,
        rng,
        commentator,
        Duration::from_millis(cli.pace_ms),
        log_buffer,
    );
    let res = run_app(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.sync_logs();
        app.advance_frames(Instant::now());
        app.poll_commentary().await;

        terminal.draw(|f| ui::ui(f, &app))?;

        // Use poll with timeout so paced frames keep moving without input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            app.abort_tasks();
            return Ok(());
        }
    }
}
