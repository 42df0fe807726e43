mod app;
mod card;
mod catalog;
mod cli;
mod config;
mod error;
mod export;
mod filter;
mod i18n;
mod logging;
mod models;
mod selection;
mod state;
mod theme;
mod ui;
mod utils;
mod watcher;

use std::io::{self, stdout};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::prelude::*;

use crate::app::App;
use crate::catalog::{
    BuiltinCatalog, CatalogProvider, DirectoryCatalog, languages_with_mismatched_ids,
};
use crate::cli::{Cli, Command, VERSION, run_export, run_list};
use crate::config::{Settings, load_file_config};
use crate::export::{DirectorySink, Exporter, ResvgRasterizer};
use crate::i18n::Translations;
use crate::state::AppState;
use crate::watcher::setup_catalog_watcher;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let file_config = load_file_config(cli.config.as_deref())?;
    let settings = Settings::resolve(file_config, cli.overrides())?;
    logging::init(&config::data_dir(), settings.log_level)?;
    info!("rhetoric-cards {} starting", VERSION);

    let provider: Arc<dyn CatalogProvider> = match &settings.catalog_dir {
        Some(dir) => Arc::new(DirectoryCatalog::new(dir)),
        None => Arc::new(BuiltinCatalog),
    };
    let mismatched = languages_with_mismatched_ids(provider.as_ref());
    if !mismatched.is_empty() {
        warn!(
            "Activity ids differ from the English catalog for {:?}; selections may not carry over",
            mismatched
        );
    }

    let state = AppState::new(provider, Translations::builtin()?, settings.language)?;

    match cli.command {
        Some(Command::List { filters }) => {
            run_list(state, &filters);
            Ok(())
        }
        Some(Command::Export {
            filters,
            ids,
            all,
            yes,
        }) => {
            let runtime = tokio::runtime::Runtime::new()?;
            let saved = runtime.block_on(run_export(
                state,
                build_exporter(&settings),
                settings.throttle,
                &filters,
                &ids,
                all,
                yes,
            ))?;
            info!("Headless export saved {} cards", saved);
            Ok(())
        }
        None => {
            let runtime = tokio::runtime::Runtime::new()?;
            let _guard = runtime.enter();
            run_tui(state, &settings)
        }
    }
}

fn build_exporter(settings: &Settings) -> Arc<Exporter> {
    Arc::new(Exporter::new(
        Arc::new(ResvgRasterizer::new(settings.catalog_dir.clone())),
        Arc::new(DirectorySink::new(&settings.output_dir)),
        settings.raster.clone(),
        settings.jpeg_quality,
    ))
}

fn run_tui(state: AppState, settings: &Settings) -> error::Result<()> {
    let mut app = App::new(
        state,
        build_exporter(settings),
        settings.throttle,
        settings.output_dir.clone(),
    );

    // Dropping the watcher stops it, so keep it alive for the session
    let reload_flag = app.catalog_needs_reload.clone();
    let _watcher = settings
        .catalog_dir
        .clone()
        .and_then(|dir| setup_catalog_watcher(dir, reload_flag));

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!(
        "Session ended: {} generated, {} downloaded",
        app.state.generated().len(),
        app.state.download_count()
    );
    Ok(result?)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while !app.should_quit {
        app.reload_catalog_if_needed();
        app.poll_exports();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
