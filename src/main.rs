mod app;
mod cli;
mod ui;

use ocean_tasks::api;
use ocean_tasks::clipboard;
use ocean_tasks::config;
use ocean_tasks::storage;
use ocean_tasks::task;
use ocean_tasks::utils;

use anyhow::{Result, anyhow};
use api::{HttpTaskStore, ServiceConfig, TaskDraft, TaskStore};
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::fs;
use std::io::Write;
use std::panic;
use std::sync::Arc;
use storage::ListCache;
use ui::theme::Theme;
use utils::paths::{get_crash_log_path, get_logs_dir};

/// Install a panic hook that writes crash information to a log file
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut crash_report = format!("=== CRASH at {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }

            crash_report.push_str(&format!(
                "\nBacktrace:\n{}\n",
                std::backtrace::Backtrace::force_capture()
            ));
            crash_report.push('\n');

            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs are written to ~/.ocean-tasks/logs/otask.log
/// Use `tail -f ~/.ocean-tasks/logs/otask.log` to follow logs.
///
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = match get_logs_dir() {
        Ok(dir) => dir,
        Err(_) => return None,
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "otask.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    // Install crash handler first thing
    install_crash_handler();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Add { title, description }) => handle_add(title, description),
        Some(Commands::List) => handle_list(),
        None => run_tui_mode(config),
    }
}

fn connect_store() -> Result<HttpTaskStore> {
    let service = ServiceConfig::from_env()?;
    HttpTaskStore::new(&service).map_err(|e| anyhow!("{e}"))
}

fn handle_add(title: String, description: Option<String>) -> Result<()> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(anyhow!("Task title cannot be empty"));
    }
    let description = description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let store = connect_store()?;
    let created = store
        .create(&TaskDraft { title, description })
        .map_err(|e| anyhow!("{e}"))?;

    println!("✓ Task added ({})", created.id);

    Ok(())
}

fn handle_list() -> Result<()> {
    let store = connect_store()?;
    let tasks = store.list().map_err(|e| anyhow!("{e}"))?;

    if tasks.is_empty() {
        println!("No tasks yet!");
        return Ok(());
    }

    println!("\n📋 Ocean Tasks\n");
    for (idx, item) in tasks.iter().enumerate() {
        let marker = if item.completed { "[x]" } else { "[ ]" };
        println!("{}. {} {}", idx + 1, marker, item.title);
        if let Some(description) = &item.description {
            println!("      {description}");
        }
    }
    println!();

    Ok(())
}

fn run_tui_mode(config: Config) -> Result<()> {
    // Guard must be kept alive for the duration of the app
    let _log_guard = init_file_logging();

    tracing::info!("otask starting");

    let service = ServiceConfig::from_env()?;
    let store: Arc<dyn TaskStore> =
        Arc::new(HttpTaskStore::new(&service).map_err(|e| anyhow!("{e}"))?);

    let cache = match ListCache::open() {
        Ok(cache) => Some(cache),
        Err(e) => {
            tracing::warn!("task cache unavailable: {e}");
            None
        }
    };

    let theme = Theme::from_config(&config);

    // Show the last fetched list immediately, then fetch in the background.
    let mut controller = app::TaskController::new(store, cache);
    controller.seed_from_cache();
    controller.load();

    let state = app::AppState::new(controller, theme, config.tick_rate_ms);
    ui::run_tui(state)?;

    tracing::info!("otask exiting gracefully");

    Ok(())
}
