mod app;
mod calc;
mod config;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use calc::inputs::{self, SplitCount, TipPercentage};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "tipcalc")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "A terminal tip calculator: split the bill, slide the tip")]
struct Args {
    /// Calculate once for this bill amount and exit (no TUI)
    #[arg(short, long)]
    bill: Option<String>,

    /// Number of people splitting the bill (1-10)
    #[arg(short, long)]
    split: Option<u32>,

    /// Tip percentage (0-100)
    #[arg(short, long, allow_negative_numbers = true)]
    tip: Option<i32>,

    /// Print the one-shot result as JSON
    #[arg(long, requires = "bill")]
    json: bool,

    /// Use a config file other than ~/.config/tipcalc/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a config file with the current defaults and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so they stay off the TUI screen
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    if args.init_config {
        return write_config(&args, &config);
    }

    if let Some(bill) = &args.bill {
        return print_summary(bill, &args, &config);
    }

    run_tui(config)
}

fn write_config(args: &Args, config: &AppConfig) -> Result<()> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    config
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_summary(bill: &str, args: &Args, config: &AppConfig) -> Result<()> {
    println!("{}", render_summary(bill, args, config)?);
    Ok(())
}

/// One-shot result as text (or JSON with `--json`)
fn render_summary(bill: &str, args: &Args, config: &AppConfig) -> Result<String> {
    let bill_amount = inputs::parse_bill(bill)?;
    let split = args.split.map(SplitCount::new).unwrap_or_else(|| config.initial_split());
    let tip = args.tip.map(TipPercentage::new).unwrap_or_else(|| config.initial_tip());

    let summary = calc::calculate(bill_amount, split, tip)?;
    tracing::debug!(?summary, "One-shot calculation");

    if args.json {
        return Ok(serde_json::to_string(&summary)?);
    }

    let symbol = &config.currency_symbol;
    let tip_label = format!("Tip ({}%):", summary.tip_percentage);
    let lines = [
        format!("{:<18}{}", "Bill:", calc::format_amount(symbol, summary.bill_amount)),
        format!("{:<18}{}", tip_label, calc::format_amount(symbol, summary.tip_amount)),
        format!("{:<18}{}", "Split:", summary.split_count),
        format!("{:<18}{}", "Total per person:", calc::format_amount(symbol, summary.total_per_person)),
    ];
    Ok(lines.join("\n"))
}

fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.tick();
    }
}
