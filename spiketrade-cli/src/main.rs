//! SpikeTrade CLI: score bar files, inspect config, and keep the trade journal.
//!
//! Commands:
//! - `signals`: compute indicators and composite signals for one or more bar CSVs
//! - `snapshot`: latest-bar reading (price, RSI zone, MACD bias, EMA trend)
//! - `config show|check|init`: print, validate, or write a strategy config
//! - `session`: US equity session for a timestamp
//! - `journal add|list|stats|symbols`: manual trade journal

mod bars;
mod logging;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::America::New_York;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use spiketrade_core::domain::{NewTrade, TradeSide, TradeStatus};
use spiketrade_core::engine::MarketSnapshot;
use spiketrade_core::journal::{
    cumulative_pnl, filtered_summary, recent, symbol_summary, JournalStore, PerformanceMetrics,
    TradeFilter,
};
use spiketrade_core::session::{session_label, MarketSession};
use spiketrade_core::{calculate_signals, SignalFrame, StrategyConfig};

use crate::bars::{load_bars, parse_timestamp};

#[derive(Parser)]
#[command(
    name = "spiketrade",
    about = "SpikeTrade CLI: penny-stock spike signals and trade journal"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute signals for one or more bar CSV files (processed in parallel).
    Signals {
        /// Bar files with columns timestamp,open,high,low,close,volume.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Strategy config TOML. Defaults to the calibrated settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print every bar instead of only signalled bars.
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Print each frame as one JSON line: {"file": ..., "frame": ...}.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the latest-bar market reading for a bar file.
    Snapshot {
        file: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Strategy config commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Classify a timestamp into a US equity session. Defaults to the current New York time.
    Session {
        /// Exchange-local time, e.g. "2024-01-02 09:45:00".
        #[arg(long)]
        at: Option<String>,
    },
    /// Trade journal commands.
    Journal {
        /// Journal JSON file.
        #[arg(long, default_value = "trades.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: JournalAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a config as TOML (defaults when no path is given).
    Show { path: Option<PathBuf> },
    /// Validate a config file and print its fingerprint.
    Check { path: PathBuf },
    /// Write the default config to a file.
    Init {
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// Record a trade.
    Add {
        #[arg(long)]
        symbol: String,

        #[arg(long, value_enum, default_value_t = SideArg::Buy)]
        side: SideArg,

        /// Defaults to closed when an exit price is given, otherwise open.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[arg(long)]
        entry: f64,

        #[arg(long)]
        exit: Option<f64>,

        /// Entry time. Defaults to the current New York time.
        #[arg(long)]
        entry_time: Option<String>,

        #[arg(long)]
        exit_time: Option<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List trades, newest first.
    List {
        /// Only these symbols.
        #[arg(long)]
        symbol: Vec<String>,

        #[arg(long, value_enum)]
        status: Vec<StatusArg>,

        /// Only trades entered at or after this time.
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Performance metrics and cumulative P&L.
    Stats,
    /// P&L per symbol.
    Symbols,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Open,
    Closed,
}

impl From<SideArg> for TradeSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => TradeSide::Buy,
            SideArg::Sell => TradeSide::Sell,
        }
    }
}

impl From<StatusArg> for TradeStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Open => TradeStatus::Open,
            StatusArg::Closed => TradeStatus::Closed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Signals {
            files,
            config,
            all,
            json,
        } => run_signals(&files, config.as_deref(), all, json),
        Commands::Snapshot { file, config, json } => run_snapshot(&file, config.as_deref(), json),
        Commands::Config { action } => match action {
            ConfigAction::Show { path } => run_config_show(path.as_deref()),
            ConfigAction::Check { path } => run_config_check(&path),
            ConfigAction::Init { path, force } => run_config_init(&path, force),
        },
        Commands::Session { at } => run_session(at.as_deref()),
        Commands::Journal { file, action } => {
            let store = JournalStore::new(file);
            match action {
                JournalAction::Add {
                    symbol,
                    side,
                    status,
                    entry,
                    exit,
                    entry_time,
                    exit_time,
                    notes,
                } => {
                    let status = status.map(TradeStatus::from).unwrap_or(if exit.is_some() {
                        TradeStatus::Closed
                    } else {
                        TradeStatus::Open
                    });
                    let input = NewTrade {
                        symbol,
                        side: side.into(),
                        status,
                        entry_price: entry,
                        exit_price: exit,
                        entry_time: entry_time
                            .as_deref()
                            .map(parse_timestamp)
                            .transpose()?
                            .unwrap_or_else(now),
                        exit_time: exit_time.as_deref().map(parse_timestamp).transpose()?,
                        notes,
                    };
                    run_journal_add(&store, input)
                }
                JournalAction::List {
                    symbol,
                    status,
                    from,
                    limit,
                } => {
                    let filter = TradeFilter {
                        symbols: symbol,
                        statuses: status.into_iter().map(TradeStatus::from).collect(),
                        from: from.as_deref().map(parse_timestamp).transpose()?,
                    };
                    run_journal_list(&store, &filter, limit)
                }
                JournalAction::Stats => run_journal_stats(&store),
                JournalAction::Symbols => run_journal_symbols(&store),
            }
        }
    }
}

/// Exchange wall-clock time for a UTC instant.
fn exchange_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&New_York).naive_local()
}

fn now() -> NaiveDateTime {
    exchange_time(Utc::now())
}

fn load_config(path: Option<&Path>) -> Result<StrategyConfig> {
    match path {
        Some(path) => StrategyConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(StrategyConfig::default()),
    }
}

fn compute_frame(path: &Path, config: &StrategyConfig) -> Result<SignalFrame> {
    let bars = load_bars(path)?;
    calculate_signals(&bars, config).with_context(|| format!("score {}", path.display()))
}

// ── signals ──────────────────────────────────────────────────────────

fn run_signals(files: &[PathBuf], config_path: Option<&Path>, all: bool, json: bool) -> Result<()> {
    let config = load_config(config_path)?;

    let results: Vec<(&PathBuf, Result<SignalFrame>)> = files
        .par_iter()
        .map(|path| (path, compute_frame(path, &config)))
        .collect();

    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(frame) => {
                info!(
                    file = %path.display(),
                    bars = frame.len(),
                    signals = frame.signal_count(),
                    "scored bar file"
                );
                if json {
                    println!("{}", json_line(path, &frame)?);
                } else {
                    print_frame(path, &frame, &config, all);
                }
            }
            Err(err) => {
                warn!(file = %path.display(), "{err:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", files.len());
    }
    Ok(())
}

#[derive(Serialize)]
struct FileFrame<'a> {
    file: String,
    frame: &'a SignalFrame,
}

fn json_line(path: &Path, frame: &SignalFrame) -> Result<String> {
    let line = FileFrame {
        file: path.display().to_string(),
        frame,
    };
    Ok(serde_json::to_string(&line)?)
}

fn print_frame(path: &Path, frame: &SignalFrame, config: &StrategyConfig, all: bool) {
    println!();
    println!("=== {} ===", path.display());
    println!(
        "Bars:           {} ({} warmup)",
        frame.len(),
        config.warmup_bars().min(frame.len())
    );
    println!("Signals:        {}", frame.signal_count());
    println!("Config:         {}", &frame.config_fingerprint[..12]);
    println!();
    println!(
        "{:<19} {:>9} {:>7} {:>6} {:<16} {:>4} {:>9} {:>9}",
        "Time", "Close", "RSI", "Score", "Class", "Conf", "Stop", "Target"
    );
    println!("{}", "-".repeat(86));

    for row in frame.rows().iter().filter(|r| all || r.class.is_signal()) {
        println!(
            "{:<19} {:>9.4} {:>7} {:>6} {:<16} {:>4} {:>9} {:>9}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.close,
            fmt_opt(row.rsi, 1),
            fmt_opt(row.score, 3),
            row.class.to_string(),
            row.confirmations,
            fmt_opt(row.stop, 4),
            fmt_opt(row.target, 4),
        );
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

// ── snapshot ─────────────────────────────────────────────────────────

fn run_snapshot(path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let frame = compute_frame(path, &config)?;
    let Some(snap) = frame.snapshot() else {
        println!("No bars in {}", path.display());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print_snapshot(&snap);
    }
    Ok(())
}

fn print_snapshot(snap: &MarketSnapshot) {
    let label = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    println!();
    println!("=== Snapshot {} ===", snap.timestamp.format("%Y-%m-%d %H:%M"));
    println!("Session:        {}", snap.session);
    println!(
        "Price:          ${:.4} ({})",
        snap.price,
        snap.day_change_pct
            .map_or_else(|| "-".to_string(), |c| format!("{c:+.2}%"))
    );
    println!("Volume:         {}", snap.volume);
    println!(
        "RSI:            {} {}",
        fmt_opt(snap.rsi, 1),
        label(snap.rsi_zone.map(|z| z.to_string()))
    );
    println!("MACD:           {}", label(snap.macd_bias.map(|b| b.to_string())));
    println!("Trend:          {}", label(snap.ema_trend.map(|t| t.to_string())));
    println!(
        "Signal:         {} (score {}, {} confirmations)",
        snap.reading.class,
        fmt_opt(snap.reading.score, 3),
        snap.reading.confirmations
    );
    if let Some(levels) = snap.reading.levels {
        println!("Stop / Target:  {:.4} / {:.4}", levels.stop, levels.target);
        println!("Reward / Risk:  {}", fmt_opt(levels.reward_to_risk(), 2));
    }
    println!();
}

// ── config ───────────────────────────────────────────────────────────

fn run_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_config_check(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    println!("Config OK:      {}", path.display());
    println!("Fingerprint:    {}", config.fingerprint());
    println!("Longest period: {}", config.max_period());
    println!("Warmup bars:    {}", config.warmup_bars());
    println!("Weight total:   {:.2}", config.weights.total());
    Ok(())
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} exists; pass --force to overwrite", path.display());
    }
    let toml = StrategyConfig::default().to_toml()?;
    std::fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

// ── session ──────────────────────────────────────────────────────────

fn run_session(at: Option<&str>) -> Result<()> {
    let time = at.map(parse_timestamp).transpose()?.unwrap_or_else(now);
    let session = MarketSession::at(time);
    println!(
        "{}  {}{}",
        time.format("%Y-%m-%d %H:%M:%S"),
        session_label(time),
        if session.is_extended_hours() {
            " (extended hours)"
        } else {
            ""
        }
    );
    Ok(())
}

// ── journal ──────────────────────────────────────────────────────────

fn run_journal_add(store: &JournalStore, input: NewTrade) -> Result<()> {
    let record = store
        .append(input, now())
        .with_context(|| format!("record trade in {}", store.path().display()))?;
    println!(
        "Recorded #{} {} {} @ ${:.4} (P&L ${:.2}, {:.2}%)",
        record.id, record.side, record.symbol, record.entry_price, record.pnl, record.pnl_percent
    );
    Ok(())
}

fn run_journal_list(store: &JournalStore, filter: &TradeFilter, limit: Option<usize>) -> Result<()> {
    let trades = store.load()?;
    let mut matched = filter.apply(&trades);
    if matched.is_empty() {
        println!("No trades match the selected filters.");
        return Ok(());
    }
    let summary = filtered_summary(&matched);
    if let Some(limit) = limit {
        matched.truncate(limit);
    }

    println!(
        "{:<4} {:<8} {:<5} {:>10} {:>10} {:>9} {:>8} {:<7} {:<16}",
        "Id", "Symbol", "Type", "Entry", "Exit", "P&L", "P&L %", "Status", "Date"
    );
    println!("{}", "-".repeat(86));
    for t in &matched {
        println!(
            "{:<4} {:<8} {:<5} {:>10} {:>10} {:>9} {:>8} {:<7} {:<16}",
            t.id,
            t.symbol,
            t.side.to_string(),
            format!("${:.2}", t.entry_price),
            t.exit_price
                .map_or_else(|| "-".to_string(), |x| format!("${x:.2}")),
            format!("${:.2}", t.pnl),
            format!("{:.2}%", t.pnl_percent),
            t.status.to_string(),
            t.entry_time.format("%Y-%m-%d %H:%M"),
        );
    }
    println!();
    println!(
        "Trades: {}  Total P&L: ${:.2}  Win Rate: {:.1}%",
        summary.count, summary.total_pnl, summary.win_rate
    );
    Ok(())
}

fn run_journal_stats(store: &JournalStore) -> Result<()> {
    let trades = store.load()?;
    if trades.is_empty() {
        println!("No trades recorded yet.");
        return Ok(());
    }
    let m = PerformanceMetrics::compute(&trades);

    println!();
    println!("=== Journal Performance ===");
    println!("Trades:         {}", m.total_trades);
    println!("Wins / Losses:  {} / {}", m.winning_trades, m.losing_trades);
    println!("Win Rate:       {:.1}%", m.win_rate);
    println!("Total P&L:      ${:.2}", m.total_pnl);
    println!("Avg P&L:        ${:.2}", m.avg_pnl);
    println!("Best Trade:     ${:.2}", m.best_trade);
    println!("Worst Trade:    ${:.2}", m.worst_trade);
    println!(
        "Profit Factor:  {}",
        m.profit_factor
            .map_or_else(|| "N/A".to_string(), |pf| format!("{pf:.2}"))
    );

    println!();
    println!("--- Cumulative P&L ---");
    for (time, total) in cumulative_pnl(&trades) {
        println!("{}  ${total:.2}", time.format("%Y-%m-%d %H:%M"));
    }

    println!();
    println!("--- Recent ---");
    for t in recent(&trades, 15) {
        println!(
            "{:<8} {:<5} ${:>8.2} {}",
            t.symbol,
            t.side.to_string(),
            t.pnl,
            t.entry_time.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
    Ok(())
}

fn run_journal_symbols(store: &JournalStore) -> Result<()> {
    let trades = store.load()?;
    let summary = symbol_summary(&trades);
    if summary.is_empty() {
        println!("No trades recorded yet.");
        return Ok(());
    }
    println!("{:<8} {:>11} {:>7} {:>9}", "Symbol", "Total P&L", "Trades", "Avg P&L");
    println!("{}", "-".repeat(38));
    for s in &summary {
        println!(
            "{:<8} {:>11.2} {:>7} {:>9.2}",
            s.symbol, s.total_pnl, s.trades, s.avg_pnl
        );
    }
    Ok(())
}
