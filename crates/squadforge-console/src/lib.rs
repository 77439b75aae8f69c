//! Colorful console output for allocation runs.
//!
//! Provides a custom `tracing` layer that formats controller and allocator
//! events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Request lifecycle (solve start/end, repair)
//! - **DEBUG**: Allocation passes, validation results, skipped hints
//! - **TRACE**: Individual candidate rejections

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};


static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Targets whose events the console layer renders.
const TARGETS: [&str; 2] = ["squadforge_solver", "squadforge::"];

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the SquadForge banner and sets up tracing. `RUST_LOG` overrides
/// the default `info` level for the engine crates.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
            for directive in ["squadforge_solver=info", "squadforge=info"] {
                if let Ok(directive) = directive.parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SquadConsoleLayer)
            .try_init();
    });
}

// Marks the start of a request for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the request started.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____                        _ _____
/ ___|  __ _ _   _  __ _  __| |  ___|__  _ __ __ _  ___
\___ \ / _` | | | |/ _` |/ _` | |_ / _ \| '__/ _` |/ _ \
 ___) | (_| | |_| | (_| | (_| |  _| (_) | | | (_| |  __/
|____/ \__, |\__,_|\__,_|\__,_|_|  \___/|_|  \__, |\___|
          |_|                                |___/
"#;

    let version_line = format!(
        "                 v{} - Constrained Squad Allocation\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats allocation events with colors.
pub struct SquadConsoleLayer;

impl<S: Subscriber> Layer<S> for SquadConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !TARGETS.iter().any(|prefix| target.starts_with(prefix)) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    pass: Option<String>,
    resolution: Option<String>,
    budget: Option<String>,
    total_cost: Option<String>,
    remaining_budget: Option<String>,
    hint: Option<String>,
    outcome: Option<String>,
    item: Option<String>,
    reason: Option<String>,
    pool_size: Option<u64>,
    target_size: Option<u64>,
    squad_size: Option<u64>,
    hint_count: Option<u64>,
    picks: Option<u64>,
    unmet: Option<u64>,
    violations: Option<u64>,
    allocations: Option<u64>,
    duration_ms: Option<u64>,
    fallback: Option<bool>,
    revalidate: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "budget" => self.budget = Some(s),
            "total_cost" => self.total_cost = Some(s),
            "remaining_budget" => self.remaining_budget = Some(s),
            "outcome" => self.outcome = Some(s),
            "item" => self.item = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "pool_size" => self.pool_size = Some(value),
            "target_size" => self.target_size = Some(value),
            "squad_size" => self.squad_size = Some(value),
            "hint_count" => self.hint_count = Some(value),
            "picks" => self.picks = Some(value),
            "unmet" => self.unmet = Some(value),
            "violations" => self.violations = Some(value),
            "allocations" => self.allocations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "fallback" => self.fallback = Some(value),
            "revalidate" => self.revalidate = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "pass" => self.pass = Some(value.to_string()),
            "resolution" => self.resolution = Some(value.to_string()),
            "hint" => self.hint = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "repair_start" => format_repair_start(v),
        "allocate_end" => format_allocate_end(v),
        "pass_end" => format_pass_end(v),
        "validate_end" => format_validate_end(v),
        "hint_skipped" => format_hint_skipped(v),
        "candidate_rejected" => format_rejection(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let budget = v.budget.as_deref().unwrap_or("N/A");

    let mut output = format!(
        "{} {} Allocating │ {} candidates │ {} slots │ budget {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.pool_size).bright_yellow(),
        count(v.target_size).bright_yellow(),
        budget.bright_magenta()
    );

    if let Some(hints) = v.hint_count.filter(|&n| n > 0) {
        output.push_str(&format!(
            " │ {} hints",
            hints.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_repair_start(v: &EventVisitor) -> String {
    let mode = if v.revalidate.unwrap_or(true) {
        "revalidating"
    } else {
        "forced"
    };
    format!(
        "{} {} Repairing │ {} violations │ {}",
        format_elapsed(),
        "↻".bright_yellow().bold(),
        count(v.violations).bright_red(),
        mode.white()
    )
}

fn format_allocate_end(v: &EventVisitor) -> String {
    let cost = v.total_cost.as_deref().unwrap_or("N/A");
    let unmet = v.unmet.unwrap_or(0);

    let mut output = format!(
        "{} {} Allocation │ {}/{} placed │ cost {} │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        count(v.squad_size).white().bold(),
        count(v.target_size).white(),
        cost.bright_magenta(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    if unmet > 0 {
        output.push_str(&format!(
            " │ {} categories short",
            unmet.to_formatted_string(&Locale::en).bright_red()
        ));
    }
    if v.fallback.unwrap_or(false) {
        output.push_str(&format!(" │ {}", "fallback".yellow()));
    }

    output
}

fn format_pass_end(v: &EventVisitor) -> String {
    let pass = v.pass.as_deref().unwrap_or("unknown");
    let remaining = v.remaining_budget.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {} pass │ {} picks │ {} left",
        format_elapsed(),
        "·".bright_blue(),
        pass.white().bold(),
        count(v.picks).white(),
        remaining.bright_magenta()
    )
}

fn format_validate_end(v: &EventVisitor) -> String {
    let violations = v.violations.unwrap_or(0);
    let verdict = if violations == 0 {
        "valid".bright_green().bold().to_string()
    } else {
        format!(
            "{} violations",
            violations.to_formatted_string(&Locale::en)
        )
        .bright_red()
        .bold()
        .to_string()
    };

    format!(
        "{} {} Validated │ {} items │ {}",
        format_elapsed(),
        "✓".bright_blue(),
        count(v.squad_size).white(),
        verdict
    )
}

fn format_hint_skipped(v: &EventVisitor) -> String {
    let hint = v.hint.as_deref().unwrap_or("");
    let outcome = v.outcome.as_deref().unwrap_or("skipped");

    format!(
        "{} {} Hint {:?} │ {}",
        format_elapsed(),
        "✗".yellow(),
        hint,
        outcome.bright_black()
    )
}

fn format_rejection(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} {} │ {} │ {}",
        format_elapsed(),
        "✗".bright_red(),
        v.pass.as_deref().unwrap_or("").bright_black(),
        v.item.as_deref().unwrap_or("").bright_black(),
        v.reason.as_deref().unwrap_or("").bright_black()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let resolution = v.resolution.as_deref().unwrap_or("unknown");
    let cost = v.total_cost.as_deref().unwrap_or("N/A");
    let violations = v.violations.unwrap_or(0);
    let is_valid = violations == 0;

    let status = format_resolution(resolution, is_valid);

    let mut output = format!(
        "{} {} Allocation complete │ {} items │ cost {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.squad_size).white().bold(),
        cost.bright_magenta(),
        status
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let status_text = match resolution {
        "accepted" => "VALID SQUAD ON FIRST ATTEMPT",
        "repaired" => "VALID SQUAD AFTER REPAIR",
        "forced" => "REPAIRED SQUAD ACCEPTED UNCHECKED",
        _ => "CONSTRAINTS VIOLATED",
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if is_valid {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    for (label, value) in [
        ("Total cost:", cost.to_string()),
        ("Violations:", violations.to_formatted_string(&Locale::en)),
        ("Allocations:", count(v.allocations)),
        (
            "Duration:",
            format_duration_ms(v.duration_ms.unwrap_or(0)),
        ),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_resolution(resolution: &str, is_valid: bool) -> String {
    let upper = resolution.to_uppercase();
    match resolution {
        "forced" => upper.yellow().bold().to_string(),
        _ if is_valid => upper.bright_green().bold().to_string(),
        _ => upper.bright_red().bold().to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
