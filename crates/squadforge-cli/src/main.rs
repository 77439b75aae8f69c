mod input;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use squadforge::{
    Budget, Decimal, Engine, Operation, OperationOutput, ProposeRequest, Squad, SolveRequest,
    ValidateRequest,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "squadforge",
    version,
    about = "Greedy squad allocation with validation and a single repair."
)]
struct Cli {
    /// Print machine-readable JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Allocate, validate and repair at most once.
    Solve(AllocateArgs),
    /// Allocate once without validating.
    Propose(AllocateArgs),
    /// Validate an existing squad.
    Validate(ValidateArgs),
    /// Load a configuration file and print the resolved constraints.
    CheckConfig(CheckConfigArgs),
    /// Run a raw JSON request against a named operation.
    Dispatch(DispatchArgs),
}

#[derive(Debug, Parser)]
struct AllocateArgs {
    /// Pool file: a bootstrap document or a JSON array of items.
    #[arg(long)]
    pool: PathBuf,

    /// Configuration file (TOML or YAML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Planner reply holding a `seed_names` list.
    #[arg(long)]
    hints: Option<PathBuf>,

    /// Additional hint, may be repeated.
    #[arg(long = "hint")]
    hint: Vec<String>,

    /// Budget ceiling, overriding the configuration.
    #[arg(long)]
    budget: Option<Decimal>,

    /// Prefer cheaper items over higher scores.
    #[arg(long, default_value_t = false)]
    price_first: bool,
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Squad file: a JSON array of items.
    #[arg(long)]
    squad: PathBuf,

    /// Configuration file (TOML or YAML).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct CheckConfigArgs {
    /// Configuration file (TOML or YAML).
    path: PathBuf,
}

#[derive(Debug, Parser)]
struct DispatchArgs {
    /// Operation name: propose, validate or solve.
    operation: String,

    /// Request body file; stdin when omitted.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Configuration file (TOML or YAML).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json);

    match real_main(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(json: bool) {
    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        squadforge::console::init();
    }
}

/// Returns whether the result is free of violations.
fn real_main(cli: Cli) -> anyhow::Result<bool> {
    let json = cli.json;
    match cli.cmd {
        Command::Solve(args) => cmd_solve(args, json),
        Command::Propose(args) => cmd_propose(args, json),
        Command::Validate(args) => cmd_validate(args, json),
        Command::CheckConfig(args) => cmd_check_config(args, json),
        Command::Dispatch(args) => cmd_dispatch(args),
    }
}

struct Prepared {
    engine: Engine,
    pool: Vec<squadforge::Item>,
    hints: Vec<String>,
    budget: Option<Budget>,
    prefer_score: Option<bool>,
}

fn prepare(args: AllocateArgs) -> anyhow::Result<Prepared> {
    let config = input::load_config(args.config.as_deref())?;
    let engine = Engine::new(config).context("invalid configuration")?;
    let pool = input::load_pool(&args.pool)?;
    let hints = input::load_hints(args.hints.as_deref(), &args.hint)?;
    let budget = args
        .budget
        .map(Budget::new)
        .transpose()
        .context("invalid --budget")?;

    Ok(Prepared {
        engine,
        pool,
        hints,
        budget,
        prefer_score: args.price_first.then_some(false),
    })
}

fn cmd_solve(args: AllocateArgs, json: bool) -> anyhow::Result<bool> {
    let prepared = prepare(args)?;
    let response = prepared.engine.solve(SolveRequest {
        pool: prepared.pool,
        constraints: None,
        budget: prepared.budget,
        hints: prepared.hints,
        prefer_score: prepared.prefer_score,
    });

    if json {
        print_json(&response)?;
    } else {
        print_squad(&response.squad);
        println!(
            "{} {}  {} {}",
            "Resolution:".bold(),
            response.resolution,
            "Total cost:".bold(),
            response.total_cost
        );
        print_violations(&response.violations);
    }
    Ok(response.is_valid())
}

fn cmd_propose(args: AllocateArgs, json: bool) -> anyhow::Result<bool> {
    let prepared = prepare(args)?;
    let response = prepared.engine.propose(ProposeRequest {
        player_pool: prepared.pool,
        constraints: None,
        budget: prepared.budget,
        hints: prepared.hints,
        prefer_score: prepared.prefer_score,
    });

    if json {
        print_json(&response)?;
    } else {
        print_squad(&response.squad);
        println!("{} {}", "Budget used:".bold(), response.budget_used);
    }
    Ok(true)
}

fn cmd_validate(args: ValidateArgs, json: bool) -> anyhow::Result<bool> {
    let config = input::load_config(args.config.as_deref())?;
    let engine = Engine::new(config).context("invalid configuration")?;
    let squad = input::load_squad(&args.squad)?;
    let response = engine.validate(ValidateRequest {
        squad,
        constraints: None,
    });

    if json {
        print_json(&response)?;
    } else if response.valid {
        println!("{}", "Squad is valid".green().bold());
    } else {
        print_violations(&response.violations);
    }
    Ok(response.valid)
}

fn cmd_check_config(args: CheckConfigArgs, json: bool) -> anyhow::Result<bool> {
    let config = input::load_config(Some(&args.path))?;
    let engine = Engine::new(config).context("invalid configuration")?;
    let constraints = engine.constraints();

    if json {
        print_json(constraints)?;
    } else {
        println!("{} {}", "Budget:".bold(), constraints.budget);
        for (category, count) in &constraints.quotas {
            println!("  {:<4} {}", category.to_string(), count);
        }
        println!(
            "{} {} ({} items)",
            "Max per group:".bold(),
            constraints.max_per_group,
            constraints.target_size()
        );
    }
    Ok(true)
}

fn cmd_dispatch(args: DispatchArgs) -> anyhow::Result<bool> {
    let config = input::load_config(args.config.as_deref())?;
    let engine = Engine::new(config).context("invalid configuration")?;
    let body = match &args.request {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("read request from stdin")?;
            body
        }
    };

    let operation = Operation::from_json(&args.operation, &body)?;
    let output: OperationOutput = engine.dispatch(operation);
    print_json(&output)?;
    Ok(output.is_valid())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_squad(squad: &Squad) {
    println!(
        "{}",
        format!(
            "{:>5}  {:<4} {:<24} {:<16} {:>6} {:>6}",
            "id", "cat", "name", "group", "price", "score"
        )
        .bold()
    );
    for item in squad {
        println!(
            "{:>5}  {:<4} {:<24} {:<16} {:>6} {:>6}",
            item.id.to_string(),
            item.category.to_string(),
            item.name,
            item.group,
            item.price.to_string(),
            item.score
        );
    }
}

fn print_violations(violations: &[String]) {
    for violation in violations {
        println!("{} {}", "✗".red(), violation);
    }
}
