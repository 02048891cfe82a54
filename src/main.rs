use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use startup_valuator::config::Config;
use startup_valuator::store::{self, ValuationStore};
use startup_valuator::valuation::{risk_adjustments, RiskAdjustment};
use startup_valuator::{output, MethodKind, Stage, ValuationEngine, ValuationResult};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_ENGINE: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Value a company described in a YAML or JSON file ("-" reads stdin)
    Calculate {
        /// Path to the request file
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
        /// Print the result as a tab-separated line
        #[arg(long)]
        tsv: bool,
        /// Do not save the result
        #[arg(long)]
        no_save: bool,
    },
    /// List the valuation methods that apply to a business stage
    Methods {
        /// idea, pre-revenue, early-revenue or growth
        stage: Stage,
        /// Print the methods as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved valuations, most recent first
    List {
        /// Print tab-separated values for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show a saved valuation by id or id prefix
    Show {
        id: String,
        /// Print the stored result and input as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved valuation by id or id prefix
    Delete { id: String },
    /// Summarize saved valuations
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "startup-valuator")]
#[command(about = "Blend six startup valuation methods into one estimate", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/startup-valuator/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Owner id for saved valuations (overrides config and STARTUP_VALUATOR_OWNER)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Path to the valuation store (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    let mut config = match startup_valuator::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(owner) = startup_valuator::config::get_owner_from_env() {
        config.owner = owner;
    }
    if let Some(owner) = cli.owner {
        config.owner = owner;
    }
    if let Some(path) = cli.store {
        config.store_path = Some(path);
    }

    tracing::debug!(owner = %config.owner, store = %config.effective_store_path().display(), "configuration loaded");

    let engine = ValuationEngine::new();
    let use_colors = output::should_use_colors();

    let code = match cli.command {
        Commands::Calculate {
            file,
            json,
            tsv,
            no_save,
        } => run_calculate(&engine, &config, &file, json, tsv, no_save, use_colors),
        Commands::Methods { stage, json } => {
            let methods = engine.applicable_methods(stage);
            if json {
                print_json(&methods)
            } else {
                println!("{}", output::format_methods(&methods, use_colors));
                EXIT_SUCCESS
            }
        }
        Commands::List { tsv } => with_store(&config, |store| {
            let results = store.list_by_owner(&config.owner);
            if tsv {
                let out = output::format_tsv(&results);
                if !out.is_empty() {
                    println!("{}", out);
                }
            } else {
                println!("{}", output::format_history_table(&results, use_colors));
            }
            EXIT_SUCCESS
        }),
        Commands::Show { id, json } => with_store(&config, |store| {
            let found = store
                .resolve_id(&id, &config.owner)
                .and_then(|uuid| store.get_by_id(uuid, &config.owner));
            match found {
                Some(stored) if json => print_json(stored),
                Some(stored) => {
                    println!("{}", output::format_result_detail(&stored.result, use_colors));
                    print_risk_factors(&stored.input, &stored.result, use_colors);
                    EXIT_SUCCESS
                }
                None => {
                    eprintln!("Valuation not found: {}", id);
                    EXIT_NOT_FOUND
                }
            }
        }),
        Commands::Delete { id } => run_delete(&config, &id),
        Commands::Dashboard { json } => with_store(&config, |store| {
            let summary = store::summarize(&store.list_by_owner(&config.owner));
            if json {
                print_json(&summary)
            } else {
                println!("{}", output::format_dashboard(&summary, use_colors));
                EXIT_SUCCESS
            }
        }),
    };

    tracing::debug!(elapsed = ?start_time.elapsed(), code, "done");
    std::process::exit(code);
}

fn run_calculate(
    engine: &ValuationEngine,
    config: &Config,
    file: &std::path::Path,
    json: bool,
    tsv: bool,
    no_save: bool,
    use_colors: bool,
) -> i32 {
    let request = match startup_valuator::request::load_request(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request error: {:#}", e);
            return EXIT_VALIDATION;
        }
    };

    let input = match startup_valuator::validate_request(&request) {
        Ok(input) => input,
        Err(errors) => {
            eprintln!("Invalid valuation request:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            return EXIT_VALIDATION;
        }
    };

    let result = match engine.calculate(&input, &config.owner) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Valuation failed: {}", e);
            return EXIT_ENGINE;
        }
    };

    if config.save_results && !no_save {
        let path = config.effective_store_path();
        let saved = store::load_store(&path).and_then(|mut s| {
            s.save(result.clone(), input.clone());
            store::save_store(&path, &s)
        });
        if let Err(e) = saved {
            eprintln!("Failed to save valuation: {:#}", e);
            print_result(engine, &input, &result, json, tsv, use_colors);
            return EXIT_CONFIG;
        }
    }

    print_result(engine, &input, &result, json, tsv, use_colors)
}

fn print_result(
    engine: &ValuationEngine,
    input: &startup_valuator::ValuationInput,
    result: &ValuationResult,
    json: bool,
    tsv: bool,
    use_colors: bool,
) -> i32 {
    if json {
        let recommended = engine.applicable_methods(input.stage);
        return print_json(&serde_json::json!({
            "result": result,
            "recommendedMethods": recommended,
            "riskFactors": risk_factors_for(input, result),
        }));
    }
    if tsv {
        println!("{}", output::format_tsv(&[result]));
        return EXIT_SUCCESS;
    }

    println!("Recommended methods for {} stage:", input.stage);
    println!(
        "{}\n",
        output::format_methods(&engine.applicable_methods(input.stage), use_colors)
    );
    println!("{}", output::format_result_detail(result, use_colors));
    print_risk_factors(input, result, use_colors);
    EXIT_SUCCESS
}

/// Risk factor breakdown, when Risk Factor Summation took part in the result.
fn risk_factors_for(
    input: &startup_valuator::ValuationInput,
    result: &ValuationResult,
) -> Option<Vec<RiskAdjustment>> {
    result
        .methods
        .iter()
        .any(|m| m.method == MethodKind::RiskFactorSummation)
        .then(|| risk_adjustments(input))
}

fn print_risk_factors(
    input: &startup_valuator::ValuationInput,
    result: &ValuationResult,
    use_colors: bool,
) {
    if let Some(adjustments) = risk_factors_for(input, result) {
        println!("{}", output::format_risk_factors(&adjustments, use_colors));
    }
}

fn run_delete(config: &Config, id: &str) -> i32 {
    let path = config.effective_store_path();
    let mut store = match store::load_store(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Store error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let Some(uuid) = store.resolve_id(id, &config.owner) else {
        eprintln!("Valuation not found: {}", id);
        return EXIT_NOT_FOUND;
    };
    if !store.delete(uuid, &config.owner) {
        eprintln!("Valuation not found: {}", id);
        return EXIT_NOT_FOUND;
    }

    if let Err(e) = store::save_store(&path, &store) {
        eprintln!("Store error: {:#}", e);
        return EXIT_CONFIG;
    }
    println!("Deleted valuation {}", uuid);
    EXIT_SUCCESS
}

fn with_store(config: &Config, f: impl FnOnce(&ValuationStore) -> i32) -> i32 {
    match store::load_store(&config.effective_store_path()) {
        Ok(store) => f(&store),
        Err(e) => {
            eprintln!("Store error: {:#}", e);
            EXIT_CONFIG
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            EXIT_ENGINE
        }
    }
}
