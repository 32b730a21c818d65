use biodivine_ensemble_attractors::fvs::{DEFAULT_EXHAUSTIVE_LIMIT, FvsSearch};
use biodivine_ensemble_attractors::network_model::{InputCondition, NetworkModel};
use biodivine_ensemble_attractors::node_model::ControlMap;
use biodivine_ensemble_attractors::{SignedNetwork, VariableId};
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::collections::HashMap;

#[derive(Parser)]
#[command(name = "predict-nopa")]
#[command(about = "Predict the number of point attractors of a signed network")]
struct Args {
    /// Path to a tab-separated edge table with `from`, `sign` and `to` columns
    #[arg(value_name = "FILE")]
    file: String,

    /// Search all minimum feedback vertex sets exhaustively, regardless of component size
    #[arg(long)]
    minimum_fvs: bool,

    /// Largest component which is searched exhaustively when `--minimum-fvs` is not set
    #[arg(long, default_value_t = DEFAULT_EXHAUSTIVE_LIMIT, require_equals = true)]
    exhaustive_limit: usize,

    /// Controlled nodes and their states (example: --control="a=1,b=0")
    #[arg(long, default_value = "", require_equals = true)]
    control: String,

    /// Fixed values of input nodes (example: --condition="i=0")
    #[arg(long, default_value = "", require_equals = true)]
    condition: String,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let table = std::fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", args.file, e);
        std::process::exit(1);
    });
    let network = SignedNetwork::from_tsv(&table).unwrap_or_else(|e| {
        eprintln!("Invalid network {}: {}", args.file, e);
        std::process::exit(1);
    });
    println!(
        "Loaded network with {} nodes and {} edges.",
        network.num_vars(),
        network.regulations().count()
    );

    let strategy = if args.minimum_fvs {
        FvsSearch::Minimum
    } else {
        FvsSearch::Auto {
            exhaustive_limit: args.exhaustive_limit,
        }
    };
    let model = NetworkModel::with_fvs_finder(network, &strategy).unwrap_or_else(|e| {
        eprintln!("Failed to build the network model: {}", e);
        std::process::exit(1);
    });

    let control: ControlMap = parse_assignment(&model, &args.control);
    let condition: InputCondition = parse_assignment(&model, &args.condition);

    let names = |ids: &[VariableId]| -> Vec<String> {
        ids.iter()
            .map(|it| model.network()[*it].clone())
            .collect()
    };
    println!("Input nodes: {:?}", names(model.input_nodes()));
    println!(
        "Free input nodes: {:?}",
        names(&model.free_input_nodes(&control))
    );

    if control.is_empty() {
        let nominal = model
            .predict(&condition, &control)
            .unwrap_or_else(|e| {
                eprintln!("Prediction failed: {}", e);
                std::process::exit(1);
            });
        for scenario in &nominal.scenarios {
            println!(
                "NoPA for inputs {}: {}",
                format_assignment(&model, &scenario.inputs),
                scenario.attractor_count
            );
        }
        println!("Predicted NoPA: {}", nominal.attractor_count);
        return;
    }

    let effect = model
        .control_effect(&condition, &control)
        .unwrap_or_else(|e| {
            eprintln!("Prediction failed: {}", e);
            std::process::exit(1);
        });
    for condition in &effect.conditions {
        if condition.inputs.is_empty() {
            continue;
        }
        println!(
            "Inputs {}: nominal NoPA {}, controlled NoPA {}, reduction {}",
            format_assignment(&model, &condition.inputs),
            condition.nominal,
            condition.controlled,
            condition.reduction
        );
    }
    println!("Predicted NoPA: {}", effect.nominal);
    println!("Predicted NoPA with control: {}", effect.controlled);
    println!(
        "Reduction of NoPA by control {}: {}",
        format_assignment(&model, &control),
        effect.total_reduction
    );
}

/// Parse `name=value` pairs separated by commas into a map of variables.
fn parse_assignment(model: &NetworkModel, text: &str) -> HashMap<VariableId, bool> {
    let mut result = HashMap::new();
    for item in text.split(',').filter(|it| !it.trim().is_empty()) {
        let Some((name, value)) = item.split_once('=') else {
            eprintln!("Expected `name=value`, found `{}`.", item.trim());
            std::process::exit(1);
        };
        let Some(variable) = model.find_variable(name.trim()) else {
            eprintln!("Unknown node `{}`.", name.trim());
            std::process::exit(1);
        };
        let value = match value.trim() {
            "1" => true,
            "0" => false,
            other => {
                eprintln!("Expected `0` or `1` for `{}`, found `{}`.", name.trim(), other);
                std::process::exit(1);
            }
        };
        result.insert(variable, value);
    }
    result
}

fn format_assignment(model: &NetworkModel, assignment: &HashMap<VariableId, bool>) -> String {
    let mut items: Vec<String> = assignment
        .iter()
        .map(|(id, value)| format!("{}={}", model.network()[*id], u8::from(*value)))
        .collect();
    items.sort();
    items.join(",")
}
