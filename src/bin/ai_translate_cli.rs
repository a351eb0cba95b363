//! ai-translate-cli: 请求结构转换的命令行工具
//!
//! Usage:
//!   ai-translate-cli translate [--direction <dir>] [--strict] [--request-id ID] [FILE|-]
//!   ai-translate-cli roundtrip [--direction <dir>] [FILE|-]
//!   ai-translate-cli fields [--direction <dir>]
//!   ai-translate-cli version

use anyhow::Context;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use ai_lib_translate::mapping::rules_for;
use ai_lib_translate::{
    round_trip, Direction, Schema, TranslateConfig, TranslationOptions, TranslationOrchestrator,
};

const EXIT_FAILURE: i32 = 1;
const EXIT_IO: i32 = 2;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(EXIT_FAILURE);
    }

    if run_standalone(&args[1]) {
        return;
    }

    let parsed = match CliArgs::parse(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!();
            print_usage();
            process::exit(EXIT_FAILURE);
        }
    };

    let config = match load_config(parsed.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_IO);
        }
    };
    init_logging(&config);

    let outcome = match args[1].as_str() {
        "translate" => cmd_translate(&parsed, &config),
        "roundtrip" => cmd_roundtrip(&parsed),
        "fields" => cmd_fields(&parsed),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            Ok(EXIT_FAILURE)
        }
    };

    match outcome {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_IO);
        }
    }
}

/// Commands that need neither options nor configuration. Returns whether
/// `command` was one of them.
fn run_standalone(command: &str) -> bool {
    match command {
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        _ => return false,
    }
    true
}

fn print_usage() {
    println!(
        r#"ai-translate-cli: chat / responses 请求结构转换工具

USAGE:
    ai-translate-cli <COMMAND> [OPTIONS] [FILE|-]

COMMANDS:
    translate [--direction <dir>]  Translate a JSON request (stdin when FILE is - or omitted)
    roundtrip [--direction <dir>]  Translate forward and back, report lost parameters
    fields [--direction <dir>]     Print the field-mapping table
    version                        Show version information
    help                           Show this help message

OPTIONS:
    --direction <dir>              chat-to-responses | responses-to-chat
                                   (inferred from `messages` / `input` when omitted)
    --strict                       Request strict mode (currently reported, not enforced)
    --request-id <id>              Correlation id for logs (random when omitted)
    --config <file>                YAML configuration file

ENVIRONMENT:
    AI_TRANSLATE_CONFIG            Configuration file when --config is not given
    AI_TRANSLATE_STRICT            Override `strict`
    AI_TRANSLATE_SINK              Override `sink` (tracing | noop)
    AI_TRANSLATE_LOG               Override `log_filter`
    RUST_LOG                       Log filter, takes precedence over the config"#
    );
}

fn cmd_version() {
    println!(
        "ai-translate-cli {} (ai-lib-translate {})",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_VERSION"),
    );
}

#[derive(Debug, Default)]
struct CliArgs {
    direction: Option<Direction>,
    strict: bool,
    request_id: Option<String>,
    config: Option<PathBuf>,
    input: Option<String>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = CliArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--direction" | "-d" => {
                    let value = iter.next().ok_or("--direction requires a value")?;
                    parsed.direction = Some(value.parse::<Direction>()?);
                }
                "--strict" => parsed.strict = true,
                "--request-id" => {
                    let value = iter.next().ok_or("--request-id requires a value")?;
                    parsed.request_id = Some(value.clone());
                }
                "--config" => {
                    let value = iter.next().ok_or("--config requires a value")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
                positional => {
                    if parsed.input.is_some() {
                        return Err(format!("Unexpected argument: {positional}"));
                    }
                    parsed.input = Some(positional.to_string());
                }
            }
        }
        Ok(parsed)
    }

    /// Explicit `--direction`, else inferred from the list field the payload carries.
    fn resolve_direction(&self, payload: &serde_json::Value) -> Option<Direction> {
        let direction = self.direction.or_else(|| {
            Schema::detect(payload).map(|schema| match schema {
                Schema::Chat => Direction::ChatToResponses,
                Schema::Responses => Direction::ResponsesToChat,
            })
        });
        if direction.is_none() {
            eprintln!("Error: cannot infer direction from the request; pass --direction");
        }
        direction
    }
}

fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<TranslateConfig> {
    let path = explicit
        .cloned()
        .or_else(|| std::env::var("AI_TRANSLATE_CONFIG").ok().map(PathBuf::from));
    let config = match path {
        Some(path) => TranslateConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TranslateConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn init_logging(config: &TranslateConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_payload(input: Option<&str>) -> anyhow::Result<serde_json::Value> {
    let content = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {path}"))?,
    };
    serde_json::from_str(&content).context("request is not valid JSON")
}

fn cmd_translate(args: &CliArgs, config: &TranslateConfig) -> anyhow::Result<i32> {
    let payload = read_payload(args.input.as_deref())?;
    let Some(direction) = args.resolve_direction(&payload) else {
        return Ok(EXIT_FAILURE);
    };

    let options = match &args.request_id {
        Some(id) => TranslationOptions::with_request_id(id.clone()),
        None => TranslationOptions::new(),
    }
    .strict(args.strict);

    let orchestrator = TranslationOrchestrator::from_config(config);
    let result = orchestrator.run_direction(direction, &payload, &options);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.is_success() { 0 } else { EXIT_FAILURE })
}

fn cmd_roundtrip(args: &CliArgs) -> anyhow::Result<i32> {
    let payload = read_payload(args.input.as_deref())?;
    let Some(direction) = args.resolve_direction(&payload) else {
        return Ok(EXIT_FAILURE);
    };

    match round_trip(&payload, direction) {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.success { 0 } else { EXIT_FAILURE })
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(EXIT_FAILURE)
        }
    }
}

fn cmd_fields(args: &CliArgs) -> anyhow::Result<i32> {
    let directions: Vec<Direction> = match args.direction {
        Some(d) => vec![d],
        None => Direction::ALL.to_vec(),
    };
    for (i, direction) in directions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===", direction);
        for rule in rules_for(*direction) {
            println!("  {rule}");
        }
    }
    Ok(0)
}
