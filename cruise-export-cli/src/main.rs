// Command-line host for cruise-export
//
// This binary plays the part of the hosting application: it reads a dataset JSON file, picks an
// exporter from the registry and writes the exported document to stdout or a file.
// The transform itself lives in the cruise-export crate; nothing here knows about blocks or fields.
//
// Usage:
//  cruise-export <input> [--format <name>] [--output <file>]         - Export a dataset (default)
//  cruise-export export <input> [--format <name>] [--output <file>]  - Same as above (explicit)
//  cruise-export formats [--locale <tag>]                            - List available exporters
//
// Extra Parameters:
//
// Exporter parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the exporter.
// Example:
//  cruise-export dataset.json --extra-pretty
//
// The config-level parameters (pretty, locale, log-level) are applied as configuration overrides
// instead of being handed to the exporter.

use clap::{Arg, ArgAction, Command, ValueHint};
use cruise_export::{ExporterRegistry, Locale};
use cruise_export_config::{ExportConfig, Loader, ValueKind};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BOOLEAN_EXTRAS: &[&str] = &["pretty"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
///
/// Keys in [`BOOLEAN_EXTRAS`] only take the next argument when it is a boolean literal, so
/// `--extra-pretty dataset.json` leaves the input path in place.
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| {
                !next.starts_with('-')
                    && (!BOOLEAN_EXTRAS.contains(&key) || parse_bool_literal(next).is_some())
            });

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                // No value, treat as boolean flag
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("cruise-export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export dataset records into cruise documents")
        .long_about(
            "cruise-export reads a dataset record (JSON with a datasetVersion and its\n\
            metadata blocks) and writes the flat document produced by an exporter.\n\n\
            Commands:\n  \
            - export:  Run an exporter over a dataset file (default)\n  \
            - formats: List the available exporters and their capabilities\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass exporter options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            cruise-export dataset.json                      # Export to stdout\n  \
            cruise-export dataset.json -o cruise.json       # Export to a file\n  \
            cruise-export dataset.json --extra-pretty       # Indented output\n  \
            cruise-export formats --locale de               # List exporters",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a cruise-export.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .about("Export a dataset file (default command)")
                .long_about(
                    "Run an exporter over a dataset JSON file.\n\n\
                    The exporter defaults to the one named in the configuration\n\
                    (export.format, 'cruise_json' unless changed).\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Nothing is written when the export fails.\n\n\
                    Examples:\n  \
                    cruise-export export dataset.json\n  \
                    cruise-export export dataset.json --format cruise_json -o out.json\n  \
                    cruise-export dataset.json                 # 'export' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Dataset JSON file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Exporter to run (defaults to export.format from config)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("formats")
                .about("List available exporters")
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .help("Locale for display names (defaults to export.locale from config)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the capabilities as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means "export"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "export"
                && cleaned_args[1] != "formats"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "export".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );
    init_tracing(&config);

    match matches.subcommand() {
        Some(("export", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let format = sub_matches
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| config.export.format.clone());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_export_command(input, &format, output, &extra_params, &config);
        }
        Some(("formats", sub_matches)) => {
            let locale = sub_matches
                .get_one::<String>("locale")
                .map(|tag| Locale::new(tag.as_str()))
                .unwrap_or_else(|| Locale::from(&config.export));
            handle_formats_command(&locale, sub_matches.get_flag("json"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(config: &ExportConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Handle the export command
fn handle_export_command(
    input: &str,
    format: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &ExportConfig,
) {
    let registry = ExporterRegistry::default();

    if let Err(e) = registry.get(format) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let dataset: Value = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing dataset '{input}': {e}");
        std::process::exit(1);
    });

    let options = export_options(config, extra_params);
    debug!(input, format, ?options, "running exporter");

    match output {
        Some(path) => {
            // Buffer first so a failed export never creates the output file
            let mut buffer = Vec::new();
            run_export(&registry, &dataset, format, &mut buffer, &options);
            fs::write(path, buffer).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            info!(path, "wrote export");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            run_export(&registry, &dataset, format, &mut sink, &options);
        }
    }
}

fn run_export(
    registry: &ExporterRegistry,
    dataset: &Value,
    format: &str,
    sink: &mut dyn Write,
    options: &HashMap<String, String>,
) {
    registry
        .export_with_options(dataset, format, sink, options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
}

/// Handle the formats command
fn handle_formats_command(locale: &Locale, as_json: bool) {
    let registry = ExporterRegistry::default();

    if as_json {
        let capabilities: Vec<_> = registry
            .list_formats()
            .iter()
            .filter_map(|name| registry.get(name).ok())
            .map(|exporter| *exporter.capabilities())
            .collect();
        match serde_json::to_string_pretty(&capabilities) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Available exporters:\n");
    for name in registry.list_formats() {
        let Ok(exporter) = registry.get(&name) else {
            continue;
        };
        println!("  {name}");
        println!("    display name: {}", exporter.display_name(locale));
        println!("    media type:   {}", exporter.media_type());
        println!("    harvestable:  {}", exporter.is_harvestable());
        println!("    user visible: {}", exporter.is_available_to_users());
    }
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> ExportConfig {
    let loader = Loader::new().with_optional_file("cruise-export.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    apply_config_overrides(loader, extra_params)
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// Layer the config-level --extra-* parameters over the loaded files, consuming them.
fn apply_config_overrides(loader: Loader, extra_params: &mut HashMap<String, String>) -> Loader {
    let mut loader = loader;
    if let Some(raw) = extra_params.remove("pretty") {
        loader = set_override(loader, "export.pretty", parse_bool_arg("pretty", &raw));
    }
    if let Some(raw) = take_override(extra_params, &["locale", "lang"]) {
        loader = set_override(loader, "export.locale", raw);
    }
    if let Some(raw) = take_override(extra_params, &["log", "log-level"]) {
        loader = set_override(loader, "logging.level", raw);
    }
    loader
}

fn set_override<V: Into<ValueKind>>(loader: Loader, key: &str, value: V) -> Loader {
    loader.set_override(key, value).unwrap_or_else(|err| {
        eprintln!("Invalid override for {key}: {err}");
        std::process::exit(1);
    })
}

/// Exporter options from config, with remaining --extra-* parameters layered on top.
fn export_options(
    config: &ExportConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = config.export.options();
    for (key, value) in overrides {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    parse_bool_literal(raw).unwrap_or_else(|| {
        eprintln!("Invalid boolean value '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
