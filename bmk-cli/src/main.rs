// Command-line interface for pdf-bookmark
//
// This binary converts PDF bookmark outlines between the bmk text format and the formats PDF
// tooling understands, and checks bmk files for problems.
//
// The core capabilities use the bmk-babel crate. This crate is only the shell around it:
// argument parsing, configuration layering, file io and diagnostics.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. The to defaults to convert.default_format.
// Usage:
//  pdf-bookmark <input> [--to <format>] [--from <format>] [--output <file>]          - Convert (default)
//  pdf-bookmark convert <input> [--to <format>] [--from <format>] [--output <file>]  - Same as above
//  pdf-bookmark check <input>                  - Parse a bmk file and summarize it
//  pdf-bookmark --list-formats                 - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the serializer.
// Example:
//  pdf-bookmark toc.bmk --to bmk --extra-directives --extra-separator-dots 6

mod check;

use bmk_babel::format::COLLAPSE_LEVEL_OPTION;
use bmk_babel::formats::BmkFormat;
use bmk_babel::{parse_bmk, ErrorPolicy, FormatRegistry, ParseOptions};
use bmk_config::{BmkConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::Read;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
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
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

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
    Command::new("pdf-bookmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Import and export PDF bookmarks as editable text")
        .long_about(
            "pdf-bookmark converts PDF bookmark outlines between the bmk text format\n\
            and the inputs of PDF tools.\n\n\
            Commands:\n  \
            - convert: Transform between outline formats (default)\n  \
            - check:   Parse a bmk file and report its structure\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            pdf-bookmark toc.bmk --to pdftk -o toc.info       # bmk to pdftk update_info\n  \
            pdf-bookmark dump.info --to bmk                   # pdftk dump_data to bmk\n  \
            pdf-bookmark toc.bmk --to pdfmark -l 2            # collapse from level 2\n  \
            pdf-bookmark check toc.bmk                        # summarize a bmk file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a bmk.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only report errors, not warnings")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between outline formats (default command)")
                .long_about(
                    "Convert bookmark outlines between formats.\n\n\
                    Supported formats:\n  \
                    - bmk:     Indented outline text (.bmk), in and out\n  \
                    - pdftk:   pdftk dump_data / update_info records (.info), in and out\n  \
                    - pdfmark: Ghostscript pdfmark statements (.pdfmark, .ps), out\n  \
                    - json:    Bookmark tree as JSON (.json), in and out\n  \
                    - none:    Parse only, write nothing\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Use '-' as input to read stdin (requires --from).\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to convert.default_format)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("collapse-level")
                        .long("collapse-level")
                        .short('l')
                        .value_name("LEVEL")
                        .help("Collapse bookmarks at this depth or deeper (0 expands all)")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a bmk file and summarize it")
                .long_about(
                    "Parse a bmk file, report every skipped line on stderr and print\n\
                    the number of bookmarks, the depth and the page-label ranges.\n\n\
                    With --strict every problem is an error.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input bmk file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on the first bad line or directive")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // If no subcommand is provided, inject "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "check"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
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

    init_logging(matches.get_flag("quiet"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let registry = build_registry(&config);

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };
            let to = sub_matches
                .get_one::<String>("to")
                .cloned()
                .unwrap_or_else(|| config.convert.default_format.clone());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let collapse_level = sub_matches
                .get_one::<usize>("collapse-level")
                .copied()
                .or_else(|| config.convert.collapse_level());

            let options = build_format_options(collapse_level, &extra_params);
            handle_convert_command(&registry, input, &from, &to, output, &options);
        }
        Some(("check", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let strict = sub_matches.get_flag("strict");
            handle_check_command(input, strict, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "error" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Registry with the bmk format configured from `config`.
fn build_registry(config: &BmkConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(BmkFormat::new(
        (&config.convert.bmk).into(),
        (&config.parse).into(),
    ));
    registry
}

fn build_format_options(
    collapse_level: Option<usize>,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if let Some(level) = collapse_level {
        options.insert(COLLAPSE_LEVEL_OPTION.to_string(), level.to_string());
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    options: &HashMap<String, String>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    log::debug!("converting {} bookmarks from {from} to {to}", doc.len());

    let text = registry
        .serialize_with_options(&doc, to, options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the check command
fn handle_check_command(input: &str, strict: bool, config: &BmkConfig) {
    let source = read_input(input);

    let mut options: ParseOptions = (&config.parse).into();
    if strict {
        options.entry_errors = ErrorPolicy::Abort;
        options.directive_errors = ErrorPolicy::Abort;
    }

    // Skipped lines are already reported through the log
    let outcome = parse_bmk(&source, &options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    print!("{}", check::summarize(&outcome));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "in/out",
                (true, false) => "in",
                (false, true) => "out",
                (false, false) => "-",
            };
            println!("  {format_name:<8} {direction:<7} {}", format.description());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> BmkConfig {
    let loader = Loader::new().with_optional_file("bmk.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
