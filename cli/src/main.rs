//! dotcheck CLI — driving adapter for the path-query engine.
//!
//! Subcommands:
//! - `get <path> [--file doc.json] [--unique]` — resolve a path against a document
//! - `check <config> <body.json>` — run a check config against a stored body
//! - `syntax <path>` — validate path syntax without a document

use std::io::Read;
use std::process;

use dotcheck::{MatchSet, Path};
use dotcheck_http::{CheckConfig, RawResponse};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "get" => cmd_get(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "syntax" => cmd_syntax(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_get(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("get requires a path argument".into());
    }

    let path = Path::parse(&args[0]).map_err(|e| e.to_string())?;
    let opts = parse_get_opts(&args[1..])?;

    let doc = load_document(opts.file.as_deref())?;
    let matches = if opts.unique {
        path.resolve_unique(&doc)
    } else {
        path.resolve(&doc)
    };

    match matches {
        MatchSet::One(Some(value)) => println!("{value}"),
        MatchSet::One(None) => println!("(not found)"),
        MatchSet::Many(values) => {
            for value in values {
                println!("{value}");
            }
        }
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        return Err("check requires a config file and a body file".into());
    }

    let config = load_config(&args[0])?;
    let body = std::fs::read_to_string(&args[1])
        .map_err(|e| format!("failed to read \"{}\": {e}", args[1]))?;

    let check = config.compile().map_err(|e| format!("config invalid: {e}"))?;

    // Offline bodies carry no transport status; stand in with the one the
    // config expects so only the JSON-level checks can fail.
    let resp = RawResponse::with_status(config.expected_status, body);
    check.validate(&resp).map_err(|e| e.to_string())?;

    println!("Checks passed");
    Ok(())
}

fn cmd_syntax(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("syntax requires a path argument".into());
    }

    let path = Path::parse(&args[0]).map_err(|e| e.to_string())?;
    println!(
        "Valid: {} segment(s){}",
        path.segments().len(),
        if path.has_wildcard() {
            ", contains wildcard"
        } else {
            ""
        }
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Input loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_document(file: Option<&str>) -> Result<serde_json::Value, String> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read \"{path}\": {e}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            buf
        }
    };

    serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
}

fn load_config(path: &str) -> Result<CheckConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct GetOpts {
    file: Option<String>,
    unique: bool,
}

fn parse_get_opts(args: &[String]) -> Result<GetOpts, String> {
    let mut opts = GetOpts::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "--file requires a value".to_string())?;
                opts.file = Some(path.clone());
            }
            "--unique" => opts.unique = true,
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
        i += 1;
    }

    Ok(opts)
}

fn print_usage() {
    eprintln!(
        "Usage: dotcheck <command> [options]

Commands:
  get <path> [--file doc.json] [--unique]   Resolve a path against a JSON document
                                            (reads stdin when --file is omitted)
  check <config> <body.json>                Run a JSON/YAML check config against a body
  syntax <path>                             Validate path syntax
  help                                      Show this help"
    );
}
