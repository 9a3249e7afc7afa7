//! Pseudocode trace compiler CLI.

use pseudoc::commands::{check_file, parse_run_args, run_file, run_fixtures};
use pseudoc::testing::FixtureRunnerConfig;

fn main() {
    pseudoc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (path, options) = match parse_run_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing IR file path");
                eprintln!("Usage: pseudoc run <ir.json|-> [--pretty] [--max-iterations=N|--no-limit]");
                std::process::exit(1);
            };
            run_file(&path, &options);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: pseudoc check <ir.json|->");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "test" => {
            let mut path: Option<String> = None;
            let mut config = FixtureRunnerConfig::default();

            for arg in args.iter().skip(2) {
                if arg == "--verbose" || arg == "-v" {
                    config.verbose = true;
                } else if arg == "--no-parallel" {
                    config.parallel = false;
                } else if !arg.starts_with('-') && path.is_none() {
                    path = Some(arg.clone());
                }
            }

            let Some(path) = path else {
                eprintln!("Usage: pseudoc test <fixtures.json> [--no-parallel] [--verbose]");
                std::process::exit(1);
            };
            run_fixtures(&path, &config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("pseudoc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare .json path is shorthand for `run`.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                run_file(command, &pseudoc::commands::RunOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Pseudocode trace compiler");
    println!();
    println!("Usage: pseudoc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <ir.json|->         Execute an IR document and print its action frames");
    println!("  check <ir.json|->       Parse an IR document without executing it");
    println!("  test <fixtures.json>    Grade a fixture file");
    println!("  help                    Show this help message");
    println!("  version                 Show version information");
    println!();
    println!("Run options:");
    println!("  --pretty                Indent the output JSON");
    println!("  --max-iterations=<n>    Per-loop iteration cap (default: 10000)");
    println!("  --no-limit              Remove the iteration cap");
    println!();
    println!("Test options:");
    println!("  --verbose, -v           Show passing fixtures too");
    println!("  --no-parallel           Grade fixtures sequentially");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=pseudo_eval=debug   Trace compilation on stderr");
    println!();
    println!("Examples:");
    println!("  pseudoc run program.json");
    println!("  cat program.json | pseudoc run - --pretty");
    println!("  pseudoc test fixtures.json --verbose");
}
