//! The `run` command: compile an IR document and print its trace.

use pseudo_eval::{TraceCompiler, TraceError, DEFAULT_MAX_LOOP_ITERATIONS};

use super::read_source;

/// Options accepted by `pseudoc run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Indent the output document.
    pub pretty: bool,
    /// Per-loop iteration cap; `None` disables it.
    pub max_loop_iterations: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            pretty: false,
            max_loop_iterations: Some(DEFAULT_MAX_LOOP_ITERATIONS),
        }
    }
}

impl RunOptions {
    pub fn compiler(&self) -> TraceCompiler {
        let builder = TraceCompiler::builder();
        let builder = match self.max_loop_iterations {
            Some(limit) => builder.max_loop_iterations(limit),
            None => builder.unbounded_loops(),
        };
        builder.build()
    }
}

/// Parse the arguments after `run`: the input path and any flags.
///
/// Flags may appear before or after the path. The path is `None` when it
/// was not given.
pub fn parse_run_args(args: &[String]) -> Result<(Option<String>, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if arg == "--pretty" {
            options.pretty = true;
        } else if arg == "--no-limit" {
            options.max_loop_iterations = None;
        } else if let Some(value) = arg.strip_prefix("--max-iterations=") {
            let limit = value
                .parse::<usize>()
                .map_err(|_| format!("invalid iteration limit '{value}'"))?;
            options.max_loop_iterations = Some(limit);
        } else if arg == "-" || (!arg.starts_with('-') && path.is_none()) {
            path = Some(arg.clone());
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    Ok((path, options))
}

/// Compile `source` and render the text `run` prints.
///
/// `Err` holds the rendered error document.
pub fn render_run(source: &str, options: &RunOptions) -> Result<String, String> {
    let trace = options
        .compiler()
        .compile_json(source)
        .map_err(|err| error_document(&err, options.pretty))?;

    let rendered = if options.pretty {
        trace.to_json_pretty()
    } else {
        trace.to_json()
    };
    rendered.map_err(|err| render_error("SerializationFailed", &err.to_string(), options.pretty))
}

/// `{ "error": { "kind", "message" } }` for a failed compilation.
pub fn error_document(err: &TraceError, pretty: bool) -> String {
    render_error(err.kind(), &err.to_string(), pretty)
}

fn render_error(kind: &str, message: &str, pretty: bool) -> String {
    let doc = serde_json::json!({
        "error": {
            "kind": kind,
            "message": message,
        }
    });
    if pretty {
        format!("{doc:#}")
    } else {
        doc.to_string()
    }
}

/// Run a file (or stdin for `-`) and print the trace. Exits 1 on failure.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_source(path);
    match render_run(&source, options) {
        Ok(trace) => println!("{trace}"),
        Err(error) => {
            println!("{error}");
            std::process::exit(1);
        }
    }
}
