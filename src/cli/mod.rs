//! CLI driver for codemap

mod args;

pub use args::Args;

use crate::analysis::{ImportGraph, Mapper};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{write_dot, write_json, write_markdown};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Invalid roots and JSON write failures have reserved exit codes.
/// Markdown/DOT failures never reach here; they are reported inline.
fn exit_code(err: &Error) -> u8 {
    match err {
        Error::InvalidRoot(_) => 2,
        Error::ArtifactWrite { .. } => 3,
        _ => 1,
    }
}

fn execute(args: Args) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("codemap.toml"));
    let mut config = Config::load_or_default(&config_path);
    config.merge_cli(
        args.output_json,
        args.output_md,
        args.output_dot,
        args.follow_symlinks,
    );
    config.validate()?;

    if !args.root.is_dir() {
        return Err(Error::InvalidRoot(args.root.clone()));
    }

    if args.verbose {
        println!("Scanning: {}", args.root.display());
    }

    let mapper = Mapper::new(config.clone()).with_verbose(args.verbose);
    let report = mapper.run(&args.root)?;

    println!(
        "Mapped {} files: {} classes, {} functions",
        report.summary.file_count, report.summary.class_count, report.summary.function_count
    );
    let failed = report.modules.iter().filter(|m| m.is_failed()).count();
    if failed > 0 {
        println!("{} file(s) could not be parsed; see the report errors", failed);
    }

    let json_path = config
        .output
        .json
        .clone()
        .unwrap_or_else(|| args.root.join("codebase_map.json"));
    let md_path = config
        .output
        .markdown
        .clone()
        .unwrap_or_else(|| args.root.join("codebase_map.md"));

    // The JSON artifact is authoritative; its write failure is fatal.
    write_json(&report, &json_path)?;
    println!("JSON written to: {}", json_path.display());

    let title = project_title(&config, &args.root);
    match write_markdown(&report, &title, &md_path) {
        Ok(()) => println!("Markdown written to: {}", md_path.display()),
        Err(e) => eprintln!("warning: {}", e),
    }

    if let Some(dot_path) = config.output.dot.clone() {
        let graph = ImportGraph::from_edges(&report.import_edges);
        if args.verbose {
            println!(
                "Import graph: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
        }
        match write_dot(&graph, &dot_path) {
            Ok(()) => println!("DOT written to: {}", dot_path.display()),
            Err(e) => eprintln!("warning: {}", e),
        }
    }

    Ok(())
}

fn project_title(config: &Config, root: &Path) -> String {
    if !config.project.name.is_empty() {
        return config.project.name.clone();
    }
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "codebase".to_string())
}
