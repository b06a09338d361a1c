//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Map the structure of Python codebases
#[derive(Parser, Debug)]
#[command(name = "codemap")]
#[command(about = "Map the structure of Python codebases")]
#[command(version)]
pub struct Args {
    /// Root directory to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Destination for the JSON artifact (default: <root>/codebase_map.json)
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Destination for the Markdown artifact (default: <root>/codebase_map.md)
    #[arg(long)]
    pub output_md: Option<PathBuf>,

    /// Destination for the DOT import graph; not written unless set
    #[arg(long)]
    pub output_dot: Option<PathBuf>,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["codemap"]).unwrap();
        assert_eq!(args.root, PathBuf::from("."));
        assert!(args.output_json.is_none());
        assert!(args.output_md.is_none());
        assert!(args.output_dot.is_none());
        assert!(!args.follow_symlinks);
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "codemap",
            "--root",
            "./project",
            "--output-json",
            "/tmp/map.json",
            "--output-md",
            "/tmp/map.md",
            "--output-dot",
            "/tmp/imports.dot",
            "--follow-symlinks",
            "--config",
            "custom.toml",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.root, PathBuf::from("./project"));
        assert_eq!(args.output_json, Some(PathBuf::from("/tmp/map.json")));
        assert_eq!(args.output_md, Some(PathBuf::from("/tmp/map.md")));
        assert_eq!(args.output_dot, Some(PathBuf::from("/tmp/imports.dot")));
        assert!(args.follow_symlinks);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["codemap", "--nope"]).is_err());
    }
}
