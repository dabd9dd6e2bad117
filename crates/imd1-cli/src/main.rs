use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use imd1_config::{Config, OutputFormat};
use imd1_engine::parsing::snapshot;
use imd1_engine::{HtmlMode, ParseOptions, Report};

#[derive(Parser)]
#[command(name = "imd1", version, about = "Compile IMD1 documents to HTML or LaTeX")]
struct Cli {
    /// Config file to use instead of ~/.config/imd1/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output; repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a document to HTML
    Html {
        #[command(flatten)]
        io: IoArgs,

        /// Document scaffolding
        #[arg(long, value_enum, ignore_case = true)]
        mode: Option<HtmlMode>,
    },
    /// Render a document to a standalone LaTeX article
    Latex {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Render using the format set in the config file
    Build {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Print the parsed document tree
    Tree {
        #[command(flatten)]
        io: IoArgs,

        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Parse only and report diagnostics; exits non-zero on errors
    Check {
        #[command(flatten)]
        io: IoArgs,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Source file, or `-` for standard input
    input: String,

    /// Output file; standard output when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory that relative bibliography paths are resolved against
    #[arg(long)]
    bib_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    };
    init_logging(&cli, &config);

    match run(cli, &config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn init_logging(cli: &Cli, config: &Config) {
    let rust_log = std::env::var("RUST_LOG").ok();
    logger(cli, config, rust_log.as_deref()).init();
}

/// Flags pick the level, the config file refines it when no flag is given,
/// and `RUST_LOG` overrides both.
fn logger(cli: &Cli, config: &Config, rust_log: Option<&str>) -> env_logger::Builder {
    let default_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if cli.verbose == 0
        && !cli.quiet
        && let Some(filters) = &config.log_level
    {
        builder.parse_filters(filters);
    }
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    // Diagnostics are printed with the input name by `print_diagnostics`.
    builder.filter_module("imd1_engine::diagnostics", log::LevelFilter::Off);
    builder
}

fn run(cli: Cli, config: &Config) -> Result<i32> {
    match cli.command {
        Command::Html { io, mode } => {
            let mode = mode.unwrap_or(config.html_mode);
            compile(&io, config, OutputFormat::Html, mode, cli.quiet)
        }
        Command::Latex { io } => {
            compile(&io, config, OutputFormat::Latex, config.html_mode, cli.quiet)
        }
        Command::Build { io } => compile(&io, config, config.format, config.html_mode, cli.quiet),
        Command::Tree { io, json } => {
            let (text, options) = read_input(&io, config)?;
            let mut report = Report::new();
            let doc = imd1_engine::parse(&text, &options, &mut report)?;
            let output = if json {
                let mut json = serde_json::to_string_pretty(&snapshot::normalize(&doc.tree))?;
                json.push('\n');
                json
            } else {
                snapshot::outline(&doc.tree)
            };
            print_diagnostics(&io.input, &report, cli.quiet);
            write_output(io.output.as_deref(), &output)?;
            Ok(0)
        }
        Command::Check { io, strict } => {
            let (text, options) = read_input(&io, config)?;
            let mut report = Report::new();
            imd1_engine::parse(&text, &options, &mut report)?;
            print_diagnostics(&io.input, &report, cli.quiet);
            Ok(exit_code(&report, strict))
        }
    }
}

fn compile(
    io: &IoArgs,
    config: &Config,
    format: OutputFormat,
    mode: HtmlMode,
    quiet: bool,
) -> Result<i32> {
    let (text, options) = read_input(io, config)?;
    let mut report = Report::new();
    let rendered = match format {
        OutputFormat::Html => imd1_engine::to_html(&text, mode, &options, &mut report)?,
        OutputFormat::Latex => imd1_engine::to_latex(&text, &options, &mut report)?,
    };
    print_diagnostics(&io.input, &report, quiet);
    write_output(io.output.as_deref(), &rendered.output)?;
    Ok(exit_code(&report, false))
}

fn read_input(io: &IoArgs, config: &Config) -> Result<(String, ParseOptions)> {
    let text = if io.input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading standard input")?;
        text
    } else {
        imd1_engine::io::read_file(Path::new(&io.input))
            .with_context(|| format!("reading {}", io.input))?
    };
    let options = ParseOptions {
        base_dir: bibliography_base(io, config),
    };
    Ok((text, options))
}

/// `--bib-dir`, then the config file, then the input file's directory.
fn bibliography_base(io: &IoArgs, config: &Config) -> Option<PathBuf> {
    io.bib_dir
        .clone()
        .or_else(|| config.bibliography_dir.clone())
        .or_else(|| {
            (io.input != "-")
                .then(|| Path::new(&io.input).parent().map(Path::to_path_buf))
                .flatten()
        })
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            imd1_engine::io::write_file(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => std::io::stdout()
            .write_all(content.as_bytes())
            .context("writing standard output")?,
    }
    Ok(())
}

fn print_diagnostics(input: &str, report: &Report, quiet: bool) {
    for diagnostic in report.diagnostics() {
        if quiet && diagnostic.severity == imd1_engine::Severity::Warning {
            continue;
        }
        eprintln!("{input}: {diagnostic}");
    }
}

fn exit_code(report: &Report, strict: bool) -> i32 {
    if report.has_errors() || (strict && !report.is_empty()) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imd1_engine::{DiagnosticKind, Severity};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn io_args(input: &str) -> IoArgs {
        IoArgs {
            input: input.to_string(),
            output: None,
            bib_dir: None,
        }
    }

    #[test]
    fn test_cli_parses_html_command() {
        let cli = Cli::try_parse_from([
            "imd1", "html", "doc.imd", "--mode", "body", "-o", "out.html",
        ])
        .unwrap();
        let Command::Html { io, mode } = cli.command else {
            panic!("expected html command");
        };
        assert_eq!(io.input, "doc.imd");
        assert_eq!(io.output, Some(PathBuf::from("out.html")));
        assert_eq!(mode, Some(HtmlMode::Body));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["imd1", "html", "doc.imd", "--mode", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_mode_ignores_case() {
        let cli = Cli::try_parse_from(["imd1", "html", "doc.imd", "--mode", "DIRECT"]).unwrap();
        let Command::Html { mode, .. } = cli.command else {
            panic!("expected html command");
        };
        assert_eq!(mode, Some(HtmlMode::Direct));
    }

    fn logged(target: &str, level: log::Level) -> bool {
        let cli = Cli::try_parse_from(["imd1", "check", "doc.imd"]).unwrap();
        let logger = logger(&cli, &Config::default(), None).build();
        logger.matches(&log::Record::builder().target(target).level(level).build())
    }

    #[test]
    fn test_rust_log_overrides_flag_level() {
        let cli = Cli::try_parse_from(["imd1", "check", "doc.imd"]).unwrap();
        let config = Config::default();
        assert_eq!(logger(&cli, &config, None).build().filter(), log::LevelFilter::Warn);
        assert_eq!(
            logger(&cli, &config, Some("debug")).build().filter(),
            log::LevelFilter::Debug
        );

        let quiet = Cli::try_parse_from(["imd1", "-q", "check", "doc.imd"]).unwrap();
        assert_eq!(
            logger(&quiet, &config, Some("trace")).build().filter(),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_level_applies_without_flags() {
        let cli = Cli::try_parse_from(["imd1", "check", "doc.imd"]).unwrap();
        let config = Config {
            log_level: Some("info".to_string()),
            ..Config::default()
        };
        assert_eq!(logger(&cli, &config, None).build().filter(), log::LevelFilter::Info);

        let verbose = Cli::try_parse_from(["imd1", "-vv", "check", "doc.imd"]).unwrap();
        assert_eq!(logger(&verbose, &config, None).build().filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_diagnostics_module_stays_muted() {
        assert!(!logged("imd1_engine::diagnostics", log::Level::Error));
        assert!(logged("imd1_engine::render", log::Level::Warn));
    }

    #[test]
    fn test_bibliography_base_prefers_flag() {
        let mut io = io_args("docs/paper.imd");
        let config = Config {
            bibliography_dir: Some(PathBuf::from("/refs")),
            ..Config::default()
        };
        assert_eq!(bibliography_base(&io, &config), Some(PathBuf::from("/refs")));
        assert_eq!(
            bibliography_base(&io, &Config::default()),
            Some(PathBuf::from("docs"))
        );
        io.bib_dir = Some(PathBuf::from("local"));
        assert_eq!(bibliography_base(&io, &config), Some(PathBuf::from("local")));
    }

    #[test]
    fn test_stdin_has_no_base() {
        assert_eq!(bibliography_base(&io_args("-"), &Config::default()), None);
    }

    #[test]
    fn test_exit_code() {
        let mut report = Report::new();
        assert_eq!(exit_code(&report, true), 0);
        report.warn(DiagnosticKind::DanglingReference { tag: "x".into() }, None);
        assert_eq!(exit_code(&report, false), 0);
        assert_eq!(exit_code(&report, true), 1);
        report.error(
            DiagnosticKind::UnreadableBibliographyFile {
                source_name: "a.json".into(),
                reason: "missing".into(),
            },
            None,
        );
        assert_eq!(exit_code(&report, false), 1);
        assert!(report.diagnostics().iter().any(|d| d.severity == Severity::Error));
    }

    #[test]
    fn test_compile_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("doc.imd");
        std::fs::write(&input, "Hello *there*").unwrap();
        let output = dir.path().join("out/doc.html");
        let io = IoArgs {
            input: input.to_string_lossy().into_owned(),
            output: Some(output.clone()),
            bib_dir: None,
        };

        let code = compile(
            &io,
            &Config::default(),
            OutputFormat::Html,
            HtmlMode::Direct,
            true,
        )
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "<p>Hello <em>there</em></p>\n"
        );
    }
}
