// SPDX-License-Identifier: MIT
//
// ctbs — generate Bootstrap 5 color themes from images, with every text
// color at WCAG AAA against its background.
//
// This is the binary that wires the theme engine to the command line:
//
//   ctbs-color  → RGB/HSL/hex primitives
//   ctbs-theme  → palette extraction, role mapping, pairing, correction
//
// Subcommands:
//
//   generate  image(s) + stylesheet registry → JSON name/value map
//   audit     JSON map → every text/background ratio, non-zero on failure
//   pair      variable name → the background it is judged against
//
// Exit codes: 0 success, 1 failure, 2 bad configuration, 3 audit failed.
// Logs go to stderr (`-v` for more, `RUST_LOG` to filter); stdout carries
// only the requested output.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ctbs_theme::config::{DEFAULT_OVERRIDES_FILE, DEFAULT_VARS_FILE};
use ctbs_theme::extract::{DEFAULT_CLUSTERS, ExtractOptions};
use ctbs_theme::{
    AuditReport, GeneratorConfig, MapperConfig, Registry, Result, Theme, ThemeError, Variable,
    audit_against, background_pair_for_name, generate,
};
use ctbs_theme::variable::PREFIX;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_AUDIT: u8 = 3;

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "ctbs",
    about = "Image-derived Bootstrap color themes with AAA text contrast",
    version
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a light + dark theme from an image.
    Generate(GenerateArgs),

    /// Check every text/background pair of a generated theme.
    Audit(AuditArgs),

    /// Show which background a variable is judged against.
    Pair(PairArgs),
}

/// Where the variable registry comes from.
#[derive(Debug, Clone, Args)]
struct RegistryArgs {
    /// Rewritten Bootstrap variables stylesheet.
    #[arg(long, default_value = DEFAULT_VARS_FILE)]
    vars_file: PathBuf,

    /// Optional overrides stylesheet; skipped if missing.
    #[arg(long, default_value = DEFAULT_OVERRIDES_FILE)]
    overrides_file: PathBuf,
}

impl RegistryArgs {
    fn sources(&self) -> [&Path; 2] {
        [self.vars_file.as_path(), self.overrides_file.as_path()]
    }

    fn load(&self) -> Result<Registry> {
        Registry::load(&self.sources())
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Source image for the theme.
    image: PathBuf,

    /// Separate source image for the dark theme.
    #[arg(long)]
    dark_image: Option<PathBuf>,

    /// Palette size for the image (1-32).
    #[arg(long, default_value_t = DEFAULT_CLUSTERS)]
    clusters: u32,

    /// Palette size for the dark image (1-32).
    #[arg(long, default_value_t = DEFAULT_CLUSTERS)]
    dark_clusters: u32,

    /// Skip the smoothing pass before quantization.
    #[arg(long)]
    no_blur: bool,

    /// Give missing hue-band colors the primary's saturation plus 20 (at most 85).
    #[arg(long)]
    harmonize_fallback: bool,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Write the JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateArgs {
    fn config(&self) -> GeneratorConfig {
        let blur = !self.no_blur;
        GeneratorConfig {
            image: self.image.clone(),
            dark_image: self.dark_image.clone(),
            light: ExtractOptions { clusters: self.clusters, blur },
            dark: ExtractOptions { clusters: self.dark_clusters, blur },
            registry_sources: self.registry.sources().iter().map(|p| p.to_path_buf()).collect(),
            mapper: MapperConfig {
                harmonize_fallback: self.harmonize_fallback,
            },
        }
    }
}

#[derive(Debug, Args)]
struct AuditArgs {
    /// Theme JSON produced by `generate`.
    theme: PathBuf,

    /// Also check the theme defines exactly the registry's names.
    #[arg(long)]
    vars_file: Option<PathBuf>,

    /// Extra registry source, used with --vars-file.
    #[arg(long, requires = "vars_file")]
    overrides_file: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct PairArgs {
    /// Variable name, with or without the --CTBS- prefix.
    #[arg(allow_hyphen_values = true)]
    name: String,

    #[command(flatten)]
    registry: RegistryArgs,
}

impl PairArgs {
    fn full_name(&self) -> String {
        if self.name.starts_with(PREFIX) {
            self.name.clone()
        } else {
            format!("{PREFIX}{}", self.name)
        }
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let theme = generate(&args.config())?;
    let json = theme.to_json()?;
    info!(variables = theme.len(), "theme generated");

    // Only a complete theme is ever written.
    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n").map_err(|source| ThemeError::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "theme written");
        }
        None => println!("{json}"),
    }
    Ok(EXIT_SUCCESS)
}

fn run_audit(args: &AuditArgs) -> Result<u8> {
    let json = fs::read_to_string(&args.theme).map_err(|source| ThemeError::Io {
        path: args.theme.clone(),
        source,
    })?;
    let theme = Theme::from_json(&json)?;

    let registry = match &args.vars_file {
        Some(vars) => {
            let mut sources = vec![vars.clone()];
            sources.extend(args.overrides_file.clone());
            Some(Registry::load(&sources)?)
        }
        None => None,
    };

    let report = audit_against(&theme, registry.as_ref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_clean() { EXIT_SUCCESS } else { EXIT_AUDIT })
}

fn print_report(report: &AuditReport) {
    for pair in &report.pairs {
        let verdict = if pair.passes() { "ok  " } else { "FAIL" };
        println!(
            "{verdict} {:>6.2}  {} {} on {} {}",
            pair.ratio, pair.text, pair.text_color, pair.background, pair.background_color
        );
    }
    for (text, background) in &report.unpaired {
        println!("skip          {text} on {background} (no value)");
    }
    for name in &report.stale_companions {
        println!("FAIL          {name} does not match its base color");
    }
    for name in &report.missing {
        println!("FAIL          {name} declared but not defined");
    }
    for name in &report.extra {
        println!("FAIL          {name} defined but not declared");
    }

    let failed = report.failures().count();
    match report.worst() {
        Some(worst) => println!(
            "{} pairs, {failed} below AAA, worst {:.2} ({})",
            report.pairs.len(),
            worst.ratio,
            worst.text
        ),
        None => println!("no text pairs found"),
    }
}

fn run_pair(args: &PairArgs) -> Result<u8> {
    let registry = args.registry.load()?;
    let declared: BTreeSet<Variable> = registry.variables()?.into_iter().map(Variable::base).collect();
    let background = background_pair_for_name(&args.full_name(), &declared)?;
    println!("{background}");
    Ok(EXIT_SUCCESS)
}

fn run(cli: &Cli) -> Result<u8> {
    match &cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Audit(args) => run_audit(args),
        Commands::Pair(args) => run_pair(args),
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

const fn exit_code_for(error: &ThemeError) -> u8 {
    if error.is_config() { EXIT_CONFIG } else { EXIT_FAILURE }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("ctbs: {e}");
            exit_code_for(&e)
        }
    };
    ExitCode::from(code)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
