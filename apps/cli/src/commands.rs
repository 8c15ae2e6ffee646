//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use moduledoc_core::{PageBuilder, PagePersister};
use moduledoc_shared::{
    DocConfig, ModuleGroups, RenderedPages, init_config, load_config, resolve_config_path,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// moduledoc — generate Markdown reference pages for modules and commands.
#[derive(Parser)]
#[command(
    name = "moduledoc",
    version,
    about = "Generate cross-linked Markdown reference pages from parsed module documentation.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./moduledoc.toml, then the user config dir).
    #[arg(long, global = true, env = "MODULEDOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the reference pages and write them to the output directory.
    Generate {
        /// Module groups JSON produced by the module parser.
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (overrides `output.dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// HTML-escape documentation and usage text.
        #[arg(long)]
        escape_html: bool,
    },

    /// Render the pages and fail if the output directory is out of date.
    Check {
        /// Module groups JSON produced by the module parser.
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (overrides `output.dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// HTML-escape documentation and usage text.
        #[arg(long)]
        escape_html: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default moduledoc.toml in the current directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "moduledoc=info,moduledoc_core=info,moduledoc_shared=info",
        1 => "moduledoc=debug,moduledoc_core=debug,moduledoc_shared=debug",
        _ => "moduledoc=trace,moduledoc_core=trace,moduledoc_shared=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().wrap_err("cannot determine working directory")?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Generate {
            input,
            out,
            escape_html,
        } => cmd_generate(config_path, &cwd, &input, out, escape_html),
        Command::Check {
            input,
            out,
            escape_html,
        } => cmd_check(config_path, &cwd, &input, out, escape_html),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&cwd),
            ConfigAction::Show => cmd_config_show(config_path, &cwd),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Pages rendered from an input file, plus where they belong.
struct Rendered {
    pages: RenderedPages,
    persister: PagePersister,
}

fn render(
    config_path: Option<&Path>,
    cwd: &Path,
    input: &Path,
    out: Option<PathBuf>,
    escape_html: bool,
) -> Result<Rendered> {
    let config = load_config(config_path, cwd)?;
    let groups = ModuleGroups::load(input)?;

    info!(
        input = %input.display(),
        categories = groups.len(),
        modules = groups.module_count(),
        "rendering module reference"
    );

    let pages = PageBuilder::new(&config.site)
        .with_escaping(escape_html || config.output.escape_html)
        .build(&groups)?;

    let out_dir = out.unwrap_or_else(|| cwd.join(&config.output.dir));
    Ok(Rendered {
        pages,
        persister: PagePersister::new(out_dir),
    })
}

fn cmd_generate(
    config_path: Option<&Path>,
    cwd: &Path,
    input: &Path,
    out: Option<PathBuf>,
    escape_html: bool,
) -> Result<()> {
    let Rendered { pages, persister } = render(config_path, cwd, input, out, escape_html)?;
    let written = persister.save(&pages)?;

    println!(
        "Wrote {} pages to {}",
        written.len(),
        persister.dir().display()
    );
    Ok(())
}

fn cmd_check(
    config_path: Option<&Path>,
    cwd: &Path,
    input: &Path,
    out: Option<PathBuf>,
    escape_html: bool,
) -> Result<()> {
    let Rendered { pages, persister } = render(config_path, cwd, input, out, escape_html)?;
    let report = persister.check(&pages)?;

    if report.is_clean() {
        println!(
            "{} pages up to date in {}",
            report.up_to_date.len(),
            persister.dir().display()
        );
        return Ok(());
    }

    for name in &report.stale {
        println!("  stale:   {name}");
    }
    for name in &report.missing {
        println!("  missing: {name}");
    }
    Err(eyre!(
        "{} page(s) out of date in {}; run `make module_documentation`",
        report.stale.len() + report.missing.len(),
        persister.dir().display()
    ))
}

fn cmd_config_init(cwd: &Path) -> Result<()> {
    let path = init_config(cwd)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>, cwd: &Path) -> Result<()> {
    match resolve_config_path(config_path, cwd)? {
        Some(path) => println!("# {}", path.display()),
        None => println!("# defaults (no config file found)"),
    }
    let config: DocConfig = load_config(config_path, cwd)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
