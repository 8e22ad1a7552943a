use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colcomplete::dataset::Dataset;
use colcomplete::filter::{RowFilter, paginate};
use colcomplete::output;
use colcomplete::registry::FieldRegistry;
use colcomplete::utils::{AppConfig, get_config_path};
use std::path::PathBuf;
use termcolor::ColorChoice;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "colcomplete")]
#[command(about = "Token-boundary autocomplete for the columns of a table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dataset to load (overrides the config file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (defaults to the app data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    /// Log level (trace, debug, info, warn, error); RUST_LOG adds per-module directives
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the suggestions for a query
    Suggest {
        /// Field (column) to complete
        field: String,

        /// Text typed so far
        query: String,

        /// Let each character match either case
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Maximum suggestions (0 = all; defaults to the config value)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print rows whose FIELD starts with PREFIX
    Filter {
        /// FIELD=PREFIX selections, all of which must hold
        selections: Vec<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show the indexed fields and their trie sizes
    Fields,
    /// Show the effective config, or write a default one
    Config {
        /// Write the default config to the config path
        #[arg(long)]
        init: bool,
    },
    /// Interactive autocomplete (default)
    #[cfg(feature = "interactive")]
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // Writing a config must not require one to exist already
    if let Some(Commands::Config { init: true }) = cli.command {
        return init_config(cli.config);
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data.clone() {
        config.data = Some(data);
    }
    let color = ColorChoice::from(cli.color);

    match cli.command {
        Some(Commands::Suggest {
            field,
            query,
            ignore_case,
            limit,
        }) => {
            let dataset = load_dataset(&config)?;
            config.ensure_filterable(&dataset, &field)?;
            let registry = FieldRegistry::build(&dataset, std::slice::from_ref(&field))?;
            let case_sensitive = !ignore_case;
            let suggestions = registry.suggest(
                &field,
                &query,
                case_sensitive,
                limit.unwrap_or(config.max_suggestions),
            )?;
            output::print_suggestions(
                &field,
                &suggestions,
                &query,
                case_sensitive,
                config.suggestion_max_length,
                color,
            )?;
        }
        Some(Commands::Filter { selections, page }) => {
            let dataset = load_dataset(&config)?;
            let fields = config.filter_fields(&dataset);
            let filter = RowFilter::from_args(&dataset, &fields, &selections)?;
            let rows = filter.apply(&dataset);
            let page = paginate(&rows, page.saturating_sub(1), config.page_size);
            output::print_rows(&dataset, &page, color)?;
        }
        Some(Commands::Fields) => {
            let dataset = load_dataset(&config)?;
            let fields = config.filter_fields(&dataset);
            let registry = FieldRegistry::build_with_progress(&dataset, &fields, false)?;
            output::print_field_stats(&registry.stats(), color)?;
        }
        Some(Commands::Config { .. }) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        #[cfg(feature = "interactive")]
        Some(Commands::Tui) | None => run_interactive(&config)?,
        #[cfg(not(feature = "interactive"))]
        None => bail!("Built without the `interactive` feature; use a subcommand"),
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn run_interactive(config: &AppConfig) -> Result<()> {
    let dataset = load_dataset(config)?;
    let fields = config.filter_fields(&dataset);
    let registry = FieldRegistry::build_with_progress(&dataset, &fields, false)?;
    colcomplete::tui::run(dataset, registry, config)
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };
    if path.exists() {
        bail!("Config already exists at {}", path.display());
    }
    AppConfig::default().save(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let path = config
        .data
        .as_deref()
        .context("No dataset given; pass --data or set \"data\" in the config")?;
    Dataset::load(path)
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // RUST_LOG directives refine the level, e.g. RUST_LOG=colcomplete::trie=trace
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
