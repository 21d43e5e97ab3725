use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newswire::config::{find_config_file, get_config, load_config, Config};
use newswire::models::{PaginationPatch, SearchPatch};
use newswire::params::ParameterStore;
use newswire::reader::{Command, Reader};
use newswire::sources::{NewsApiSource, NewsSource};
use newswire::ui::{ListStyle, Render, Spinner, TerminalRenderer};

/// Newswire - browse and search news headlines from the terminal
#[derive(Parser, Debug)]
#[command(name = "newswire")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and search news headlines from the terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Search and pagination options shared by the subcommands
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Free-text search query (uses the search endpoint; cannot be
    /// combined with --category/--country)
    query: Option<String>,

    /// Category filter (e.g. business, sports)
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// Two-letter country code filter (e.g. us, de)
    #[arg(long, short = 'C')]
    country: Option<String>,

    /// Page to fetch, 1-based
    #[arg(long, short)]
    page: Option<u32>,

    /// Articles per page
    #[arg(long)]
    page_size: Option<u32>,

    /// Initialize all parameters from a query string
    /// (e.g. "q=rust&page=2&pageSize=50")
    #[arg(long)]
    from_query: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one page of headlines and print it
    #[command(alias = "s")]
    Search {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Interactive reading session with pagination and filters
    #[command(alias = "r")]
    Read {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("newswire={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    let source = build_source(&cli, &config)?;

    match cli.command {
        Some(Commands::Search { filters }) => {
            let store = initial_store(&filters, &config);
            let renderer = TerminalRenderer::with_list_style(list_style(cli.output));
            let mut reader = Reader::new(store, source, renderer);
            fetch_once(&mut reader, cli.quiet).await;
        }

        Some(Commands::Read { filters }) => {
            let store = initial_store(&filters, &config);
            let renderer = TerminalRenderer::interactive();
            let reader = Reader::new(store, source, renderer);
            run_read_session(reader, cli.quiet).await?;
        }

        None => {
            println!("newswire v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Quick start:");
            println!("  newswire search                      - Top headlines");
            println!("  newswire search \"rust language\"      - Full-text search");
            println!("  newswire search -c science -C us     - Filtered headlines");
            println!("  newswire read                        - Interactive session");
            println!();
            println!("Run 'newswire --help' for all options.");
        }
    }

    Ok(())
}

/// Build the HTTP source from configuration and CLI overrides.
fn build_source(cli: &Cli, config: &Config) -> Result<NewsApiSource> {
    let api_key = config
        .api
        .key
        .clone()
        .or_else(|| std::env::var("NEWSWIRE_API_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured. Set NEWSWIRE_API_KEY or add `key` to the [api] section of newswire.toml"
            )
        })?;

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.api.timeout_secs));
    Ok(NewsApiSource::with_base_url(
        api_key,
        &config.api.base_url,
        timeout,
    ))
}

/// Build the initial parameter store: query string first, then explicit
/// flags on top, with the configured default page size underneath.
fn initial_store(filters: &FilterArgs, config: &Config) -> ParameterStore {
    let mut store = ParameterStore::from_query(filters.from_query.as_deref().unwrap_or(""));

    let query_sets_page_size = filters
        .from_query
        .as_deref()
        .is_some_and(|q| q.contains("pageSize="));
    if !query_sets_page_size {
        store.set_pagination(PaginationPatch::new().page_size(config.defaults.page_size));
    }

    let mut main = SearchPatch::new();
    if let Some(q) = &filters.query {
        main.q = Some(q.clone());
    }
    if let Some(category) = &filters.category {
        main.category = Some(category.clone());
    }
    if let Some(country) = &filters.country {
        main.country = Some(country.clone());
    }
    store.set_main(main);

    let mut pagination = PaginationPatch::new();
    pagination.page = filters.page;
    pagination.page_size = filters.page_size;
    store.set_pagination(pagination);

    store
}

fn list_style(format: OutputFormat) -> ListStyle {
    match format {
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                ListStyle::Table
            } else {
                ListStyle::Json
            }
        }
        OutputFormat::Table => ListStyle::Table,
        OutputFormat::Json => ListStyle::Json,
        OutputFormat::Plain => ListStyle::Compact,
    }
}

/// One fetch-and-render cycle with a spinner while the request flies.
async fn fetch_once<S: NewsSource, R: Render>(reader: &mut Reader<S, R>, quiet: bool) {
    let spinner = (!quiet && std::io::stderr().is_terminal())
        .then(|| Spinner::new("Fetching news..."));

    let ticket = reader.begin_fetch();
    let result = reader
        .source()
        .fetch(ticket.main(), ticket.pagination())
        .await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    reader.apply_result(ticket, result);
}

/// Interactive prompt loop: each input line maps to a command for the
/// dispatcher, page inputs go through the pagination bar.
async fn run_read_session(
    mut reader: Reader<NewsApiSource, TerminalRenderer>,
    quiet: bool,
) -> Result<()> {
    fetch_once(&mut reader, quiet).await;

    let stdin = std::io::stdin();
    loop {
        if !quiet {
            println!();
            println!(
                "?{}  |  page: <n>  next: n  prev: p  search: s <text>  filter: f <category> [country]  clear: c  quit: q",
                reader.store().query()
            );
        }
        print!("newswire> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        let command = match parse_input(line, &reader) {
            Input::Quit => break,
            Input::Noop => continue,
            Input::Message(msg) => {
                println!("{}", msg);
                continue;
            }
            Input::Command(command) => command,
        };

        reader.apply_command(&command);
        fetch_once(&mut reader, quiet).await;
    }

    Ok(())
}

/// What an interactive input line resolved to.
enum Input {
    Command(Command),
    Message(String),
    Noop,
    Quit,
}

fn parse_input<S: NewsSource, R: Render>(line: &str, reader: &Reader<S, R>) -> Input {
    if line.is_empty() {
        return Input::Noop;
    }

    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "q" | "quit" | "exit" => Input::Quit,

        "n" | "next" => page_input(reader, newswire::pagination::NEXT_LABEL),
        "p" | "prev" => page_input(reader, newswire::pagination::PREV_LABEL),

        "s" | "search" => {
            if rest.is_empty() {
                Input::Message("Usage: s <search text>".to_string())
            } else {
                Input::Command(Command::ApplyFilters {
                    q: rest.to_string(),
                    category: String::new(),
                    country: String::new(),
                })
            }
        }

        "f" | "filter" => {
            let mut parts = rest.split_whitespace();
            let category = parts.next().unwrap_or_default().to_string();
            let country = parts.next().unwrap_or_default().to_string();
            if category.is_empty() && country.is_empty() {
                Input::Message("Usage: f <category> [country]".to_string())
            } else {
                Input::Command(Command::ApplyFilters {
                    q: String::new(),
                    category,
                    country,
                })
            }
        }

        "c" | "clear" => Input::Command(Command::ClearFilters),

        _ if head.chars().all(|c| c.is_ascii_digit()) => page_input(reader, head),

        _ => Input::Message(format!("Unknown input '{}'; q quits", line)),
    }
}

/// Route a page selection through the pagination bar so inert buttons
/// (ellipsis, disabled arrows, the current page) stay inert.
fn page_input<S: NewsSource, R: Render>(reader: &Reader<S, R>, label: &str) -> Input {
    match reader.pagination() {
        Some(bar) => match bar.activate_label(label) {
            Some(page) => Input::Command(Command::ChangePage(page)),
            None => Input::Noop,
        },
        None => Input::Noop,
    }
}
