//! TavilyKit CLI - run Tavily tools from the command line or as an MCP server

mod mcp;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use tavilykit::{
    ApiClient, CancellationToken, Category, ClientConfig, ContentFormat, CrawlRequest, CrawlScope,
    ExtractDepth, ExtractRequest, MapRequest, SearchDepth, SearchRequest, SearchTopic,
    TavilyError, TimeRange, Tool, API_KEY_ENV, BASE_ADDRESS_ENV, DEFAULT_BASE_ADDRESS,
    TOOL_LLMTXT,
};
use tracing_subscriber::EnvFilter;

/// Output format for operation subcommands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rendered text, as returned to tool callers
    #[default]
    Text,
    /// Decoded response re-encoded as JSON
    Json,
}

/// TavilyKit - Tavily search, extract, crawl and map tools
#[derive(Parser, Debug)]
#[command(name = "tavilykit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,

    /// Tavily API key
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Tavily API base address
    #[arg(long, global = true, env = BASE_ADDRESS_ENV, default_value = DEFAULT_BASE_ADDRESS)]
    base_address: String,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Search the web
    Search(SearchArgs),
    /// Extract content from URLs
    Extract(ExtractArgs),
    /// Crawl a site from a root URL
    Crawl(CrawlArgs),
    /// Map the URLs of a site
    Map(MapArgs),
    /// Show API key and account usage
    Usage,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Search depth (basic, advanced)
    #[arg(long)]
    depth: Option<SearchDepth>,

    /// Topic (general, news)
    #[arg(long)]
    topic: Option<SearchTopic>,

    /// Days back, news topic only
    #[arg(long)]
    days: Option<u32>,

    /// Time range (day, week, month, year or d, w, m, y)
    #[arg(long)]
    time_range: Option<TimeRange>,

    /// Only results after this date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Only results before this date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,

    /// Maximum number of results (5-20)
    #[arg(long)]
    max_results: Option<u32>,

    /// Include a generated answer
    #[arg(long)]
    include_answer: bool,

    /// Include images
    #[arg(long)]
    include_images: bool,

    /// Include image descriptions
    #[arg(long)]
    include_image_descriptions: bool,

    /// Include raw page content
    #[arg(long)]
    include_raw_content: bool,

    /// Include favicons
    #[arg(long)]
    include_favicon: bool,

    /// Restrict to a domain (repeatable)
    #[arg(long = "include-domain")]
    include_domains: Vec<String>,

    /// Exclude a domain (repeatable)
    #[arg(long = "exclude-domain")]
    exclude_domains: Vec<String>,

    /// Boost results from a country
    #[arg(long)]
    country: Option<String>,
}

impl SearchArgs {
    fn into_request(self) -> SearchRequest {
        let defaults = SearchRequest::new(self.query);
        SearchRequest {
            search_depth: self.depth.unwrap_or_default(),
            topic: self.topic.unwrap_or_default(),
            days: self.days.unwrap_or(defaults.days),
            time_range: self.time_range,
            start_date: self.start_date,
            end_date: self.end_date,
            max_results: self.max_results.unwrap_or(defaults.max_results),
            include_answer: self.include_answer,
            include_images: self.include_images,
            include_image_descriptions: self.include_image_descriptions,
            include_raw_content: self.include_raw_content,
            include_favicon: self.include_favicon,
            include_domains: self.include_domains,
            exclude_domains: self.exclude_domains,
            country: self.country,
            ..defaults
        }
        .finalize()
    }
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// URLs to extract
    #[arg(required = true)]
    urls: Vec<String>,

    /// Extraction depth (basic, advanced)
    #[arg(long)]
    depth: Option<ExtractDepth>,

    /// Content format (markdown, text)
    #[arg(long)]
    format: Option<ContentFormat>,

    /// Include images
    #[arg(long)]
    include_images: bool,

    /// Include favicons
    #[arg(long)]
    include_favicon: bool,
}

impl ExtractArgs {
    fn into_request(self) -> ExtractRequest {
        ExtractRequest {
            urls: self.urls,
            extract_depth: self.depth.unwrap_or_default(),
            include_images: self.include_images,
            format: self.format.unwrap_or_default(),
            include_favicon: self.include_favicon,
        }
    }
}

#[derive(Args, Debug)]
struct ScopeArgs {
    /// Maximum depth from the root URL (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: Option<u32>,

    /// Links followed per page (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_breadth: Option<u32>,

    /// Total links processed (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,

    /// Natural language instructions
    #[arg(long)]
    instructions: Option<String>,

    /// Path regex to select (repeatable)
    #[arg(long = "select-path")]
    select_paths: Vec<String>,

    /// Domain regex to select (repeatable)
    #[arg(long = "select-domain")]
    select_domains: Vec<String>,

    /// Follow external links
    #[arg(long)]
    allow_external: bool,

    /// Page category filter (repeatable)
    #[arg(long = "category")]
    categories: Vec<Category>,
}

impl ScopeArgs {
    fn into_scope(self) -> CrawlScope {
        let defaults = CrawlScope::default();
        CrawlScope {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_breadth: self.max_breadth.unwrap_or(defaults.max_breadth),
            limit: self.limit.unwrap_or(defaults.limit),
            instructions: self.instructions,
            select_paths: self.select_paths,
            select_domains: self.select_domains,
            allow_external: self.allow_external,
            categories: self.categories,
        }
    }
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Root URL
    url: String,

    #[command(flatten)]
    scope: ScopeArgs,

    /// Extraction depth (basic, advanced)
    #[arg(long)]
    depth: Option<ExtractDepth>,

    /// Content format (markdown, text)
    #[arg(long)]
    format: Option<ContentFormat>,

    /// Include favicons
    #[arg(long)]
    include_favicon: bool,
}

impl CrawlArgs {
    fn into_request(self) -> CrawlRequest {
        CrawlRequest {
            url: self.url,
            scope: self.scope.into_scope(),
            extract_depth: self.depth.unwrap_or_default(),
            format: self.format.unwrap_or_default(),
            include_favicon: self.include_favicon,
        }
    }
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Root URL
    url: String,

    #[command(flatten)]
    scope: ScopeArgs,
}

impl MapArgs {
    fn into_request(self) -> MapRequest {
        MapRequest {
            url: self.url,
            scope: self.scope.into_scope(),
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    let Some(command) = cli.command else {
        eprintln!("Usage: tavilykit search <QUERY>");
        eprintln!("   or: tavilykit mcp");
        eprintln!("   or: tavilykit --help");
        std::process::exit(1);
    };

    let config = ClientConfig {
        base_address: cli.base_address,
        api_key: cli.api_key.unwrap_or_default(),
    };
    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let token = CancellationToken::new();
    cancel_on_ctrl_c(token.clone());

    if let Commands::Mcp = command {
        if let Err(e) = mcp::run_server(client, token).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let result = match cli.output {
        OutputFormat::Text => run_text(client, command, &token).await,
        OutputFormat::Json => run_json(client, command, &token).await,
    };

    match result {
        Ok(output) => writeln_safe(&output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run an operation through the tool adapter and return the rendered text
async fn run_text(
    client: ApiClient,
    command: Commands,
    token: &CancellationToken,
) -> Result<String, TavilyError> {
    let tool = Tool::builder().api(client).build()?;
    match command {
        Commands::Search(args) => tool.search(args.into_request(), token).await,
        Commands::Extract(args) => tool.extract(args.into_request(), token).await,
        Commands::Crawl(args) => tool.crawl(args.into_request(), token).await,
        Commands::Map(args) => tool.map(args.into_request(), token).await,
        Commands::Usage => tool.usage(token).await,
        Commands::Mcp => unreachable!("mcp is dispatched before operations"),
    }
}

/// Run an operation against the client and return the response as JSON
async fn run_json(
    client: ApiClient,
    command: Commands,
    token: &CancellationToken,
) -> Result<String, TavilyError> {
    match command {
        Commands::Search(args) => {
            let response = client.search(&args.into_request(), token).await?;
            Ok(to_json(&response))
        }
        Commands::Extract(args) => {
            let response = client.extract(&args.into_request(), token).await?;
            Ok(to_json(&response))
        }
        Commands::Crawl(args) => Ok(to_json(&client.crawl(&args.into_request(), token).await?)),
        Commands::Map(args) => Ok(to_json(&client.map(&args.into_request(), token).await?)),
        Commands::Usage => Ok(to_json(&client.usage(token).await?)),
        Commands::Mcp => unreachable!("mcp is dispatched before operations"),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    })
}

/// Cancel the token when the process receives Ctrl-C
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight requests");
            token.cancel();
        }
    });
}

/// Log to stderr so stdout stays clean for output and MCP traffic
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
