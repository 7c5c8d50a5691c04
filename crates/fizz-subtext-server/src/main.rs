//! fizz-subtext server — entry point.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use fizz_subtext::{build_report, locate, DivisorMapping, Range};
use fizz_subtext_server::config::{ConfigOverrides, ServerConfig};
use fizz_subtext_server::handlers::AppState;
use fizz_subtext_server::transport::{http::ROUTES, HttpTransport};

#[derive(Parser)]
#[command(
    name = "fizz-subtext-server",
    about = "Range reports and fragment search over upstream JSON endpoints",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Listen address (host:port).
    #[arg(long)]
    addr: Option<String>,

    /// Upstream URL scheme (http or https).
    #[arg(long)]
    scheme: Option<String>,

    /// Upstream host, optionally with a port.
    #[arg(long)]
    host: Option<String>,

    /// Attempts per upstream call before giving up.
    #[arg(long)]
    attempts: Option<u32>,

    /// Milliseconds to wait between attempts.
    #[arg(long)]
    retry_delay_ms: Option<u64>,

    /// Candidate name embedded in submitted results.
    #[arg(long)]
    candidate: Option<String>,
}

impl From<ServeArgs> for ConfigOverrides {
    fn from(args: ServeArgs) -> Self {
        ConfigOverrides {
            addr: args.addr,
            scheme: args.scheme,
            host: args.host,
            attempts: args.attempts,
            retry_delay_ms: args.retry_delay_ms,
            candidate: args.candidate,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve(ServeArgs),

    /// Print a range report without contacting any upstream.
    Report {
        /// Lower bound (negative values clamp to 0).
        #[arg(long, allow_hyphen_values = true)]
        lower: i64,

        /// Upper bound (negative values clamp to 0).
        #[arg(long, allow_hyphen_values = true)]
        upper: i64,

        /// Divisor label as DIVISOR=LABEL; repeatable, order is kept.
        #[arg(long = "divisor", value_parser = parse_divisor_arg)]
        divisors: Vec<(i64, String)>,
    },

    /// Locate fragments in a text and print the results as JSON.
    Locate {
        /// Text to search.
        #[arg(long)]
        text: String,

        /// Fragments to look for.
        fragments: Vec<String>,
    },

    /// Print resolved upstream endpoints and inbound routes as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   fizz-subtext-server completions bash > ~/.local/share/bash-completion/completions/fizz-subtext-server
    ///   fizz-subtext-server completions zsh > ~/.zfunc/_fizz-subtext-server
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn parse_divisor_arg(raw: &str) -> Result<(i64, String), String> {
    let (divisor, label) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIVISOR=LABEL, got '{raw}'"))?;
    let divisor = divisor
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid divisor '{divisor}': {e}"))?;
    Ok((divisor, label.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            let config = ServerConfig::resolve(args.into())?;
            tracing::info!("fizz-subtext server");
            tracing::info!(
                attempts = config.retry.attempts(),
                delay_ms = config.retry.delay.as_millis() as u64,
                "Retry policy"
            );

            let state = AppState::new(&config)?;
            let transport = HttpTransport::new(state);
            transport.run(&config.listen_addr).await?;
        }

        Commands::Report {
            lower,
            upper,
            divisors,
        } => {
            let range = Range::new(lower, upper);
            let mapping: DivisorMapping = divisors.into_iter().collect();
            // Carriage returns would overwrite each other on a terminal.
            print!("{}", build_report(&range, &mapping).replace('\r', "\n"));
        }

        Commands::Locate { text, fragments } => {
            let results = locate(&fragments, &text);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Commands::Info => {
            let config = ServerConfig::resolve(ConfigOverrides::default())?;
            let endpoints = &config.endpoints;
            let info = serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "listen_addr": config.listen_addr,
                "candidate": config.candidate,
                "retry": {
                    "attempts": config.retry.attempts(),
                    "delay_ms": config.retry.delay.as_millis() as u64,
                },
                "upstream": {
                    "range_info": endpoints.range_info(),
                    "divisor_info": endpoints.divisor_info(),
                    "text_to_search": endpoints.text_to_search(),
                    "subtexts": endpoints.subtexts(),
                    "submit_results": endpoints.submit_results(),
                },
                "routes": ROUTES
                    .iter()
                    .map(|(path, what)| serde_json::json!({ "path": path, "description": what }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "fizz-subtext-server",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
