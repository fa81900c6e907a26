//! popwire CLI Client
//!
//! Command-line interface for blocking pops and client identification.

use clap::{Parser, Subcommand, ValueEnum};
use popwire::{
    BatchPopResult, ClientConfig, Direction, LibAttribute, PopClient, PopResult, ScoredEntry,
};
use tracing_subscriber::{fmt, EnvFilter};

/// popwire CLI
#[derive(Parser, Debug)]
#[command(name = "popwire-cli")]
#[command(about = "Blocking sorted-set pops and CLIENT SETINFO from the command line")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    /// Extra identity announced in the library name
    #[arg(long)]
    lib_suffix: Option<String>,

    /// Skip the identification handshake before `exec`
    #[arg(long)]
    no_identify: bool,

    /// Socket read timeout in milliseconds (0 = wait as long as the server does)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pop up to COUNT entries from the first non-empty sorted set
    Bzmpop {
        /// Seconds to wait (0 = forever)
        timeout: f64,

        /// Sorted sets, checked in order
        #[arg(required = true)]
        keys: Vec<String>,

        /// Pop the highest scores instead of the lowest
        #[arg(long)]
        max: bool,

        /// Number of entries to pop
        #[arg(long)]
        count: Option<u64>,
    },

    /// Pop the lowest-scored entry from the first non-empty sorted set
    Bzpopmin {
        /// Seconds to wait (0 = forever)
        timeout: f64,

        /// Sorted sets, checked in order
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Pop the highest-scored entry from the first non-empty sorted set
    Bzpopmax {
        /// Seconds to wait (0 = forever)
        timeout: f64,

        /// Sorted sets, checked in order
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Set the library name or version on the connection
    Setinfo {
        /// Attribute to set
        #[arg(value_enum)]
        attribute: AttributeArg,

        /// Value to announce
        value: String,
    },

    /// Send an arbitrary command
    Exec {
        /// Command name followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AttributeArg {
    Name,
    Ver,
}

impl From<AttributeArg> for LibAttribute {
    fn from(arg: AttributeArg) -> Self {
        match arg {
            AttributeArg::Name => LibAttribute::Name,
            AttributeArg::Ver => LibAttribute::Version,
        }
    }
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,popwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = ClientConfig::builder()
        .addr(&args.server)
        .read_timeout_ms(args.read_timeout_ms)
        .identify(!args.no_identify);
    if let Some(suffix) = &args.lib_suffix {
        builder = builder.lib_name_suffix(suffix);
    }
    let config = builder.build();

    let mut client = match PopClient::connect(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut client, args.command) {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(client: &mut PopClient<popwire::TcpConnection>, command: Commands) -> popwire::Result<()> {
    match command {
        Commands::Bzmpop {
            timeout,
            keys,
            max,
            count,
        } => {
            let direction = if max { Direction::Max } else { Direction::Min };
            let result = client.bzmpop(timeout, &keys, direction, count)?;
            println!("{}", format_batch(result.as_ref()));
        }
        Commands::Bzpopmin { timeout, keys } => {
            let result = client.bzpopmin(&keys, timeout)?;
            println!("{}", format_single(result.as_ref()));
        }
        Commands::Bzpopmax { timeout, keys } => {
            let result = client.bzpopmax(&keys, timeout)?;
            println!("{}", format_single(result.as_ref()));
        }
        Commands::Setinfo { attribute, value } => {
            let accepted = client.client_setinfo(attribute.into(), &value)?;
            println!("{}", if accepted { "OK" } else { "(skipped)" });
        }
        Commands::Exec { tokens } => {
            let reply = client.execute(&tokens)?;
            println!("{}", reply);
        }
    }
    Ok(())
}

fn format_entry(entry: &ScoredEntry) -> String {
    format!("{} {}", String::from_utf8_lossy(&entry.member), entry.score)
}

fn format_single(result: Option<&PopResult>) -> String {
    match result {
        None => "(nil)".to_string(),
        Some(popped) => format!(
            "{}: {}",
            String::from_utf8_lossy(&popped.key),
            format_entry(&popped.entry)
        ),
    }
}

fn format_batch(result: Option<&BatchPopResult>) -> String {
    match result {
        None => "(nil)".to_string(),
        Some(popped) => {
            let mut out = format!("{}:", String::from_utf8_lossy(&popped.key));
            for entry in &popped.entries {
                out.push_str("\n  ");
                out.push_str(&format_entry(entry));
            }
            out
        }
    }
}
