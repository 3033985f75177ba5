mod commands;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use opts::GlobalOpts;

#[derive(Parser, Debug)]
#[command(
    name = "helio",
    version,
    about = "Resolve, download, and cache spacecraft ephemeris kernels"
)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List bodies with registered kernel sources
    Bodies,

    /// List kernels available remotely for a body
    Kernels(commands::KernelsArgs),

    /// Download kernels for a body into the local cache
    Fetch(commands::FetchArgs),

    /// Download only the most recent kernel for a body
    Latest(commands::LatestArgs),

    /// Download and load a JPL planetary ephemeris
    Ephemeris(commands::EphemerisArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Bodies => commands::bodies(&cli.opts),
        Command::Kernels(args) => commands::kernels(&cli.opts, args),
        Command::Fetch(args) => commands::fetch(&cli.opts, args),
        Command::Latest(args) => commands::latest(&cli.opts, args),
        Command::Ephemeris(args) => commands::ephemeris(&cli.opts, args),
    }
}
