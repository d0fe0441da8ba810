//! `snowflake-site` command line

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snowflake_site::{commands, server, Site};

/// Build and preview the Snowflake landing page and blog
#[derive(Parser)]
#[command(name = "snowflake-site", version, long_about = None)]
struct Cli {
    /// Site directory holding `_config.yml` (defaults to the working directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options of the preview server
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct ServeArgs {
    #[arg(short, long, default_value_t = 4000)]
    port: u16,

    /// Host name or address to listen on
    #[arg(short, long, default_value = "localhost")]
    ip: String,

    /// Open the home page in a browser once listening
    #[arg(short, long)]
    open: bool,

    /// Serve the current output only: no rebuilds, no live reload
    #[arg(long = "static")]
    no_watch: bool,
}

/// Scaffold for `new`
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
struct NewArgs {
    /// Title; the directory name is its slug
    title: String,

    /// `post` (listed on the blog) or `page`
    #[arg(short, long, default_value = "post")]
    layout: String,

    /// Route to publish at instead of the default
    #[arg(short, long)]
    path: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Render the site into the public directory
    #[command(alias = "g")]
    Generate {
        /// Keep running and rebuild whenever content or config changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Render, then serve the public directory with live reload
    #[command(alias = "s")]
    Server(ServeArgs),

    /// Delete the public directory
    Clean,

    /// Print loaded records: post, page or category
    List {
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Write a new content file with front-matter filled in
    New(NewArgs),

    /// Give every flat `name.md` its own `name/index.md` directory
    Nest,

    /// Print the version
    Version,
}

/// Default directive for the env filter
fn log_filter(debug: bool) -> &'static str {
    if debug {
        "snowflake_site=debug,info"
    } else {
        "snowflake_site=info"
    }
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter(debug).into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(command: Command, base_dir: PathBuf) -> Result<()> {
    if command == Command::Version {
        println!("snowflake-site {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let site = Site::new(&base_dir)?;

    match command {
        Command::Generate { watch } => {
            commands::generate::run(&site)?;
            println!("Site written to {:?}", site.public_dir);
            if watch {
                tokio::task::spawn_blocking(move || commands::generate::watch(&site)).await??;
            }
        }
        Command::Server(args) => {
            site.generate()?;
            server::start(&site, &args.ip, args.port, !args.no_watch, args.open).await?;
        }
        Command::Clean => {
            site.clean()?;
            println!("Removed {:?}", site.public_dir);
        }
        Command::List { r#type } => commands::list::run(&site, &r#type)?,
        Command::New(args) => {
            let file =
                commands::new::create_post(&site, &args.title, &args.layout, args.path.as_deref())?;
            println!("Created {:?}", file);
        }
        Command::Nest => {
            let nested = commands::nest::run(&site)?;
            println!("Nested {} files", nested.len());
        }
        Command::Version => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    run(cli.command, base_dir).await
}
