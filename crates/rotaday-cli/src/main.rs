use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rotaday", version, about = "Weekly project rotation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw today's project, weighted by remaining weekly quota
    Claim {
        /// Seed the draw for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Credit a project for today regardless of quota
    Force {
        /// Project name or id
        project: String,
    },
    /// Show today's project
    Today,
    /// Weekly progress and draw odds
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Chance of each project being drawn today
    Odds {
        #[arg(long)]
        json: bool,
    },
    /// Days owed from past weeks
    Backlog {
        #[arg(long)]
        json: bool,
    },
    /// Days worked per project
    Log {
        #[arg(long)]
        json: bool,
    },
    /// Project management
    Project {
        #[command(subcommand)]
        action: commands::project::ProjectAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Replace the stored state with a state or legacy savefile JSON
    Import {
        /// Path to the JSON file
        path: std::path::PathBuf,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "rotaday_core=warn,rotaday=warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Claim { seed } => commands::claim::auto(seed),
        Commands::Force { project } => commands::claim::force(&project),
        Commands::Today => commands::claim::today(),
        Commands::Status { json } => commands::report::status(json),
        Commands::Odds { json } => commands::report::odds(json),
        Commands::Backlog { json } => commands::report::backlog(json),
        Commands::Log { json } => commands::report::log(json),
        Commands::Project { action } => commands::project::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Import { path } => commands::import::run(&path),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rotaday", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
