use clap::{Parser, Subcommand};
use secret_santa::assign::derangement::derangement;
use secret_santa::assign::resolution::resolve_assignments;
use secret_santa::assign::MIN_PARTICIPANTS;
use secret_santa::config::load_config;
use secret_santa::utils::serialization::{load_roster, load_roster_or_default, save_roster};
use secret_santa::web::ExchangeServer;
use std::path::PathBuf;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Discord-roster secret santa pairing service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the registration form and assignment lookup server
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Append a participant to a roster file without going through the form
    Register {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,
        #[arg(long)]
        mc_user: String,
        #[arg(long)]
        discord_id: String,
        #[arg(long)]
        discord_user: String,
    },
    /// Print the giver -> recipient table for a roster file
    Resolve {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: i64,
    },
    /// Print a raw derangement for a given size and seed
    Shuffle {
        #[arg(long, default_value_t = 16)]
        size: usize,
        #[arg(long, default_value_t = 0)]
        seed: i64,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config } => run_serve(config)?,
        Commands::Register {
            roster,
            mc_user,
            discord_id,
            discord_user,
        } => run_register(roster, mc_user, discord_id, discord_user)?,
        Commands::Resolve { roster, seed } => run_resolve(roster, seed)?,
        Commands::Shuffle { size, seed } => run_shuffle(size, seed)?,
    }
    Ok(())
}

fn run_serve(config_path: PathBuf) -> CliResult<()> {
    let config = load_config(&config_path)?;
    let roster = load_roster_or_default(&config.roster_path)?;
    println!(
        "[SecretSanta] loaded {} registered participant(s) from {}",
        roster.len(),
        config.roster_path.display()
    );
    let mut server = ExchangeServer::start(config, roster)?;
    println!(
        "[SecretSanta] listening for HTTP requests on {}",
        server.base_url()
    );
    server.wait_for_exit("Press Enter to stop the server.")?;
    Ok(())
}

fn run_register(
    roster_path: PathBuf,
    mc_user: String,
    discord_id: String,
    discord_user: String,
) -> CliResult<()> {
    let mut roster = load_roster_or_default(&roster_path)?;
    let id = roster.append(&mc_user, &discord_id, &discord_user)?;
    save_roster(&roster_path, &roster)?;
    println!("Registered {discord_user} ({mc_user}) as participant #{id}");
    Ok(())
}

fn run_resolve(roster_path: PathBuf, seed: i64) -> CliResult<()> {
    let roster = load_roster(&roster_path)?;
    if roster.len() < MIN_PARTICIPANTS {
        println!(
            "Roster has {} participant(s); pairing starts at {MIN_PARTICIPANTS}",
            roster.len()
        );
    }
    let assignments = resolve_assignments(roster.participants(), seed);
    for participant in roster.participants() {
        match assignments
            .get(&participant.discord_id)
            .and_then(|entry| entry.as_ref())
        {
            Some(recipient) => println!(
                "  {} -> {} (minecraft: {})",
                participant.discord_user, recipient.discord_user, recipient.mc_user
            ),
            None => println!("  {} -> (no assignment)", participant.discord_user),
        }
    }
    Ok(())
}

fn run_shuffle(size: usize, seed: i64) -> CliResult<()> {
    let permutation = derangement(size, seed)?;
    println!("{permutation:?}");
    Ok(())
}
