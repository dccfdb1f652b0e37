//! Command-line surface for the kith relationship journal.
//!
//! # Responsibility
//! - Translate each subcommand into one core operation.
//! - Render results and errors to the console; the core never prints.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use kith_core::Journal;

#[derive(Parser, Debug)]
#[command(name = "kith", version, about = "Personal relationship journal")]
struct Cli {
    /// Journal document to operate on.
    #[arg(long, global = true, default_value = "kith.md")]
    journal: PathBuf,

    /// Enable file logging into this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a record to the journal.
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },
    /// Remove a nickname from a friend.
    Remove {
        #[command(subcommand)]
        target: RemoveTarget,
    },
    /// Rename a friend everywhere it is referenced.
    Rename {
        #[command(subcommand)]
        target: RenameTarget,
    },
    /// List records and rankings.
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// Print a month-by-month activity histogram.
    Graph {
        /// Restrict to activities with this friend.
        friend: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Bucket friends into distant/moderate/close tiers.
    Suggest {
        #[arg(long)]
        json: bool,
    },
    /// Print journal totals.
    Stats,
    /// Rewrite the journal document in canonical order.
    Clean,
}

#[derive(Subcommand, Debug)]
enum AddTarget {
    /// Add a friend by canonical name.
    Friend { name: String },
    /// Add an activity line, e.g. "2015-01-04: Lunch with Grace."
    Activity { text: String },
    /// Add a location by name.
    Location { name: String },
    /// Add a nickname to a friend.
    Nickname { name: String, nickname: String },
}

#[derive(Subcommand, Debug)]
enum RemoveTarget {
    /// Remove a nickname from a friend.
    Nickname { name: String, nickname: String },
}

#[derive(Subcommand, Debug)]
enum RenameTarget {
    /// Rename a friend.
    Friend { old_name: String, new_name: String },
}

#[derive(Subcommand, Debug)]
enum ListTarget {
    /// Friend names.
    Friends {
        #[arg(long)]
        json: bool,
    },
    /// Location names.
    Locations {
        #[arg(long)]
        json: bool,
    },
    /// Activity lines, most recent first.
    Activities {
        #[arg(long)]
        limit: Option<usize>,
        /// Keep only activities with this friend.
        #[arg(long)]
        friend: Option<String>,
        /// Keep only activities at this location.
        #[arg(long = "in")]
        location: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Friends ranked by activity count.
    Favorites {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = kith_core::default_log_level();
        if let Err(err) = kith_core::init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut journal = Journal::load(&cli.journal)?;

    match &cli.command {
        Command::Add { target } => match target {
            AddTarget::Friend { name } => {
                let added = journal.add_friend(name)?.name.clone();
                journal.save()?;
                println!("Added friend: {added}");
            }
            AddTarget::Activity { text } => {
                let added = journal.add_activity(text)?.display_text();
                journal.save()?;
                println!("Added activity: {added}");
            }
            AddTarget::Location { name } => {
                let added = journal.add_location(name)?.name.clone();
                journal.save()?;
                println!("Added location: {added}");
            }
            AddTarget::Nickname { name, nickname } => {
                let friend = journal.add_nickname(name, nickname)?.name.clone();
                journal.save()?;
                println!("Added nickname \"{}\" to {friend}", nickname.trim());
            }
        },
        Command::Remove { target } => match target {
            RemoveTarget::Nickname { name, nickname } => {
                let friend = journal.remove_nickname(name, nickname)?.name.clone();
                journal.save()?;
                println!("Removed nickname \"{}\" from {friend}", nickname.trim());
            }
        },
        Command::Rename { target } => match target {
            RenameTarget::Friend { old_name, new_name } => {
                let renamed = journal.rename_friend(old_name, new_name)?.name.clone();
                journal.save()?;
                println!("Renamed friend to {renamed}");
            }
        },
        Command::List { target } => match target {
            ListTarget::Friends { json } => {
                print_lines(journal.list_friends(), *json)?;
            }
            ListTarget::Locations { json } => {
                print_lines(journal.list_locations(), *json)?;
            }
            ListTarget::Activities {
                limit,
                friend,
                location,
                json,
            } => {
                let lines =
                    journal.list_activities(*limit, friend.as_deref(), location.as_deref())?;
                print_lines(lines, *json)?;
            }
            ListTarget::Favorites { limit, json } => {
                print_lines(journal.list_favorites(*limit)?, *json)?;
            }
        },
        Command::Graph { friend, json } => {
            let histogram = journal.graph(friend.as_deref())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&histogram)?);
            } else {
                for (month, count) in histogram {
                    println!("{month}: {}", "#".repeat(count));
                }
            }
        }
        Command::Suggest { json } => {
            let tiers = journal.suggest();
            if *json {
                println!("{}", serde_json::to_string_pretty(&tiers)?);
            } else {
                println!("Distant: {}", tiers.distant.join(", "));
                println!("Moderate: {}", tiers.moderate.join(", "));
                println!("Close: {}", tiers.close.join(", "));
            }
        }
        Command::Stats => {
            println!("Friends: {}", journal.total_friends());
            println!("Locations: {}", journal.total_locations());
            println!("Activities: {}", journal.total_activities());
            println!("Elapsed days: {}", journal.elapsed_days());
        }
        Command::Clean => {
            journal.save()?;
            println!("Cleaned {}", journal.path().display());
        }
    }

    Ok(())
}

fn print_lines(lines: Vec<String>, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}
