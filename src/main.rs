use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};

use moodjournal::{
    CmsClient, Config, FileStore, Journal, JournalResult, KeyValueStore, Mood, MoodEntry, Session,
};

#[derive(Parser)]
#[command(name = "moodjournal", version, about = "Track one mood a day")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record today's mood (😊, 😐 or 😞); a second call today replaces it
    Log {
        mood: String,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Show today's entry
    Today,
    /// List entries, newest first
    History,
    /// Show a month grid
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        /// 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Login {
        identifier: String,
        password: String,
    },
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Delete an account entry by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodjournal=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let files = FileStore::new(&config.data_dir);
    tracing::debug!(backend = %config.backend_url, data_dir = %files.dir().display(), "Loaded config");
    let store: Arc<dyn KeyValueStore> = Arc::new(files);
    let client = CmsClient::new(&config, Session::new(store.clone()))?;
    let mut journal = Journal::open(store, client).context("Failed to open journal")?;

    match run(cli.command, &mut journal).await {
        Ok(()) => Ok(()),
        // the service's own message is what the user needs to see
        Err(e) if e.is_remote_rejection() => {
            tracing::warn!(error = %e, "Request rejected by the journal service");
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(command: Command, journal: &mut Journal) -> JournalResult<()> {
    match command {
        Command::Log { mood, note } => {
            let mood: Mood = mood.parse()?;
            journal.refresh().await?;
            let entry = journal.record_mood(mood, &note).await?;
            print_entry(&entry);
        }
        Command::Today => {
            journal.refresh().await?;
            match journal.today_entry() {
                Some(entry) => print_entry(entry),
                None => println!("No mood recorded today."),
            }
        }
        Command::History => {
            journal.refresh().await?;
            let history = journal.history();
            if history.is_empty() {
                println!("No mood entries yet. Start tracking your mood today!");
            }
            for entry in &history {
                print_entry(entry);
            }
        }
        Command::Calendar { year, month } => {
            journal.refresh().await?;
            let today = Utc::now().date_naive();
            let year = year.unwrap_or(today.year());
            let month0 = month.map(|m| m - 1).unwrap_or(today.month0());
            print_calendar(journal, year, month0 as i32, today);
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = journal.register(&username, &email, &password).await?;
            println!("Welcome, {}!", auth.user.username);
        }
        Command::Login {
            identifier,
            password,
        } => {
            let auth = journal.login(&identifier, &password).await?;
            println!("Hello, {} ({} entries)", auth.user.username, journal.entries().len());
        }
        Command::Logout => {
            journal.logout()?;
            println!("Signed out.");
        }
        Command::Whoami => match journal.client().current_user(false).await {
            Some(user) => println!("{} <{}>", user.username, user.email),
            None => println!("Not signed in (entries are kept on this device only)."),
        },
        Command::Delete { id } => {
            journal.delete(&id).await?;
            println!("Deleted entry {}.", id);
        }
    }
    Ok(())
}

fn print_entry(entry: &MoodEntry) {
    if entry.note.is_empty() {
        println!("{}  {}", entry.day_key(), entry.mood);
    } else {
        println!("{}  {}  {}", entry.day_key(), entry.mood, entry.note);
    }
}

fn print_calendar(journal: &Journal, year: i32, month0: i32, today: chrono::NaiveDate) {
    let view = journal.calendar(year, month0, today);
    println!("{:04}-{:02}", view.year, view.month0 + 1);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");

    let mut column = 0;
    for _ in 0..view.leading_blanks {
        print!("    ");
        column += 1;
    }
    for cell in &view.days {
        match cell.entry {
            Some(entry) => print!(" {} ", entry.mood),
            None if cell.is_today => print!("[{:>2}]", cell.day),
            None => print!(" {:>2} ", cell.day),
        }
        column += 1;
        if column % 7 == 0 {
            println!();
        }
    }
    if column % 7 != 0 {
        println!();
    }

    let counts = view
        .mood_counts()
        .iter()
        .map(|(mood, count)| format!("{} {}", mood, count))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{} of {} days recorded  {}", view.recorded_days(), view.days.len(), counts);
}
