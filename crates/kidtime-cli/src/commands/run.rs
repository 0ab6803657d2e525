use std::io::{IsTerminal, Write};
use std::time::Duration;

use chrono::Local;
use clap::Args;
use kidtime_core::{
    Config, Database, Event, HistoryStore, Locale, MemoryStore, NoticeKind, Session, SessionOptions,
    Ticker,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

use crate::render;

#[derive(Args)]
pub struct RunArgs {
    /// Display language (en or ar); defaults to the configured locale
    #[arg(long)]
    locale: Option<Locale>,
    /// Keep history in memory only
    #[arg(long)]
    ephemeral: bool,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Homework,
    Remind { minutes: i64, text: String },
    Locale(Option<Locale>),
    Status,
    Reminders,
    History,
    Help,
    Quit,
}

/// Parse a line of input. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str, default_minutes: i64) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "start" => Command::Start,
        "stop" => Command::Stop,
        "t" | "toggle" => Command::Toggle,
        "h" | "homework" => Command::Homework,
        "remind" | "r" => {
            // A leading whole number is the offset; anything else is all text.
            let (first, tail) = match rest.split_once(char::is_whitespace) {
                Some((first, tail)) => (first, tail.trim()),
                None => (rest, ""),
            };
            let (minutes, text) = match first.parse::<i64>() {
                Ok(minutes) => (minutes, tail),
                Err(_) if looks_numeric(first) => {
                    return Err(format!(
                        "reminder minutes must be a whole number, got '{first}'"
                    ))
                }
                Err(_) => (default_minutes, rest),
            };
            Command::Remind {
                minutes,
                text: text.to_string(),
            }
        }
        "locale" | "lang" => {
            if rest.is_empty() {
                Command::Locale(None)
            } else {
                Command::Locale(Some(rest.parse::<Locale>().map_err(|e| e.to_string())?))
            }
        }
        "status" | "s" => Command::Status,
        "reminders" => Command::Reminders,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// `1.5`, `-.5`, `90s`: meant as minutes, but not a whole number.
fn looks_numeric(token: &str) -> bool {
    token
        .trim_start_matches(['+', '-'])
        .trim_start_matches('.')
        .starts_with(|c: char| c.is_ascii_digit())
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut options = SessionOptions::from(&config);
    if let Some(locale) = args.locale {
        options.locale = locale;
    }

    let store: Box<dyn HistoryStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open()?)
    };
    let session = Session::open(store, options);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(
        session,
        config.ticker.interval(),
        config.reminders.default_minutes,
    ));
    // A pending stdin read would otherwise hold shutdown until the next line.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn drive<S: HistoryStore>(
    mut session: Session<S>,
    interval: Duration,
    default_minutes: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut ticker, mut pulses) = Ticker::new(interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let live = std::io::stdout().is_terminal();

    println!("{}", session.locale().strings().title);
    println!("{}", render::help());

    // Errors end the loop but still go through the stop below.
    let mut failure: Option<Box<dyn std::error::Error>> = None;
    loop {
        tokio::select! {
            Some(pulse) = pulses.recv() => {
                if !ticker.is_current(&pulse) {
                    debug!(?pulse, "dropping stale pulse");
                    continue;
                }
                let events = session.tick();
                report(&session, &events);
                if live {
                    print!("\r{}", render::status_line(&session.snapshot()));
                    if let Err(e) = std::io::stdout().flush() {
                        failure = Some(e.into());
                        break;
                    }
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "failed to read input");
                        failure = Some(e.into());
                        break;
                    }
                };
                match parse_command(&line, default_minutes) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(e) = apply(&mut session, command) {
                            failure = Some(e);
                            break;
                        }
                        sync_ticker(&session, &mut ticker);
                    }
                    Ok(None) => {}
                    Err(message) => eprintln!("{message}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    ticker.disarm();
    let events = session.stop_on(Local::now().date_naive());
    report(&session, &events);
    if let Some(entry) = events.iter().find_map(|e| match e {
        Event::HistoryUpdated { entry } => Some(entry),
        _ => None,
    }) {
        println!(
            "{} {}",
            entry.date,
            render::status_line(&session.snapshot())
        );
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn apply<S: HistoryStore>(
    session: &mut Session<S>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = match command {
        Command::Start if session.is_running() => Vec::new(),
        Command::Stop if !session.is_running() => Vec::new(),
        Command::Start | Command::Stop | Command::Toggle => session.toggle_main(),
        Command::Homework => vec![session.toggle_homework()],
        Command::Remind { minutes, text } => vec![session.add_reminder(&text, minutes)],
        Command::Locale(locale) => {
            let next = locale.unwrap_or_else(|| session.locale().toggled());
            vec![session.set_locale(next)]
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            Vec::new()
        }
        Command::Reminders => {
            println!("{}", render::reminders(&session.snapshot()));
            Vec::new()
        }
        Command::History => {
            println!(
                "{}",
                render::history_table(session.ledger().entries(), session.locale())
            );
            Vec::new()
        }
        Command::Help => {
            println!("{}", render::help());
            Vec::new()
        }
        Command::Quit => Vec::new(),
    };
    report(session, &events);
    println!("{}", render::status_line(&session.snapshot()));
    Ok(())
}

/// Arm while the main timer runs, disarm otherwise.
fn sync_ticker<S: HistoryStore>(session: &Session<S>, ticker: &mut Ticker) {
    match (session.is_running(), ticker.is_armed()) {
        (true, false) => ticker.arm(),
        (false, true) => ticker.disarm(),
        _ => {}
    }
}

fn report<S: HistoryStore>(session: &Session<S>, events: &[Event]) {
    for event in events {
        let Some(message) = session.notice(event) else {
            continue;
        };
        let line = format!("{}{message}", notice_prefix(event));
        if matches!(event, Event::StorageError { .. }) {
            eprintln!("\n{line}");
        } else {
            println!("\n{line}");
        }
    }
}

fn notice_prefix(event: &Event) -> &'static str {
    match event.notice_kind() {
        Some(NoticeKind::ReminderFired) => ">> ",
        Some(NoticeKind::Validation) => "!! ",
        None if matches!(event, Event::StorageError { .. }) => "warning: ",
        None => "",
    }
}
