//! Reception Desk Console
//!
//! Line-oriented front end for the visit register. Reads one command per
//! line from stdin and persists after every accepted command to
//! `register_data.json` in the working directory.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default: info)
//!
//! Nothing else: no flags, and the snapshot path is fixed.
//!
//! ## Commands
//!
//! ```text
//! in <id> [name...] [phone]   record an entry; the last token is the phone
//!                           when two or more tokens follow the id
//! out <id>                  record an exit
//! list [mode]               render a view: inside, visitors, last-hour,
//!                           today, departures, log (default: log)
//! help                      show this summary
//! quit                      save and exit
//! ```

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use visit_register::{FilterMode, JsonFileStore, Outcome, Registry};

/// Initialize the tracing subscriber from `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reception_desk=info,visit_register=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn print_help() {
    println!("commands:");
    println!("  in <id> [name...] [phone]   record an entry");
    println!("  out <id>                  record an exit");
    println!("  list [mode]               render a view");
    println!("  help                      show this summary");
    println!("  quit                      save and exit");
    println!("modes: inside, visitors, last-hour, today, departures, log");
}

fn print_inside(registry: &Registry<JsonFileStore>) {
    let lines = registry.render(FilterMode::CurrentlyInside);
    println!("inside now: {}", lines.len());
    for line in &lines {
        println!("  {}", line);
    }
}

fn print_view(registry: &Registry<JsonFileStore>, mode: FilterMode) {
    let lines = registry.render(mode);
    println!("{} ({} entries)", mode, lines.len());
    for line in &lines {
        println!("  {}", line);
    }
}

/// Split the tokens after the id into (name, phone).
///
/// The final token is the phone when two or more follow the id; a single
/// token is a name with no phone.
fn name_and_phone(rest: &[&str]) -> (String, String) {
    match rest.split_last() {
        Some((phone, name)) if !name.is_empty() => (name.join(" "), (*phone).to_string()),
        _ => (rest.join(" "), String::new()),
    }
}

fn main() -> io::Result<()> {
    init_tracing();

    let version = env!("CARGO_PKG_VERSION");
    let mut registry = Registry::open(JsonFileStore::default());
    info!(
        version = version,
        people = registry.person_count(),
        visits = registry.visit_count(),
        inside = registry.inside_count(),
        "Register loaded"
    );

    println!("reception desk v{} - type 'help' for commands", version);
    print_inside(&registry);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like quit.
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "in" => {
                let id = tokens.get(1).copied().unwrap_or("");
                let (name, phone) = name_and_phone(tokens.get(2..).unwrap_or(&[]));
                let outcome = Outcome::check_in(&registry.check_in(id, &name, &phone));
                println!("{}", outcome.message);
                if outcome.ok {
                    print_inside(&registry);
                }
            }
            "out" => {
                let id = tokens.get(1).copied().unwrap_or("");
                let outcome = Outcome::check_out(&registry.check_out(id));
                println!("{}", outcome.message);
                if outcome.ok {
                    print_inside(&registry);
                }
            }
            "list" => match tokens.get(1) {
                None => print_view(&registry, FilterMode::default()),
                Some(token) => match FilterMode::from_str(token) {
                    Some(mode) => print_view(&registry, mode),
                    None => println!(
                        "unknown mode '{}'; expected inside, visitors, last-hour, today, departures or log",
                        token
                    ),
                },
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command '{}'; type 'help'", other),
        }
    }

    registry.flush();
    info!("Register saved");
    Ok(())
}
