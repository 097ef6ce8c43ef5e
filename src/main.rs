use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lending_library::{Library, LibrarySettings};
use tracing_subscriber::EnvFilter;

/// Walk one book and one reader through a loan and its return
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Title of the demo book
    #[arg(long, default_value = "Java programming for dummies")]
    title: String,

    /// Author of the demo book
    #[arg(long, default_value = "Vivek Chandra")]
    author: String,

    /// First name of the demo reader
    #[arg(long, default_value = "Roman")]
    first_name: String,

    /// Last name of the demo reader
    #[arg(long, default_value = "Vanoyan")]
    last_name: String,

    /// Print the final library state as JSON instead of text reports
    #[arg(long)]
    json: bool,

    /// Log every state change
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = LibrarySettings::load().context("failed to load library settings")?;
    init_tracing(&settings, args.verbose);
    tracing::debug!(?settings, "settings loaded");

    let mut library = Library::with_standard_observers(&settings);
    let book_id = library.add_book(&args.title, &args.author)?;
    let person_id = library.register_person(&args.first_name, &args.last_name)?;

    let report = |library: &Library, heading: &str| -> anyhow::Result<()> {
        if args.json {
            return Ok(());
        }
        let book = library.book(&book_id).context("demo book is registered")?;
        let person = library.person(person_id).context("demo reader is registered")?;
        println!("\n{}", heading.yellow().bold());
        println!("{person}");
        println!("{book}");
        Ok(())
    };

    report(&library, "After creating a book and a person")?;

    library.loan(person_id, &book_id).context("loan failed")?;
    report(&library, "After borrowing the book")?;

    library.return_book(person_id, &book_id).context("return failed")?;
    report(&library, "After returning the book")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&library.snapshot())?);
    } else {
        println!("\n{} {library}", "Done:".green().bold());
    }
    Ok(())
}

/// Install the fmt subscriber, preferring `RUST_LOG` over the configured filter
fn init_tracing(settings: &LibrarySettings, verbose: bool) {
    let fallback = if verbose { "debug" } else { settings.log_filter.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing already initialised: {e}");
    }
}
