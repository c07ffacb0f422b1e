use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use spendlog::{NewExpense, create_expense, initialize_db};

/// A utility for creating a test database for the spendlog server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample expenses as (amount, category, note, days before today).
const SAMPLE_EXPENSES: [(f64, &str, &str, i64); 10] = [
    (1850.00, "Rent", "Monthly rent", 40),
    (64.20, "Groceries", "Weekly shop", 35),
    (12.50, "Food", "Lunch", 20),
    (45.00, "Books", "", 14),
    (58.75, "Groceries", "Weekly shop", 9),
    (6.80, "Food", "Coffee and a muffin from the cafe around the corner", 6),
    (23.40, "Transport", "Bus top-up", 4),
    (71.10, "Groceries", "", 2),
    (15.00, "Food", "Takeaways", 1),
    (4.50, "Food", "Coffee", 0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();

    for (amount, category, note, days_ago) in SAMPLE_EXPENSES {
        create_expense(
            NewExpense::new(amount, category, note)?,
            today - Duration::days(days_ago),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
