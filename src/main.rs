//! `civic` - Report and track civic issues.
//!
//! Reads a dataset (built-in sample data or a JSONL file), runs one
//! command against it and prints the result. Nothing is written back.

use civic_issues::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
