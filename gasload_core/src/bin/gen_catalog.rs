//! Generate CATALOG.md from the reference tables.
//!
//! Lists every category with its seasonal class and default diversity, and
//! every equipment item with its factor under each standard.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog [output-path]
//! ```
//!
//! The generated file is written to `CATALOG.md` (relative to the working
//! directory) unless a path is given.

use std::fs;
use std::path::PathBuf;

use gasload_core::reference::generate_catalog_markdown;

fn main() {
    println!("Generating CATALOG.md...");

    let markdown = generate_catalog_markdown();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("CATALOG.md"));

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
