use osu_collection::{decode_with, read_header, Database, DecodeOptions, Header, Result};
use std::{env, fs};

const PREVIEW_HASHES: usize = 3;

/// Decodes the file and returns the raw header next to the decoded database.
fn inspect(path: &str, options: DecodeOptions) -> Result<(Option<Header>, Database)> {
    let bytes = fs::read(path)?;
    let header = read_header(&bytes)?;
    let database = decode_with(&bytes, options)?;
    Ok((header, database))
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-collection.db> [--strict]", args[0]);
        std::process::exit(1);
    }

    let db_path = &args[1];
    let options = DecodeOptions {
        strict_count: args.iter().skip(2).any(|arg| arg == "--strict"),
    };
    if let Some(unknown) = args.iter().skip(2).find(|arg| *arg != "--strict") {
        eprintln!("ERROR: Unknown argument '{}'", unknown);
        std::process::exit(1);
    }

    println!("Reading collection database: {}", db_path);
    if options.strict_count {
        println!("Strict header count check enabled.");
    }
    println!("{}", "=".repeat(60));

    match inspect(db_path, options) {
        Ok((header, database)) => {
            println!("\nDatabase Information:");
            println!("  Version: {}", database.version());
            match header {
                Some(header) => println!("  Declared collections: {}", header.collection_count),
                None => println!("  Declared collections: (empty file)"),
            }
            println!("  Actual collections: {}", database.collection_count());
            let total: usize = database.collections().map(|c| c.hash_count()).sum();
            println!("  Total beatmaps: {}", total);

            println!("\nCollections:");
            for (i, collection) in database.collections().enumerate() {
                println!("  {}. {} ({} beatmaps)", i + 1, collection.name(), collection.hash_count());
                for hash in collection.hashes().iter().take(PREVIEW_HASHES) {
                    println!("       {}", hash);
                }
                if collection.hash_count() > PREVIEW_HASHES {
                    println!("       ... and {} more", collection.hash_count() - PREVIEW_HASHES);
                }
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to read collection database");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
