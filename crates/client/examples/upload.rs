//! Uploads files from the command line and prints the refreshed listing.
//!
//! Usage: `cargo run --example upload -- <base-url> <file>...`

use filedrop_client::{Client, UploadEvent, UploadManager};
use filedrop_transfer::{LocalFile, UploadRules, format_file_size};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(base_url) = args.next() else {
        eprintln!("usage: upload <base-url> <file>...");
        std::process::exit(2);
    };

    let mut batch = Vec::new();
    for arg in args {
        batch.push(LocalFile::open(&arg)?);
    }
    if batch.is_empty() {
        eprintln!("usage: upload <base-url> <file>...");
        std::process::exit(2);
    }

    let rules = UploadRules {
        accepts_multiple: true,
        ..Default::default()
    };
    let mut manager = UploadManager::new(Client::new(base_url), rules);
    let mut events = manager.take_events().expect("events taken once");

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                UploadEvent::Rejected { message } => eprintln!("{message}"),
                UploadEvent::Progress {
                    file, percentage, ..
                } => println!("{file}: {percentage:.0}%"),
                UploadEvent::Completed { file } => println!("{file}: done"),
                UploadEvent::Failed { file, error } => eprintln!("{file}: {error}"),
            }
        }
    });

    let report = manager.upload_batch(batch).await?;

    if let Some(files) = &report.files {
        println!("\n{} files on server:", files.len());
        for file in files {
            println!("  {:>10}  {}", format_file_size(file.size), file.name);
        }
    }

    // Closing the manager ends the event stream.
    drop(manager);
    let _ = printer.await;

    if report.all_succeeded() { Ok(()) } else { std::process::exit(1) }
}
