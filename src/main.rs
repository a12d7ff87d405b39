// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging from the --log-level flag (bad level = no crawl at all)
// 3. Run the crawl and print the report
// 4. Exit with proper code (0 = archived, 1 = crawl failed, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - site traversal logic
mod extract;       // src/extract/ - markdown rendering and link extraction
mod fetch;         // src/fetch/ - page and image downloading
mod logging;       // src/logging.rs - tracing subscriber setup

// Import items we need from our modules
use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use crawl::CrawlReport;
use url::Url;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Configuration or other unexpected error: print it, exit with 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = site archived
//   Ok(1) = crawl aborted on a fetch or parse failure
//   Err = configuration or internal error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // An invalid log level has to fail here, before any crawling happens
    logging::init(&cli.log_level)?;

    let start_url = Url::parse(&cli.start_url)
        .with_context(|| format!("Invalid start URL: {}", cli.start_url))?;

    tokio::fs::create_dir_all(&cli.destination)
        .await
        .with_context(|| {
            format!("Cannot create destination {}", cli.destination.display())
        })?;

    println!(
        "🔍 Archiving {} into {}",
        start_url,
        cli.destination.display()
    );

    match crawl::crawl_site(&start_url, &cli.destination).await {
        Ok(report) => {
            print_report(&report, cli.json)?;
            Ok(0)
        }
        Err(e) => {
            // The partial archive stays on disk; a re-run resumes cheaply
            eprintln!("❌ Crawl failed: {:#}", e);
            Ok(1)
        }
    }
}

// Prints the report either as a table or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        // Serialize the report to JSON and print
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(report);
    }
    Ok(())
}

// Prints the report as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!("{:<60} {:<40}", "URL", "FILE");
    println!("{}", "=".repeat(100));

    for page in &report.pages {
        println!("{:<60} {:<40}", truncate_url(&page.url), page.file);
    }
    for image in &report.images {
        println!("{:<60} {:<40}", truncate_url(&image.url), image.file);
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   📄 Pages: {}", report.pages.len());
    println!("   🖼️  Images: {}", report.images.len());
}

// Truncates a URL if too long for display
fn truncate_url(url: &str) -> String {
    if url.len() > 57 {
        format!("{}...", &url[..57])
    } else {
        url.to_string()
    }
}
