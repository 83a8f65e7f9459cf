//! table-controller
//!
//! Loads the exercise page (or a JSON document), fires the load event and a
//! sequence of clicks, then prints the console and the resulting document.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use table_controller::dom::load_document;
use table_controller::{PageController, PageOptions, fixture};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// HTML markup (default)
    Html,
    /// Nested element JSON, loadable with --document
    Json,
    /// Markdown rendering
    Markdown,
}

#[derive(Parser)]
#[command(name = "table-controller")]
#[command(version)]
#[command(about = "Run the table exercise page controller", long_about = None)]
struct Cli {
    /// Document to load instead of the built-in exercise page
    #[arg(long, short = 'd', value_name = "FILE")]
    document: Option<String>,

    /// Selector to click after load; repeat for a sequence
    #[arg(long, short = 'c', value_name = "SELECTOR")]
    click: Vec<String>,

    /// Make double-add reuse the cell and double-delete a no-op
    #[arg(long)]
    hardened: bool,

    /// Cell count above which the page logs "Big Array!"
    #[arg(long, default_value = "9")]
    threshold: usize,

    /// Output format for the final document
    #[arg(long, short = 'f', value_enum, default_value = "html")]
    format: Format,

    /// Skip the load event
    #[arg(long)]
    no_load: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let document = match &cli.document {
        Some(path) => load_document(path).with_context(|| format!("loading {}", path))?,
        None => fixture::exam_page(),
    };

    let options = PageOptions::new()
        .strict(!cli.hardened)
        .big_array_threshold(cli.threshold);
    let mut page = PageController::with_options(document, options);

    if !cli.no_load {
        if let Err(err) = page.load() {
            page.report_uncaught(&err);
        }
    }

    for selector in &cli.click {
        log::info!("clicking {}", selector);
        if let Err(err) = page.click(selector) {
            page.report_uncaught(&err);
        }
    }

    for entry in page.console().entries() {
        eprintln!("{}", entry);
    }

    let output = match cli.format {
        Format::Html => page.document().to_html(),
        Format::Json => page.document().to_json()?,
        Format::Markdown => page.document().to_markdown(),
    };
    println!("{}", output);

    Ok(())
}
