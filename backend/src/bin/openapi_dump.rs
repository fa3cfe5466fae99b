//! Print the OpenAPI document as JSON.

use clap::Parser;
use roster::ApiDoc;
use utoipa::OpenApi;

/// Write the Roster OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version, about)]
struct Args {
    /// Indent the JSON for human readers.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), serde_json::Error> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{json}");
    Ok(())
}
