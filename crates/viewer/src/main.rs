//! medcard: issue medical cards and view shared records from the terminal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medcard_core::generate_record;
use medcard_viewer::{
    CardClient, SortField, SortOrder, Tab, TimeRange, ViewerError, VitalsQuery, decode_data_url,
    record_id_from_link, render_tab,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Medical card issuer and viewer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the card API
    #[arg(
        long,
        global = true,
        env = "MEDCARD_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a new medical card and print its share link
    Issue {
        /// Write the code image as PNG to this path
        #[arg(long, value_name = "FILE")]
        qr_out: Option<PathBuf>,
    },
    /// Show one tab of a shared medical record
    Show {
        /// Record id or share link
        #[arg(value_name = "ID|URL", required_unless_present = "mock")]
        link: Option<String>,

        #[arg(long, short = 't', default_value_t = Tab::Overview)]
        tab: Tab,

        /// Vitals window: 24h, 7d, 30d or all
        #[arg(long, default_value_t = TimeRange::Week)]
        range: TimeRange,

        /// Vitals sort field: datetime, bp, hr, temp, sugar or weight
        #[arg(long, default_value_t = SortField::DateTime)]
        sort: SortField,

        #[arg(long, default_value_t = SortOrder::Desc)]
        order: SortOrder,

        /// Vitals table page, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Render the built-in sample record instead of fetching
        #[arg(long, action = clap::ArgAction::SetTrue)]
        mock: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ViewerError> {
    let client = CardClient::new(cli.api_url);

    match cli.command {
        Command::Issue { qr_out } => {
            let issued = client.issue().await?;
            println!("Record ID: {}", issued.record_id());
            println!("Share URL: {}", issued.qr_url);

            if let Some(path) = qr_out {
                let png = decode_data_url(&issued.qr_code)?;
                tokio::fs::write(&path, png).await?;
                println!("Code image written to {}", path.display());
            }
        }
        Command::Show {
            link,
            tab,
            range,
            sort,
            order,
            page,
            mock,
        } => {
            let record = match link {
                Some(link) if !mock => client.fetch(record_id_from_link(&link)).await?,
                _ => {
                    tracing::info!("Rendering sample record");
                    generate_record()
                }
            };

            let query = VitalsQuery {
                range,
                field: sort,
                order,
                page,
            };
            let now = chrono::Local::now().naive_local();
            print!("{}", render_tab(&record, tab, query, now));
        }
    }

    Ok(())
}
