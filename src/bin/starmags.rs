use std::{io, process::ExitCode, time::Duration};

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starmags::{
    constants::{
        ArcSec, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PLACEHOLDER, HTTP_TIMEOUT_SECS,
        SEARCH_RADIUS, VIZIER_ROW_LIMIT, VIZIER_TSV_URL,
    },
    enrich::{EnrichConfig, EnrichSummary, Enricher},
    input::InputTable,
    starmags_errors::StarmagsError,
    vizier::VizierClient,
};

#[derive(Parser, Debug)]
#[command(name = "starmags")]
#[command(about = "Append TESS, NOMAD, AAVSO and 2MASS magnitudes to a coordinate list", long_about = None)]
#[command(version)]
struct Cli {
    /// Comma-delimited input file with `ra` and `dec` columns (degrees)
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: Utf8PathBuf,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: Utf8PathBuf,

    /// Write to standard output instead of the output file
    #[arg(long)]
    stdout: bool,

    /// Token written for missing fields
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// Cone search radius in arcseconds
    #[arg(short, long, default_value_t = SEARCH_RADIUS)]
    radius: ArcSec,

    /// VizieR asu-tsv endpoint
    #[arg(long, default_value = VIZIER_TSV_URL)]
    endpoint: String,

    /// HTTP timeout per query, in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    timeout: u64,

    /// Maximum rows returned per catalog table
    #[arg(long, default_value_t = VIZIER_ROW_LIMIT)]
    row_limit: usize,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn run(cli: Cli) -> Result<EnrichSummary, StarmagsError> {
    let config = EnrichConfig {
        search_radius: cli.radius,
        placeholder: cli.placeholder,
        show_progress: !cli.no_progress,
        ..Default::default()
    };

    let client = VizierClient::with_timeout(Duration::from_secs(cli.timeout))
        .endpoint(cli.endpoint)
        .sources(&config.prefixes)
        .row_limit(cli.row_limit);

    let enricher = Enricher::new(client, config);

    if cli.stdout {
        let input = InputTable::from_path(&cli.input)?;
        let mut out = io::stdout().lock();
        enricher.enrich(&input, &mut out)
    } else {
        enricher.enrich_file(&cli.input, &cli.output)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) => {
            info!(
                rows = summary.rows_written,
                matched = summary.rows_matched,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("enrichment aborted: {err}");
            ExitCode::FAILURE
        }
    }
}
