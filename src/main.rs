use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use stormfetch::config::cli::{CliConfig, Command, OutputFormat};
use stormfetch::utils::{logger, validation::Validate};
use stormfetch::{
    ArchiveConfig, HttpSource, NhcService, SpcService, StormIndex, StormIndexEntry, Tabular,
    TrackRecord,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli
        .archive_config()
        .with_context(|| format!("failed to load config {:?}", cli.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(&cli, config).await {
        tracing::error!("❌ Query failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: ArchiveConfig) -> stormfetch::Result<()> {
    let source = HttpSource::new(&config.http)?;
    let out = std::io::stdout().lock();

    match &cli.command {
        Command::Storms { year, name } => {
            let nhc = NhcService::connect(source, config.nhc).await?;
            let selected: Vec<StormIndexEntry> = nhc
                .storm_table()
                .iter()
                .filter(|e| year.map_or(true, |y| e.year == y))
                .filter(|e| {
                    name.as_deref()
                        .map_or(true, |n| e.name.eq_ignore_ascii_case(n.trim()))
                })
                .cloned()
                .collect();
            let table = StormIndex::new(selected);
            emit(&table, table.entries(), cli.format, out)
        }
        Command::Tracks {
            year,
            storm,
            models,
        } => {
            let nhc = NhcService::connect(source, config.nhc).await?;
            let tracks = nhc.get_tracks(*year, storm).await?;

            if models.is_empty() {
                return emit_models(&tracks.models(), cli.format, out);
            }

            let selection = tracks.model_selection_latlon(models.as_slice());
            // Best-track rows carry model "BEST", so one table holds both.
            let mut rows: Vec<TrackRecord> = selection.tables.concat();
            rows.extend(tracks.best_track.iter().cloned());
            emit(rows.as_slice(), &selection, cli.format, out)
        }
        Command::Reports { event, date } => {
            let spc = SpcService::new(source, config.spc);
            let data = spc.fetch_str(event, date).await?;
            emit(&data, &data.day_table, cli.format, out)
        }
    }
}

fn emit<T, J, W>(table: &T, json: &J, format: OutputFormat, mut out: W) -> stormfetch::Result<()>
where
    T: Tabular + ?Sized,
    J: Serialize + ?Sized,
    W: Write,
{
    match format {
        OutputFormat::Csv => table.write_csv(out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, json)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn emit_models<W: Write>(models: &[String], format: OutputFormat, mut out: W) -> stormfetch::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(out);
            csv.write_record(["Model"])?;
            for model in models {
                csv.write_record([model])?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, models)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
