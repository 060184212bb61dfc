use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use healthassist::{
    render::{self, Format, NO_MATCHES},
    Config, Error, Session,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "healthassist")]
#[command(about = "Recommend medicines from a dataset by symptom similarity")]
#[command(version)]
struct Args {
    /// Dataset file (.xlsx, .xls, .xlsm, .ods, .csv or .tsv)
    data: PathBuf,

    /// Symptom query; read one query per line from stdin when omitted
    query: Option<String>,

    /// Number of recommendations (1..=10)
    #[arg(short = 'n', long, env = "HEALTHASSIST_TOP_N")]
    top_n: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// JSON configuration file
    #[arg(short, long, env = "HEALTHASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Chart,
    Json,
    All,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => Format::Table,
            OutputFormat::Chart => Format::Chart,
            OutputFormat::Json => Format::Json,
            OutputFormat::All => Format::All,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let top_n = args.top_n.unwrap_or(config.ranking.default_top_n);
    config.ranking.check_top_n(top_n)?;

    let session = Session::load(&args.data, &config)
        .with_context(|| format!("failed to load dataset {}", args.data.display()))?;
    info!(records = session.len(), "dataset ready");

    let format = Format::from(args.format);
    let mut stdout = io::stdout().lock();
    match &args.query {
        Some(query) => answer(&session, query, top_n, format, &mut stdout)?,
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read query from stdin")?;
                answer(&session, &line, top_n, format, &mut stdout)?;
                stdout.flush()?;
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("healthassist=debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("healthassist=warn"))?
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn answer(
    session: &Session,
    query: &str,
    top_n: usize,
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    let matches = match session.recommend(query, top_n) {
        Ok(matches) => matches,
        Err(Error::EmptyQuery) => {
            eprintln!("{}", Error::EmptyQuery);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if matches.is_empty() {
        writeln!(out, "{NO_MATCHES}")?;
        return Ok(());
    }
    write!(out, "{}", render::render(&matches, format)?)?;
    if matches!(format, Format::Json) {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthassist::Record;

    fn session() -> Session {
        let records = vec![
            Record::new(
                "ParacetamolX",
                Some("fever pain".into()),
                Some("reduces fever and mild pain".into()),
            ),
            Record::new(
                "AllergyRelief",
                Some("allergy sneezing".into()),
                Some("antihistamine for allergy symptoms".into()),
            ),
            Record::new("Balm", Some("pain".into()), None),
        ];
        Session::from_records(records, &Config::default()).unwrap()
    }

    fn answer_to_string(query: &str, format: Format) -> String {
        let mut out = Vec::new();
        answer(&session(), query, 5, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unknown_symptoms_print_no_matches() {
        assert_eq!(
            answer_to_string("zzqqxx nonsense term", Format::Table),
            format!("{NO_MATCHES}\n")
        );
    }

    #[test]
    fn blank_query_writes_nothing() {
        assert_eq!(answer_to_string("", Format::Table), "");
        assert_eq!(answer_to_string("  \t ", Format::All), "");
    }

    #[test]
    fn matching_query_prints_best_first() {
        let table = answer_to_string("pain", Format::Table);
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Balm"));
        assert!(rows[0].ends_with("100.00"));
        assert!(rows[1].starts_with("ParacetamolX"));

        let json = answer_to_string("pain", Format::Json);
        assert!(json.ends_with("]\n"));
        assert!(json.find("Balm") < json.find("ParacetamolX"));
    }
}
