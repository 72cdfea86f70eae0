//! TOPSIS CLI binary.
//!
//! Ranks the alternatives in a CSV decision table and writes the table back
//! with `Score` and `Rank` columns appended.

mod report;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use topsis_engine::{DistanceMetric, MissingDataStrategy, RankOptions, TopsisEngine};
use topsis_io::{read_table, write_result};
use topsis_traits::{ImpactVector, WeightVector};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "topsis")]
#[command(about = "Rank alternatives with TOPSIS multi-criteria decision analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Input CSV: a label column followed by two or more numeric criteria
    input: PathBuf,

    /// Comma-separated criterion weights, e.g. "1,1,1,2"
    weights: String,

    /// Comma-separated impacts, "+" for benefit and "-" for cost
    impacts: String,

    /// Output CSV path
    output: PathBuf,

    /// Missing-value strategy (mean, median, ffill, bfill, interpolate_linear, interpolate_polynomial)
    #[arg(long, default_value_t = MissingDataStrategy::default())]
    missing: MissingDataStrategy,

    /// Distance metric (euclidean, manhattan, chebyshev, minkowski, cosine)
    #[arg(long, default_value_t = DistanceMetric::default())]
    metric: DistanceMetric,

    /// Minkowski exponent, used only with --metric minkowski [default: 3]
    #[arg(short = 'p', long)]
    minkowski_p: Option<f64>,

    /// Rank the lowest score first
    #[arg(long)]
    reverse: bool,

    /// Print normalized matrix, ideal vectors and distances
    #[arg(long)]
    show_params: bool,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> RankOptions {
        let options = RankOptions::default()
            .with_missing_data_strategy(self.missing)
            .with_distance_metric(self.metric)
            .with_reverse_rank(self.reverse);
        match self.minkowski_p {
            Some(p) => options.with_minkowski_p(p),
            None => options,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let report = execute(cli)?;

    if cli.show_params {
        report.print_params();
    }
    report.print_ranking();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    println!("Result written to {}", cli.output.display());
    Ok(())
}

/// Load, validate, rank and write. Nothing is written unless every step succeeds.
fn execute(cli: &Cli) -> Result<report::Report> {
    let table = read_table(&cli.input)?;

    let weights = WeightVector::parse(&cli.weights)?;
    let symbols: Vec<&str> = cli.impacts.split(',').map(str::trim).collect();
    weights.check_len(table.criteria().len())?;
    if symbols.len() != table.criteria().len() {
        return Err(topsis_traits::TopsisError::dimension_mismatch(
            "impacts",
            table.criteria().len(),
            symbols.len(),
        )
        .into());
    }
    let impacts = ImpactVector::from_symbols(&symbols, Some(table.criteria()))?;

    let options = cli.options();
    tracing::debug!(?options, input = %cli.input.display(), "ranking");

    let evaluation = TopsisEngine::new(options).evaluate(table.matrix(), &weights, &impacts)?;
    write_result(&table, &evaluation.scores, &evaluation.ranks, &cli.output)?;

    Ok(report::Report {
        labels: table.labels().to_vec(),
        criteria: table.criteria().to_vec(),
        options,
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use topsis_io::{RANK_COLUMN, SCORE_COLUMN, TableError};
    use topsis_traits::TopsisError;

    const SAMPLE: &str = "Fund,P1,P2,P3,P4\nM1,1,7,9,9\nM2,4,3,6,7\nM3,3,8,6,8\nM4,6,7,7,6\n";

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("topsis").chain(args.iter().copied())).unwrap()
    }

    fn setup() -> (tempfile::TempDir, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        fs::write(&input, SAMPLE).unwrap();
        let output = dir.path().join("result.csv");
        (
            dir,
            input.display().to_string(),
            output.display().to_string(),
        )
    }

    fn topsis_error(err: &anyhow::Error) -> Option<&TopsisError> {
        err.downcast_ref::<TopsisError>().or_else(|| match err.downcast_ref::<TableError>() {
            Some(TableError::Topsis(inner)) => Some(inner),
            _ => None,
        })
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert!(Cli::try_parse_from(["topsis", "data.csv", "1,1"]).is_err());
        assert!(Cli::try_parse_from(["topsis", "a", "b", "c", "d", "e"]).is_err());
    }

    #[test]
    fn test_flags_parse() {
        let cli = cli(&[
            "in.csv",
            "1,1",
            "+,-",
            "out.csv",
            "--missing",
            "Interpolate-Linear",
            "--metric",
            "MINKOWSKI",
            "-p",
            "2.5",
            "--reverse",
        ]);
        let options = cli.options();
        assert_eq!(
            options.missing_data_strategy,
            MissingDataStrategy::InterpolateLinear
        );
        assert_eq!(options.distance_metric, DistanceMetric::Minkowski);
        assert_eq!(options.effective_minkowski_p(), 2.5);
        assert!(options.reverse_rank);
    }

    #[test]
    fn test_defaults() {
        let options = cli(&["in.csv", "1,1", "+,+", "out.csv"]).options();
        assert_eq!(options, RankOptions::default());
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let parsed = Cli::try_parse_from([
            "topsis", "in.csv", "1,1", "+,+", "out.csv", "--metric", "hamming",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_execute_writes_result() {
        let (_dir, input, output) = setup();
        let report = execute(&cli(&[&input, "1,1,1,1", "+,+,+,+", &output])).unwrap();

        assert_eq!(report.evaluation.ranks.as_slice(), &[4, 3, 2, 1]);
        assert_eq!(report.labels, vec!["M1", "M2", "M3", "M4"]);

        let written = fs::read_to_string(&output).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(
            header,
            format!("Fund,P1,P2,P3,P4,{SCORE_COLUMN},{RANK_COLUMN}")
        );
        assert_eq!(written.lines().count(), 5);
    }

    #[test]
    fn test_weight_count_mismatch_writes_nothing() {
        let (_dir, input, output) = setup();
        let err = execute(&cli(&[&input, "1,1,1", "+,+,+,+", &output])).unwrap_err();
        assert!(matches!(
            topsis_error(&err),
            Some(TopsisError::DimensionMismatch { .. })
        ));
        assert!(!PathBuf::from(&output).exists());
    }

    #[test]
    fn test_impact_count_mismatch_writes_nothing() {
        let (_dir, input, output) = setup();
        let err = execute(&cli(&[&input, "1,1,1,1", "+,+", &output])).unwrap_err();
        assert!(matches!(
            topsis_error(&err),
            Some(TopsisError::DimensionMismatch { .. })
        ));
        assert!(!PathBuf::from(&output).exists());
    }

    #[test]
    fn test_invalid_impact_names_column() {
        let (_dir, input, output) = setup();
        let err = execute(&cli(&[&input, "1,1,1,1", "+,*,+,+", &output])).unwrap_err();
        assert!(matches!(
            topsis_error(&err),
            Some(TopsisError::InvalidImpact { .. })
        ));
        assert!(err.to_string().contains("P2"));
        assert!(!PathBuf::from(&output).exists());
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.csv").display().to_string();
        let output = dir.path().join("out.csv").display().to_string();
        let err = execute(&cli(&[&input, "1,1", "+,+", &output])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_bad_minkowski_p_writes_nothing() {
        let (_dir, input, output) = setup();
        let err = execute(&cli(&[
            &input, "1,1,1,1", "+,+,+,+", &output, "--metric", "minkowski", "-p", "0",
        ]))
        .unwrap_err();
        assert!(matches!(
            topsis_error(&err),
            Some(TopsisError::InvalidParameter(_))
        ));
        assert!(!PathBuf::from(&output).exists());
    }
}
