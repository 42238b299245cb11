//! CLI entry point for the Adult dataset exploration.

use adult_eda::analysis::{
    CategoryDistribution, Histogram, HoursIncomeAnalysis, IncomeCorrelation, MissingValueAnalyzer,
    OutlierAnalyzer, StatisticalSummary, StrengthThresholds,
};
use adult_eda::reporting::{
    AGE_HISTOGRAM_FILE, CORRELATION_MATRIX_FILE, CORRELATION_REPORT_FILE,
    EDUCATION_DISTRIBUTION_FILE, HOURS_REPORT_FILE, INCOME_DISTRIBUTION_FILE,
    MISSING_REPORT_FILE, OUTLIER_REPORT_FILE, SUMMARY_REPORT_FILE,
};
use adult_eda::schema::{AGE_COLUMN, ColumnKind, EDUCATION_COLUMN, INCOME_COLUMN, schema_kind};
use adult_eda::{AdultLoader, ExplorationReport, ExplorerConfig, ReportWriter};
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis of the UCI Adult census dataset",
    long_about = "Data-quality and exploratory analysis of the UCI Adult census dataset.\n\n\
                  EXAMPLES:\n  \
                  # Run every analysis and write all reports\n  \
                  adult-eda explore\n\n  \
                  # Missing values of another copy of the file\n  \
                  adult-eda -i data/adult.data missing\n\n  \
                  # Outliers with wider fences, as JSON\n  \
                  adult-eda --json outliers --iqr-multiplier 3.0"
)]
struct Args {
    /// Path to the headerless Adult CSV file
    #[arg(short, long, global = true, default_value = "Adult Dataset/adult.data")]
    input: String,

    /// Output directory for reports
    #[arg(short, long, global = true, default_value = "output")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print the report as JSON to stdout instead of tables
    ///
    /// Disables all logging so stdout only carries JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Do not write report files
    #[arg(long, global = true)]
    no_save: bool,

    /// Token counted as missing in text columns
    #[arg(long, global = true, default_value = "?")]
    missing_token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every analysis and write all reports
    Explore {
        /// Multiplier k for the fences Q1 - k*IQR and Q3 + k*IQR
        #[arg(long, default_value = "1.5")]
        iqr_multiplier: f64,

        /// Significance level for the hours-per-week t-test
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Rows shown in the dataset preview
        #[arg(long, default_value = "10")]
        preview_rows: usize,

        /// Histogram bins for numeric distributions
        #[arg(long, default_value = "30")]
        bins: usize,
    },

    /// Count missing values per column
    Missing,

    /// Detect outliers with Tukey's IQR fences
    Outliers {
        /// Multiplier k for the fences Q1 - k*IQR and Q3 + k*IQR
        #[arg(long, default_value = "1.5")]
        iqr_multiplier: f64,
    },

    /// Descriptive statistics of numeric columns
    Summary,

    /// Correlation of numeric features with high income
    Correlation {
        /// |r| above which a correlation is strong
        #[arg(long, default_value = "0.3")]
        strong: f64,

        /// |r| above which a correlation is moderate
        #[arg(long, default_value = "0.1")]
        moderate: f64,
    },

    /// Working hours by income level with a t-test
    HoursIncome {
        /// Significance level for the t-test
        #[arg(long, default_value = "0.05")]
        alpha: f64,
    },

    /// Value counts of a text column or histogram of a numeric column
    ///
    /// Without --column, reports income, education and age.
    Distribution {
        /// Column to describe
        #[arg(short, long)]
        column: Option<String>,

        /// Histogram bins for numeric columns
        #[arg(long, default_value = "30")]
        bins: usize,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let df = AdultLoader::load(&config.input_path, &config.missing_token).map_err(|e| {
        error!("{}", e);
        anyhow!("Failed to load dataset: {}", e)
    })?;

    run_command(&args, &config, &df)
}

/// Map CLI flags into a validated [`ExplorerConfig`].
fn build_config(args: &Args) -> Result<ExplorerConfig> {
    let mut builder = ExplorerConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .missing_token(&args.missing_token)
        .save_to_disk(!args.no_save);

    builder = match args.command {
        Command::Explore {
            iqr_multiplier,
            alpha,
            preview_rows,
            bins,
        } => builder
            .iqr_multiplier(iqr_multiplier)
            .significance_level(alpha)
            .preview_rows(preview_rows)
            .histogram_bins(bins),
        Command::Outliers { iqr_multiplier } => builder.iqr_multiplier(iqr_multiplier),
        Command::Correlation { strong, moderate } => {
            builder.correlation_thresholds(strong, moderate)
        }
        Command::HoursIncome { alpha } => builder.significance_level(alpha),
        Command::Distribution { bins, .. } => builder.histogram_bins(bins),
        Command::Missing | Command::Summary => builder,
    };

    Ok(builder.build()?)
}

fn run_command(args: &Args, config: &ExplorerConfig, df: &DataFrame) -> Result<()> {
    let writer = ReportWriter::new(&config.output_dir);
    let save = |table: DataFrame, file_name: &str| -> Result<()> {
        if config.save_to_disk {
            writer.write_csv(&table, file_name)?;
        }
        Ok(())
    };

    match &args.command {
        Command::Explore { .. } => {
            let report = ExplorationReport::build(df, config)?;
            if config.save_to_disk {
                let written = writer.write_all(&report)?;
                info!("Wrote {} reports to {}", written.len(), config.output_dir.display());
            }
            if args.json {
                return print_json(&report);
            }
            print_exploration(&report);
        }
        Command::Missing => {
            let report = MissingValueAnalyzer::analyze_with_token(df, &config.missing_token)?;
            save(report.to_dataframe()?, MISSING_REPORT_FILE)?;
            if args.json {
                return print_json(&report);
            }
            print_section("MISSING VALUES ANALYSIS");
            if report.is_empty() {
                println!("No missing values found");
            } else {
                println!("{}", report.to_dataframe()?);
                println!("Total missing cells: {}", report.total_missing);
                println!(
                    "{} rows contain at least one missing value",
                    report.rows_with_missing
                );
            }
        }
        Command::Outliers { .. } => {
            let report = OutlierAnalyzer::analyze_with_multiplier(df, config.iqr_multiplier)?;
            save(report.to_dataframe()?, OUTLIER_REPORT_FILE)?;
            if args.json {
                return print_json(&report);
            }
            print_section("OUTLIER DETECTION (IQR METHOD)");
            println!("{}", report.to_dataframe()?);
            println!("Total outlier cells: {}", report.total_outliers);
        }
        Command::Summary => {
            let summary = StatisticalSummary::compute(df)?;
            save(summary.to_dataframe()?, SUMMARY_REPORT_FILE)?;
            if args.json {
                return print_json(&summary);
            }
            print_section("STATISTICAL SUMMARY");
            println!("{}", summary.to_dataframe()?);
        }
        Command::Correlation { .. } => {
            let thresholds = StrengthThresholds {
                strong: config.strong_correlation,
                moderate: config.moderate_correlation,
            };
            let report = IncomeCorrelation::analyze(df, &config.high_income_label, thresholds)?;
            let matrix = IncomeCorrelation::matrix(df)?;
            save(report.to_dataframe()?, CORRELATION_REPORT_FILE)?;
            save(matrix.to_dataframe()?, CORRELATION_MATRIX_FILE)?;
            if args.json {
                return print_json(&serde_json::json!({
                    "income_correlation": report,
                    "correlation_matrix": matrix,
                }));
            }
            print_section("CORRELATION WITH INCOME");
            println!("{}", report.to_dataframe()?);
        }
        Command::HoursIncome { .. } => {
            let report = HoursIncomeAnalysis::analyze(
                df,
                &config.low_income_label,
                &config.high_income_label,
                config.significance_level,
            )?;
            save(report.to_dataframe()?, HOURS_REPORT_FILE)?;
            if args.json {
                return print_json(&report);
            }
            print_section("WORKING HOURS BY INCOME LEVEL");
            println!("{}", report.to_dataframe()?);
            print_t_test(&report.t_test);
        }
        Command::Distribution { column, .. } => {
            run_distribution(args, config, df, column.as_deref(), &save)?;
        }
    }

    Ok(())
}

fn run_distribution(
    args: &Args,
    config: &ExplorerConfig,
    df: &DataFrame,
    column: Option<&str>,
    save: &dyn Fn(DataFrame, &str) -> Result<()>,
) -> Result<()> {
    let (categories, histograms) = match column {
        Some(name) if schema_kind(name) == Some(ColumnKind::Numeric) => (
            Vec::new(),
            vec![Histogram::compute(df, name, config.histogram_bins)?],
        ),
        Some(name) => (vec![CategoryDistribution::value_counts(df, name)?], Vec::new()),
        None => {
            let income = CategoryDistribution::value_counts(df, INCOME_COLUMN)?;
            let education = CategoryDistribution::value_counts(df, EDUCATION_COLUMN)?;
            let age = Histogram::compute(df, AGE_COLUMN, config.histogram_bins)?;
            save(income.to_dataframe()?, INCOME_DISTRIBUTION_FILE)?;
            save(education.to_dataframe()?, EDUCATION_DISTRIBUTION_FILE)?;
            save(age.to_dataframe()?, AGE_HISTOGRAM_FILE)?;
            (vec![income, education], vec![age])
        }
    };

    if column.is_some() {
        for distribution in &categories {
            let file_name = format!("{}_distribution.csv", distribution.column);
            save(distribution.to_dataframe()?, &file_name)?;
        }
        for histogram in &histograms {
            let file_name = format!("{}_histogram.csv", histogram.column);
            save(histogram.to_dataframe()?, &file_name)?;
        }
    }

    if args.json {
        return print_json(&serde_json::json!({
            "categories": categories,
            "histograms": histograms,
        }));
    }

    for distribution in &categories {
        print_section(&format!("{} DISTRIBUTION", distribution.column.to_uppercase()));
        println!("{}", distribution.to_dataframe()?);
    }
    for histogram in &histograms {
        print_section(&format!("{} HISTOGRAM", histogram.column.to_uppercase()));
        println!("{}", histogram.to_dataframe()?);
    }
    Ok(())
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_section(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{}", title);
    println!("{}", "=".repeat(80));
}

fn print_t_test(t_test: &adult_eda::TTestResult) {
    println!("\nStatistical Test (t-test):");
    println!("  t-statistic: {:.4}", t_test.t_statistic);
    println!("  p-value: {:.6}", t_test.p_value);
    if t_test.significant {
        println!(
            "  Result: Significant difference in working hours (p < {})",
            t_test.alpha
        );
    } else {
        println!(
            "  Result: No significant difference in working hours (p >= {})",
            t_test.alpha
        );
    }
}

/// Human-readable summary of a full exploration run.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_exploration(report: &ExplorationReport) {
    let overview = &report.overview;
    print_section("DATASET OVERVIEW");
    println!("  File: {}", report.input_file);
    println!("  Rows: {}", overview.rows);
    println!("  Columns: {}", overview.columns.len());

    print_section("MISSING VALUES");
    if report.missing.is_empty() {
        println!("  No missing values found");
    } else {
        for record in &report.missing.records {
            println!(
                "  {:<20} {:>6} ({:.2}%)",
                record.column, record.missing_count, record.percentage
            );
        }
        println!(
            "  {} rows contain at least one missing value",
            report.missing.rows_with_missing
        );
    }

    print_section("OUTLIERS (IQR METHOD)");
    for record in &report.outliers.records {
        println!(
            "  {:<20} {:>6} ({:.2}%)  bounds [{:.2}, {:.2}]",
            record.column,
            record.outlier_count,
            record.outlier_percentage,
            record.lower_bound,
            record.upper_bound
        );
    }

    print_section("CORRELATION WITH INCOME");
    for feature in &report.income_correlation.features {
        println!(
            "  {:<20} {:>8.4}  {} {}",
            feature.feature, feature.correlation, feature.strength, feature.direction
        );
    }

    print_section("WORKING HOURS BY INCOME LEVEL");
    for group in &report.hours_by_income.groups {
        println!(
            "  {:<8} mean {:.2}  median {:.2}  std {:.2}  (n = {})",
            group.income, group.mean, group.median, group.std, group.count
        );
    }
    print_t_test(&report.hours_by_income.t_test);

    print_section("INCOME DISTRIBUTION");
    let total: usize = report.income_distribution.counts.iter().map(|(_, c)| c).sum();
    for (label, count) in &report.income_distribution.counts {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        println!("  {:<8} {:>6} ({:.1}%)", label, count, share);
    }
    println!();
}
