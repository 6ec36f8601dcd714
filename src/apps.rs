use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{SampleType, SamplingConfig, SamplingPolicy};
use crate::constants::sampler::{DATE_SELECTOR_LABEL, KEYWORD_SELECTOR_LABEL};
use crate::constants::transport::DEFAULT_OUTPUT_DIR;
use crate::metrics::{format_with_commas, group_skew};
use crate::data::RowTable;
use crate::pipeline::{GroupSummary, SamplingReport, run_sampling};
use crate::selection::dates::parse_periods;
use crate::transport::fs::{load_stopwords, load_table, write_table};
use crate::{SamplerError, Seed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleTypeArg {
    Fraction,
    Number,
}

impl From<SampleTypeArg> for SampleType {
    fn from(value: SampleTypeArg) -> Self {
        match value {
            SampleTypeArg::Fraction => SampleType::Fraction,
            SampleTypeArg::Number => SampleType::Number,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sample_tweets",
    disable_help_subcommand = true,
    about = "Sample tweets for annotation",
    long_about = "Sample tweets from a csv/tsv file by time periods and/or stopwords, drawing a fraction or a fixed number of tweets from every group.",
    after_help = "Periods accept single dates such as YY, YY-MM and YY-MM-DD (or 4-digit years) and ranges such as YY-MM-DD:YY-MM-DD. Set RUST_LOG=debug for per-group logs."
)]
/// CLI for `sample_tweets`.
///
/// Common usage:
/// - Periods only: `-i tweets.csv -n 0.1 --sample-periods -p "2023-01,2023-02-01:2023-02-14"`
/// - Stopwords only, fixed count: `-i tweets.tsv -t number -n 50 --sample-stopwords -s stopwords.txt`
/// - Reproducible run: add `--seed 42`
struct SampleTweetsCli {
    #[arg(
        short = 'i',
        long,
        value_name = "PATH",
        help = "csv/tsv file containing the tweets"
    )]
    input: PathBuf,
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory to save the sampled tweets (created if missing)"
    )]
    output: PathBuf,
    #[arg(
        short = 't',
        long = "sample-type",
        alias = "sample_type",
        value_enum,
        default_value_t = SampleTypeArg::Fraction,
        help = "Sample a fraction of each group or a number of tweets per group"
    )]
    sample_type: SampleTypeArg,
    #[arg(
        short = 'n',
        long = "no-of-samples",
        alias = "no_of_samples",
        allow_negative_numbers = true,
        help = "Fraction in (0, 1] or number of tweets to sample per group"
    )]
    no_of_samples: f64,
    #[arg(
        long = "sample-stopwords",
        alias = "sample_stopwords",
        help = "Sample tweets containing each stopword"
    )]
    sample_stopwords: bool,
    #[arg(
        long = "sample-periods",
        alias = "sample_periods",
        help = "Sample tweets created in each time period"
    )]
    sample_periods: bool,
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        help = "Stopwords file, one per line (required with --sample-stopwords)"
    )]
    stopwords: Option<PathBuf>,
    #[arg(
        short = 'p',
        long,
        value_name = "PERIODS",
        help = "Comma-separated time periods (required with --sample-periods)"
    )]
    periods: Option<String>,
    #[arg(long, help = "Optional deterministic seed")]
    seed: Option<Seed>,
}

/// Parse CLI arguments, sample the input table, and write `sampled_tweets.csv`.
///
/// `args_iter` excludes the program name. Nothing is written when any check fails.
pub fn run_sample_tweets<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<SampleTweetsCli, _>(
        std::iter::once("sample_tweets".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = build_config(&cli)?;
    let table = load_checked_table(&cli.input, &config)?;

    println!("number of tweets: {}", format_with_commas(table.len()));
    println!("number of tweets to be sampled: {}", config.policy);

    let report = run_sampling(&table, &config)?;
    print_report(&report);

    let path = write_table(&report.table, &cli.output)?;
    println!(
        "saved {} sampled tweets in {}",
        format_with_commas(report.table.len()),
        path.display()
    );
    Ok(())
}

fn build_config(cli: &SampleTweetsCli) -> Result<SamplingConfig, SamplerError> {
    let policy = SamplingPolicy::new(cli.sample_type.into(), cli.no_of_samples)?;
    if !cli.sample_stopwords && !cli.sample_periods {
        return Err(SamplerError::NoSamplingMethodSpecified);
    }

    let keywords = if cli.sample_stopwords {
        let path = cli.stopwords.as_deref().ok_or_else(|| {
            SamplerError::Configuration(
                "--sample-stopwords is used without providing a stopwords file".to_string(),
            )
        })?;
        Some(load_stopwords(path)?)
    } else {
        None
    };

    let periods = if cli.sample_periods {
        let literal = cli
            .periods
            .as_deref()
            .filter(|literal| !literal.trim().is_empty())
            .ok_or_else(|| {
                SamplerError::Configuration(
                    "--sample-periods is used without providing time periods".to_string(),
                )
            })?;
        Some(parse_periods(literal)?)
    } else {
        None
    };

    let config = SamplingConfig {
        seed: cli.seed,
        policy,
        periods,
        keywords,
    };
    config.validate()?;
    Ok(config)
}

/// Load the tweets and reject a count larger than the whole table before
/// anything is printed.
fn load_checked_table(path: &Path, config: &SamplingConfig) -> Result<RowTable, SamplerError> {
    let table = load_table(path)?;
    config.policy.validate_for_total(table.len())?;
    Ok(table)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn print_report(report: &SamplingReport) {
    println!("seed: {}", report.seed);
    if let Some(groups) = &report.date_groups {
        print_groups(DATE_SELECTOR_LABEL, groups);
    }
    if let Some(groups) = &report.keyword_groups {
        print_groups(KEYWORD_SELECTOR_LABEL, groups);
    }
}

fn print_groups(label: &str, groups: &[GroupSummary]) {
    for line in group_lines(label, groups) {
        println!("{line}");
    }
}

fn group_lines(label: &str, groups: &[GroupSummary]) -> Vec<String> {
    let mut lines = vec![format!("--- {label} groups ---")];
    lines.extend(groups.iter().map(|group| {
        format!(
            "{}: matched={} sampled={}",
            group.label, group.matched, group.sampled
        )
    }));
    if let Some(skew) = group_skew(groups) {
        lines.push(format!(
            "skew: groups={} total={} min={} max={} mean={:.2} ratio={:.2} max_share={:.2} min_share={:.2}",
            skew.groups,
            skew.total,
            skew.min,
            skew.max,
            skew.mean,
            skew.ratio,
            skew.max_share,
            skew.min_share
        ));
        lines.extend(skew.per_group.iter().map(|share| {
            format!(
                "  share {}: {} ({:.1}%)",
                share.label,
                share.count,
                share.share * 100.0
            )
        }));
    }
    lines
}
