//! SmartCheck command-line grader.
//!
//! Reads a response sheet (and an answer key), writes graded records to
//! stdout as CSV or JSON. Logs go to stderr; set `RUST_LOG=info` to see them.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use smartcheck::config::Config;
use smartcheck::grading::GradingSummary;
use smartcheck::normalize::normalize;
use smartcheck::oracle::{EmbeddingOracle, LexicalOracle, SimilarityOracle};
use smartcheck::table::csv::{write_csv, write_json};
use smartcheck::table::{AnswerKey, RawTable};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: smartcheck [--normalize-only] [--json] <answers.csv> [answer_key.csv]";

#[derive(Debug)]
struct Args {
    normalize_only: bool,
    json: bool,
    answers: PathBuf,
    answer_key: Option<PathBuf>,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut normalize_only = false;
        let mut json = false;
        let mut positional = Vec::new();

        for arg in args {
            match arg.as_str() {
                "--normalize-only" => normalize_only = true,
                "--json" => json = true,
                flag if flag.starts_with("--") => bail!("unknown flag '{flag}'\n{USAGE}"),
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let Some(answers) = positional.next() else {
            bail!("missing answers file\n{USAGE}");
        };
        let answer_key = positional.next();
        if positional.next().is_some() {
            bail!("too many arguments\n{USAGE}");
        }
        if answer_key.is_none() && !normalize_only {
            bail!("an answer key is required unless --normalize-only is given\n{USAGE}");
        }

        Ok(Self {
            normalize_only,
            json,
            answers,
            answer_key,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    if raw_args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse(raw_args)?;
    let config = Config::from_env()?;
    config.validate()?;

    let table = RawTable::from_csv_reader(open(&args.answers)?)
        .with_context(|| format!("reading {}", args.answers.display()))?;
    let rows = normalize(&table)?;

    let stdout = io::stdout();
    let out = stdout.lock();

    if args.normalize_only {
        return emit(&rows, args.json, out);
    }

    let Some(key_path) = args.answer_key else {
        bail!("an answer key is required unless --normalize-only is given\n{USAGE}");
    };
    let key = AnswerKey::from_csv_reader(open(&key_path)?)
        .with_context(|| format!("reading {}", key_path.display()))?;

    let oracle: Box<dyn SimilarityOracle> = match config.embedder_config() {
        Some(embedder_config) => Box::new(EmbeddingOracle::load_with_capacity(
            embedder_config,
            config.embedding_cache_capacity,
        )?),
        None => {
            tracing::warn!("No SMARTCHECK_MODEL_PATH configured, grading with the lexical oracle");
            Box::new(LexicalOracle::new())
        }
    };

    let engine = config.grading_engine()?;
    let records = engine.grade(&rows, &key, &oracle)?;
    emit(&records, args.json, out)?;

    let summary = GradingSummary::from_records(&records, &key);
    tracing::info!(
        total_answers = summary.total_answers,
        students = summary.students,
        average_score = summary.average_score,
        needs_review = summary.needs_review,
        "Grading complete: {}",
        summary
    );

    Ok(())
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn emit<T: Serialize, W: Write>(records: &[T], json: bool, out: W) -> anyhow::Result<()> {
    if json {
        write_json(records, out)?;
    } else {
        write_csv(records, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_grade() {
        let args = parse(&["answers.csv", "key.csv"]).unwrap();
        assert!(!args.normalize_only);
        assert!(!args.json);
        assert_eq!(args.answers, PathBuf::from("answers.csv"));
        assert_eq!(args.answer_key, Some(PathBuf::from("key.csv")));
    }

    #[test]
    fn test_parse_flags_anywhere() {
        let args = parse(&["answers.csv", "--json", "--normalize-only"]).unwrap();
        assert!(args.normalize_only);
        assert!(args.json);
        assert!(args.answer_key.is_none());
    }

    #[test]
    fn test_parse_requires_key_when_grading() {
        let err = parse(&["answers.csv"]).unwrap_err();
        assert!(err.to_string().contains("answer key is required"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.csv", "b.csv", "c.csv"]).is_err());
        assert!(parse(&["--verbose", "a.csv", "b.csv"]).is_err());
    }
}
