//! bio-taxonomy: tag member records with categories guessed from their bios.

mod batch;
mod classify;
mod error;
mod records;
mod report;
mod stem;
mod stopwords;
mod taxonomy;
mod tokenize;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::classify::{join_terms, Classifier};
use crate::report::StemReport;
use crate::stopwords::StopwordSet;
use crate::taxonomy::StemCategoryIndex;

const DEFAULT_STOPWORDS_PATH: &str = "StopWordList.txt";
const DEFAULT_TAXONOMY_PATH: &str = "TaxonomyList.txt";
const DEFAULT_BIO_FIELD: &str = "Short bio";
const DEFAULT_OUTPUT_FIELD: &str = "Taxonomy terms";

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "bio-taxonomy")]
#[command(about = "Guess taxonomy categories for member records from their bio text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConfigArgs {
    /// Stopword list (one word per line, # comments).
    #[arg(long, short, default_value = DEFAULT_STOPWORDS_PATH)]
    stopwords: PathBuf,

    /// Taxonomy list (category and example words per line).
    #[arg(long, short, default_value = DEFAULT_TAXONOMY_PATH)]
    taxonomy: PathBuf,
}

impl ConfigArgs {
    fn load(&self) -> Result<Classifier, error::ConfigError> {
        let stopwords = StopwordSet::load(&self.stopwords)?;
        let index = StemCategoryIndex::build(&self.taxonomy)?;
        if stopwords.is_empty() {
            tracing::warn!("stopword list {:?} is empty", self.stopwords);
        }
        if index.is_empty() {
            tracing::warn!("taxonomy {:?} has no entries, every record gets zero categories", self.taxonomy);
        }
        Ok(Classifier::new(stopwords, index))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Add a categories column to member CSV files (written to stdout).
    Tag {
        /// Member CSV files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Column holding the bio text.
        #[arg(long, default_value = DEFAULT_BIO_FIELD)]
        bio_field: String,

        /// Column receiving pipe-joined categories.
        #[arg(long, default_value = DEFAULT_OUTPUT_FIELD)]
        output_field: String,

        /// Records classified in parallel.
        #[arg(long, short, default_value_t = 1)]
        jobs: usize,
    },

    /// Report every bio word with its stem and cropped suffix.
    Stems {
        /// Member CSV files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Stopword list.
        #[arg(long, short, default_value = DEFAULT_STOPWORDS_PATH)]
        stopwords: PathBuf,

        /// Column holding the bio text.
        #[arg(long, default_value = DEFAULT_BIO_FIELD)]
        bio_field: String,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Classify a single piece of text.
    Classify {
        text: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Tag { files, config, bio_field, output_field, jobs } => {
            run_tag(&files, &config, &bio_field, &output_field, jobs)
        }
        Command::Stems { files, stopwords, bio_field, json } => {
            run_stems(&files, &stopwords, &bio_field, json)
        }
        Command::Classify { text, config } => run_classify(&text, &config),
    };
    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_tag(
    files: &[PathBuf],
    config: &ConfigArgs,
    bio_field: &str,
    output_field: &str,
    jobs: usize,
) -> CliResult {
    let classifier = Arc::new(config.load()?);
    let stdout = std::io::stdout();
    let mut total = 0;
    for file in files {
        total += tag_file(file, &classifier, bio_field, output_field, jobs, stdout.lock())?;
    }
    tracing::info!("tagged {} member records from {} files", total, files.len());
    Ok(())
}

fn tag_file<W: Write>(
    path: &Path,
    classifier: &Arc<Classifier>,
    bio_field: &str,
    output_field: &str,
    jobs: usize,
    out: W,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let mut table = records::read_members(path)?;
    table.ensure_column(output_field);

    let bios = table.field_values(bio_field);
    let categories = batch::classify_all(classifier, bios, jobs)?;
    for (row, categories) in table.rows.iter_mut().zip(categories) {
        row.insert(output_field.to_string(), join_terms(&categories));
    }

    let written = records::write_members(out, &table)?;
    tracing::info!("wrote {} records for {:?}", written, path);
    Ok(written)
}

fn run_stems(files: &[PathBuf], stopwords_path: &Path, bio_field: &str, json: bool) -> CliResult {
    let stopwords = StopwordSet::load(stopwords_path)?;
    let mut report = StemReport::new();
    for file in files {
        let table = records::read_members(file)?;
        for bio in table.field_values(bio_field) {
            report.add_bio(&bio, &stopwords);
        }
    }
    tracing::info!("{} distinct words", report.len());

    if json {
        println!("{}", report.render_json()?);
    } else {
        println!("====== WORD STEMS ======");
        print!("{}", report.render_table());
        println!("====== STEM GROUPS ======");
        print!("{}", report.render_groups());
    }
    Ok(())
}

fn run_classify(text: &str, config: &ConfigArgs) -> CliResult {
    let classifier = config.load()?;
    println!("{}", join_terms(&classifier.classify(text)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path) -> ConfigArgs {
        let stopwords = dir.join("StopWordList.txt");
        let taxonomy = dir.join("TaxonomyList.txt");
        fs::write(&stopwords, "# stop\nthe\nand\na\n").unwrap();
        fs::write(&taxonomy, "Music\tguitar\tpiano\nBiology bird birds avian\n").unwrap();
        ConfigArgs { stopwords, taxonomy }
    }

    #[test]
    fn test_tag_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let members = dir.path().join("members.csv");
        fs::write(
            &members,
            "Name,Short bio\nAnn,he plays the guitar and piano\nBob,\nCy,Watches BIRDS and plays piano\n",
        )
        .unwrap();

        let classifier = Arc::new(config.load().unwrap());
        for jobs in [1, 3] {
            let mut out = Vec::new();
            let n = tag_file(&members, &classifier, DEFAULT_BIO_FIELD, DEFAULT_OUTPUT_FIELD, jobs, &mut out)
                .unwrap();
            assert_eq!(n, 3);
            assert_eq!(
                String::from_utf8(out).unwrap(),
                "Name,Short bio,Taxonomy terms\r\n\
                 Ann,he plays the guitar and piano,Music\r\n\
                 Bob,,\r\n\
                 Cy,Watches BIRDS and plays piano,Biology|Music\r\n"
            );
        }
    }

    #[test]
    fn test_missing_bio_column_gives_empty_terms() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let members = dir.path().join("members.csv");
        fs::write(&members, "Name\nAnn\n").unwrap();

        let classifier = Arc::new(config.load().unwrap());
        let mut out = Vec::new();
        tag_file(&members, &classifier, DEFAULT_BIO_FIELD, DEFAULT_OUTPUT_FIELD, 1, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name,Taxonomy terms\r\nAnn,\r\n");
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigArgs {
            stopwords: dir.path().join("absent.txt"),
            taxonomy: dir.path().join("TaxonomyList.txt"),
        };
        let err = config.load().unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn test_cli_parses_tag_defaults() {
        let cli = Cli::try_parse_from(["bio-taxonomy", "tag", "members.csv"]).unwrap();
        match cli.command {
            Command::Tag { files, config, bio_field, output_field, jobs } => {
                assert_eq!(files, vec![PathBuf::from("members.csv")]);
                assert_eq!(config.stopwords, PathBuf::from(DEFAULT_STOPWORDS_PATH));
                assert_eq!(config.taxonomy, PathBuf::from(DEFAULT_TAXONOMY_PATH));
                assert_eq!(bio_field, "Short bio");
                assert_eq!(output_field, "Taxonomy terms");
                assert_eq!(jobs, 1);
            }
            _ => panic!("expected tag command"),
        }
    }

    #[test]
    fn test_no_http_subcommand() {
        assert!(Cli::try_parse_from(["bio-taxonomy", "serve"]).is_err());
    }
}
