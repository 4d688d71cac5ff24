use log::{debug, info, warn};

use condorcet_voting::*;
use snafu::prelude::*;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::election::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_interactive;
mod io_json;
mod render;

#[derive(Debug, Snafu)]
pub enum ElectionError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson { source: std::io::Error, path: String },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error parsing a number in the configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("Error writing to {path}"))]
    WritingOutput { source: std::io::Error, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("CSV line {lineno}: could not read count {content:?}"))]
    CsvCount { lineno: usize, content: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error reading from the terminal"))]
    TerminalIo { source: std::io::Error },
    #[snafu(display("The input ended before all the votes were collected"))]
    TerminalClosed {},
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ElectionResult<T> = Result<T, ElectionError>;

/// A ballot, as parsed by the readers
/// This is before checking the names against the candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub count: Option<u64>,
    pub choices: Vec<String>,
}

fn read_ranking_data(root_path: &Path, cfs: &FileSource) -> ElectionResult<Vec<Vote>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    let parsed_ballots = match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ranking(&p2, cfs)?,
        "json" => io_json::read_json_ranking(&p2)?,
        x => whatever!("Provider not implemented {:?}", x),
    };
    Ok(validate_ballots(&parsed_ballots))
}

// Blank choices are dropped. Whether the remaining choices form a complete
// ranking is checked when tabulating.
fn validate_ballots(parsed_ballots: &[ParsedBallot]) -> Vec<Vote> {
    let mut res: Vec<Vote> = Vec::new();
    for pb in parsed_ballots.iter() {
        let candidates: Vec<String> = pb
            .choices
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        debug!("Choices for ballot {:?}: {:?}", pb.id, candidates);

        // Default of 1 if not specified
        let count = pb.count.unwrap_or(1);
        if count > 0 {
            res.push(Vote { candidates, count });
        } else {
            debug!("Skipping ballot {:?} with a count of zero", pb.id);
        }
    }
    res
}

fn validate_rules(rules: &ElectionRules) -> ElectionResult<VoteRules> {
    Ok(VoteRules {
        tiebreak_mode: rules.tiebreak_mode()?,
    })
}

fn default_config(args: &Args) -> ElectionConfig {
    let contest_name = match &args.input {
        Some(path) => io_common::simplify_file_name(path),
        None => "Condorcet election".to_string(),
    };
    ElectionConfig {
        output_settings: OutputSettings {
            contest_name,
            ..OutputSettings::default()
        },
        ..ElectionConfig::default()
    }
}

/// Merges the command line options into the configuration.
fn apply_args(config: &mut ElectionConfig, args: &Args) {
    if let Some(path) = &args.input {
        let provider = args.input_type.as_deref().unwrap_or("csv");
        config.cvr_file_sources = vec![FileSource::new(provider, path)];
    }
    if let Some(mode) = &args.tiebreak {
        config.rules.tiebreak_mode = Some(mode.clone());
    }
    if let Some(seed) = args.seed {
        config.rules.random_seed = Some(seed.to_string());
    }
}

/// Runs the election and assembles the JSON summary.
pub fn tabulate(
    config: &ElectionConfig,
    votes: &[Vote],
    candidates: Option<Vec<Candidate>>,
) -> ElectionResult<(VotingResult, JSValue)> {
    let rules = validate_rules(&config.rules)?;
    let result = run_condorcet(votes, &rules, &candidates).context(VotingSnafu {})?;
    let summary = render::build_summary_js(config, &rules, &result);
    Ok((result, summary))
}

fn write_output(location: &str, content: &str) -> ElectionResult<()> {
    if location == "stdout" {
        println!("{}", content);
        Ok(())
    } else {
        info!("Writing {:?}", location);
        fs::write(location, content).context(WritingOutputSnafu { path: location })
    }
}

fn check_reference(summary_p: &str, pretty_js_stats: &str) -> ElectionResult<()> {
    let summary_ref = read_summary(summary_p)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {:?}", summary_p);
    Ok(())
}

pub fn run_election(args: &Args) -> ElectionResult<()> {
    let (mut config, root_p): (ElectionConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root_p)
        }
        None => (default_config(args), PathBuf::new()),
    };
    apply_args(&mut config, args);
    info!("config: {:?}", config);

    let (votes, candidates): (Vec<Vote>, Option<Vec<Candidate>>) = if args.interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let (names, votes) = io_interactive::read_election(&mut input, &mut output)?;
        let candidates = names.into_iter().map(|name| Candidate { name }).collect();
        (votes, Some(candidates))
    } else {
        if config.cvr_file_sources.is_empty() {
            whatever!("No ballots: use --input, --interactive or a configuration with cvrFileSources");
        }
        // Sources given on the command line are relative to the working directory.
        let source_root = if args.input.is_some() {
            PathBuf::new()
        } else {
            root_p.clone()
        };
        let mut data: Vec<Vote> = Vec::new();
        for cfs in config.cvr_file_sources.iter() {
            let mut file_data = read_ranking_data(&source_root, cfs)?;
            data.append(&mut file_data);
        }
        let candidates: Option<Vec<Candidate>> = if config.candidates.is_empty() {
            None
        } else {
            Some(
                config
                    .candidates
                    .iter()
                    .map(|c| Candidate {
                        name: c.name.clone(),
                    })
                    .collect(),
            )
        };
        (data, candidates)
    };
    debug!("votes: {:?}", votes);

    let (result, result_js) = tabulate(&config, &votes, candidates)?;
    println!("\n{}", render::text_report(&result));

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    let out_location: Option<String> = match (&args.out, &config.output_settings.output_directory) {
        (Some(out), _) => Some(out.clone()),
        (None, Some(dir)) => Some(
            root_p
                .join(dir)
                .join("summary.json")
                .display()
                .to_string(),
        ),
        (None, None) => None,
    };
    if let Some(location) = out_location {
        write_output(&location, &pretty_js_stats)?;
    }

    if let Some(graph_location) = &args.graph {
        write_output(graph_location, &render::condorcet_dot(&result))?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        check_reference(summary_p, &pretty_js_stats)?;
    }

    Ok(())
}
