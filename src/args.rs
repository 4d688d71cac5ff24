use clap::Parser;

/// This is a Condorcet election tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the election configuration, in JSON.
    /// For more information about the file format, read the documentation of the
    /// `condorcet_voting::manual` module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, condorcet will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The file containing the ballots. Setting this option overrides the sources
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// Asks for the candidates and the votes in the terminal.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    /// (file path, 'stdout' or empty) If specified, the Condorcet graph will be written in the Graphviz
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub graph: Option<String>,

    /// (useCandidateOrder or random) How to order duels with the same margin. Overrides the
    /// tiebreak mode of the configuration.
    #[clap(long, value_parser)]
    pub tiebreak: Option<String>,

    /// The seed for the random tiebreak mode.
    #[clap(long, value_parser)]
    pub seed: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
