// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use crate::duels::DuelMatrix;
use crate::resolver::{CondorcetMatrix, DuelStatus};

/// A vote, expressed with the names of the candidates.
///
/// The candidates must form a complete ranking: every registered candidate
/// appears exactly once, the most preferred first.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Vote {
    pub candidates: Vec<String>,
    pub count: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub name: String,
}

// ******** Output data structures *********

/// One duel as it was considered during the resolution, with candidate names.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DuelStats {
    pub winner: String,
    pub loser: String,
    pub margin: i64,
    pub status: DuelStatus,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    /// The registered candidates, in the order that defines their index.
    pub candidates: Vec<String>,
    /// None only for an election without candidates.
    pub winner: Option<String>,
    /// All the candidates that nobody is placed ahead of. The winner is the
    /// first of them.
    pub unbeaten: Vec<String>,
    pub duels: DuelMatrix,
    pub condorcet: CondorcetMatrix,
    /// Margins of the duels retained in the Condorcet graph, zero elsewhere.
    pub weights: DuelMatrix,
    /// The duels in the order in which they were considered.
    pub duel_stats: Vec<DuelStats>,
    /// A complete order of the candidates compatible with the Condorcet graph.
    pub ranking: Vec<String>,
}

/// Errors that prevent an election from being tabulated.
///
/// They are all raised while checking the votes, before any counting happens.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// A vote mentions a name that is not a registered candidate.
    UnknownCandidate { vote: usize, name: String },
    /// A vote selects the same candidate twice.
    DuplicateCandidate { vote: usize, name: String },
    /// A vote does not rank every candidate.
    IncompleteRanking {
        vote: usize,
        ranked: usize,
        expected: usize,
    },
    /// The same name was registered for two candidates.
    DuplicateRegistration(String),
    /// The total count of the votes, up to and including this vote, does not
    /// fit in a duel margin.
    TooManyVotes { vote: usize, count: u64 },
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::UnknownCandidate { vote, name } => {
                write!(f, "vote #{}: unknown candidate {:?}", vote + 1, name)
            }
            VotingErrors::DuplicateCandidate { vote, name } => {
                write!(f, "vote #{}: candidate {:?} selected twice", vote + 1, name)
            }
            VotingErrors::IncompleteRanking {
                vote,
                ranked,
                expected,
            } => write!(
                f,
                "vote #{}: {} candidates ranked, expected {}",
                vote + 1,
                ranked,
                expected
            ),
            VotingErrors::DuplicateRegistration(name) => {
                write!(f, "candidate {:?} is registered twice", name)
            }
            VotingErrors::TooManyVotes { vote, count } => write!(
                f,
                "vote #{}: count {} brings the total above {}",
                vote + 1,
                count,
                i64::MAX
            ),
        }
    }
}

// ********* Configuration **********

/// How duels with the same margin are ordered before being locked in.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// The duel between the candidates with the lowest indexes goes first,
    /// comparing the winner index and then the loser index.
    UseCandidateOrder,
    /// A reproducible order that is hard to guess in advance. It uses a
    /// cryptographic hash of the seed and of the candidate indexes.
    Random(u32),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub tiebreak_mode: TieBreakMode,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        tiebreak_mode: TieBreakMode::UseCandidateOrder,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
