use log::debug;

use crate::resolver::CondorcetMatrix;

/// A complete ranking of the candidates, by index. The first element is the
/// most preferred candidate.
///
/// Invariant: `ranking` is a permutation of `0..N` where `N` is the number of
/// candidates of the election.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub ranking: Vec<usize>,
    /// How many voters cast this exact ballot.
    pub count: u64,
}

impl Ballot {
    /// A ballot cast by a single voter.
    pub fn new(ranking: Vec<usize>) -> Ballot {
        Ballot { ranking, count: 1 }
    }
}

/// Square matrix of signed duel margins.
///
/// `get(i, j)` is the number of voters ranking `i` above `j` minus the number
/// of voters ranking `j` above `i`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DuelMatrix {
    cells: Vec<Vec<i64>>,
}

impl DuelMatrix {
    pub fn zeros(num_candidates: usize) -> DuelMatrix {
        DuelMatrix {
            cells: vec![vec![0; num_candidates]; num_candidates],
        }
    }

    /// Builds a matrix from explicit rows. All the rows must have the same
    /// length as the number of rows.
    pub fn from_rows(cells: Vec<Vec<i64>>) -> DuelMatrix {
        let n = cells.len();
        assert!(
            cells.iter().all(|row| row.len() == n),
            "duel matrix must be square"
        );
        DuelMatrix { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.cells[i][j]
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.cells
    }

    pub fn is_antisymmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (0..n).all(|j| self.cells[i][j] == -self.cells[j][i]))
    }

    /// The margins of the duels kept in the Condorcet graph, and zero for all
    /// the other cells.
    pub fn weights(&self, condorcet: &CondorcetMatrix) -> DuelMatrix {
        assert_eq!(self.len(), condorcet.len());
        let n = self.len();
        let mut cells = vec![vec![0; n]; n];
        for (i, j) in condorcet.edges() {
            cells[i][j] = self.cells[i][j];
        }
        DuelMatrix { cells }
    }
}

/// Counts all the duels between the candidates.
///
/// Every pair of positions in a ballot is one duel won by the candidate at
/// the earlier position.
///
/// The ballots are expected to be permutations of `0..num_candidates`, which
/// is checked by the callers of this function. Margins saturate at
/// `i64::MAX` in absolute value; `run_condorcet` rejects totals that large.
pub fn tally(num_candidates: usize, ballots: &[Ballot]) -> DuelMatrix {
    let mut duels = DuelMatrix::zeros(num_candidates);
    for ballot in ballots.iter() {
        debug_assert_eq!(ballot.ranking.len(), num_candidates);
        let count = i64::try_from(ballot.count).unwrap_or(i64::MAX);
        let ranking = &ballot.ranking;
        for m in 0..ranking.len() {
            for n in (m + 1)..ranking.len() {
                let (ahead, behind) = (ranking[m], ranking[n]);
                let margin = duels.cells[ahead][behind].saturating_add(count);
                duels.cells[ahead][behind] = margin;
                duels.cells[behind][ahead] = -margin;
            }
        }
    }
    debug!(
        "tally: {} ballots over {} candidates: {:?}",
        ballots.len(),
        num_candidates,
        duels.cells
    );
    duels
}
