use log::{debug, warn};

use crate::resolver::CondorcetMatrix;

/// Outcome of the search for the Condorcet winner.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Winner {
    /// Index of the winning candidate.
    Candidate(usize),
    /// Every candidate has someone placed ahead of them. With an acyclic
    /// relation, this only happens when there are no candidates.
    NoWinner,
}

/// Returns the first candidate, in index order, that no other candidate is
/// placed ahead of.
///
/// If the relation is disconnected, several candidates may qualify and only
/// the one with the lowest index is returned. The others are available
/// through `CondorcetMatrix::sources`.
pub fn find_winner(condorcet: &CondorcetMatrix) -> Winner {
    let sources = condorcet.sources();
    debug!("find_winner: unbeaten candidates: {:?}", sources);
    if sources.len() > 1 {
        warn!(
            "find_winner: {} unbeaten candidates {:?}, picking the first one",
            sources.len(),
            sources
        );
    }
    match sources.first() {
        Some(&cid) => Winner::Candidate(cid),
        None => Winner::NoWinner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreakMode;
    use crate::duels::{tally, Ballot};
    use crate::resolver::resolve;

    fn winner_of(num_candidates: usize, rankings: &[&[usize]]) -> Winner {
        let ballots: Vec<Ballot> = rankings.iter().map(|r| Ballot::new(r.to_vec())).collect();
        let duels = tally(num_candidates, &ballots);
        find_winner(&resolve(&duels, TieBreakMode::UseCandidateOrder).condorcet)
    }

    #[test]
    fn single_candidate_without_ballots() {
        assert_eq!(winner_of(1, &[]), Winner::Candidate(0));
    }

    #[test]
    fn no_ballots_picks_lowest_index() {
        assert_eq!(winner_of(4, &[]), Winner::Candidate(0));
    }

    #[test]
    fn no_candidates() {
        assert_eq!(winner_of(0, &[]), Winner::NoWinner);
    }

    #[test]
    fn clear_winner() {
        assert_eq!(
            winner_of(3, &[&[0, 1, 2], &[0, 2, 1], &[0, 1, 2]]),
            Winner::Candidate(0)
        );
    }

    #[test]
    fn winner_is_not_always_first_index() {
        assert_eq!(
            winner_of(3, &[&[2, 0, 1], &[2, 1, 0], &[1, 2, 0]]),
            Winner::Candidate(2)
        );
    }

    #[test]
    fn rock_paper_scissors() {
        // 0 -> 1 and 1 -> 2 are locked, 2 -> 0 is skipped.
        assert_eq!(
            winner_of(3, &[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]),
            Winner::Candidate(0)
        );
    }

    #[test]
    fn perfect_tie_picks_lowest_index() {
        assert_eq!(winner_of(2, &[&[0, 1], &[1, 0]]), Winner::Candidate(0));
        assert_eq!(winner_of(2, &[&[1, 0], &[0, 1]]), Winner::Candidate(0));
    }

    #[test]
    fn disconnected_relation() {
        let mut condorcet = CondorcetMatrix::empty(4);
        condorcet.insert(1, 0);
        condorcet.insert(3, 2);
        assert_eq!(condorcet.sources(), vec![1, 3]);
        assert_eq!(find_winner(&condorcet), Winner::Candidate(1));
    }
}
