use log::{debug, info};
use std::cmp::Reverse;

use crate::config::TieBreakMode;
use crate::duels::DuelMatrix;

/// The resolved preferences between the candidates.
///
/// An edge `i -> j` means that `i` is placed ahead of `j`. The edges never
/// form a cycle.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CondorcetMatrix {
    cells: Vec<Vec<bool>>,
}

impl CondorcetMatrix {
    pub fn empty(num_candidates: usize) -> CondorcetMatrix {
        CondorcetMatrix {
            cells: vec![vec![false; num_candidates]; num_candidates],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.cells[i][j]
    }

    /// All the edges, in row-major order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.cells[i][j])
            .collect()
    }

    pub fn in_degree(&self, j: usize) -> usize {
        self.cells.iter().filter(|row| row[j]).count()
    }

    /// The candidates that no other candidate is placed ahead of, in index order.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.len()).filter(|&j| self.in_degree(j) == 0).collect()
    }

    /// A complete order of the candidates that respects every edge.
    ///
    /// Among the candidates that can come next, the lowest index is taken.
    pub fn ranking(&self) -> Vec<usize> {
        let n = self.len();
        let mut in_degrees: Vec<usize> = (0..n).map(|j| self.in_degree(j)).collect();
        let mut placed = vec![false; n];
        let mut res: Vec<usize> = Vec::with_capacity(n);
        while let Some(next) = (0..n).find(|&j| !placed[j] && in_degrees[j] == 0) {
            placed[next] = true;
            res.push(next);
            for (j, deg) in in_degrees.iter_mut().enumerate() {
                if self.cells[next][j] {
                    *deg -= 1;
                }
            }
        }
        res
    }

    pub(crate) fn insert(&mut self, i: usize, j: usize) {
        self.cells[i][j] = true;
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DuelStatus {
    /// The duel is part of the Condorcet graph.
    Locked,
    /// Adding the duel would have created a cycle with stronger duels.
    SkippedCycle,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DuelRecord {
    pub winner: usize,
    pub loser: usize,
    pub margin: i64,
    pub status: DuelStatus,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Resolution {
    pub condorcet: CondorcetMatrix,
    /// Every duel with a positive margin, in the order it was considered.
    pub duels: Vec<DuelRecord>,
}

// Transitive closure of the edges accepted so far.
struct Reachability {
    // reach[x][y]: there is a non-empty path from x to y.
    reach: Vec<Vec<bool>>,
}

impl Reachability {
    fn new(num_candidates: usize) -> Reachability {
        Reachability {
            reach: vec![vec![false; num_candidates]; num_candidates],
        }
    }

    fn closes_cycle(&self, from: usize, to: usize) -> bool {
        from == to || self.reach[to][from]
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        let n = self.reach.len();
        let upstream: Vec<usize> = (0..n)
            .filter(|&x| x == from || self.reach[x][from])
            .collect();
        let downstream: Vec<usize> = (0..n).filter(|&y| y == to || self.reach[to][y]).collect();
        for &x in upstream.iter() {
            for &y in downstream.iter() {
                self.reach[x][y] = true;
            }
        }
    }
}

/// The duels with a positive margin, strongest first.
fn pending_duels(duels: &DuelMatrix, tiebreak: TieBreakMode) -> Vec<(usize, usize, i64)> {
    let n = duels.len();
    let mut pending: Vec<(usize, usize, i64)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| (i, j, duels.get(i, j)))
        .filter(|&(_, _, margin)| margin > 0)
        .collect();
    match tiebreak {
        TieBreakMode::UseCandidateOrder => {
            pending.sort_by_key(|&(i, j, margin)| (Reverse(margin), i, j));
        }
        TieBreakMode::Random(seed) => {
            pending.sort_by_cached_key(|&(i, j, margin)| {
                (Reverse(margin), tiebreak_digest(seed, i, j), i, j)
            });
        }
    }
    pending
}

fn tiebreak_digest(seed: u32, winner: usize, loser: usize) -> String {
    sha256::digest(format!("{:08}{:08}{:08}", seed, winner, loser))
}

/// Locks in the duels from the largest margin to the smallest, skipping each
/// duel that would close a cycle with the duels already locked in.
///
/// A skipped duel is never reconsidered. Duels with a zero margin are ties and
/// never become edges.
pub fn resolve(duels: &DuelMatrix, tiebreak: TieBreakMode) -> Resolution {
    let n = duels.len();
    let mut condorcet = CondorcetMatrix::empty(n);
    let mut reachability = Reachability::new(n);
    let mut records: Vec<DuelRecord> = Vec::new();

    for (winner, loser, margin) in pending_duels(duels, tiebreak) {
        let status = if reachability.closes_cycle(winner, loser) {
            DuelStatus::SkippedCycle
        } else {
            condorcet.insert(winner, loser);
            reachability.add_edge(winner, loser);
            DuelStatus::Locked
        };
        debug!(
            "resolve: duel {} -> {} margin {}: {:?}",
            winner, loser, margin, status
        );
        records.push(DuelRecord {
            winner,
            loser,
            margin,
            status,
        });
    }

    debug_assert!(find_cycle(&condorcet).is_none());
    info!(
        "resolve: {} duels considered, {} locked",
        records.len(),
        records
            .iter()
            .filter(|r| r.status == DuelStatus::Locked)
            .count()
    );
    Resolution {
        condorcet,
        duels: records,
    }
}

#[derive(Eq, PartialEq, Clone, Copy)]
enum Visit {
    New,
    InProgress,
    Done,
}

/// Looks for a cycle in the relation with a depth-first search.
///
/// Returns the candidates along the cycle, starting from the first one
/// reached by the search.
pub fn find_cycle(condorcet: &CondorcetMatrix) -> Option<Vec<usize>> {
    let n = condorcet.len();
    let mut visits = vec![Visit::New; n];
    let mut path: Vec<usize> = Vec::new();
    for start in 0..n {
        if visits[start] == Visit::New {
            if let Some(cycle) = visit(condorcet, start, &mut visits, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit(
    condorcet: &CondorcetMatrix,
    node: usize,
    visits: &mut [Visit],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    visits[node] = Visit::InProgress;
    path.push(node);
    for next in 0..condorcet.len() {
        if !condorcet.has_edge(node, next) {
            continue;
        }
        match visits[next] {
            Visit::InProgress => {
                let start = path.iter().position(|&x| x == next)?;
                return Some(path[start..].to_vec());
            }
            Visit::New => {
                if let Some(cycle) = visit(condorcet, next, visits, path) {
                    return Some(cycle);
                }
            }
            Visit::Done => {}
        }
    }
    path.pop();
    visits[node] = Visit::Done;
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duels::{tally, Ballot};

    fn ballots(rankings: &[&[usize]]) -> Vec<Ballot> {
        rankings.iter().map(|r| Ballot::new(r.to_vec())).collect()
    }

    #[test]
    fn empty_matrix_resolves_to_empty_relation() {
        let res = resolve(&DuelMatrix::zeros(4), TieBreakMode::UseCandidateOrder);
        assert_eq!(res.condorcet, CondorcetMatrix::empty(4));
        assert!(res.duels.is_empty());
    }

    #[test]
    fn no_candidates() {
        let res = resolve(&DuelMatrix::zeros(0), TieBreakMode::UseCandidateOrder);
        assert!(res.condorcet.is_empty());
        assert!(res.condorcet.ranking().is_empty());
    }

    #[test]
    fn clear_winner_locks_both_duels() {
        let duels = tally(3, &ballots(&[&[0, 1, 2], &[0, 2, 1], &[0, 1, 2]]));
        let res = resolve(&duels, TieBreakMode::UseCandidateOrder);
        assert!(res.condorcet.has_edge(0, 1));
        assert!(res.condorcet.has_edge(0, 2));
        assert!(res.condorcet.has_edge(1, 2));
        assert!(res
            .duels
            .iter()
            .all(|r| r.status == DuelStatus::Locked));
        assert_eq!(res.condorcet.ranking(), vec![0, 1, 2]);
    }

    #[test]
    fn rock_paper_scissors_skips_one_duel() {
        let duels = tally(3, &ballots(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]));
        let res = resolve(&duels, TieBreakMode::UseCandidateOrder);
        // All the margins are equal: candidate order decides.
        assert_eq!(
            res.duels,
            vec![
                DuelRecord {
                    winner: 0,
                    loser: 1,
                    margin: 1,
                    status: DuelStatus::Locked
                },
                DuelRecord {
                    winner: 1,
                    loser: 2,
                    margin: 1,
                    status: DuelStatus::Locked
                },
                DuelRecord {
                    winner: 2,
                    loser: 0,
                    margin: 1,
                    status: DuelStatus::SkippedCycle
                },
            ]
        );
        assert_eq!(res.condorcet.edges(), vec![(0, 1), (1, 2)]);
        assert!(find_cycle(&res.condorcet).is_none());
    }

    #[test]
    fn weakest_duel_of_a_cycle_is_skipped() {
        // 0 > 1 by 5, 1 > 2 by 3, 2 > 0 by 1
        let duels = DuelMatrix::from_rows(vec![vec![0, 5, -1], vec![-5, 0, 3], vec![1, -3, 0]]);
        let res = resolve(&duels, TieBreakMode::UseCandidateOrder);
        assert_eq!(res.condorcet.edges(), vec![(0, 1), (1, 2)]);
        assert_eq!(res.duels[2].status, DuelStatus::SkippedCycle);
        assert_eq!(res.duels[2].winner, 2);
    }

    #[test]
    fn skipped_duel_through_a_longer_path() {
        // 0 > 1, 1 > 2, 2 > 3 are strong; 3 > 0 is weak and closes a 4-cycle.
        let duels = DuelMatrix::from_rows(vec![
            vec![0, 9, 0, -1],
            vec![-9, 0, 8, 0],
            vec![0, -8, 0, 7],
            vec![1, 0, -7, 0],
        ]);
        let res = resolve(&duels, TieBreakMode::UseCandidateOrder);
        assert_eq!(res.condorcet.edges(), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(res.condorcet.sources(), vec![0]);
    }

    #[test]
    fn tie_is_never_an_edge() {
        let duels = tally(2, &ballots(&[&[0, 1], &[1, 0]]));
        let res = resolve(&duels, TieBreakMode::UseCandidateOrder);
        assert!(res.condorcet.edges().is_empty());
        assert_eq!(res.condorcet.sources(), vec![0, 1]);
    }

    #[test]
    fn random_tiebreak_is_reproducible() {
        let duels = tally(3, &ballots(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]));
        let first = resolve(&duels, TieBreakMode::Random(42));
        let second = resolve(&duels, TieBreakMode::Random(42));
        assert_eq!(first, second);
        assert_eq!(first.condorcet.edges().len(), 2);
        assert!(find_cycle(&first.condorcet).is_none());
    }

    #[test]
    fn find_cycle_reports_the_cycle() {
        let mut condorcet = CondorcetMatrix::empty(4);
        condorcet.insert(0, 1);
        condorcet.insert(1, 2);
        condorcet.insert(2, 3);
        assert_eq!(find_cycle(&condorcet), None);
        condorcet.insert(3, 1);
        assert_eq!(find_cycle(&condorcet), Some(vec![1, 2, 3]));
    }

    #[test]
    fn ranking_prefers_lowest_index() {
        let mut condorcet = CondorcetMatrix::empty(4);
        condorcet.insert(3, 0);
        condorcet.insert(2, 1);
        assert_eq!(condorcet.ranking(), vec![2, 1, 3, 0]);
    }
}
