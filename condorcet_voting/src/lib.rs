mod config;
pub mod builder;
pub mod duels;
pub mod manual;
pub mod quick_start;
pub mod resolver;
pub mod winner;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;
pub use crate::duels::{tally, Ballot, DuelMatrix};
pub use crate::resolver::{find_cycle, resolve, CondorcetMatrix, DuelRecord, DuelStatus, Resolution};
pub use crate::winner::{find_winner, Winner};

/// Runs the Condorcet method with the given rules for the given votes.
///
/// Arguments:
/// * `coll` the collection of votes to process
/// * `rules` the rules that govern this election
/// * `candidates` the registered candidates for this election. If not provided, the
/// candidates will be inferred from the votes, in order of first appearance.
pub fn run_condorcet(
    coll: &[Vote],
    rules: &VoteRules,
    candidates: &Option<Vec<Candidate>>,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {:?} votes, candidates: {:?}, rules: {:?}",
        coll.len(),
        candidates,
        rules
    );

    let candidate_names: Vec<String> = match candidates {
        Some(cands) => cands.iter().map(|c| c.name.clone()).collect(),
        None => infer_candidates(coll),
    };
    let ballots = checks(coll, &candidate_names)?;
    for (idx, name) in candidate_names.iter().enumerate() {
        info!("Candidate: {}: {}", idx + 1, name);
    }

    let duels = tally(candidate_names.len(), &ballots);
    let resolution = resolve(&duels, rules.tiebreak_mode);
    let winner = find_winner(&resolution.condorcet);

    let name = |cid: usize| candidate_names[cid].clone();
    let duel_stats: Vec<DuelStats> = resolution
        .duels
        .iter()
        .map(|r| DuelStats {
            winner: name(r.winner),
            loser: name(r.loser),
            margin: r.margin,
            status: r.status,
        })
        .collect();
    for ds in duel_stats.iter() {
        info!(
            "Duel {} -> {} (margin {}): {:?}",
            ds.winner, ds.loser, ds.margin, ds.status
        );
    }

    let winner_name = match winner {
        Winner::Candidate(cid) => Some(name(cid)),
        Winner::NoWinner => None,
    };
    info!("Winner: {:?}", winner_name);

    Ok(VotingResult {
        winner: winner_name,
        unbeaten: resolution.condorcet.sources().into_iter().map(name).collect(),
        weights: duels.weights(&resolution.condorcet),
        ranking: resolution
            .condorcet
            .ranking()
            .into_iter()
            .map(name)
            .collect(),
        duel_stats,
        duels,
        condorcet: resolution.condorcet,
        candidates: candidate_names,
    })
}

fn infer_candidates(coll: &[Vote]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for v in coll.iter() {
        for name in v.candidates.iter() {
            if !res.contains(name) {
                res.push(name.clone());
            }
        }
    }
    debug!("infer_candidates: {:?}", res);
    res
}

// Turns the votes into ballots of candidate indexes. Every vote must rank all
// the candidates exactly once.
fn checks(coll: &[Vote], candidate_names: &[String]) -> Result<Vec<Ballot>, VotingErrors> {
    debug!("checks: coll size: {:?}", coll.len());
    let mut candidates: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in candidate_names.iter().enumerate() {
        if candidates.insert(name.as_str(), idx).is_some() {
            return Err(VotingErrors::DuplicateRegistration(name.clone()));
        }
    }

    let mut ballots: Vec<Ballot> = Vec::with_capacity(coll.len());
    // Every margin is bounded by the total count.
    let mut total: i64 = 0;
    for (vote_idx, v) in coll.iter().enumerate() {
        total = i64::try_from(v.count)
            .ok()
            .and_then(|c| total.checked_add(c))
            .ok_or(VotingErrors::TooManyVotes {
                vote: vote_idx,
                count: v.count,
            })?;
        let mut seen = vec![false; candidate_names.len()];
        let mut ranking: Vec<usize> = Vec::with_capacity(v.candidates.len());
        for name in v.candidates.iter() {
            let cid = *candidates
                .get(name.as_str())
                .ok_or_else(|| VotingErrors::UnknownCandidate {
                    vote: vote_idx,
                    name: name.clone(),
                })?;
            if seen[cid] {
                return Err(VotingErrors::DuplicateCandidate {
                    vote: vote_idx,
                    name: name.clone(),
                });
            }
            seen[cid] = true;
            ranking.push(cid);
        }
        if ranking.len() != candidate_names.len() {
            return Err(VotingErrors::IncompleteRanking {
                vote: vote_idx,
                ranked: ranking.len(),
                expected: candidate_names.len(),
            });
        }
        ballots.push(Ballot {
            ranking,
            count: v.count,
        });
    }
    Ok(ballots)
}
