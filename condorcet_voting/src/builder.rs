pub use crate::config::*;

/// A builder for adding votes.
///
/// Votes are checked against the registered candidates as soon as they are
/// added, so that an interactive source can ask the voter again.
///
/// ```
/// pub use condorcet_voting::builder::Builder;
/// pub use condorcet_voting::VoteRules;
/// # use condorcet_voting::VotingErrors;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_vote_simple(&["Bob".to_string(), "Anna".to_string()])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.winner, Some("Bob".to_string()));
///
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: VoteRules,
    pub(crate) _candidates: Option<Vec<Candidate>>,
    pub(crate) _votes: Vec<Vote>,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: None,
            _votes: Vec::new(),
        })
    }

    /// Registers the candidates. Their order defines the order used to break
    /// ties. Previously added votes are discarded.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        for (idx, name) in cands.iter().enumerate() {
            if cands[..idx].contains(name) {
                return Err(VotingErrors::DuplicateRegistration(name.clone()));
            }
        }
        Ok(Builder {
            _rules: self._rules,
            _candidates: Some(
                cands
                    .iter()
                    .map(|name| Candidate { name: name.clone() })
                    .collect(),
            ),
            _votes: Vec::new(),
        })
    }

    /// Adds a vote to the builder.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_vote_simple(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        self.add_vote(candidates, 1)
    }

    /// Adds a vote, with a potential weight attached to it.
    ///
    /// candidates: the complete ranking of the voter, the most preferred first.
    /// When candidates are registered, the ranking must contain each of them
    /// exactly once.
    pub fn add_vote(&mut self, candidates: &[String], count: u64) -> Result<(), VotingErrors> {
        let vote_idx = self._votes.len();
        for (idx, name) in candidates.iter().enumerate() {
            if candidates[..idx].contains(name) {
                return Err(VotingErrors::DuplicateCandidate {
                    vote: vote_idx,
                    name: name.clone(),
                });
            }
        }
        if let Some(valid_candidates) = self._candidates.as_deref() {
            if let Some(name) = candidates
                .iter()
                .find(|name| !valid_candidates.iter().any(|cd| cd.name == **name))
            {
                return Err(VotingErrors::UnknownCandidate {
                    vote: vote_idx,
                    name: name.clone(),
                });
            }
            if candidates.len() != valid_candidates.len() {
                return Err(VotingErrors::IncompleteRanking {
                    vote: vote_idx,
                    ranked: candidates.len(),
                    expected: valid_candidates.len(),
                });
            }
        }
        self._votes.push(Vote {
            count,
            candidates: candidates.to_vec(),
        });
        Ok(())
    }

    /// Runs the election on all the votes added so far.
    pub fn run(&self) -> Result<VotingResult, VotingErrors> {
        crate::run_condorcet(&self._votes, &self._rules, &self._candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_and_runs() {
        let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["Anna", "Bob", "Clara"]))
            .unwrap();
        builder
            .add_vote_simple(&names(&["Bob", "Anna", "Clara"]))
            .unwrap();
        builder
            .add_vote(&names(&["Clara", "Bob", "Anna"]), 2)
            .unwrap();
        let res = builder.run().unwrap();
        // Clara beats Bob 2 to 1 and Anna 2 to 1, Bob beats Anna 3 to 0.
        assert_eq!(res.winner, Some("Clara".to_string()));
        assert_eq!(res.duels.get(1, 2), -1);
        assert_eq!(res.duels.get(1, 0), 3);
        assert_eq!(res.ranking, vec!["Clara", "Bob", "Anna"]);
    }

    #[test]
    fn rejects_bad_votes_immediately() {
        let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["Anna", "Bob"]))
            .unwrap();
        assert!(matches!(
            builder.add_vote_simple(&names(&["Anna", "Anna"])),
            Err(VotingErrors::DuplicateCandidate { .. })
        ));
        assert!(matches!(
            builder.add_vote_simple(&names(&["Anna", "Zoe"])),
            Err(VotingErrors::UnknownCandidate { .. })
        ));
        assert!(matches!(
            builder.add_vote_simple(&names(&["Anna"])),
            Err(VotingErrors::IncompleteRanking { .. })
        ));
        // The rejected votes were not recorded.
        builder.add_vote_simple(&names(&["Bob", "Anna"])).unwrap();
        assert_eq!(builder._votes.len(), 1);
    }

    #[test]
    fn every_vote_is_checked_against_registration() {
        let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["Anna", "Bob"]))
            .unwrap();
        assert!(matches!(
            builder.add_vote(&names(&["Bob", "Zoe"]), 4),
            Err(VotingErrors::UnknownCandidate { vote: 0, .. })
        ));
        assert!(builder._votes.is_empty());
        builder.add_vote(&names(&["Bob", "Anna"]), 4).unwrap();
        assert_eq!(builder.run().unwrap().duels.get(1, 0), 4);
    }

    #[test]
    fn rejects_duplicate_registration() {
        let res = Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["Anna", "Bob", "Anna"]));
        assert!(matches!(res, Err(VotingErrors::DuplicateRegistration(_))));
    }
}
