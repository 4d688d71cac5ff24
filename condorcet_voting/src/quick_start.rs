/*!

# Quick start

This example runs an election end to end from a CSV file. We would like to
decide on the election between 3 candidates: Alice, Bob and Charlie. Each
voter ranks all of them:

```text
Alice,Bob,Charlie
Bob,Charlie,Alice
Alice,Charlie,Bob
Charlie,Alice,Bob
Alice,Bob,Charlie
```

Run `condorcet` with the following command:

```bash
condorcet -i ballots.csv --graph graph.dot
```

You should see the outcome of the election:

```text
[2023-05-01T09:55:59Z INFO  condorcet_voting] Processing 5 votes, candidates: None, rules: VoteRules { tiebreak_mode: UseCandidateOrder }
[2023-05-01T09:55:59Z INFO  condorcet_voting] Candidate: 1: Alice
[2023-05-01T09:55:59Z INFO  condorcet_voting] Candidate: 2: Bob
[2023-05-01T09:55:59Z INFO  condorcet_voting] Candidate: 3: Charlie
[2023-05-01T09:55:59Z INFO  condorcet_voting] Duel Alice -> Bob (margin 3): Locked
...
The winner, as determined by the Condorcet method, is : Alice
```

`graph.dot` contains the Condorcet graph. Each edge goes from the preferred
candidate to the other one and is labeled with the margin of the duel.

The same election can be run from a program:

```
use condorcet_voting::builder::Builder;
use condorcet_voting::VoteRules;
# use condorcet_voting::VotingErrors;

let names = |ns: &[&str]| ns.iter().map(|s| s.to_string()).collect::<Vec<String>>();

let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)?
    .candidates(&names(&["Alice", "Bob", "Charlie"]))?;
builder.add_vote_simple(&names(&["Alice", "Bob", "Charlie"]))?;
builder.add_vote_simple(&names(&["Bob", "Charlie", "Alice"]))?;
builder.add_vote_simple(&names(&["Alice", "Charlie", "Bob"]))?;
builder.add_vote_simple(&names(&["Charlie", "Alice", "Bob"]))?;
builder.add_vote_simple(&names(&["Alice", "Bob", "Charlie"]))?;

let result = builder.run()?;
assert_eq!(result.winner, Some("Alice".to_string()));
assert_eq!(result.ranking, names(&["Alice", "Bob", "Charlie"]));
# Ok::<(), VotingErrors>(())
```

Without a file, `condorcet --interactive` asks for the candidates and the
votes in the terminal.

 */
