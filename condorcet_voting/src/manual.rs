/*!

This is the long-form manual for `condorcet_voting` and `condorcet`.

## The method

Every voter ranks all the candidates. For each pair of candidates (a *duel*),
the margin is the number of voters preferring the first one minus the number
of voters preferring the second one.

The duels with a positive margin are then locked in from the largest margin to
the smallest. A duel that would create a cycle with the duels already locked
in (A ahead of B, B ahead of C, C ahead of A) is skipped and never
reconsidered. The result is the *Condorcet graph*: an acyclic graph where an
edge `A -> B` means that A is placed ahead of B.

The winner is the first candidate, in registration order, that no other
candidate is placed ahead of.

### Ties

Duels with the same margin are locked in following the tiebreak mode:
- `useCandidateOrder` (default): the duel whose winner was registered first
  goes first, then the duel whose loser was registered first.
- `random`: the order is derived from a SHA-256 hash of the `randomSeed` and
  of the candidates. The same seed always produces the same result.

A duel with a margin of zero is a tie and never appears in the graph. When the
graph is disconnected (for example, with no ballots at all), several
candidates are unbeaten and the first registered one is declared the winner.
All of them are listed in the `unbeaten` field of the results.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values
* `json` a list of ballots in JSON
* an interactive session in the terminal (`--interactive`)

### csv

Each row is one ballot. Each column (in order) is a choice, starting from the
first choice. The name of the choice in the header is not significant.

```text
id,count,choice 1,choice 2,choice 3
id1,20,Alice,Bob,Charlie
id2,12,Bob,Charlie,Alice
```

The `id` and `count` columns are optional. Headers in the first row are optional.
See the [Configuration section](#configuration) on controling the optional rows and columns.

### json

```text
[
  {"id": "id1", "count": 20, "ranking": ["Alice", "Bob", "Charlie"]},
  {"ranking": ["Bob", "Charlie", "Alice"]}
]
```

`id` and `count` are optional. Without a count, a ballot counts once.

### Interactive

The program asks for the number of candidates, their names, the number of
voters and then, for each voter, the candidates by number in order of
preference. Selecting the same candidate twice is refused and asked again.

## Configuration

The program accepts a configuration file in JSON:

```text
{
  "outputSettings": {
    "contestName": "Board election",
    "contestDate": "2023-05-01",
    "outputDirectory": "output"
  },
  "cvrFileSources": [
    {
      "provider": "csv",
      "filePath": "ballots.csv",
      "firstVoteColumnIndex": 3,
      "firstVoteRowIndex": 2,
      "idColumnIndex": 1,
      "countColumnIndex": 2
    }
  ],
  "candidates": [{"name": "Alice"}, {"name": "Bob"}, {"name": "Charlie"}],
  "rules": {"tiebreakMode": "useCandidateOrder"}
}
```

Paths in `cvrFileSources` are relative to the configuration file. Column and
row indexes start at 1. If the candidates are not listed, they are taken from
the ballots in order of first appearance.

## Outputs

- the summary in JSON (`--out`): the duels, the order in which they were
  locked in or skipped, the edges of the Condorcet graph with their margins,
  the resolved ranking and the winner.
- the Condorcet graph in the Graphviz format (`--graph`). Render it with
  `dot -Tpng graph.dot -o graph.png`.
- `--reference` compares the JSON summary with a previously generated one.

 */
