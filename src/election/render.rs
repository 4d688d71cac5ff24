// Presentation of the results: JSON summary, Graphviz graph and text report.

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::election::*;

fn status_label(status: DuelStatus) -> &'static str {
    match status {
        DuelStatus::Locked => "locked",
        DuelStatus::SkippedCycle => "skipped",
    }
}

fn tiebreak_label(rules: &VoteRules) -> String {
    match rules.tiebreak_mode {
        TieBreakMode::UseCandidateOrder => "useCandidateOrder".to_string(),
        TieBreakMode::Random(seed) => format!("random({})", seed),
    }
}

fn duels_to_json(rv: &VotingResult) -> JSValue {
    let mut duels: JSMap<String, JSValue> = JSMap::new();
    for (i, name) in rv.candidates.iter().enumerate() {
        let mut row: JSMap<String, JSValue> = JSMap::new();
        for (j, other) in rv.candidates.iter().enumerate() {
            if i != j {
                row.insert(other.clone(), json!(rv.duels.get(i, j)));
            }
        }
        duels.insert(name.clone(), JSValue::Object(row));
    }
    JSValue::Object(duels)
}

fn result_stats_to_json(rv: &VotingResult) -> Vec<JSValue> {
    rv.duel_stats
        .iter()
        .enumerate()
        .map(|(idx, ds)| {
            json!({
                "duel": idx + 1,
                "winner": ds.winner,
                "loser": ds.loser,
                "margin": ds.margin,
                "status": status_label(ds.status),
            })
        })
        .collect()
}

fn graph_to_json(rv: &VotingResult) -> Vec<JSValue> {
    rv.condorcet
        .edges()
        .into_iter()
        .map(|(i, j)| {
            json!({
                "from": rv.candidates[i],
                "to": rv.candidates[j],
                "weight": rv.weights.get(i, j),
            })
        })
        .collect()
}

pub fn build_summary_js(config: &ElectionConfig, rules: &VoteRules, rv: &VotingResult) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_juridiction.clone(),
        office: config.output_settings.contest_office.clone(),
        tiebreak_mode: tiebreak_label(rules),
    };
    json!({
        "config": c,
        "candidates": rv.candidates,
        "duels": duels_to_json(rv),
        "results": result_stats_to_json(rv),
        "graph": graph_to_json(rv),
        "ranking": rv.ranking,
        "unbeaten": rv.unbeaten,
        "winner": rv.winner,
    })
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The Condorcet graph in the Graphviz format. Edges are labeled with the
/// margin of the duel.
pub fn condorcet_dot(rv: &VotingResult) -> String {
    let mut lines: Vec<String> = vec![
        "digraph condorcet {".to_string(),
        "  node [shape=ellipse, style=filled, fillcolor=skyblue, fontsize=15];".to_string(),
    ];
    for (idx, name) in rv.candidates.iter().enumerate() {
        let border = if rv.winner.as_ref() == Some(name) {
            ", penwidth=3"
        } else {
            ""
        };
        lines.push(format!(
            "  c{} [label=\"{}\"{}];",
            idx,
            dot_escape(name),
            border
        ));
    }
    for (i, j) in rv.condorcet.edges() {
        lines.push(format!(
            "  c{} -> c{} [label=\"{}\", fontcolor=red];",
            i,
            j,
            rv.weights.get(i, j)
        ));
    }
    lines.push("}".to_string());
    lines.join("\n") + "\n"
}

pub fn text_report(rv: &VotingResult) -> String {
    let mut lines: Vec<String> = vec!["Condorcet graph :".to_string()];
    for ds in rv.duel_stats.iter() {
        lines.push(format!(
            "  {} -> {} (margin {}): {}",
            ds.winner,
            ds.loser,
            ds.margin,
            status_label(ds.status)
        ));
    }
    if rv.ranking.len() > 1 {
        lines.push(format!("Ranking : {}", rv.ranking.join(" > ")));
    }
    if rv.unbeaten.len() > 1 {
        lines.push(format!(
            "Unbeaten candidates : {}",
            rv.unbeaten.join(", ")
        ));
    }
    match &rv.winner {
        Some(name) => lines.push(format!(
            "The winner, as determined by the Condorcet method, is : {}",
            name
        )),
        None => lines.push("No winner could be determined by the Condorcet method".to_string()),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use condorcet_voting::builder::Builder;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    fn rock_paper_scissors() -> VotingResult {
        let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)
            .unwrap()
            .candidates(&names(&["Rock", "Paper", "Sc\"issors"]))
            .unwrap();
        builder
            .add_vote_simple(&names(&["Rock", "Paper", "Sc\"issors"]))
            .unwrap();
        builder
            .add_vote_simple(&names(&["Paper", "Sc\"issors", "Rock"]))
            .unwrap();
        builder
            .add_vote_simple(&names(&["Sc\"issors", "Rock", "Paper"]))
            .unwrap();
        builder.run().unwrap()
    }

    #[test]
    fn summary() {
        let rv = rock_paper_scissors();
        let config = ElectionConfig {
            output_settings: OutputSettings {
                contest_name: "Game".to_string(),
                ..OutputSettings::default()
            },
            ..ElectionConfig::default()
        };
        let js = build_summary_js(&config, &VoteRules::DEFAULT_RULES, &rv);
        assert_eq!(js["config"]["contest"], json!("Game"));
        assert_eq!(js["config"]["tiebreakMode"], json!("useCandidateOrder"));
        assert_eq!(js["winner"], json!("Rock"));
        assert_eq!(js["duels"]["Rock"]["Paper"], json!(1));
        assert_eq!(js["duels"]["Paper"]["Rock"], json!(-1));
        assert_eq!(js["results"].as_array().map(|a| a.len()), Some(3));
        assert_eq!(js["results"][2]["status"], json!("skipped"));
        assert_eq!(
            js["graph"],
            json!([
                {"from": "Rock", "to": "Paper", "weight": 1},
                {"from": "Paper", "to": "Sc\"issors", "weight": 1}
            ])
        );
    }

    #[test]
    fn dot_graph() {
        let rv = rock_paper_scissors();
        let dot = condorcet_dot(&rv);
        assert!(dot.starts_with("digraph condorcet {\n"));
        assert!(dot.contains("  c0 [label=\"Rock\", penwidth=3];"));
        assert!(dot.contains("  c2 [label=\"Sc\\\"issors\"];"));
        assert!(dot.contains("  c0 -> c1 [label=\"1\", fontcolor=red];"));
        assert!(!dot.contains("c2 -> c0"));
    }

    #[test]
    fn report() {
        let rv = rock_paper_scissors();
        let report = text_report(&rv);
        assert!(report.ends_with("The winner, as determined by the Condorcet method, is : Rock"));
        assert!(report.contains("Ranking : Rock > Paper > Sc\"issors"));
    }
}
