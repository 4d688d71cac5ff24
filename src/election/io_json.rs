use serde::Deserialize;

use crate::election::{io_common::make_default_id, *};

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct JsonBallot {
    id: Option<String>,
    count: Option<u64>,
    ranking: Vec<String>,
}

pub fn read_json_ranking(path: &str) -> ElectionResult<Vec<ParsedBallot>> {
    info!("Attempting to read rank file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_json_ranking(contents.as_str(), make_default_id(path))
}

pub fn parse_json_ranking(
    contents: &str,
    default_id: impl Fn(usize) -> String,
) -> ElectionResult<Vec<ParsedBallot>> {
    let ballots: Vec<JsonBallot> = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(ballots
        .into_iter()
        .enumerate()
        .map(|(idx, jb)| ParsedBallot {
            id: Some(jb.id.unwrap_or_else(|| default_id(idx + 1))),
            count: jb.count,
            choices: jb.ranking,
        })
        .collect())
}
