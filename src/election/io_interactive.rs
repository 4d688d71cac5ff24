// Collects the candidates and the votes in a terminal session.

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use crate::election::*;

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> ElectionResult<String> {
    write!(output, "{}", prompt).context(TerminalIoSnafu {})?;
    output.flush().context(TerminalIoSnafu {})?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context(TerminalIoSnafu {})?;
    if read == 0 {
        return TerminalClosedSnafu {}.fail();
    }
    Ok(line.trim().to_string())
}

// Asks again until the answer is a number within the bounds.
fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    bounds: RangeInclusive<usize>,
) -> ElectionResult<usize> {
    loop {
        let answer = ask(input, output, prompt)?;
        match answer.parse::<usize>() {
            Ok(x) if bounds.contains(&x) => return Ok(x),
            _ => {
                debug!("ask_number: rejected answer {:?}", answer);
                let hint = if *bounds.end() == usize::MAX {
                    format!("Please enter a number of at least {}", bounds.start())
                } else {
                    format!(
                        "Please enter a number between {} and {}",
                        bounds.start(),
                        bounds.end()
                    )
                };
                writeln!(output, "{}", hint).context(TerminalIoSnafu {})?;
            }
        }
    }
}

fn read_candidates<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> ElectionResult<Vec<String>> {
    let num_candidates = ask_number(
        input,
        output,
        "\n\nHow many candidates are there : ",
        1..=usize::MAX,
    )?;
    writeln!(
        output,
        "Please enter the candidate names (press enter after each name)\n"
    )
    .context(TerminalIoSnafu {})?;
    let mut names: Vec<String> = Vec::new();
    while names.len() < num_candidates {
        let prompt = format!("\nCandidate n°{} : ", names.len() + 1);
        let name = ask(input, output, prompt.as_str())?;
        if name.is_empty() || names.contains(&name) {
            writeln!(output, "This name is empty or already used. Please choose another")
                .context(TerminalIoSnafu {})?;
        } else {
            names.push(name);
        }
    }
    writeln!(output, "\n\nYou will refer to the candidates by their numbers")
        .context(TerminalIoSnafu {})?;
    for (idx, name) in names.iter().enumerate() {
        writeln!(output, "  {} : {}", idx + 1, name).context(TerminalIoSnafu {})?;
    }
    Ok(names)
}

/// Runs the whole session: the candidates first, then one complete ranking per
/// voter.
///
/// A candidate that was already selected by the same voter is refused and asked
/// again, so that every vote is a complete ranking.
pub fn read_election<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> ElectionResult<(Vec<String>, Vec<Vote>)> {
    let names = read_candidates(input, output)?;
    let num_candidates = names.len();

    let num_voters = ask_number(
        input,
        output,
        "\nHow many voters are there : ",
        0..=usize::MAX,
    )?;
    writeln!(
        output,
        "For each voter, you will give their vote by order according to the candidate number"
    )
    .context(TerminalIoSnafu {})?;

    let mut votes: Vec<Vote> = Vec::new();
    for voter in 0..num_voters {
        writeln!(output, "\n\nVoter n°{} choice : ", voter + 1).context(TerminalIoSnafu {})?;
        let mut ranking: Vec<usize> = Vec::with_capacity(num_candidates);
        while ranking.len() < num_candidates {
            let prompt = format!("\nChoice n°{} : ", ranking.len() + 1);
            let choice = ask_number(input, output, prompt.as_str(), 1..=num_candidates)? - 1;
            if ranking.contains(&choice) {
                writeln!(
                    output,
                    "You have already selected this candidate. Please choose another"
                )
                .context(TerminalIoSnafu {})?;
            } else {
                ranking.push(choice);
            }
        }
        debug!("read_election: voter {}: {:?}", voter + 1, ranking);
        votes.push(Vote {
            candidates: ranking.iter().map(|&cid| names[cid].clone()).collect(),
            count: 1,
        });
    }
    info!(
        "read_election: {} candidates, {} votes",
        num_candidates,
        votes.len()
    );
    Ok((names, votes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(typed: &str) -> (ElectionResult<(Vec<String>, Vec<Vote>)>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let res = read_election(&mut input, &mut output);
        (res, String::from_utf8_lossy(&output).to_string())
    }

    #[test]
    fn complete_session() {
        let (res, _) = session("2\nAnna\nBob\n2\n2\n1\n1\n2\n");
        let (names, votes) = res.unwrap();
        assert_eq!(names, vec!["Anna".to_string(), "Bob".to_string()]);
        assert_eq!(
            votes,
            vec![
                Vote {
                    candidates: vec!["Bob".to_string(), "Anna".to_string()],
                    count: 1
                },
                Vote {
                    candidates: vec!["Anna".to_string(), "Bob".to_string()],
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn repeated_choice_is_asked_again() {
        let (res, output) = session("3\nA\nB\nC\n1\n2\n2\n9\nx\n3\n1\n");
        let (_, votes) = res.unwrap();
        assert_eq!(
            votes[0].candidates,
            vec!["B".to_string(), "C".to_string(), "A".to_string()]
        );
        assert!(output.contains("You have already selected this candidate. Please choose another"));
        assert!(output.contains("Please enter a number between 1 and 3"));
    }

    #[test]
    fn duplicate_name_is_asked_again() {
        let (res, output) = session("2\nA\nA\nB\n0\n");
        let (names, votes) = res.unwrap();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
        assert!(votes.is_empty());
        assert!(output.contains("already used"));
    }

    #[test]
    fn huge_number_of_voters() {
        let (res, output) = session("1\nA\n99999999999999999\n1\n1\n");
        assert!(matches!(res, Err(ElectionError::TerminalClosed {})));
        assert!(output.contains("Voter n°2 choice"));
    }

    #[test]
    fn huge_number_of_candidates() {
        let (res, _) = session("99999999999999999\nA\nB\n");
        assert!(matches!(res, Err(ElectionError::TerminalClosed {})));
    }

    #[test]
    fn closed_input() {
        let (res, _) = session("2\nA\n");
        assert!(matches!(res, Err(ElectionError::TerminalClosed {})));
    }
}
