use crate::election::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_juridiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub count_column_index: Option<JSValue>,
}

impl FileSource {
    /// A source that only holds choices, starting from the first column.
    pub fn new(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            _first_vote_column_index: None,
            _first_vote_row_index: None,
            id_column_index: None,
            count_column_index: None,
        }
    }

    /// Zero-based index of the column of the first choice.
    pub fn first_vote_column_index(&self) -> ElectionResult<usize> {
        Ok(read_js_index(&self._first_vote_column_index)?.unwrap_or(0))
    }

    /// Zero-based index of the first row containing a ballot.
    pub fn first_vote_row_index(&self) -> ElectionResult<usize> {
        Ok(read_js_index(&self._first_vote_row_index)?.unwrap_or(0))
    }

    pub fn id_column_index_int(&self) -> ElectionResult<Option<usize>> {
        read_js_index(&self.id_column_index)
    }

    pub fn count_column_index_int(&self) -> ElectionResult<Option<usize>> {
        read_js_index(&self.count_column_index)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionRules {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
    #[serde(rename = "rulesDescription")]
    pub rules_description: Option<String>,
}

impl ElectionRules {
    pub fn tiebreak_mode(&self) -> ElectionResult<TieBreakMode> {
        match self.tiebreak_mode.as_deref().unwrap_or("useCandidateOrder") {
            "useCandidateOrder" => Ok(TieBreakMode::UseCandidateOrder),
            "random" => match self.random_seed.as_deref().map(|s| s.parse::<u32>()) {
                Some(Ok(seed)) => Ok(TieBreakMode::Random(seed)),
                x => whatever!("Cannot use tiebreak mode random with seed {:?}", x),
            },
            x => whatever!("Cannot use tiebreak mode {:?}: currently not implemented", x),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "cvrFileSources", default)]
    pub cvr_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub candidates: Vec<ElectionCandidate>,
    #[serde(default)]
    pub rules: ElectionRules,
}

pub fn read_config(path: &str) -> ElectionResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> ElectionResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

// Indexes are 1-based in the configuration, either as numbers or as
// spreadsheet column letters (A, B, ..., AA, ...).
fn read_js_index(x: &Option<JSValue>) -> ElectionResult<Option<usize>> {
    let one_based: usize = match x {
        None | Some(JSValue::Null) => return Ok(None),
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {})?,
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_uppercase()
                .chars()
                .try_fold(0usize, |acc, c| {
                    acc.checked_mul(26)?
                        .checked_add(c as usize - 'A' as usize + 1)
                })
                .context(ParsingJsonNumberSnafu {})?
        }
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {})?,
        _ => return None.context(ParsingJsonNumberSnafu {}),
    };
    one_based
        .checked_sub(1)
        .map(Some)
        .context(ParsingJsonNumberSnafu {})
}
