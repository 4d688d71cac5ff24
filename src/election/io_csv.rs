// Primitives for reading CSV files.

use std::io::Read;

use crate::election::{io_common::make_default_id, *};

pub fn read_csv_ranking(path: &str, cfs: &FileSource) -> ElectionResult<Vec<ParsedBallot>> {
    info!("Attempting to read rank file {:?}", path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_csv_records(rdr, cfs, make_default_id(path))
}

pub fn read_csv_records<R: Read>(
    rdr: csv::Reader<R>,
    cfs: &FileSource,
    default_id: impl Fn(usize) -> String,
) -> ElectionResult<Vec<ParsedBallot>> {
    let id_idx_o = cfs.id_column_index_int()?;
    let count_idx_o = cfs.count_column_index_int()?;
    let choices_start_col = cfs.first_vote_column_index()?;
    let first_row = cfs.first_vote_row_index()?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate().skip(first_row) {
        // The line numbers start at 1 to respect most conventions in the spreadsheet world.
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_records: lineno: {:?} line: {:?}", lineno, line);

        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .to_string()
        } else {
            default_id(lineno)
        };

        let count: Option<u64> = if let Some(count_idx) = count_idx_o {
            let content = line
                .get(count_idx)
                .context(CsvLineTooShortSnafu { lineno })?;
            let count = content
                .trim()
                .parse::<u64>()
                .ok()
                .context(CsvCountSnafu { lineno, content })?;
            Some(count)
        } else {
            None
        };

        let choices: Vec<String> = line
            .iter()
            .skip(choices_start_col)
            .map(|s| s.trim().to_string())
            .collect();

        res.push(ParsedBallot {
            id: Some(id),
            count,
            choices,
        });
    }
    Ok(res)
}
