use crate::core::models::bond::BondRecord;
use crate::core::models::dataset::ExperimentalDataset;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RdcTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: matched bond entry has fewer than 7 whitespace-delimited columns")]
    TruncatedLine { line: usize },
    #[error(
        "Line {line}: coupling column '{token}' disagrees with the matched value '{matched}'"
    )]
    InconsistentLine {
        line: usize,
        token: String,
        matched: String,
    },
}

/// Line grammar: `resid_i NAME3 atom_i resid_j NAME3 atom_j rdc`.
///
/// Separators are `\s*`, matching the historical format: columns may run
/// together, which is exactly why the whitespace-token view of a matched
/// line can disagree with the pattern captures and has to be reconciled.
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<resid_i>[0-9]+)\s*(?P<resname_i>[A-Z]{3})\s*(?P<name_i>[A-Z#]{1,4})\s*(?P<resid_j>[0-9]+)\s*(?P<resname_j>[A-Z]{3})\s*(?P<name_j>[A-Z#]{1,4})\s*(?P<rdc>-?(?:[0-9]+\.?[0-9]*|\.[0-9]+))",
        )
        .expect("RDC table line pattern is valid")
    })
}

/// Reads an experimental RDC table from a buffered reader.
///
/// Lines that do not match the column grammar are silently skipped; they are
/// treated as headers, comments, or blanks. This permissive policy is part of
/// the format contract, not an error path. On a matched line the coupling is
/// taken from the pattern capture and reconciled against the 7th whitespace
/// token: a missing token is a [`RdcTableError::TruncatedLine`], a token that
/// does not parse to the same value is a [`RdcTableError::InconsistentLine`].
///
/// # Errors
///
/// Returns an error on I/O failure or when a matched line fails the token
/// reconciliation described above. Any error aborts the whole read; a partial
/// dataset would break the positional correspondence between experimental and
/// predicted couplings.
pub fn read_from(reader: &mut impl BufRead) -> Result<ExperimentalDataset, RdcTableError> {
    let pattern = line_pattern();
    let mut dataset = ExperimentalDataset::new();

    for (line_index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_num = line_index + 1;

        let Some(captures) = pattern.captures(&line) else {
            continue;
        };

        let matched_rdc = &captures["rdc"];
        let Ok(coupling) = matched_rdc.parse::<f64>() else {
            // The capture class only admits decimal text; reaching this
            // branch would be a pattern bug, so treat it as inconsistency.
            return Err(RdcTableError::InconsistentLine {
                line: line_num,
                token: String::new(),
                matched: matched_rdc.to_string(),
            });
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 7 {
            return Err(RdcTableError::TruncatedLine { line: line_num });
        }
        match tokens[6].parse::<f64>() {
            Ok(token_value) if token_value == coupling => {}
            _ => {
                return Err(RdcTableError::InconsistentLine {
                    line: line_num,
                    token: tokens[6].to_string(),
                    matched: matched_rdc.to_string(),
                });
            }
        }

        // Digit-only captures can still overflow i32; such a line is not a
        // plausible residue id, so it falls under the skip policy.
        let (Ok(resid_i), Ok(resid_j)) = (
            captures["resid_i"].parse::<i32>(),
            captures["resid_j"].parse::<i32>(),
        ) else {
            continue;
        };

        dataset.push(
            BondRecord::new(
                resid_i,
                &captures["resname_i"],
                &captures["name_i"],
                resid_j,
                &captures["resname_j"],
                &captures["name_j"],
            ),
            coupling,
        );
    }

    Ok(dataset)
}

/// Reads an experimental RDC table from a file path.
pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ExperimentalDataset, RdcTableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_from(&mut reader)
}
