use crate::error::{CliError, Result};
use nalgebra::Point3;
use rdcfit::core::models::topology::{Topology, TopologyAtom};
use rdcfit::core::models::trajectory::Frame;
use rdcfit::engine::average::FrameSource;
use rdcfit::engine::error::EngineError;
use rdcfit::workflows::fit::{FitOutcome, Predicted};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::{Path, PathBuf};

fn parse_error(path: &Path, line: usize, message: &str) -> CliError {
    CliError::FileParsing {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    }
}

/// Loads the plain-text atom table: one `name resname resid` line per atom,
/// in trajectory atom order, with 1-based residue ids. Blank lines and `#`
/// comments are skipped.
pub fn load_atom_table(path: &Path) -> Result<Topology> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut atoms = Vec::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_num = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(parse_error(
                path,
                line_num,
                "expected 'name resname resid'",
            ));
        }
        let resid: usize = tokens[2]
            .parse()
            .map_err(|_| parse_error(path, line_num, "residue id must be an integer"))?;
        if resid < 1 {
            return Err(parse_error(path, line_num, "residue ids are 1-based"));
        }
        atoms.push(TopologyAtom::new(tokens[0], resid - 1, tokens[1]));
    }
    Ok(Topology::new(atoms))
}

/// A reopenable plain-text trajectory: per frame, an atom-count line
/// followed by that many `x y z` lines. Each `open` starts a fresh reader,
/// which is what lets the `full` output mode make its two passes.
pub struct TextFrameSource {
    path: PathBuf,
}

impl TextFrameSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

pub struct TextFrames {
    lines: Lines<BufReader<File>>,
    line_num: usize,
}

impl TextFrames {
    /// Next non-blank, non-comment line, or `None` at end of file.
    fn next_content_line(&mut self) -> Option<std::result::Result<String, EngineError>> {
        loop {
            match self.lines.next()? {
                Err(e) => return Some(Err(EngineError::FrameSource(e.to_string()))),
                Ok(line) => {
                    self.line_num += 1;
                    let trimmed = line.trim();
                    if !trimmed.is_empty() && !trimmed.starts_with('#') {
                        return Some(Ok(trimmed.to_string()));
                    }
                }
            }
        }
    }
}

impl Iterator for TextFrames {
    type Item = std::result::Result<Frame, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let count_line = match self.next_content_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let n_atoms: usize = match count_line.parse() {
            Ok(n) => n,
            Err(_) => {
                return Some(Err(EngineError::FrameSource(format!(
                    "line {}: expected an atom count, got '{}'",
                    self.line_num, count_line
                ))));
            }
        };

        let mut frame = Vec::with_capacity(n_atoms);
        for _ in 0..n_atoms {
            let Some(line_result) = self.next_content_line() else {
                return Some(Err(EngineError::FrameSource(
                    "unexpected end of file inside a frame".to_string(),
                )));
            };
            let line = match line_result {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let mut coords = [0.0f64; 3];
            let mut tokens = line.split_whitespace();
            for value in coords.iter_mut() {
                let Some(token) = tokens.next() else {
                    return Some(Err(EngineError::FrameSource(format!(
                        "line {}: expected 'x y z'",
                        self.line_num
                    ))));
                };
                match token.parse() {
                    Ok(parsed) => *value = parsed,
                    Err(_) => {
                        return Some(Err(EngineError::FrameSource(format!(
                            "line {}: '{}' is not a coordinate",
                            self.line_num, token
                        ))));
                    }
                }
            }
            frame.push(Point3::new(coords[0], coords[1], coords[2]));
        }
        Some(Ok(frame))
    }
}

impl FrameSource for TextFrameSource {
    type Iter = TextFrames;

    fn open(&self) -> std::result::Result<TextFrames, EngineError> {
        let file = File::open(&self.path).map_err(|e| {
            EngineError::FrameSource(format!("{}: {e}", self.path.display()))
        })?;
        Ok(TextFrames {
            lines: BufReader::new(file).lines(),
            line_num: 0,
        })
    }
}

/// Loads the whole trajectory into memory through the same frame reader.
pub fn load_frames(path: &Path) -> Result<Vec<Frame>> {
    let source = TextFrameSource::new(path.to_path_buf());
    let frames = source
        .open()?
        .collect::<std::result::Result<Vec<_>, EngineError>>()?;
    Ok(frames)
}

/// Writes the result pair as plain text: paired columns in average mode, the
/// experimental row followed by one prediction row per frame in full mode.
pub fn write_outcome(outcome: &FitOutcome, writer: &mut impl Write) -> std::io::Result<()> {
    match &outcome.predicted {
        Predicted::Average(predicted) => {
            writeln!(writer, "# experimental predicted")?;
            for (exp, pred) in outcome.experimental.iter().zip(predicted.iter()) {
                writeln!(writer, "{exp:.6} {pred:.6}")?;
            }
        }
        Predicted::Full(matrix) => {
            writeln!(writer, "# experimental")?;
            let experimental: Vec<String> = outcome
                .experimental
                .iter()
                .map(|value| format!("{value:.6}"))
                .collect();
            writeln!(writer, "{}", experimental.join(" "))?;
            writeln!(writer, "# predicted, one row per frame")?;
            for row in matrix.row_iter() {
                let values: Vec<String> =
                    row.iter().map(|value| format!("{value:.6}")).collect();
                writeln!(writer, "{}", values.join(" "))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use std::io::Write as _;

    #[test]
    fn atom_table_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# atom table").unwrap();
        writeln!(file, "N ALA 1").unwrap();
        writeln!(file, "H ALA 1").unwrap();
        writeln!(file, "CA ALA 1").unwrap();
        writeln!(file, "N GLY 2").unwrap();
        file.flush().unwrap();

        let topology = load_atom_table(file.path()).unwrap();
        assert_eq!(topology.len(), 4);
        assert_eq!(topology.select(0, "H"), vec![1]);
        assert_eq!(topology.select(1, "N"), vec![3]);
    }

    #[test]
    fn atom_table_rejects_zero_residue_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "N ALA 0").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            load_atom_table(file.path()),
            Err(CliError::FileParsing { line: 1, .. })
        ));
    }

    fn two_frame_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# two frames of two atoms").unwrap();
        writeln!(file, "2").unwrap();
        writeln!(file, "0.0 0.0 0.0").unwrap();
        writeln!(file, "1.0 0.0 0.0").unwrap();
        writeln!(file, "2").unwrap();
        writeln!(file, "0.0 0.0 0.0").unwrap();
        writeln!(file, "0.0 1.0 0.0").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn frame_reader_parses_all_frames() {
        let file = two_frame_file();
        let frames = load_frames(file.path()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(frames[1][1], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn frame_source_reopens_from_the_start() {
        let file = two_frame_file();
        let source = TextFrameSource::new(file.path().to_path_buf());

        let first_pass: Vec<_> = source.open().unwrap().collect();
        let second_pass: Vec<_> = source.open().unwrap().collect();
        assert_eq!(first_pass.len(), 2);
        assert_eq!(second_pass.len(), 2);
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3").unwrap();
        writeln!(file, "0.0 0.0 0.0").unwrap();
        file.flush().unwrap();
        assert!(load_frames(file.path()).is_err());
    }

    #[test]
    fn average_outcome_is_written_as_paired_columns() {
        let outcome = FitOutcome {
            experimental: DVector::from_vec(vec![1.0, -2.0]),
            predicted: Predicted::Average(DVector::from_vec(vec![0.5, -1.5])),
        };
        let mut buffer = Vec::new();
        write_outcome(&outcome, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("1.000000 0.500000"));
        assert!(text.contains("-2.000000 -1.500000"));
    }
}
