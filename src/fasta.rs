use crate::error::{Error, Result};
use crate::Sample;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::mem;
use std::path::Path;

/// Produces `Sample`s from FASTA text
///
/// Single-line and interleaved records are both accepted. A record is
/// only produced once it has a name and at least one sequence line, so a
/// trailing header without sequence is dropped.
///
/// `FastaReader` implements Iterator so it can be passed
/// directly to `Samples::observe()`
pub struct FastaReader<R: BufRead> {
    lines: Lines<R>,
    origin: String,
    name: Option<String>,
    sequence: String,
    finished: bool,
}

impl FastaReader<BufReader<File>> {
    /// Opens a FASTA file for reading.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| Error::Read {
            origin: path.display().to_string(),
            source,
        })?;
        Ok(Self::with_origin(
            BufReader::new(file),
            &path.display().to_string(),
        ))
    }
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_origin(reader, "FASTA input")
    }

    fn with_origin(reader: R, origin: &str) -> Self {
        Self {
            lines: reader.lines(),
            origin: origin.to_owned(),
            name: None,
            sequence: String::new(),
            finished: false,
        }
    }

    /// Takes the pending record, if it is complete.
    fn pending(&mut self) -> Option<Sample> {
        let name = self.name.take();
        let sequence = mem::take(&mut self.sequence);
        match name {
            Some(name) if !name.is_empty() && !sequence.is_empty() => {
                Some(Sample::new(&name, &sequence))
            }
            Some(name) => {
                debug!("Dropping FASTA record {:?} without sequence", name);
                None
            }
            None => None,
        }
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Result<Sample>> {
        if self.finished {
            return None;
        }
        loop {
            match self.lines.next() {
                None => {
                    self.finished = true;
                    return self.pending().map(Ok);
                }
                Some(Err(source)) => {
                    self.finished = true;
                    return Some(Err(Error::Read {
                        origin: self.origin.clone(),
                        source,
                    }));
                }
                Some(Ok(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('>') {
                        let complete = self.pending();
                        let token = line.split_whitespace().next().unwrap_or("");
                        self.name = Some(token.strip_prefix('>').unwrap_or(token).to_owned());
                        if let Some(sample) = complete {
                            return Some(Ok(sample));
                        }
                    } else if self.name.is_some() {
                        self.sequence.push_str(line);
                    }
                }
            }
        }
    }
}
