use crate::diagnostics::{Diagnostic, Reporter};
use crate::error::{Error, Result};
use crate::DuplicatePolicy;
use csv;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Sample name to population label assignments.
///
/// Entries keep the order in which they were first seen in the
/// population map file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PopMap {
    assignments: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PopMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `sample` to `population`.
    ///
    /// Returns the previous label if the sample was already assigned.
    pub fn assign(&mut self, sample: &str, population: &str) -> Option<String> {
        match self.index.get(sample) {
            Some(&idx) => Some(std::mem::replace(
                &mut self.assignments[idx].1,
                population.to_owned(),
            )),
            None => {
                self.index.insert(sample.to_owned(), self.assignments.len());
                self.assignments
                    .push((sample.to_owned(), population.to_owned()));
                None
            }
        }
    }

    /// The population label assigned to `sample`
    pub fn get(&self, sample: &str) -> Option<&str> {
        self.index
            .get(sample)
            .map(|&idx| self.assignments[idx].1.as_str())
    }

    pub fn contains(&self, sample: &str) -> bool {
        self.index.contains_key(sample)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(sample, population)| (sample.as_str(), population.as_str()))
    }

    /// Distinct population labels in the order they first appear
    pub fn populations(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.assignments
            .iter()
            .map(|(_, population)| population.as_str())
            .filter(|population| seen.insert(*population))
            .collect()
    }

    /// Compares the assignments against the names of the samples with data.
    ///
    /// Every sample without an assignment is reported as
    /// `MissingAssignment`, every assignment without data as
    /// `UnusedAssignment`. Returns the number of problems found.
    pub fn validate<'a, I>(&self, samples: I, reporter: &mut dyn Reporter) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut problems = 0;
        let mut seen = HashSet::new();
        for sample in samples {
            seen.insert(sample);
            if !self.contains(sample) {
                reporter.report(Diagnostic::MissingAssignment {
                    sample: sample.to_owned(),
                });
                problems += 1;
            }
        }
        for (sample, population) in self.iter() {
            if !seen.contains(sample) {
                reporter.report(Diagnostic::UnusedAssignment {
                    sample: sample.to_owned(),
                    population: population.to_owned(),
                });
                problems += 1;
            }
        }
        problems
    }
}

/// Reads a `PopMap` from whitespace delimited two column data
///
/// Only the first two tokens of each line are used; blank lines are
/// skipped.
pub struct PopMapBuilder {
    delimiter: u8,
    duplicates: DuplicatePolicy,
}

impl PopMapBuilder {
    /// Construct a new PopMap builder
    pub fn new() -> Self {
        Self {
            delimiter: b'\t',
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn duplicates(&mut self, duplicates: DuplicatePolicy) -> &mut Self {
        self.duplicates = duplicates;
        self
    }

    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
        reporter: &mut dyn Reporter,
    ) -> Result<PopMap> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| Error::Read {
            origin: origin.clone(),
            source,
        })?;
        self.read(Box::new(file), &origin, reporter)
    }

    pub fn from_reader(&self, reader: Box<dyn Read>, reporter: &mut dyn Reporter) -> Result<PopMap> {
        self.read(reader, "population map", reporter)
    }

    fn read(
        &self,
        reader: Box<dyn Read>,
        origin: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<PopMap> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut popmap = PopMap::new();
        for record in rdr.records() {
            let record = record.map_err(|source| Error::Csv {
                origin: origin.to_owned(),
                source,
            })?;
            let mut tokens = record.iter().flat_map(str::split_whitespace);
            let sample = match tokens.next() {
                Some(sample) => sample,
                None => continue,
            };
            let population = tokens.next().ok_or_else(|| Error::MalformedAssignment {
                origin: origin.to_owned(),
                line: record.position().map_or(0, |pos| pos.line()),
            })?;

            if popmap.assign(sample, population).is_some() {
                match self.duplicates {
                    DuplicatePolicy::Overwrite => reporter.report(Diagnostic::DuplicateAssignment {
                        sample: sample.to_owned(),
                        population: population.to_owned(),
                    }),
                    DuplicatePolicy::Error => {
                        return Err(Error::DuplicateAssignment(sample.to_owned()))
                    }
                }
            }
        }
        Ok(popmap)
    }
}

impl Default for PopMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
