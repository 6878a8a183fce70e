#![crate_name = "hapfreq"]
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

pub mod prelude;

pub mod analysis;
pub mod diagnostics;
pub mod error;
pub mod fasta;
pub mod frequency;
pub mod popmap;
pub mod table;

use diagnostics::{Diagnostic, Reporter};
pub use error::{Error, Result};
use popmap::PopMap;

/// A distinct sequence string. Shared between `TOTAL` and the named
/// population a sample belongs to.
pub type Haplotype = Arc<str>;
pub type Groups = HashMap<String, usize>;

/// The population that holds every sample.
pub const TOTAL: &str = "TOTAL";

/// What to do when an identifier is seen more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one and a diagnostic is reported.
    Overwrite,
    /// Duplicates are a fatal error.
    Error,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Overwrite
    }
}

/// A named sequence read from a FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    name: String,
    sequence: Haplotype,
}

impl Sample {
    pub fn new(name: &str, sequence: &str) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn haplotype(&self) -> &Haplotype {
        &self.sequence
    }
}

/// All samples of a run, in input order.
#[derive(Debug, Default)]
pub struct Samples {
    samples: Vec<Sample>,
    index: HashMap<String, usize>,
    duplicates: DuplicatePolicy,
}

impl Samples {
    /// Constructs a new empty `Samples` that overwrites duplicates
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(duplicates: DuplicatePolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Adds a single `Sample`
    ///
    /// A sample whose name is already present replaces the earlier
    /// sequence but keeps the earlier position.
    pub fn insert(&mut self, sample: Sample, reporter: &mut dyn Reporter) -> Result<()> {
        match self.index.get(sample.name()) {
            Some(&idx) => match self.duplicates {
                DuplicatePolicy::Overwrite => {
                    reporter.report(Diagnostic::DuplicateSample {
                        sample: sample.name.clone(),
                    });
                    self.samples[idx] = sample;
                }
                DuplicatePolicy::Error => return Err(Error::DuplicateSample(sample.name)),
            },
            None => {
                self.index.insert(sample.name.clone(), self.samples.len());
                self.samples.push(sample);
            }
        }
        Ok(())
    }

    /// Observe all the samples in the argument.
    pub fn observe<I>(&mut self, records: I, reporter: &mut dyn Reporter) -> Result<()>
    where
        I: IntoIterator<Item = Result<Sample>>,
    {
        for record in records {
            self.insert(record?, reporter)?;
        }
        debug!("Read {} samples", self.samples.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.index.get(name).map(|&idx| &self.samples[idx])
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// The names of all samples, in input order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(Sample::name)
    }
}

/// A named group of sequences. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    name: String,
    haplotypes: Vec<Haplotype>,
}

impl Population {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            haplotypes: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn haplotypes(&self) -> &[Haplotype] {
        &self.haplotypes
    }

    pub fn push(&mut self, haplotype: Haplotype) {
        self.haplotypes.push(haplotype);
    }

    pub fn len(&self) -> usize {
        self.haplotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haplotypes.is_empty()
    }
}

/// Populations in discovery order. `TOTAL` always comes first.
#[derive(Debug, Clone)]
pub struct Populations {
    populations: Vec<Population>,
    groups: Groups,
}

impl Populations {
    /// Groups the samples by their assigned population.
    ///
    /// Every sample goes into `TOTAL`. With a population map, samples
    /// also go into the population they are assigned to; unassigned
    /// samples are reported and stay in `TOTAL` only.
    pub fn group(
        samples: &Samples,
        assignments: Option<&PopMap>,
        reporter: &mut dyn Reporter,
    ) -> Self {
        let mut populations = Self {
            populations: vec![],
            groups: Groups::new(),
        };
        populations.population(TOTAL);

        for sample in samples.iter() {
            populations.populations[0].push(sample.haplotype().clone());

            let assignments = match assignments {
                Some(assignments) => assignments,
                None => continue,
            };
            match assignments.get(sample.name()) {
                Some(TOTAL) => reporter.report(Diagnostic::ReservedPopulation {
                    sample: sample.name().to_owned(),
                }),
                Some(label) => populations.population(label).push(sample.haplotype().clone()),
                None => reporter.report(Diagnostic::MissingAssignment {
                    sample: sample.name().to_owned(),
                }),
            }
        }
        debug!(
            "Grouped {} samples into {} populations",
            samples.len(),
            populations.len()
        );
        populations
    }

    /// Returns the population called `name`
    ///
    /// This will create the population if needed.
    fn population(&mut self, name: &str) -> &mut Population {
        let populations = &mut self.populations;
        let idx = *self.groups.entry(name.into()).or_insert_with(|| {
            populations.push(Population::new(name));
            populations.len() - 1
        });
        &mut self.populations[idx]
    }

    pub fn total(&self) -> &Population {
        &self.populations[0]
    }

    pub fn get(&self, name: &str) -> Option<&Population> {
        self.groups.get(name).map(|&idx| &self.populations[idx])
    }

    /// Population names in discovery order
    pub fn names(&self) -> Vec<&str> {
        self.populations.iter().map(Population::name).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Population> {
        self.populations.iter()
    }

    pub fn len(&self) -> usize {
        self.populations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::error::Error;

    fn samples(records: &[(&str, &str)]) -> Samples {
        let mut samples = Samples::new();
        for (name, sequence) in records {
            samples
                .insert(Sample::new(name, sequence), &mut Vec::<Diagnostic>::new())
                .unwrap();
        }
        samples
    }

    fn popmap(records: &[(&str, &str)]) -> PopMap {
        let mut popmap = PopMap::new();
        for (sample, population) in records {
            popmap.assign(sample, population);
        }
        popmap
    }

    fn sequences(population: &Population) -> Vec<&str> {
        population.haplotypes().iter().map(|h| &**h).collect()
    }

    #[test]
    fn test_total_only_without_popmap() {
        let samples = samples(&[("A", "AC"), ("B", "AC"), ("C", "GT")]);
        let mut reports: Vec<Diagnostic> = vec![];
        let populations = Populations::group(&samples, None, &mut reports);
        assert_eq!(populations.names(), vec![TOTAL]);
        assert_eq!(sequences(populations.total()), vec!["AC", "AC", "GT"]);
        assert!(reports.is_empty());
    }

    #[test]
    fn test_groups_in_discovery_order() {
        let samples = samples(&[("A", "AC"), ("B", "AC"), ("C", "GT"), ("D", "GT")]);
        let assignments = popmap(&[("D", "pop2"), ("C", "pop2"), ("A", "pop1"), ("B", "pop1")]);
        let populations = Populations::group(&samples, Some(&assignments), &mut Vec::<Diagnostic>::new());
        assert_eq!(populations.names(), vec![TOTAL, "pop1", "pop2"]);
        assert_eq!(sequences(populations.get("pop1").unwrap()), vec!["AC", "AC"]);
        assert_eq!(sequences(populations.get("pop2").unwrap()), vec!["GT", "GT"]);
        assert_eq!(populations.total().len(), 4);
    }

    #[test]
    fn test_unassigned_sample_stays_in_total() {
        let samples = samples(&[("A", "AC"), ("B", "GT")]);
        let assignments = popmap(&[("A", "pop1")]);
        let mut reports: Vec<Diagnostic> = vec![];
        let populations = Populations::group(&samples, Some(&assignments), &mut reports);
        assert_eq!(sequences(populations.total()), vec!["AC", "GT"]);
        assert_eq!(sequences(populations.get("pop1").unwrap()), vec!["AC"]);
        assert_eq!(
            reports,
            vec![Diagnostic::MissingAssignment { sample: "B".into() }]
        );
    }

    #[test]
    fn test_reserved_label_is_not_counted_twice() {
        let samples = samples(&[("A", "AC"), ("B", "GT")]);
        let assignments = popmap(&[("A", TOTAL), ("B", "pop1")]);
        let mut reports: Vec<Diagnostic> = vec![];
        let populations = Populations::group(&samples, Some(&assignments), &mut reports);
        assert_eq!(populations.total().len(), 2);
        assert_eq!(populations.names(), vec![TOTAL, "pop1"]);
        assert_eq!(
            reports,
            vec![Diagnostic::ReservedPopulation { sample: "A".into() }]
        );
    }

    #[test]
    fn test_total_is_superset_of_every_population() {
        let samples = samples(&[("A", "AC"), ("B", "TT"), ("C", "GT"), ("D", "GG")]);
        let assignments = popmap(&[("A", "x"), ("B", "y"), ("C", "x"), ("D", "z")]);
        let populations = Populations::group(&samples, Some(&assignments), &mut Vec::<Diagnostic>::new());
        let total: HashSet<&str> = sequences(populations.total()).into_iter().collect();
        for population in populations.iter() {
            assert!(sequences(population).iter().all(|s| total.contains(s)));
        }
        let named: usize = populations.iter().skip(1).map(Population::len).sum();
        assert_eq!(named, populations.total().len());
    }

    #[test]
    fn test_duplicate_sample_overwrites_in_place() -> std::result::Result<(), Box<dyn Error>> {
        let mut samples = Samples::new();
        let mut reports: Vec<Diagnostic> = vec![];
        samples.observe(
            vec![
                Ok(Sample::new("A", "AC")),
                Ok(Sample::new("B", "GT")),
                Ok(Sample::new("A", "TT")),
            ],
            &mut reports,
        )?;
        assert_eq!(samples.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(samples.get("A").map(Sample::sequence), Some("TT"));
        assert_eq!(
            reports,
            vec![Diagnostic::DuplicateSample { sample: "A".into() }]
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_sample_is_an_error_when_strict() {
        let mut samples = Samples::with_policy(DuplicatePolicy::Error);
        let result = samples.observe(
            vec![Ok(Sample::new("A", "AC")), Ok(Sample::new("A", "TT"))],
            &mut Vec::<Diagnostic>::new(),
        );
        assert!(matches!(result, Err(crate::Error::DuplicateSample(name)) if name == "A"));
    }
}
