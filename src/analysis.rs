use crate::prelude::*;
use log::{debug, info};
use std::path::Path;

/// Configures and runs a complete haplotype frequency analysis
///
/// ```no_run
/// use hapfreq::analysis::AnalysisBuilder;
/// use hapfreq::diagnostics::LogReporter;
///
/// let analysis = AnalysisBuilder::new()
///     .precision(4)
///     .run("alignment.fasta", Some("popmap.txt"), &mut LogReporter)?;
/// analysis.write("out_freq.tsv")?;
/// # Ok::<(), hapfreq::Error>(())
/// ```
pub struct AnalysisBuilder {
    duplicates: DuplicatePolicy,
    precision: usize,
    validate: bool,
}

impl AnalysisBuilder {
    /// Construct a new analysis builder
    pub fn new() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            precision: 4,
            validate: false,
        }
    }

    /// How duplicate FASTA identifiers and population map entries are handled
    pub fn duplicates(&mut self, duplicates: DuplicatePolicy) -> &mut Self {
        self.duplicates = duplicates;
        self
    }

    /// Decimal places of the written table
    pub fn precision(&mut self, precision: usize) -> &mut Self {
        self.precision = precision;
        self
    }

    /// Also report population map entries that have no sequence data
    pub fn validate(&mut self, validate: bool) -> &mut Self {
        self.validate = validate;
        self
    }

    pub fn run<F, P>(&self, fasta: F, popmap: Option<P>, reporter: &mut dyn Reporter) -> Result<Analysis>
    where
        F: AsRef<Path>,
        P: AsRef<Path>,
    {
        let mut samples = Samples::with_policy(self.duplicates);
        samples.observe(FastaReader::from_path(fasta.as_ref())?, reporter)?;
        info!("Read {} sequences from {}", samples.len(), fasta.as_ref().display());

        let assignments = match popmap {
            Some(path) => {
                let popmap = PopMapBuilder::new()
                    .duplicates(self.duplicates)
                    .from_path(path.as_ref(), reporter)?;
                info!(
                    "Read {} assignments to {} populations from {}",
                    popmap.len(),
                    popmap.populations().len(),
                    path.as_ref().display()
                );
                Some(popmap)
            }
            None => None,
        };

        if self.validate {
            if let Some(popmap) = &assignments {
                // samples without an assignment are reported while grouping
                let mut found: Vec<Diagnostic> = vec![];
                popmap.validate(samples.names(), &mut found);
                found
                    .into_iter()
                    .filter(|d| matches!(d, Diagnostic::UnusedAssignment { .. }))
                    .for_each(|d| reporter.report(d));
            }
        }

        let populations = Populations::group(&samples, assignments.as_ref(), reporter);
        let frequencies = populations.haplotype_frequencies();
        let mut table = FrequencyTable::new(&frequencies);
        table.precision(self.precision);
        debug!("Frequency table has {:?} (haplotypes, populations)", table.dim());

        Ok(Analysis {
            samples,
            populations,
            frequencies,
            table,
        })
    }
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of an analysis, ready to be written
pub struct Analysis {
    samples: Samples,
    populations: Populations,
    frequencies: Vec<PopulationFrequencies>,
    table: FrequencyTable,
}

impl Analysis {
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn populations(&self) -> &Populations {
        &self.populations
    }

    /// Per population frequencies, `TOTAL` first
    pub fn frequencies(&self) -> &[PopulationFrequencies] {
        &self.frequencies
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Writes the frequency table to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.table.to_path(path.as_ref())?;
        info!("Wrote haplotype frequencies to {}", path.as_ref().display());
        Ok(())
    }
}
