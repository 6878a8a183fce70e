pub use crate::diagnostics::{Diagnostic, LogReporter, Reporter};
pub use crate::error::{Error, Result};
pub use crate::fasta::FastaReader;
pub use crate::frequency::{Frequency, HaplotypeCounts, HaplotypeFrequency, PopulationFrequencies};
pub use crate::popmap::{PopMap, PopMapBuilder};
pub use crate::table::FrequencyTable;
pub use crate::{DuplicatePolicy, Haplotype, Population, Populations, Sample, Samples, TOTAL};
