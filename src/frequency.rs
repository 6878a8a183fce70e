use crate::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Occurrence counts of each distinct haplotype in one population,
/// in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct HaplotypeCounts {
    size: usize,
    counts: Vec<(Haplotype, usize)>,
    index: HashMap<Haplotype, usize>,
}

impl HaplotypeCounts {
    /// Counts haplotypes by exact string equality.
    pub fn tally<'a, I>(haplotypes: I) -> Self
    where
        I: IntoIterator<Item = &'a Haplotype>,
    {
        let mut tally = Self::default();
        for haplotype in haplotypes {
            tally.size += 1;
            match tally.index.get(haplotype) {
                Some(&idx) => tally.counts[idx].1 += 1,
                None => {
                    tally.index.insert(haplotype.clone(), tally.counts.len());
                    tally.counts.push((haplotype.clone(), 1));
                }
            }
        }
        tally
    }

    /// The number of haplotypes tallied, duplicates included
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn count(&self, haplotype: &str) -> usize {
        self.index
            .get(haplotype)
            .map_or(0, |&idx| self.counts[idx].1)
    }

    /// The number of distinct haplotypes
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Haplotype, usize)> {
        self.counts.iter().map(|(haplotype, count)| (haplotype, *count))
    }

    /// Relative frequency of every haplotype. Empty when nothing was tallied.
    pub fn frequencies(&self) -> Vec<(Haplotype, Frequency)> {
        self.counts
            .iter()
            .map(|(haplotype, count)| {
                (
                    haplotype.clone(),
                    Frequency {
                        count: *count,
                        size: self.size,
                    },
                )
            })
            .collect()
    }
}

/// The exact ratio `count / size`.
///
/// Formatting uses the formatter's precision, or four decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency {
    count: usize,
    size: usize,
}

impl Frequency {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn value(&self) -> f64 {
        self.count as f64 / self.size as f64
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(f, "{:.*}", precision, self.value())
    }
}

/// Haplotype frequencies of a single population
#[derive(Debug, Clone)]
pub struct PopulationFrequencies {
    name: String,
    size: usize,
    frequencies: Vec<(Haplotype, Frequency)>,
}

impl PopulationFrequencies {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of samples in the population
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, haplotype: &str) -> Option<Frequency> {
        self.frequencies
            .iter()
            .find(|(h, _)| &**h == haplotype)
            .map(|(_, frequency)| *frequency)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Haplotype, Frequency)> {
        self.frequencies.iter()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl fmt::Display for PopulationFrequencies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Haplotype frequencies for pop {}:", self.name)?;
        for (haplotype, frequency) in &self.frequencies {
            writeln!(f, "{}:{}", haplotype, frequency)?;
        }
        Ok(())
    }
}

impl Population {
    pub fn frequencies(&self) -> PopulationFrequencies {
        let tally = HaplotypeCounts::tally(self.haplotypes());
        PopulationFrequencies {
            name: self.name().to_owned(),
            size: tally.size(),
            frequencies: tally.frequencies(),
        }
    }
}

pub trait HaplotypeFrequency {
    fn haplotype_frequencies(&self) -> Vec<PopulationFrequencies>;
}

impl HaplotypeFrequency for Populations {
    /// Computes the frequencies of every population, `TOTAL` first.
    fn haplotype_frequencies(&self) -> Vec<PopulationFrequencies> {
        self.iter().map(Population::frequencies).collect()
    }
}
