use crate::error::{Error, Result};
use crate::frequency::PopulationFrequencies;
use crate::Haplotype;
use csv;
use ndarray;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Dense haplotype by population frequency matrix
///
/// Rows follow the order in which haplotypes are first seen when the
/// populations are scanned in column order. Since `TOTAL` is the first
/// column this is the input order of the first sample carrying each
/// haplotype. Haplotypes absent from a population have frequency 0.
pub struct FrequencyTable {
    populations: Vec<String>,
    haplotypes: Vec<Haplotype>,
    rows: HashMap<Haplotype, usize>,
    data: ndarray::Array2<f64>,
    precision: usize,
}

impl FrequencyTable {
    pub fn new(frequencies: &[PopulationFrequencies]) -> Self {
        let populations: Vec<String> = frequencies.iter().map(|p| p.name().to_owned()).collect();

        let mut haplotypes = vec![];
        let mut rows = HashMap::new();
        for population in frequencies {
            for (haplotype, _) in population.iter() {
                rows.entry(haplotype.clone()).or_insert_with(|| {
                    haplotypes.push(haplotype.clone());
                    haplotypes.len() - 1
                });
            }
        }

        let mut data = ndarray::Array2::<f64>::zeros((haplotypes.len(), populations.len()));
        for (col, population) in frequencies.iter().enumerate() {
            for (haplotype, frequency) in population.iter() {
                data[[rows[haplotype], col]] = frequency.value();
            }
        }

        Self {
            populations,
            haplotypes,
            rows,
            data,
            precision: 4,
        }
    }

    /// Sets the number of decimal places written for each frequency
    pub fn precision(&mut self, precision: usize) -> &mut Self {
        self.precision = precision;
        self
    }

    /// Column labels, `TOTAL` first
    pub fn populations(&self) -> &[String] {
        &self.populations
    }

    /// Row labels
    pub fn haplotypes(&self) -> &[Haplotype] {
        &self.haplotypes
    }

    /// (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// The frequency of `haplotype` in `population`
    ///
    /// Returns `None` only if either label is unknown to the table.
    pub fn get(&self, haplotype: &str, population: &str) -> Option<f64> {
        let row = *self.rows.get(haplotype)?;
        let col = self.populations.iter().position(|p| p == population)?;
        Some(self.data[[row, col]])
    }

    pub fn row(&self, haplotype: &str) -> Option<ndarray::ArrayView1<'_, f64>> {
        self.rows.get(haplotype).map(|&row| self.data.row(row))
    }

    /// Writes the table as tab separated values.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        self.write_tsv(writer, "frequency table")
    }

    /// Writes the table to a new file at `path`.
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::create(path).map_err(|source| Error::Write {
            origin: origin.clone(),
            source,
        })?;
        self.write_tsv(file, &origin)
    }

    fn write_tsv<W: Write>(&self, writer: W, origin: &str) -> Result<()> {
        let write_error = |source: csv::Error| {
            let source = match source.into_kind() {
                csv::ErrorKind::Io(source) => source,
                kind => io::Error::new(io::ErrorKind::Other, format!("{:?}", kind)),
            };
            Error::Write {
                origin: origin.to_owned(),
                source,
            }
        };
        // sequences are not validated; quote any that contain a tab or newline
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        let mut header = Vec::with_capacity(self.populations.len() + 1);
        header.push("Haplotype");
        header.extend(self.populations.iter().map(String::as_str));
        wtr.write_record(&header).map_err(write_error)?;

        for (haplotype, row) in self.haplotypes.iter().zip(self.data.rows()) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(haplotype.to_string());
            record.extend(row.iter().map(|f| format!("{:.*}", self.precision, f)));
            wtr.write_record(&record).map_err(write_error)?;
        }
        wtr.flush().map_err(|source| Error::Write {
            origin: origin.to_owned(),
            source,
        })
    }
}
