//! Canonical human chromosomes and their RefSeq accessions.

use std::str::FromStr;

use crate::Assembly;

/// The number of canonical human chromosomes (1-22, X, and Y).
pub const NUM_CHROMOSOMES: usize = 24;

/// The canonical chromosome labels, in karyotypic order.
const LABELS: [&str; NUM_CHROMOSOMES] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y",
];

/// RefSeq chromosome accessions for GRCh37.
const GRCH37: [&str; NUM_CHROMOSOMES] = [
    "NC_000001.10",
    "NC_000002.11",
    "NC_000003.11",
    "NC_000004.11",
    "NC_000005.9",
    "NC_000006.11",
    "NC_000007.13",
    "NC_000008.10",
    "NC_000009.11",
    "NC_000010.10",
    "NC_000011.9",
    "NC_000012.11",
    "NC_000013.10",
    "NC_000014.8",
    "NC_000015.9",
    "NC_000016.9",
    "NC_000017.10",
    "NC_000018.9",
    "NC_000019.9",
    "NC_000020.10",
    "NC_000021.8",
    "NC_000022.10",
    "NC_000023.10",
    "NC_000024.9",
];

/// RefSeq chromosome accessions for GRCh38.
const GRCH38: [&str; NUM_CHROMOSOMES] = [
    "NC_000001.11",
    "NC_000002.12",
    "NC_000003.12",
    "NC_000004.12",
    "NC_000005.10",
    "NC_000006.12",
    "NC_000007.14",
    "NC_000008.11",
    "NC_000009.12",
    "NC_000010.11",
    "NC_000011.10",
    "NC_000012.12",
    "NC_000013.11",
    "NC_000014.9",
    "NC_000015.10",
    "NC_000016.10",
    "NC_000017.11",
    "NC_000018.10",
    "NC_000019.10",
    "NC_000020.11",
    "NC_000021.9",
    "NC_000022.11",
    "NC_000023.11",
    "NC_000024.10",
];

/// An error related to the parsing of a [`Chromosome`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// The label is not one of the canonical chromosome labels.
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown(label) => write!(f, "unknown chromosome: `{label}`"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One of the 24 canonical human chromosomes.
///
/// Only the bare labels are accepted: `chr`-prefixed names and numeric
/// aliases for the sex chromosomes are rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Chromosome(usize);

impl Chromosome {
    /// Gets the label of the chromosome.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Chromosome;
    ///
    /// let chromosome = "X".parse::<Chromosome>()?;
    /// assert_eq!(chromosome.label(), "X");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn label(&self) -> &'static str {
        LABELS[self.0]
    }

    /// Returns an iterator over all canonical chromosomes.
    pub fn all() -> impl Iterator<Item = Chromosome> {
        (0..NUM_CHROMOSOMES).map(Chromosome)
    }
}

impl FromStr for Chromosome {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LABELS
            .iter()
            .position(|label| *label == s)
            .map(Chromosome)
            .ok_or_else(|| ParseError::Unknown(s.to_string()))
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The chromosome to accession map for a single assembly.
///
/// The tables are static; an [`Accessions`] is only a view onto one of them
/// and can be freely copied into every parser that needs one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Accessions {
    /// The assembly the accessions belong to.
    assembly: Assembly,

    /// The accession table.
    table: &'static [&'static str; NUM_CHROMOSOMES],
}

impl Accessions {
    /// Gets the accession map for an assembly.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::Chromosome;
    /// use hgvsg::chromosome::Accessions;
    ///
    /// let accessions = Accessions::for_assembly(Assembly::GRCh37);
    /// assert_eq!(accessions.get(&"5".parse::<Chromosome>()?), "NC_000005.9");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn for_assembly(assembly: Assembly) -> Self {
        let table = match assembly {
            Assembly::GRCh37 => &GRCH37,
            Assembly::GRCh38 => &GRCH38,
        };

        Self { assembly, table }
    }

    /// Gets the assembly of the accession map.
    pub fn assembly(&self) -> Assembly {
        self.assembly
    }

    /// Gets the RefSeq accession for a chromosome.
    pub fn get(&self, chromosome: &Chromosome) -> &'static str {
        self.table[chromosome.0]
    }

    /// Finds the chromosome for a RefSeq accession.
    pub fn chromosome(&self, accession: &str) -> Option<Chromosome> {
        self.table
            .iter()
            .position(|candidate| *candidate == accession)
            .map(Chromosome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_canonical_labels_parse() -> Result<(), Box<dyn std::error::Error>> {
        for label in LABELS {
            let chromosome = label.parse::<Chromosome>()?;
            assert_eq!(chromosome.to_string(), label);
        }

        assert_eq!(Chromosome::all().count(), NUM_CHROMOSOMES);
        Ok(())
    }

    #[test]
    fn test_non_canonical_labels_are_rejected() {
        for label in ["chr1", "23", "MT", "M", "0", "x", ""] {
            let err = label.parse::<Chromosome>().unwrap_err();
            assert_eq!(err, ParseError::Unknown(label.to_string()));
        }
    }

    #[test]
    fn test_accessions() -> Result<(), Box<dyn std::error::Error>> {
        let x = "X".parse::<Chromosome>()?;

        let grch37 = Accessions::for_assembly(Assembly::GRCh37);
        assert_eq!(grch37.assembly(), Assembly::GRCh37);
        assert_eq!(grch37.get(&x), "NC_000023.10");
        assert_eq!(grch37.chromosome("NC_000023.10"), Some(x));
        assert_eq!(grch37.chromosome("NC_000023.11"), None);

        let grch38 = Accessions::for_assembly(Assembly::GRCh38);
        assert_eq!(grch38.get(&"1".parse()?), "NC_000001.11");
        assert_eq!(grch38.get(&"Y".parse()?), "NC_000024.10");

        Ok(())
    }

    #[test]
    fn test_every_chromosome_has_an_accession() {
        for assembly in [Assembly::GRCh37, Assembly::GRCh38] {
            let accessions = Accessions::for_assembly(assembly);
            for chromosome in Chromosome::all() {
                let accession = accessions.get(&chromosome);
                assert!(accession.starts_with("NC_0000"));
                assert_eq!(accessions.chromosome(accession), Some(chromosome));
            }
        }
    }
}
