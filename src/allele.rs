//! Nucleotide complements and the orientations used for strand
//! reconciliation.

use omics::coordinate::Strand;

/// An error related to an allele.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A character outside of `A`, `C`, `G`, and `T` was encountered.
    InvalidBase(char),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidBase(c) => write!(f, "invalid nucleotide: `{c}`"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Gets the Watson-Crick pair of a single nucleotide.
fn pair(base: char) -> Result<char> {
    match base {
        'A' => Ok('T'),
        'T' => Ok('A'),
        'C' => Ok('G'),
        'G' => Ok('C'),
        c => Err(Error::InvalidBase(c)),
    }
}

/// Complements a nucleotide sequence without reversing it.
///
/// # Examples
///
/// ```
/// use hgvsg::allele;
///
/// assert_eq!(allele::complement("ACTG")?, "TGAC");
/// assert!(allele::complement("ACNG").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn complement(sequence: &str) -> Result<String> {
    sequence.chars().map(pair).collect()
}

/// Reverses a nucleotide sequence.
///
/// # Examples
///
/// ```
/// use hgvsg::allele;
///
/// assert_eq!(allele::reverse("ACTG"), "GTCA");
/// assert_eq!(allele::reverse(&allele::complement("ACTG")?), "CAGT");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reverse(sequence: &str) -> String {
    sequence.chars().rev().collect()
}

/// Reverse complements a nucleotide sequence.
///
/// # Examples
///
/// ```
/// use hgvsg::allele;
///
/// assert_eq!(allele::reverse_complement("GT")?, "AC");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reverse_complement(sequence: &str) -> Result<String> {
    complement(sequence).map(|s| reverse(&s))
}

/// Ensures a sequence only contains `A`, `C`, `G`, and `T`.
pub fn validate(sequence: &str) -> Result<()> {
    match sequence.chars().find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T')) {
        Some(c) => Err(Error::InvalidBase(c)),
        None => Ok(()),
    }
}

/// How a transcript allele reads relative to the forward genomic strand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Orientation {
    /// The allele reads identically to the reference.
    Identity,

    /// The allele is the reverse complement of the reference (a transcript on
    /// the negative strand).
    ReverseComplement,

    /// The allele is the complement of the reference, read in the same
    /// direction.
    Complement,

    /// The allele is the reference read backwards.
    Reverse,
}

impl Orientation {
    /// The order in which orientations are tested.
    pub const ALL: [Orientation; 4] = [
        Orientation::Identity,
        Orientation::ReverseComplement,
        Orientation::Complement,
        Orientation::Reverse,
    ];

    /// Applies the orientation to a transcript allele, yielding the allele as
    /// it reads on the forward genomic strand.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::allele::Orientation;
    ///
    /// assert_eq!(Orientation::Identity.apply("GT")?, "GT");
    /// assert_eq!(Orientation::ReverseComplement.apply("GT")?, "AC");
    /// assert_eq!(Orientation::Complement.apply("GT")?, "CA");
    /// assert_eq!(Orientation::Reverse.apply("GT")?, "TG");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn apply(&self, sequence: &str) -> Result<String> {
        match self {
            Orientation::Identity => {
                validate(sequence)?;
                Ok(sequence.to_string())
            }
            Orientation::ReverseComplement => reverse_complement(sequence),
            Orientation::Complement => complement(sequence),
            Orientation::Reverse => {
                validate(sequence)?;
                Ok(reverse(sequence))
            }
        }
    }

    /// Gets the genomic strand implied by the orientation.
    pub fn strand(&self) -> Strand {
        match self {
            Orientation::Identity | Orientation::Reverse => Strand::Positive,
            Orientation::Complement | Orientation::ReverseComplement => Strand::Negative,
        }
    }

    /// Finds the first orientation under which `allele` reads as `reference`.
    ///
    /// The orientations are tested in the order of [`Orientation::ALL`], so
    /// palindromic alleles always resolve to [`Orientation::Identity`]. Both
    /// sequences must only contain `A`, `C`, `G`, and `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::allele::Orientation;
    ///
    /// assert_eq!(
    ///     Orientation::reconcile("GT", "AC")?,
    ///     Some(Orientation::ReverseComplement)
    /// );
    /// assert_eq!(Orientation::reconcile("GT", "GG")?, None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reconcile(allele: &str, reference: &str) -> Result<Option<Orientation>> {
        validate(reference)?;

        for orientation in Orientation::ALL {
            if orientation.apply(allele)? == reference {
                return Ok(Some(orientation));
            }
        }

        Ok(None)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Identity => write!(f, "identity"),
            Orientation::ReverseComplement => write!(f, "reverse complement"),
            Orientation::Complement => write!(f, "complement"),
            Orientation::Reverse => write!(f, "reverse"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(complement("ACTG")?, "TGAC");
        assert_eq!(complement("")?, "");
        assert_eq!(reverse(&complement("ACTG")?), "CAGT");
        Ok(())
    }

    #[test]
    fn test_complement_rejects_other_characters() {
        let err = complement("ACUG").unwrap_err();
        assert_eq!(err, Error::InvalidBase('U'));
        assert_eq!(err.to_string(), "invalid nucleotide: `U`");

        assert!(complement("acgt").is_err());
    }

    #[test]
    fn test_reverse_complement_is_an_involution() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let sequence = "GATTACA";
        assert_eq!(reverse_complement(&reverse_complement(sequence)?)?, sequence);
        Ok(())
    }

    #[test]
    fn test_reconcile_each_orientation() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Orientation::reconcile("GAT", "GAT")?, Some(Orientation::Identity));
        assert_eq!(
            Orientation::reconcile("GAT", "ATC")?,
            Some(Orientation::ReverseComplement)
        );
        assert_eq!(Orientation::reconcile("GAT", "CTA")?, Some(Orientation::Complement));
        assert_eq!(Orientation::reconcile("GAT", "TAG")?, Some(Orientation::Reverse));
        assert_eq!(Orientation::reconcile("GAT", "GGG")?, None);
        Ok(())
    }

    #[test]
    fn test_reconcile_prefers_identity_for_palindromes()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        // `AT` is its own reverse complement.
        assert_eq!(Orientation::reconcile("AT", "AT")?, Some(Orientation::Identity));
        Ok(())
    }

    #[test]
    fn test_reconcile_rejects_ambiguous_reference() {
        let err = Orientation::reconcile("A", "N").unwrap_err();
        assert_eq!(err, Error::InvalidBase('N'));
    }

    #[test]
    fn test_strand() {
        assert_eq!(Orientation::Identity.strand(), Strand::Positive);
        assert_eq!(Orientation::Reverse.strand(), Strand::Positive);
        assert_eq!(Orientation::Complement.strand(), Strand::Negative);
        assert_eq!(Orientation::ReverseComplement.strand(), Strand::Negative);
    }
}
