//! A genomic variant record.

use omics::coordinate::position::Number;

use crate::Chromosome;

/// The placeholder written in place of an absent allele in an identifier.
const MISSING: &str = ".";

/// The sentinel written in place of the reference allele of an insertion.
const INSERTION_SENTINEL: &str = "-";

/// A kind of edit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// A replacement of the reference allele (`REF>ALT`).
    Substitution,

    /// A deletion (`del`).
    Deletion,

    /// An insertion between two positions (`ins`).
    Insertion,

    /// A deletion followed by an insertion (`delins`).
    Delins,

    /// A duplication (`dup`).
    Duplication,

    /// An inversion (`inv`).
    Inversion,
}

impl Kind {
    /// Gets the HGVS keyword for the edit, if it has one.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Kind::Substitution => None,
            Kind::Deletion => Some("del"),
            Kind::Insertion => Some("ins"),
            Kind::Delins => Some("delins"),
            Kind::Duplication => Some("dup"),
            Kind::Inversion => Some("inv"),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Substitution => write!(f, "substitution"),
            Kind::Deletion => write!(f, "deletion"),
            Kind::Insertion => write!(f, "insertion"),
            Kind::Delins => write!(f, "deletion-insertion"),
            Kind::Duplication => write!(f, "duplication"),
            Kind::Inversion => write!(f, "inversion"),
        }
    }
}

/// An error related to a [`Variant`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A position of zero was provided (positions are 1-based).
    ZeroPosition,

    /// The start position is after the end position for an edit that spans
    /// reference positions.
    InvertedSpan(Number, Number),

    /// An insertion whose positions are not `end + 1` and `end`.
    InvalidInsertionSpan(Number, Number),

    /// An edit is missing the alternate allele it requires.
    MissingAlternate(Kind),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroPosition => write!(f, "positions are 1-based, found position 0"),
            Error::InvertedSpan(start, end) => {
                write!(f, "start position ({start}) is after end position ({end})")
            }
            Error::InvalidInsertionSpan(start, end) => write!(
                f,
                "insertion must be anchored as `end + 1` to `end`, found {start} to {end}"
            ),
            Error::MissingAlternate(kind) => write!(f, "{kind} requires an alternate allele"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A variant on a canonical chromosome.
///
/// The display region and the identifier are always derived from the fields
/// of the record; they are never stored.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Variant {
    /// The chromosome.
    chromosome: Chromosome,

    /// The 1-based start position.
    start: Number,

    /// The 1-based, inclusive end position.
    end: Number,

    /// The reference allele.
    reference: Option<String>,

    /// The alternate allele.
    alternate: Option<String>,

    /// The kind of edit.
    kind: Kind,
}

impl Variant {
    /// Attempts to create a new [`Variant`].
    ///
    /// Insertions must follow VEP's convention of an inverted span (`start ==
    /// end + 1`); every other edit must satisfy `0 < start <= end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Variant;
    /// use hgvsg::variant::Kind;
    ///
    /// let variant = Variant::try_new(
    ///     "X".parse()?,
    ///     53239699,
    ///     53239700,
    ///     Some(String::from("AC")),
    ///     Some(String::from("TT")),
    ///     Kind::Substitution,
    /// )?;
    ///
    /// assert_eq!(variant.region(), "X:53239699-53239700/TT");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        chromosome: Chromosome,
        start: Number,
        end: Number,
        reference: Option<String>,
        alternate: Option<String>,
        kind: Kind,
    ) -> Result<Self> {
        if start == 0 || end == 0 {
            return Err(Error::ZeroPosition);
        }

        match kind {
            Kind::Insertion => {
                if start != end + 1 {
                    return Err(Error::InvalidInsertionSpan(start, end));
                }
            }
            _ => {
                if start > end {
                    return Err(Error::InvertedSpan(start, end));
                }
            }
        }

        if matches!(kind, Kind::Substitution | Kind::Insertion | Kind::Delins)
            && alternate.is_none()
        {
            return Err(Error::MissingAlternate(kind));
        }

        Ok(Self {
            chromosome,
            start,
            end,
            reference,
            alternate,
            kind,
        })
    }

    /// Gets the chromosome.
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Gets the 1-based start position.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the 1-based, inclusive end position.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the reference allele (if known).
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Gets the alternate allele (if any).
    pub fn alternate(&self) -> Option<&str> {
        self.alternate.as_deref()
    }

    /// Gets the kind of edit.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether the record is an insertion (and thus has an inverted span).
    pub fn is_insertion(&self) -> bool {
        self.start > self.end
    }

    /// Gets the display region, `chrom:start-end/allele`.
    ///
    /// The allele is the alternate allele when there is one and the
    /// upper-cased edit keyword (`DEL`, `DUP`, `INV`) otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Variant;
    /// use hgvsg::variant::Kind;
    ///
    /// let variant = Variant::try_new("1".parse()?, 100, 102, None, None, Kind::Duplication)?;
    /// assert_eq!(variant.region(), "1:100-102/DUP");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn region(&self) -> String {
        let allele = match (&self.alternate, self.kind.keyword()) {
            (Some(alternate), _) => alternate.clone(),
            (None, Some(keyword)) => keyword.to_ascii_uppercase(),
            (None, None) => String::from(MISSING),
        };

        format!(
            "{}:{}-{}/{}",
            self.chromosome, self.start, self.end, allele
        )
    }

    /// Gets the stable identifier, `chrom:start-end:REF/ALT`.
    ///
    /// Absent alleles are written as `.`, and insertions carry `-` in place
    /// of the reference allele.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Variant;
    /// use hgvsg::variant::Kind;
    ///
    /// let variant = Variant::try_new(
    ///     "X".parse()?,
    ///     129190011,
    ///     129190010,
    ///     None,
    ///     Some(String::from("T")),
    ///     Kind::Insertion,
    /// )?;
    /// assert_eq!(variant.identifier(), "X:129190011-129190010:-/T");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn identifier(&self) -> String {
        let reference = match (self.is_insertion(), self.reference()) {
            (true, _) => INSERTION_SENTINEL,
            (false, Some(reference)) => reference,
            (false, None) => MISSING,
        };

        format!(
            "{}:{}-{}:{}/{}",
            self.chromosome,
            self.start,
            self.end,
            reference,
            self.alternate().unwrap_or(MISSING)
        )
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.region())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(
        start: Number,
        end: Number,
        reference: Option<&str>,
        alternate: Option<&str>,
        kind: Kind,
    ) -> std::result::Result<Variant, Box<dyn std::error::Error>> {
        Ok(Variant::try_new(
            "5".parse()?,
            start,
            end,
            reference.map(String::from),
            alternate.map(String::from),
            kind,
        )?)
    }

    #[test]
    fn test_substitution_region_and_identifier()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let variant = variant(100, 100, Some("A"), Some("G"), Kind::Substitution)?;
        assert_eq!(variant.region(), "5:100-100/G");
        assert_eq!(variant.identifier(), "5:100-100:A/G");
        assert_eq!(variant.to_string(), variant.region());
        assert!(!variant.is_insertion());
        Ok(())
    }

    #[test]
    fn test_placeholders() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let deletion = variant(100, 102, Some("ACG"), None, Kind::Deletion)?;
        assert_eq!(deletion.region(), "5:100-102/DEL");
        assert_eq!(deletion.identifier(), "5:100-102:ACG/.");

        let inversion = variant(100, 102, None, None, Kind::Inversion)?;
        assert_eq!(inversion.region(), "5:100-102/INV");
        assert_eq!(inversion.identifier(), "5:100-102:./.");

        let delins = variant(100, 102, None, Some("GC"), Kind::Delins)?;
        assert_eq!(delins.region(), "5:100-102/GC");
        assert_eq!(delins.identifier(), "5:100-102:./GC");

        Ok(())
    }

    #[test]
    fn test_insertion_convention() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let insertion = variant(101, 100, None, Some("T"), Kind::Insertion)?;
        assert!(insertion.is_insertion());
        assert_eq!(insertion.region(), "5:101-100/T");
        assert_eq!(insertion.identifier(), "5:101-100:-/T");

        let err = variant(100, 101, None, Some("T"), Kind::Insertion).unwrap_err();
        assert_eq!(
            err.to_string(),
            "insertion must be anchored as `end + 1` to `end`, found 100 to 101"
        );

        Ok(())
    }

    #[test]
    fn test_invalid_records() {
        let err = variant(0, 1, Some("A"), Some("G"), Kind::Substitution).unwrap_err();
        assert_eq!(err.to_string(), "positions are 1-based, found position 0");

        let err = variant(5, 4, Some("A"), Some("G"), Kind::Substitution).unwrap_err();
        assert_eq!(err.to_string(), "start position (5) is after end position (4)");

        let err = variant(5, 5, Some("A"), None, Kind::Substitution).unwrap_err();
        assert_eq!(err.to_string(), "substitution requires an alternate allele");
    }

    #[test]
    fn test_region_is_derived_from_fields() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let original = variant(100, 101, Some("AC"), Some("TT"), Kind::Substitution)?;
        let rebuilt = Variant::try_new(
            *original.chromosome(),
            original.start(),
            original.end(),
            original.reference().map(String::from),
            original.alternate().map(String::from),
            original.kind(),
        )?;

        assert_eq!(rebuilt.region(), original.region());
        assert_eq!(rebuilt.identifier(), original.identifier());
        assert_eq!(rebuilt, original);
        Ok(())
    }
}
