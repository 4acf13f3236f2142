//! Parsing of genomic HGVS expressions into [`Variant`]s.
//!
//! Expressions look like `5:g.149439278_149439301delinsGC`: a canonical
//! chromosome label, the genomic marker, the position(s), and the edit.
//! Parsing is a two-stage attempt. The chromosome is replaced by its RefSeq
//! accession and the expression is handed to the [`grammar`]; if the grammar
//! rejects it, the [`fallback`] gets one try at recovering a substitution.
//! Which stage produced the result is recorded in [`Parsed`].
//!
//! The fallback exists because the grammar does not cover every shape that
//! VEP consumes (multi-nucleotide substitutions in particular). It is a
//! known gap rather than an error to be hidden, so its use is logged.

use tracing::debug;

use crate::Assembly;
use crate::Chromosome;
use crate::Variant;
use crate::chromosome::Accessions;
use crate::variant::Kind;

pub mod fallback;
pub mod grammar;

/// The delimiter between a chromosome and the rest of an expression.
const CHROMOSOME_DELIMITER: char = ':';

/// The marker for genomic coordinates.
const GENOMIC_MARKER: &str = "g.";

/// An error related to parsing a genomic expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// The chromosome is not one of the canonical chromosomes.
    UnknownChromosome(String),

    /// Neither the grammar nor the fallback recognized the expression.
    Unrecognized(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownChromosome(label) => write!(f, "unknown chromosome: `{label}`"),
            ParseError::Unrecognized(hgvs) => {
                write!(f, "unrecognized genomic expression: `{hgvs}`")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A [`Result`](std::result::Result) with a [`ParseError`].
type Result<T> = std::result::Result<T, ParseError>;

/// A successfully parsed expression, tagged with the stage that parsed it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parsed {
    /// The grammar recognized the expression.
    Grammar(Variant),

    /// Only the substitution fallback recognized the expression.
    Fallback(Variant),
}

impl Parsed {
    /// Gets the variant by reference.
    pub fn variant(&self) -> &Variant {
        match self {
            Parsed::Grammar(variant) | Parsed::Fallback(variant) => variant,
        }
    }

    /// Consumes `self` and returns the variant.
    pub fn into_variant(self) -> Variant {
        match self {
            Parsed::Grammar(variant) | Parsed::Fallback(variant) => variant,
        }
    }

    /// Whether the fallback produced the variant.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Parsed::Fallback(_))
    }
}

/// A parser for genomic expressions.
#[derive(Clone, Copy, Debug)]
pub struct Parser {
    /// The accession map used to qualify expressions.
    accessions: Accessions,
}

impl Parser {
    /// Creates a new parser from an accession map.
    pub fn new(accessions: Accessions) -> Self {
        Self { accessions }
    }

    /// Creates a new parser using the accession map for an assembly.
    pub fn for_assembly(assembly: Assembly) -> Self {
        Self::new(Accessions::for_assembly(assembly))
    }

    /// Gets the accession map.
    pub fn accessions(&self) -> &Accessions {
        &self.accessions
    }

    /// Attempts to parse an expression, reporting which stage succeeded.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::genomic::Parsed;
    /// use hgvsg::genomic::Parser;
    ///
    /// let parser = Parser::for_assembly(Assembly::GRCh37);
    ///
    /// let parsed = parser.attempt("17:g.7577610T>C")?;
    /// assert!(matches!(parsed, Parsed::Grammar(_)));
    ///
    /// let parsed = parser.attempt("X:g.53239699_53239700AC>TT")?;
    /// assert!(parsed.is_fallback());
    /// assert_eq!(parsed.variant().region(), "X:53239699-53239700/TT");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn attempt(&self, hgvs: &str) -> Result<Parsed> {
        let hgvs = hgvs.trim();
        let unrecognized = || ParseError::Unrecognized(hgvs.to_string());

        let (label, rest) = hgvs
            .split_once(CHROMOSOME_DELIMITER)
            .ok_or_else(unrecognized)?;

        let chromosome = label
            .parse::<Chromosome>()
            .map_err(|_| ParseError::UnknownChromosome(label.to_string()))?;

        let posedit = rest
            .strip_prefix(GENOMIC_MARKER)
            .ok_or_else(unrecognized)?;

        let qualified = format!("{}:{}", self.accessions.get(&chromosome), rest);

        match grammar::parse(&qualified) {
            Ok(expression) => from_expression(chromosome, expression)
                .map(Parsed::Grammar)
                .ok_or_else(unrecognized),
            Err(err) => {
                debug!("grammar rejected `{qualified}` ({err}), trying the substitution fallback");

                let substitution = fallback::parse(posedit).ok_or_else(unrecognized)?;
                Variant::try_new(
                    chromosome,
                    substitution.start,
                    substitution.end,
                    Some(substitution.reference),
                    Some(substitution.alternate),
                    Kind::Substitution,
                )
                .map(Parsed::Fallback)
                .map_err(|_| unrecognized())
            }
        }
    }

    /// Parses an expression into a [`Variant`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::genomic::Parser;
    ///
    /// let variant = Parser::default().parse("5:g.149439278_149439301delinsGC")?;
    ///
    /// assert_eq!(variant.start(), 149439278);
    /// assert_eq!(variant.end(), 149439301);
    /// assert_eq!(variant.reference(), None);
    /// assert_eq!(variant.alternate(), Some("GC"));
    /// assert_eq!(variant.region(), "5:149439278-149439301/GC");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(&self, hgvs: &str) -> Result<Variant> {
        self.attempt(hgvs).map(Parsed::into_variant)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::for_assembly(Assembly::default())
    }
}

/// Converts a grammar expression into a [`Variant`].
///
/// Insertions are re-anchored to VEP's convention (`start == end + 1`)
/// whichever order the positions were written in.
fn from_expression(chromosome: Chromosome, expression: grammar::Expression) -> Option<Variant> {
    let (start, end) = (expression.start(), expression.end());

    let (start, end, reference, alternate, kind) = match expression.into_edit() {
        grammar::Edit::Substitution {
            reference,
            alternate,
        } => (start, end, Some(reference), Some(alternate), Kind::Substitution),
        grammar::Edit::Deletion { reference } => (start, end, reference, None, Kind::Deletion),
        grammar::Edit::Delins {
            reference,
            alternate,
        } => (start, end, reference, Some(alternate), Kind::Delins),
        grammar::Edit::Insertion { alternate } => (
            start.max(end),
            start.min(end),
            None,
            Some(alternate),
            Kind::Insertion,
        ),
        grammar::Edit::Duplication { reference } => {
            (start, end, reference, None, Kind::Duplication)
        }
        grammar::Edit::Inversion => (start, end, None, None, Kind::Inversion),
    };

    Variant::try_new(chromosome, start, end, reference, alternate, kind).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        Parser::for_assembly(Assembly::GRCh37)
    }

    #[test]
    fn test_substitutions_keep_their_coordinates_and_alleles()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let cases = [
            ("1:g.12345A>G", 12345, 12345, "A", "G"),
            ("22:g.100_101AC>GT", 100, 101, "AC", "GT"),
            ("Y:g.2655180_2655182GAT>C", 2655180, 2655182, "GAT", "C"),
            ("X:g.53239699_53239700AC>TT", 53239699, 53239700, "AC", "TT"),
        ];

        for (hgvs, start, end, reference, alternate) in cases {
            let variant = parser().parse(hgvs)?;
            assert_eq!(variant.start(), start, "{hgvs}");
            assert_eq!(variant.end(), end, "{hgvs}");
            assert_eq!(variant.reference(), Some(reference), "{hgvs}");
            assert_eq!(variant.alternate(), Some(alternate), "{hgvs}");
            assert_eq!(variant.kind(), Kind::Substitution, "{hgvs}");
        }

        Ok(())
    }

    #[test]
    fn test_region_rebuilt_from_fields_matches() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let variant = parser().parse("X:g.53239699_53239700AC>TT")?;
        let rebuilt = format!(
            "{}:{}-{}/{}",
            variant.chromosome(),
            variant.start(),
            variant.end(),
            variant.alternate().unwrap_or_default()
        );

        assert_eq!(rebuilt, variant.region());
        Ok(())
    }

    #[test]
    fn test_edit_kinds() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let duplication = parser().parse("7:g.140453136_140453137dupAC")?;
        assert_eq!(duplication.kind(), Kind::Duplication);
        assert_eq!(duplication.reference(), Some("AC"));
        assert_eq!(duplication.alternate(), None);
        assert_eq!(duplication.region(), "7:140453136-140453137/DUP");

        let inversion = parser().parse("7:g.140453136_140453140inv")?;
        assert_eq!(inversion.kind(), Kind::Inversion);
        assert_eq!(inversion.reference(), None);
        assert_eq!(inversion.alternate(), None);
        assert_eq!(inversion.region(), "7:140453136-140453140/INV");

        let deletion = parser().parse("13:g.32914438del")?;
        assert_eq!(deletion.kind(), Kind::Deletion);
        assert_eq!(deletion.region(), "13:32914438-32914438/DEL");

        Ok(())
    }

    #[test]
    fn test_insertions_follow_the_vep_convention()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        for hgvs in ["X:g.129190011_129190010insT", "X:g.129190010_129190011insT"] {
            let variant = parser().parse(hgvs)?;
            assert_eq!(variant.start(), variant.end() + 1);
            assert_eq!(variant.region(), "X:129190011-129190010/T");
            assert_eq!(variant.identifier(), "X:129190011-129190010:-/T");
        }

        Ok(())
    }

    #[test]
    fn test_stage_tags() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(matches!(parser().attempt("17:g.7577610T>C")?, Parsed::Grammar(_)));
        assert!(matches!(
            parser().attempt("17:g.7577610_7577611TC>CT")?,
            Parsed::Fallback(_)
        ));
        Ok(())
    }

    #[test]
    fn test_canonical_chromosomes_are_never_unknown() {
        for chromosome in Chromosome::all() {
            let hgvs = format!("{chromosome}:g.100A>G");
            assert!(parser().parse(&hgvs).is_ok(), "{hgvs}");
        }
    }

    #[test]
    fn test_unknown_chromosomes() {
        for label in ["chr1", "23", "MT", "25", "chrX"] {
            let err = parser().parse(&format!("{label}:g.100A>G")).unwrap_err();
            assert_eq!(err, ParseError::UnknownChromosome(label.to_string()));
        }
    }

    #[test]
    fn test_unrecognized() {
        for hgvs in [
            "1:g.100_102>GC",
            "1:g.100?",
            "1:c.100A>G",
            "1-100-A-G",
            "1:g.102_100AC>GT",
            "1:g.0A>G",
        ] {
            let err = parser().parse(hgvs).unwrap_err();
            assert_eq!(err, ParseError::Unrecognized(hgvs.to_string()));
        }

        assert_eq!(
            ParseError::Unrecognized(String::from("1:g.100?")).to_string(),
            "unrecognized genomic expression: `1:g.100?`"
        );
    }
}
