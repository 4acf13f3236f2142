//! The structural grammar for accession-qualified genomic expressions.
//!
//! Expressions are parsed with the [`hgvs`] crate's variant grammar and then
//! narrowed to what a [`Variant`](crate::Variant) can carry: certain genomic
//! (`g.`) positions with one of
//!
//! * `X>Y` (a single nucleotide substitution),
//! * `del`, `delREF`,
//! * `delinsALT`, `delREFinsALT`,
//! * `insALT` (between two adjacent positions, written in either order),
//! * `dup`, `dupREF`,
//! * `inv`.
//!
//! Substitutions spanning more than one nucleotide (`AC>TT`) and edits given
//! as counts (`del3`) are outside of the grammar.

use std::str::FromStr;

use hgvs::parser::HgvsVariant;
use hgvs::parser::NaEdit;
use omics::coordinate::position::Number;

use crate::allele;

/// The marker for genomic coordinates.
const GENOMIC_MARKER: &str = "g.";

/// The marker for a substitution.
const SUBSTITUTION_MARKER: char = '>';

/// An error related to the grammar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The expression could not be parsed as HGVS at all.
    Unparsable(String),

    /// The coordinates are not genomic (`g.`).
    UnsupportedCoordinates(String),

    /// A position is uncertain or unknown.
    UncertainPosition,

    /// A position does not fit in a 1-based genomic position.
    InvalidPosition(i64),

    /// The edit is not part of the grammar.
    UnsupportedEdit(String),

    /// An allele contains something other than `A`, `C`, `G`, or `T`.
    InvalidAllele(allele::Error),

    /// The positions are incompatible with the edit.
    InvalidSpan(Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unparsable(reason) => write!(f, "unparsable expression: {reason}"),
            Error::UnsupportedCoordinates(s) => {
                write!(f, "unsupported coordinates: expected `{GENOMIC_MARKER}`, found `{s}`")
            }
            Error::UncertainPosition => write!(f, "uncertain positions are not supported"),
            Error::InvalidPosition(position) => {
                write!(f, "invalid position: {position} (positions are 1-based)")
            }
            Error::UnsupportedEdit(edit) => write!(f, "unsupported edit: `{edit}`"),
            Error::InvalidAllele(err) => write!(f, "invalid allele: {err}"),
            Error::InvalidSpan(start, end) => {
                write!(f, "positions {start} and {end} do not fit the edit")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An edit recognized by the grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit {
    /// A single nucleotide substitution.
    Substitution {
        /// The reference nucleotide.
        reference: String,

        /// The alternate nucleotide.
        alternate: String,
    },

    /// A deletion.
    Deletion {
        /// The deleted sequence, if written.
        reference: Option<String>,
    },

    /// A deletion-insertion.
    Delins {
        /// The deleted sequence, if written.
        reference: Option<String>,

        /// The inserted sequence.
        alternate: String,
    },

    /// An insertion.
    Insertion {
        /// The inserted sequence.
        alternate: String,
    },

    /// A duplication.
    Duplication {
        /// The duplicated sequence, if written.
        reference: Option<String>,
    },

    /// An inversion.
    Inversion,
}

/// A parsed expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expression {
    /// The accession.
    accession: String,

    /// The first position as written.
    start: Number,

    /// The second position as written (the first position if there was only
    /// one).
    end: Number,

    /// The edit.
    edit: Edit,
}

impl Expression {
    /// Gets the accession.
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// Gets the first position as written.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the second position as written.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the edit.
    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    /// Consumes `self` and returns the edit.
    pub fn into_edit(self) -> Edit {
        self.edit
    }
}

/// Converts a parsed position into a 1-based position.
fn position(position: Option<i32>) -> Result<Number> {
    let position = position.ok_or(Error::UncertainPosition)?;

    match Number::try_from(position) {
        Ok(0) | Err(_) => Err(Error::InvalidPosition(i64::from(position))),
        Ok(position) => Ok(position),
    }
}

/// Validates an allele that may have been left out (written as empty).
fn optional_allele(s: &str) -> Result<Option<String>> {
    match s.is_empty() {
        true => Ok(None),
        false => required_allele(s).map(Some),
    }
}

/// Validates an allele that must be present.
fn required_allele(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(Error::UnsupportedEdit(s.to_string()));
    }

    allele::validate(s).map_err(Error::InvalidAllele)?;
    Ok(s.to_string())
}

/// Narrows a parsed edit to the grammar.
///
/// Substitutions and deletion-insertions share one representation in
/// [`NaEdit`], so the written form decides between them.
fn edit(na_edit: &NaEdit, written: &str) -> Result<Edit> {
    let unsupported = || Error::UnsupportedEdit(written.to_string());

    match na_edit {
        NaEdit::RefAlt {
            reference,
            alternative,
        } => match written.contains(SUBSTITUTION_MARKER) {
            true if reference.len() == 1 && alternative.len() == 1 => Ok(Edit::Substitution {
                reference: required_allele(reference)?,
                alternate: required_allele(alternative)?,
            }),
            true => Err(unsupported()),
            false => Ok(Edit::Delins {
                reference: optional_allele(reference)?,
                alternate: required_allele(alternative)?,
            }),
        },
        NaEdit::DelRef { reference } => Ok(Edit::Deletion {
            reference: optional_allele(reference)?,
        }),
        NaEdit::Ins { alternative } => Ok(Edit::Insertion {
            alternate: required_allele(alternative)?,
        }),
        NaEdit::Dup { reference } => Ok(Edit::Duplication {
            reference: optional_allele(reference)?,
        }),
        NaEdit::InvRef { reference } => {
            optional_allele(reference)?;
            Ok(Edit::Inversion)
        }
        NaEdit::NumAlt { .. } | NaEdit::DelNum { .. } | NaEdit::InvNum { .. } => {
            Err(unsupported())
        }
    }
}

/// Checks that the positions are compatible with the edit.
fn check_span(start: Number, end: Number, edit: &Edit) -> Result<()> {
    let valid = match edit {
        Edit::Substitution { .. } => start == end,
        Edit::Insertion { .. } => start.abs_diff(end) == 1,
        _ => start <= end,
    };

    match valid {
        true => Ok(()),
        false => Err(Error::InvalidSpan(start, end)),
    }
}

/// Parses an accession-qualified genomic expression.
///
/// # Examples
///
/// ```
/// use hgvsg::genomic::grammar;
/// use hgvsg::genomic::grammar::Edit;
///
/// let expression = grammar::parse("NC_000005.9:g.149439278_149439301delinsGC")?;
/// assert_eq!(expression.accession(), "NC_000005.9");
/// assert_eq!(expression.start(), 149439278);
/// assert_eq!(expression.end(), 149439301);
/// assert_eq!(
///     expression.edit(),
///     &Edit::Delins {
///         reference: None,
///         alternate: String::from("GC")
///     }
/// );
///
/// assert!(grammar::parse("NC_000023.10:g.53239699_53239700AC>TT").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(s: &str) -> Result<Expression> {
    let variant = HgvsVariant::from_str(s).map_err(|err| Error::Unparsable(err.to_string()))?;

    let HgvsVariant::GenomeVariant {
        accession,
        loc_edit,
        ..
    } = variant
    else {
        let coordinates = s.split_once(':').map(|(_, rest)| rest).unwrap_or(s);
        return Err(Error::UnsupportedCoordinates(coordinates.to_string()));
    };

    if !loc_edit.loc.is_certain() || !loc_edit.edit.is_certain() {
        return Err(Error::UncertainPosition);
    }

    let interval = loc_edit.loc.inner();
    let start = position(interval.start)?;
    let end = match interval.end {
        Some(_) => position(interval.end)?,
        None => start,
    };

    let written = s.rsplit_once(GENOMIC_MARKER).map(|(_, rest)| rest).unwrap_or(s);
    let edit = edit(loc_edit.edit.inner(), written)?;
    check_span(start, end, &edit)?;

    Ok(Expression {
        accession: accession.value,
        start,
        end,
        edit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_nucleotide_substitution() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let expression = parse("NC_000017.10:g.7577610T>C")?;
        assert_eq!(expression.accession(), "NC_000017.10");
        assert_eq!(expression.start(), 7577610);
        assert_eq!(expression.end(), 7577610);
        assert_eq!(
            expression.into_edit(),
            Edit::Substitution {
                reference: String::from("T"),
                alternate: String::from("C")
            }
        );
        Ok(())
    }

    #[test]
    fn test_keyword_edits() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            parse("NC_000001.10:g.100_102del")?.into_edit(),
            Edit::Deletion { reference: None }
        );
        assert_eq!(
            parse("NC_000001.10:g.100_102delACG")?.into_edit(),
            Edit::Deletion {
                reference: Some(String::from("ACG"))
            }
        );
        assert_eq!(
            parse("NC_000001.10:g.100_101delACinsT")?.into_edit(),
            Edit::Delins {
                reference: Some(String::from("AC")),
                alternate: String::from("T")
            }
        );
        assert_eq!(
            parse("NC_000001.10:g.100dupA")?.into_edit(),
            Edit::Duplication {
                reference: Some(String::from("A"))
            }
        );
        assert_eq!(
            parse("NC_000001.10:g.100_200inv")?.into_edit(),
            Edit::Inversion
        );
        Ok(())
    }

    #[test]
    fn test_insertions_accept_either_order() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let forward = parse("NC_000023.10:g.129190010_129190011insT")?;
        assert_eq!((forward.start(), forward.end()), (129190010, 129190011));

        let inverted = parse("NC_000023.10:g.129190011_129190010insT")?;
        assert_eq!((inverted.start(), inverted.end()), (129190011, 129190010));

        let err = parse("NC_000023.10:g.129190010_129190013insT").unwrap_err();
        assert_eq!(
            err.to_string(),
            "positions 129190010 and 129190013 do not fit the edit"
        );

        Ok(())
    }

    #[test]
    fn test_outside_of_the_grammar() {
        assert_eq!(
            parse("NC_000023.10:g.53239699_53239700delinsTT").map(|e| e.into_edit()),
            Ok(Edit::Delins {
                reference: None,
                alternate: String::from("TT")
            })
        );
        assert!(parse("NC_000023.10:g.53239699_53239700AC>TT").is_err());
        assert!(matches!(
            parse("NC_000023.10:c.100A>G").unwrap_err(),
            Error::UnsupportedCoordinates(_)
        ));
        assert!(matches!(
            parse("NC_000001.10:g.100_99del").unwrap_err(),
            Error::InvalidSpan(100, 99)
        ));
        assert!(matches!(
            parse("not hgvs at all").unwrap_err(),
            Error::Unparsable(_)
        ));
        assert!(parse("NC_000001.10:g.0A>G").is_err());
        assert!(parse("NC_000001.10:g.100con").is_err());
    }
}
