//! Classification of transcript-relative change notation.
//!
//! A change is recognized by the first of three families that matches it:
//!
//! 1. substitutions (`1642_1643GT>AA`, `673-2A>G`, and `2094_2117>GC` where
//!    the replaced sequence is not written out),
//! 2. insertions (`5035_5036insT`, `100_102delinsAT`),
//! 3. deletions, duplications, and inversions (`100del`, `100_102delACG`,
//!    `100_101dup2`, `100_110inv`).
//!
//! Each family accepts an optional `ACCESSION[(GENE)]:` prefix with a `c.` or
//! `n.` marker and an optional trailing parenthesised annotation such as
//! ` (p.Arg175His)`.

use std::str::FromStr;
use std::sync::LazyLock;

use omics::coordinate::position::Number;
use regex::Regex;

/// The optional prefix of a change.
const PREFIX: &str = r"^(?:[A-Za-z0-9_.]+(?:\([A-Za-z0-9_.-]+\))?:)?(?:[cn]\.)?";

/// A transcript position with an optional intronic offset.
const POSITION: &str = r"-?\d+(?:[+-]\d+)?";

/// The optional suffix of a change.
const SUFFIX: &str = r"(?:\s*\(.*\))?$";

/// The substitution family.
static SUBSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{PREFIX}({POSITION})(?:_({POSITION}))?([ACGT]*)>([ACGT]+){SUFFIX}"
    ))
    .unwrap()
});

/// The insertion family.
static INSERTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{PREFIX}({POSITION})(?:_({POSITION}))?(ins|delins)([ACGT]+){SUFFIX}"
    ))
    .unwrap()
});

/// The deletion family.
static DELETION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{PREFIX}({POSITION})(?:_({POSITION}))?(del|dup|inv)([ACGT]+|\d+)?{SUFFIX}"
    ))
    .unwrap()
});

/// An error related to parsing a [`Change`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// None of the families matched.
    NoPatternMatched(String),

    /// A position could not be evaluated, or the span it describes is
    /// negative or empty.
    InvalidPosition(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::NoPatternMatched(change) => {
                write!(f, "no pattern matched the change `{change}`")
            }
            ParseError::InvalidPosition(reason) => write!(f, "invalid position: {reason}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A [`Result`](std::result::Result) with a [`ParseError`].
type Result<T> = std::result::Result<T, ParseError>;

/// Evaluates a position such as `673-2` into `671`.
fn evaluate(position: &str) -> Result<i64> {
    let invalid = || ParseError::InvalidPosition(format!("`{position}`"));

    // A leading `-` belongs to the base position (5' UTR).
    let split = position
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map(|(i, _)| i);

    match split {
        Some(i) => {
            let (base, offset) = position.split_at(i);
            let base = base.parse::<i64>().map_err(|_| invalid())?;
            let offset = offset
                .trim_start_matches('+')
                .parse::<i64>()
                .map_err(|_| invalid())?;
            base.checked_add(offset).ok_or_else(invalid)
        }
        None => position.parse::<i64>().map_err(|_| invalid()),
    }
}

/// The evaluated transcript positions of a change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    /// The evaluated start position.
    start: i64,

    /// The evaluated end position.
    end: i64,
}

impl Span {
    /// Gets the evaluated start position.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Gets the evaluated end position.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Gets the distance from the start to the end of the span.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::transcript::change::Change;
    ///
    /// let change = "2094_2117>GC".parse::<Change>()?;
    /// assert_eq!(change.span().length()?, 23);
    ///
    /// let change = "673-2A>G".parse::<Change>()?;
    /// assert_eq!(change.span().start(), 671);
    /// assert_eq!(change.span().length()?, 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn length(&self) -> Result<Number> {
        self.end
            .checked_sub(self.start)
            .and_then(|length| Number::try_from(length).ok())
            .ok_or_else(|| {
                ParseError::InvalidPosition(format!(
                    "span from {} to {} is negative",
                    self.start, self.end
                ))
            })
    }
}

/// How far a deletion, duplication, or inversion reaches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Extent {
    /// The affected sequence was written out.
    Allele(String),

    /// The number of affected nucleotides was written out.
    Length(Number),
}

/// The kind of change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// `FROM>TO`, where `FROM` may be empty.
    Substitution {
        /// The replaced sequence as written on the transcript.
        from: String,

        /// The replacing sequence as written on the transcript.
        to: String,
    },

    /// `insALT`.
    Insertion(String),

    /// `delinsALT`.
    Delins(String),

    /// `del[EXTENT]`.
    Deletion(Option<Extent>),

    /// `dup[EXTENT]`.
    Duplication(Option<Extent>),

    /// `inv[EXTENT]`.
    Inversion(Option<Extent>),
}

/// A classified transcript change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Change {
    /// The evaluated positions.
    span: Span,

    /// The kind of change.
    kind: Kind,
}

impl Change {
    /// Gets the evaluated positions.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Gets the kind of change.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Consumes `self` and returns the kind of change.
    pub fn into_kind(self) -> Kind {
        self.kind
    }
}

/// Evaluates the (optional) second position group against the first.
fn span(groups: &regex::Captures<'_>) -> Result<Span> {
    let start = evaluate(&groups[1])?;
    let end = match groups.get(2) {
        Some(end) => evaluate(end.as_str())?,
        None => start,
    };

    Ok(Span { start, end })
}

/// Parses the extent of a deletion, duplication, or inversion.
fn extent(s: &str) -> Result<Extent> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Extent::Allele(s.to_string()));
    }

    match s.parse::<Number>() {
        Ok(0) | Err(_) => Err(ParseError::InvalidPosition(format!(
            "`{s}` is not a valid length"
        ))),
        Ok(length) => Ok(Extent::Length(length)),
    }
}

impl FromStr for Change {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(groups) = SUBSTITUTION.captures(s) {
            return Ok(Change {
                span: span(&groups)?,
                kind: Kind::Substitution {
                    from: groups[3].to_string(),
                    to: groups[4].to_string(),
                },
            });
        }

        if let Some(groups) = INSERTION.captures(s) {
            let alternate = groups[4].to_string();
            let kind = match &groups[3] {
                "ins" => Kind::Insertion(alternate),
                _ => Kind::Delins(alternate),
            };

            return Ok(Change {
                span: span(&groups)?,
                kind,
            });
        }

        if let Some(groups) = DELETION.captures(s) {
            let extent = groups.get(4).map(|m| extent(m.as_str())).transpose()?;
            let kind = match &groups[3] {
                "del" => Kind::Deletion(extent),
                "dup" => Kind::Duplication(extent),
                _ => Kind::Inversion(extent),
            };

            return Ok(Change {
                span: span(&groups)?,
                kind,
            });
        }

        Err(ParseError::NoPatternMatched(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutions() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let change = "1642_1643GT>AA".parse::<Change>()?;
        assert_eq!(change.span(), Span {
            start: 1642,
            end: 1643
        });
        assert_eq!(change.into_kind(), Kind::Substitution {
            from: String::from("GT"),
            to: String::from("AA")
        });

        let change = "2094_2117>GC".parse::<Change>()?;
        assert_eq!(change.into_kind(), Kind::Substitution {
            from: String::new(),
            to: String::from("GC")
        });

        Ok(())
    }

    #[test]
    fn test_intronic_offsets_are_evaluated() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("673-2A>G".parse::<Change>()?.span().start(), 671);
        assert_eq!("673+5G>A".parse::<Change>()?.span().start(), 678);
        assert_eq!("-15C>T".parse::<Change>()?.span().start(), -15);
        assert_eq!("-15+1C>T".parse::<Change>()?.span().start(), -14);

        let span = "100+1_100+3del".parse::<Change>()?.span();
        assert_eq!(span.length()?, 2);

        Ok(())
    }

    #[test]
    fn test_prefix_and_suffix() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let change = "NM_000546.5(TP53):c.524G>A (p.Arg175His)".parse::<Change>()?;
        assert_eq!(change.span().start(), 524);
        assert_eq!(change.kind(), &Kind::Substitution {
            from: String::from("G"),
            to: String::from("A")
        });

        let change = "n.5035_5036insT".parse::<Change>()?;
        assert_eq!(change.into_kind(), Kind::Insertion(String::from("T")));

        Ok(())
    }

    #[test]
    fn test_insertion_family() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            "100_102delinsAT".parse::<Change>()?.into_kind(),
            Kind::Delins(String::from("AT"))
        );
        assert_eq!(
            "5035_5036insT".parse::<Change>()?.into_kind(),
            Kind::Insertion(String::from("T"))
        );
        Ok(())
    }

    #[test]
    fn test_deletion_family() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("100del".parse::<Change>()?.into_kind(), Kind::Deletion(None));
        assert_eq!(
            "100_102delACG".parse::<Change>()?.into_kind(),
            Kind::Deletion(Some(Extent::Allele(String::from("ACG"))))
        );
        assert_eq!(
            "100dup2".parse::<Change>()?.into_kind(),
            Kind::Duplication(Some(Extent::Length(2)))
        );
        assert_eq!("100_110inv".parse::<Change>()?.into_kind(), Kind::Inversion(None));
        Ok(())
    }

    #[test]
    fn test_failures() {
        assert_eq!(
            "p.Arg175His".parse::<Change>().unwrap_err(),
            ParseError::NoPatternMatched(String::from("p.Arg175His"))
        );
        assert_eq!(
            "100_102>".parse::<Change>().unwrap_err(),
            ParseError::NoPatternMatched(String::from("100_102>"))
        );
        assert!(matches!(
            "100del0".parse::<Change>().unwrap_err(),
            ParseError::InvalidPosition(_)
        ));
        assert!(matches!(
            "99999999999999999999A>G".parse::<Change>().unwrap_err(),
            ParseError::InvalidPosition(_)
        ));

        let span = "102_100del".parse::<Change>().map(|change| change.span());
        assert!(span.is_ok_and(|span| span.length().is_err()));
    }
}
