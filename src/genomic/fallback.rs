//! A conservative extractor for substitutions outside of the grammar.
//!
//! The grammar only understands single nucleotide substitutions, yet VEP
//! happily consumes multi-nucleotide replacements such as
//! `53239699_53239700AC>TT`. This extractor recognizes exactly that shape
//! (`position[_position]REF>ALT`) and nothing else.

use std::sync::LazyLock;

use omics::coordinate::position::Number;
use regex::Regex;

/// The pattern for a (possibly multi-nucleotide) substitution.
static REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:_(\d+))?([ACGT]+)>([ACGT]+)$").unwrap());

/// A substitution recovered by the fallback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Substitution {
    /// The 1-based start position.
    pub start: Number,

    /// The 1-based end position.
    pub end: Number,

    /// The reference allele.
    pub reference: String,

    /// The alternate allele.
    pub alternate: String,
}

/// Attempts to extract a substitution from the position and edit portion of
/// a genomic expression (everything after `g.`).
///
/// [`None`] is returned if the shape does not match or the positions do not
/// fit in a [`Number`].
///
/// # Examples
///
/// ```
/// use hgvsg::genomic::fallback;
///
/// let substitution = fallback::parse("53239699_53239700AC>TT").unwrap();
/// assert_eq!(substitution.start, 53239699);
/// assert_eq!(substitution.end, 53239700);
/// assert_eq!(substitution.reference, "AC");
/// assert_eq!(substitution.alternate, "TT");
///
/// assert!(fallback::parse("53239699_53239700delinsTT").is_none());
/// ```
pub fn parse(posedit: &str) -> Option<Substitution> {
    let groups = REGEX.captures(posedit)?;

    let start = groups.get(1)?.as_str().parse::<Number>().ok()?;
    let end = match groups.get(2) {
        Some(end) => end.as_str().parse::<Number>().ok()?,
        None => start,
    };

    Some(Substitution {
        start,
        end,
        reference: groups.get(3)?.as_str().to_string(),
        alternate: groups.get(4)?.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_position() {
        let substitution = parse("100ACG>T").unwrap();
        assert_eq!(
            substitution,
            Substitution {
                start: 100,
                end: 100,
                reference: String::from("ACG"),
                alternate: String::from("T"),
            }
        );
    }

    #[test]
    fn test_other_shapes_do_not_match() {
        assert!(parse("100_102del").is_none());
        assert!(parse("100_102>GC").is_none());
        assert!(parse("100A>").is_none());
        assert!(parse("100a>g").is_none());
        assert!(parse("99999999999999999999999A>G").is_none());
    }
}
