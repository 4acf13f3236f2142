//! Strand reconciliation between transcript alleles and the genome.

use crate::allele;
use crate::allele::Orientation;

/// An error related to reconciling an allele with the reference.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// An allele contains something other than `A`, `C`, `G`, or `T`.
    Allele(allele::Error),

    /// The allele matched the reference under no orientation.
    Mismatch(StrandMismatch),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Allele(err) => write!(f, "allele error: {err}"),
            Error::Mismatch(mismatch) => write!(f, "{mismatch}"),
        }
    }
}

impl std::error::Error for Error {}

/// A transcript allele that could not be reconciled with the reference under
/// any [`Orientation`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrandMismatch {
    /// The allele as written on the transcript.
    from: String,

    /// The replacing allele as written on the transcript, if any.
    to: Option<String>,

    /// The reference sequence fetched for the allele.
    reference: String,
}

impl StrandMismatch {
    /// Creates a new [`StrandMismatch`].
    pub fn new(from: impl Into<String>, to: Option<String>, reference: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to,
            reference: reference.into(),
        }
    }

    /// Gets the allele as written on the transcript.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Gets the replacing allele as written on the transcript.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// Gets the fetched reference sequence.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl std::fmt::Display for StrandMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "allele `{}` does not match reference `{}` on either strand",
            self.from, self.reference
        )
    }
}

impl std::error::Error for StrandMismatch {}

/// The outcome of reconciling a translation with the reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// Nothing was compared against the reference.
    NotApplicable,

    /// The transcript allele matched the reference under an orientation.
    Resolved(Orientation),

    /// The transcript allele matched the reference under no orientation and
    /// was used literally.
    Mismatch(StrandMismatch),
}

impl Resolution {
    /// Whether the resolution is a mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Resolution::Mismatch(_))
    }

    /// Gets the orientation, if one was resolved.
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Resolution::Resolved(orientation) => Some(*orientation),
            _ => None,
        }
    }
}

/// Reconciles a transcript allele with a reference sequence.
///
/// # Examples
///
/// ```
/// use hgvsg::allele::Orientation;
/// use hgvsg::transcript::strand;
///
/// let orientation = strand::reconcile("GT", Some("AA"), "AC")?;
/// assert_eq!(orientation, Orientation::ReverseComplement);
///
/// let err = strand::reconcile("GT", Some("AA"), "GG").unwrap_err();
/// assert!(matches!(err, strand::Error::Mismatch(_)));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reconcile(from: &str, to: Option<&str>, reference: &str) -> Result<Orientation, Error> {
    Orientation::reconcile(from, reference)
        .map_err(Error::Allele)?
        .ok_or_else(|| {
            Error::Mismatch(StrandMismatch::new(
                from,
                to.map(String::from),
                reference,
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_are_tested_in_order() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(reconcile("AT", None, "AT")?, Orientation::Identity);
        assert_eq!(reconcile("AAG", None, "GAA")?, Orientation::Reverse);
        assert_eq!(reconcile("AAG", None, "TTC")?, Orientation::Complement);
        Ok(())
    }

    #[test]
    fn test_mismatch() {
        let Err(Error::Mismatch(mismatch)) = reconcile("A", Some("G"), "C") else {
            panic!("expected a mismatch");
        };

        assert_eq!(mismatch.from(), "A");
        assert_eq!(mismatch.to(), Some("G"));
        assert_eq!(mismatch.reference(), "C");
        assert_eq!(
            mismatch.to_string(),
            "allele `A` does not match reference `C` on either strand"
        );

        assert!(matches!(
            reconcile("A", None, "N"),
            Err(Error::Allele(_))
        ));
    }
}
