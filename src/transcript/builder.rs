//! A builder for a [`Translator`].

use crate::reference::Reference;
use crate::transcript::Translator;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug)]
pub enum MissingError {
    /// No reference was provided to the [`Builder`].
    Reference,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Reference => write!(f, "reference"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error that occurs when a singular field was provided multiple times to
/// the [`Builder`].
#[derive(Debug)]
pub enum MultipleError {
    /// The reference was provided multiple times to the [`Builder`].
    Reference,
}

impl std::fmt::Display for MultipleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipleError::Reference => write!(f, "reference"),
        }
    }
}

impl std::error::Error for MultipleError {}

/// An error related to a [`Builder`].
#[derive(Debug)]
pub enum Error {
    /// A required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// A singular field was provided to the [`Builder`] more than once.
    Multiple(MultipleError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::Multiple(err) => write!(f, "singular field set multiple times: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Translator`].
#[derive(Debug)]
pub struct Builder<R> {
    /// The source of reference sequence.
    reference: Option<R>,

    /// Whether strand mismatches are errors.
    strict: bool,
}

impl<R> Default for Builder<R> {
    fn default() -> Self {
        Self {
            reference: None,
            strict: false,
        }
    }
}

impl<R: Reference> Builder<R> {
    /// Sets the source of reference sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::reference::Memory;
    /// use hgvsg::transcript::Builder;
    ///
    /// let builder = Builder::default().reference(Memory::default())?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn reference(mut self, reference: R) -> Result<Self> {
        if self.reference.is_some() {
            return Err(Error::Multiple(MultipleError::Reference));
        }

        self.reference = Some(reference);
        Ok(self)
    }

    /// Sets whether a strand mismatch fails the translation.
    ///
    /// By default, a mismatch is logged and the transcript alleles are used
    /// as written.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Consumes `self` to attempt to build a [`Translator`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::reference::Memory;
    /// use hgvsg::transcript::Builder;
    ///
    /// let translator = Builder::default()
    ///     .reference(Memory::default())?
    ///     .strict(true)
    ///     .try_build()?;
    ///
    /// assert!(translator.is_strict());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Translator<R>> {
        let reference = self
            .reference
            .ok_or(Error::Missing(MissingError::Reference))?;

        Ok(Translator {
            reference,
            strict: self.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Memory;

    #[test]
    fn it_fails_to_produce_a_translator_when_no_reference_is_provided() {
        let err = Builder::<Memory>::default().try_build().unwrap_err();
        assert_eq!(err.to_string(), "missing required field: reference");
    }

    #[test]
    fn it_fails_to_produce_a_translator_when_the_reference_is_provided_more_than_once()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .reference(Memory::default())?
            .reference(Memory::default())
            .unwrap_err();

        assert_eq!(err.to_string(), "singular field set multiple times: reference");
        Ok(())
    }

    #[test]
    fn it_is_lenient_by_default() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let translator = Builder::default().reference(Memory::default())?.try_build()?;
        assert!(!translator.is_strict());
        Ok(())
    }
}
