//! Translation of transcript-relative changes into genomic variants.
//!
//! A [`Translator`] takes a chromosome, the 1-based genomic position that the
//! first transcript position of the change is anchored to, and the change
//! itself (`1642_1643GT>AA`, `5035_5036insT`, `100_102delACG`, ...). It
//! classifies the change, consults its [`Reference`] where the genomic
//! reading of an allele depends on the strand of the transcript, writes the
//! equivalent genomic expression, and parses that expression into a
//! [`Variant`].
//!
//! Strand is never given: it is inferred by comparing the transcript allele
//! with the reference (see [`allele::Orientation`]). When no orientation
//! matches, the translation carries a [`Resolution::Mismatch`] and uses the
//! alleles as written, unless the translator is
//! [strict](Builder::strict).
//!
//! ```
//! use hgvsg::Assembly;
//! use hgvsg::reference::Memory;
//! use hgvsg::transcript::Builder;
//!
//! let reference =
//!     Memory::default().with_segment(Assembly::GRCh37, "X".parse()?, 53239699, "AC");
//! let translator = Builder::default().reference(reference)?.try_build()?;
//!
//! let translation = translator.translate("X", 53239699, "1642_1643GT>AA", Assembly::GRCh37)?;
//! assert_eq!(translation.genomic(), "X:g.53239699_53239700AC>TT");
//! assert_eq!(translation.variant().region(), "X:53239699-53239700/TT");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use omics::coordinate::position::Number;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::Assembly;
use crate::Chromosome;
use crate::Variant;
use crate::allele;
use crate::genomic;
use crate::reference;
use crate::reference::Reference;

pub mod batch;
pub mod builder;
pub mod change;
pub mod strand;

pub use batch::Batch;
pub use batch::Query;
pub use builder::Builder;
pub use change::Change;
pub use strand::Resolution;
pub use strand::StrandMismatch;

/// An error related to translating a transcript change.
#[derive(Debug)]
pub enum Error {
    /// The change matched none of the recognized forms.
    NoPatternMatched(String),

    /// A position could not be evaluated or falls outside of the genome.
    InvalidPosition(String),

    /// Reference sequence could not be fetched.
    ServiceUnavailable(reference::Error),

    /// An allele contains something other than `A`, `C`, `G`, or `T`.
    Allele(allele::Error),

    /// The genomic expression could not be parsed.
    Parse(genomic::ParseError),

    /// A strand mismatch in a strict translator.
    StrandMismatch(StrandMismatch),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoPatternMatched(change) => {
                write!(f, "no pattern matched the change `{change}`")
            }
            Error::InvalidPosition(reason) => write!(f, "invalid position: {reason}"),
            Error::ServiceUnavailable(err) => write!(f, "reference error: {err}"),
            Error::Allele(err) => write!(f, "allele error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::StrandMismatch(mismatch) => write!(f, "strand mismatch: {mismatch}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<change::ParseError> for Error {
    fn from(err: change::ParseError) -> Self {
        match err {
            change::ParseError::NoPatternMatched(change) => Error::NoPatternMatched(change),
            change::ParseError::InvalidPosition(reason) => Error::InvalidPosition(reason),
        }
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The result of a translation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    /// The parsed variant.
    variant: Variant,

    /// The genomic expression that was written.
    genomic: String,

    /// How the transcript alleles were reconciled with the reference.
    resolution: Resolution,
}

impl Translation {
    /// Gets the variant.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Gets the genomic expression the variant was parsed from.
    pub fn genomic(&self) -> &str {
        &self.genomic
    }

    /// Gets the strand resolution.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Consumes `self` and returns the variant.
    pub fn into_variant(self) -> Variant {
        self.variant
    }
}

/// An inclusive, 1-based genomic interval.
#[derive(Clone, Copy, Debug)]
struct Window {
    /// The first position.
    start: Number,

    /// The last position.
    end: Number,
}

impl Window {
    /// Creates the window of `length` positions beginning at `start`.
    fn of_length(start: Number, length: Number) -> Result<Self> {
        let end = length
            .checked_sub(1)
            .and_then(|n| start.checked_add(n))
            .ok_or_else(|| Error::InvalidPosition(format!("{start} + {length} overflows")))?;

        Ok(Self { start, end })
    }

    /// Shifts the window one position downstream.
    fn shifted(self) -> Result<Self> {
        let end = self
            .end
            .checked_add(1)
            .ok_or_else(|| Error::InvalidPosition(format!("{} + 1 overflows", self.end)))?;

        Ok(Self {
            start: self.start + 1,
            end,
        })
    }

    /// Gets the number of positions in the window.
    fn len(&self) -> Number {
        self.end - self.start + 1
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.start == self.end {
            true => write!(f, "{}", self.start),
            false => write!(f, "{}_{}", self.start, self.end),
        }
    }
}

/// A translator from transcript changes to genomic variants.
///
/// Use a [`Builder`] to construct one.
#[derive(Debug)]
pub struct Translator<R> {
    /// The source of reference sequence.
    pub(crate) reference: R,

    /// Whether strand mismatches are errors.
    pub(crate) strict: bool,
}

impl<R: Reference> Translator<R> {
    /// Gets the source of reference sequence.
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// Whether strand mismatches fail the translation.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Fetches the reference sequence for a window.
    fn fetch(&self, assembly: Assembly, chromosome: &Chromosome, window: Window) -> Result<String> {
        self.reference
            .fetch(assembly, chromosome, window.start - 1, window.end)
            .map_err(Error::ServiceUnavailable)
    }

    /// Applies the mismatch policy.
    fn on_mismatch(
        &self,
        chromosome: &Chromosome,
        window: Window,
        mismatch: &StrandMismatch,
    ) -> Result<()> {
        if self.strict {
            return Err(Error::StrandMismatch(mismatch.clone()));
        }

        warn!(
            chromosome = chromosome.label(),
            start = window.start,
            end = window.end,
            "{mismatch}; using the transcript alleles as written"
        );

        Ok(())
    }

    /// Writes the genomic edit for a substitution.
    fn substitution(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        window: Window,
        from: &str,
        to: &str,
    ) -> Result<(String, Resolution)> {
        if from.is_empty() {
            return Ok((format!("{window}delins{to}"), Resolution::NotApplicable));
        }

        let reference = self.fetch(assembly, chromosome, window)?;

        match strand::reconcile(from, Some(to), &reference) {
            Ok(orientation) => {
                let alternate = orientation.apply(to).map_err(Error::Allele)?;
                Ok((
                    format!("{window}{reference}>{alternate}"),
                    Resolution::Resolved(orientation),
                ))
            }
            Err(strand::Error::Mismatch(mismatch)) => {
                self.on_mismatch(chromosome, window, &mismatch)?;
                Ok((format!("{window}{from}>{to}"), Resolution::Mismatch(mismatch)))
            }
            Err(strand::Error::Allele(err)) => Err(Error::Allele(err)),
        }
    }

    /// Writes the genomic edit for a deletion, duplication, or inversion whose
    /// extent was written out.
    ///
    /// The extent must cover exactly the positions of the change.
    fn extended(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        window: Window,
        keyword: &str,
        extent: &change::Extent,
        fills_reference: bool,
    ) -> Result<(String, Resolution)> {
        let length = match extent {
            change::Extent::Length(length) => *length,
            change::Extent::Allele(allele) => allele.len() as Number,
        };

        if length != window.len() {
            return Err(Error::InvalidPosition(format!(
                "`{keyword}` of {length} nucleotide(s) over a span of {}",
                window.len()
            )));
        }

        let written = |window: Window, reference: &str| match fills_reference {
            true => format!("{window}{keyword}{reference}"),
            false => format!("{window}{keyword}"),
        };

        let allele = match extent {
            change::Extent::Length(_) => {
                return match fills_reference {
                    true => {
                        let reference = self.fetch(assembly, chromosome, window)?;
                        Ok((written(window, reference.as_str()), Resolution::NotApplicable))
                    }
                    false => Ok((written(window, ""), Resolution::NotApplicable)),
                };
            }
            change::Extent::Allele(allele) => allele.as_str(),
        };

        let reference = self.fetch(assembly, chromosome, window)?;

        let mismatch = match strand::reconcile(allele, None, &reference) {
            Ok(orientation) => {
                return Ok((
                    written(window, reference.as_str()),
                    Resolution::Resolved(orientation),
                ));
            }
            Err(strand::Error::Mismatch(mismatch)) => mismatch,
            Err(strand::Error::Allele(err)) => return Err(Error::Allele(err)),
        };

        // VCF-style anchors include the padding base before the allele.
        let shifted = window.shifted().and_then(|shifted| {
            self.fetch(assembly, chromosome, shifted)
                .map(|sequence| (shifted, sequence))
        });

        match shifted {
            Ok((shifted, sequence)) => match strand::reconcile(allele, None, &sequence) {
                Ok(orientation) => {
                    return Ok((
                        written(shifted, sequence.as_str()),
                        Resolution::Resolved(orientation),
                    ));
                }
                Err(strand::Error::Mismatch(_)) => {}
                Err(strand::Error::Allele(err)) => return Err(Error::Allele(err)),
            },
            Err(err) => debug!("shifted window unavailable: {err}"),
        }

        self.on_mismatch(chromosome, window, &mismatch)?;
        Ok((written(window, allele), Resolution::Mismatch(mismatch)))
    }

    /// Translates a transcript change anchored at a genomic position.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::reference::Memory;
    /// use hgvsg::transcript::Builder;
    /// use hgvsg::transcript::Resolution;
    ///
    /// let translator = Builder::default().reference(Memory::default())?.try_build()?;
    ///
    /// let translation =
    ///     translator.translate("X", 129190010, "5035_5036insT", Assembly::GRCh37)?;
    /// assert_eq!(translation.genomic(), "X:g.129190011_129190010insT");
    /// assert_eq!(translation.resolution(), &Resolution::NotApplicable);
    /// assert_eq!(translation.variant().region(), "X:129190011-129190010/T");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn translate(
        &self,
        chromosome: &str,
        position: Number,
        change: &str,
        assembly: Assembly,
    ) -> Result<Translation> {
        let chromosome = chromosome.parse::<Chromosome>().map_err(|_| {
            Error::Parse(genomic::ParseError::UnknownChromosome(chromosome.to_string()))
        })?;

        if position == 0 {
            return Err(Error::InvalidPosition(String::from(
                "genomic positions are 1-based",
            )));
        }

        let change = change.parse::<Change>()?;
        let window = Window::of_length(position, change.span().length()? + 1)?;

        let (edit, resolution) = match change.kind() {
            change::Kind::Substitution { from, to } => {
                self.substitution(assembly, &chromosome, window, from, to)?
            }
            change::Kind::Insertion(alternate) => {
                if window.len() != 2 {
                    return Err(Error::InvalidPosition(format!(
                        "insertion between {} and {} is not between adjacent positions",
                        change.span().start(),
                        change.span().end()
                    )));
                }

                let after = position
                    .checked_add(1)
                    .ok_or_else(|| Error::InvalidPosition(format!("{position} + 1 overflows")))?;
                (
                    format!("{after}_{position}ins{alternate}"),
                    Resolution::NotApplicable,
                )
            }
            change::Kind::Delins(alternate) => {
                (format!("{window}delins{alternate}"), Resolution::NotApplicable)
            }
            change::Kind::Deletion(extent)
            | change::Kind::Duplication(extent)
            | change::Kind::Inversion(extent) => {
                let (keyword, fills_reference) = match change.kind() {
                    change::Kind::Deletion(_) => ("del", true),
                    change::Kind::Duplication(_) => ("dup", true),
                    _ => ("inv", false),
                };

                match extent {
                    Some(extent) => self.extended(
                        assembly,
                        &chromosome,
                        window,
                        keyword,
                        extent,
                        fills_reference,
                    )?,
                    None => (format!("{window}{keyword}"), Resolution::NotApplicable),
                }
            }
        };

        let genomic = format!("{chromosome}:g.{edit}");
        let variant = genomic::Parser::for_assembly(assembly)
            .parse(&genomic)
            .map_err(Error::Parse)?;

        Ok(Translation {
            variant,
            genomic,
            resolution,
        })
    }

    /// Translates a transcript change, logging any failure.
    ///
    /// `use_old_assembly` selects GRCh37 over GRCh38.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::reference::Memory;
    /// use hgvsg::transcript::Builder;
    ///
    /// let translator = Builder::default().reference(Memory::default())?.try_build()?;
    ///
    /// let variant = translator
    ///     .from_transcript_change("5", 149439278, "2094_2117>GC", true)
    ///     .unwrap();
    /// assert_eq!(variant.region(), "5:149439278-149439301/GC");
    ///
    /// assert!(
    ///     translator
    ///         .from_transcript_change("5", 149439278, "p.Arg175His", true)
    ///         .is_none()
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_transcript_change(
        &self,
        chromosome: &str,
        position: Number,
        change: &str,
        use_old_assembly: bool,
    ) -> Option<Variant> {
        let assembly = Assembly::from_old_flag(use_old_assembly);

        match self.translate(chromosome, position, change, assembly) {
            Ok(translation) => Some(translation.into_variant()),
            Err(err) => {
                error!(
                    chromosome,
                    position,
                    change,
                    %assembly,
                    "unable to translate transcript change: {err}"
                );
                None
            }
        }
    }

    /// Lazily translates many queries, skipping (and logging) failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::reference::Memory;
    /// use hgvsg::transcript::Builder;
    /// use hgvsg::transcript::Query;
    ///
    /// let translator = Builder::default().reference(Memory::default())?.try_build()?;
    /// let queries = vec![
    ///     Query::new("X", 129190010, "5035_5036insT"),
    ///     Query::new("MT", 100, "5035_5036insT"),
    /// ];
    ///
    /// let mut batch = translator.translate_all(queries, Assembly::GRCh37);
    /// let variants = batch.by_ref().collect::<Vec<_>>();
    ///
    /// assert_eq!(variants.len(), 1);
    /// assert_eq!(batch.summary().failed(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn translate_all<I>(&self, queries: I, assembly: Assembly) -> Batch<'_, R, I::IntoIter>
    where
        I: IntoIterator<Item = Query>,
    {
        Batch::new(self, queries.into_iter(), assembly)
    }
}
