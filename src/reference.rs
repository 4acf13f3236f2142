//! Access to reference sequence.
//!
//! Translation needs the reference allele at a handful of genomic intervals.
//! Where that sequence comes from is abstracted behind the [`Reference`]
//! trait so that translators can be handed a local store, a remote service,
//! or a fixture in tests.

use omics::coordinate::position::Number;

use crate::Assembly;
use crate::Chromosome;

#[cfg(feature = "http")]
pub mod ensembl;
#[cfg(feature = "http")]
mod http;
pub mod memory;
#[cfg(feature = "http")]
pub mod seqrepo;

#[cfg(feature = "http")]
pub use ensembl::Ensembl;
pub use memory::Memory;
#[cfg(feature = "http")]
pub use seqrepo::SeqRepo;

/// An error related to fetching reference sequence.
#[derive(Debug)]
pub enum Error {
    /// The backing service could not be reached.
    Unavailable(String),

    /// The backing service answered with a non-success status.
    Status {
        /// The requested URL.
        url: String,

        /// The HTTP status code.
        status: u16,
    },

    /// The backing service answered with something that is not a sequence.
    InvalidResponse(String),

    /// The interval has its start after its end.
    InvalidInterval(Number, Number),

    /// No sequence covers the requested interval.
    MissingSequence {
        /// The assembly.
        assembly: Assembly,

        /// The chromosome.
        chromosome: Chromosome,

        /// The 0-based start.
        start: Number,

        /// The 0-based, exclusive end.
        end: Number,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unavailable(reason) => write!(f, "reference service unavailable: {reason}"),
            Error::Status { url, status } => {
                write!(f, "reference service returned status {status} for {url}")
            }
            Error::InvalidResponse(reason) => {
                write!(f, "invalid reference service response: {reason}")
            }
            Error::InvalidInterval(start, end) => {
                write!(f, "invalid interval: start ({start}) is after end ({end})")
            }
            Error::MissingSequence {
                assembly,
                chromosome,
                start,
                end,
            } => write!(
                f,
                "no sequence available for {assembly}:{chromosome}:{start}-{end}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A source of reference sequence.
pub trait Reference {
    /// Fetches the forward-strand sequence for the 0-based, half-open interval
    /// `[start, end)` of a chromosome.
    ///
    /// Implementations return upper-cased sequence.
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String>;
}

impl<R> Reference for &R
where
    R: Reference + ?Sized,
{
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        (**self).fetch(assembly, chromosome, start, end)
    }
}

impl Reference for Box<dyn Reference> {
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        (**self).fetch(assembly, chromosome, start, end)
    }
}

impl Reference for Box<dyn Reference + Send + Sync> {
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        (**self).fetch(assembly, chromosome, start, end)
    }
}

/// Ensures an interval is not inverted.
pub(crate) fn check_interval(start: Number, end: Number) -> Result<()> {
    match start > end {
        true => Err(Error::InvalidInterval(start, end)),
        false => Ok(()),
    }
}
