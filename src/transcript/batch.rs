//! Translation of many transcript changes at once.
//!
//! Each input is independent: a failed translation is logged and counted,
//! and the batch moves on to the next input.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;
use tracing::error;

use crate::Assembly;
use crate::Variant;
use crate::reference::Reference;
use crate::transcript::Translator;

/// The delimiter between the fields of a [`Query`].
const DELIMITER: char = ':';

/// An error related to parsing a [`Query`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// A field was missing.
    MissingField(&'static str),

    /// The position could not be parsed.
    InvalidPosition(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingField(field) => write!(f, "missing field: {field}"),
            ParseError::InvalidPosition(err) => write!(f, "invalid position: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A single transcript change to translate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    /// The chromosome label.
    chromosome: String,

    /// The 1-based genomic anchor position.
    position: Number,

    /// The transcript-relative change.
    change: String,
}

impl Query {
    /// Creates a new [`Query`].
    pub fn new(chromosome: impl Into<String>, position: Number, change: impl Into<String>) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            change: change.into(),
        }
    }

    /// Gets the chromosome label.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the genomic anchor position.
    pub fn position(&self) -> Number {
        self.position
    }

    /// Gets the transcript-relative change.
    pub fn change(&self) -> &str {
        &self.change
    }
}

impl FromStr for Query {
    type Err = ParseError;

    /// Parses a query written as `chromosome:position:change`.
    ///
    /// The change may itself contain the delimiter (an accession prefix).
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::transcript::batch::Query;
    ///
    /// let query = "17:7577610:NM_000546.5:c.673-2A>G".parse::<Query>()?;
    /// assert_eq!(query.chromosome(), "17");
    /// assert_eq!(query.position(), 7577610);
    /// assert_eq!(query.change(), "NM_000546.5:c.673-2A>G");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.trim().splitn(3, DELIMITER);

        let chromosome = fields
            .next()
            .filter(|field| !field.is_empty())
            .ok_or(ParseError::MissingField("chromosome"))?;
        let position = fields
            .next()
            .ok_or(ParseError::MissingField("position"))?
            .parse::<Number>()
            .map_err(ParseError::InvalidPosition)?;
        let change = fields
            .next()
            .filter(|field| !field.is_empty())
            .ok_or(ParseError::MissingField("change"))?;

        Ok(Query::new(chromosome, position, change))
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.chromosome, self.position, self.change
        )
    }
}

/// Counts of the outcomes of a batch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// The number of successful translations.
    succeeded: usize,

    /// The number of failed translations.
    failed: usize,
}

impl Summary {
    /// Gets the number of successful translations.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Gets the number of failed translations.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Gets the number of attempted translations.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} translated, {} failed",
            self.succeeded, self.failed
        )
    }
}

/// A lazy iterator over the successful translations of a batch.
///
/// Created by [`Translator::translate_all()`].
#[derive(Debug)]
pub struct Batch<'a, R, I> {
    /// The translator.
    translator: &'a Translator<R>,

    /// The remaining queries.
    queries: I,

    /// The assembly of the queries.
    assembly: Assembly,

    /// The outcomes so far.
    summary: Summary,
}

impl<'a, R, I> Batch<'a, R, I> {
    /// Creates a new [`Batch`].
    pub(crate) fn new(translator: &'a Translator<R>, queries: I, assembly: Assembly) -> Self {
        Self {
            translator,
            queries,
            assembly,
            summary: Summary::default(),
        }
    }

    /// Gets the outcomes of the queries consumed so far.
    pub fn summary(&self) -> Summary {
        self.summary
    }
}

impl<R, I> Iterator for Batch<'_, R, I>
where
    R: Reference,
    I: Iterator<Item = Query>,
{
    type Item = Variant;

    fn next(&mut self) -> Option<Self::Item> {
        for query in self.queries.by_ref() {
            match self.translator.translate(
                query.chromosome(),
                query.position(),
                query.change(),
                self.assembly,
            ) {
                Ok(translation) => {
                    self.summary.succeeded += 1;
                    return Some(translation.into_variant());
                }
                Err(err) => {
                    self.summary.failed += 1;
                    error!(
                        chromosome = query.chromosome(),
                        position = query.position(),
                        change = query.change(),
                        "skipping transcript change: {err}"
                    );
                }
            }
        }

        None
    }
}
