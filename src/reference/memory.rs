//! An in-memory reference made of sparse sequence segments.

use std::collections::HashMap;

use omics::coordinate::position::Number;

use crate::Assembly;
use crate::Chromosome;
use crate::reference::Error;
use crate::reference::Reference;
use crate::reference::Result;
use crate::reference::check_interval;

/// A contiguous stretch of known reference sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Segment {
    /// The 0-based start of the segment.
    start: Number,

    /// The upper-cased sequence.
    sequence: String,
}

impl Segment {
    /// Gets the 0-based, exclusive end of the segment.
    fn end(&self) -> Number {
        self.start + self.sequence.len() as Number
    }

    /// Gets the subsequence for `[start, end)` if the segment covers it.
    fn slice(&self, start: Number, end: Number) -> Option<&str> {
        if start < self.start || end > self.end() {
            return None;
        }

        let from = (start - self.start) as usize;
        let to = (end - self.start) as usize;
        self.sequence.get(from..to)
    }
}

/// A reference held in memory.
///
/// Only the segments that have been added are known; any request reaching
/// outside of a single segment fails with [`Error::MissingSequence`].
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// The segments for each assembly and chromosome.
    segments: HashMap<(Assembly, Chromosome), Vec<Segment>>,
}

impl Memory {
    /// Adds a segment of sequence beginning at the 1-based `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::reference::Memory;
    /// use hgvsg::reference::Reference as _;
    ///
    /// let x = "X".parse()?;
    /// let reference = Memory::default().with_segment(Assembly::GRCh37, x, 53239699, "ac");
    ///
    /// assert_eq!(reference.fetch(Assembly::GRCh37, &x, 53239698, 53239700)?, "AC");
    /// assert!(reference.fetch(Assembly::GRCh38, &x, 53239698, 53239700).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_segment(
        mut self,
        assembly: Assembly,
        chromosome: Chromosome,
        position: Number,
        sequence: impl AsRef<str>,
    ) -> Self {
        self.insert(assembly, chromosome, position, sequence);
        self
    }

    /// Inserts a segment of sequence beginning at the 1-based `position`.
    pub fn insert(
        &mut self,
        assembly: Assembly,
        chromosome: Chromosome,
        position: Number,
        sequence: impl AsRef<str>,
    ) {
        let segment = Segment {
            start: position.saturating_sub(1),
            sequence: sequence.as_ref().to_ascii_uppercase(),
        };

        self.segments
            .entry((assembly, chromosome))
            .or_default()
            .push(segment);
    }
}

impl Reference for Memory {
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        check_interval(start, end)?;

        self.segments
            .get(&(assembly, *chromosome))
            .and_then(|segments| {
                segments
                    .iter()
                    .find_map(|segment| segment.slice(start, end))
            })
            .map(String::from)
            .ok_or(Error::MissingSequence {
                assembly,
                chromosome: *chromosome,
                start,
                end,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_within_segment() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let chromosome = "17".parse::<Chromosome>()?;
        let reference =
            Memory::default().with_segment(Assembly::GRCh37, chromosome, 7577608, "GGTGA");

        assert_eq!(
            reference.fetch(Assembly::GRCh37, &chromosome, 7577609, 7577610)?,
            "T"
        );
        assert_eq!(
            reference.fetch(Assembly::GRCh37, &chromosome, 7577607, 7577612)?,
            "GGTGA"
        );
        assert_eq!(
            reference.fetch(Assembly::GRCh37, &chromosome, 7577609, 7577609)?,
            ""
        );

        Ok(())
    }

    #[test]
    fn test_fetch_outside_segment() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let chromosome = "17".parse::<Chromosome>()?;
        let reference =
            Memory::default().with_segment(Assembly::GRCh37, chromosome, 7577608, "GGTGA");

        let err = reference
            .fetch(Assembly::GRCh37, &chromosome, 7577610, 7577613)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no sequence available for GRCh37:17:7577610-7577613"
        );

        let err = reference
            .fetch(Assembly::GRCh37, &chromosome, 7577612, 7577610)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid interval: start (7577612) is after end (7577610)"
        );

        Ok(())
    }
}
