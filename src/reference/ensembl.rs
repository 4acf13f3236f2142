//! A client for the Ensembl REST sequence endpoint.

use std::time::Duration;

use omics::coordinate::position::Number;
use reqwest::blocking::Client;

use crate::Assembly;
use crate::Chromosome;
use crate::reference::Reference;
use crate::reference::Result;
use crate::reference::check_interval;
use crate::reference::http;

/// The Ensembl REST server for GRCh38.
pub const GRCH38_URL: &str = "https://rest.ensembl.org";

/// The Ensembl REST server for GRCh37.
pub const GRCH37_URL: &str = "https://grch37.rest.ensembl.org";

/// The species to query.
const SPECIES: &str = "human";

/// A reference backed by the Ensembl REST API.
#[derive(Clone, Debug)]
pub struct Ensembl {
    /// The HTTP client.
    client: Client,

    /// The server for GRCh37.
    grch37_url: String,

    /// The server for GRCh38.
    grch38_url: String,
}

impl Ensembl {
    /// Gets the server for an assembly.
    pub fn server(&self, assembly: Assembly) -> &str {
        match assembly {
            Assembly::GRCh37 => &self.grch37_url,
            Assembly::GRCh38 => &self.grch38_url,
        }
    }

    /// Gets the URL for a 0-based, half-open interval.
    ///
    /// Ensembl regions are 1-based and fully closed, so `[start, end)`
    /// becomes `start + 1..end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::reference::ensembl::Builder;
    ///
    /// let ensembl = Builder::default().try_build()?;
    /// assert_eq!(
    ///     ensembl.url(Assembly::GRCh37, &"17".parse()?, 7577609, 7577610),
    ///     "https://grch37.rest.ensembl.org/sequence/region/human/17:7577610..7577610:1"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn url(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> String {
        format!(
            "{}/sequence/region/{}/{}:{}..{}:1",
            self.server(assembly),
            SPECIES,
            chromosome,
            start + 1,
            end
        )
    }
}

impl Reference for Ensembl {
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        check_interval(start, end)?;

        // Ensembl cannot express an empty region.
        if start == end {
            return Ok(String::new());
        }

        let url = self.url(assembly, chromosome, start, end);
        http::get_sequence(&self.client, &url, end - start)
    }
}

/// A builder for an [`Ensembl`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The server for GRCh37.
    grch37_url: Option<String>,

    /// The server for GRCh38.
    grch38_url: Option<String>,

    /// The request timeout.
    timeout: Option<Duration>,
}

impl Builder {
    /// Sets the server used for an assembly.
    pub fn server(mut self, assembly: Assembly, url: impl Into<String>) -> Self {
        match assembly {
            Assembly::GRCh37 => self.grch37_url = Some(url.into()),
            Assembly::GRCh38 => self.grch38_url = Some(url.into()),
        }

        self
    }

    /// Sets the timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes `self` to attempt to build an [`Ensembl`].
    pub fn try_build(self) -> std::result::Result<Ensembl, reqwest::Error> {
        let client = http::client(self.timeout.unwrap_or(http::DEFAULT_TIMEOUT))?;
        let trim = |url: String| url.trim_end_matches('/').to_string();

        Ok(Ensembl {
            client,
            grch37_url: trim(self.grch37_url.unwrap_or_else(|| String::from(GRCH37_URL))),
            grch38_url: trim(self.grch38_url.unwrap_or_else(|| String::from(GRCH38_URL))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servers() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ensembl = Builder::default()
            .server(Assembly::GRCh38, "http://localhost:3000/")
            .try_build()?;

        assert_eq!(ensembl.server(Assembly::GRCh37), GRCH37_URL);
        assert_eq!(ensembl.server(Assembly::GRCh38), "http://localhost:3000");
        assert_eq!(
            ensembl.url(Assembly::GRCh38, &"X".parse()?, 99, 102),
            "http://localhost:3000/sequence/region/human/X:100..102:1"
        );

        Ok(())
    }

    #[test]
    fn test_empty_interval_needs_no_request() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let ensembl = Builder::default()
            .server(Assembly::GRCh37, "http://127.0.0.1:9")
            .try_build()?;

        assert_eq!(ensembl.fetch(Assembly::GRCh37, &"8".parse()?, 37555623, 37555623)?, "");
        Ok(())
    }
}
