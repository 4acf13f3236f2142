//! A client for a SeqRepo REST service.
//!
//! The service is usually run locally from the
//! `biocommons/seqrepo-rest-service` image, which serves sequences by alias
//! (for example, `GRCh37:5`).

use std::time::Duration;

use omics::coordinate::position::Number;
use reqwest::blocking::Client;

use crate::Assembly;
use crate::Chromosome;
use crate::reference::Reference;
use crate::reference::Result;
use crate::reference::check_interval;
use crate::reference::http;

/// The default location of a local SeqRepo REST service.
pub const DEFAULT_URL: &str = "http://localhost:5051/seqrepo";

/// A reference backed by a SeqRepo REST service.
#[derive(Clone, Debug)]
pub struct SeqRepo {
    /// The HTTP client.
    client: Client,

    /// The base URL of the service (without a trailing slash).
    base_url: String,
}

impl SeqRepo {
    /// Gets the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Gets the URL for a 0-based, half-open interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    /// use hgvsg::reference::seqrepo::Builder;
    ///
    /// let seqrepo = Builder::default().try_build()?;
    /// assert_eq!(
    ///     seqrepo.url(Assembly::GRCh37, &"X".parse()?, 53239698, 53239700),
    ///     "http://localhost:5051/seqrepo/1/sequence/GRCh37:X?start=53239698&end=53239700"
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
            "{}/1/sequence/{}:{}?start={}&end={}",
            self.base_url, assembly, chromosome, start, end
        )
    }
}

impl Reference for SeqRepo {
    fn fetch(
        &self,
        assembly: Assembly,
        chromosome: &Chromosome,
        start: Number,
        end: Number,
    ) -> Result<String> {
        check_interval(start, end)?;

        let url = self.url(assembly, chromosome, start, end);
        http::get_sequence(&self.client, &url, end - start)
    }
}

/// A builder for a [`SeqRepo`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The base URL.
    base_url: Option<String>,

    /// The request timeout.
    timeout: Option<Duration>,
}

impl Builder {
    /// Sets the base URL of the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes `self` to attempt to build a [`SeqRepo`].
    pub fn try_build(self) -> std::result::Result<SeqRepo, reqwest::Error> {
        let client = http::client(self.timeout.unwrap_or(http::DEFAULT_TIMEOUT))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| String::from(DEFAULT_URL))
            .trim_end_matches('/')
            .to_string();

        Ok(SeqRepo { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_base_url() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let seqrepo = Builder::default()
            .base_url("http://seqrepo.internal:5000/seqrepo/")
            .timeout(Duration::from_secs(5))
            .try_build()?;

        assert_eq!(seqrepo.base_url(), "http://seqrepo.internal:5000/seqrepo");
        assert_eq!(
            seqrepo.url(Assembly::GRCh38, &"17".parse()?, 7673700, 7673701),
            "http://seqrepo.internal:5000/seqrepo/1/sequence/GRCh38:17?start=7673700&end=7673701"
        );

        Ok(())
    }

    #[test]
    fn test_inverted_interval_is_rejected_before_any_request()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        // Nothing listens on this port; the interval check must fail first.
        let seqrepo = Builder::default()
            .base_url("http://127.0.0.1:9")
            .try_build()?;

        let err = seqrepo
            .fetch(Assembly::GRCh37, &"1".parse()?, 10, 5)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid interval: start (10) is after end (5)");

        Ok(())
    }
}
