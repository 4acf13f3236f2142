//! Shared plumbing for the HTTP-backed references.

use std::time::Duration;

use omics::coordinate::position::Number;
use reqwest::blocking::Client;
use tracing::debug;

use crate::reference::Error;
use crate::reference::Result;

/// The default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds a blocking client with the provided timeout.
pub(crate) fn client(timeout: Duration) -> std::result::Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Requests `url` and interprets the body as a plain sequence of `expected`
/// length.
pub(crate) fn get_sequence(client: &Client, url: &str, expected: Number) -> Result<String> {
    debug!("requesting reference sequence: {url}");

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/plain")
        .send()
        .map_err(|err| Error::Unavailable(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .map_err(|err| Error::InvalidResponse(err.to_string()))?;

    parse_sequence(&body, expected)
}

/// Parses a plain-text sequence body.
pub(crate) fn parse_sequence(body: &str, expected: Number) -> Result<String> {
    let sequence = body.trim().to_ascii_uppercase();

    if let Some(c) = sequence.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(Error::InvalidResponse(format!(
            "unexpected character `{c}` in sequence"
        )));
    }

    if sequence.len() as Number != expected {
        return Err(Error::InvalidResponse(format!(
            "expected {expected} nucleotides, found {}",
            sequence.len()
        )));
    }

    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(parse_sequence("acGT\n", 4)?, "ACGT");

        let err = parse_sequence("AC GT", 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid reference service response: unexpected character ` ` in sequence"
        );

        let err = parse_sequence("ACG", 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid reference service response: expected 4 nucleotides, found 3"
        );

        Ok(())
    }
}
