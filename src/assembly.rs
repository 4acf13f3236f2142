//! Human genome assemblies.

use std::str::FromStr;

/// An error related to the parsing of an [`Assembly`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// The value does not name a supported assembly.
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown(value) => write!(f, "unknown assembly: `{value}`"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A supported human genome assembly.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Assembly {
    /// GRCh37 (hg19), the "old" assembly.
    GRCh37,

    /// GRCh38 (hg38).
    #[default]
    GRCh38,
}

impl Assembly {
    /// Maps a "use the old assembly" flag to an [`Assembly`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hgvsg::Assembly;
    ///
    /// assert_eq!(Assembly::from_old_flag(true), Assembly::GRCh37);
    /// assert_eq!(Assembly::from_old_flag(false), Assembly::GRCh38);
    /// ```
    pub fn from_old_flag(use_old_assembly: bool) -> Self {
        match use_old_assembly {
            true => Assembly::GRCh37,
            false => Assembly::GRCh38,
        }
    }

    /// Gets the label of the assembly as understood by sequence services.
    pub fn label(&self) -> &'static str {
        match self {
            Assembly::GRCh37 => "GRCh37",
            Assembly::GRCh38 => "GRCh38",
        }
    }
}

impl FromStr for Assembly {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grch37" | "hg19" | "37" => Ok(Assembly::GRCh37),
            "grch38" | "hg38" | "38" => Ok(Assembly::GRCh38),
            _ => Err(ParseError::Unknown(s.to_string())),
        }
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("GRCh37".parse::<Assembly>()?, Assembly::GRCh37);
        assert_eq!("hg19".parse::<Assembly>()?, Assembly::GRCh37);
        assert_eq!("grch38".parse::<Assembly>()?, Assembly::GRCh38);
        assert_eq!("38".parse::<Assembly>()?, Assembly::GRCh38);

        let err = "hg17".parse::<Assembly>().unwrap_err();
        assert_eq!(err.to_string(), "unknown assembly: `hg17`");

        Ok(())
    }

    #[test]
    fn test_assembly_display() {
        assert_eq!(Assembly::GRCh37.to_string(), "GRCh37");
        assert_eq!(Assembly::GRCh38.to_string(), "GRCh38");
    }
}
