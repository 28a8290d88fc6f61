//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// Languages the analyzer can lower into its declaration model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    CSharp,
}

impl Language {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext? {
            "cs" => Some(Language::CSharp),
            _ => None,
        }
    }

    /// Returns all file extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::CSharp => &["cs"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_csharp_only() {
        assert_eq!(Language::from_extension(Some("cs")), Some(Language::CSharp));
        assert_eq!(Language::from_extension(Some("vb")), None);
        assert_eq!(Language::from_extension(None), None);
    }
}
