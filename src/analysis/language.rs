//! Filename-based language detection.

use std::fmt;
use std::path::Path;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Languages the estimator knows how to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    C,
    Cpp,
    Unknown,
}

/// Block-delimiting convention shared by a group of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// Blocks are delimited by indentation.
    Indentation,
    /// Blocks are delimited by `{` / `}`.
    Brace,
}

/// Lowercased extension (without the dot) to language.
static EXTENSIONS: phf::Map<&'static str, Language> = phf_map! {
    "py" => Language::Python,
    "c" => Language::C,
    "cpp" => Language::Cpp,
    "cc" => Language::Cpp,
    "cxx" => Language::Cpp,
};

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Unknown => "unknown",
        }
    }

    /// The scanning family. `Unknown` is scanned like C++.
    pub fn family(&self) -> LanguageFamily {
        match self {
            Language::Python => LanguageFamily::Indentation,
            Language::C | Language::Cpp | Language::Unknown => LanguageFamily::Brace,
        }
    }

    /// Whether the extension (without dot, any case) names a supported language.
    pub fn is_supported_extension(ext: &str) -> bool {
        EXTENSIONS.contains_key(ext.to_ascii_lowercase().as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve the language of a file from its name.
///
/// An empty filename is treated as Python. Any other name without a
/// recognized extension resolves to [`Language::Unknown`].
pub fn detect_language(filename: &str) -> Language {
    if filename.trim().is_empty() {
        return Language::Python;
    }

    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied())
        .unwrap_or(Language::Unknown)
}
