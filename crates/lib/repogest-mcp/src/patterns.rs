//! Fixed filter tables used for option translation.
//!
//! These values are part of the external contract of the filtered tools and
//! must not drift: callers rely on `analyze_code_files` and `get_repo_docs`
//! selecting exactly these globs and size limits.

use serde::{Deserialize, Serialize};

use rmcp::schemars;

/// Dependency and build-output globs excluded by `analyze_code_files`.
pub const CODE_EXCLUDE_PATTERNS: [&str; 4] = ["node_modules/*", "dist/*", "build/*", "*.min.js"];

/// Per-file size cap for `analyze_code_files`, in bytes.
pub const CODE_MAX_FILE_SIZE: u64 = 102_400;

/// Documentation globs selected by `get_repo_docs`.
pub const DOCS_INCLUDE_PATTERNS: [&str; 5] = ["*.md", "*.mdx", "*.txt", "LICENSE*", "README*"];

/// Per-file size cap for `get_repo_docs`, in bytes.
pub const DOCS_MAX_FILE_SIZE: u64 = 51_200;

/// Content-minimizing size sentinel used by `get_repo_structure`.
pub const STRUCTURE_MAX_FILE_SIZE: u64 = 1;

/// Languages accepted by `analyze_code_files`.
///
/// The set is closed: a value outside it fails parameter validation before
/// the engine is ever invoked. Adding a language is a single arm here plus an
/// entry in [`Language::include_patterns`], with exhaustiveness enforced by
/// the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    Go,
    Rust,
    Java,
    Csharp,
}

impl Language {
    pub const ALL: [Self; 7] = [
        Self::Python,
        Self::Javascript,
        Self::Typescript,
        Self::Go,
        Self::Rust,
        Self::Java,
        Self::Csharp,
    ];

    /// Source-file globs for this language, in precedence order.
    #[must_use]
    pub const fn include_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Python => &["*.py"],
            Self::Javascript => &["*.js", "*.mjs"],
            Self::Typescript => &["*.ts", "*.tsx"],
            Self::Go => &["*.go"],
            Self::Rust => &["*.rs"],
            Self::Java => &["*.java"],
            Self::Csharp => &["*.cs"],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Java => "java",
            Self::Csharp => "csharp",
        }
    }
}
