use std::fmt;
use std::path::Path;

use tree_sitter::{Language, Parser};

use crate::errors::SyntaxError;

/// Grammar used to parse a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain TypeScript, where `<T>expr` is a type assertion
    TypeScript,
    /// TypeScript with JSX, also used for every JavaScript flavour
    Tsx,
}

impl Dialect {
    /// Pick the grammar for a file from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ts" | "mts" | "cts" => Self::TypeScript,
            _ => Self::Tsx,
        }
    }

    /// Tree-sitter language for this dialect
    pub fn language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Create a parser configured for this dialect
    pub fn parser(&self) -> Result<Parser, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language())
            .map_err(|e| SyntaxError::Language {
                dialect: self.to_string(),
                message: e.to_string(),
            })?;
        Ok(parser)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::Tsx => write!(f, "tsx"),
        }
    }
}
