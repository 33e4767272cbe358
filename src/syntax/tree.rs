/*!
 * Parsed source file with pending replacements.
 *
 * The tree never rewrites itself in place: every replacement is recorded
 * against a byte range of the original text and spliced in when the file is
 * printed. Ranges therefore stay valid for the whole lifetime of the tree, no
 * matter how many sibling nodes were replaced before.
 */

use std::collections::BTreeMap;
use std::ops::Range;

use tree_sitter::{Node, Tree};

use super::dialect::Dialect;
use crate::errors::SyntaxError;

#[derive(Debug, Clone)]
struct Replacement {
    end: usize,
    text: String,
}

/// A source file parsed into a syntax tree
pub struct SourceTree {
    source: String,
    tree: Tree,
    dialect: Dialect,
    replacements: BTreeMap<usize, Replacement>,
}

impl SourceTree {
    /// Parse `source` with the given dialect
    ///
    /// Fails if the parser gives up or the resulting tree contains syntax errors.
    pub fn parse(source: impl Into<String>, dialect: Dialect) -> Result<Self, SyntaxError> {
        let source = source.into();
        let tree = parse_clean(&source, dialect).map_err(|message| SyntaxError::Parse {
            dialect: dialect.to_string(),
            message,
        })?;

        Ok(Self {
            source,
            tree,
            dialect,
            replacements: BTreeMap::new(),
        })
    }

    /// The original, unmodified text
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Root node of the parsed tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether any replacement has been recorded
    pub fn is_modified(&self) -> bool {
        !self.replacements.is_empty()
    }

    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }

    /// Record `text` as the new content of the original byte range `span`
    ///
    /// A range may be replaced once; a replacement overlapping an earlier one is rejected.
    pub fn replace(&mut self, span: Range<usize>, text: String) -> Result<(), SyntaxError> {
        let overlapping = SyntaxError::OverlappingReplacement {
            start: span.start,
            end: span.end,
        };

        if span.start > span.end || span.end > self.source.len() {
            return Err(overlapping);
        }

        // Recorded ranges are disjoint, so the closest one starting before our end
        // is the only one that can reach into our range.
        if let Some((&start, existing)) = self.replacements.range(..span.end.max(span.start + 1)).next_back() {
            if start == span.start || existing.end > span.start {
                return Err(overlapping);
            }
        }

        self.replacements.insert(span.start, Replacement { end: span.end, text });
        Ok(())
    }

    /// Render the tree back to text
    ///
    /// Untouched bytes are copied verbatim. The result is re-parsed to make sure
    /// no replacement broke the file.
    pub fn print(&self) -> Result<String, SyntaxError> {
        if self.replacements.is_empty() {
            return Ok(self.source.clone());
        }

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (&start, replacement) in &self.replacements {
            output.push_str(&self.source[cursor..start]);
            output.push_str(&replacement.text);
            cursor = replacement.end;
        }
        output.push_str(&self.source[cursor..]);

        parse_clean(&output, self.dialect).map_err(|message| SyntaxError::Print {
            dialect: self.dialect.to_string(),
            message,
        })?;

        Ok(output)
    }
}

fn parse_clean(source: &str, dialect: Dialect) -> Result<Tree, String> {
    let mut parser = dialect.parser().map_err(|e| e.to_string())?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| "parser returned no tree".to_string())?;

    let root = tree.root_node();
    if root.has_error() {
        let message = match first_error(root) {
            Some(node) => {
                let position = node.start_position();
                format!(
                    "syntax error at line {}, column {}",
                    position.row + 1,
                    position.column + 1
                )
            }
            None => "syntax error".to_string(),
        };
        return Err(message);
    }

    Ok(tree)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}
