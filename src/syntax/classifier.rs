/*!
 * Discovery of translation-target nodes.
 *
 * Walks the tree in pre-order and yields every string literal, JSX text run
 * and comment whose text contains Japanese script. The walk never descends
 * into a node it has yielded, so no node is reported twice.
 */

use tree_sitter::{Node, TreeCursor};

use super::nodes::{CommentNode, LiteralNode, TextRunNode, TranslatableNode};
use super::tree::SourceTree;
use crate::script_detector::contains_target_script;

// Parent kinds and the field under which they hold a module path rather than text
const MODULE_SPECIFIER_FIELDS: &[(&str, &str)] = &[
    ("import_statement", "source"),
    ("export_statement", "source"),
    ("import_require_clause", "source"),
    ("module", "name"),
];

/// Lazily classify the nodes of `tree`
///
/// Classifying the same unmodified tree again yields the same sequence.
pub fn classify(tree: &SourceTree) -> Candidates<'_> {
    Candidates {
        cursor: tree.root().walk(),
        source: tree.source(),
        finished: false,
    }
}

/// Iterator over the translation-target nodes of a tree
pub struct Candidates<'t> {
    cursor: TreeCursor<'t>,
    source: &'t str,
    finished: bool,
}

enum Visit {
    Yield(TranslatableNode),
    Skip,
    Descend,
}

impl Candidates<'_> {
    fn descend(&mut self) {
        if !self.cursor.goto_first_child() {
            self.skip_subtree();
        }
    }

    fn skip_subtree(&mut self) {
        loop {
            if self.cursor.goto_next_sibling() {
                return;
            }
            if !self.cursor.goto_parent() {
                self.finished = true;
                return;
            }
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = TranslatableNode;

    fn next(&mut self) -> Option<TranslatableNode> {
        while !self.finished {
            match visit(self.cursor.node(), self.source) {
                Visit::Yield(candidate) => {
                    self.skip_subtree();
                    return Some(candidate);
                }
                Visit::Skip => self.skip_subtree(),
                Visit::Descend => self.descend(),
            }
        }
        None
    }
}

fn visit(node: Node<'_>, source: &str) -> Visit {
    let candidate = match node.kind() {
        "string" => {
            if is_module_specifier(node) {
                return Visit::Skip;
            }
            literal(node, source)
        }
        "jsx_text" => Some(TranslatableNode::TextRun(TextRunNode {
            span: node.byte_range(),
        })),
        "comment" => source
            .get(node.byte_range())
            .and_then(|raw| CommentNode::from_raw(node.byte_range(), raw))
            .map(TranslatableNode::Comment),
        // Neither template text nor placeholder contents are translated
        "template_string" => return Visit::Skip,
        _ => return Visit::Descend,
    };

    match candidate {
        Some(candidate) if contains_target_script(&candidate.read_in(source)) => Visit::Yield(candidate),
        _ => Visit::Skip,
    }
}

fn literal(node: Node<'_>, source: &str) -> Option<TranslatableNode> {
    let raw = source.get(node.byte_range())?;
    let quote = raw.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let jsx_attribute = node.parent().is_some_and(|parent| parent.kind() == "jsx_attribute");

    Some(TranslatableNode::Literal(LiteralNode {
        span: node.byte_range(),
        quote,
        jsx_attribute,
    }))
}

fn is_module_specifier(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    MODULE_SPECIFIER_FIELDS
        .iter()
        .filter(|(kind, _)| *kind == parent.kind())
        .any(|(_, field)| parent.child_by_field_name(field) == Some(node))
}
