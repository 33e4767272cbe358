/*!
 * Source parsing, node discovery and printing.
 *
 * - `dialect`: grammar selection per file extension
 * - `tree`: parsed file with recorded replacements, printed by splicing
 * - `nodes`: the three kinds of translation-target nodes
 * - `classifier`: lazy discovery of the nodes that carry Japanese text
 */

pub mod classifier;
pub mod dialect;
pub mod nodes;
pub mod tree;

pub use self::classifier::{Candidates, classify};
pub use self::dialect::Dialect;
pub use self::nodes::{CommentStyle, NodeKind, TextPayload, TranslatableNode};
pub use self::tree::SourceTree;
