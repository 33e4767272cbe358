/*!
 * Fan-out/fan-in of translations for one file.
 *
 * The candidate list is frozen before the first request goes out. Requests
 * run concurrently on the calling task, bounded by the translator's
 * concurrency limit, and nothing is written into the tree until every one of
 * them has settled. Results are matched back to candidates by index, so two
 * nodes with identical text still each receive their own result.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use std::path::Path;

use crate::errors::SyntaxError;
use crate::syntax::{NodeKind, SourceTree, TranslatableNode, classify};

use super::client::{RunOptions, TranslationContext, Translator};

/// What happened to one candidate node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub kind: NodeKind,
    /// 1-based line in the original source
    pub line: usize,
    pub original: String,
    pub replacement: String,
}

impl NodeReport {
    /// Whether the node received text different from its original
    pub fn translated(&self) -> bool {
        self.replacement != self.original
    }
}

/// One unit of work: a frozen candidate and the text it carried
struct TranslationTask {
    index: usize,
    node: TranslatableNode,
    original: String,
}

/// Translate every candidate of `tree` and record the results in it
///
/// Returns one report per candidate in source order. Fails only when the tree
/// refuses a replacement, which leaves it partially updated; callers discard
/// the tree in that case.
pub async fn apply_translations(
    tree: &mut SourceTree,
    translator: &Translator,
    options: RunOptions,
    path: &Path,
) -> Result<Vec<NodeReport>, SyntaxError> {
    let tasks: Vec<TranslationTask> = {
        let snapshot: &SourceTree = tree;
        classify(snapshot)
            .enumerate()
            .map(|(index, node)| {
                let original = node.text(snapshot);
                TranslationTask { index, node, original }
            })
            .collect()
    };

    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "{}: {} candidate node(s), up to {} request(s) in flight",
        path.display(),
        tasks.len(),
        translator.concurrency()
    );

    let mut results: Vec<(usize, String)> = stream::iter(tasks.iter())
        .map(|task| async move {
            let context = TranslationContext::new(path, task.node.kind());
            let translated = translator.translate(&task.original, options, &context).await;
            (task.index, translated)
        })
        .buffer_unordered(translator.concurrency())
        .collect()
        .await;

    // Results settle in any order
    results.sort_by_key(|(index, _)| *index);

    let mut reports = Vec::with_capacity(tasks.len());
    for (task, (index, replacement)) in tasks.iter().zip(results) {
        debug_assert_eq!(task.index, index);
        if replacement != task.original {
            task.node.replace(tree, &replacement)?;
        }
        reports.push(NodeReport {
            kind: task.node.kind(),
            line: task.node.line(tree),
            original: task.original.clone(),
            replacement,
        });
    }

    Ok(reports)
}
