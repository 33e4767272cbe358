/*!
 * Integration tests for the per-file pipeline
 */

use std::path::Path;

use jasweep::pipeline::{FilePipeline, PipelineState};
use jasweep::providers::mock::MockProvider;
use jasweep::syntax::NodeKind;
use jasweep::translation::RunOptions;
use crate::common;

#[tokio::test]
async fn test_process_source_withGreetingLiteral_shouldTranslateOnlyThatLiteral() {
    let translator = common::translator_for(MockProvider::working().with_translation("こんにちは", "Hello"));
    let pipeline = FilePipeline::new(&translator, RunOptions::default());
    let source = "const greeting = \"こんにちは\";\nconst other = \"world\";\n";

    let outcome = pipeline.process_source(Path::new("greeting.ts"), source.to_string()).await;

    assert_eq!(outcome.state, PipelineState::Printed);
    assert_eq!(outcome.output, "const greeting = \"Hello\";\nconst other = \"world\";\n");
    assert_eq!(outcome.nodes.len(), 1);
    assert_eq!(outcome.nodes[0].kind, NodeKind::Literal);
}

#[tokio::test]
async fn test_process_source_withLineComment_shouldRewriteComment() {
    let translator = common::translator_for(MockProvider::working().with_translation("エラー", "Error"));
    let pipeline = FilePipeline::new(&translator, RunOptions::default());

    let outcome = pipeline
        .process_source(Path::new("error.ts"), "// エラー\nthrow new Error();\n".to_string())
        .await;

    assert_eq!(outcome.output, "// Error \nthrow new Error();\n");
}

#[tokio::test]
async fn test_process_source_withoutJapanese_shouldBeByteIdenticalWithoutRequests() {
    let mock = MockProvider::working();
    let translator = common::translator_for(mock.clone());
    let pipeline = FilePipeline::new(&translator, RunOptions::default());

    let outcome = pipeline
        .process_source(Path::new("plain.ts"), common::PLAIN_TS.to_string())
        .await;

    assert_eq!(outcome.state, PipelineState::Printed);
    assert_eq!(outcome.output, common::PLAIN_TS);
    assert!(!outcome.changed);
    assert!(outcome.nodes.is_empty());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_process_source_withFailingBackend_shouldKeepEveryText() {
    common::init_test_logger();
    let mock = MockProvider::failing();
    let translator = common::translator_for(mock.clone());
    let pipeline = FilePipeline::new(&translator, RunOptions::default());

    let outcome = pipeline
        .process_source(Path::new("App.tsx"), common::SAMPLE_TSX.to_string())
        .await;

    assert_eq!(outcome.state, PipelineState::Printed);
    assert_eq!(outcome.output, common::SAMPLE_TSX);
    assert!(!outcome.changed);
    assert_eq!(outcome.nodes.len(), 5);
    assert!(outcome.nodes.iter().all(|node| !node.translated()));
    // one request per candidate, none retried
    assert_eq!(mock.request_count(), 5);
}

#[tokio::test]
async fn test_process_source_withSampleComponent_shouldTranslateEveryKind() {
    let translator = common::translator_for(common::sample_dictionary());
    let pipeline = FilePipeline::new(&translator, RunOptions::default());

    let outcome = pipeline
        .process_source(Path::new("App.tsx"), common::SAMPLE_TSX.to_string())
        .await;

    let expected = r#"import { useState } from "react";

// Button display 
export function Greeting() {
  const label = "Hello";
  /* Initial value */
  const [count] = useState(0);
  return <button title="Send"> Welcome </button>;
}
"#;
    assert_eq!(outcome.output, expected);

    let kinds: Vec<NodeKind> = outcome.nodes.iter().map(|node| node.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Comment,
            NodeKind::Literal,
            NodeKind::Comment,
            NodeKind::Literal,
            NodeKind::TextRun,
        ]
    );
    let lines: Vec<usize> = outcome.nodes.iter().map(|node| node.line).collect();
    assert_eq!(lines, vec![3, 5, 6, 8, 8]);
}

#[tokio::test]
async fn test_process_source_withDryRun_shouldReportWithoutRequests() {
    let mock = common::sample_dictionary();
    let translator = common::translator_for(mock.clone());
    let pipeline = FilePipeline::new(&translator, RunOptions::dry_run());

    let outcome = pipeline
        .process_source(Path::new("App.tsx"), common::SAMPLE_TSX.to_string())
        .await;

    assert_eq!(mock.request_count(), 0);
    assert_eq!(outcome.state, PipelineState::Printed);
    assert_eq!(outcome.nodes.len(), 5);
    for node in &outcome.nodes {
        assert!(node.replacement.contains(&node.original));
        assert!(node.replacement.starts_with(&format!("[DRY RUN:{}]", node.kind.label())));
    }
}

#[tokio::test]
async fn test_process_source_withOutOfOrderResponses_shouldApplyEachToItsNode() {
    let provider = MockProvider::working()
        .with_translation("最初", "first")
        .with_translation("二番目", "second")
        .with_translation("最後", "last")
        .with_delay("最初", 50)
        .with_delay("二番目", 25);
    let translator = common::translator_for(provider).with_concurrency(3);
    let pipeline = FilePipeline::new(&translator, RunOptions::default());
    let source = "const a = '最初';\n// 二番目\nconst c = <b>最後</b>;\n";

    let outcome = pipeline.process_source(Path::new("order.tsx"), source.to_string()).await;

    assert_eq!(outcome.output, "const a = 'first';\n// second \nconst c = <b> last </b>;\n");
}

#[tokio::test]
async fn test_process_source_withPartialFailures_shouldKeepOnlyFailedTexts() {
    // every second request fails and is not retried
    let provider = MockProvider::intermittent(2)
        .with_translation("一", "one")
        .with_translation("二", "two");
    let translator = common::translator_for(provider).with_concurrency(1);
    let pipeline = FilePipeline::new(&translator, RunOptions::default());

    let outcome = pipeline
        .process_source(Path::new("mixed.ts"), "const a = '一';\nconst b = '二';\n".to_string())
        .await;

    assert_eq!(outcome.output, "const a = 'one';\nconst b = '二';\n");
    assert_eq!(outcome.translated_count(), 1);
}

#[tokio::test]
async fn test_process_source_withUnparsableFile_shouldReturnOriginal() {
    let mock = MockProvider::working();
    let translator = common::translator_for(mock.clone());
    let pipeline = FilePipeline::new(&translator, RunOptions::default());
    let source = "const a = \"壊れた\";\nif (\n";

    let outcome = pipeline.process_source(Path::new("broken.ts"), source.to_string()).await;

    assert!(outcome.is_failed());
    assert_eq!(outcome.output, source);
    assert_eq!(mock.request_count(), 0);
}
