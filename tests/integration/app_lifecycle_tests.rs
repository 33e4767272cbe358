/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;

use jasweep::app_config::{Config, TranslationProvider};
use jasweep::app_controller::{Controller, RunSummary};
use jasweep::providers::mock::MockProvider;
use jasweep::translation::RunOptions;
use crate::common;

/// Test the controller initialization with a provider that needs no key
#[test]
fn test_controller_with_config_withOllama_shouldInitialize() -> Result<()> {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;

    let controller = Controller::with_config(config)?;

    assert_eq!(controller.translator().provider_name(), "ollama");
    assert_eq!(controller.translator().concurrency(), 8);
    Ok(())
}

#[tokio::test]
async fn test_run_shouldRewriteChangedFilesOnly() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let app = common::create_test_file(root, "src/App.tsx", common::SAMPLE_TSX)?;
    let plain = common::create_test_file(root, "src/math.ts", common::PLAIN_TS)?;
    let vendored = common::create_test_file(root, "node_modules/lib/index.js", "// ライブラリ\n")?;

    let controller = Controller::with_translator(Config::default(), common::translator_for(common::sample_dictionary()));
    let summary = controller.run(&[root.to_path_buf()], RunOptions::default()).await?;

    assert_eq!(
        summary,
        RunSummary {
            files_found: 2,
            files_changed: 1,
            files_unchanged: 1,
            files_failed: 0,
            nodes_found: 5,
            nodes_translated: 5,
            nodes_kept: 0,
        }
    );

    let rewritten = fs::read_to_string(&app)?;
    assert!(rewritten.contains("const label = \"Hello\";"));
    assert!(rewritten.contains("<button title=\"Send\"> Welcome </button>"));
    assert_eq!(fs::read_to_string(&plain)?, common::PLAIN_TS);
    assert_eq!(fs::read_to_string(&vendored)?, "// ライブラリ\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withDryRun_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let app = common::create_test_file(temp_dir.path(), "App.tsx", common::SAMPLE_TSX)?;
    let mock = common::sample_dictionary();

    let controller = Controller::with_translator(Config::default(), common::translator_for(mock.clone()));
    let summary = controller.run(&[app.clone()], RunOptions::dry_run()).await?;

    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.nodes_found, 5);
    assert_eq!(mock.request_count(), 0);
    assert_eq!(fs::read_to_string(&app)?, common::SAMPLE_TSX);
    Ok(())
}

#[tokio::test]
async fn test_run_withBrokenFile_shouldContinueWithOthers() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let broken_source = "const a = \"壊れた\";\nfunction (\n";
    let broken = common::create_test_file(root, "a_broken.ts", broken_source)?;
    let good = common::create_test_file(root, "b_good.ts", "export const s = \"こんにちは\";\n")?;

    let provider = MockProvider::working().with_translation("こんにちは", "Hello");
    let controller = Controller::with_translator(Config::default(), common::translator_for(provider));
    let summary = controller.run(&[root.to_path_buf()], RunOptions::default()).await?;

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_changed, 1);
    assert_eq!(fs::read_to_string(&broken)?, broken_source);
    assert_eq!(fs::read_to_string(&good)?, "export const s = \"Hello\";\n");
    Ok(())
}

#[test]
fn test_run_withNoMatchingFiles_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "README.md", "# 説明\n")?;

    let mock = MockProvider::working();
    let controller = Controller::with_translator(Config::default(), common::translator_for(mock.clone()));
    let summary = tokio_test::block_on(controller.run(&[temp_dir.path().to_path_buf()], RunOptions::default()))?;

    assert_eq!(summary, RunSummary::default());
    assert_eq!(mock.request_count(), 0);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_withDanglingSymlink_shouldStillTranslateOtherFiles() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let valid = common::create_test_file(root, "a.ts", "const a = \"はい\";\n")?;
    std::os::unix::fs::symlink(root.join("missing/target.ts"), root.join("link.ts"))?;

    let provider = MockProvider::working().with_translation("はい", "Yes");
    let controller = Controller::with_translator(Config::default(), common::translator_for(provider));
    let summary = controller.run(&[root.to_path_buf()], RunOptions::default()).await?;

    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.files_changed, 1);
    assert_eq!(fs::read_to_string(&valid)?, "const a = \"Yes\";\n");
    Ok(())
}
