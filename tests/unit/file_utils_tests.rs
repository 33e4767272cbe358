/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::PathBuf;

use jasweep::file_utils::FileManager;
use crate::common;

fn extensions() -> Vec<String> {
    vec!["ts".to_string(), "tsx".to_string(), ".js".to_string()]
}

fn excluded() -> Vec<String> {
    vec!["node_modules".to_string(), "dist".to_string()]
}

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "a.ts", "const a = 1;")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

#[test]
fn test_has_extension_shouldIgnoreCaseAndLeadingDot() {
    assert!(FileManager::has_extension("src/App.TSX", &extensions()));
    assert!(FileManager::has_extension("lib/index.js", &extensions()));
    assert!(!FileManager::has_extension("README.md", &extensions()));
    assert!(!FileManager::has_extension("Makefile", &extensions()));
}

#[test]
fn test_find_source_files_withNestedDirs_shouldSkipExcludedAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "src/b.tsx", "")?;
    common::create_test_file(root, "src/a.ts", "")?;
    common::create_test_file(root, "src/notes.md", "")?;
    common::create_test_file(root, "node_modules/pkg/index.js", "")?;
    common::create_test_file(root, "dist/bundle.js", "")?;
    common::create_test_file(root, "lib/util.js", "")?;

    let files = FileManager::find_source_files(&[root], &extensions(), &excluded())?;

    let relative: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(root).map(|p| p.to_path_buf()))
        .collect::<Result<_, _>>()?;
    assert_eq!(
        relative,
        vec![
            PathBuf::from("lib/util.js"),
            PathBuf::from("src/a.ts"),
            PathBuf::from("src/b.tsx"),
        ]
    );

    Ok(())
}

#[test]
fn test_find_source_files_withExplicitFiles_shouldFilterAndDedup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let ts = common::create_test_file(root, "a.ts", "")?;
    let md = common::create_test_file(root, "a.md", "")?;
    let missing = root.join("missing.ts");

    let files = FileManager::find_source_files(
        &[ts.clone(), md, missing, ts.clone()],
        &extensions(),
        &excluded(),
    )?;

    assert_eq!(files, vec![ts]);
    Ok(())
}

#[test]
fn test_write_to_file_shouldCreateParentDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/nested/out.ts");

    FileManager::write_to_file(&target, "export {};\n")?;

    assert_eq!(FileManager::read_to_string(&target)?, "export {};\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_find_source_files_withDanglingSymlink_shouldSkipItAndKeepOthers() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    let valid = common::create_test_file(root, "a.ts", "const a = \"はい\";\n")?;
    std::os::unix::fs::symlink(root.join("gone.ts"), root.join("dangling.ts"))?;

    let files = FileManager::find_source_files(&[root], &extensions(), &excluded())?;

    assert_eq!(files, vec![valid]);
    Ok(())
}
