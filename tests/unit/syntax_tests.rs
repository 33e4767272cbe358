/*!
 * Tests for parsing, node classification and printing
 */

use anyhow::Result;

use jasweep::syntax::{Dialect, NodeKind, SourceTree, TranslatableNode, classify};

fn candidates(tree: &SourceTree) -> Vec<TranslatableNode> {
    classify(tree).collect()
}

/// Replace every candidate with `text` and print
fn replace_all(source: &str, dialect: Dialect, text: &str) -> Result<String> {
    let mut tree = SourceTree::parse(source, dialect)?;
    for node in candidates(&tree) {
        node.replace(&mut tree, text)?;
    }
    Ok(tree.print()?)
}

#[test]
fn test_literal_replace_shouldKeepQuoteStyleAndEscape() -> Result<()> {
    let output = replace_all("const a = 'こんにちは';\n", Dialect::TypeScript, "it's \"fine\"")?;
    assert_eq!(output, "const a = 'it\\'s \"fine\"';\n");

    let output = replace_all("const a = \"改行\";\n", Dialect::TypeScript, "line\nbreak")?;
    assert_eq!(output, "const a = \"line\\nbreak\";\n");
    Ok(())
}

#[test]
fn test_jsx_attribute_replace_shouldUseEntitiesNotBackslashes() -> Result<()> {
    let output = replace_all("const v = <a title=\"題名\" />;\n", Dialect::Tsx, "Say \"hi\"")?;
    assert_eq!(output, "const v = <a title=\"Say &quot;hi&quot;\" />;\n");
    Ok(())
}

#[test]
fn test_text_run_replace_shouldPadAndEscapeMarkup() -> Result<()> {
    let output = replace_all("const v = <p>説明</p>;\n", Dialect::Tsx, "a < b {c}")?;
    assert_eq!(output, "const v = <p> a &lt; b &#123;c&#125; </p>;\n");
    Ok(())
}

#[test]
fn test_line_comment_replace_shouldFoldNewlines() -> Result<()> {
    let output = replace_all("// エラー\nlet x = 1;\n", Dialect::TypeScript, "first\nsecond")?;
    assert_eq!(output, "// first second \nlet x = 1;\n");
    Ok(())
}

#[test]
fn test_triple_slash_comment_replace_shouldKeepSlashRun() -> Result<()> {
    let output = replace_all("/// 説明\nlet x = 1;\n", Dialect::TypeScript, "Description")?;
    assert_eq!(output, "/// Description \nlet x = 1;\n");
    Ok(())
}

#[test]
fn test_block_comment_replace_shouldKeepOpenerAndDefuseTerminator() -> Result<()> {
    let output = replace_all("/** 説明 */\nlet x = 1;\n", Dialect::TypeScript, "Ends */ here")?;
    assert_eq!(output, "/** Ends * / here */\nlet x = 1;\n");

    let output = replace_all("/*\n * 複数行\n * コメント\n */\nlet x = 1;\n", Dialect::TypeScript, "Note")?;
    assert_eq!(output, "/* Note */\nlet x = 1;\n");
    Ok(())
}

#[test]
fn test_block_comment_read_shouldStripDecorations() -> Result<()> {
    let tree = SourceTree::parse("/*\n * 複数行\n * コメント\n */\n", Dialect::TypeScript)?;
    let nodes = candidates(&tree);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Comment);
    assert_eq!(nodes[0].text(&tree), "複数行\nコメント");
    Ok(())
}

#[test]
fn test_replace_shouldTouchExactlyTheClassifiedNodes() -> Result<()> {
    let source = "// 日本語\n// english\nconst a = \"一\", b = \"two\";\n";
    let output = replace_all(source, Dialect::TypeScript, "X")?;
    assert_eq!(output, "// X \n// english\nconst a = \"X\", b = \"two\";\n");
    Ok(())
}

#[test]
fn test_node_replace_twice_shouldBeRejected() -> Result<()> {
    let mut tree = SourceTree::parse("const a = \"一\";\n", Dialect::TypeScript)?;
    let node = candidates(&tree).remove(0);
    node.replace(&mut tree, "one")?;
    assert!(node.replace(&mut tree, "uno").is_err());
    assert_eq!(tree.print()?, "const a = \"one\";\n");
    Ok(())
}

#[test]
fn test_line_shouldBeOneBased() -> Result<()> {
    let tree = SourceTree::parse("\n\nconst a = \"三行目\";\n", Dialect::TypeScript)?;
    let nodes = candidates(&tree);
    assert_eq!(nodes[0].line(&tree), 3);
    Ok(())
}

#[test]
fn test_parse_withTypeAssertion_shouldDependOnDialect() {
    let source = "const n = <number>value;\n";
    assert!(SourceTree::parse(source, Dialect::TypeScript).is_ok());
    assert!(SourceTree::parse(source, Dialect::Tsx).is_err());
}
