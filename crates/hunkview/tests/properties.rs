use hunkview::expansion::{expand_lines, hidden_lines_before};
use hunkview::word_diff::tokenize;
use hunkview::{
    compute_word_diff, pair_chunk_lines, parse_unified_diff, DiffFile, ExpandDirection,
    ExpansionState, LineKind, TokenKind,
};
use pretty_assertions::assert_eq;

const MULTI_FILE: &str = r#"commit 4f2a9c1
Author: Dev <dev@example.com>

    Rework config loading

diff --git a/src/config.rs b/src/config.rs
index 1a2b3c4..5d6e7f8 100644
--- a/src/config.rs
+++ b/src/config.rs
@@ -12,9 +12,11 @@ impl Config {
     pub fn load() -> Self {
-        let path = default_path();
-        let text = read(path);
+        let path = resolve_path();
+        let text = read(&path);
+        log::debug!("loaded {}", path);
         parse(text)
     }

-    fn unused() {}
+    fn used() {}
+    fn also_used() {}
 }
@@ -40,4 +42,3 @@ fn parse(text: String) -> Self {
     let mut config = Self::default();
-    config.apply(text);
     config
 }
\ No newline at end of file
diff --git a/assets/logo.png b/assets/logo.png
Binary files a/assets/logo.png and b/assets/logo.png differ
diff --git a/README.md b/README.md
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/README.md
@@ -0,0 +1,2 @@
+# Project
+Intro
"#;

fn count(file: &DiffFile, kind: LineKind) -> usize {
    file.chunks
        .iter()
        .flat_map(|c| &c.lines)
        .filter(|l| l.kind == kind)
        .count()
}

#[test]
fn additions_and_deletions_match_line_kinds() {
    let files = parse_unified_diff(MULTI_FILE);
    let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["src/config.rs", "assets/logo.png", "README.md"]);

    for file in &files {
        assert_eq!(file.additions, count(file, LineKind::Add), "{}", file.path);
        assert_eq!(file.deletions, count(file, LineKind::Remove), "{}", file.path);
    }
    assert_eq!((files[0].additions, files[0].deletions), (5, 4));
    assert!(files[1].chunks.is_empty());
    assert_eq!(files[2].additions, 2);
}

#[test]
fn line_numbers_advance_by_one_per_side() {
    for file in parse_unified_diff(MULTI_FILE) {
        for chunk in &file.chunks {
            let new: Vec<u32> = chunk
                .lines
                .iter()
                .filter(|l| l.kind != LineKind::Remove)
                .filter_map(|l| l.new_line_number)
                .collect();
            let expected_new: Vec<u32> = (0..new.len() as u32).map(|i| chunk.new_start + i).collect();
            assert_eq!(new, expected_new);

            let old: Vec<u32> = chunk
                .lines
                .iter()
                .filter(|l| l.kind != LineKind::Add)
                .filter_map(|l| l.old_line_number)
                .collect();
            let expected_old: Vec<u32> = (0..old.len() as u32).map(|i| chunk.old_start + i).collect();
            assert_eq!(old, expected_old);
        }
    }
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(parse_unified_diff(MULTI_FILE), parse_unified_diff(MULTI_FILE));
}

#[test]
fn word_diff_reconstructs_both_sides() {
    let cases = [
        ("foo bar", "foo baz"),
        ("let x = compute(a, b);", "let y = compute(b, a, c);"),
        ("", "something new"),
        ("gone", ""),
        ("  indented\tline", "indented line  "),
        ("größe := 1", "größe = 2"),
    ];

    for (old, new) in cases {
        let diff = compute_word_diff(old, new);

        let old_tokens: Vec<&str> = diff.removed.iter().map(|t| t.text.as_str()).collect();
        let new_tokens: Vec<&str> = diff.added.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(old_tokens, tokenize(old));
        assert_eq!(new_tokens, tokenize(new));
        assert!(diff.removed.iter().all(|t| t.kind != TokenKind::Added));
        assert!(diff.added.iter().all(|t| t.kind != TokenKind::Removed));

        let common_old: Vec<&str> = diff
            .removed
            .iter()
            .filter(|t| t.kind == TokenKind::Unchanged)
            .map(|t| t.text.as_str())
            .collect();
        let common_new: Vec<&str> = diff
            .added
            .iter()
            .filter(|t| t.kind == TokenKind::Unchanged)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(common_old, common_new, "{old:?} -> {new:?}");
    }
}

#[test]
fn pairing_emits_every_line_once() {
    for file in parse_unified_diff(MULTI_FILE) {
        for chunk in &file.chunks {
            let paired = pair_chunk_lines(chunk);
            assert_eq!(paired.len(), chunk.lines.len());
            for kind in [LineKind::Add, LineKind::Remove, LineKind::Context] {
                assert_eq!(
                    paired.iter().filter(|p| p.line.kind == kind).count(),
                    chunk.count(kind)
                );
            }
            for line in &chunk.lines {
                assert_eq!(
                    paired.iter().filter(|p| std::ptr::eq(p.line, line)).count(),
                    1
                );
            }
        }
    }
}

#[test]
fn expanding_up_stays_within_bounds() {
    let files = parse_unified_diff(MULTI_FILE);
    let file = &files[0];
    let state = ExpansionState::new();

    for len in [0usize, 5, 11, 60] {
        let content: Vec<String> = (1..=len).map(|i| format!("line {i}")).collect();
        for chunk_index in 0..file.chunks.len() {
            let hidden = hidden_lines_before(file, chunk_index, &state);
            for requested in [0u32, 1, 3, 50] {
                let lines = expand_lines(
                    file,
                    chunk_index,
                    ExpandDirection::Up,
                    requested,
                    &content,
                    &state,
                );
                assert!(lines.len() as u32 <= requested.min(hidden));
                for line in &lines {
                    let number = line.new_line_number.unwrap() as usize;
                    assert!(number >= 1 && number <= len);
                    assert_eq!(line.kind, LineKind::Context);
                    assert_eq!(line.old_line_number, line.new_line_number);
                }
            }
        }
    }
}
