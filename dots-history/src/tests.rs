//! Tests for history parsing and merging.

use super::*;
use std::fs;
use tempfile::tempdir;

fn init() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn commands(map: &HistoryMap) -> Vec<&str> {
    map.sorted().iter().map(|e| e.command.as_str()).collect()
}

fn entry(command: &str, when: i64) -> HistoryEntry {
    HistoryEntry::new(command).with_when(when)
}

#[test]
fn test_parse_empty() -> anyhow::Result<()> {
    init();
    assert!(parse_history("")?.is_empty());
    assert!(parse_history("\n\n")?.is_empty());
    Ok(())
}

#[test]
fn test_parse_entries() -> anyhow::Result<()> {
    init();
    let content = "\
- cmd: cd ~/src
  when: 1700000000
  paths:
    - ~/src
- cmd: echo \"it's fine\" | grep -v '- cmd: '
  when: 1700000001
- cmd: make
";
    let map = parse_history(content)?;

    assert_eq!(map.len(), 3);
    assert_eq!(
        map.get("cd ~/src"),
        Some(&entry("cd ~/src", 1700000000).with_paths(["~/src"]))
    );
    assert_eq!(
        map.get("echo \"it's fine\" | grep -v '- cmd: '")
            .and_then(|e| e.when),
        Some(1700000001)
    );
    assert_eq!(map.get("make"), Some(&HistoryEntry::new("make")));
    Ok(())
}

#[test]
fn test_parse_then_serialize_preserves_fields() -> anyhow::Result<()> {
    init();
    let content = "\
- cmd: ls
  when: 1700000000
- cmd: vim notes.md
  when: 1700000005
  paths:
    - notes.md
    - ../other.md
- cmd: git status
  when: 1700000009
";
    let map = parse_history(content)?;
    assert_eq!(map.to_history_string(), content);
    Ok(())
}

#[test]
fn test_parse_duplicate_keeps_latest() -> anyhow::Result<()> {
    init();
    let content = "\
- cmd: ls
  when: 1700000000
- cmd: ls
  when: 1700000002
- cmd: ls
  when: 1700000001
";
    let map = parse_history(content)?;
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("ls").and_then(|e| e.when), Some(1700000002));
    Ok(())
}

#[test]
fn test_parse_duplicate_tie_keeps_first() -> anyhow::Result<()> {
    init();
    let content = "\
- cmd: vim
  when: 5
  paths:
    - first
- cmd: vim
  when: 5
  paths:
    - second
";
    let map = parse_history(content)?;
    assert_eq!(
        map.get("vim").map(|e| e.paths.clone()),
        Some(vec!["first".to_string()])
    );
    Ok(())
}

#[test]
fn test_parse_paths_end_at_unmatched_line() -> anyhow::Result<()> {
    init();
    let content = "\
- cmd: cp a b
  paths:
    - a
    - b
  when: 42
";
    let map = parse_history(content)?;
    assert_eq!(
        map.get("cp a b"),
        Some(&entry("cp a b", 42).with_paths(["a", "b"]))
    );
    Ok(())
}

#[test]
fn test_parse_ignores_unknown_lines() -> anyhow::Result<()> {
    init();
    let content = "\
garbage before any entry
  when: 99
- cmd: ls
  unknown: field
      - deeply indented
  when: 7
";
    let map = parse_history(content)?;
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("ls"), Some(&entry("ls", 7)));
    Ok(())
}

#[test]
fn test_parse_keeps_command_verbatim() -> anyhow::Result<()> {
    init();
    let map = parse_history("- cmd:   padded  \n  when: 1\n")?;
    assert!(map.get("  padded  ").is_some());
    Ok(())
}

#[test]
fn test_parse_crlf() -> anyhow::Result<()> {
    init();
    let map = parse_history("- cmd: ls\r\n  when: 3\r\n")?;
    assert_eq!(map.get("ls"), Some(&entry("ls", 3)));
    Ok(())
}

#[test]
fn test_parse_invalid_timestamp() {
    init();
    let result = parse_history("- cmd: ls\n  when: yesterday\n");
    match result {
        Err(HistoryError::InvalidTimestamp { line, value }) => {
            assert_eq!(line, 2);
            assert_eq!(value, "yesterday");
        }
        other => panic!("expected invalid timestamp, got {other:?}"),
    }
}

#[test]
fn test_parse_timestamp_with_underscores() -> anyhow::Result<()> {
    init();
    let map = parse_history("- cmd: ls\n  when: 1_700_000_000\n")?;
    assert_eq!(map.get("ls").and_then(|e| e.when), Some(1700000000));
    assert_eq!(map.to_history_string(), "- cmd: ls\n  when: 1700000000\n");
    Ok(())
}

#[test]
fn test_parse_rejects_malformed_or_out_of_range_timestamps() {
    init();
    for value in ["_1", "1_", "1__7", "+_1", "99999999999999999999", "1_7x"] {
        let content = format!("- cmd: ls\n  when: {value}\n");
        assert!(
            matches!(
                parse_history(&content),
                Err(HistoryError::InvalidTimestamp { .. })
            ),
            "when: {value}"
        );
    }
}

#[test]
fn test_load_or_empty_swallows_errors() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;

    let missing = dir.path().join("missing");
    assert!(HistoryMap::load(&missing).is_err());
    assert!(HistoryMap::load_or_empty(&missing).is_empty());

    let malformed = dir.path().join("malformed");
    fs::write(&malformed, "- cmd: ls\n  when: 1\n- cmd: pwd\n  when: soon\n")?;
    assert!(HistoryMap::load_or_empty(&malformed).is_empty());
    Ok(())
}

#[test]
fn test_merge_orders_by_timestamp() {
    init();
    let local: HistoryMap = vec![entry("ls", 1700000000), entry("pwd", 1700000002)]
        .into_iter()
        .collect();
    let remote: HistoryMap = vec![entry("echo hello", 1700000001), entry("cd /tmp", 1700000003)]
        .into_iter()
        .collect();

    let merged = HistoryMap::merge(local, remote);
    assert_eq!(commands(&merged), vec!["ls", "echo hello", "pwd", "cd /tmp"]);
}

#[test]
fn test_merge_newest_wins_either_direction() {
    init();
    let a: HistoryMap = vec![entry("ls", 10), entry("make", 30)].into_iter().collect();
    let b: HistoryMap = vec![entry("ls", 20), entry("make", 5)].into_iter().collect();

    let ab = HistoryMap::merge(a.clone(), b.clone());
    let ba = HistoryMap::merge(b, a);

    for merged in [&ab, &ba] {
        assert_eq!(merged.get("ls").and_then(|e| e.when), Some(20));
        assert_eq!(merged.get("make").and_then(|e| e.when), Some(30));
    }
}

#[test]
fn test_merge_tie_keeps_local() {
    init();
    let local: HistoryMap = vec![entry("vim", 7).with_paths(["local"])]
        .into_iter()
        .collect();
    let remote: HistoryMap = vec![entry("vim", 7).with_paths(["remote"])]
        .into_iter()
        .collect();

    let merged = HistoryMap::merge(local, remote);
    assert_eq!(
        merged.get("vim").map(|e| e.paths.clone()),
        Some(vec!["local".to_string()])
    );
}

#[test]
fn test_merge_equal_timestamps_keep_insertion_order() {
    init();
    let local: HistoryMap = vec![entry("b", 1), entry("a", 1)].into_iter().collect();
    let remote: HistoryMap = vec![entry("d", 1), entry("c", 0)].into_iter().collect();

    let merged = HistoryMap::merge(local, remote);
    assert_eq!(commands(&merged), vec!["c", "b", "a", "d"]);
}

#[test]
fn test_merge_histories_files() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let local = dir.path().join("local");
    let remote = dir.path().join("remote");
    let output = dir.path().join("merged");

    fs::write(
        &local,
        "- cmd: ls\n  when: 1700000000\n- cmd: pwd\n  when: 1700000002\n",
    )?;
    fs::write(
        &remote,
        "- cmd: echo hello\n  when: 1700000001\n- cmd: cd /tmp\n  when: 1700000003\n  paths:\n    - /tmp\n",
    )?;

    assert!(merge_histories(&local, &remote, &output));
    assert_eq!(
        fs::read_to_string(&output)?,
        "\
- cmd: ls
  when: 1700000000
- cmd: echo hello
  when: 1700000001
- cmd: pwd
  when: 1700000002
- cmd: cd /tmp
  when: 1700000003
  paths:
    - /tmp
"
    );
    Ok(())
}

#[test]
fn test_merge_with_empty_remote_reproduces_local() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let local = dir.path().join("local");
    let remote = dir.path().join("remote");
    let output = dir.path().join("merged");

    let content = "\
- cmd: ls
  when: 1
- cmd: git log
  when: 2
  paths:
    - .
";
    fs::write(&local, content)?;
    fs::write(&remote, "")?;

    assert!(merge_histories(&local, &remote, &output));
    assert_eq!(fs::read_to_string(&output)?, content);
    Ok(())
}

#[test]
fn test_merge_two_empty_files() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let local = dir.path().join("local");
    let remote = dir.path().join("remote");
    let output = dir.path().join("merged");
    fs::write(&local, "")?;
    fs::write(&remote, "")?;

    assert!(merge_histories(&local, &remote, &output));
    assert_eq!(fs::read_to_string(&output)?, "");
    Ok(())
}

#[test]
fn test_merge_histories_write_failure() -> anyhow::Result<()> {
    init();
    let dir = tempdir()?;
    let local = dir.path().join("local");
    fs::write(&local, "- cmd: ls\n  when: 1\n")?;

    let output = dir.path().join("no-such-dir").join("merged");
    assert!(!merge_histories(&local, &local, &output));
    assert!(!output.exists());
    Ok(())
}
