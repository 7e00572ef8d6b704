//! Reading-table loading.
//!
//! Text tables carry one character per line followed by its readings, most
//! common first, whitespace separated. `#` starts a comment line. Tables
//! compiled with `--compile-readings` end in `.bin` and load straight from
//! bincode.

use anyhow::{Context, Result};
use std::path::Path;
use tongyin_core::TableOracle;

pub fn load(path: &Path) -> Result<TableOracle> {
    if path.extension().and_then(|s| s.to_str()) == Some("bin") {
        return TableOracle::load_bincode(path)
            .map_err(|e| anyhow::anyhow!("loading reading table {}: {}", path.display(), e));
    }
    load_text(path)
}

pub fn load_text(path: &Path) -> Result<TableOracle> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading table {}", path.display()))?;
    Ok(parse(&content))
}

pub fn parse(text: &str) -> TableOracle {
    let mut oracle = TableOracle::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let head = match parts.next() {
            Some(head) => head,
            None => continue,
        };
        let mut chars = head.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => continue,
        };
        oracle.insert(ch, parts);
    }
    oracle
}

#[cfg(test)]
mod tests {
    use super::*;
    use tongyin_core::PronunciationOracle;

    #[test]
    fn parses_lines_and_skips_comments() {
        let table = "# comment\n和 he2 he4 huo2\n\n河 he2\n";
        let oracle = parse(table);
        assert_eq!(oracle.len(), 2);
        assert_eq!(oracle.readings('和'), vec!["he2", "he4", "huo2"]);
        assert_eq!(oracle.primary('河'), Some("he2".to_string()));
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let table = "和河 he2\n和\n河 he2\n";
        let oracle = parse(table);
        // multi-char heads and lines without readings contribute nothing
        assert_eq!(oracle.len(), 1);
        assert_eq!(oracle.primary('河'), Some("he2".to_string()));
    }
}
