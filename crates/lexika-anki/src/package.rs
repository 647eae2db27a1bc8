use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lexika_types::NoteFields;

/// Well-known card fields come first; anything else follows alphabetically.
const CANONICAL_ORDER: [&str; 5] = ["Front", "Back", "Phonetic", "Examples", "Collins"];

/// Writes notes as an Anki text-import package: `#key:value` header lines
/// followed by one tab-separated row per note. Cells render as HTML, so
/// in-field newlines become `<br>`.
pub fn write_package(notes: &[NoteFields], deck_name: &str, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let columns = column_order(notes);

    let mut out = String::new();
    out.push_str("#separator:tab\n");
    out.push_str("#html:true\n");
    out.push_str(&format!("#deck:{deck_name}\n"));
    out.push_str(&format!("#columns:{}\n", columns.join("\t")));

    for note in notes {
        let row: Vec<String> = columns
            .iter()
            .map(|column| note.get(column).map(|v| escape_cell(v)).unwrap_or_default())
            .collect();
        out.push_str(&row.join("\t"));
        out.push('\n');
    }

    fs::write(path, out)
        .with_context(|| format!("Failed to write package file {}", path.display()))
}

fn column_order(notes: &[NoteFields]) -> Vec<String> {
    let mut columns: Vec<String> = CANONICAL_ORDER
        .iter()
        .filter(|c| notes.iter().any(|n| n.contains_key(**c)))
        .map(|c| c.to_string())
        .collect();

    let mut extras: Vec<String> = notes
        .iter()
        .flat_map(|n| n.keys())
        .filter(|k| !CANONICAL_ORDER.contains(&k.as_str()))
        .cloned()
        .collect();
    extras.sort();
    extras.dedup();
    columns.extend(extras);

    columns
}

fn escape_cell(value: &str) -> String {
    value.replace('\t', " ").replace(['\n', '\r'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pairs: &[(&str, &str)]) -> NoteFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn writes_headers_and_escaped_rows() {
        let notes = vec![note(&[
            ("Front", "hello"),
            ("Back", "你好"),
            ("Examples", "1. Hello, world!\n2. Hi."),
        ])];

        let path = std::env::temp_dir().join("lexika_package_test.txt");
        write_package(&notes, "Vocabulary", &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "#separator:tab");
        assert_eq!(lines[1], "#html:true");
        assert_eq!(lines[2], "#deck:Vocabulary");
        assert_eq!(lines[3], "#columns:Front\tBack\tExamples");
        assert_eq!(lines[4], "hello\t你好\t1. Hello, world!<br>2. Hi.");
    }

    #[test]
    fn missing_fields_render_as_empty_cells() {
        let notes = vec![
            note(&[("Front", "a"), ("Back", "甲"), ("Phonetic", "[ei]")]),
            note(&[("Front", "b"), ("Back", "乙")]),
        ];

        let path = std::env::temp_dir().join("lexika_package_sparse_test.txt");
        write_package(&notes, "Vocabulary", &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[3], "#columns:Front\tBack\tPhonetic");
        assert_eq!(lines[5], "b\t乙\t");
    }
}
