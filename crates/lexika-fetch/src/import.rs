use lexika_types::WordRecord;

/// Parses a tab-separated export into word records.
///
/// Row layout: `word<TAB>translate[<TAB>sentences[<TAB>mastered]]`. The
/// `sentences` cell holds `\n`-escaped sentence breaks; an empty cell means
/// an empty list, not a list of one empty string. Blank lines and `#`
/// comment lines are skipped, as are rows missing the two required cells.
pub fn parse_tabular(text: &str, source_lang: &str, target_lang: &str) -> Vec<WordRecord> {
    let mut records = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let mut cells = line.split('\t');
        let (Some(word), Some(translate)) = (cells.next(), cells.next()) else {
            tracing::warn!("skipping line {}: fewer than two columns", lineno + 1);
            continue;
        };
        if word.trim().is_empty() || translate.trim().is_empty() {
            tracing::warn!("skipping line {}: empty word or translation", lineno + 1);
            continue;
        }

        let mut record = WordRecord::new(word.trim(), translate.trim(), source_lang, target_lang);
        record.sentences = Some(cells.next().map(split_sentences).unwrap_or_default());
        record.mastered = cells.next().map(parse_flag);

        records.push(record);
    }

    records
}

fn split_sentences(cell: &str) -> Vec<String> {
    cell.replace("\\n", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(cell: &str) -> bool {
    matches!(cell.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
