use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePair {
    pub line: String,
    pub colored: String,
}

/// Matches two folders' worth of exported page scans. Both lists are
/// ordered by the number embedded in each filename ("page_10.png" sorts
/// after "page_2.png"), then paired by position.
pub fn pair_page_files(line_files: &[String], colored_files: &[String]) -> Result<Vec<PagePair>> {
    if line_files.is_empty() {
        return Err(AppError::BadRequest("No page files provided".to_string()));
    }

    if line_files.len() != colored_files.len() {
        return Err(AppError::BadRequest(format!(
            "Mismatched page counts: {} line files, {} colored files",
            line_files.len(),
            colored_files.len()
        )));
    }

    let line_sorted = sort_numerically(line_files)?;
    let colored_sorted = sort_numerically(colored_files)?;

    let pairs = line_sorted
        .into_iter()
        .zip(colored_sorted)
        .map(|(line, colored)| PagePair { line, colored })
        .collect();

    Ok(pairs)
}

fn sort_numerically(files: &[String]) -> Result<Vec<String>> {
    let mut keyed = files
        .iter()
        .map(|name| {
            numeric_key(name)
                .map(|key| (key, name.clone()))
                .ok_or_else(|| {
                    AppError::BadRequest(format!("No page number in filename: {}", name))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort();

    Ok(keyed.into_iter().map(|(_, name)| name).collect())
}

/// First run of digits in the name, e.g. "spread_12_final.png" -> 12.
fn numeric_key(name: &str) -> Option<u64> {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use claims::assert_err;

    use super::{PagePair, numeric_key, pair_page_files};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_by_numeric_order_not_lexicographic() {
        let line = names(&["page_10.png", "page_2.png", "page_1.png"]);
        let colored = names(&["color_2.png", "color_1.png", "color_10.png"]);

        let pairs = pair_page_files(&line, &colored).unwrap();

        assert_eq!(
            pairs,
            vec![
                PagePair {
                    line: "page_1.png".to_string(),
                    colored: "color_1.png".to_string()
                },
                PagePair {
                    line: "page_2.png".to_string(),
                    colored: "color_2.png".to_string()
                },
                PagePair {
                    line: "page_10.png".to_string(),
                    colored: "color_10.png".to_string()
                },
            ]
        );
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let line = names(&["1.png", "2.png"]);
        let colored = names(&["1.png"]);

        assert_err!(pair_page_files(&line, &colored));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_err!(pair_page_files(&[], &[]));
    }

    #[test]
    fn filename_without_digits_is_rejected() {
        let line = names(&["cover.png"]);
        let colored = names(&["1.png"]);

        assert_err!(pair_page_files(&line, &colored));
    }

    #[test]
    fn numeric_key_skips_leading_text() {
        assert_eq!(numeric_key("spread_12_final.png"), Some(12));
        assert_eq!(numeric_key("7.webp"), Some(7));
        assert_eq!(numeric_key("cover.png"), None);
    }
}
