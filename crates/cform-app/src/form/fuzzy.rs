//! Fuzzy matching for the select picker filter.

use cform_core::SelectOption;

/// Indices of the options matching `query`, best match first.
///
/// An option matches on its label or its value; the better of the two
/// scores counts. An empty query keeps declared order.
pub fn filter_options(query: &str, options: &[SelectOption]) -> Vec<usize> {
    let query: Vec<char> = query.trim().to_lowercase().chars().collect();
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let mut matches: Vec<(usize, i32)> = options
        .iter()
        .enumerate()
        .filter_map(|(index, option)| {
            let score = match (score(&query, &option.label), score(&query, &option.value)) {
                (Some(a), Some(b)) => a.max(b),
                (a, b) => a.or(b)?,
            };
            Some((index, score))
        })
        .collect();

    // Stable on ties: earlier options first
    matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    matches.into_iter().map(|(index, _)| index).collect()
}

/// Subsequence score of `query` (lowercase) in `target`, or `None` when not
/// every query character is found in order.
fn score(query: &[char], target: &str) -> Option<i32> {
    let chars: Vec<char> = target.chars().collect();
    let mut total = 0;
    let mut next = 0;
    let mut prev: Option<usize> = None;

    for (i, c) in chars.iter().enumerate() {
        if next == query.len() {
            break;
        }
        if !c.to_lowercase().eq(std::iter::once(query[next])) {
            continue;
        }
        total += 10;
        if prev.is_some_and(|p| p + 1 == i) {
            total += 15;
        }
        if i == 0 || !chars[i - 1].is_alphanumeric() {
            total += 10;
        } else if c.is_uppercase() {
            total += 5;
        }
        if i == 0 {
            total += 20;
        }
        prev = Some(i);
        next += 1;
    }

    if next < query.len() {
        return None;
    }
    Some(total - chars.len() as i32 / 5)
}
