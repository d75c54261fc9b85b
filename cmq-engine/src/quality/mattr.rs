//! Moving-Average Type-Token Ratio

use std::collections::HashMap;

/// Mean distinct-word ratio over every window of `window` consecutive words
///
/// Returns 0.0 when the text is not longer than one window. Words are
/// compared exactly as given.
pub fn mattr(words: &[&str], window: usize) -> f64 {
    if window == 0 || words.len() <= window {
        return 0.0;
    }

    let window_count = words.len() - window + 1;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &words[..window] {
        *counts.entry(*word).or_insert(0) += 1;
    }

    let mut total = counts.len() as f64 / window as f64;
    for start in 1..window_count {
        let leaving = words[start - 1];
        if let Some(count) = counts.get_mut(leaving) {
            *count -= 1;
            if *count == 0 {
                counts.remove(leaving);
            }
        }
        *counts.entry(words[start + window - 1]).or_insert(0) += 1;
        total += counts.len() as f64 / window as f64;
    }

    total / window_count as f64
}

/// MATTR over the whitespace-separated words of `text`
pub fn text_mattr(text: &str, window: usize) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    mattr(&words, window)
}
