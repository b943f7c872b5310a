//! Shannon entropy over characters

use std::collections::HashMap;

/// Character-level Shannon entropy in bits. Empty input → 0.0
///
/// Terms are summed in first-occurrence order so the float result is
/// stable run to run.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut slots: HashMap<char, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut len = 0usize;

    for c in text.chars() {
        let slot = *slots.entry(c).or_insert_with(|| {
            counts.push(0);
            counts.len() - 1
        });
        counts[slot] += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    let entropy: f64 = counts
        .iter()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum();

    // constant strings sum to -0.0
    if entropy > 0.0 { entropy } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_and_constant() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
    }

    #[test]
    fn test_two_symbols() {
        assert!((shannon_entropy("ab") - 1.0).abs() < EPS);
        assert!((shannon_entropy("aabb") - 1.0).abs() < EPS);
    }

    #[test]
    fn test_uniform_distribution_is_log2_n() {
        let text = "abcdefgh";
        assert!((shannon_entropy(text) - 3.0).abs() < EPS);

        let text: String = ('a'..='z').collect();
        assert!((shannon_entropy(&text) - 26f64.log2()).abs() < EPS);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // two distinct multi-byte chars
        assert!((shannon_entropy("éü") - 1.0).abs() < EPS);
    }
}
