//! Segment Aligner
//!
//! Pairs units of the original text with units of the translated text for
//! side-by-side display. Alignment is purely positional: the i-th original unit sits
//! next to the i-th translated unit whether or not they correspond. Substitution
//! changes token counts ("heart disease" → one Arabic phrase of two words, "fever" →
//! one word), so word pairs drift; this is a display aid, not a linguistic alignment.

use serde::Serialize;

use crate::engine::data::Granularity;

/// One row of aligned output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedSegmentPair {
    /// Position in the aligned sequence
    pub index: usize,
    pub original_unit: String,
    pub translated_unit: String,
}

/// Split `text` into units of the given granularity
///
/// - Sentence: split on runs of `.`, `!`, `?`; fragments are trimmed and blank ones dropped.
/// - Word: split on runs of whitespace.
pub fn split_units(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Sentence => text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
        Granularity::Word => text.split_whitespace().collect(),
    }
}

/// Align `original` with `translated` unit by unit
///
/// The shorter side is padded with empty units. A pair whose units are both empty is
/// dropped. Indices are renumbered to stay contiguous.
///
/// # Example
///
/// ```ignore
/// let pairs = align("Fever. Cough.", "حمى. سعال.", Granularity::Sentence);
/// assert_eq!(pairs[1].original_unit, "Cough");
/// assert_eq!(pairs[1].translated_unit, "سعال");
/// ```
pub fn align(original: &str, translated: &str, granularity: Granularity) -> Vec<AlignedSegmentPair> {
    let left = split_units(original, granularity);
    let right = split_units(translated, granularity);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            (
                left.get(i).copied().unwrap_or(""),
                right.get(i).copied().unwrap_or(""),
            )
        })
        .filter(|(o, t)| !(o.is_empty() && t.is_empty()))
        .enumerate()
        .map(|(index, (o, t))| AlignedSegmentPair {
            index,
            original_unit: o.to_string(),
            translated_unit: t.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_split() {
        let units = split_units("Fever. Cough!  Pain?? ...", Granularity::Sentence);
        assert_eq!(units, vec!["Fever", "Cough", "Pain"]);
    }

    #[test]
    fn test_word_split() {
        let units = split_units("  heart \n disease\tnow ", Granularity::Word);
        assert_eq!(units, vec!["heart", "disease", "now"]);
    }

    #[test]
    fn test_equal_lengths_pair_up() {
        let pairs = align("Fever. Cough.", "حمى. سعال.", Granularity::Sentence);
        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs[0],
            AlignedSegmentPair {
                index: 0,
                original_unit: "Fever".to_string(),
                translated_unit: "حمى".to_string(),
            }
        );
        assert_eq!(pairs[1].translated_unit, "سعال");
    }

    #[test]
    fn test_shorter_side_is_padded() {
        let pairs = align("a b c", "x", Granularity::Word);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1].original_unit, "b");
        assert_eq!(pairs[1].translated_unit, "");
        assert_eq!(pairs[2].translated_unit, "");

        let pairs = align("a", "x y", Granularity::Word);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].original_unit, "");
        assert_eq!(pairs[1].translated_unit, "y");
    }

    #[test]
    fn test_length_is_max_of_sides() {
        let cases = [
            ("one two three", "واحد"),
            ("one", "واحد اثنان ثلاثة أربعة"),
            ("", "واحد"),
            ("a b", "c d"),
        ];
        for (a, b) in cases {
            let expected = split_units(a, Granularity::Word)
                .len()
                .max(split_units(b, Granularity::Word).len());
            assert_eq!(align(a, b, Granularity::Word).len(), expected);
        }
    }

    #[test]
    fn test_both_empty_yields_nothing() {
        assert!(align("", "", Granularity::Sentence).is_empty());
        assert!(align(" ... ", "!!", Granularity::Sentence).is_empty());
    }

    #[test]
    fn test_indices_are_contiguous() {
        let pairs = align("a. b. c. d.", "x.", Granularity::Sentence);
        let indices: Vec<usize> = pairs.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
