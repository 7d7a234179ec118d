//! Windowed content classifiers over (previous, current, next) blocks.

use super::{classify_windowed, Filter};
use crate::document::{TextBlock, TextDocument};

/// Classifies blocks with a fixed decision tree over link and text density.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityRulesClassifier;

impl DensityRulesClassifier {
    #[must_use]
    pub fn is_content(prev: &TextBlock, curr: &TextBlock, next: &TextBlock) -> bool {
        if curr.link_density() > 0.333_333 {
            false
        } else if prev.link_density() > 0.555_556 {
            next.text_density() > 11.0
        } else if curr.text_density() > 9.0 {
            next.text_density() != 0.0
        } else if next.text_density() > 10.0 {
            true
        } else {
            prev.text_density() > 4.0
        }
    }
}

impl Filter for DensityRulesClassifier {
    fn process(&self, doc: &mut TextDocument) -> bool {
        classify_windowed(doc, Self::is_content)
    }
}

/// Classifies blocks by the word counts of the block and its neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumWordsRulesClassifier;

impl NumWordsRulesClassifier {
    #[must_use]
    pub fn is_content(prev: &TextBlock, curr: &TextBlock, next: &TextBlock) -> bool {
        (curr.link_density() > 0.0 && next.num_words() > 11)
            || curr.num_words() > 19
            || (next.num_words() > 6
                && next.link_density() == 0.0
                && prev.link_density() == 0.0
                && (curr.num_words() > 6 || prev.num_words() > 7 || next.num_words() > 19))
    }
}

impl Filter for NumWordsRulesClassifier {
    fn process(&self, doc: &mut TextDocument) -> bool {
        classify_windowed(doc, Self::is_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::EMPTY_START;
    use crate::filters::test_support::{block, dense_block, doc, flags};

    #[test]
    fn high_link_density_is_never_content() {
        // 10 words, 5 linked: ld = 0.5
        let mut d = doc(vec![block("nav", 10, 5, 0)]);
        DensityRulesClassifier.process(&mut d);
        assert_eq!(flags(&d), vec![false]);

        let dense = dense_block("x", 200, 2, 0);
        let linked = block("y", 30, 15, 1);
        assert!(!DensityRulesClassifier::is_content(&dense, &linked, &dense));
    }

    #[test]
    fn density_tree_branches() {
        let sparse = block("s", 3, 0, 0);
        let dense = block("d", 12, 0, 0);
        let linky = block("l", 10, 6, 0);

        // prev mostly links: needs next density above 11
        assert!(!DensityRulesClassifier::is_content(&linky, &sparse, &block("n", 11, 0, 0)));
        assert!(DensityRulesClassifier::is_content(&linky, &sparse, &dense));
        // dense current: content unless next is empty
        assert!(DensityRulesClassifier::is_content(&EMPTY_START, &dense, &sparse));
        assert!(!DensityRulesClassifier::is_content(&EMPTY_START, &dense, &EMPTY_START));
        // sparse current: dense next, or prev above 4
        assert!(DensityRulesClassifier::is_content(&EMPTY_START, &sparse, &block("n", 11, 0, 0)));
        assert!(DensityRulesClassifier::is_content(&block("p", 5, 0, 0), &sparse, &sparse));
        assert!(!DensityRulesClassifier::is_content(&block("p", 4, 0, 0), &sparse, &sparse));
    }

    #[test]
    fn num_words_rules() {
        let long = block("long", 20, 0, 0);
        let short = block("short", 3, 0, 0);
        let medium = block("medium", 7, 0, 0);
        let linked = block("linked", 5, 1, 0);

        assert!(NumWordsRulesClassifier::is_content(&EMPTY_START, &long, &EMPTY_START));
        assert!(NumWordsRulesClassifier::is_content(&EMPTY_START, &linked, &block("n", 12, 0, 0)));
        assert!(NumWordsRulesClassifier::is_content(&EMPTY_START, &medium, &medium));
        assert!(NumWordsRulesClassifier::is_content(&block("p", 8, 0, 0), &short, &medium));
        assert!(!NumWordsRulesClassifier::is_content(&EMPTY_START, &short, &medium));
        assert!(!NumWordsRulesClassifier::is_content(&linked, &medium, &medium));
    }

    #[test]
    fn reports_change_only_when_flags_flip() {
        let mut d = doc(vec![block("a", 25, 0, 0), block("b", 2, 0, 1)]);
        assert!(NumWordsRulesClassifier.process(&mut d));
        assert_eq!(flags(&d), vec![true, false]);
        assert!(!NumWordsRulesClassifier.process(&mut d));
    }
}
