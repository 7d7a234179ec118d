//! Named extractors: fixed, ordered filter compositions.
//!
//! Every filter in a composition always runs; the extractor's result is the
//! OR of all filter results.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::document::TextDocument;
use crate::error::Error;
use crate::filters::{
    BlockProximityFusion, BoilerplateBlockFilter, DensityRulesClassifier, DocumentTitleMatchClassifier,
    ExpandTitleToContentFilter, Filter, IgnoreBlocksAfterContentFilter, KeepLargestBlockFilter,
    MarkEverythingContentFilter, MinClauseWordsFilter, MinWordsFilter, NumWordsRulesClassifier,
    SimpleBlockFusionProcessor, SplitParagraphBlocksFilter, TerminatingBlocksFinder,
};

/// A named filter pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// Equal-density fusion, proximity fusion, density rules.
    Default,
    /// News-article pipeline: end markers, title, word-count rules, largest block.
    #[default]
    Article,
    /// [`Extractor::Article`], then per-paragraph blocks with a full clause.
    ArticleSentences,
    /// The largest block after word-count classification and fusion.
    LargestContent,
    /// Every block is content.
    KeepEverything,
    /// Every block with at least `k` words is content.
    KeepEverythingMinKWords(usize),
    /// Word-count rules alone.
    Canola,
    /// Same pipeline as [`Extractor::Canola`].
    NumWordsRules,
}

impl Extractor {
    /// Runs the pipeline over `doc`, returning whether any filter changed it.
    pub fn process(&self, doc: &mut TextDocument) -> bool {
        match *self {
            Self::Default => run(
                doc,
                &[
                    &SimpleBlockFusionProcessor,
                    &BlockProximityFusion::MAX_DISTANCE_1,
                    &DensityRulesClassifier,
                ],
            ),
            Self::Article => process_article(doc),
            Self::ArticleSentences => {
                process_article(doc)
                    | run(doc, &[&SplitParagraphBlocksFilter, &MinClauseWordsFilter::INSTANCE])
            }
            Self::LargestContent => run(
                doc,
                &[
                    &NumWordsRulesClassifier,
                    &BlockProximityFusion::MAX_DISTANCE_1,
                    &KeepLargestBlockFilter::INSTANCE,
                ],
            ),
            Self::KeepEverything => run(doc, &[&MarkEverythingContentFilter]),
            Self::KeepEverythingMinKWords(k) => run(
                doc,
                &[
                    &SimpleBlockFusionProcessor,
                    &MarkEverythingContentFilter,
                    &MinWordsFilter::new(k),
                ],
            ),
            Self::Canola | Self::NumWordsRules => run(doc, &[&NumWordsRulesClassifier]),
        }
    }
}

fn process_article(doc: &mut TextDocument) -> bool {
    let title = DocumentTitleMatchClassifier::new(doc.title());
    run(
        doc,
        &[
            &TerminatingBlocksFinder,
            &title,
            &NumWordsRulesClassifier,
            &IgnoreBlocksAfterContentFilter::DEFAULT_INSTANCE,
            &BlockProximityFusion::MAX_DISTANCE_1,
            &BoilerplateBlockFilter,
            &BlockProximityFusion::MAX_DISTANCE_1_CONTENT_ONLY,
            &KeepLargestBlockFilter::INSTANCE,
            &ExpandTitleToContentFilter,
        ],
    )
}

fn run(doc: &mut TextDocument, filters: &[&dyn Filter]) -> bool {
    let mut changed = false;
    for filter in filters {
        let filter_changed = filter.process(doc);
        if filter_changed {
            debug!("{} changed the document ({} blocks)", filter.name(), doc.text_blocks.len());
        }
        changed |= filter_changed;
    }
    changed
}

/// Runs `extractor` over `doc`.
pub fn extract_document(doc: &mut TextDocument, extractor: &Extractor) -> bool {
    extractor.process(doc)
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Article => f.write_str("article"),
            Self::ArticleSentences => f.write_str("article-sentences"),
            Self::LargestContent => f.write_str("largest-content"),
            Self::KeepEverything => f.write_str("keep-everything"),
            Self::KeepEverythingMinKWords(k) => write!(f, "keep-everything-min-k-words:{k}"),
            Self::Canola => f.write_str("canola"),
            Self::NumWordsRules => f.write_str("num-words-rules"),
        }
    }
}

impl FromStr for Extractor {
    type Err = Error;

    /// Parses a pipeline name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownExtractor(s.to_string());
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        if let Some(k) = normalized.strip_prefix("keepeverythingminkwords:") {
            return k.trim().parse().map(Self::KeepEverythingMinKWords).map_err(|_| unknown());
        }

        match normalized.as_str() {
            "default" => Ok(Self::Default),
            "article" => Ok(Self::Article),
            "articlesentences" => Ok(Self::ArticleSentences),
            "largestcontent" => Ok(Self::LargestContent),
            "keepeverything" => Ok(Self::KeepEverything),
            "canola" => Ok(Self::Canola),
            "numwordsrules" => Ok(Self::NumWordsRules),
            _ => Err(unknown()),
        }
    }
}
