//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! The extractor is taken from the first argument (default `article`).
//! Set `RUST_LOG=debug` to see per-filter changes.

use rs_boilerpipe::{extract_reader, Extractor, Options, TextBlock};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct Block<'a> {
    text: &'a str,
    is_content: bool,
    num_words: usize,
    link_density: f64,
    text_density: f64,
    labels: &'a [String],
}

impl<'a> From<&'a TextBlock> for Block<'a> {
    fn from(block: &'a TextBlock) -> Self {
        Self {
            text: block.text(),
            is_content: block.is_content(),
            num_words: block.num_words(),
            link_density: block.link_density(),
            text_density: block.text_density(),
            labels: block.labels(),
        }
    }
}

#[derive(Serialize)]
struct Output<'a> {
    extractor: String,
    title: Option<&'a str>,
    main_content: &'a str,
    low_quality: Option<bool>,
    blocks: Vec<Block<'a>>,
}

fn main() {
    env_logger::init();

    let extractor = match std::env::args().nth(1).map(|name| name.parse::<Extractor>()) {
        None => Extractor::default(),
        Some(Ok(extractor)) => extractor,
        Some(Err(err)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let options = Options {
        extractor,
        ..Options::default()
    };

    let result = match extract_reader(io::stdin().lock(), &options) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let output = Output {
        extractor: extractor.to_string(),
        title: result.title.as_deref(),
        main_content: &result.content_text,
        low_quality: result.low_quality,
        blocks: result.document.text_blocks.iter().map(Block::from).collect(),
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
