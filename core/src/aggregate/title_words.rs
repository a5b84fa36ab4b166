use crate::catalog::CatalogTable;
use crate::math::FrequencyCounter;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};

pub const DEFAULT_MAX_WORDS: usize = 200;
pub const DEFAULT_MIN_WORD_LEN: usize = 2;

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "an", "and", "are", "as", "at", "be", "but", "by", "for",
    "from", "has", "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "me", "my", "no", "not", "of", "on", "or", "our", "out", "she", "so", "than", "that", "the",
    "their", "them", "then", "there", "they", "this", "to", "up", "vol", "was", "we", "were",
    "what", "when", "where", "which", "who", "why", "will", "with", "you", "your",
];

/// Splits a title into lowercase words, dropping stopwords and short tokens.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter_map(|raw| {
            let word = raw
                .trim_matches(|c: char| c == '\'' || c == '\u{2019}')
                .to_lowercase()
                .replace('\u{2019}', "'");
            let word = word.strip_suffix("'s").unwrap_or(&word).to_string();
            let long_enough = !word.is_empty() && word.chars().count() >= min_len;
            (long_enough && !STOPWORDS.contains(&word.as_str())).then_some(word)
        })
        .collect()
}

/// Word counts over titles of read items, scoped by `date_read`.
pub struct TitleWords {
    max_words: usize,
    min_len: usize,
}

impl TitleWords {
    pub fn new(max_words: usize, min_len: usize) -> Self {
        Self { max_words, min_len }
    }
}

impl Default for TitleWords {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORDS, DEFAULT_MIN_WORD_LEN)
    }
}

impl Aggregation for TitleWords {
    fn metric(&self) -> Metric {
        Metric::TitleWords
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let counter: FrequencyCounter<String> = table
            .records()
            .iter()
            .filter(|record| record.is_read() && record.read_in(year))
            .flat_map(|record| tokenize(&record.title, self.min_len))
            .collect();

        let points = counter
            .into_ranked(Some(self.max_words))
            .into_iter()
            .map(|(word, count)| DatasetPoint::new(Category::Word(word), count as i64))
            .collect();
        DerivedDataset::new(self.metric(), year, points)
    }
}
