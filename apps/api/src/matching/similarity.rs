//! Similarity Scorer — TF-IDF vector space over `[query] + candidates`,
//! cosine similarity between the query and each candidate.
//!
//! Tokenization: lowercase, runs of word characters (alphanumeric or `_`)
//! at least two characters long, English stop words removed.
//! Weighting: raw term counts × smoothed IDF `ln((1 + n) / (1 + df)) + 1`,
//! each document vector L2-normalized, so cosine reduces to a dot product.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    /// Every document was empty or made only of stop words.
    #[error("corpus yields no vocabulary")]
    EmptyVocabulary,
}

/// Scores each candidate against the query, aligned by index, in `[0, 1]`.
///
/// A degenerate corpus yields zero for every candidate.
pub fn score(query: &str, candidates: &[String]) -> Vec<f64> {
    let mut corpus: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
    corpus.push(query);
    corpus.extend(candidates.iter().map(String::as_str));

    match TfIdfMatrix::fit(&corpus) {
        Ok(matrix) => (1..corpus.len())
            .map(|i| matrix.cosine(0, i).clamp(0.0, 1.0))
            .collect(),
        Err(e) => {
            debug!("Similarity defaults to zero for {} candidates: {e}", candidates.len());
            vec![0.0; candidates.len()]
        }
    }
}

/// Sparse, L2-normalized TF-IDF rows for a fitted corpus.
struct TfIdfMatrix {
    rows: Vec<HashMap<usize, f64>>,
}

impl TfIdfMatrix {
    fn fit(corpus: &[&str]) -> Result<Self, VectorizeError> {
        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<HashMap<usize, f64>> = Vec::with_capacity(corpus.len());

        for doc in corpus {
            let mut row: HashMap<usize, f64> = HashMap::new();
            for token in tokenize(doc) {
                let next = vocab.len();
                let idx = *vocab.entry(token).or_insert(next);
                *row.entry(idx).or_insert(0.0) += 1.0;
            }
            counts.push(row);
        }

        if vocab.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let mut doc_freq = vec![0usize; vocab.len()];
        for row in &counts {
            for &idx in row.keys() {
                doc_freq[idx] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|row| {
                let mut weighted: HashMap<usize, f64> = row
                    .into_iter()
                    .map(|(idx, tf)| (idx, tf * idf[idx]))
                    .collect();
                let norm = weighted.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    weighted.values_mut().for_each(|w| *w /= norm);
                }
                weighted
            })
            .collect();

        Ok(Self { rows })
    }

    /// Dot product of two normalized rows. Zero when either row is empty.
    fn cosine(&self, a: usize, b: usize) -> f64 {
        let (small, large) = if self.rows[a].len() <= self.rows[b].len() {
            (&self.rows[a], &self.rows[b])
        } else {
            (&self.rows[b], &self.rows[a])
        };
        small
            .iter()
            .filter_map(|(idx, w)| large.get(idx).map(|v| w * v))
            .sum()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(String::from)
        .collect()
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];
