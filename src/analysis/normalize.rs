//! Text cleaning and stopword filtering.
//!
//! `normalize` = `remove_stopwords(clean_text(..))`. The output holds only
//! lowercase ASCII letters and single spaces, so normalizing twice changes
//! nothing.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").unwrap());
static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Tokens at or below this length are dropped.
const MIN_TOKEN_LEN: usize = 2;

/// Common English words plus boilerplate from the scraped sites.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "to", "of", "in", "a", "is", "that", "for", "on", "it", "with", "as",
        "are", "at", "be", "this", "from", "by", "have", "has", "will", "an", "was", "not",
        "but", "we", "they", "their", "which", "or", "its", "about", "more", "can", "us",
        "new", "one", "would", "also", "source", "twitter", "said", "image", "get", "like",
        "just", "out", "up", "all", "what", "so", "who", "if", "when", "there", "do", "no",
        "been", "year", "years", "time", "other", "some", "into", "over", "after", "cnas",
        "cset", "csis", "report", "analysis", "percent", "than", "could", "may", "should",
        "now", "even", "how", "click", "read", "page", "loading",
    ]
    .into_iter()
    .collect()
});

/// General English function words, applied when ranking network terms.
static ENGLISH_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, drop URLs, drop everything but letters and whitespace, then
/// collapse whitespace.
///
/// URLs are stripped again after the letter filter: dropping punctuation can
/// glue fragments like `ht.tps` into a fresh `https` token.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = URL.replace_all(&lowered, "");
    let letters = NON_ALPHA.replace_all(&no_urls, "");
    let letters = URL.replace_all(&letters, "");
    WHITESPACE.replace_all(&letters, " ").trim().to_string()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

pub fn is_english_stopword(token: &str) -> bool {
    ENGLISH_STOPWORDS.contains(token)
}

/// Keep tokens longer than two characters that are not stopwords.
pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_LEN && !is_stopword(w))
        .join(" ")
}

pub fn normalize(text: &str) -> String {
    remove_stopwords(&clean_text(text))
}
