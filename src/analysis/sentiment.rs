//! Lexicon-based sentiment polarity.
//!
//! Scores follow the pattern/TextBlob scheme: every lexicon word found in the
//! text contributes its polarity, an intensifier directly in front scales it,
//! a negation within the two preceding words flips it and halves it, and the
//! final score is the mean contribution clamped to `[-1, 1]`. Text without
//! any lexicon word scores `0.0`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

/// Multiplier applied to a negated polarity.
const NEGATION_FACTOR: f64 = -0.5;

/// Adjective polarities from the pattern English lexicon. Nouns and verbs
/// carry no polarity, so topical words like `risk` or `sanctions` are neutral.
static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("best", 1.0), ("better", 0.5),
        ("positive", 0.227), ("strong", 0.433), ("stronger", 0.433), ("strongest", 0.433),
        ("successful", 0.75), ("successfully", 0.75), ("effective", 0.6), ("important", 0.4),
        ("significant", 0.375), ("beneficial", 0.5), ("advanced", 0.4), ("innovative", 0.5),
        ("robust", 0.5), ("secure", 0.4), ("safe", 0.5), ("stable", 0.2), ("clear", 0.1),
        ("clearly", 0.1), ("easy", 0.433), ("possible", 0.0), ("able", 0.5), ("free", 0.4),
        ("fair", 0.7), ("open", 0.0), ("promising", 0.5), ("optimistic", 0.5),
        ("confident", 0.5), ("welcome", 0.8), ("cooperative", 0.3), ("valuable", 0.5),
        ("powerful", 0.3), ("smart", 0.214), ("wise", 0.7), ("healthy", 0.5),
        ("productive", 0.4), ("remarkable", 0.75), ("impressive", 1.0), ("top", 0.5),
        ("high", 0.16), ("large", 0.214), ("major", 0.062), ("key", 0.0), ("critical", 0.0),
        ("essential", 0.0), ("necessary", 0.0), ("competitive", 0.2), ("peaceful", 0.4),
        ("right", 0.286), ("correct", 0.3), ("full", 0.35), ("nice", 0.6), ("happy", 0.8),
        ("interesting", 0.5), ("new", 0.136), ("modern", 0.2), ("global", 0.0), ("fast", 0.2),
        ("rapid", 0.2), ("rapidly", 0.2), ("efficient", 0.4), ("reliable", 0.4),
        ("ambitious", 0.4), ("bold", 0.3), ("dominant", 0.2), ("superior", 0.7),
        ("sufficient", 0.3), ("substantial", 0.2), ("enormous", 0.2), ("massive", 0.0),
        // negative
        ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("poor", -0.4), ("negative", -0.3),
        ("weak", -0.375), ("weaker", -0.375), ("difficult", -0.5), ("hard", -0.292),
        ("problematic", -0.4), ("risky", -0.5), ("dangerous", -0.6), ("hostile", -0.5),
        ("aggressive", -0.3), ("adversarial", -0.4), ("worried", -0.4), ("uncertain", -0.2),
        ("unfair", -0.5), ("illegal", -0.5), ("illicit", -0.5), ("costly", -0.3),
        ("expensive", -0.5), ("vulnerable", -0.4), ("limited", -0.071), ("low", 0.0),
        ("lower", 0.0), ("small", -0.25), ("slow", -0.3), ("harmful", -0.5), ("severe", -0.5),
        ("serious", -0.333), ("wrong", -0.5), ("unlikely", -0.3), ("impossible", -0.667),
        ("unable", -0.5), ("disruptive", -0.3), ("restrictive", -0.3), ("punitive", -0.4),
        ("coercive", -0.5), ("fragile", -0.4), ("unstable", -0.4), ("vague", -0.3),
        ("unclear", -0.2), ("complex", -0.1), ("complicated", -0.4), ("terrible", -1.0),
        ("awful", -1.0), ("horrible", -1.0), ("sad", -0.5), ("angry", -0.5), ("evil", -1.0),
        ("corrupt", -0.5), ("malicious", -0.6), ("inferior", -0.5), ("insufficient", -0.4),
        ("inadequate", -0.4), ("excessive", -0.3), ("unprecedented", 0.0),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("highly", 1.3), ("too", 1.3),
        ("most", 1.3), ("deeply", 1.3), ("increasingly", 1.2), ("particularly", 1.2),
        ("especially", 1.2), ("quite", 1.1), ("somewhat", 0.7), ("slightly", 0.5),
        ("relatively", 0.8), ("fairly", 0.8),
    ]
    .into_iter()
    .collect()
});

const NEGATIONS: [&str; 9] = [
    "not", "no", "never", "neither", "nor", "without", "hardly", "cannot", "nothing",
];

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

/// Polarity of `text` in `[-1, 1]`.
pub fn polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

    let contributions: Vec<f64> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            let mut score = *LEXICON.get(token)?;
            let prev = i.checked_sub(1).map(|j| tokens[j]);
            if let Some(factor) = prev.and_then(|p| INTENSIFIERS.get(p)) {
                score *= factor;
            }
            let negated = tokens[i.saturating_sub(2)..i].iter().any(|t| is_negation(t));
            if negated {
                score *= NEGATION_FACTOR;
            }
            Some(score)
        })
        .collect();

    if contributions.is_empty() {
        return 0.0;
    }
    let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
    mean.clamp(-1.0, 1.0)
}
