//! Text normalization pipeline
//!
//! Canonicalizes free text before vectorization: case folding, symbol
//! stripping, whitespace tokenization, stopword removal, then
//! lemmatization followed by Snowball stemming. The linguistic
//! resources are built once and passed explicitly into every call.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// Common English stopwords excluded from scoring
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your",
    "yours", "yourself",
];

// Irregular forms the suffix rules cannot reach. The stemmer folds
// regular inflections ("running" -> "run") on its own.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("ran", "run"),
    ("went", "go"),
    ("gave", "give"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("got", "get"),
    ("gotten", "get"),
    ("built", "build"),
    ("sent", "send"),
    ("kept", "keep"),
    ("held", "hold"),
    ("found", "find"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("data", "datum"),
    ("criteria", "criterion"),
];

/// Immutable linguistic resources for text normalization
///
/// Holds the stemmer and the stopword set. Construct once per process
/// (or per worker) and share by reference; there is no ambient global.
pub struct LinguisticResources {
    stemmer: Stemmer,
    stopwords: HashSet<&'static str>,
}

impl LinguisticResources {
    /// Build the English resource set
    #[must_use]
    pub fn english() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Reduce a token to its dictionary base form
    ///
    /// Irregular-form lookup first, then simple plural suffix rules.
    /// Regular verbal suffixes are left for the stemmer.
    #[must_use]
    pub fn lemmatize<'a>(&self, token: &'a str) -> &'a str {
        for (form, lemma) in IRREGULAR_FORMS {
            if token == *form {
                return lemma;
            }
        }
        // Plural "ies"/"ed"/"ing" suffixes converge inside the stemmer;
        // only strip a plain trailing "s" here.
        if token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("ies")
            && token.len() > 3
        {
            return &token[..token.len() - 1];
        }
        token
    }

    /// Stem a token with the Snowball English stemmer
    #[inline]
    #[must_use]
    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }

    /// Normalize free text into a canonical token string
    ///
    /// Steps, in order: lowercase, delete every character that is not
    /// alphanumeric or whitespace, split on whitespace, drop stopwords,
    /// lemmatize then stem each remaining token, rejoin with single
    /// spaces. Empty input yields an empty string, never an error.
    ///
    /// Deletion (not replacement) keeps punctuated terms as single
    /// tokens: "Sign-On" canonicalizes to "signon", never "sign on".
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        let tokens: Vec<String> = stripped
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .map(|token| self.stem(self.lemmatize(token)))
            .collect();

        tokens.join(" ")
    }
}

impl std::fmt::Debug for LinguisticResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguisticResources")
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self::english()
    }
}
