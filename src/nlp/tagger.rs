//! Part-of-speech tagging.
//!
//! The outline pipeline only needs to know whether a phrase contains a
//! content-bearing word class, so the tag set is coarse. [`PosTagger`] is
//! the seam: any tagger producing one [`PosTag`] per token can be plugged
//! into the heading classifier.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Coarse part-of-speech classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Lexical verb (any inflection)
    Verb,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Forms of be/have/do
    Auxiliary,
    /// Modal verb
    Modal,
    /// Pronoun
    Pronoun,
    /// Determiner
    Determiner,
    /// Preposition or subordinating conjunction
    Preposition,
    /// Coordinating conjunction
    Conjunction,
    /// Cardinal number, numeral word or roman numeral
    Numeral,
    /// Infinitival "to" and similar particles
    Particle,
    /// Punctuation mark
    Punctuation,
    /// Any other symbol
    Symbol,
}

impl PosTag {
    /// Whether the class carries content: nouns, proper nouns, verbs and adjectives.
    pub fn is_content_bearing(self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Verb | PosTag::Adjective
        )
    }

    /// The closest Penn Treebank tag, for diagnostics.
    pub fn penn(self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::ProperNoun => "NNP",
            PosTag::Verb => "VB",
            PosTag::Adjective => "JJ",
            PosTag::Adverb => "RB",
            PosTag::Auxiliary => "VBZ",
            PosTag::Modal => "MD",
            PosTag::Pronoun => "PRP",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Conjunction => "CC",
            PosTag::Numeral => "CD",
            PosTag::Particle => "TO",
            PosTag::Punctuation => ".",
            PosTag::Symbol => "SYM",
        }
    }
}

/// Assigns one tag per token.
pub trait PosTagger: Send + Sync {
    /// Tag a token sequence. The result has the same length as `tokens`.
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag>;
}

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d.,/%\-]*\d[\d.,/%\-]*$").expect("numeric pattern is valid"));

static ROMAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$")
        .expect("roman numeral pattern is valid")
});

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
    "some", "any", "no", "all", "both", "another", "such", "what", "which", "whose", "whatever",
    "whichever", "few", "several", "many", "much", "other", "own", "same",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
    "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "who",
    "whom", "someone", "anyone", "everyone", "nobody", "somebody", "anybody", "everybody",
    "something", "anything", "everything", "nothing",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "out",
    "off", "over", "under", "upon", "within", "without", "among", "across", "toward", "towards",
    "via", "per", "than", "since", "until", "till", "onto", "beyond", "despite", "throughout",
    "along", "around", "behind", "beneath", "beside", "besides", "near", "unlike", "inside",
    "outside", "amid", "versus", "vs", "if", "because", "while", "whereas", "although",
    "though", "unless", "whether", "as",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus", "&"];

const PARTICLES: &[&str] = &["to"];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would", "ought",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing",
];

const ADVERBS: &[&str] = &[
    "not", "very", "also", "too", "just", "only", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "now", "more", "most", "less", "least", "so",
    "quite", "rather", "always", "never", "often", "still", "already", "soon", "ever",
    "however", "thus", "therefore", "hence", "well", "almost", "even", "else",
];

const NUMERAL_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
    "billion",
];

/// Words ending in "-ly" that are not adverbs.
const LY_NOUNS: &[&str] = &[
    "family", "supply", "apply", "reply", "assembly", "anomaly", "rally", "ally", "fly",
    "italy", "july", "butterfly", "monopoly", "melancholy",
];
const LY_ADJECTIVES: &[&str] = &[
    "early", "daily", "weekly", "monthly", "quarterly", "yearly", "likely", "unlikely",
    "friendly", "costly", "timely", "elderly", "lonely", "only",
];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify", "ate"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "al", "ic", "less", "ish", "ary", "ant", "ent",
];

/// A dictionary-and-suffix tagger for English.
///
/// Closed-class words come from a lexicon; numbers and roman numerals are
/// recognised by shape; capitalized unknown words are proper nouns and
/// lowercase unknown words are classified by suffix, defaulting to noun.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<String, PosTag>,
}

impl LexiconTagger {
    /// Create a tagger with the built-in English lexicon.
    pub fn new() -> Self {
        let groups: [(&[&str], PosTag); 9] = [
            (DETERMINERS, PosTag::Determiner),
            (PRONOUNS, PosTag::Pronoun),
            (PREPOSITIONS, PosTag::Preposition),
            (CONJUNCTIONS, PosTag::Conjunction),
            (MODALS, PosTag::Modal),
            (AUXILIARIES, PosTag::Auxiliary),
            (ADVERBS, PosTag::Adverb),
            (NUMERAL_WORDS, PosTag::Numeral),
            (PARTICLES, PosTag::Particle),
        ];

        let mut lexicon = HashMap::new();
        for (words, tag) in groups {
            for word in words {
                lexicon.entry(word.to_string()).or_insert(tag);
            }
        }
        for word in LY_NOUNS {
            lexicon.insert(word.to_string(), PosTag::Noun);
        }
        for word in LY_ADJECTIVES {
            lexicon.entry(word.to_string()).or_insert(PosTag::Adjective);
        }

        Self { lexicon }
    }

    /// Add or override a lexicon entry.
    pub fn with_word(mut self, word: &str, tag: PosTag) -> Self {
        self.lexicon.insert(word.to_lowercase(), tag);
        self
    }

    fn tag_word(&self, token: &str) -> PosTag {
        if !token.chars().any(char::is_alphanumeric) {
            return if token.chars().all(|c| c.is_ascii_punctuation() || is_unicode_punct(c)) {
                PosTag::Punctuation
            } else {
                PosTag::Symbol
            };
        }

        if NUMERIC.is_match(token) {
            return PosTag::Numeral;
        }
        if token.len() >= 2 && ROMAN.is_match(token) {
            return PosTag::Numeral;
        }

        let lower = token.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return *tag;
        }

        if token.chars().next().is_some_and(char::is_uppercase) {
            return PosTag::ProperNoun;
        }

        suffix_tag(&lower)
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        tokens.iter().map(|t| self.tag_word(t)).collect()
    }
}

fn suffix_tag(word: &str) -> PosTag {
    let len = word.chars().count();
    if len > 4 && word.ends_with("ly") {
        return PosTag::Adverb;
    }
    if len > 4 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Verb;
    }
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Adjective;
    }
    PosTag::Noun
}

fn is_unicode_punct(c: char) -> bool {
    matches!(
        c,
        '–' | '—' | '‘' | '’' | '“' | '”' | '…' | '•' | '·' | '«' | '»' | '¿' | '¡'
    )
}
