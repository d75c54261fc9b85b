//! Lexicon and suffix based part-of-speech tagger
//!
//! Produces Universal Dependencies coarse tags. Accuracy is far below a
//! statistical model, but the scorer only needs a stable structural
//! signature per sentence: the same sentence shape always yields the same
//! tag sequence, and different shapes usually differ.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "several", "many", "few", "most",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "ours", "theirs", "itself", "themselves",
    "who", "whom", "whose", "which", "what", "one",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
    "about", "across", "after", "against", "along", "among", "around", "before", "behind",
    "below", "beneath", "beside", "between", "beyond", "during", "except", "inside", "near",
    "off", "outside", "through", "throughout", "toward", "towards", "upon", "within", "without",
    "via", "per", "like", "to",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "until", "whether",
    "since", "as", "once", "where", "when",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

const ADVERBS: &[&str] = &[
    "very", "also", "often", "only", "just", "however", "therefore", "thus", "then", "now",
    "here", "there", "quite", "rather", "too", "well", "already", "still", "even", "again",
    "never", "always", "sometimes", "more", "less", "further", "mainly", "mostly",
];

const INTERJECTIONS: &[&str] = &["oh", "wow", "yes", "hello", "hi", "please", "ok", "okay"];

const NUMBER_WORDS: &[&str] = &[
    "zero", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand", "million", "billion", "dozens", "hundreds", "thousands", "millions",
];

/// Verb stems common in dataset descriptions
const VERB_STEMS: &[&str] = &[
    "contain", "include", "provide", "consist", "cover", "describe", "offer", "use", "collect",
    "annotate", "label", "train", "evaluate", "test", "measure", "support", "represent",
    "comprise", "allow", "enable", "make", "show", "give", "take", "get", "help", "build",
    "create", "design", "release", "publish", "study", "focus", "present", "capture", "span",
    "feature", "gather", "record", "compile", "derive", "extract", "aim", "intend", "serve",
    "benchmark", "classify", "detect", "predict", "generate", "translate", "answer",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "al", "ic", "less", "ish", "ary", "est",
];

/// Tag a token sequence
pub fn tag_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<PosTag> {
    let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let previous = if i == 0 { None } else { Some(tokens[i - 1].as_ref()) };
        let mut tag = tag_word(token, i == 0, tags.last().copied());

        // "to" before a verb-like word is an infinitive marker
        if let Some(prev) = previous {
            if prev.eq_ignore_ascii_case("to")
                && matches!(tag, PosTag::Noun | PosTag::Verb)
                && is_verb_like(token)
            {
                if let Some(last) = tags.last_mut() {
                    *last = PosTag::Part;
                }
                tag = PosTag::Verb;
            }
        }

        tags.push(tag);
    }

    tags
}

fn tag_word(token: &str, sentence_start: bool, previous: Option<PosTag>) -> PosTag {
    if token.chars().all(|c| !c.is_alphanumeric()) {
        return if token.chars().all(is_punctuation) {
            PosTag::Punct
        } else {
            PosTag::Sym
        };
    }

    if is_number(token) {
        return PosTag::Num;
    }

    let lower = token.to_lowercase();
    let word = lower.as_str();

    if let Some(tag) = closed_class(word) {
        return tag;
    }

    if !sentence_start && token.chars().next().map_or(false, char::is_uppercase) {
        return PosTag::Propn;
    }
    if token.len() >= 2 && token.chars().all(|c| c.is_uppercase() || c.is_ascii_digit()) {
        return PosTag::Propn;
    }

    if is_verb_like(word) {
        // A bare stem after a determiner or adjective is used as a noun
        let bare_stem = VERB_STEMS.contains(&word);
        return match previous {
            Some(PosTag::Det) | Some(PosTag::Adj) if bare_stem => PosTag::Noun,
            _ => PosTag::Verb,
        };
    }

    if word.ends_with("ly") && word.len() > 4 {
        return PosTag::Adv;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s) && word.len() > s.len() + 2) {
        return PosTag::Adj;
    }
    if word.ends_with("ed") && word.len() > 4 {
        return if matches!(previous, Some(PosTag::Det)) {
            PosTag::Adj
        } else {
            PosTag::Verb
        };
    }
    if word.ends_with("ing") && word.len() > 5 {
        return PosTag::Verb;
    }

    PosTag::Noun
}

fn closed_class(word: &str) -> Option<PosTag> {
    let tables: [(&[&str], PosTag); 10] = [
        (DETERMINERS, PosTag::Det),
        (PRONOUNS, PosTag::Pron),
        (AUXILIARIES, PosTag::Aux),
        (COORDINATORS, PosTag::Cconj),
        (SUBORDINATORS, PosTag::Sconj),
        (ADPOSITIONS, PosTag::Adp),
        (PARTICLES, PosTag::Part),
        (ADVERBS, PosTag::Adv),
        (INTERJECTIONS, PosTag::Intj),
        (NUMBER_WORDS, PosTag::Num),
    ];

    tables
        .iter()
        .find(|(words, _)| words.contains(&word))
        .map(|(_, tag)| *tag)
}

fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_punctuation() && !"$%&+=<>@#^|~".contains(c)
    } else {
        matches!(c, '\u{2018}'..='\u{201F}' | '\u{2010}'..='\u{2015}' | '\u{2026}' | '\u{00AB}' | '\u{00BB}')
    }
}

fn is_number(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '-' | '/'))
}

/// Known verb stem, possibly inflected with -s, -es, -ed, -d or -ing
fn is_verb_like(word: &str) -> bool {
    let word = word.to_lowercase();
    if VERB_STEMS.contains(&word.as_str()) {
        return true;
    }
    ["s", "es", "ed", "d", "ing"].iter().any(|suffix| {
        word.strip_suffix(suffix).map_or(false, |stem| {
            VERB_STEMS.contains(&stem)
                || VERB_STEMS.iter().any(|v| v.strip_suffix('e') == Some(stem))
        })
    })
}
