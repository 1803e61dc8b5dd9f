//! Porter stemming algorithm implementation.
//!
//! The classic 1980 algorithm by Martin Porter, applied to lowercase ASCII
//! words. It rewrites suffixes in five steps:
//! 1. Plurals, -ed/-ing, terminal -y
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc. when the stem is long enough
//! 5. Remove final -e and reduce -ll
//!
//! Words of one or two letters and words containing anything other than
//! ASCII letters are returned unchanged (lowercased).
//!
//! # Examples
//!
//! ```
//! use curio::analysis::token_filter::stem::Stemmer;
//! use curio::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("adventure"), "adventur");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word;
        }

        let mut state = StemState::new(word.into_bytes());
        state.step1ab();
        state.step1c();
        state.step2();
        state.step3();
        state.step4();
        state.step5();
        state.into_string()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working buffer for one word.
///
/// `b` always holds the current word; `j` is the exclusive end of the stem
/// left after the most recent successful `ends` match.
struct StemState {
    b: Vec<u8>,
    j: usize,
}

impl StemState {
    fn new(b: Vec<u8>) -> Self {
        let j = b.len();
        StemState { b, j }
    }

    fn into_string(self) -> String {
        // Only ASCII bytes are ever written into the buffer.
        String::from_utf8_lossy(&self.b).into_owned()
    }

    fn len(&self) -> usize {
        self.b.len()
    }

    /// Whether `b[i]` is a consonant. `y` is a consonant at the start of a
    /// word or after a vowel.
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..j]`.
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;

        while i < self.j && self.is_consonant(i) {
            i += 1;
        }

        loop {
            while i < self.j && !self.is_consonant(i) {
                i += 1;
            }
            if i >= self.j {
                return n;
            }
            n += 1;
            while i < self.j && self.is_consonant(i) {
                i += 1;
            }
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    /// Whether `b[i-1..=i]` is a double consonant.
    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.is_consonant(i)
    }

    /// Whether `b[i-2..=i]` is consonant-vowel-consonant with the last
    /// consonant not `w`, `x` or `y`.
    fn cvc(&self, i: usize) -> bool {
        if i < 2
            || !self.is_consonant(i)
            || self.is_consonant(i - 1)
            || !self.is_consonant(i - 2)
        {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let suffix = suffix.as_bytes();
        if suffix.len() > self.len() || !self.b.ends_with(suffix) {
            return false;
        }
        self.j = self.len() - suffix.len();
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    fn truncate(&mut self, len: usize) {
        self.b.truncate(len);
    }

    fn step1ab(&mut self) {
        if self.b.last() == Some(&b's') {
            if self.ends("sses") {
                self.truncate(self.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.len() - 2] != b's' {
                self.truncate(self.len() - 1);
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.truncate(self.len() - 1);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.truncate(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.len() - 1) {
                if !matches!(self.b[self.len() - 1], b'l' | b's' | b'z') {
                    self.truncate(self.len() - 1);
                }
            } else {
                self.j = self.len();
                if self.measure() == 1 && self.cvc(self.len() - 1) {
                    self.b.push(b'e');
                }
            }
        }
    }

    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.len() - 1;
            self.b[last] = b'i';
        }
    }

    fn step2(&mut self) {
        for (suffix, replacement) in STEP2_SUFFIXES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step3(&mut self) {
        for (suffix, replacement) in STEP3_SUFFIXES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if !self.ends(suffix) {
                continue;
            }
            if *suffix == "ion" && !(self.j > 0 && matches!(self.b[self.j - 1], b's' | b't')) {
                continue;
            }
            if self.measure() > 1 {
                self.truncate(self.j);
            }
            return;
        }
    }

    fn step5(&mut self) {
        if self.b.last() == Some(&b'e') {
            self.j = self.len() - 1;
            let m = self.measure();
            if m > 1 || (m == 1 && !(self.len() >= 2 && self.cvc(self.len() - 2))) {
                self.truncate(self.len() - 1);
            }
        }

        self.j = self.len();
        if self.b.last() == Some(&b'l')
            && self.double_consonant(self.len() - 1)
            && self.measure() > 1
        {
            self.truncate(self.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("disabled"), "disabl");
        assert_eq!(stemmer.stem("measuring"), "measur");
        assert_eq!(stemmer.stem("itemization"), "item");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
    }

    #[test]
    fn test_catalog_vocabulary() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("adventure"), "adventur");
        assert_eq!(stemmer.stem("adventures"), "adventur");
        assert_eq!(stemmer.stem("pixel"), "pixel");
        assert_eq!(stemmer.stem("games"), "game");
        assert_eq!(stemmer.stem("cozy"), "cozi");
        assert_eq!(stemmer.stem("platformer"), "platform");
        assert_eq!(stemmer.stem("puzzles"), "puzzl");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("hopping"), "hop");
        assert_eq!(stemmer.stem("filing"), "file");
        assert_eq!(stemmer.stem("controll"), "control");
    }

    #[test]
    fn test_case_and_short_words() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("Running"), "run");
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("3d"), "3d");
        assert_eq!(stemmer.stem("2048"), "2048");
        assert_eq!(stemmer.stem(""), "");
    }

    #[test]
    fn test_porter_measure() {
        let measure = |word: &str| {
            let state = StemState::new(word.as_bytes().to_vec());
            state.measure()
        };

        assert_eq!(measure("tree"), 0);
        assert_eq!(measure("trees"), 1);
        assert_eq!(measure("trouble"), 1);
        assert_eq!(measure("troubles"), 2);
        assert_eq!(measure("oaten"), 2);
    }

    #[test]
    fn test_porter_consonant_detection() {
        let state = StemState::new(b"toy".to_vec());
        assert!(state.is_consonant(0)); // t
        assert!(!state.is_consonant(1)); // o
        assert!(state.is_consonant(2)); // y after a vowel

        let state = StemState::new(b"syzygy".to_vec());
        assert!(!state.is_consonant(1)); // y after a consonant
    }
}
