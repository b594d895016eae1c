//! Conservative English suffix stripping (a modified Porter stemmer).
//!
//! The steps follow Porter's algorithm, except that no letter is ever put back
//! after a suffix is removed: `hoping` stays `hop`, `happy` becomes `happ`,
//! `ponies` becomes `pon`. The resulting stems are shorter than canonical
//! Porter stems, which is what a prefix-matching search pattern wants.
//!
//! The crate knows nothing about irregular dictionaries. [`stem_with`] takes a
//! lookup callback and reports whether an intermediate or final candidate is a
//! known irregular form, so the caller can switch to its irregular variants.
//!
//! # How it works
//! 1. Words of one or two characters are returned unchanged.
//! 2. Step 1a strips plural endings; a changed candidate is checked against
//!    the lookup and, on a hit, stemming stops there.
//! 3. Steps 1b–5 strip inflectional and derivational suffixes.
//! 4. A final candidate that differs from the input is checked again.
//!
//! # Example
//! ```
//! use morphsearch_stem::{stem, stem_with};
//!
//! assert_eq!(stem("searching"), "search");
//! assert_eq!(stem("hopping"), "hop");
//!
//! let outcome = stem_with("running", |cand| (cand == "run").then_some("run/ran"));
//! assert_eq!(outcome.stem, "run");
//! assert_eq!(outcome.irregular, Some("run/ran"));
//! ```
//!
//! For a runnable demo, see `cargo run -p morphsearch-stem --example lookup -- [--demo|<word>]`.

use std::borrow::Cow;

/// A stem plus the irregular lookup hit that stemming ran into, if any.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StemOutcome<T> {
    pub stem: String,
    pub irregular: Option<T>,
}

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
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Stem `word` without any irregular lookups.
pub fn stem(word: &str) -> String {
    stem_with(word, |_| None::<()>).stem
}

/// Stem `word`, consulting `lookup` whenever a candidate differs from the input.
///
/// `lookup` is called at most twice: after step 1a and after the last step.
/// A hit after step 1a ends stemming with that candidate as the stem.
pub fn stem_with<T, F>(word: &str, lookup: F) -> StemOutcome<T>
where
    F: Fn(&str) -> Option<T>,
{
    if word.chars().count() <= 2 {
        return StemOutcome {
            stem: word.to_string(),
            irregular: None,
        };
    }

    let w = step1a(word);
    if w != word
        && let Some(hit) = lookup(&*w)
    {
        return StemOutcome {
            stem: w.into_owned(),
            irregular: Some(hit),
        };
    }

    let w = step1b(&w);
    let w = step1c(&w);
    let w = replace_suffix(&w, STEP2_SUFFIXES);
    let w = replace_suffix(&w, STEP3_SUFFIXES);
    let w = step4(&w);
    let w = step5a(&w);
    let w = step5b(&w);

    let stem = w.into_owned();
    let irregular = if stem != word { lookup(stem.as_str()) } else { None };
    StemOutcome { stem, irregular }
}

/// Porter measure: the number of vowel-run to consonant-run transitions.
pub fn measure(s: &str) -> usize {
    consonant_mask(s)
        .windows(2)
        .filter(|pair| !pair[0] && pair[1])
        .count()
}

/// `*v*`: the string contains a vowel.
pub fn has_vowel(s: &str) -> bool {
    consonant_mask(s).iter().any(|is_consonant| !is_consonant)
}

/// `*d`: the string ends with the same consonant twice.
pub fn ends_double_consonant(s: &str) -> bool {
    let mut chars = s.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), Some(prev)) if last == prev => consonant_mask(s).last() == Some(&true),
        _ => false,
    }
}

/// `*o`: the string ends consonant-vowel-consonant, the last not `w`, `x` or `y`.
pub fn ends_cvc(s: &str) -> bool {
    let mask = consonant_mask(s);
    let n = mask.len();
    if n < 3 || !(mask[n - 3] && !mask[n - 2] && mask[n - 1]) {
        return false;
    }
    !matches!(
        s.chars().next_back().map(|c| c.to_ascii_lowercase()),
        Some('w' | 'x' | 'y')
    )
}

// `y` is a consonant at the start of a word and after a vowel.
fn consonant_mask(s: &str) -> Vec<bool> {
    let mut mask: Vec<bool> = Vec::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        let is_consonant = match c.to_ascii_lowercase() {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !mask[i - 1],
            _ => true,
        };
        mask.push(is_consonant);
    }
    mask
}

fn drop_last(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next_back();
    chars.as_str()
}

fn step1a(w: &str) -> Cow<'_, str> {
    if w.ends_with("sses") {
        return Cow::Borrowed(&w[..w.len() - 2]);
    }
    if let Some(stem) = w.strip_suffix("ies")
        && !stem.is_empty()
    {
        return Cow::Borrowed(stem);
    }
    if w.ends_with("ss") {
        return Cow::Borrowed(w);
    }
    match w.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => Cow::Borrowed(stem),
        _ => Cow::Borrowed(w),
    }
}

fn step1b(w: &str) -> Cow<'_, str> {
    if let Some(stem) = w.strip_suffix("eed")
        && !stem.is_empty()
    {
        return if measure(stem) > 0 {
            Cow::Borrowed(stem)
        } else {
            Cow::Borrowed(w)
        };
    }

    let stem = match w.strip_suffix("ed").or_else(|| w.strip_suffix("ing")) {
        Some(stem) if has_vowel(stem) => stem,
        _ => return Cow::Borrowed(w),
    };
    if ["at", "bl", "iz"].iter().any(|end| stem.ends_with(end)) {
        return Cow::Borrowed(stem);
    }
    if ends_double_consonant(stem) && !stem.ends_with(['l', 's', 'z']) {
        return Cow::Borrowed(drop_last(stem));
    }
    Cow::Borrowed(stem)
}

fn step1c(w: &str) -> Cow<'_, str> {
    match w.strip_suffix('y') {
        Some(stem) if has_vowel(stem) => Cow::Borrowed(stem),
        _ => Cow::Borrowed(w),
    }
}

// Steps 2 and 3: only the longest matching suffix is considered.
fn replace_suffix<'a>(w: &'a str, table: &[(&str, &str)]) -> Cow<'a, str> {
    let longest = table
        .iter()
        .filter_map(|&(suffix, replacement)| {
            w.strip_suffix(suffix)
                .filter(|stem| !stem.is_empty())
                .map(|stem| (stem, replacement))
        })
        .min_by_key(|(stem, _)| stem.len());

    match longest {
        Some((stem, replacement)) if measure(stem) > 0 => {
            if replacement.is_empty() {
                Cow::Borrowed(stem)
            } else {
                Cow::Owned(format!("{stem}{replacement}"))
            }
        }
        _ => Cow::Borrowed(w),
    }
}

fn step4(w: &str) -> Cow<'_, str> {
    let longest = STEP4_SUFFIXES
        .iter()
        .filter_map(|&suffix| w.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .min_by_key(|stem| stem.len());
    if let Some(stem) = longest {
        return if measure(stem) > 1 {
            Cow::Borrowed(stem)
        } else {
            Cow::Borrowed(w)
        };
    }

    // `-sion`/`-tion` keep the `s`/`t`.
    match w.strip_suffix("ion") {
        Some(stem) if stem.ends_with(['s', 't']) && measure(stem) > 1 => Cow::Borrowed(stem),
        _ => Cow::Borrowed(w),
    }
}

fn step5a(w: &str) -> Cow<'_, str> {
    let Some(stem) = w.strip_suffix('e') else {
        return Cow::Borrowed(w);
    };
    let m = measure(stem);
    if m > 1 || (m == 1 && !ends_cvc(stem)) {
        Cow::Borrowed(stem)
    } else {
        Cow::Borrowed(w)
    }
}

fn step5b(w: &str) -> Cow<'_, str> {
    if w.ends_with("ll") && measure(w) > 1 {
        Cow::Borrowed(drop_last(w))
    } else {
        Cow::Borrowed(w)
    }
}
