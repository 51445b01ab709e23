//! Porter suffix-stripping stemmer.
//!
//! Follows the 1980 Porter rules with the extensions NLTK applies in its
//! default mode (irregular-form pool, short-word guard, `ies`/`ied` on four
//! letter words, `alli`/`bli`/`fulli`/`logi` in step 2). Taxonomy tables are
//! curated against exactly this output, so rule order matters: within a step
//! the first suffix that matches decides, even when its condition fails.
//!
//! Input is expected lowercase; case is never changed here.

type Condition = fn(&str) -> bool;

/// Irregular forms mapped straight to their stem.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

/// Stem one word. Total over any string; words of two chars or fewer come back as is.
pub fn stem(word: &str) -> String {
    if let Some((_, base)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
        return (*base).to_string();
    }
    if word.chars().count() <= 2 {
        return word.to_string();
    }

    let word = step1a(word.to_string());
    let word = step1b(word);
    let word = step1c(word);
    let word = step2(word);
    let word = step3(word);
    let word = step4(word);
    let word = step5a(word);
    step5b(word)
}

/// Consonant flag per char. `y` is a consonant at the start or after a vowel.
fn consonant_flags(word: &str) -> Vec<bool> {
    let mut flags: Vec<bool> = Vec::with_capacity(word.len());
    for (i, c) in word.chars().enumerate() {
        let consonant = match c {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !flags[i - 1],
            _ => true,
        };
        flags.push(consonant);
    }
    flags
}

/// Porter's m: the number of vowel-run/consonant-run pairs in `[C](VC)^m[V]`.
fn measure(stem: &str) -> usize {
    let mut m = 0;
    let mut after_vowel = false;
    for consonant in consonant_flags(stem) {
        if consonant && after_vowel {
            m += 1;
        }
        after_vowel = !consonant;
    }
    m
}

fn has_positive_measure(stem: &str) -> bool {
    measure(stem) > 0
}

fn measure_gt_1(stem: &str) -> bool {
    measure(stem) > 1
}

fn contains_vowel(stem: &str) -> bool {
    consonant_flags(stem).contains(&false)
}

fn ends_double_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    n >= 2 && chars[n - 1] == chars[n - 2] && consonant_flags(word)[n - 1]
}

/// consonant-vowel-consonant ending, last not w/x/y; also a bare two-letter `vc`.
fn ends_cvc(word: &str) -> bool {
    let flags = consonant_flags(word);
    match flags.as_slice() {
        [.., true, false, true] => !word.ends_with(['w', 'x', 'y']),
        [false, true] => true,
        _ => false,
    }
}

fn replace_suffix(word: &str, suffix: &str, replacement: &str) -> String {
    let stem = &word[..word.len() - suffix.len()];
    format!("{stem}{replacement}")
}

/// First rule whose suffix matches decides the outcome.
fn apply_rules(word: String, rules: &[(&str, &str, Option<Condition>)]) -> String {
    for (suffix, replacement, condition) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            if condition.map_or(true, |holds| holds(stem)) {
                return format!("{stem}{replacement}");
            }
            return word;
        }
    }
    word
}

fn step1a(word: String) -> String {
    if word.ends_with("ies") && word.chars().count() == 4 {
        return replace_suffix(&word, "ies", "ie");
    }
    apply_rules(
        word,
        &[
            ("sses", "ss", None),
            ("ies", "i", None),
            ("ss", "ss", None),
            ("s", "", None),
        ],
    )
}

fn step1b(word: String) -> String {
    if word.ends_with("ied") {
        return if word.chars().count() == 4 {
            replace_suffix(&word, "ied", "ie")
        } else {
            replace_suffix(&word, "ied", "i")
        };
    }

    if let Some(stem) = word.strip_suffix("eed") {
        return if has_positive_measure(stem) {
            format!("{stem}ee")
        } else {
            word
        };
    }

    let stripped = ["ed", "ing"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix).filter(|stem| contains_vowel(stem)));
    let Some(stem) = stripped else {
        return word;
    };
    let mut stem = stem.to_string();

    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        stem.push('e');
        return stem;
    }
    if ends_double_consonant(&stem) {
        if !stem.ends_with(['l', 's', 'z']) {
            stem.pop();
        }
        return stem;
    }
    if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

fn step1c(word: String) -> String {
    let Some(stem) = word.strip_suffix('y') else {
        return word;
    };
    let flags = consonant_flags(stem);
    if flags.len() > 1 && flags[flags.len() - 1] {
        format!("{stem}i")
    } else {
        word
    }
}

fn step2(word: String) -> String {
    // alli -> al runs first and feeds back through step 2
    if let Some(stem) = word.strip_suffix("alli") {
        if has_positive_measure(stem) {
            return step2(format!("{stem}al"));
        }
    }

    const M: Option<Condition> = Some(has_positive_measure);
    let word = apply_rules(
        word,
        &[
            ("ational", "ate", M),
            ("tional", "tion", M),
            ("enci", "ence", M),
            ("anci", "ance", M),
            ("izer", "ize", M),
            ("bli", "ble", M),
            ("alli", "al", M),
            ("entli", "ent", M),
            ("eli", "e", M),
            ("ousli", "ous", M),
            ("ization", "ize", M),
            ("ation", "ate", M),
            ("ator", "ate", M),
            ("alism", "al", M),
            ("iveness", "ive", M),
            ("fulness", "ful", M),
            ("ousness", "ous", M),
            ("aliti", "al", M),
            ("iviti", "ive", M),
            ("biliti", "ble", M),
            ("fulli", "ful", M),
        ],
    );

    // the 'l' of logi stays with the stem for the measure check (geo-, theo-)
    match word.strip_suffix("logi") {
        Some(stem) if has_positive_measure(&format!("{stem}l")) => format!("{stem}log"),
        _ => word,
    }
}

fn step3(word: String) -> String {
    const M: Option<Condition> = Some(has_positive_measure);
    apply_rules(
        word,
        &[
            ("icate", "ic", M),
            ("ative", "", M),
            ("alize", "al", M),
            ("iciti", "ic", M),
            ("ical", "ic", M),
            ("ful", "", M),
            ("ness", "", M),
        ],
    )
}

fn ion_condition(stem: &str) -> bool {
    measure(stem) > 1 && stem.ends_with(['s', 't'])
}

fn step4(word: String) -> String {
    const M: Option<Condition> = Some(measure_gt_1);
    const ION: Option<Condition> = Some(ion_condition);
    apply_rules(
        word,
        &[
            ("al", "", M),
            ("ance", "", M),
            ("ence", "", M),
            ("er", "", M),
            ("ic", "", M),
            ("able", "", M),
            ("ible", "", M),
            ("ant", "", M),
            ("ement", "", M),
            ("ment", "", M),
            ("ent", "", M),
            ("ion", "", ION),
            ("ou", "", M),
            ("ism", "", M),
            ("ate", "", M),
            ("iti", "", M),
            ("ous", "", M),
            ("ive", "", M),
            ("ize", "", M),
        ],
    )
}

fn step5a(word: String) -> String {
    if let Some(stem) = word.strip_suffix('e') {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_string();
        }
    }
    word
}

fn step5b(word: String) -> String {
    match word.strip_suffix('l') {
        Some(stem) if word.ends_with("ll") && measure(stem) > 1 => stem.to_string(),
        _ => word,
    }
}
