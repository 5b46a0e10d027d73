//! Message classification: emergency, false alarm and severity.
//!
//! Every pass works on the same normalised form of the message (see [`normalise`]), and every
//! keyword list is pushed through the same normalisation once when it is first used. A phrase
//! written as `"can't breathe"` in the tables therefore matches `"cant breathe"`,
//! `"Can't, breathe"` and `"CAN’T   breathe"` alike.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use triage_types::Severity;

/// Flags derived from a single user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_emergency: bool,
    pub is_false_alarm: bool,
    pub severity: Severity,
}

/// Dismissal idioms that mark a message as not meant seriously.
static FALSE_ALARM_PHRASES: LazyLock<Vec<String>> = LazyLock::new(|| {
    normalise_all(&[
        "just kidding",
        "just joking",
        "only joking",
        "i was joking",
        "just a joke",
        "jk",
        "lol",
        "lmao",
        "rofl",
        "haha",
        "nevermind",
        "never mind",
        "false alarm",
        "😂",
        "🤣",
        "😆",
        "es broma",
        "era broma",
        "je plaisante",
        "c'est une blague",
    ])
});

/// Life-threatening symptom phrases, including common misspellings.
static EMERGENCY_PHRASES: LazyLock<Vec<String>> = LazyLock::new(|| {
    normalise_all(&[
        // breathing
        "can't breathe",
        "can't breath",
        "can not breathe",
        "cannot breathe",
        "cannot breath",
        "cant brethe",
        "difficulty breathing",
        "trouble breathing",
        "hard to breathe",
        "struggling to breathe",
        "not breathing",
        "stopped breathing",
        "shortness of breath",
        "short of breath",
        "gasping for air",
        "choking",
        // cardiac / neurological
        "chest pain",
        "crushing chest",
        "heart attack",
        "cardiac arrest",
        "stroke",
        "face drooping",
        "slurred speech",
        "seizure",
        "convulsing",
        // bleeding / consciousness
        "severe bleeding",
        "bleeding heavily",
        "heavy bleeding",
        "won't stop bleeding",
        "unconscious",
        "passed out",
        "unresponsive",
        "not waking up",
        // poisoning / allergy
        "overdose",
        "overdosed",
        "poisoned",
        "swallowed poison",
        "anaphylaxis",
        "anaphylactic",
        "throat is closing",
        "throat closing",
        // self-harm
        "suicidal",
        "suicide",
        "kill myself",
        "want to die",
        "end my life",
        "hurt myself",
        // explicit
        "emergency",
        "no puedo respirar",
        "dolor de pecho",
        "emergencia",
        "je ne peux pas respirer",
        "douleur thoracique",
        "urgence",
    ])
});

static HIGH_SEVERITY_KEYWORDS: LazyLock<Vec<String>> = LazyLock::new(|| {
    normalise_all(&[
        "severe",
        "unbearable",
        "excruciating",
        "worst",
        "emergency",
        "bleeding",
        "chest pain",
        "stroke",
        "heart attack",
        "allergic reaction",
        "can't",
        "cannot",
        "unconscious",
        "seizure",
        "suicidal",
        "difficulty breathing",
        "short of breath",
    ])
});

static MEDIUM_SEVERITY_KEYWORDS: LazyLock<Vec<String>> = LazyLock::new(|| {
    normalise_all(&[
        "fever",
        "pain",
        "ache",
        "nausea",
        "nauseous",
        "vomiting",
        "dizzy",
        "dizziness",
        "headache",
        "migraine",
        "persistent",
        "worsening",
        "getting worse",
        "swelling",
        "swollen",
        "rash",
        "infection",
        "cough",
        "diarrhea",
        "chills",
        "fiebre",
        "dolor",
        "fièvre",
        "douleur",
    ])
});

/// Classify a message.
///
/// `asserted_emergency` carries an emergency already established by the caller (typically a
/// previous turn). It forces `is_emergency` to `true` and cannot be cleared by a false-alarm
/// phrase; only content-derived emergencies are suppressed by one.
pub fn classify(message: &str, asserted_emergency: bool) -> ClassificationResult {
    let normalised = normalise(message);

    let is_false_alarm = contains_any(&normalised, &FALSE_ALARM_PHRASES);
    let emergency_detected = contains_any(&normalised, &EMERGENCY_PHRASES);

    ClassificationResult {
        is_emergency: asserted_emergency || (emergency_detected && !is_false_alarm),
        is_false_alarm,
        severity: severity_of_normalised(&normalised),
    }
}

/// Severity ladder on its own. High keywords win over medium ones; no keyword means low.
pub fn severity(message: &str) -> Severity {
    severity_of_normalised(&normalise(message))
}

fn severity_of_normalised(normalised: &str) -> Severity {
    if contains_any(normalised, &HIGH_SEVERITY_KEYWORDS) {
        Severity::High
    } else if contains_any(normalised, &MEDIUM_SEVERITY_KEYWORDS) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn normalise_all(phrases: &[&str]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| normalise(p))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Normalise text for keyword matching.
///
/// Lowercases, deletes apostrophes, turns every other punctuation character into a word break
/// and collapses whitespace runs to a single space. Letters in any script, digits and emoji are
/// kept.
pub fn normalise(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if is_apostrophe(ch) {
            continue;
        }
        if ch.is_whitespace() || is_punctuation(ch) {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '`' | '\u{02bc}')
}

fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '\u{201c}' | '\u{201d}' | '\u{2026}' | '\u{2013}' | '\u{2014}' | '¿' | '¡' | '«' | '»'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_strips_apostrophes_and_punctuation() {
        assert_eq!(normalise("I CAN'T, breathe!!"), "i cant breathe");
        assert_eq!(normalise("can’t   breathe"), "cant breathe");
        assert_eq!(normalise("chest-pain..."), "chest pain");
        assert_eq!(normalise("  ¿Fiebre?  "), "fiebre");
        assert_eq!(normalise("call 911 😂"), "call 911 😂");
        assert_eq!(normalise(""), "");
    }

    #[test]
    fn emergency_phrase_without_dismissal_is_emergency() {
        for msg in [
            "I can't breathe",
            "sudden CHEST PAIN radiating to my arm",
            "my dad is unconscious",
            "I think I'm having a heart attack",
            "I took an overdose of pills",
            "This is an emergency!",
            "i cant brethe",
            "No puedo respirar",
        ] {
            let result = classify(msg, false);
            assert!(result.is_emergency, "expected emergency for {msg:?}");
            assert!(!result.is_false_alarm, "unexpected false alarm for {msg:?}");
        }
    }

    #[test]
    fn punctuation_inside_phrase_still_matches() {
        assert!(classify("chest... pain, really bad", false).is_emergency);
        assert!(classify("heart-attack?", false).is_emergency);
    }

    #[test]
    fn dismissal_suppresses_detected_emergency() {
        let result = classify("I can't breathe, just kidding", false);
        assert!(result.is_false_alarm);
        assert!(!result.is_emergency);

        let result = classify("chest pain lol", false);
        assert!(result.is_false_alarm);
        assert!(!result.is_emergency);

        let result = classify("stroke 😂", false);
        assert!(result.is_false_alarm);
        assert!(!result.is_emergency);
    }

    #[test]
    fn asserted_emergency_survives_dismissal() {
        let result = classify("jk, nevermind", true);
        assert!(result.is_false_alarm);
        assert!(result.is_emergency);

        let result = classify("hello", true);
        assert!(result.is_emergency);
        assert!(!result.is_false_alarm);
    }

    #[test]
    fn high_severity_beats_medium() {
        assert_eq!(severity("severe pain and fever"), Severity::High);
        assert_eq!(severity("fever and nausea"), Severity::Medium);
        assert_eq!(severity("I cannot stop coughing"), Severity::High);
        assert_eq!(severity("just feeling a bit tired"), Severity::Low);
    }

    #[test]
    fn severe_headache_scenario() {
        let result = classify("I have a severe headache", false);
        assert_eq!(
            result,
            ClassificationResult {
                is_emergency: false,
                is_false_alarm: false,
                severity: Severity::High,
            }
        );
    }

    #[test]
    fn greeting_scenario() {
        let result = classify("hello", false);
        assert!(!result.is_emergency);
        assert!(!result.is_false_alarm);
        assert_eq!(result.severity, Severity::Low);
    }

    #[test]
    fn keyword_tables_are_normalised() {
        for list in [
            &*FALSE_ALARM_PHRASES,
            &*EMERGENCY_PHRASES,
            &*HIGH_SEVERITY_KEYWORDS,
            &*MEDIUM_SEVERITY_KEYWORDS,
        ] {
            for phrase in list {
                assert_eq!(&normalise(phrase), phrase);
            }
        }
    }
}
