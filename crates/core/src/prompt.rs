//! Prompt assembly for the hosted model.
//!
//! The prompt is plain text. Classification flags and catalog matches are passed as context so
//! the model's reply lines up with what the response envelope reports; follow-up answers are
//! opaque and appended verbatim.

use std::fmt::Write as _;

use triage_types::Locale;

use crate::classifier::ClassificationResult;
use crate::constants::ASSISTANT_PERSONA;
use crate::knowledge::HealthAnalysis;

/// Everything the prompt builder needs for one turn.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub message: &'a str,
    pub locale: Locale,
    pub classification: &'a ClassificationResult,
    pub analysis: Option<&'a HealthAnalysis>,
    pub follow_up_answers: &'a [String],
    pub word_limit: u32,
}

/// Build the prompt for a single chat turn.
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = String::new();

    prompt.push_str(ASSISTANT_PERSONA);
    prompt.push_str("\n\n");

    if ctx.classification.is_emergency {
        prompt.push_str(
            "The user may be describing a medical emergency. Start your reply by telling them \
             to call their local emergency number or go to the nearest emergency department \
             now. Keep any further guidance brief.\n\n",
        );
    } else if ctx.classification.is_false_alarm {
        prompt.push_str(
            "The user indicated they were not being serious. Acknowledge this lightly and \
             invite them to describe any real symptoms they have.\n\n",
        );
    }

    prompt.push_str(
        "If the user describes actual symptoms, pain, or health concerns, provide:\n\
         - 2-3 possible causes\n\
         - Basic care tips\n\
         - When to see a doctor\n\n\
         If the user just says greetings like \"hello\", \"hi\", or asks non-medical questions, \
         respond normally as a friendly medical assistant and ask how you can help with their \
         health concerns.\n\n",
    );

    let _ = writeln!(
        prompt,
        "Assessed severity: {}.",
        ctx.classification.severity
    );

    if let Some(analysis) = ctx.analysis.filter(|a| !a.is_general()) {
        let names: Vec<&str> = analysis
            .conditions
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let _ = writeln!(
            prompt,
            "Conditions commonly associated with these symptoms: {}.",
            names.join(", ")
        );
    }

    let answers: Vec<&str> = ctx
        .follow_up_answers
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if !answers.is_empty() {
        prompt.push_str("\nFollow-up answers from the user:\n");
        for answer in answers {
            let _ = writeln!(prompt, "- {answer}");
        }
    }

    if ctx.locale != Locale::En {
        let _ = writeln!(prompt, "\nRespond in {}.", ctx.locale.language_name());
    }

    let _ = write!(
        prompt,
        "\nUser message: \"{}\"\n\nKeep responses under {} words.",
        ctx.message.trim(),
        ctx.word_limit
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::knowledge::lookup;

    fn render(message: &str, asserted: bool, locale: Locale, follow_ups: &[String]) -> String {
        let classification = classify(message, asserted);
        let analysis = lookup(message, locale);
        build_prompt(&PromptContext {
            message,
            locale,
            classification: &classification,
            analysis: Some(&analysis),
            follow_up_answers: follow_ups,
            word_limit: 100,
        })
    }

    #[test]
    fn includes_message_and_word_limit() {
        let prompt = render("I have a severe headache", false, Locale::En, &[]);
        assert!(prompt.starts_with(ASSISTANT_PERSONA));
        assert!(prompt.contains("User message: \"I have a severe headache\""));
        assert!(prompt.ends_with("Keep responses under 100 words."));
        assert!(prompt.contains("Assessed severity: high."));
        assert!(prompt.contains("Tension Headache, Migraine"));
        assert!(!prompt.contains("emergency number"));
        assert!(!prompt.contains("Respond in"));
    }

    #[test]
    fn emergency_instruction_comes_first() {
        let prompt = render("crushing chest pain", false, Locale::En, &[]);
        let emergency = prompt.find("emergency number").expect("emergency line");
        let causes = prompt.find("2-3 possible causes").expect("instructions");
        assert!(emergency < causes);
    }

    #[test]
    fn false_alarm_gets_light_acknowledgement() {
        let prompt = render("chest pain lol", false, Locale::En, &[]);
        assert!(prompt.contains("not being serious"));
        assert!(!prompt.contains("emergency number"));
    }

    #[test]
    fn greeting_has_no_condition_context() {
        let prompt = render("hello", false, Locale::En, &[]);
        assert!(!prompt.contains("commonly associated"));
        assert!(prompt.contains("Assessed severity: low."));
    }

    #[test]
    fn follow_up_answers_are_appended_and_blank_ones_dropped() {
        let answers = vec![
            "Started two days ago".to_string(),
            "   ".to_string(),
            "Pain is 6/10".to_string(),
        ];
        let prompt = render("fever", false, Locale::En, &answers);
        assert!(prompt.contains("Follow-up answers from the user:\n- Started two days ago\n- Pain is 6/10\n"));
    }

    #[test]
    fn non_english_locale_requests_language() {
        let prompt = render("tengo fiebre", false, Locale::Es, &[]);
        assert!(prompt.contains("Respond in Spanish."));
        assert!(prompt.contains("Infección Viral"));
    }
}
