//! Symptom knowledge lookup.
//!
//! Maps free text onto the static symptom catalog and returns candidate conditions, care tips and
//! escalation criteria in the requested locale.
//!
//! Responsibilities:
//! - Hold the immutable catalog and translation table (built once, shared by every caller)
//! - Union all matching patterns in catalog order
//! - Deduplicate care tips and escalation criteria, keeping first-seen order
//! - Translate condition names, falling back to the canonical English name
//! - Return generic guidance when nothing matches, so `conditions` is never empty
//!
//! Notes:
//! - Matching is plain lowercase substring containment. Unlike the classifier, punctuation is
//!   not stripped here, so multi-word keywords must appear as typed.
//! - Only condition names are localised. Descriptions and the matched-pattern care text are
//!   English regardless of locale.

mod catalog;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use triage_types::{Locale, Severity};

use crate::{TriageError, TriageResult};

// ============================================================================
// Catalog types
// ============================================================================

/// Stable identifier for a catalog condition.
///
/// The identifier, not the display name, keys the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionId {
    TensionHeadache,
    Migraine,
    ViralInfection,
    BacterialInfection,
    CommonCold,
    Bronchitis,
    Gastroenteritis,
    FoodPoisoning,
}

impl ConditionId {
    pub const ALL: [ConditionId; 8] = [
        ConditionId::TensionHeadache,
        ConditionId::Migraine,
        ConditionId::ViralInfection,
        ConditionId::BacterialInfection,
        ConditionId::CommonCold,
        ConditionId::Bronchitis,
        ConditionId::Gastroenteritis,
        ConditionId::FoodPoisoning,
    ];

    /// English display name. Used whenever a locale has no translation.
    pub fn canonical_name(self) -> &'static str {
        match self {
            ConditionId::TensionHeadache => "Tension Headache",
            ConditionId::Migraine => "Migraine",
            ConditionId::ViralInfection => "Viral Infection",
            ConditionId::BacterialInfection => "Bacterial Infection",
            ConditionId::CommonCold => "Common Cold",
            ConditionId::Bronchitis => "Bronchitis",
            ConditionId::Gastroenteritis => "Gastroenteritis",
            ConditionId::FoodPoisoning => "Food Poisoning",
        }
    }
}

/// A condition as stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionEntry {
    pub id: ConditionId,
    pub description: &'static str,
    pub severity: Severity,
}

/// One catalog entry: the keywords that trigger it and the guidance it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomPattern {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub conditions: &'static [ConditionEntry],
    pub care_tips: &'static [&'static str],
    pub seek_help: &'static [&'static str],
}

impl SymptomPattern {
    /// Whether any keyword occurs in the already-lowercased message.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.to_lowercase().as_str()))
    }
}

// ============================================================================
// Translation table
// ============================================================================

/// Localised condition names, keyed by locale and condition identifier.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    names: HashMap<(Locale, ConditionId), &'static str>,
}

impl TranslationTable {
    /// Build a table from `(locale, condition, localised name)` triples.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Locale, ConditionId, &'static str)>,
    ) -> Self {
        let names = entries
            .into_iter()
            .map(|(locale, id, name)| ((locale, id), name))
            .collect();
        Self { names }
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_entries(catalog::BUILTIN_TRANSLATIONS.iter().flat_map(|(id, names)| {
            Locale::ALL
                .into_iter()
                .zip(names.iter().copied())
                .map(move |(locale, name)| (locale, *id, name))
        }))
    }

    /// Localised name if the table has one.
    pub fn get(&self, id: ConditionId, locale: Locale) -> Option<&'static str> {
        self.names.get(&(locale, id)).copied()
    }

    /// Localised name, or the canonical English name when the table has no entry.
    pub fn translate(&self, id: ConditionId, locale: Locale) -> &'static str {
        self.get(id, locale).unwrap_or_else(|| id.canonical_name())
    }
}

// ============================================================================
// Analysis output
// ============================================================================

/// A candidate condition in the caller's locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub description: String,
    pub severity: Severity,
}

/// Structured guidance for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub conditions: Vec<Condition>,
    pub care_tips: Vec<String>,
    pub seek_help: Vec<String>,
    /// Catalog pattern ids that matched, in catalog order. Empty for the generic fallback.
    pub matched_patterns: Vec<String>,
}

impl HealthAnalysis {
    /// Whether this is the generic "needs further evaluation" record.
    pub fn is_general(&self) -> bool {
        self.matched_patterns.is_empty()
    }
}

// ============================================================================
// Knowledge base
// ============================================================================

static BUILTIN: LazyLock<KnowledgeBase> = LazyLock::new(|| KnowledgeBase {
    patterns: catalog::BUILTIN_PATTERNS.to_vec(),
    translations: TranslationTable::builtin(),
});

/// Symptom catalog plus translation table.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    patterns: Vec<SymptomPattern>,
    translations: TranslationTable,
}

impl KnowledgeBase {
    /// Create a knowledge base from custom data.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DuplicatePattern`] if two patterns share an id, or
    /// [`TriageError::PatternWithoutKeywords`] if a pattern could never match.
    pub fn new(
        patterns: Vec<SymptomPattern>,
        translations: TranslationTable,
    ) -> TriageResult<Self> {
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.id) {
                return Err(TriageError::DuplicatePattern(pattern.id));
            }
            if pattern.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(TriageError::PatternWithoutKeywords(pattern.id));
            }
        }

        Ok(Self {
            patterns,
            translations,
        })
    }

    /// The process-wide built-in knowledge base.
    pub fn builtin() -> &'static KnowledgeBase {
        &BUILTIN
    }

    pub fn patterns(&self) -> &[SymptomPattern] {
        &self.patterns
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    /// Check that every catalog condition has a name in every supported locale.
    ///
    /// Lookups never fail on a missing translation (they fall back to English); this is the
    /// startup check that keeps such gaps from shipping unnoticed.
    ///
    /// # Errors
    ///
    /// Returns the first [`TriageError::MissingTranslation`] found, in catalog order.
    pub fn validate(&self) -> TriageResult<()> {
        for pattern in &self.patterns {
            for condition in pattern.conditions {
                for locale in Locale::ALL {
                    if self.translations.get(condition.id, locale).is_none() {
                        return Err(TriageError::MissingTranslation {
                            condition: condition.id.canonical_name(),
                            locale,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Analyse a message against the catalog.
    pub fn analyze(&self, message: &str, locale: Locale) -> HealthAnalysis {
        let lowered = message.to_lowercase();
        let matched: Vec<&SymptomPattern> = self
            .patterns
            .iter()
            .filter(|pattern| pattern.matches(&lowered))
            .collect();

        if matched.is_empty() {
            tracing::debug!(locale = %locale, "no symptom pattern matched; using general guidance");
            return general_guidance(locale);
        }

        let conditions = matched
            .iter()
            .flat_map(|pattern| pattern.conditions.iter())
            .map(|entry| Condition {
                name: self.translations.translate(entry.id, locale).to_string(),
                description: entry.description.to_string(),
                severity: entry.severity,
            })
            .collect();

        HealthAnalysis {
            conditions,
            care_tips: dedup_in_order(matched.iter().flat_map(|p| p.care_tips.iter().copied())),
            seek_help: dedup_in_order(matched.iter().flat_map(|p| p.seek_help.iter().copied())),
            matched_patterns: matched.iter().map(|p| p.id.to_string()).collect(),
        }
    }
}

/// Analyse a message against the built-in knowledge base.
pub fn lookup(message: &str, locale: Locale) -> HealthAnalysis {
    KnowledgeBase::builtin().analyze(message, locale)
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

fn general_guidance(locale: Locale) -> HealthAnalysis {
    let (name, description, care_tips, seek_help): (&str, &str, [&str; 4], [&str; 4]) =
        match locale {
            Locale::En => (
                "General Symptoms",
                "Symptoms that require further evaluation",
                [
                    "Get adequate rest",
                    "Stay hydrated",
                    "Monitor your symptoms",
                    "Avoid stress",
                ],
                [
                    "If symptoms worsen",
                    "If you develop high fever",
                    "If you have difficulty breathing",
                    "If symptoms persist for more than a week",
                ],
            ),
            Locale::Es => (
                "Síntomas Generales",
                "Síntomas que requieren evaluación adicional",
                [
                    "Descansa adecuadamente",
                    "Mantente hidratado",
                    "Monitorea tus síntomas",
                    "Evita el estrés",
                ],
                [
                    "Si los síntomas empeoran",
                    "Si desarrollas fiebre alta",
                    "Si tienes dificultad para respirar",
                    "Si los síntomas persisten por más de una semana",
                ],
            ),
            Locale::Fr => (
                "Symptômes Généraux",
                "Symptômes nécessitant une évaluation supplémentaire",
                [
                    "Reposez-vous suffisamment",
                    "Restez hydraté",
                    "Surveillez vos symptômes",
                    "Évitez le stress",
                ],
                [
                    "Si les symptômes s'aggravent",
                    "Si vous développez une forte fièvre",
                    "Si vous avez des difficultés respiratoires",
                    "Si les symptômes persistent plus d'une semaine",
                ],
            ),
        };

    HealthAnalysis {
        conditions: vec![Condition {
            name: name.to_string(),
            description: description.to_string(),
            severity: Severity::Medium,
        }],
        care_tips: care_tips.iter().map(|s| s.to_string()).collect(),
        seek_help: seek_help.iter().map(|s| s.to_string()).collect(),
        matched_patterns: Vec::new(),
    }
}
