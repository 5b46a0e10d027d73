//! Built-in symptom pattern catalog.
//!
//! Keyword sets carry English, Spanish and French phrasings of the same symptom so that one
//! pattern answers all three locales.

use triage_types::Severity;

use super::{ConditionEntry, ConditionId, SymptomPattern};

pub(crate) static BUILTIN_PATTERNS: &[SymptomPattern] = &[
    SymptomPattern {
        id: "headache",
        keywords: &[
            "headache",
            "head pain",
            "migraine",
            "dolor de cabeza",
            "mal de tête",
        ],
        conditions: &[
            ConditionEntry {
                id: ConditionId::TensionHeadache,
                description: "Most common type of headache, often caused by stress or muscle tension",
                severity: Severity::Low,
            },
            ConditionEntry {
                id: ConditionId::Migraine,
                description: "Severe headache often accompanied by nausea and light sensitivity",
                severity: Severity::Medium,
            },
        ],
        care_tips: &[
            "Rest in a quiet, dark room",
            "Apply cold or warm compress to head/neck",
            "Stay hydrated",
            "Practice relaxation techniques",
            "Get adequate sleep",
        ],
        seek_help: &[
            "Sudden, severe headache unlike any before",
            "Headache with fever, stiff neck, confusion",
            "Headache after head injury",
            "Progressive worsening over days/weeks",
        ],
    },
    SymptomPattern {
        id: "fever",
        keywords: &[
            "fever",
            "high temperature",
            "fiebre",
            "fièvre",
            "hot",
            "chills",
        ],
        conditions: &[
            ConditionEntry {
                id: ConditionId::ViralInfection,
                description: "Common cause of fever, usually resolves on its own",
                severity: Severity::Low,
            },
            ConditionEntry {
                id: ConditionId::BacterialInfection,
                description: "May require antibiotic treatment",
                severity: Severity::Medium,
            },
        ],
        care_tips: &[
            "Rest and get plenty of sleep",
            "Drink lots of fluids",
            "Use fever-reducing medication if needed",
            "Wear light clothing",
            "Take lukewarm baths",
        ],
        seek_help: &[
            "Fever above 103°F (39.4°C)",
            "Fever lasting more than 3 days",
            "Difficulty breathing",
            "Severe dehydration",
            "Persistent vomiting",
        ],
    },
    SymptomPattern {
        id: "cough",
        keywords: &["cough", "coughing", "tos", "toux"],
        conditions: &[
            ConditionEntry {
                id: ConditionId::CommonCold,
                description: "Viral infection affecting upper respiratory tract",
                severity: Severity::Low,
            },
            ConditionEntry {
                id: ConditionId::Bronchitis,
                description: "Inflammation of bronchial tubes",
                severity: Severity::Medium,
            },
        ],
        care_tips: &[
            "Stay hydrated with warm liquids",
            "Use honey for soothing (not for children under 1 year)",
            "Humidify the air",
            "Avoid irritants like smoke",
            "Rest your voice",
        ],
        seek_help: &[
            "Cough with blood",
            "Difficulty breathing or wheezing",
            "High fever with cough",
            "Cough lasting more than 3 weeks",
            "Chest pain with coughing",
        ],
    },
    SymptomPattern {
        id: "stomach",
        keywords: &[
            "stomach pain",
            "abdominal pain",
            "nausea",
            "vomiting",
            "dolor de estómago",
            "mal d'estomac",
        ],
        conditions: &[
            ConditionEntry {
                id: ConditionId::Gastroenteritis,
                description: "Inflammation of stomach and intestines, often called stomach flu",
                severity: Severity::Low,
            },
            ConditionEntry {
                id: ConditionId::FoodPoisoning,
                description: "Illness caused by contaminated food",
                severity: Severity::Medium,
            },
        ],
        care_tips: &[
            "Stay hydrated with clear fluids",
            "Eat bland foods (BRAT diet: bananas, rice, applesauce, toast)",
            "Rest and avoid solid foods initially",
            "Avoid dairy and fatty foods",
            "Take small, frequent sips of liquid",
        ],
        seek_help: &[
            "Severe dehydration",
            "Blood in vomit or stool",
            "High fever with abdominal pain",
            "Severe abdominal pain",
            "Signs of appendicitis (pain in lower right abdomen)",
        ],
    },
];

pub(crate) static BUILTIN_TRANSLATIONS: &[(ConditionId, [&str; 3])] = &[
    // (condition, [en, es, fr])
    (
        ConditionId::TensionHeadache,
        [
            "Tension Headache",
            "Dolor de Cabeza Tensional",
            "Céphalée de Tension",
        ],
    ),
    (ConditionId::Migraine, ["Migraine", "Migraña", "Migraine"]),
    (
        ConditionId::ViralInfection,
        ["Viral Infection", "Infección Viral", "Infection Virale"],
    ),
    (
        ConditionId::BacterialInfection,
        [
            "Bacterial Infection",
            "Infección Bacteriana",
            "Infection Bactérienne",
        ],
    ),
    (
        ConditionId::CommonCold,
        ["Common Cold", "Resfriado Común", "Rhume"],
    ),
    (
        ConditionId::Bronchitis,
        ["Bronchitis", "Bronquitis", "Bronchite"],
    ),
    (
        ConditionId::Gastroenteritis,
        ["Gastroenteritis", "Gastroenteritis", "Gastro-entérite"],
    ),
    (
        ConditionId::FoodPoisoning,
        [
            "Food Poisoning",
            "Intoxicación Alimentaria",
            "Intoxication Alimentaire",
        ],
    ),
];
