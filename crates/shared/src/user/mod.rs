use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::mealplan::Allergen;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiabetesClass {
    Mody1,
    #[default]
    Mody2,
    Mody3,
    Mody5,
    Type1,
    Type2,
    Gestational,
    Lada,
    NoDiabetes,
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    #[default]
    Oral,
    Insulin,
    Diet,
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub allergens: Vec<Allergen>,
    #[serde(default)]
    pub diabetes_class: DiabetesClass,
    #[serde(default)]
    pub treatment: Treatment,
    #[serde(default)]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub onboarding_complete: bool,
}

impl Profile {
    /// No-restriction profiles skip the carb-compensation rule and carry
    /// no medication reminders.
    pub fn is_unrestricted(&self) -> bool {
        self.diabetes_class == DiabetesClass::NoDiabetes
    }
}
