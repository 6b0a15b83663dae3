//! Meal types.
//!
//! Upstream records use TheMealDB field names (`idMeal`, `strMeal`, ...) and
//! spread ingredients over twenty numbered slots. Empty slots arrive as
//! `null`, `""` or whitespace depending on when the record was entered.

use serde::{Deserialize, Serialize};

use crate::constants::INGREDIENT_SLOTS;

/// A full meal record as returned by search and lookup endpoints.
///
/// Field names mirror the upstream JSON.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealRecord {
    pub id_meal: String,
    pub str_meal: String,
    pub str_category: Option<String>,
    pub str_area: Option<String>,
    pub str_instructions: Option<String>,
    pub str_meal_thumb: Option<String>,
    pub str_tags: Option<String>,
    pub str_youtube: Option<String>,
    pub str_source: Option<String>,

    pub str_ingredient1: Option<String>,
    pub str_ingredient2: Option<String>,
    pub str_ingredient3: Option<String>,
    pub str_ingredient4: Option<String>,
    pub str_ingredient5: Option<String>,
    pub str_ingredient6: Option<String>,
    pub str_ingredient7: Option<String>,
    pub str_ingredient8: Option<String>,
    pub str_ingredient9: Option<String>,
    pub str_ingredient10: Option<String>,
    pub str_ingredient11: Option<String>,
    pub str_ingredient12: Option<String>,
    pub str_ingredient13: Option<String>,
    pub str_ingredient14: Option<String>,
    pub str_ingredient15: Option<String>,
    pub str_ingredient16: Option<String>,
    pub str_ingredient17: Option<String>,
    pub str_ingredient18: Option<String>,
    pub str_ingredient19: Option<String>,
    pub str_ingredient20: Option<String>,

    pub str_measure1: Option<String>,
    pub str_measure2: Option<String>,
    pub str_measure3: Option<String>,
    pub str_measure4: Option<String>,
    pub str_measure5: Option<String>,
    pub str_measure6: Option<String>,
    pub str_measure7: Option<String>,
    pub str_measure8: Option<String>,
    pub str_measure9: Option<String>,
    pub str_measure10: Option<String>,
    pub str_measure11: Option<String>,
    pub str_measure12: Option<String>,
    pub str_measure13: Option<String>,
    pub str_measure14: Option<String>,
    pub str_measure15: Option<String>,
    pub str_measure16: Option<String>,
    pub str_measure17: Option<String>,
    pub str_measure18: Option<String>,
    pub str_measure19: Option<String>,
    pub str_measure20: Option<String>,
}

impl MealRecord {
    /// Creates a record with only id and name set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id_meal: id.into(),
            str_meal: name.into(),
            ..Default::default()
        }
    }

    /// The twenty (ingredient, measure) slots in ascending slot order.
    pub fn ingredient_slots(&self) -> [(Option<&str>, Option<&str>); INGREDIENT_SLOTS] {
        [
            (self.str_ingredient1.as_deref(), self.str_measure1.as_deref()),
            (self.str_ingredient2.as_deref(), self.str_measure2.as_deref()),
            (self.str_ingredient3.as_deref(), self.str_measure3.as_deref()),
            (self.str_ingredient4.as_deref(), self.str_measure4.as_deref()),
            (self.str_ingredient5.as_deref(), self.str_measure5.as_deref()),
            (self.str_ingredient6.as_deref(), self.str_measure6.as_deref()),
            (self.str_ingredient7.as_deref(), self.str_measure7.as_deref()),
            (self.str_ingredient8.as_deref(), self.str_measure8.as_deref()),
            (self.str_ingredient9.as_deref(), self.str_measure9.as_deref()),
            (self.str_ingredient10.as_deref(), self.str_measure10.as_deref()),
            (self.str_ingredient11.as_deref(), self.str_measure11.as_deref()),
            (self.str_ingredient12.as_deref(), self.str_measure12.as_deref()),
            (self.str_ingredient13.as_deref(), self.str_measure13.as_deref()),
            (self.str_ingredient14.as_deref(), self.str_measure14.as_deref()),
            (self.str_ingredient15.as_deref(), self.str_measure15.as_deref()),
            (self.str_ingredient16.as_deref(), self.str_measure16.as_deref()),
            (self.str_ingredient17.as_deref(), self.str_measure17.as_deref()),
            (self.str_ingredient18.as_deref(), self.str_measure18.as_deref()),
            (self.str_ingredient19.as_deref(), self.str_measure19.as_deref()),
            (self.str_ingredient20.as_deref(), self.str_measure20.as_deref()),
        ]
    }

    /// Mutable access to slot `n` (1-based) for building records by hand.
    ///
    /// Returns `None` when `n` is outside `1..=20`.
    pub fn slot_mut(&mut self, n: usize) -> Option<(&mut Option<String>, &mut Option<String>)> {
        let slot = match n {
            1 => (&mut self.str_ingredient1, &mut self.str_measure1),
            2 => (&mut self.str_ingredient2, &mut self.str_measure2),
            3 => (&mut self.str_ingredient3, &mut self.str_measure3),
            4 => (&mut self.str_ingredient4, &mut self.str_measure4),
            5 => (&mut self.str_ingredient5, &mut self.str_measure5),
            6 => (&mut self.str_ingredient6, &mut self.str_measure6),
            7 => (&mut self.str_ingredient7, &mut self.str_measure7),
            8 => (&mut self.str_ingredient8, &mut self.str_measure8),
            9 => (&mut self.str_ingredient9, &mut self.str_measure9),
            10 => (&mut self.str_ingredient10, &mut self.str_measure10),
            11 => (&mut self.str_ingredient11, &mut self.str_measure11),
            12 => (&mut self.str_ingredient12, &mut self.str_measure12),
            13 => (&mut self.str_ingredient13, &mut self.str_measure13),
            14 => (&mut self.str_ingredient14, &mut self.str_measure14),
            15 => (&mut self.str_ingredient15, &mut self.str_measure15),
            16 => (&mut self.str_ingredient16, &mut self.str_measure16),
            17 => (&mut self.str_ingredient17, &mut self.str_measure17),
            18 => (&mut self.str_ingredient18, &mut self.str_measure18),
            19 => (&mut self.str_ingredient19, &mut self.str_measure19),
            20 => (&mut self.str_ingredient20, &mut self.str_measure20),
            _ => return None,
        };
        Some(slot)
    }

    /// Extracts the non-empty ingredients, trimmed, in ascending slot order.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredient_slots()
            .into_iter()
            .filter_map(|(ingredient, measure)| {
                let name = non_blank(ingredient)?;
                Some(Ingredient {
                    name: name.to_string(),
                    measure: measure.map(str::trim).unwrap_or_default().to_string(),
                })
            })
            .collect()
    }

    /// Category with blank values treated as absent.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.str_category.as_deref())
    }

    /// Area with blank values treated as absent.
    pub fn area(&self) -> Option<&str> {
        non_blank(self.str_area.as_deref())
    }

    /// Projects the record to the card-sized summary.
    pub fn summary(&self) -> MealSummary {
        MealSummary {
            id: self.id_meal.clone(),
            name: self.str_meal.clone(),
            thumbnail_url: self.str_meal_thumb.clone().unwrap_or_default(),
            category: self.category().map(str::to_string),
            area: self.area().map(str::to_string),
        }
    }
}

/// Meal record returned by the filter endpoints: id, name and thumbnail only.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialMeal {
    pub id_meal: String,
    pub str_meal: String,
    pub str_meal_thumb: Option<String>,
}

impl PartialMeal {
    /// Creates a partial record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, thumb: impl Into<String>) -> Self {
        Self {
            id_meal: id.into(),
            str_meal: name.into(),
            str_meal_thumb: Some(thumb.into()),
        }
    }
}

/// Card-sized projection of a meal. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    /// Upstream meal id
    pub id: String,
    /// Display name
    pub name: String,
    /// Thumbnail image URL (empty when upstream has none)
    pub thumbnail_url: String,
    /// Category name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Area (cuisine) name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// One ingredient line of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Quantity text, possibly empty
    pub measure: String,
}

/// A full meal, cleaned up for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Upstream meal id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Area (cuisine) name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Cooking instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Thumbnail image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Tags, split from the comma-separated upstream field
    #[serde(default)]
    pub tags: Vec<String>,
    /// Video URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    /// Original recipe URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Ingredients in slot order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl From<&MealRecord> for Meal {
    fn from(record: &MealRecord) -> Self {
        let tags = record
            .str_tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: record.id_meal.clone(),
            name: record.str_meal.clone(),
            category: record.category().map(str::to_string),
            area: record.area().map(str::to_string),
            instructions: non_blank(record.str_instructions.as_deref()).map(str::to_string),
            thumbnail_url: non_blank(record.str_meal_thumb.as_deref()).map(str::to_string),
            tags,
            youtube_url: non_blank(record.str_youtube.as_deref()).map(str::to_string),
            source_url: non_blank(record.str_source.as_deref()).map(str::to_string),
            ingredients: record.ingredients(),
        }
    }
}

impl From<MealRecord> for Meal {
    fn from(record: MealRecord) -> Self {
        Meal::from(&record)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
