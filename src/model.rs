use serde::{Deserialize, Serialize};

/// A single dish as served by the recipes API.
///
/// Collections keep the order they had in the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub calories_per_serving: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub meal_type: Vec<String>,
}

/// Envelope returned by `GET /recipes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}
