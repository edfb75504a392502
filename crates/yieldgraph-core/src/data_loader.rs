//! Dataset loading from JSON.
//!
//! Feature-gated behind `data-loader`. Reads the exported game dataset
//! (`items`, `recipes`, `resource`, `fuel`) into a [`GraphBuilder`] plus the
//! fuel table. Amounts arrive as floats and go through
//! [`Rational::from_f64`]. The water, reactor-cycle and rocket-launch
//! recipes are not in the export and get added here.

use std::collections::BTreeMap;

use crate::facility::{Fuel, sort_fuels};
use crate::graph::{GraphBuilder, GraphError, Ingredient, Phase, RecipeDef};
use crate::id::ItemId;
use crate::rational::{Rational, RationalError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("bad amount: {0}")]
    Rational(#[from] RationalError),
    #[error("unknown item reference: {0}")]
    UnknownItemRef(String),
    #[error("no amount given for {item} in {recipe}")]
    MissingAmount { recipe: String, item: String },
    #[error("item {0} is listed as fuel but has no fuel value or category")]
    NotAFuel(String),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level dataset. Maps are keyed by name.
#[derive(Debug, serde::Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: BTreeMap<String, ItemData>,
    #[serde(default)]
    pub recipes: BTreeMap<String, RecipeData>,
    #[serde(default, alias = "resources")]
    pub resource: BTreeMap<String, ResourceData>,
    #[serde(default)]
    pub fuel: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ItemData {
    #[serde(rename = "type", default)]
    pub item_type: String, // "item", "fluid", "abstract", ...
    pub fuel_category: Option<String>,
    pub fuel_value: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RecipeData {
    pub name: String,
    pub category: Option<String>,
    pub subgroup: Option<String>,
    pub energy_required: f64,
    #[serde(default)]
    pub ingredients: Vec<AmountData>,
    #[serde(default)]
    pub results: Vec<AmountData>,
}

/// An ingredient or product. Either `amount` or both bounds are present.
#[derive(Debug, serde::Deserialize)]
pub struct AmountData {
    pub name: String,
    pub amount: Option<f64>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub probability: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ResourceData {
    pub name: String,
    pub category: Option<String>,
    pub minable: MinableData,
}

#[derive(Debug, serde::Deserialize)]
pub struct MinableData {
    pub hardness: f64,
    pub mining_time: f64,
    #[serde(default)]
    pub results: Vec<AmountData>,
    pub required_fluid: Option<String>,
    pub fluid_amount: Option<f64>,
}

/// Output of loading: an open builder (callers may register more recipes
/// before `build()`) and fuels grouped by category, cheapest first.
#[derive(Debug)]
pub struct LoadedData {
    pub builder: GraphBuilder,
    pub fuels: BTreeMap<String, Vec<Fuel>>,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

pub fn load_dataset_json(json: &str) -> Result<LoadedData, DataLoadError> {
    let data: Dataset = serde_json::from_str(json)?;
    build_dataset(&data)
}

pub fn load_dataset_json_bytes(bytes: &[u8]) -> Result<LoadedData, DataLoadError> {
    let data: Dataset = serde_json::from_slice(bytes)?;
    build_dataset(&data)
}

const SKIPPED_SUBGROUP: &str = "empty-barrel";
const MINED_CATEGORY: &str = "basic-solid";
const SKIPPED_FUELS: &[&str] = &["small-electric-pole"];
const REACTOR_CYCLE: &str = "nuclear-reactor-cycle";

fn item_ref(data: &Dataset, builder: &mut GraphBuilder, name: &str) -> Result<ItemId, DataLoadError> {
    let item = data
        .items
        .get(name)
        .ok_or_else(|| DataLoadError::UnknownItemRef(name.to_string()))?;
    let phase = match item.item_type.as_str() {
        "fluid" => Phase::Fluid,
        "abstract" => Phase::Abstract,
        _ => Phase::Solid,
    };
    Ok(builder.item(name, phase))
}

fn ingredient(
    data: &Dataset,
    builder: &mut GraphBuilder,
    recipe: &str,
    entry: &AmountData,
) -> Result<Ingredient, DataLoadError> {
    let amount = match (entry.amount, entry.amount_min, entry.amount_max) {
        (Some(amount), _, _) => amount,
        (None, Some(min), Some(max)) => (min + max) / 2.0,
        _ => {
            return Err(DataLoadError::MissingAmount {
                recipe: recipe.to_string(),
                item: entry.name.clone(),
            });
        }
    };
    let amount = amount * entry.probability.unwrap_or(1.0);
    let item = item_ref(data, builder, &entry.name)?;
    Ok(Ingredient::new(Rational::from_f64(amount)?, item))
}

/// Recipes the game runs outside its recipe list: pumping water, burning
/// fuel cells in a reactor, and launching a rocket. Each is added only when
/// the dataset has the items it touches and no recipe of the same name.
fn add_builtin_recipes(data: &Dataset, builder: &mut GraphBuilder) -> Result<(), DataLoadError> {
    let has = |names: &[&str]| names.iter().all(|n| data.items.contains_key(*n));

    if has(&["water"][..]) && builder.recipe_id("water").is_none() {
        let water = item_ref(data, builder, "water")?;
        let def = RecipeDef::new("water", Rational::new(1, 1200)?)
            .category("water")
            .output(Rational::one(), water);
        builder.add_recipe(def)?;
    }

    let cell_items = ["uranium-fuel-cell", "used-up-uranium-fuel-cell"];
    if has(&cell_items[..]) && builder.recipe_id(REACTOR_CYCLE).is_none() {
        let cell = item_ref(data, builder, "uranium-fuel-cell")?;
        let spent = item_ref(data, builder, "used-up-uranium-fuel-cell")?;
        let cycle = builder.item(REACTOR_CYCLE, Phase::Abstract);
        let def = RecipeDef::new(REACTOR_CYCLE, Rational::from(200_i64))
            .category("nuclear")
            .input(Rational::one(), cell)
            .output(Rational::one(), spent)
            .output(Rational::one(), cycle);
        builder.add_recipe(def)?;
    }

    let rocket_items = ["rocket-part", "satellite", "space-science-pack"];
    if has(&rocket_items[..]) && builder.recipe_id("rocket-launch").is_none() {
        let part = item_ref(data, builder, "rocket-part")?;
        let satellite = item_ref(data, builder, "satellite")?;
        let science = item_ref(data, builder, "space-science-pack")?;
        let def = RecipeDef::new("rocket-launch", Rational::one())
            .input(Rational::from(100_i64), part)
            .input(Rational::one(), satellite)
            .output(Rational::from(1000_i64), science);
        builder.add_recipe(def)?;
    }
    Ok(())
}

fn build_dataset(data: &Dataset) -> Result<LoadedData, DataLoadError> {
    let mut builder = GraphBuilder::new();

    // Phase 1: crafting recipes
    for recipe in data.recipes.values() {
        if recipe.subgroup.as_deref() == Some(SKIPPED_SUBGROUP) {
            continue;
        }
        let mut def = RecipeDef::new(&recipe.name, Rational::from_f64(recipe.energy_required)?);
        def.category = recipe.category.clone();
        for entry in &recipe.ingredients {
            def.ingredients
                .push(ingredient(data, &mut builder, &recipe.name, entry)?);
        }
        for entry in &recipe.results {
            def.products
                .push(ingredient(data, &mut builder, &recipe.name, entry)?);
        }
        builder.add_recipe(def)?;
    }

    add_builtin_recipes(data, &mut builder)?;

    // Phase 2: mineable resources
    for resource in data.resource.values() {
        let category = resource.category.as_deref().unwrap_or(MINED_CATEGORY);
        if category != MINED_CATEGORY {
            continue;
        }
        let props = &resource.minable;
        let mut def = RecipeDef::new(&resource.name, Rational::zero());
        def.category = Some(format!("mining-{category}"));
        if let Some(fluid) = &props.required_fluid {
            let amount = props.fluid_amount.ok_or_else(|| DataLoadError::MissingAmount {
                recipe: resource.name.clone(),
                item: fluid.clone(),
            })? / 10.0;
            let item = item_ref(data, &mut builder, fluid)?;
            def.ingredients
                .push(Ingredient::new(Rational::from_f64(amount)?, item));
        }
        for entry in &props.results {
            def.products
                .push(ingredient(data, &mut builder, &resource.name, entry)?);
        }
        builder.add_mining_recipe(
            def,
            Rational::from_f64(props.hardness)?,
            Rational::from_f64(props.mining_time)?,
        )?;
    }

    // Phase 3: fuels
    let mut fuels: BTreeMap<String, Vec<Fuel>> = BTreeMap::new();
    for name in &data.fuel {
        if SKIPPED_FUELS.contains(&name.as_str()) {
            continue;
        }
        let item = data
            .items
            .get(name)
            .ok_or_else(|| DataLoadError::UnknownItemRef(name.clone()))?;
        let (Some(category), Some(value)) = (&item.fuel_category, item.fuel_value) else {
            return Err(DataLoadError::NotAFuel(name.clone()));
        };
        let fuel = Fuel {
            name: name.clone(),
            item: item_ref(data, &mut builder, name)?,
            category: category.clone(),
            value: Rational::from_f64(value)?,
        };
        fuels.entry(category.clone()).or_default().push(fuel);
    }
    for group in fuels.values_mut() {
        sort_fuels(group);
    }

    tracing::debug!(
        recipes = data.recipes.len(),
        resources = data.resource.len(),
        fuels = data.fuel.len(),
        "loaded dataset"
    );
    Ok(LoadedData { builder, fuels })
}
