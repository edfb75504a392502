//! Item/recipe dependency graph.
//!
//! Items and recipes live in flat [`SlotMap`] arenas and refer to each other
//! only by [`ItemId`] / [`RecipeId`], so a recipe that feeds its own input
//! chain needs no special handling. The graph is assembled through a
//! [`GraphBuilder`] and frozen into a read-only [`ProductionGraph`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::id::{ItemId, RecipeId};
use crate::rational::Rational;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Physical classification of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Solid,
    Fluid,
    /// Synthetic bookkeeping entity, e.g. a reactor cycle counter.
    Abstract,
}

/// A named item plus the recipes that produce and consume it.
///
/// The back-reference lists are filled by recipe registration only.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub phase: Phase,
    recipes: Vec<RecipeId>,
    uses: Vec<RecipeId>,
}

impl Item {
    fn new(name: &str, phase: Phase) -> Self {
        Self {
            name: name.to_string(),
            phase,
            recipes: Vec::new(),
            uses: Vec::new(),
        }
    }

    /// Recipes that list this item among their products.
    pub fn recipes(&self) -> &[RecipeId] {
        &self.recipes
    }

    /// Recipes that consume this item.
    pub fn uses(&self) -> &[RecipeId] {
        &self.uses
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Quantity of an item consumed or produced by one recipe execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub amount: Rational,
    pub item: ItemId,
}

impl Ingredient {
    pub fn new(amount: Rational, item: ItemId) -> Self {
        Self { amount, item }
    }
}

/// Variant-specific recipe data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeKind {
    Standard,
    /// Synthesized for an item with no producer; raw extraction.
    Resource,
    Mining {
        hardness: Rational,
        mining_time: Rational,
    },
}

/// A transformation rule. Shared fields plus a [`RecipeKind`] tag.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    pub category: Option<String>,
    pub time: Rational,
    pub ingredients: Vec<Ingredient>,
    pub products: Vec<Ingredient>,
    pub kind: RecipeKind,
}

impl Recipe {
    pub fn makes_resource(&self) -> bool {
        !matches!(self.kind, RecipeKind::Standard)
    }

    /// Whether any module may be applied regardless of its limitation list.
    pub fn allows_all_modules(&self) -> bool {
        matches!(self.kind, RecipeKind::Mining { .. })
    }

    /// Per-execution amount of `item` among the products, summed over every
    /// entry that names it. `None` when the recipe does not produce `item`.
    pub fn product_amount(&self, item: ItemId) -> Option<Rational> {
        self.products
            .iter()
            .filter(|p| p.item == item)
            .map(|p| &p.amount)
            .fold(None, |total, amount| {
                Some(match total {
                    Some(total) => total + amount,
                    None => amount.clone(),
                })
            })
    }

    /// A recipe can be left unexpanded when it has inputs and none of its
    /// products is weird.
    pub fn can_ignore(&self, graph: &ProductionGraph) -> bool {
        !self.ingredients.is_empty() && !self.products.iter().any(|p| graph.is_weird(p.item))
    }
}

/// Registration input for a recipe.
#[derive(Debug, Clone)]
pub struct RecipeDef {
    pub name: String,
    pub category: Option<String>,
    pub time: Rational,
    pub ingredients: Vec<Ingredient>,
    pub products: Vec<Ingredient>,
}

impl RecipeDef {
    pub fn new(name: &str, time: Rational) -> Self {
        Self {
            name: name.to_string(),
            category: None,
            time,
            ingredients: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn input(mut self, amount: Rational, item: ItemId) -> Self {
        self.ingredients.push(Ingredient::new(amount, item));
        self
    }

    pub fn output(mut self, amount: Rational, item: ItemId) -> Self {
        self.products.push(Ingredient::new(amount, item));
        self
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Mutable assembly stage. Registration is the only way back-references
/// get populated.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    items: SlotMap<ItemId, Item>,
    item_name_to_id: HashMap<String, ItemId>,
    recipes: SlotMap<RecipeId, Recipe>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create an item. The phase of an existing item is left as is.
    pub fn item(&mut self, name: &str, phase: Phase) -> ItemId {
        if let Some(&id) = self.item_name_to_id.get(name) {
            return id;
        }
        let id = self.items.insert(Item::new(name, phase));
        self.item_name_to_id.insert(name.to_string(), id);
        id
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    pub fn add_recipe(&mut self, def: RecipeDef) -> Result<RecipeId, GraphError> {
        self.register(def, RecipeKind::Standard)
    }

    /// Register an extraction recipe. Its crafting time is always zero; the
    /// rate comes from `hardness` and `mining_time`.
    pub fn add_mining_recipe(
        &mut self,
        mut def: RecipeDef,
        hardness: Rational,
        mining_time: Rational,
    ) -> Result<RecipeId, GraphError> {
        def.time = Rational::zero();
        self.register(
            def,
            RecipeKind::Mining {
                hardness,
                mining_time,
            },
        )
    }

    fn register(&mut self, def: RecipeDef, kind: RecipeKind) -> Result<RecipeId, GraphError> {
        if self.recipe_name_to_id.contains_key(&def.name) {
            return Err(GraphError::DuplicateRecipe(def.name));
        }
        for entry in def.ingredients.iter().chain(def.products.iter()) {
            let Some(item) = self.items.get(entry.item) else {
                return Err(GraphError::InvalidItemRef(def.name));
            };
            if entry.amount.is_negative() {
                return Err(GraphError::NegativeAmount {
                    recipe: def.name,
                    item: item.name.clone(),
                });
            }
        }

        let name = def.name.clone();
        let id = self.recipes.insert(Recipe {
            name: def.name,
            category: def.category,
            time: def.time,
            ingredients: def.ingredients,
            products: def.products,
            kind,
        });
        self.recipe_name_to_id.insert(name, id);

        let recipe = &self.recipes[id];
        for ing in &recipe.ingredients {
            let uses = &mut self.items[ing.item].uses;
            if !uses.contains(&id) {
                uses.push(id);
            }
        }
        for product in &recipe.products {
            let producers = &mut self.items[product.item].recipes;
            if !producers.contains(&id) {
                producers.push(id);
            }
        }
        Ok(id)
    }

    /// Freeze the graph. Every item without a producer receives a Resource
    /// recipe named after it that yields one unit in zero time.
    pub fn build(mut self) -> Result<ProductionGraph, GraphError> {
        let raw: Vec<(ItemId, String)> = self
            .items
            .iter()
            .filter(|(_, item)| item.recipes.is_empty())
            .map(|(id, item)| (id, item.name.clone()))
            .collect();
        for (id, name) in &raw {
            let def = RecipeDef::new(name, Rational::zero()).output(Rational::one(), *id);
            self.register(def, RecipeKind::Resource)?;
        }
        if !raw.is_empty() {
            tracing::debug!(count = raw.len(), "synthesized resource recipes");
        }

        Ok(ProductionGraph {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Frozen graph
// ---------------------------------------------------------------------------

/// Read-only item/recipe graph for one calculation session.
#[derive(Debug, Clone)]
pub struct ProductionGraph {
    items: SlotMap<ItemId, Item>,
    item_name_to_id: HashMap<String, ItemId>,
    recipes: SlotMap<RecipeId, Recipe>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl ProductionGraph {
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// Like [`item_id`](Self::item_id) but reports a missing name as an error.
    pub fn require_item(&self, name: &str) -> Result<ItemId, GraphError> {
        self.item_id(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn require_recipe(&self, name: &str) -> Result<RecipeId, GraphError> {
        self.recipe_id(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    pub fn recipes(&self) -> impl Iterator<Item = (RecipeId, &Recipe)> {
        self.recipes.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// An item is weird when it has several producers, or its single
    /// producer yields more than one distinct item. Unknown ids are not weird.
    pub fn is_weird(&self, id: ItemId) -> bool {
        let Some(item) = self.items.get(id) else {
            return false;
        };
        match item.recipes.as_slice() {
            [] => false,
            [only] => self.recipes.get(*only).is_some_and(|r| {
                r.products
                    .iter()
                    .any(|p| p.item != r.products[0].item)
            }),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate recipe: {0}")]
    DuplicateRecipe(String),
    #[error("invalid item reference in recipe {0}")]
    InvalidItemRef(String),
    #[error("negative amount of {item} in recipe {recipe}")]
    NegativeAmount { recipe: String, item: String },
}
