//! Naive recursive rate propagation.
//!
//! Starting from a target item and rate, walks down single-producer chains
//! and scales each recipe's execution rate exactly. Items with several
//! producers or multi-product recipes ("weird" items) are not expanded;
//! their demand is recorded as unfinished and left for the tableau solver.
//!
//! A graph whose cycles pass only through non-weird items would recurse
//! forever, so recursion is capped at [`Propagator::max_depth`] and reported
//! as [`PropagateError::DepthExceeded`].

use std::collections::{BTreeMap, HashSet};

use crate::facility::{CalcContext, FacilityError};
use crate::graph::ProductionGraph;
use crate::id::{ItemId, RecipeId};
use crate::rational::{Rational, RationalError};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropagateError {
    #[error("recursion exceeded depth {depth} at item {item}")]
    DepthExceeded { item: String, depth: usize },
    #[error("item {0} has no producing recipe")]
    NoProducer(String),
    #[error("recipe {recipe} does not produce {item}")]
    NotAProduct { recipe: String, item: String },
    #[error("unknown item id {0:?}")]
    UnknownItem(ItemId),
    #[error(transparent)]
    Rational(#[from] RationalError),
    #[error(transparent)]
    Facility(#[from] FacilityError),
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Result of one propagation: resolved recipe rates and unresolved item
/// demand, both keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    /// The requested output rate.
    pub rate: Rational,
    /// The requested item.
    pub item: ItemId,
    /// Recipe name to execution rate.
    pub totals: BTreeMap<String, Rational>,
    /// Weird item name to demanded rate.
    pub unfinished: BTreeMap<String, Rational>,
}

impl Totals {
    pub fn new(rate: Rational, item: ItemId) -> Self {
        Self {
            rate,
            item,
            totals: BTreeMap::new(),
            unfinished: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, recipe: &str, rate: &Rational) {
        accumulate(&mut self.totals, recipe, rate);
    }

    pub fn add_unfinished(&mut self, item: &str, rate: &Rational) {
        accumulate(&mut self.unfinished, item, rate);
    }

    /// Pointwise sum of both maps. `other`'s target is discarded.
    pub fn combine(&mut self, other: Totals) {
        for (name, rate) in other.totals {
            self.add(&name, &rate);
        }
        for (name, rate) in other.unfinished {
            self.add_unfinished(&name, &rate);
        }
    }

    /// True when no demand was handed off.
    pub fn is_resolved(&self) -> bool {
        self.unfinished.is_empty()
    }
}

fn accumulate(map: &mut BTreeMap<String, Rational>, key: &str, rate: &Rational) {
    match map.get_mut(key) {
        Some(total) => *total = &*total + rate,
        None => {
            map.insert(key.to_string(), rate.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Propagator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagator {
    pub max_depth: usize,
}

impl Default for Propagator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Propagator {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Expand a demand for `rate` units of `item` per unit time.
    ///
    /// Recipes in `ignore` get their rate recorded but their inputs are not
    /// expanded.
    pub fn produce(
        &self,
        graph: &ProductionGraph,
        item: ItemId,
        rate: Rational,
        ignore: &HashSet<RecipeId>,
        ctx: &CalcContext,
    ) -> Result<Totals, PropagateError> {
        self.produce_at(graph, item, rate, ignore, ctx, 0)
    }

    fn produce_at(
        &self,
        graph: &ProductionGraph,
        item_id: ItemId,
        rate: Rational,
        ignore: &HashSet<RecipeId>,
        ctx: &CalcContext,
        depth: usize,
    ) -> Result<Totals, PropagateError> {
        let item = graph
            .item(item_id)
            .ok_or(PropagateError::UnknownItem(item_id))?;
        if depth > self.max_depth {
            return Err(PropagateError::DepthExceeded {
                item: item.name.clone(),
                depth: self.max_depth,
            });
        }

        if graph.is_weird(item_id) {
            tracing::debug!(item = %item.name, %rate, "unresolved demand");
            let mut totals = Totals::new(rate.clone(), item_id);
            totals.add_unfinished(&item.name, &rate);
            return Ok(totals);
        }

        let (recipe_id, recipe) = item
            .recipes()
            .first()
            .and_then(|&id| graph.recipe(id).map(|r| (id, r)))
            .ok_or_else(|| PropagateError::NoProducer(item.name.clone()))?;
        let gives = ctx
            .gives(recipe_id, recipe, item_id)
            .ok_or_else(|| PropagateError::NotAProduct {
                recipe: recipe.name.clone(),
                item: item.name.clone(),
            })?;
        let executions = rate.checked_div(&gives)?;
        let mut totals = Totals::new(rate, item_id);
        totals.add(&recipe.name, &executions);
        if ignore.contains(&recipe_id) {
            return Ok(totals);
        }

        let fuel = ctx.fuel_ingredient(recipe_id, recipe)?;
        for ing in recipe.ingredients.iter().chain(fuel.iter()) {
            tracing::trace!(recipe = %recipe.name, depth, "expanding ingredient");
            let sub = self.produce_at(
                graph,
                ing.item,
                &executions * &ing.amount,
                ignore,
                ctx,
                depth + 1,
            )?;
            totals.combine(sub);
        }
        Ok(totals)
    }
}

/// [`Propagator::produce`] with the default depth cap.
pub fn produce(
    graph: &ProductionGraph,
    item: ItemId,
    rate: Rational,
    ignore: &HashSet<RecipeId>,
    ctx: &CalcContext,
) -> Result<Totals, PropagateError> {
    Propagator::default().produce(graph, item, rate, ignore, ctx)
}
