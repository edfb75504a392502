//! Facilities, modules, fuels, and the per-calculation context that binds
//! them to recipes.
//!
//! Nothing here is global: a [`CalcContext`] is built once per calculation
//! and passed by reference to every yield or fuel computation.

use std::collections::{BTreeSet, HashMap};

use crate::graph::{Ingredient, Recipe, RecipeKind};
use crate::id::{ItemId, RecipeId};
use crate::rational::{Rational, RationalError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FacilityError {
    #[error(transparent)]
    Rational(#[from] RationalError),
    #[error("facility {0} cannot run mining recipes")]
    NotMining(String),
    #[error("facility {0} has no free module slot")]
    NoFreeSlot(String),
    #[error("module {module} cannot be used with recipe {recipe}")]
    ModuleNotAllowed { module: String, recipe: String },
}

// ===========================================================================
// Modules
// ===========================================================================

/// A production modifier installed in a facility or a beacon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub category: String,
    pub productivity: Rational,
    pub speed: Rational,
    pub power: Rational,
    /// Recipe names this module is restricted to. Empty means unrestricted.
    pub limit: BTreeSet<String>,
}

impl Module {
    pub fn can_use(&self, recipe: &Recipe) -> bool {
        recipe.allows_all_modules() || self.limit.is_empty() || self.limit.contains(&recipe.name)
    }

    /// Only modules without a productivity bonus may go in a beacon.
    pub fn can_beacon(&self) -> bool {
        self.productivity.is_zero()
    }

    pub fn has_prod_effect(&self) -> bool {
        !self.productivity.is_zero()
    }
}

// ===========================================================================
// Facilities
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergySource {
    Electric,
    /// Burns fuel items; recipes run here gain a fuel ingredient.
    Chemical,
}

/// A building type that executes recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub crafting_speed: Rational,
    pub energy_usage: Rational,
    pub energy_source: EnergySource,
    pub module_slots: usize,
    /// Present only for mining drills.
    pub mining_power: Option<Rational>,
}

/// A facility together with the modules and beacons chosen for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityAssignment {
    pub facility: Facility,
    pub modules: Vec<Module>,
    pub beacon_module: Option<Module>,
    pub beacon_count: Rational,
}

impl FacilityAssignment {
    pub fn new(facility: Facility) -> Self {
        Self {
            facility,
            modules: Vec::new(),
            beacon_module: None,
            beacon_count: Rational::zero(),
        }
    }

    /// Install a module for `recipe`, respecting slot count and limits.
    pub fn install(&mut self, module: Module, recipe: &Recipe) -> Result<(), FacilityError> {
        if self.modules.len() >= self.facility.module_slots {
            return Err(FacilityError::NoFreeSlot(self.facility.name.clone()));
        }
        if !module.can_use(recipe) {
            return Err(FacilityError::ModuleNotAllowed {
                module: module.name,
                recipe: recipe.name.clone(),
            });
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn with_beacons(mut self, module: Module, count: Rational) -> Self {
        self.beacon_module = Some(module);
        self.beacon_count = count;
        self
    }

    /// Share of a beacon module's `effect` reaching this facility.
    fn beacon_share(&self, effect: impl Fn(&Module) -> &Rational) -> Rational {
        match &self.beacon_module {
            Some(m) => {
                let half = Rational::one_half();
                &(effect(m) * &self.beacon_count) * &half
            }
            None => Rational::zero(),
        }
    }

    /// Output multiplier from productivity modules.
    pub fn prod_effect(&self) -> Rational {
        Rational::one() + self.modules.iter().map(|m| &m.productivity).sum::<Rational>()
    }

    /// Crafting speed multiplier, floored at 1/5.
    pub fn speed_effect(&self) -> Rational {
        let speed = Rational::one()
            + self.modules.iter().map(|m| &m.speed).sum::<Rational>()
            + self.beacon_share(|m| &m.speed);
        speed.max(Rational::one_fifth())
    }

    /// Power draw of one facility, with the module multiplier floored at 1/5.
    pub fn power_usage(&self) -> Rational {
        let factor = Rational::one()
            + self.modules.iter().map(|m| &m.power).sum::<Rational>()
            + self.beacon_share(|m| &m.power);
        &self.facility.energy_usage * &factor.max(Rational::one_fifth())
    }

    /// Executions per unit time of `recipe` in one facility.
    pub fn recipe_rate(&self, recipe: &Recipe) -> Result<Rational, FacilityError> {
        let speed = &self.facility.crafting_speed * &self.speed_effect();
        match &recipe.kind {
            RecipeKind::Mining {
                hardness,
                mining_time,
            } => {
                let Some(power) = &self.facility.mining_power else {
                    return Err(FacilityError::NotMining(self.facility.name.clone()));
                };
                Ok((&(power - hardness) * &speed).checked_div(mining_time)?)
            }
            RecipeKind::Standard | RecipeKind::Resource => Ok(speed.checked_div(&recipe.time)?),
        }
    }
}

// ===========================================================================
// Fuel
// ===========================================================================

const ENERGY_SUFFIXES: [&str; 6] = ["J", "kJ", "MJ", "GJ", "TJ", "PJ"];

/// A burnable item and its energy value in joules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fuel {
    pub name: String,
    pub item: ItemId,
    pub category: String,
    pub value: Rational,
}

impl Fuel {
    /// Energy value scaled to the largest suffix that keeps it above 1000,
    /// rounded up to a whole number, e.g. `"4 MJ"`.
    pub fn value_string(&self) -> String {
        let thousand = Rational::from(1000_i64);
        let mut x = self.value.clone();
        let mut i = 0;
        while thousand < x && i < ENERGY_SUFFIXES.len() - 1 {
            x = x.div_pow10(3);
            i += 1;
        }
        format!("{} {}", x.to_up_decimal(0), ENERGY_SUFFIXES[i])
    }
}

/// Order fuels by ascending energy value. Stable for equal values.
pub fn sort_fuels(fuels: &mut [Fuel]) {
    fuels.sort_by(|a, b| a.value.cmp(&b.value));
}

// ===========================================================================
// Calculation context
// ===========================================================================

/// Facility choices and preferred fuel for one calculation.
#[derive(Debug, Clone, Default)]
pub struct CalcContext {
    pub assignments: HashMap<RecipeId, FacilityAssignment>,
    pub preferred_fuel: Option<Fuel>,
}

impl CalcContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignment(mut self, recipe: RecipeId, assignment: FacilityAssignment) -> Self {
        self.assignments.insert(recipe, assignment);
        self
    }

    pub fn with_preferred_fuel(mut self, fuel: Fuel) -> Self {
        self.preferred_fuel = Some(fuel);
        self
    }

    pub fn facility_for(&self, recipe: RecipeId) -> Option<&FacilityAssignment> {
        self.assignments.get(&recipe)
    }

    /// Units of `item` yielded per execution of `recipe`, including
    /// productivity. `None` when the recipe does not produce `item`.
    pub fn gives(&self, id: RecipeId, recipe: &Recipe, item: ItemId) -> Option<Rational> {
        let amount = recipe.product_amount(item)?;
        Some(match self.facility_for(id) {
            Some(assignment) => amount * assignment.prod_effect(),
            None => amount,
        })
    }

    /// The implicit fuel input of `recipe` when it runs in a fuel-burning
    /// facility and a preferred fuel is set.
    pub fn fuel_ingredient(
        &self,
        id: RecipeId,
        recipe: &Recipe,
    ) -> Result<Option<Ingredient>, FacilityError> {
        let Some(assignment) = self.facility_for(id) else {
            return Ok(None);
        };
        if assignment.facility.energy_source != EnergySource::Chemical {
            return Ok(None);
        }
        let Some(fuel) = &self.preferred_fuel else {
            return Ok(None);
        };
        let per_execution = assignment
            .power_usage()
            .checked_div(&assignment.recipe_rate(recipe)?)?;
        let amount = per_execution.checked_div(&fuel.value)?;
        Ok(Some(Ingredient::new(amount, fuel.item)))
    }
}
