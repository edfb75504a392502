//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use std::collections::BTreeSet;

use crate::facility::{EnergySource, Facility, Fuel, Module};
use crate::graph::{GraphBuilder, Phase, ProductionGraph, RecipeDef};
use crate::id::ItemId;
use crate::matrix::Matrix;
use crate::rational::Rational;

// ===========================================================================
// Rational helpers
// ===========================================================================

/// `p / q`. Panics on a zero denominator.
pub fn rat(p: i64, q: i64) -> Rational {
    match Rational::new(p, q) {
        Ok(r) => r,
        Err(e) => panic!("rat({p}, {q}): {e}"),
    }
}

pub fn int(n: i64) -> Rational {
    Rational::from(n)
}

/// Build a tableau from integer-pair rows, `(p, q)` meaning `p/q`.
pub fn tableau(rows: &[&[(i64, i64)]]) -> Matrix {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|&(p, q)| rat(p, q)).collect())
        .collect();
    match Matrix::from_rows(rows) {
        Ok(m) => m,
        Err(e) => panic!("tableau: {e}"),
    }
}

fn built(b: GraphBuilder) -> ProductionGraph {
    match b.build() {
        Ok(g) => g,
        Err(e) => panic!("fixture graph: {e}"),
    }
}

fn recipe(b: &mut GraphBuilder, def: RecipeDef) {
    if let Err(e) = b.add_recipe(def) {
        panic!("fixture recipe: {e}");
    }
}

// ===========================================================================
// Graphs
// ===========================================================================

/// X needs 2 Y, Y needs 1 Z, Z is raw. All recipes take one time unit.
pub fn chain_graph() -> ProductionGraph {
    let mut b = GraphBuilder::new();
    let x = b.item("X", Phase::Solid);
    let y = b.item("Y", Phase::Solid);
    let z = b.item("Z", Phase::Solid);
    recipe(&mut b, RecipeDef::new("X", int(1)).input(int(2), y).output(int(1), x));
    recipe(&mut b, RecipeDef::new("Y", int(1)).input(int(1), z).output(int(1), y));
    built(b)
}

/// Iron smelting, gears and circuits. Every item has a single producer.
pub fn electronics_graph() -> ProductionGraph {
    let mut b = GraphBuilder::new();
    let iron_ore = b.item("iron-ore", Phase::Solid);
    let copper_ore = b.item("copper-ore", Phase::Solid);
    let iron = b.item("iron-plate", Phase::Solid);
    let copper = b.item("copper-plate", Phase::Solid);
    let cable = b.item("copper-cable", Phase::Solid);
    let circuit = b.item("electronic-circuit", Phase::Solid);
    let gear = b.item("iron-gear-wheel", Phase::Solid);
    let inserter = b.item("inserter", Phase::Solid);

    recipe(
        &mut b,
        RecipeDef::new("iron-plate", rat(16, 5))
            .category("smelting")
            .input(int(1), iron_ore)
            .output(int(1), iron),
    );
    recipe(
        &mut b,
        RecipeDef::new("copper-plate", rat(16, 5))
            .category("smelting")
            .input(int(1), copper_ore)
            .output(int(1), copper),
    );
    recipe(
        &mut b,
        RecipeDef::new("copper-cable", rat(1, 2))
            .input(int(1), copper)
            .output(int(2), cable),
    );
    recipe(
        &mut b,
        RecipeDef::new("electronic-circuit", rat(1, 2))
            .input(int(1), iron)
            .input(int(3), cable)
            .output(int(1), circuit),
    );
    recipe(
        &mut b,
        RecipeDef::new("iron-gear-wheel", rat(1, 2))
            .input(int(2), iron)
            .output(int(1), gear),
    );
    recipe(
        &mut b,
        RecipeDef::new("inserter", rat(1, 2))
            .input(int(1), circuit)
            .input(int(1), gear)
            .input(int(1), iron)
            .output(int(1), inserter),
    );
    built(b)
}

/// Refinery products: advanced processing yields three products and
/// cracking gives a second producer for light oil and petroleum gas.
pub fn oil_graph() -> ProductionGraph {
    let mut b = GraphBuilder::new();
    let crude = b.item("crude-oil", Phase::Fluid);
    let water = b.item("water", Phase::Fluid);
    let heavy = b.item("heavy-oil", Phase::Fluid);
    let light = b.item("light-oil", Phase::Fluid);
    let gas = b.item("petroleum-gas", Phase::Fluid);
    let coal = b.item("coal", Phase::Solid);
    let plastic = b.item("plastic-bar", Phase::Solid);

    recipe(
        &mut b,
        RecipeDef::new("advanced-oil-processing", int(5))
            .category("oil-processing")
            .input(int(100), crude)
            .input(int(50), water)
            .output(int(25), heavy)
            .output(int(45), light)
            .output(int(55), gas),
    );
    recipe(
        &mut b,
        RecipeDef::new("heavy-oil-cracking", int(2))
            .category("chemistry")
            .input(int(40), heavy)
            .input(int(30), water)
            .output(int(30), light),
    );
    recipe(
        &mut b,
        RecipeDef::new("light-oil-cracking", int(2))
            .category("chemistry")
            .input(int(30), light)
            .input(int(30), water)
            .output(int(20), gas),
    );
    recipe(
        &mut b,
        RecipeDef::new("plastic-bar", int(1))
            .category("chemistry")
            .input(int(20), gas)
            .input(int(1), coal)
            .output(int(2), plastic),
    );
    built(b)
}

/// Fuel cells burn in a reactor cycle that yields spent cells and an
/// abstract cycle counter.
pub fn reactor_graph() -> ProductionGraph {
    let mut b = GraphBuilder::new();
    let iron = b.item("iron-plate", Phase::Solid);
    let u235 = b.item("uranium-235", Phase::Solid);
    let u238 = b.item("uranium-238", Phase::Solid);
    let cell = b.item("uranium-fuel-cell", Phase::Solid);
    let spent = b.item("used-up-uranium-fuel-cell", Phase::Solid);
    let cycle = b.item("nuclear-reactor-cycle", Phase::Abstract);

    recipe(
        &mut b,
        RecipeDef::new("uranium-fuel-cell", int(10))
            .input(int(10), iron)
            .input(int(1), u235)
            .input(int(19), u238)
            .output(int(10), cell),
    );
    recipe(
        &mut b,
        RecipeDef::new("nuclear-reactor-cycle", int(200))
            .category("nuclear")
            .input(int(1), cell)
            .output(int(1), spent)
            .output(int(1), cycle),
    );
    built(b)
}

/// A linear chain of `len` items, `item-0` being raw and each later item
/// needing one of the previous.
pub fn deep_chain(len: usize) -> ProductionGraph {
    let mut b = GraphBuilder::new();
    let mut prev: Option<ItemId> = None;
    for i in 0..len {
        let name = format!("item-{i}");
        let item = b.item(&name, Phase::Solid);
        if let Some(input) = prev {
            recipe(
                &mut b,
                RecipeDef::new(&name, int(1))
                    .input(int(1), input)
                    .output(int(1), item),
            );
        }
        prev = Some(item);
    }
    built(b)
}

// ===========================================================================
// Tableaus
// ===========================================================================

/// maximize x + y subject to x + 2y <= 4, 3x + y <= 6.
/// Optimum 14/5 at x = 8/5, y = 6/5.
pub fn two_constraint_lp() -> Matrix {
    tableau(&[
        &[(1, 1), (2, 1), (1, 1), (0, 1), (4, 1)],
        &[(3, 1), (1, 1), (0, 1), (1, 1), (6, 1)],
        &[(-1, 1), (-1, 1), (0, 1), (0, 1), (0, 1)],
    ])
}

/// Beale's degenerate example, which cycles under Dantzig's rule with
/// first-found tie breaking. Optimum 1.
pub fn beale_tableau() -> Matrix {
    tableau(&[
        &[(1, 2), (-11, 2), (-5, 2), (9, 1), (1, 1), (0, 1), (0, 1), (0, 1)],
        &[(1, 2), (-3, 2), (-1, 2), (1, 1), (0, 1), (1, 1), (0, 1), (0, 1)],
        &[(1, 1), (0, 1), (0, 1), (0, 1), (0, 1), (0, 1), (1, 1), (1, 1)],
        &[(-10, 1), (57, 1), (9, 1), (24, 1), (0, 1), (0, 1), (0, 1), (0, 1)],
    ])
}

/// `n` constraints over `n` structural variables with a slack basis.
/// Coefficients range over 1..=7 so the tableau is dense but bounded.
pub fn dense_lp(n: usize) -> Matrix {
    let cols = 2 * n + 1;
    let mut m = Matrix::new(n + 1, cols);
    for row in 0..n {
        for col in 0..n {
            m.set_index(row, col, int(1 + ((row * col + row + 2 * col) % 7) as i64));
        }
        m.set_index(row, n + row, int(1));
        m.set_index(row, cols - 1, int(10 + row as i64));
    }
    for col in 0..n {
        m.set_index(n, col, int(-1 - (col % 4) as i64));
    }
    m
}

// ===========================================================================
// Facilities and fuel
// ===========================================================================

pub fn assembler() -> Facility {
    Facility {
        name: "assembling-machine-2".to_string(),
        crafting_speed: rat(3, 4),
        energy_usage: int(150_000),
        energy_source: EnergySource::Electric,
        module_slots: 2,
        mining_power: None,
    }
}

pub fn stone_furnace() -> Facility {
    Facility {
        name: "stone-furnace".to_string(),
        crafting_speed: int(1),
        energy_usage: int(90_000),
        energy_source: EnergySource::Chemical,
        module_slots: 0,
        mining_power: None,
    }
}

pub fn burner_drill() -> Facility {
    Facility {
        name: "burner-mining-drill".to_string(),
        crafting_speed: rat(1, 4),
        energy_usage: int(150_000),
        energy_source: EnergySource::Chemical,
        module_slots: 0,
        mining_power: Some(rat(5, 2)),
    }
}

pub fn productivity_module() -> Module {
    Module {
        name: "productivity-module".to_string(),
        category: "productivity".to_string(),
        productivity: rat(1, 10),
        speed: rat(-3, 20),
        power: rat(2, 5),
        limit: BTreeSet::new(),
    }
}

pub fn speed_module() -> Module {
    Module {
        name: "speed-module".to_string(),
        category: "speed".to_string(),
        productivity: Rational::zero(),
        speed: rat(1, 5),
        power: rat(1, 2),
        limit: BTreeSet::new(),
    }
}

/// Coal at 4 MJ per item.
pub fn coal_fuel(item: ItemId) -> Fuel {
    Fuel {
        name: "coal".to_string(),
        item,
        category: "chemical".to_string(),
        value: int(4_000_000),
    }
}
