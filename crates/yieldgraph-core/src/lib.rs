//! Yieldgraph Core -- exact steady-state rate calculation over recipe graphs.
//!
//! This crate provides the arithmetic and graph model behind a production
//! rate calculator: how many executions per second of each recipe are needed
//! to deliver a target output, computed without any floating point error.
//!
//! # Layers
//!
//! 1. **Rational** -- [`rational::Rational`], an arbitrary-precision fraction
//!    in canonical form. Every amount, time, and rate is one.
//! 2. **Matrix** -- [`matrix::Matrix`], a dense fixed-shape grid of rationals.
//! 3. **Simplex** -- [`simplex::simplex`], tableau pivoting with an explicit
//!    [`simplex::SimplexOutcome`] and guaranteed termination.
//! 4. **Production graph** -- [`graph::ProductionGraph`], items and recipes
//!    in slotmap arenas, built once through [`graph::GraphBuilder`].
//! 5. **Rate propagation** -- [`propagate::Propagator`], exact recursive
//!    expansion of single-producer chains. Ambiguous ("weird") items are
//!    handed back as unfinished demand for the solver.
//!
//! Facility, module, and fuel choices that affect yields are passed in an
//! explicit [`facility::CalcContext`].
//!
//! # Example
//!
//! ```rust,ignore
//! let graph = builder.build()?;
//! let gear = graph.require_item("iron-gear-wheel")?;
//! let totals = propagate::produce(&graph, gear, Rational::from(10_i64),
//!                                 &HashSet::new(), &CalcContext::new())?;
//! for (recipe, rate) in &totals.totals {
//!     println!("{recipe}: {}", rate.to_decimal(3));
//! }
//! ```

#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod facility;
pub mod graph;
pub mod id;
pub mod matrix;
pub mod propagate;
pub mod rational;
pub mod simplex;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
