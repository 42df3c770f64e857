//! Stochastic effects layered on top of an agent's intended move.
//!
//! Every effect answers the same question: starting at a coordinate and
//! intending a displacement, which candidate positions can the agent end up
//! at, and with what probability? Candidates are unclamped; bounds are the
//! transition builder's job.
//!
//! Effects are resolved once, when the model is constructed. A resolved
//! `WindField` is a fixed push per column, so transitions built from it are
//! deterministic. Drawing a new wind pattern means building a new model.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{
    error::GridError,
    ids::{Coordinate, Offset, RawCoordinate},
};

/// One candidate result of an intended move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub probability: f64,
    pub position: RawCoordinate,
}

/// Output contract shared by every effect family.
pub trait StochasticEffect {
    /// Candidate positions for moving from `from` by `delta`. The returned
    /// probabilities are positive and sum to 1.
    fn branches(&self, from: Coordinate, delta: Offset) -> Vec<Branch>;
}

/// No perturbation: the intended move always happens.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deterministic;

impl StochasticEffect for Deterministic {
    fn branches(&self, from: Coordinate, delta: Offset) -> Vec<Branch> {
        vec![Branch {
            probability: 1.0,
            position: from.offset(delta),
        }]
    }
}

/// A set of columns that share one wind strength and one activation draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindClass {
    pub columns: Vec<usize>,
    /// Extra rows the agent is pushed down when the class is active.
    pub strength: usize,
}

impl WindClass {
    pub fn new(columns: impl Into<Vec<usize>>, strength: usize) -> Self {
        WindClass {
            columns: columns.into(),
            strength,
        }
    }
}

/// Wind classes of the 4x12 windy cliff: columns 3, 4, 5 and 8 push one row,
/// columns 6 and 7 push two.
pub fn cliff_wind_classes() -> Vec<WindClass> {
    vec![
        WindClass::new([3, 4, 5, 8], 1),
        WindClass::new([6, 7], 2),
    ]
}

/// Resolved wind: a fixed downward push for every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindField {
    push: Vec<usize>,
    active: Vec<bool>,
}

impl WindField {
    /// A field with no wind anywhere.
    pub fn calm(cols: usize) -> Self {
        WindField {
            push: vec![0; cols],
            active: Vec::new(),
        }
    }

    /// Draw the activation of every class once.
    ///
    /// Each class gets exactly one Bernoulli(`prob`) draw, in class order, and
    /// every column of the class shares the result. Classes are applied in
    /// order, so a column listed in several classes takes the last one,
    /// including a later inactive class resetting it to zero.
    ///
    /// A class stronger than the grid is tall is rejected before any draw.
    pub fn resolve<R: Rng + ?Sized>(
        classes: &[WindClass],
        prob: f64,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let prob = clamp_probability("wind_prob", prob)?;
        let mut push = vec![0; cols];
        let mut active = Vec::with_capacity(classes.len());

        for (idx, class) in classes.iter().enumerate() {
            if let Some(&column) = class.columns.iter().find(|c| **c >= cols) {
                return Err(GridError::WindColumnOutOfRange {
                    column,
                    width: cols,
                });
            }
            if class.strength > rows {
                return Err(GridError::WindStrengthOutOfRange {
                    strength: class.strength,
                    rows,
                });
            }

            let fired = rng.gen_range(0.0..1.0) < prob;
            info!(
                "wind class {idx} (strength {}, columns {:?}) {}",
                class.strength,
                class.columns,
                if fired { "active" } else { "calm" }
            );

            let strength = if fired { class.strength } else { 0 };
            for &column in &class.columns {
                push[column] = strength;
            }
            active.push(fired);
        }

        Ok(WindField { push, active })
    }

    /// Rows of downward push applied to an agent standing in `col`.
    pub fn push_at(&self, col: usize) -> usize {
        self.push.get(col).copied().unwrap_or(0)
    }

    /// Activation result of each class, in class order.
    pub fn activations(&self) -> &[bool] {
        &self.active
    }

    pub fn is_calm(&self) -> bool {
        self.push.iter().all(|p| *p == 0)
    }
}

impl StochasticEffect for WindField {
    fn branches(&self, from: Coordinate, delta: Offset) -> Vec<Branch> {
        // The push comes from the column the agent is leaving.
        let wind = Offset::new(self.push_at(from.col) as isize, 0);
        vec![Branch {
            probability: 1.0,
            position: from.offset(delta + wind),
        }]
    }
}

/// Ice-style slipping: the intended move succeeds with `1 - slip_prob`,
/// otherwise the agent slides in one of the two perpendicular directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipModel {
    slip_prob: f64,
}

impl SlipModel {
    pub fn new(slip_prob: f64) -> Result<Self, GridError> {
        Ok(SlipModel {
            slip_prob: clamp_probability("slip_prob", slip_prob)?,
        })
    }

    pub fn slip_prob(&self) -> f64 {
        self.slip_prob
    }

    pub fn success_prob(&self) -> f64 {
        1.0 - self.slip_prob
    }
}

impl StochasticEffect for SlipModel {
    fn branches(&self, from: Coordinate, delta: Offset) -> Vec<Branch> {
        let side = self.slip_prob / 2.0;
        let candidates = [
            (self.success_prob(), delta),
            (side, Offset::new(-delta.col, -delta.row)),
            (side, Offset::new(delta.col, delta.row)),
        ];

        candidates
            .into_iter()
            .filter(|(probability, _)| *probability > 0.0)
            .map(|(probability, d)| Branch {
                probability,
                position: from.offset(d),
            })
            .collect()
    }
}

/// Unresolved effect configuration, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    #[default]
    None,
    Wind {
        prob: f64,
        #[serde(default = "cliff_wind_classes")]
        classes: Vec<WindClass>,
    },
    Slip {
        prob: f64,
    },
}

impl EffectSpec {
    /// Resolve the one-time random draws of this effect for a `rows` x `cols` grid.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<EffectModel, GridError> {
        match self {
            EffectSpec::None => Ok(EffectModel::None(Deterministic)),
            EffectSpec::Wind { prob, classes } => Ok(EffectModel::Wind(WindField::resolve(
                classes, *prob, rows, cols, rng,
            )?)),
            EffectSpec::Slip { prob } => Ok(EffectModel::Slip(SlipModel::new(*prob)?)),
        }
    }
}

/// A resolved effect of any family.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectModel {
    None(Deterministic),
    Wind(WindField),
    Slip(SlipModel),
}

impl EffectModel {
    pub fn family(&self) -> &'static str {
        match self {
            EffectModel::None(_) => "none",
            EffectModel::Wind(_) => "wind",
            EffectModel::Slip(_) => "slip",
        }
    }
}

impl StochasticEffect for EffectModel {
    fn branches(&self, from: Coordinate, delta: Offset) -> Vec<Branch> {
        match self {
            EffectModel::None(effect) => effect.branches(from, delta),
            EffectModel::Wind(effect) => effect.branches(from, delta),
            EffectModel::Slip(effect) => effect.branches(from, delta),
        }
    }
}

/// Clamp a probability into `[0, 1]`. NaN has no sensible clamp and is rejected.
pub fn clamp_probability(name: &'static str, value: f64) -> Result<f64, GridError> {
    if value.is_nan() {
        return Err(GridError::InvalidProbability { name, value });
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        warn!("{name} {value} clamped to {clamped}");
    }
    Ok(clamped)
}
