use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::error::GridError;

/// What a grid cell is. Fixed once the map has been parsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Start,
    Ordinary,
    Hazard,
    Goal,
}

impl CellKind {
    pub fn is_goal(self) -> bool {
        matches!(self, CellKind::Goal)
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, CellKind::Hazard)
    }
}

/// Maps single-character cell codes to cell kinds.
///
/// Start and goal each have one reserved code. Hazard and ordinary terrain
/// accept any number of codes so cliff maps (`C`, `R`) and lake maps
/// (`H`, `F`) parse with the same legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellLegend {
    pub start: char,
    pub goal: char,
    pub hazard: Vec<char>,
    pub ordinary: Vec<char>,
}

impl Default for CellLegend {
    fn default() -> Self {
        CellLegend {
            start: 'S',
            goal: 'G',
            hazard: vec!['C', 'H'],
            ordinary: vec!['R', 'F', '.'],
        }
    }
}

impl CellLegend {
    /// Reject a legend that gives one code two different roles. Repeating a
    /// code within a single role is allowed.
    pub fn validate(&self) -> Result<(), GridError> {
        let roles = [
            (CellKind::Start, std::slice::from_ref(&self.start)),
            (CellKind::Goal, std::slice::from_ref(&self.goal)),
            (CellKind::Hazard, self.hazard.as_slice()),
            (CellKind::Ordinary, self.ordinary.as_slice()),
        ];

        let mut seen: HashMap<char, CellKind> = HashMap::new();
        for (kind, codes) in roles {
            for &code in codes {
                match seen.insert(code, kind) {
                    Some(previous) if previous != kind => {
                        return Err(GridError::DuplicateCellCode { code });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Classify one code, or `None` if the legend does not know it.
    pub fn classify(&self, code: char) -> Option<CellKind> {
        if code == self.start {
            Some(CellKind::Start)
        } else if code == self.goal {
            Some(CellKind::Goal)
        } else if self.hazard.contains(&code) {
            Some(CellKind::Hazard)
        } else if self.ordinary.contains(&code) {
            Some(CellKind::Ordinary)
        } else {
            None
        }
    }
}
