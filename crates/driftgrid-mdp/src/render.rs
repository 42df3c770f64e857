//! Terminal views of a model for humans. Nothing here feeds back into the dynamics.

use std::fmt::Write;

use colored::{Color, Colorize};
use driftgrid_core::{Action, CellKind, Coordinate, StateIndex};

use crate::MdpModel;

/// Fixed color of each cell kind.
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Start => Color::Black,
        CellKind::Ordinary => Color::Blue,
        CellKind::Hazard => Color::Red,
        CellKind::Goal => Color::Green,
    }
}

/// Render the map with `agent` highlighted, headed by the last action's label
/// and arrow.
pub fn render(model: &MdpModel, agent: StateIndex, last_action: Option<Action>) -> String {
    draw(model, agent, last_action, true)
}

/// Same layout as `render`, without escape codes. The agent is shown as `@`.
pub fn render_plain(model: &MdpModel, agent: StateIndex, last_action: Option<Action>) -> String {
    draw(model, agent, last_action, false)
}

/// Render a policy: one arrow per non-terminal cell, map codes elsewhere.
/// Missing entries (a short policy) fall back to the map code.
pub fn render_policy(model: &MdpModel, policy: &[Action]) -> String {
    let (rows, cols) = model.grid().shape();
    let mut out = String::with_capacity(rows * (cols + 1));

    for row in 0..rows {
        for col in 0..cols {
            let coord = Coordinate::new(row, col);
            let state = StateIndex::from(row * cols + col);
            let code = model.grid().code(coord).unwrap_or('?');
            let cell = match (model.is_terminal(state), policy.get(state.index())) {
                (Some(false), Some(action)) => action.glyph(),
                _ => code,
            };
            out.push(cell);
        }
        out.push('\n');
    }

    out
}

fn draw(model: &MdpModel, agent: StateIndex, last_action: Option<Action>, ansi: bool) -> String {
    let (rows, cols) = model.grid().shape();
    let mut out = String::new();

    match last_action {
        Some(action) => {
            let _ = writeln!(out, "  ({} {})", action.label(), action.glyph());
        }
        None => out.push('\n'),
    }

    for row in 0..rows {
        for col in 0..cols {
            let coord = Coordinate::new(row, col);
            let here = row * cols + col == agent.index();
            let (Some(code), Some(kind)) = (model.grid().code(coord), model.grid().kind(coord))
            else {
                continue;
            };

            match (here, ansi) {
                (true, true) => {
                    let _ = write!(out, "{}", code.to_string().white().on_red());
                }
                (true, false) => out.push('@'),
                (false, true) => {
                    let _ = write!(out, "{}", code.to_string().color(cell_color(kind)));
                }
                (false, false) => out.push(code),
            }
        }
        out.push('\n');
    }

    out
}
