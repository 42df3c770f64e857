//! Build the windy cliff, solve it with a small value iteration over the
//! exported table, then replay the greedy policy in the simulator.
//!
//! RUST_LOG=debug cargo run -p driftgrid-mdp --example cliff_walking -- [seed]

use driftgrid_core::Action;
use driftgrid_mdp::{MdpModel, MdpSimulator, render, variant};

const GAMMA: f64 = 0.99;
const THETA: f64 = 1e-8;
const MAX_SWEEPS: usize = 1000;
const MAX_EPISODE_STEPS: usize = 100;

fn q_value(model: &MdpModel, values: &[f64], state: usize, action: Action) -> f64 {
    model
        .outcomes(state.into(), action)
        .map(|outcomes| {
            outcomes
                .iter()
                .map(|o| {
                    let future = if o.terminal { 0.0 } else { values[o.next_state.index()] };
                    o.probability * (o.reward + GAMMA * future)
                })
                .sum::<f64>()
        })
        .unwrap_or(0.0)
}

fn value_iteration(model: &MdpModel) -> Vec<Action> {
    let mut values = vec![0.0; model.state_count()];

    for sweep in 0..MAX_SWEEPS {
        let mut delta = 0.0_f64;
        for state in 0..model.state_count() {
            if model.is_terminal(state.into()) == Some(true) {
                continue;
            }
            let best = Action::ALL
                .iter()
                .map(|a| q_value(model, &values, state, *a))
                .fold(f64::NEG_INFINITY, f64::max);
            delta = delta.max((best - values[state]).abs());
            values[state] = best;
        }
        if delta < THETA {
            log::info!("value iteration converged after {} sweeps", sweep + 1);
            break;
        }
    }

    (0..model.state_count())
        .map(|state| {
            Action::ALL
                .iter()
                .copied()
                .max_by(|a, b| {
                    q_value(model, &values, state, *a).total_cmp(&q_value(model, &values, state, *b))
                })
                .unwrap_or(Action::Up)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(0);

    let model = MdpModel::from_seed(variant("windy_cliff_walking")?, seed)?;
    log::info!(
        "{}: {} states, {} actions, wind {:?}",
        model.name(),
        model.state_count(),
        model.action_count(),
        model.effect()
    );

    let policy = value_iteration(&model);
    println!("{}", render::render_policy(&model, &policy));

    let mut sim = MdpSimulator::new(model, seed);
    let mut total = 0.0;
    for _ in 0..MAX_EPISODE_STEPS {
        let action = policy[sim.state().index()];
        let step = sim.step(action);
        total += step.reward;
        println!("{}", sim.render());
        if step.terminal {
            break;
        }
    }
    println!("episode return: {total}");

    Ok(())
}
