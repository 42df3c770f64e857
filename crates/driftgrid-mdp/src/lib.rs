mod builder;
mod config;
mod error;
pub mod io;
mod model;
pub mod render;
mod simulator;
mod spec;
pub mod variants;

pub use builder::ModelBuilder;
pub use config::EnvConfig;
pub use error::MdpError;
pub use io::{compile_yaml, load_config, load_yaml, save_json, save_yaml};
pub use model::{InitialDistribution, MdpModel};
pub use simulator::{MdpSimulator, Step};
pub use spec::{ActionSpec, OutcomeSpec, StateSpec, TabularSpec};
pub use variants::variant;
