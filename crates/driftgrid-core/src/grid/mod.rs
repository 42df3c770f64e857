pub mod action;
pub mod cell;
pub mod effects;
pub mod error;
pub mod ids;
pub mod indexer;
pub mod layout;
pub mod transitions;

#[cfg(test)]
mod tests;
