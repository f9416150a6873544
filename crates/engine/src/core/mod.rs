pub mod categorizer;
pub mod classifier;
pub mod detail;
pub mod normalize;
pub mod resolver;
pub mod revert;
pub mod watcher;
