pub mod budget;
pub mod builder;
pub mod error;
pub mod graph;
pub mod instance;
pub mod path;
pub mod ports;
pub mod steiner;
pub mod tree;
