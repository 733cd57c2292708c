pub mod node;
pub mod resolver;
