pub mod ast;
pub mod codegen;
pub mod converter;
pub mod errors;
pub mod metrics;
pub(crate) mod naming;
pub mod orchestrator;
pub mod resolver;
pub mod schema;
pub mod schema_graph;
pub mod schema_id;

#[cfg(test)]
pub(crate) mod tests;
