// Fixed-catalog interview mode: question catalog, session state machine, rubric evaluation.
// All LLM calls go through the gateway.

pub mod catalog;
pub mod evaluation;
pub mod handlers;
pub mod rubric;
pub mod service;
pub mod session;
pub mod store;
