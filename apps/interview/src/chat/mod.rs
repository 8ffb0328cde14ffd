// Open-ended data-collection mode.
// Kept separate from `interview`: no fixed catalog, no rubric, no session state machine.

pub mod checklist;
pub mod handlers;
pub mod service;
