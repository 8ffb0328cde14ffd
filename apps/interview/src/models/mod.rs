pub mod history;
pub mod transcript;
