// UI module - console output for the quiz

pub mod console;

pub use console::ConsoleUi;
