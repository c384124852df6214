pub mod commands;
pub mod context;
pub mod display;
pub mod logging;
pub mod printer;
pub mod repl;

pub use context::AppContext;
pub use repl::readline;
