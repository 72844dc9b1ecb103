pub mod context;
pub mod table;

pub use context::ContextStack;
pub use table::SymbolTable;
