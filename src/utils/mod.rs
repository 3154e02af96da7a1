pub mod defaults;
pub mod env;
pub mod merge;
pub mod object;
pub mod paths;
pub mod typed;
