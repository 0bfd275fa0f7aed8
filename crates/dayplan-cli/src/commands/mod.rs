pub mod apply;
pub mod config;
pub mod conflicts;
pub mod input;
pub mod layout;
pub mod slots;
pub mod strategies;
