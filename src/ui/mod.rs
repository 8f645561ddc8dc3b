pub mod context;
pub mod error;
pub mod terminal;
pub mod text;
pub mod theme;
pub mod views;
