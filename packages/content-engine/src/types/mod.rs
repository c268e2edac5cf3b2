pub mod config;
pub mod container;
pub mod id;
pub mod item;
pub mod language;
pub mod nav;
pub mod page;
pub mod text;
