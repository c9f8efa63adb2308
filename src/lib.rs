pub mod args;
pub mod browser;
pub mod context;
pub mod favorites;
pub mod listing;
pub mod model;
pub mod render;
pub mod scroll;
pub mod settings;
pub mod slot;
pub mod topmenu;
pub mod transfer;
pub mod util;
