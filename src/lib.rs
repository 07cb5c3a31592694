pub mod bus;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokemon;
pub mod preferences;
pub mod presenter;
pub mod repository;
pub mod strings;
pub mod use_case;

pub use bus::*;
pub use cache::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use preferences::*;
pub use presenter::*;
pub use repository::*;
pub use use_case::*;
