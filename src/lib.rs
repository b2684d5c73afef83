pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod render;
pub mod router;
pub mod session;
pub mod views;

pub use api::{ApiClient, ApiResponse, HttpMethod, RecipeSource};
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use model::{Recipe, RecipeList};
pub use router::Route;
pub use session::Session;
pub use views::{DetailController, ListController, StalePolicy};
