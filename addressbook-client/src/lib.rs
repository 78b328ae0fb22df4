pub mod api;
pub mod form;
pub mod state;

pub use api::{ApiClient, ApiError};
pub use form::FormState;
pub use state::ContactListController;
