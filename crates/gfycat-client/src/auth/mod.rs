mod credentials;
mod manager;
mod token;

pub use credentials::{Credentials, Grant};
pub(crate) use manager::ERROR_KEY;
pub use manager::TokenManager;
