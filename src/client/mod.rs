pub mod token_client;
pub(crate) mod wire;

pub use token_client::TokenClient;
