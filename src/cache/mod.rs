pub mod memory_store;
pub mod redis_store;
pub mod store;
pub mod token;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{StoreError, TokenStore};
pub use token::Token;
