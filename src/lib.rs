pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use registry::{NameReusePolicy, PlayerRegistry};
pub use server::Server;
