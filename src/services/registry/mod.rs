pub mod client;
pub mod receitaws;

pub use client::{RegistryClient, RegistryError, UpstreamResult};
pub use receitaws::ReceitaWsClient;
