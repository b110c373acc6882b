// Custom Provider 分子模块

pub mod config;
pub mod provider;
pub mod source;

pub use config::ProviderConfig;
pub use provider::{CustomProvider, Provider};
pub use source::{CustomParams, NodeSource, NodeSupplier};
