//! Google Workspace groups

mod client;
mod credentials;

pub use client::GoogleGroups;
pub use credentials::{
    load_cache, save_cache, CredentialError, TokenCache, TokenSource, ACCESS_TOKEN_ENV,
};
