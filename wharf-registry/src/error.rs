use thiserror::Error;

/// Errors from the registry client and cache manager.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The manager was started twice, or started again after shutdown.
    /// A manager runs at most once.
    #[error("registry manager already started")]
    AlreadyStarted,

    /// A role list fetch failed. Transient; the reconciliation loops log
    /// it and keep serving the previous cache contents.
    #[error("registry fetch failed: {reason}")]
    Fetch { reason: String },

    /// A registration request was refused or never reached the registry.
    #[error("registration failed: {reason}")]
    Register { reason: String },

    /// The HTTP client could not be constructed.
    #[error("registry client error: {reason}")]
    Client { reason: String },
}
