// ============================================================================
// ERRORES - Taxonomía de fallos del cliente de votación
// ============================================================================
// Todos los fallos se recuperan localmente (se loguean y el estado queda
// consistente). Ninguno llega al usuario como un crash.
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Código EIP-1193 para "el usuario rechazó la petición"
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("no injected wallet provider (window.ethereum) found")]
    WalletUnavailable,

    #[error("request rejected by the user")]
    UserRejected,

    #[error("wallet returned no authorized accounts")]
    NoAccounts,

    #[error("wallet session is not connected")]
    NotConnected,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("no candidate selected")]
    NoSelection,

    #[error("invalid candidate selection '{input}' ({count} candidates)")]
    InvalidSelection { input: String, count: usize },

    #[error("account has already voted")]
    AlreadyVoted,

    #[error("voting is closed")]
    VotingClosed,

    #[error("a vote submission is already in flight")]
    SubmissionInFlight,

    #[error("rpc error{}: {message}", .code.map(|c| format!(" {}", c)).unwrap_or_default())]
    Rpc { code: Option<i64>, message: String },

    #[error("transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("transaction {hash} not mined after {attempts} receipt polls")]
    ConfirmationTimeout { hash: String, attempts: u32 },

    #[error("abi decode error: {0}")]
    Decode(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl VotingError {
    /// Clasificar un error devuelto por el provider (código EIP-1193 + mensaje)
    pub fn from_provider(code: Option<i64>, message: &str) -> Self {
        if code == Some(USER_REJECTED_CODE) {
            return VotingError::UserRejected;
        }
        if message.to_ascii_lowercase().contains("revert") {
            return VotingError::TransactionReverted(message.to_string());
        }
        VotingError::Rpc {
            code,
            message: message.to_string(),
        }
    }

    /// Fallo de lectura/escritura remota (RpcFailure o TransactionReverted)
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            VotingError::Rpc { .. }
                | VotingError::TransactionReverted(_)
                | VotingError::ConfirmationTimeout { .. }
                | VotingError::Decode(_)
        )
    }
}

impl From<serde_json::Error> for VotingError {
    fn from(err: serde_json::Error) -> Self {
        VotingError::Decode(err.to_string())
    }
}

impl From<VotingError> for JsValue {
    fn from(err: VotingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
