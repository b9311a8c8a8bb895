use serde::{Deserialize, Serialize};

use crate::models::Address;

/// Handle capaz de firmar transacciones en nombre de la cuenta `from`.
/// La firma la hace la wallet; el cliente solo conserva la cuenta autorizada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerHandle {
    from: Address,
}

impl SignerHandle {
    pub fn new(from: Address) -> Self {
        Self { from }
    }

    pub fn from_address(&self) -> &Address {
        &self.from
    }
}

/// Sesión de wallet.
///
/// `connected == true` implica cuenta y signer presentes: los campos son
/// privados y solo se construyen vía `connected()` / `disconnected()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Address>,
    signer: Option<SignerHandle>,
    connected: bool,
}

impl Session {
    pub fn connected(account: Address) -> Self {
        Self {
            signer: Some(SignerHandle::new(account.clone())),
            account: Some(account),
            connected: true,
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn signer(&self) -> Option<&SignerHandle> {
        self.signer.as_ref()
    }
}
