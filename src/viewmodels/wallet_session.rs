// ============================================================================
// WALLET SESSION - Conexión con la wallet y cuenta activa
// ============================================================================
// Único componente que reemplaza la sesión (cuenta + signer).
// ============================================================================

use std::rc::Rc;

use serde_json::json;

use crate::error::VotingError;
use crate::models::Address;
use crate::services::provider::Eip1193;
use crate::state::{VotingEvent, VotingStore};

/// Resultado de procesar una notificación `accountsChanged`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChange {
    /// Nueva cuenta activa: hay que re-derivar la elegibilidad
    Adopted(Address),
    Unchanged,
    Disconnected,
    /// Notificación con una dirección inválida
    Ignored,
}

pub struct WalletSession<P: Eip1193> {
    provider: Option<Rc<P>>,
    store: VotingStore,
}

impl<P: Eip1193> Clone for WalletSession<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            store: self.store.clone(),
        }
    }
}

impl<P: Eip1193> WalletSession<P> {
    pub fn new(provider: Option<Rc<P>>, store: VotingStore) -> Self {
        Self { provider, store }
    }

    pub fn provider(&self) -> Result<Rc<P>, VotingError> {
        self.provider.clone().ok_or(VotingError::WalletUnavailable)
    }

    /// Pide acceso a las cuentas y adopta la primera autorizada
    pub async fn connect(&self) -> Result<Address, VotingError> {
        let provider = self.provider()?;
        let value = provider.request("eth_requestAccounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(value)?;

        let first = accounts.first().ok_or(VotingError::NoAccounts)?;
        let account = Address::parse(first)?;

        self.store.dispatch(VotingEvent::AccountAdopted(account.clone()));
        log::info!("🦊 [WALLET] Conectado: {}", account);
        Ok(account)
    }

    /// Procesa `accountsChanged`: la primera cuenta es la activa; lista vacía = desconexión
    pub fn on_accounts_changed(&self, accounts: &[String]) -> AccountChange {
        let Some(raw) = accounts.first() else {
            if self.store.with(|s| s.is_connected()) {
                self.store.dispatch(VotingEvent::Disconnected);
                log::info!("🔌 [WALLET] La wallet no reporta cuentas, sesión cerrada");
            }
            return AccountChange::Disconnected;
        };

        let account = match Address::parse(raw) {
            Ok(account) => account,
            Err(e) => {
                log::warn!("⚠️ [WALLET] accountsChanged ignorado: {}", e);
                return AccountChange::Ignored;
            }
        };

        let unchanged = self
            .store
            .with(|s| s.is_connected() && s.account() == Some(&account));
        if unchanged {
            return AccountChange::Unchanged;
        }

        self.store.dispatch(VotingEvent::AccountAdopted(account.clone()));
        log::info!("🔄 [WALLET] Cuenta activa: {}", account);
        AccountChange::Adopted(account)
    }
}
