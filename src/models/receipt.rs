use serde::{Deserialize, Serialize};

/// Recibo devuelto por `eth_getTransactionReceipt` (solo los campos usados)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    /// "0x1" éxito, "0x0" revertida. Ausente en recibos pre-Byzantium.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => status == "0x1",
            None => true,
        }
    }
}
