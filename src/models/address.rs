use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VotingError;

/// Dirección de cuenta/contrato (20 bytes), normalizada a minúsculas.
///
/// La wallet devuelve la misma cuenta con checksum en `eth_requestAccounts`
/// y en minúsculas en `accountsChanged`; normalizando, ambas comparan igual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, VotingError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| VotingError::InvalidAddress(raw.to_string()))?;

        if digits.len() != 40 || hex::decode(digits).is_err() {
            return Err(VotingError::InvalidAddress(raw.to_string()));
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Los 20 bytes de la dirección
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut bytes = [0u8; 20];
        // El constructor garantiza 40 dígitos hex válidos
        if let Ok(decoded) = hex::decode(&self.0[2..]) {
            bytes.copy_from_slice(&decoded);
        }
        bytes
    }

    /// Forma corta para la UI: 0x1234…abcd
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = VotingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
