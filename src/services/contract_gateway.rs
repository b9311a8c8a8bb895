// ============================================================================
// CONTRACT GATEWAY - Llamadas tipadas al contrato de votación (Stateless)
// ============================================================================
// Se construye uno nuevo por llamada a partir del signer actual.
// Las cuatro lecturas son idempotentes; `submit_vote` es la única escritura.
// ============================================================================

use std::rc::Rc;

use serde_json::{json, Value};

use crate::config::ReceiptConfig;
use crate::error::VotingError;
use crate::models::{Address, Candidate, SignerHandle, TransactionReceipt};
use crate::services::abi::{self, Token};
use crate::services::provider::Eip1193;
use crate::utils::{
    Delay, GET_ALL_VOTES_OF_CANDIDATES, GET_REMAINING_TIME, GET_VOTING_STATUS, VOTE, VOTERS,
};

pub struct ContractGateway<P: Eip1193> {
    provider: Rc<P>,
    contract: Address,
    signer: Option<SignerHandle>,
    receipts: ReceiptConfig,
    delay: Delay,
}

impl<P: Eip1193> ContractGateway<P> {
    pub fn new(
        provider: Rc<P>,
        contract: Address,
        signer: Option<SignerHandle>,
        receipts: ReceiptConfig,
        delay: Delay,
    ) -> Self {
        Self {
            provider,
            contract,
            signer,
            receipts,
            delay,
        }
    }

    /// `eth_call` contra el contrato; devuelve el return data en hex
    async fn call(&self, data: String) -> Result<String, VotingError> {
        let mut tx = json!({
            "to": self.contract.as_str(),
            "data": data,
        });
        if let Some(signer) = &self.signer {
            tx["from"] = Value::String(signer.from_address().to_string());
        }

        let result = self.provider.request("eth_call", json!([tx, "latest"])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| VotingError::Decode(format!("eth_call returned {}", result)))
    }

    pub async fn get_candidates(&self) -> Result<Vec<Candidate>, VotingError> {
        let raw = self.call(abi::encode_call(GET_ALL_VOTES_OF_CANDIDATES, &[])).await?;
        let records = abi::decode_candidates(&raw)?;
        Ok(Candidate::from_records(records))
    }

    pub async fn get_voting_status(&self) -> Result<bool, VotingError> {
        let raw = self.call(abi::encode_call(GET_VOTING_STATUS, &[])).await?;
        abi::decode_bool(&raw)
    }

    pub async fn get_remaining_time(&self) -> Result<u64, VotingError> {
        let raw = self.call(abi::encode_call(GET_REMAINING_TIME, &[])).await?;
        abi::decode_uint(&raw)
    }

    /// `voters(account)`: true si la cuenta ya votó
    pub async fn get_voter_flag(&self, account: &Address) -> Result<bool, VotingError> {
        let raw = self
            .call(abi::encode_call(VOTERS, &[Token::Address(account.clone())]))
            .await?;
        abi::decode_bool(&raw)
    }

    /// Envía `vote(index)` y espera a que la transacción se mine
    pub async fn submit_vote(&self, index: usize) -> Result<TransactionReceipt, VotingError> {
        let signer = self.signer.as_ref().ok_or(VotingError::NotConnected)?;
        let tx = json!({
            "from": signer.from_address().as_str(),
            "to": self.contract.as_str(),
            "data": abi::encode_call(VOTE, &[Token::Uint(index as u64)]),
        });

        let hash = self
            .provider
            .request("eth_sendTransaction", json!([tx]))
            .await?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| VotingError::Decode("eth_sendTransaction returned no hash".to_string()))?;

        log::info!("📤 [GATEWAY] vote({}) enviado: {}", index, hash);
        self.wait_for_receipt(&hash).await
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, VotingError> {
        for attempt in 1..=self.receipts.poll_attempts {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;

            if value.is_null() {
                log::debug!("⏳ [GATEWAY] {} pendiente (intento {})", hash, attempt);
                (self.delay)(self.receipts.poll_interval_ms).await;
                continue;
            }

            let receipt: TransactionReceipt = serde_json::from_value(value)?;
            if !receipt.succeeded() {
                return Err(VotingError::TransactionReverted(format!(
                    "transaction {} reverted",
                    hash
                )));
            }
            log::info!(
                "⛏️ [GATEWAY] {} minada en bloque {}",
                hash,
                receipt.block_number.as_deref().unwrap_or("?")
            );
            return Ok(receipt);
        }

        Err(VotingError::ConfirmationTimeout {
            hash: hash.to_string(),
            attempts: self.receipts.poll_attempts,
        })
    }
}
