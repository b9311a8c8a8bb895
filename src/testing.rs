// ============================================================================
// TESTING - Wallet en memoria + cola de tareas determinista
// ============================================================================
// `MockProvider` habla los mismos métodos JSON-RPC y el mismo ABI que una
// wallet real frente al contrato de votación.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use serde_json::{json, Value};

use crate::error::VotingError;
use crate::models::Address;
use crate::services::provider::{AccountsHandler, Eip1193};
use crate::utils::{Delay, LocalTask, Spawner};

/// Dirección determinista 0x000…0nn
pub fn addr(n: u8) -> Address {
    Address::parse(&format!("0x{:040x}", n)).expect("valid test address")
}

/// Delay que no espera (los tests no tienen setTimeout)
pub fn instant_delay() -> Delay {
    Rc::new(|_ms: u32| -> LocalTask { Box::pin(async {}) })
}

fn word(value: u64) -> String {
    format!("{:064x}", value)
}

fn encode_word(value: u64) -> Value {
    Value::String(format!("0x{}", word(value)))
}

/// Codifica `tuple(string,uint256)[]` como lo devuelve el contrato
pub fn encode_candidates(list: &[(String, u64)]) -> String {
    let tuples: Vec<String> = list
        .iter()
        .map(|(name, count)| {
            let padded = name.len().div_ceil(32) * 32;
            let mut tuple = word(64) + &word(*count) + &word(name.len() as u64);
            tuple.push_str(&hex::encode(name.as_bytes()));
            tuple.push_str(&"0".repeat((padded - name.len()) * 2));
            tuple
        })
        .collect();

    let mut out = format!("0x{}{}", word(32), word(list.len() as u64));
    let mut offset = 32 * list.len();
    for tuple in &tuples {
        out.push_str(&word(offset as u64));
        offset += tuple.len() / 2;
    }
    for tuple in &tuples {
        out.push_str(tuple);
    }
    out
}

type Registry = Rc<RefCell<Vec<(u64, Rc<AccountsHandler>)>>>;

/// Wallet + contrato de votación simulados
pub struct MockProvider {
    accounts: RefCell<Vec<String>>,
    reject_requests: Cell<bool>,
    candidates: RefCell<Vec<(String, u64)>>,
    voting_open: Cell<bool>,
    remaining: Cell<u64>,
    voters: RefCell<HashSet<Address>>,
    fail_reads: Cell<bool>,
    revert_votes: Cell<bool>,
    pending_receipt_polls: Cell<u32>,
    last_tx: RefCell<Option<(String, bool)>>,
    tx_counter: Cell<u64>,
    calls: RefCell<Vec<String>>,
    listeners: Registry,
    next_listener: Cell<u64>,
}

impl MockProvider {
    pub fn with_candidates(candidates: &[(&str, u64)]) -> Self {
        Self {
            accounts: RefCell::new(Vec::new()),
            reject_requests: Cell::new(false),
            candidates: RefCell::new(
                candidates
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect(),
            ),
            voting_open: Cell::new(true),
            remaining: Cell::new(3600),
            voters: RefCell::new(HashSet::new()),
            fail_reads: Cell::new(false),
            revert_votes: Cell::new(false),
            pending_receipt_polls: Cell::new(0),
            last_tx: RefCell::new(None),
            tx_counter: Cell::new(0),
            calls: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
        }
    }

    pub fn set_accounts(&self, accounts: &[Address]) {
        *self.accounts.borrow_mut() = accounts.iter().map(|a| a.to_string()).collect();
    }

    /// Cuentas tal cual (p. ej. con checksum)
    pub fn set_raw_accounts(&self, accounts: &[&str]) {
        *self.accounts.borrow_mut() = accounts.iter().map(|a| a.to_string()).collect();
    }

    pub fn set_reject_requests(&self, reject: bool) {
        self.reject_requests.set(reject);
    }

    pub fn set_voting_open(&self, open: bool) {
        self.voting_open.set(open);
    }

    pub fn set_remaining(&self, seconds: u64) {
        self.remaining.set(seconds);
    }

    pub fn mark_voted(&self, account: &Address) {
        self.voters.borrow_mut().insert(account.clone());
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_revert_votes(&self, revert: bool) {
        self.revert_votes.set(revert);
    }

    pub fn set_pending_receipt_polls(&self, polls: u32) {
        self.pending_receipt_polls.set(polls);
    }

    pub fn vote_count(&self, index: usize) -> u64 {
        self.candidates.borrow()[index].1
    }

    /// Llamadas registradas: "eth_call" cuenta todas las lecturas,
    /// "eth_call:voters" solo esa función
    pub fn count_calls(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| *call == method || call.starts_with(&format!("{}:", method)))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Simula un evento `accountsChanged` de la wallet
    pub fn emit_accounts_changed(&self, accounts: &[&str]) {
        let handlers: Vec<Rc<AccountsHandler>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        let accounts: Vec<String> = accounts.iter().map(|a| a.to_string()).collect();
        for handler in handlers {
            handler(accounts.clone());
        }
    }

    fn rejected() -> VotingError {
        VotingError::from_provider(Some(4001), "User rejected the request.")
    }

    fn eth_call(&self, params: &Value) -> Result<Value, VotingError> {
        let data = params[0]["data"].as_str().unwrap_or_default();
        let selector = data.get(2..10).unwrap_or_default();
        let name = match selector {
            "4d6bda5f" => "getAllVotesOfCandiates",
            "581c281c" => "getVotingStatus",
            "efb98bcf" => "getRemainingTime",
            "a3ec138d" => "voters",
            _ => "unknown",
        };
        self.calls.borrow_mut().push(format!("eth_call:{}", name));

        if self.fail_reads.get() {
            return Err(VotingError::from_provider(Some(-32603), "Internal JSON-RPC error."));
        }

        match name {
            "getAllVotesOfCandiates" => Ok(Value::String(encode_candidates(
                &self.candidates.borrow(),
            ))),
            "getVotingStatus" => Ok(encode_word(self.voting_open.get() as u64)),
            "getRemainingTime" => Ok(encode_word(self.remaining.get())),
            "voters" => {
                let voter = Address::parse(&format!("0x{}", data.get(34..74).unwrap_or_default()))?;
                Ok(encode_word(self.voters.borrow().contains(&voter) as u64))
            }
            _ => Err(VotingError::from_provider(Some(-32000), "execution reverted")),
        }
    }

    fn send_transaction(&self, params: &Value) -> Result<Value, VotingError> {
        if self.reject_requests.get() {
            return Err(Self::rejected());
        }
        let tx = &params[0];
        let data = tx["data"].as_str().unwrap_or_default();
        let from = Address::parse(tx["from"].as_str().unwrap_or_default())?;
        let index = data
            .get(58..74)
            .and_then(|digits| u64::from_str_radix(digits, 16).ok())
            .unwrap_or(u64::MAX) as usize;

        // Reglas del contrato: abierto, no votado, índice válido
        let valid = self.voting_open.get()
            && !self.voters.borrow().contains(&from)
            && index < self.candidates.borrow().len()
            && !self.revert_votes.get();

        if valid {
            self.candidates.borrow_mut()[index].1 += 1;
            self.voters.borrow_mut().insert(from);
        }

        self.tx_counter.set(self.tx_counter.get() + 1);
        let hash = format!("0x{:064x}", self.tx_counter.get());
        *self.last_tx.borrow_mut() = Some((hash.clone(), valid));
        Ok(Value::String(hash))
    }

    fn receipt(&self) -> Result<Value, VotingError> {
        let pending = self.pending_receipt_polls.get();
        if pending > 0 {
            self.pending_receipt_polls.set(pending - 1);
            return Ok(Value::Null);
        }
        match self.last_tx.borrow().as_ref() {
            Some((hash, success)) => Ok(json!({
                "transactionHash": hash,
                "blockNumber": "0x10",
                "status": if *success { "0x1" } else { "0x0" },
            })),
            None => Ok(Value::Null),
        }
    }
}

impl Eip1193 for MockProvider {
    type Listener = MockListener;

    async fn request(&self, method: &str, params: Value) -> Result<Value, VotingError> {
        if method == "eth_call" {
            return self.eth_call(&params);
        }
        self.calls.borrow_mut().push(method.to_string());

        match method {
            "eth_requestAccounts" | "eth_accounts" => {
                if self.reject_requests.get() {
                    return Err(Self::rejected());
                }
                Ok(json!(self.accounts.borrow().clone()))
            }
            "eth_sendTransaction" => self.send_transaction(&params),
            "eth_getTransactionReceipt" => self.receipt(),
            other => Err(VotingError::from_provider(
                Some(-32601),
                &format!("method {} not found", other),
            )),
        }
    }

    fn on_accounts_changed(&self, handler: AccountsHandler) -> Result<MockListener, VotingError> {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(handler)));
        Ok(MockListener {
            registry: self.listeners.clone(),
            id,
        })
    }
}

pub struct MockListener {
    registry: Registry,
    id: u64,
}

impl Drop for MockListener {
    fn drop(&mut self) {
        self.registry.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

/// Cola de tareas: sustituye a `spawn_local` y deja elegir el orden de ejecución
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<LocalTask>>>,
}

impl TaskQueue {
    pub fn spawner(&self) -> Spawner {
        let tasks = self.tasks.clone();
        Rc::new(move |task: LocalTask| tasks.borrow_mut().push_back(task))
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Saca las tareas pendientes sin ejecutarlas
    pub fn take(&self) -> Vec<LocalTask> {
        self.tasks.borrow_mut().drain(..).collect()
    }

    /// Ejecuta en orden FIFO todas las tareas, incluidas las que se encolen mientras tanto
    pub async fn run_all(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}
