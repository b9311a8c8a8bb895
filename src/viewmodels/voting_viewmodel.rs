// ============================================================================
// VOTING VIEWMODEL - Triggers de refresco y envío del voto
// ============================================================================
// Cada trigger con nombre refresca un subconjunto concreto:
//   on_load            -> candidatos, estado, tiempo restante
//   on_connect         -> elegibilidad, candidatos
//   on_account_changed -> elegibilidad
//   on_vote_confirmed  -> candidatos, elegibilidad
//   on_periodic_tick   -> estado, tiempo restante, candidatos
// Los fallos se loguean y el estado previo se conserva.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ReceiptConfig;
use crate::error::VotingError;
use crate::models::{Address, TransactionReceipt};
use crate::services::contract_gateway::ContractGateway;
use crate::services::provider::Eip1193;
use crate::state::{RefreshKind, RefreshTicket, VotingEvent, VotingStore};
use crate::utils::{Delay, Spawner};
use crate::viewmodels::wallet_session::{AccountChange, WalletSession};

pub struct VotingViewModel<P: Eip1193 + 'static> {
    session: WalletSession<P>,
    store: VotingStore,
    contract: Address,
    receipts: ReceiptConfig,
    spawner: Spawner,
    delay: Delay,
    /// Texto del input de índice: sobrevive a los re-renders
    draft: Rc<RefCell<String>>,
}

impl<P: Eip1193 + 'static> Clone for VotingViewModel<P> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            store: self.store.clone(),
            contract: self.contract.clone(),
            receipts: self.receipts,
            spawner: self.spawner.clone(),
            delay: self.delay.clone(),
            draft: self.draft.clone(),
        }
    }
}

fn log_failure(kind: RefreshKind, result: Result<(), VotingError>) {
    if let Err(e) = result {
        log::error!("❌ [VOTE] Error refrescando {:?}: {}", kind, e);
    }
}

impl<P: Eip1193 + 'static> VotingViewModel<P> {
    pub fn new(
        provider: Option<Rc<P>>,
        contract: Address,
        receipts: ReceiptConfig,
        spawner: Spawner,
        delay: Delay,
    ) -> Self {
        let store = VotingStore::new();
        Self {
            session: WalletSession::new(provider, store.clone()),
            store,
            contract,
            receipts,
            spawner,
            delay,
            draft: Rc::new(RefCell::new(String::new())),
        }
    }

    pub fn store(&self) -> &VotingStore {
        &self.store
    }

    pub fn provider(&self) -> Result<Rc<P>, VotingError> {
        self.session.provider()
    }

    /// Gateway nuevo a partir del signer actual
    fn gateway(&self) -> Result<ContractGateway<P>, VotingError> {
        let provider = self.session.provider()?;
        let signer = self.store.with(|s| s.session.signer().cloned());
        Ok(ContractGateway::new(
            provider,
            self.contract.clone(),
            signer,
            self.receipts,
            self.delay.clone(),
        ))
    }

    // ------------------------------------------------------------------------
    // Lecturas individuales (ticket antes del primer await)
    // ------------------------------------------------------------------------

    pub async fn refresh_candidates(&self) -> Result<(), VotingError> {
        let ticket = self.store.begin_refresh(RefreshKind::Candidates);
        let candidates = self.gateway()?.get_candidates().await?;
        log::debug!("🗳️ [VOTE] {} candidatos (#{})", candidates.len(), ticket.seq);
        self.store
            .dispatch(VotingEvent::CandidatesLoaded { ticket, candidates });
        Ok(())
    }

    pub async fn refresh_status(&self) -> Result<(), VotingError> {
        let ticket = self.store.begin_refresh(RefreshKind::Status);
        let open = self.gateway()?.get_voting_status().await?;
        if !open {
            log::info!("🏁 [VOTE] Votación cerrada");
        }
        self.store.dispatch(VotingEvent::StatusLoaded { ticket, open });
        Ok(())
    }

    pub async fn refresh_remaining_time(&self) -> Result<(), VotingError> {
        let ticket = self.store.begin_refresh(RefreshKind::RemainingTime);
        let seconds = self.gateway()?.get_remaining_time().await?;
        self.store
            .dispatch(VotingEvent::RemainingTimeLoaded { ticket, seconds });
        Ok(())
    }

    /// Elegibilidad de la cuenta actual; sin sesión no hay nada que leer
    pub async fn refresh_eligibility(&self) -> Result<(), VotingError> {
        let Some(account) = self.store.with(|s| s.account().cloned()) else {
            log::debug!("🔒 [VOTE] Sin cuenta conectada, elegibilidad omitida");
            return Ok(());
        };
        let ticket = self.store.begin_refresh(RefreshKind::Eligibility);
        self.load_eligibility(account, ticket).await
    }

    /// Lectura de `voters(account)` etiquetada con la cuenta/época para la que se emitió
    async fn load_eligibility(
        &self,
        account: Address,
        ticket: RefreshTicket,
    ) -> Result<(), VotingError> {
        let has_voted = self.gateway()?.get_voter_flag(&account).await?;
        self.store.dispatch(VotingEvent::VoterFlagLoaded {
            ticket,
            account,
            has_voted,
        });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------------

    /// Montaje: estado público, visible incluso sin conexión
    pub async fn on_load(&self) {
        log_failure(RefreshKind::Candidates, self.refresh_candidates().await);
        log_failure(RefreshKind::RemainingTime, self.refresh_remaining_time().await);
        log_failure(RefreshKind::Status, self.refresh_status().await);
    }

    pub async fn on_connect(&self) {
        log_failure(RefreshKind::Eligibility, self.refresh_eligibility().await);
        log_failure(RefreshKind::Candidates, self.refresh_candidates().await);
    }

    pub async fn on_account_changed(&self) {
        log_failure(RefreshKind::Eligibility, self.refresh_eligibility().await);
    }

    pub async fn on_vote_confirmed(&self) {
        log_failure(RefreshKind::Candidates, self.refresh_candidates().await);
        log_failure(RefreshKind::Eligibility, self.refresh_eligibility().await);
    }

    pub async fn on_periodic_tick(&self) {
        log_failure(RefreshKind::Status, self.refresh_status().await);
        log_failure(RefreshKind::RemainingTime, self.refresh_remaining_time().await);
        log_failure(RefreshKind::Candidates, self.refresh_candidates().await);
    }

    // ------------------------------------------------------------------------
    // Acciones de usuario
    // ------------------------------------------------------------------------

    /// Botón "conectar". Los fallos solo se loguean: el usuario sigue en la pantalla de conexión
    pub async fn connect(&self) -> bool {
        match self.session.connect().await {
            Ok(_) => {
                self.on_connect().await;
                true
            }
            Err(e) => {
                log::error!("❌ [WALLET] No se pudo conectar: {}", e);
                false
            }
        }
    }

    /// Entrada del Event Router (síncrona). La elegibilidad se pide con el
    /// ticket de la cuenta recién adoptada y se lanza como tarea aparte.
    pub fn handle_accounts_changed(&self, accounts: Vec<String>) {
        if let AccountChange::Adopted(account) = self.session.on_accounts_changed(&accounts) {
            let ticket = self.store.begin_refresh(RefreshKind::Eligibility);
            let vm = self.clone();
            (self.spawner)(Box::pin(async move {
                log_failure(
                    RefreshKind::Eligibility,
                    vm.load_eligibility(account, ticket).await,
                );
            }));
        }
    }

    pub fn selection_draft(&self) -> String {
        self.draft.borrow().clone()
    }

    /// Guarda lo tecleado sin tocar el store (no provoca re-render)
    pub fn set_selection_draft(&self, value: String) {
        *self.draft.borrow_mut() = value;
    }

    /// Índice escrito por el usuario; debe existir en la lista actual
    pub fn select_candidate(&self, input: &str) -> Result<usize, VotingError> {
        let count = self.store.with(|s| s.candidates.len());
        let trimmed = input.trim();

        let parsed = if trimmed.is_empty() {
            Err(VotingError::NoSelection)
        } else {
            trimmed
                .parse::<usize>()
                .ok()
                .filter(|index| *index < count)
                .ok_or_else(|| VotingError::InvalidSelection {
                    input: trimmed.to_string(),
                    count,
                })
        };

        self.store
            .dispatch(VotingEvent::SelectionChanged(parsed.as_ref().ok().copied()));
        parsed
    }

    /// Envía el voto por la selección actual y fuerza el re-fetch posterior.
    /// Las precondiciones fallidas no emiten RPC ni cambian el estado.
    pub async fn submit_vote(&self) -> Result<TransactionReceipt, VotingError> {
        let (account, index) = self.store.with(|s| -> Result<(Address, usize), VotingError> {
            let account = s.account().cloned().ok_or(VotingError::NotConnected)?;
            if s.submitting {
                return Err(VotingError::SubmissionInFlight);
            }
            if !s.voting_open {
                return Err(VotingError::VotingClosed);
            }
            if s.has_voted() {
                return Err(VotingError::AlreadyVoted);
            }
            let index = s.selection.ok_or(VotingError::NoSelection)?;
            Ok((account, index))
        })?;
        let gateway = self.gateway()?;

        self.store.dispatch(VotingEvent::SubmissionStarted);
        log::info!("🗳️ [VOTE] {} vota por el candidato {}", account, index);

        match gateway.submit_vote(index).await {
            Ok(receipt) => {
                self.store.dispatch(VotingEvent::VoteConfirmed { account });
                self.draft.borrow_mut().clear();
                self.on_vote_confirmed().await;
                Ok(receipt)
            }
            Err(e) => {
                self.store.dispatch(VotingEvent::SubmissionFailed);
                log::error!("❌ [VOTE] Voto fallido: {}", e);
                if e.is_remote_failure() {
                    // El estado real on-chain corrige la UI
                    self.on_vote_confirmed().await;
                }
                Err(e)
            }
        }
    }
}
