// ============================================================================
// VOTING STATE - Estado reconciliado + función de transición pura
// ============================================================================
// `reduce(state, event) -> state` es la única forma de cambiar el estado.
// Los resultados de lecturas llegan con un ticket; si el ticket quedó viejo
// (otra lectura más nueva ya se aplicó, o cambió la cuenta) se descartan.
// ============================================================================

use std::collections::HashSet;

use crate::models::{Address, Candidate, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshKind {
    Candidates,
    Status,
    RemainingTime,
    Eligibility,
}

impl RefreshKind {
    fn slot(self) -> usize {
        match self {
            RefreshKind::Candidates => 0,
            RefreshKind::Status => 1,
            RefreshKind::RemainingTime => 2,
            RefreshKind::Eligibility => 3,
        }
    }
}

/// Identifica una lectura emitida: tipo, secuencia y época de sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub kind: RefreshKind,
    pub seq: u64,
    pub epoch: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TicketBook {
    issued: [u64; 4],
    applied: [u64; 4],
}

impl TicketBook {
    fn is_fresh(&self, ticket: &RefreshTicket) -> bool {
        ticket.seq > self.applied[ticket.kind.slot()]
    }

    fn mark_applied(&mut self, ticket: &RefreshTicket) {
        self.applied[ticket.kind.slot()] = ticket.seq;
    }
}

/// Estados de interés de la máquina de reconciliación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    ConnectedEligible,
    ConnectedVoted,
    VotingClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VotingEvent {
    /// Connect explícito o cambio de cuenta: nueva época de sesión
    AccountAdopted(Address),
    Disconnected,
    RefreshIssued(RefreshKind),
    CandidatesLoaded {
        ticket: RefreshTicket,
        candidates: Vec<Candidate>,
    },
    StatusLoaded {
        ticket: RefreshTicket,
        open: bool,
    },
    RemainingTimeLoaded {
        ticket: RefreshTicket,
        seconds: u64,
    },
    VoterFlagLoaded {
        ticket: RefreshTicket,
        account: Address,
        has_voted: bool,
    },
    SelectionChanged(Option<usize>),
    SubmissionStarted,
    VoteConfirmed {
        account: Address,
    },
    SubmissionFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VotingState {
    pub session: Session,
    /// Se incrementa en cada connect / cambio de cuenta / desconexión
    pub session_epoch: u64,
    pub candidates: Vec<Candidate>,
    pub voting_open: bool,
    pub remaining_time: Option<u64>,
    /// `voters(account)` para la cuenta actual; None hasta la primera lectura
    pub voter_flag: Option<bool>,
    pub submitting: bool,
    pub selection: Option<usize>,
    confirmed_voters: HashSet<Address>,
    tickets: TicketBook,
    /// Seq de candidatos emitido al confirmar el voto; hasta aplicar uno más
    /// nuevo, el store no está asentado
    post_vote_barrier: Option<u64>,
}

impl Default for VotingState {
    fn default() -> Self {
        Self {
            session: Session::disconnected(),
            session_epoch: 0,
            candidates: Vec::new(),
            // Abierta hasta que el contrato diga lo contrario
            voting_open: true,
            remaining_time: None,
            voter_flag: None,
            submitting: false,
            selection: None,
            confirmed_voters: HashSet::new(),
            tickets: TicketBook::default(),
            post_vote_barrier: None,
        }
    }
}

impl VotingState {
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    pub fn account(&self) -> Option<&Address> {
        self.session.account()
    }

    /// Monótono por cuenta: una vez visto `true`, sigue `true`
    pub fn has_voted(&self) -> bool {
        match self.session.account() {
            Some(account) => {
                self.voter_flag == Some(true) || self.confirmed_voters.contains(account)
            }
            None => false,
        }
    }

    pub fn has_voted_account(&self, account: &Address) -> bool {
        self.confirmed_voters.contains(account)
    }

    pub fn eligibility_known(&self) -> bool {
        self.voter_flag.is_some() || self.has_voted()
    }

    /// Control de voto habilitado: conectado, abierto, elegibilidad conocida y sin envío en curso
    pub fn can_vote(&self) -> bool {
        self.is_connected()
            && self.voting_open
            && self.eligibility_known()
            && !self.has_voted()
            && !self.submitting
    }

    /// Igualdad de lo que se pinta. Tickets y barrera son contabilidad interna
    /// y no cuentan como cambio.
    pub fn same_view(&self, other: &Self) -> bool {
        self.session == other.session
            && self.candidates == other.candidates
            && self.voting_open == other.voting_open
            && self.remaining_time == other.remaining_time
            && self.voter_flag == other.voter_flag
            && self.submitting == other.submitting
            && self.selection == other.selection
            && self.has_voted() == other.has_voted()
    }

    pub fn is_settled(&self) -> bool {
        !self.submitting && self.post_vote_barrier.is_none()
    }

    pub fn phase(&self) -> Phase {
        if !self.voting_open {
            Phase::VotingClosed
        } else if !self.is_connected() {
            Phase::Disconnected
        } else if self.has_voted() {
            Phase::ConnectedVoted
        } else {
            Phase::ConnectedEligible
        }
    }

    /// Ticket de la última lectura emitida para `kind`
    pub fn last_issued(&self, kind: RefreshKind) -> RefreshTicket {
        RefreshTicket {
            kind,
            seq: self.tickets.issued[kind.slot()],
            epoch: self.session_epoch,
        }
    }
}

/// Transición pura `(estado, evento) -> estado`
pub fn reduce(mut state: VotingState, event: VotingEvent) -> VotingState {
    match event {
        VotingEvent::AccountAdopted(account) => {
            state.session = Session::connected(account);
            state.session_epoch += 1;
            state.voter_flag = None;
            state.selection = None;
        }
        VotingEvent::Disconnected => {
            state.session = Session::disconnected();
            state.session_epoch += 1;
            state.voter_flag = None;
            state.selection = None;
        }
        VotingEvent::RefreshIssued(kind) => {
            state.tickets.issued[kind.slot()] += 1;
        }
        VotingEvent::CandidatesLoaded { ticket, candidates } => {
            if !state.tickets.is_fresh(&ticket) {
                log::debug!("🗑️ [STORE] candidatos #{} descartados (obsoletos)", ticket.seq);
                return state;
            }
            state.tickets.mark_applied(&ticket);
            // Reemplazo atómico de la lista
            state.candidates = candidates;
            if let Some(selected) = state.selection {
                if selected >= state.candidates.len() {
                    state.selection = None;
                }
            }
            if matches!(state.post_vote_barrier, Some(barrier) if ticket.seq > barrier) {
                state.post_vote_barrier = None;
            }
        }
        VotingEvent::StatusLoaded { ticket, open } => {
            if !state.tickets.is_fresh(&ticket) {
                log::debug!("🗑️ [STORE] estado #{} descartado (obsoleto)", ticket.seq);
                return state;
            }
            state.tickets.mark_applied(&ticket);
            state.voting_open = open;
        }
        VotingEvent::RemainingTimeLoaded { ticket, seconds } => {
            if !state.tickets.is_fresh(&ticket) {
                log::debug!("🗑️ [STORE] tiempo restante #{} descartado (obsoleto)", ticket.seq);
                return state;
            }
            state.tickets.mark_applied(&ticket);
            state.remaining_time = Some(seconds);
        }
        VotingEvent::VoterFlagLoaded {
            ticket,
            account,
            has_voted,
        } => {
            if has_voted {
                // Cierto para esa cuenta aunque ya no sea la actual
                state.confirmed_voters.insert(account.clone());
            }
            let same_account = state.session.account() == Some(&account);
            if ticket.epoch != state.session_epoch || !same_account {
                log::debug!(
                    "🗑️ [STORE] elegibilidad de {} descartada (época {} != {})",
                    account,
                    ticket.epoch,
                    state.session_epoch
                );
                return state;
            }
            if !state.tickets.is_fresh(&ticket) {
                return state;
            }
            state.tickets.mark_applied(&ticket);
            state.voter_flag = Some(has_voted || state.confirmed_voters.contains(&account));
        }
        VotingEvent::SelectionChanged(selection) => {
            state.selection = selection;
        }
        VotingEvent::SubmissionStarted => {
            state.submitting = true;
        }
        VotingEvent::VoteConfirmed { account } => {
            state.submitting = false;
            state.confirmed_voters.insert(account.clone());
            if state.session.account() == Some(&account) {
                state.voter_flag = Some(true);
            }
            state.selection = None;
            state.post_vote_barrier = Some(state.tickets.issued[RefreshKind::Candidates.slot()]);
        }
        VotingEvent::SubmissionFailed => {
            state.submitting = false;
        }
    }
    state
}
