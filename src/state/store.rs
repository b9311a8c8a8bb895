// ============================================================================
// VOTING STORE - Contenedor reactivo del estado de votación
// ============================================================================
// Rc<RefCell> + subscribers. Solo cambia vía `dispatch(evento)`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::voting_state::{reduce, RefreshKind, RefreshTicket, VotingEvent, VotingState};

type Callback = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct VotingStore {
    state: Rc<RefCell<VotingState>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl VotingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia del estado actual
    pub fn snapshot(&self) -> VotingState {
        self.state.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&VotingState) -> R) -> R {
        reader(&self.state.borrow())
    }

    /// Aplicar un evento y notificar si cambió algo visible
    pub fn dispatch(&self, event: VotingEvent) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let before = state.clone();
            *state = reduce(std::mem::take(&mut *state), event);
            !state.same_view(&before)
        };
        if changed {
            self.notify();
        }
    }

    /// Emitir una lectura y obtener su ticket (antes del primer await)
    pub fn begin_refresh(&self, kind: RefreshKind) -> RefreshTicket {
        let mut state = self.state.borrow_mut();
        *state = reduce(std::mem::take(&mut *state), VotingEvent::RefreshIssued(kind));
        state.last_issued(kind)
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers (sin préstamos activos del estado)
    fn notify(&self) {
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}
