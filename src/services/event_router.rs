// ============================================================================
// EVENT ROUTER - accountsChanged de la wallet -> Wallet Session
// ============================================================================
// Un único listener por montaje. Se registra en `attach` y se libera en
// `detach` o al soltar el router (desmontaje).
// ============================================================================

use std::cell::RefCell;

use crate::error::VotingError;
use crate::services::provider::Eip1193;
use crate::viewmodels::VotingViewModel;

pub struct EventRouter<P: Eip1193 + 'static> {
    viewmodel: VotingViewModel<P>,
    listener: RefCell<Option<P::Listener>>,
}

impl<P: Eip1193 + 'static> EventRouter<P> {
    pub fn new(viewmodel: VotingViewModel<P>) -> Self {
        Self {
            viewmodel,
            listener: RefCell::new(None),
        }
    }

    /// Registrar el listener. Llamadas repetidas no acumulan listeners.
    pub fn attach(&self) -> Result<(), VotingError> {
        if self.listener.borrow().is_some() {
            log::warn!("⚠️ [ROUTER] attach ya fue llamado, ignorando llamada duplicada");
            return Ok(());
        }

        let provider = self.viewmodel.provider()?;
        let viewmodel = self.viewmodel.clone();
        let listener = provider.on_accounts_changed(Box::new(move |accounts: Vec<String>| {
            log::debug!("📡 [ROUTER] accountsChanged: {:?}", accounts);
            viewmodel.handle_accounts_changed(accounts);
        }))?;

        *self.listener.borrow_mut() = Some(listener);
        log::info!("✅ [ROUTER] Escuchando cambios de cuenta");
        Ok(())
    }

    /// Soltar el listener (el Drop del handle lo desregistra en la wallet)
    pub fn detach(&self) {
        if self.listener.borrow_mut().take().is_some() {
            log::info!("🔕 [ROUTER] Listener de cuentas liberado");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.borrow().is_some()
    }
}

impl<P: Eip1193 + 'static> Drop for EventRouter<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::config::ReceiptConfig;
    use crate::state::Phase;
    use crate::testing::{addr, instant_delay, MockProvider, TaskQueue};

    fn router(provider: &Rc<MockProvider>, tasks: &TaskQueue) -> EventRouter<MockProvider> {
        let vm = VotingViewModel::new(
            Some(provider.clone()),
            addr(0xc0),
            ReceiptConfig::default(),
            tasks.spawner(),
            instant_delay(),
        );
        EventRouter::new(vm)
    }

    #[test]
    fn attach_registers_exactly_one_listener() {
        let provider = Rc::new(MockProvider::with_candidates(&[]));
        let tasks = TaskQueue::default();
        let router = router(&provider, &tasks);

        router.attach().unwrap();
        router.attach().unwrap();
        assert!(router.is_attached());
        assert_eq!(provider.listener_count(), 1);
    }

    #[test]
    fn unmount_releases_the_listener_and_remount_registers_one() {
        let provider = Rc::new(MockProvider::with_candidates(&[]));
        let tasks = TaskQueue::default();

        let first = router(&provider, &tasks);
        first.attach().unwrap();
        drop(first);
        assert_eq!(provider.listener_count(), 0);

        let second = router(&provider, &tasks);
        second.attach().unwrap();
        assert_eq!(provider.listener_count(), 1);
        second.detach();
        assert_eq!(provider.listener_count(), 0);
        assert!(!second.is_attached());
    }

    #[test]
    fn without_wallet_attach_fails() {
        let tasks = TaskQueue::default();
        let vm: VotingViewModel<MockProvider> = VotingViewModel::new(
            None,
            addr(0xc0),
            ReceiptConfig::default(),
            tasks.spawner(),
            instant_delay(),
        );
        let router = EventRouter::new(vm);
        assert_eq!(router.attach(), Err(VotingError::WalletUnavailable));
        assert!(!router.is_attached());
    }

    #[tokio::test]
    async fn notifications_reach_the_session() {
        let provider = Rc::new(MockProvider::with_candidates(&[("Mark", 0)]));
        let tasks = TaskQueue::default();
        let router = router(&provider, &tasks);
        router.attach().unwrap();

        let b = addr(0xbb).to_string();
        provider.emit_accounts_changed(&[b.as_str()]);
        assert_eq!(tasks.len(), 1, "one eligibility refresh for the new account");
        tasks.run_all().await;

        let state = router.viewmodel.store().snapshot();
        assert_eq!(state.account(), Some(&addr(0xbb)));
        assert_eq!(state.voter_flag, Some(false));

        provider.emit_accounts_changed(&[]);
        assert_eq!(router.viewmodel.store().snapshot().phase(), Phase::Disconnected);
        assert_eq!(tasks.len(), 0);
    }

    #[test]
    fn detached_router_ignores_notifications() {
        let provider = Rc::new(MockProvider::with_candidates(&[]));
        let tasks = TaskQueue::default();
        let router = router(&provider, &tasks);
        router.attach().unwrap();
        router.detach();

        let b = addr(0xbb).to_string();
        provider.emit_accounts_changed(&[b.as_str()]);
        assert!(!router.viewmodel.store().snapshot().is_connected());
        assert_eq!(tasks.len(), 0);
    }
}
