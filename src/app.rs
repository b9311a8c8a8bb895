// ============================================================================
// APP - Montaje, re-render y desmontaje
// ============================================================================
// Cablea wallet inyectada -> viewmodel -> store -> vistas. Al soltar `App`
// se cancela el intervalo y se desregistra el listener de cuentas.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, clear, focus_first, get_element_by_id, has_focus};
use crate::services::{EventRouter, InjectedProvider};
use crate::utils::{browser_delay, browser_spawner};
use crate::viewmodels::VotingViewModel;
use crate::views::{render_app, VOTE_INPUT_CLASS};

pub struct App {
    root: Element,
    viewmodel: VotingViewModel<InjectedProvider>,
    router: EventRouter<InjectedProvider>,
    _tick: Interval,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(&CONFIG.mount_element_id).ok_or_else(|| {
            JsValue::from_str(&format!("No #{} element found", CONFIG.mount_element_id))
        })?;
        let contract = CONFIG.contract_address()?;

        let provider = match InjectedProvider::detect() {
            Ok(provider) => Some(Rc::new(provider)),
            Err(e) => {
                log::error!("❌ [APP] {}", e);
                None
            }
        };

        let viewmodel = VotingViewModel::new(
            provider,
            contract,
            CONFIG.receipt_config,
            browser_spawner(),
            browser_delay(),
        );

        // Batch: varios dispatch seguidos producen un solo re-render
        let scheduled = Rc::new(Cell::new(false));
        viewmodel.store().subscribe(move || {
            if scheduled.replace(true) {
                return;
            }
            let scheduled = scheduled.clone();
            Timeout::new(0, move || {
                scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        let router = EventRouter::new(viewmodel.clone());
        if let Err(e) = router.attach() {
            log::warn!("⚠️ [APP] Sin listener de cuentas: {}", e);
        }

        let tick = {
            let viewmodel = viewmodel.clone();
            Interval::new(CONFIG.refresh_config.interval_ms, move || {
                let viewmodel = viewmodel.clone();
                spawn_local(async move { viewmodel.on_periodic_tick().await });
            })
        };

        {
            let viewmodel = viewmodel.clone();
            spawn_local(async move { viewmodel.on_load().await });
        }

        log::info!("✅ [APP] Montada en #{} (contrato {})", CONFIG.mount_element_id, CONFIG.contract_address);
        Ok(Self {
            root,
            viewmodel,
            router,
            _tick: tick,
        })
    }

    /// Re-render completo de la pantalla actual. El input de voto conserva
    /// el foco si lo tenía (su texto lo guarda el viewmodel).
    pub fn render(&self) -> Result<(), JsValue> {
        let refocus = has_focus(VOTE_INPUT_CLASS);
        clear(&self.root);
        let view = render_app(&self.viewmodel)?;
        append_child(&self.root, &view)?;
        if refocus {
            focus_first(&self.root, VOTE_INPUT_CLASS)?;
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.router.detach();
        clear(&self.root);
        log::info!("👋 [APP] Desmontada");
    }
}
