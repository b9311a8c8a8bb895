// ============================================================================
// BALLOT PWA - CLIENTE DE VOTACIÓN ON-CHAIN (RUST PURO)
// ============================================================================
// Arquitectura:
// - Views: Funciones que renderizan DOM (sin lógica) + selector de pantalla
// - ViewModels: Sesión de wallet + triggers de refresco + envío del voto
// - Services: Wallet EIP-1193, ABI, gateway del contrato, router de eventos
// - State: Estado reconciliado (reducer puro) en un store Rc<RefCell>
// - Models: Dirección, candidato, sesión, recibo
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod dom;
pub mod views;
pub mod utils;
mod app;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

// Instancia montada (una por página)
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    if CONFIG.is_production() {
        log::info!("🚀 Ballot PWA");
    } else {
        log::info!(
            "🚀 Ballot PWA ({}, log {}, contrato {})",
            CONFIG.environment,
            CONFIG.log_level(),
            CONFIG.contract_address
        );
    }

    let app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Re-render completo; sin app montada no hace nada
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Error re-renderizando: {:?}", e);
            }
        }
    });
}

/// Desmontar desde JavaScript: libera intervalo, listener de la wallet y DOM
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|cell| cell.borrow_mut().take());
    if app.is_none() {
        log::warn!("⚠️ [APP] unmount sin app montada");
    }
}
