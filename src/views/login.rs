// ============================================================================
// CONNECT VIEW - Pantalla de conexión con la wallet
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::services::provider::Eip1193;
use crate::viewmodels::VotingViewModel;

/// Renderizar el prompt de conexión
pub fn render_connect_prompt<P: Eip1193 + 'static>(
    viewmodel: &VotingViewModel<P>,
) -> Result<Element, JsValue> {
    let wallet_missing = viewmodel.provider().is_err();

    let button = ElementBuilder::new("button")?
        .class("connect-button")
        .text("Conectar wallet")
        .flag("disabled", wallet_missing)?
        .build();

    let vm = viewmodel.clone();
    on_click(&button, move |_| {
        let vm = vm.clone();
        spawn_local(async move {
            vm.connect().await;
        });
    })?;

    let hint = if wallet_missing {
        "No se detectó ninguna wallet en este navegador."
    } else {
        "Conecta tu wallet para votar."
    };

    let screen = ElementBuilder::new("div")?
        .class("connect-screen")
        .child(ElementBuilder::new("h1")?.text("Votación descentralizada").build())?
        .child(ElementBuilder::new("p")?.class("connect-hint").text(hint).build())?
        .child(button)?
        .build();

    Ok(screen)
}
