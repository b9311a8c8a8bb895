// ============================================================================
// BALLOT VIEW - Candidatos + control de voto
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_input, ElementBuilder};
use crate::services::provider::Eip1193;
use crate::state::VotingState;
use crate::utils::format_remaining_time;
use crate::viewmodels::VotingViewModel;

pub const VOTE_INPUT_CLASS: &str = "vote-input";

/// Tabla índice / nombre / votos
pub fn render_candidate_table(state: &VotingState) -> Result<Element, JsValue> {
    let head = ElementBuilder::new("tr")?
        .child(ElementBuilder::new("th")?.text("Índice").build())?
        .child(ElementBuilder::new("th")?.text("Candidato").build())?
        .child(ElementBuilder::new("th")?.text("Votos").build())?
        .build();

    let table = ElementBuilder::new("table")?
        .class("candidate-table")
        .child(head)?
        .build();

    for candidate in &state.candidates {
        let selected = state.selection == Some(candidate.index);
        let row = ElementBuilder::new("tr")?
            .class(if selected { "candidate-row candidate-row--selected" } else { "candidate-row" })
            .child(ElementBuilder::new("td")?.text(&candidate.index.to_string()).build())?
            .child(ElementBuilder::new("td")?.text(&candidate.name).build())?
            .child(ElementBuilder::new("td")?.text(&candidate.vote_count.to_string()).build())?
            .build();
        append_child(&table, &row)?;
    }

    Ok(table)
}

/// Renderizar la papeleta. `vote_enabled` viene del selector de pantalla.
pub fn render_ballot<P: Eip1193 + 'static>(
    viewmodel: &VotingViewModel<P>,
    state: &VotingState,
    vote_enabled: bool,
) -> Result<Element, JsValue> {
    let account = state
        .account()
        .map(|a| a.short())
        .unwrap_or_default();
    let remaining = state
        .remaining_time
        .map(format_remaining_time)
        .unwrap_or_else(|| "…".to_string());

    let header = ElementBuilder::new("div")?
        .class("ballot-header")
        .child(ElementBuilder::new("span")?.class("ballot-account").text(&format!("🦊 {}", account)).build())?
        .child(ElementBuilder::new("span")?.class("ballot-remaining").text(&format!("⏳ {}", remaining)).build())?
        .build();

    let screen = ElementBuilder::new("div")?
        .class("ballot-screen")
        .child(header)?
        .child(render_candidate_table(state)?)?
        .build();

    if vote_enabled {
        append_child(&screen, &render_vote_control(viewmodel, state)?)?;
    } else {
        let notice = ElementBuilder::new("p")?
            .class("voted-notice")
            .text("✅ Ya has votado")
            .build();
        append_child(&screen, &notice)?;
    }

    Ok(screen)
}

fn render_vote_control<P: Eip1193 + 'static>(
    viewmodel: &VotingViewModel<P>,
    state: &VotingState,
) -> Result<Element, JsValue> {
    // El borrador vive en el viewmodel: un re-render no debe pisar lo que se escribe
    let draft = match viewmodel.selection_draft() {
        text if text.is_empty() => state.selection.map(|i| i.to_string()).unwrap_or_default(),
        text => text,
    };

    let input = ElementBuilder::new("input")?
        .class(VOTE_INPUT_CLASS)
        .attr("type", "number")?
        .attr("min", "0")?
        .attr("placeholder", "Índice del candidato")?
        .attr("value", &draft)?
        .build();
    {
        let vm = viewmodel.clone();
        on_input(&input, move |value| vm.set_selection_draft(value))?;
    }

    let label = if state.submitting { "Enviando…" } else { "Votar" };
    let button = ElementBuilder::new("button")?
        .class("vote-button")
        .text(label)
        .flag("disabled", !state.can_vote())?
        .build();

    let vm = viewmodel.clone();
    on_click(&button, move |_| {
        if let Err(e) = vm.select_candidate(&vm.selection_draft()) {
            log::warn!("⚠️ [VOTE] Selección inválida: {}", e);
            return;
        }
        let vm = vm.clone();
        spawn_local(async move {
            // El error ya queda logueado en el viewmodel
            let _ = vm.submit_vote().await;
        });
    })?;

    let control = ElementBuilder::new("div")?
        .class("vote-control")
        .child(input)?
        .child(button)?
        .build();
    Ok(control)
}
