// ============================================================================
// FINISHED VIEW - Votación cerrada
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::VotingState;
use crate::views::ballot::render_candidate_table;

pub fn render_finished(state: &VotingState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?
        .class("finished-screen")
        .child(ElementBuilder::new("h1")?.text("La votación ha terminado").build())?
        .child(render_candidate_table(state)?)?
        .build();
    Ok(screen)
}
