// ============================================================================
// APP VIEW - Raíz: elige la pantalla a partir del estado
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::services::provider::Eip1193;
use crate::viewmodels::VotingViewModel;
use crate::views::selector::{select_screen, Screen};
use crate::views::{render_ballot, render_connect_prompt, render_finished};

pub fn render_app<P: Eip1193 + 'static>(viewmodel: &VotingViewModel<P>) -> Result<Element, JsValue> {
    let state = viewmodel.store().snapshot();
    let screen = select_screen(state.voting_open, state.is_connected(), state.has_voted());
    log::debug!("🎬 [APP] Pantalla: {:?}", screen);

    match screen {
        Screen::Finished => render_finished(&state),
        Screen::ConnectPrompt => render_connect_prompt(viewmodel),
        Screen::Ballot { vote_enabled } => render_ballot(viewmodel, &state, vote_enabled),
    }
}
