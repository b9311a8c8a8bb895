// ============================================================================
// VIEW SELECTOR - Qué pantalla mostrar
// ============================================================================

/// Pantalla de primer nivel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Votación cerrada: resultados
    Finished,
    ConnectPrompt,
    Ballot { vote_enabled: bool },
}

/// Función pura: el cierre manda sobre la conexión
pub fn select_screen(voting_open: bool, is_connected: bool, has_voted: bool) -> Screen {
    match (voting_open, is_connected) {
        (false, _) => Screen::Finished,
        (true, false) => Screen::ConnectPrompt,
        (true, true) => Screen::Ballot {
            vote_enabled: !has_voted,
        },
    }
}
