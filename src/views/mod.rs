pub mod selector;
pub mod app;
pub mod login;
pub mod ballot;
pub mod finished;

pub use selector::{select_screen, Screen};
pub use app::render_app;
pub use login::render_connect_prompt;
pub use ballot::{render_ballot, render_candidate_table, VOTE_INPUT_CLASS};
pub use finished::render_finished;
