pub mod wallet_session;
pub mod voting_viewmodel;

pub use wallet_session::{AccountChange, WalletSession};
pub use voting_viewmodel::VotingViewModel;
