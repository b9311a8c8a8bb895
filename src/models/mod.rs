pub mod address;
pub mod candidate;
pub mod receipt;
pub mod session;

pub use address::Address;
pub use candidate::{Candidate, CandidateRecord};
pub use receipt::TransactionReceipt;
pub use session::{Session, SignerHandle};
