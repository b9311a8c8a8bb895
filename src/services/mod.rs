pub mod abi;
pub mod provider;
pub mod contract_gateway;
pub mod event_router;

pub use provider::{Eip1193, InjectedProvider};
pub use contract_gateway::ContractGateway;
pub use event_router::EventRouter;
