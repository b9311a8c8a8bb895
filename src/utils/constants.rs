// Selectores de 4 bytes del ABI del contrato desplegado (keccak256 de la firma).
// El nombre `getAllVotesOfCandiates` es el del contrato, con su errata.

/// getAllVotesOfCandiates() -> (string name, uint256 voteCount)[]
pub const GET_ALL_VOTES_OF_CANDIDATES: [u8; 4] = [0x4d, 0x6b, 0xda, 0x5f];

/// getVotingStatus() -> bool
pub const GET_VOTING_STATUS: [u8; 4] = [0x58, 0x1c, 0x28, 0x1c];

/// getRemainingTime() -> uint256
pub const GET_REMAINING_TIME: [u8; 4] = [0xef, 0xb9, 0x8b, 0xcf];

/// voters(address) -> bool
pub const VOTERS: [u8; 4] = [0xa3, 0xec, 0x13, 0x8d];

/// vote(uint256)
pub const VOTE: [u8; 4] = [0x01, 0x21, 0xb9, 0x3f];

/// Evento EIP-1193 de cambio de cuentas
pub const ACCOUNTS_CHANGED_EVENT: &str = "accountsChanged";
