use serde::{Deserialize, Serialize};

/// Candidato tal como lo muestra el cliente.
///
/// `index` es la posición en la lista on-chain y es el argumento de `vote(uint)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub index: usize,
    pub name: String,
    pub vote_count: u64,
}

/// Tupla `(string name, uint256 voteCount)` decodificada del contrato
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub name: String,
    pub vote_count: u64,
}

impl Candidate {
    /// Asigna índices siguiendo el orden on-chain
    pub fn from_records(records: Vec<CandidateRecord>) -> Vec<Candidate> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Candidate {
                index,
                name: record.name,
                vote_count: record.vote_count,
            })
            .collect()
    }
}
