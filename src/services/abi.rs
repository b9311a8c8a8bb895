// ============================================================================
// ABI CODEC - Codificación de llamadas y decodificación de respuestas
// ============================================================================
// Solo cubre los tipos que usa el contrato de votación: address, uint256,
// bool y tuple(string,uint256)[]. Palabras de 32 bytes, big-endian.
// ============================================================================

use crate::error::VotingError;
use crate::models::{Address, CandidateRecord};

const WORD: usize = 32;

/// Argumento estático de una llamada
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(u64),
}

impl Token {
    fn to_word(&self) -> [u8; WORD] {
        let mut word = [0u8; WORD];
        match self {
            Token::Address(address) => word[12..].copy_from_slice(&address.to_bytes()),
            Token::Uint(value) => word[24..].copy_from_slice(&value.to_be_bytes()),
        }
        word
    }
}

/// Calldata hex ("0x" + selector + argumentos)
pub fn encode_call(selector: [u8; 4], args: &[Token]) -> String {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(&arg.to_word());
    }
    format!("0x{}", hex::encode(data))
}

fn decode_hex(raw: &str) -> Result<Vec<u8>, VotingError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.is_empty() {
        return Err(VotingError::Decode(
            "empty return data (is the contract deployed at the configured address?)".to_string(),
        ));
    }
    hex::decode(digits).map_err(|e| VotingError::Decode(format!("invalid hex: {}", e)))
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], VotingError> {
    offset
        .checked_add(WORD)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            VotingError::Decode(format!(
                "word at offset {} out of bounds ({} bytes)",
                offset,
                data.len()
            ))
        })
}

fn u64_at(data: &[u8], offset: usize) -> Result<u64, VotingError> {
    let word = word_at(data, offset)?;
    if word[..24].iter().any(|b| *b != 0) {
        return Err(VotingError::Decode(format!(
            "uint256 at offset {} does not fit in 64 bits",
            offset
        )));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(low))
}

fn usize_at(data: &[u8], offset: usize) -> Result<usize, VotingError> {
    let value = u64_at(data, offset)?;
    usize::try_from(value)
        .map_err(|_| VotingError::Decode(format!("offset {} too large", value)))
}

fn checked(a: usize, b: usize) -> Result<usize, VotingError> {
    a.checked_add(b)
        .ok_or_else(|| VotingError::Decode("offset overflow".to_string()))
}

pub fn decode_bool(raw: &str) -> Result<bool, VotingError> {
    let data = decode_hex(raw)?;
    match u64_at(&data, 0)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(VotingError::Decode(format!("invalid bool value {}", other))),
    }
}

pub fn decode_uint(raw: &str) -> Result<u64, VotingError> {
    let data = decode_hex(raw)?;
    u64_at(&data, 0)
}

/// Decodifica `tuple(string name, uint256 voteCount)[]`
pub fn decode_candidates(raw: &str) -> Result<Vec<CandidateRecord>, VotingError> {
    let data = decode_hex(raw)?;

    let array_start = usize_at(&data, 0)?;
    let len = usize_at(&data, array_start)?;
    let head = checked(array_start, WORD)?;

    // Cada elemento necesita al menos su offset en la cabecera
    if len > data.len() / WORD {
        return Err(VotingError::Decode(format!(
            "array length {} exceeds payload",
            len
        )));
    }

    let mut records = Vec::with_capacity(len);
    for i in 0..len {
        let tuple_start = checked(head, usize_at(&data, checked(head, i * WORD)?)?)?;
        let name_start = checked(tuple_start, usize_at(&data, tuple_start)?)?;
        let vote_count = u64_at(&data, checked(tuple_start, WORD)?)?;

        let name_len = usize_at(&data, name_start)?;
        let bytes_start = checked(name_start, WORD)?;
        let bytes = data
            .get(bytes_start..checked(bytes_start, name_len)?)
            .ok_or_else(|| VotingError::Decode(format!("candidate {} name out of bounds", i)))?;
        let name = String::from_utf8(bytes.to_vec())
            .map_err(|_| VotingError::Decode(format!("candidate {} name is not utf-8", i)))?;

        records.push(CandidateRecord { name, vote_count });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{VOTE, VOTERS};

    // getAllVotesOfCandiates() devolviendo [("Mark",3),("Mike",0),("Henry",7)]
    const THREE_CANDIDATES: &str = concat!(
        "0x",
        "0000000000000000000000000000000000000000000000000000000000000020",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "0000000000000000000000000000000000000000000000000000000000000060",
        "00000000000000000000000000000000000000000000000000000000000000e0",
        "0000000000000000000000000000000000000000000000000000000000000160",
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "0000000000000000000000000000000000000000000000000000000000000004",
        "4d61726b00000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000004",
        "4d696b6500000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000040",
        "0000000000000000000000000000000000000000000000000000000000000007",
        "0000000000000000000000000000000000000000000000000000000000000005",
        "48656e7279000000000000000000000000000000000000000000000000000000",
    );

    #[test]
    fn decodes_candidate_tuples_in_onchain_order() {
        let records = decode_candidates(THREE_CANDIDATES).unwrap();
        let pairs: Vec<(&str, u64)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.vote_count))
            .collect();
        assert_eq!(pairs, vec![("Mark", 3), ("Mike", 0), ("Henry", 7)]);
    }

    #[test]
    fn decodes_empty_candidate_array() {
        let raw = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000000",
        );
        assert!(decode_candidates(raw).unwrap().is_empty());
    }

    #[test]
    fn truncated_candidate_payload_is_a_decode_error() {
        let truncated = &THREE_CANDIDATES[..THREE_CANDIDATES.len() - 64];
        assert!(matches!(
            decode_candidates(truncated),
            Err(VotingError::Decode(_))
        ));
    }

    #[test]
    fn empty_return_data_is_a_decode_error() {
        assert!(matches!(decode_bool("0x"), Err(VotingError::Decode(_))));
    }

    #[test]
    fn bool_and_uint_words() {
        let one = format!("0x{}1", "0".repeat(63));
        assert!(decode_bool(&one).unwrap());
        assert_eq!(decode_uint(&format!("0x{}e10", "0".repeat(61))).unwrap(), 3600);

        let two = format!("0x{}2", "0".repeat(63));
        assert!(matches!(decode_bool(&two), Err(VotingError::Decode(_))));

        let huge = format!("0x1{}", "0".repeat(63));
        assert!(matches!(decode_uint(&huge), Err(VotingError::Decode(_))));
    }

    #[test]
    fn encodes_address_and_uint_arguments() {
        let voter = Address::parse("0x5B38Da6a701c568545dCfcB03FcB875f56beddC4").unwrap();
        assert_eq!(
            encode_call(VOTERS, &[Token::Address(voter)]),
            "0xa3ec138d0000000000000000000000005b38da6a701c568545dcfcb03fcb875f56beddc4"
        );
        assert_eq!(
            encode_call(VOTE, &[Token::Uint(2)]),
            format!("0x0121b93f{}2", "0".repeat(63))
        );
    }
}
