use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier, unique within a candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u32);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CandidateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Real-world club identifier (the per-team cap counts these).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TeamId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Content hash of a candidate pool (BLAKE3 over the canonical, id-sorted pool).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolHash(pub String);

impl PoolHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }
}

impl fmt::Display for PoolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of a constraint set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintsHash(pub String);

impl ConstraintsHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }
}

impl fmt::Display for ConstraintsHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic run ID (pool + constraints).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId {
    pub pool_hash: PoolHash,
    pub constraints_hash: ConstraintsHash,
}

impl RunId {
    pub fn new(pool_hash: PoolHash, constraints_hash: ConstraintsHash) -> Self {
        Self { pool_hash, constraints_hash }
    }

    /// BLAKE3 over the two fingerprints, as 64 hex chars.
    pub fn hash(&self) -> String {
        use serde_json::json;

        let canonical = json!({
            "constraints_hash": &self.constraints_hash.0,
            "pool_hash": &self.pool_hash.0,
        });

        blake3::hash(canonical.to_string().as_bytes()).to_hex().to_string()
    }

    /// First 12 hex chars of `hash()`, used in artifact directory names.
    pub fn short(&self) -> String {
        self.hash()[..12].to_string()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pool_hash, self.constraints_hash)
    }
}
