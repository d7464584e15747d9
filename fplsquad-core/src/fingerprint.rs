//! Content fingerprints for pools and constraint sets.
//!
//! - `pool_hash`: identity of the candidate data, independent of input order.
//! - `constraints_hash`: identity of the rules a squad was selected under.
//! - `run_id`: both together, so a report can be traced to exactly what produced it.

use serde::Serialize;

use crate::constraints::ConstraintSet;
use crate::domain::{Candidate, ConstraintsHash, PoolHash, RunId};

/// Hash a candidate pool. Candidates are sorted by id first, so the same
/// players in a different order hash identically.
pub fn pool_hash(candidates: &[Candidate]) -> PoolHash {
    let mut sorted: Vec<&Candidate> = candidates.iter().collect();
    sorted.sort_by_key(|c| c.id);
    PoolHash::from_bytes(&canonical_json(&sorted))
}

/// Hash a constraint set. Formation order is significant (it breaks lineup ties).
pub fn constraints_hash(constraints: &ConstraintSet) -> ConstraintsHash {
    ConstraintsHash::from_bytes(&canonical_json(constraints))
}

pub fn run_id(candidates: &[Candidate], constraints: &ConstraintSet) -> RunId {
    RunId::new(pool_hash(candidates), constraints_hash(constraints))
}

// Struct fields serialize in declaration order, so the output is stable.
// Serializing plain data with string keys cannot fail; an empty buffer would
// still hash deterministically.
fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, Price};

    fn pool() -> Vec<Candidate> {
        vec![
            Candidate::new(1, "Keeper", 1, Position::Gk, Price(45), 3.0).unwrap(),
            Candidate::new(2, "Back", 2, Position::Def, Price(50), 4.0).unwrap(),
            Candidate::new(3, "Wide", 3, Position::Mid, Price(80), 6.0).unwrap(),
        ]
    }

    #[test]
    fn pool_hash_ignores_order() {
        let a = pool();
        let mut b = pool();
        b.reverse();
        assert_eq!(pool_hash(&a), pool_hash(&b));
    }

    #[test]
    fn pool_hash_sees_price_changes() {
        let a = pool();
        let mut b = pool();
        b[2].price = Price(81);
        assert_ne!(pool_hash(&a), pool_hash(&b));
    }

    #[test]
    fn constraints_hash_sees_budget() {
        let a = ConstraintSet::default();
        let b = ConstraintSet::default().with_budget(Price(995));
        assert_ne!(constraints_hash(&a), constraints_hash(&b));
        assert_eq!(constraints_hash(&a), constraints_hash(&ConstraintSet::default()));
    }

    #[test]
    fn run_id_is_deterministic() {
        let r1 = run_id(&pool(), &ConstraintSet::default());
        let r2 = run_id(&pool(), &ConstraintSet::default());
        assert_eq!(r1, r2);
        assert_eq!(r1.hash(), r2.hash());
    }
}
