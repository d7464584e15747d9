//! fplsquad core: squad selection for Fantasy Premier League.
//!
//! This crate holds everything that does not touch the filesystem:
//! - Domain types (candidates, prices, positions, formations, squads, ids)
//! - Constraint sets and their validation
//! - The greedy squad optimizer with lineup, bench and captaincy
//! - The rule-based points model and transfer shortlists
//! - Content fingerprints and seeded synthetic pools

pub mod constraints;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod optimizer;
pub mod recommend;
pub mod scoring;
pub mod synthetic;

pub use constraints::{ConstraintSet, PositionQuotas, SQUAD_SIZE};
pub use domain::{
    Availability, Candidate, CandidateId, CandidateRecord, Formation, Position, Price, Squad, TeamId,
};
pub use error::{Infeasibility, SelectionError};
pub use optimizer::select_squad;
