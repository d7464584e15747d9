//! Domain types for squad selection.

pub mod candidate;
pub mod formation;
pub mod ids;
pub mod position;
pub mod price;
pub mod squad;

pub use candidate::{Availability, Candidate, CandidateRecord};
pub use formation::{Formation, ParseFormationError, OUTFIELD_STARTERS};
pub use ids::{CandidateId, ConstraintsHash, PoolHash, RunId, TeamId};
pub use position::{ParsePositionError, Position};
pub use price::Price;
pub use squad::Squad;
