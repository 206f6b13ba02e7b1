//! ELECTRE I outranking relation.
//!
//! Builds the pairwise concordance and discordance matrices from a
//! normalized criteria matrix, applies the two-threshold outranking test,
//! eliminates cycles, and extracts the kernel of undominated alternatives.
//!
//! # Pipeline
//!
//! 1. [`concordance`] / [`discordance`]: threshold-independent, computed once
//! 2. [`build_dominance`]: `C[i][j] >= c_hat` and `D[i][j] <= d_hat`
//! 3. [`resolve_cycles`]: pairwise tie-break, optionally full cycle removal
//! 4. [`extract_kernel`]: zero in-degree set
//!
//! # References
//!
//! - Roy (1968), "Classement et choix en présence de points de vue
//!   multiples (la méthode ELECTRE)", RIRO 2(8), 57-75
//! - Figueira, Mousseau & Roy (2005), "ELECTRE Methods", in *Multiple
//!   Criteria Decision Analysis: State of the Art Surveys*, 133-153

mod cycles;
mod dominance;
mod kernel;
mod matrices;

pub use cycles::{find_cycle, resolve_cycles, resolve_two_cycles, CycleStrategy, Resolution};
pub use dominance::{build_dominance, DominanceRelation};
pub use kernel::{extract_kernel, Kernel};
pub use matrices::{concordance, discordance, DiscordanceScaling, OutrankingMatrix};
