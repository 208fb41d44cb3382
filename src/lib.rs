//! Indoor air-quality score for home-automation gauge cards.
//!
//! [`score::compute_score`] turns slug-derived sensor readings plus a
//! [`types::scoring::ResolvedEnvironment`] from [`resolve::resolve_environment`]
//! into a percentage in `[0, 100]`. [`card::build_card`] wires both to a
//! [`types::config::CardConfig`] for rendering.

pub mod card;
pub mod config;
pub mod error;
pub mod logging;
pub mod readings;
pub mod report;
pub mod resolve;
pub mod score;
pub mod types;

pub use readings::{NoReadings, ReadingSource, StateSnapshot};
pub use resolve::{resolve_environment, Overrides};
pub use score::{compute_score, evaluate};
