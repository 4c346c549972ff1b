//! Response model: turns a service body into a typed, immutable
//! [`PredictionResult`] tree.
//!
//! Optional keys (`intents`, `compositeEntities`, `dialog`, entity offsets,
//! scores and resolutions) fall back to their documented defaults. Keys the
//! service guarantees (`query`, `topScoringIntent`, `entities`, an action's
//! `parameters`, a composite's `children`, a dialog's `contextId`) are
//! required and their absence fails the whole parse.

pub mod parse;
pub mod types;

pub use parse::*;
pub use types::*;
