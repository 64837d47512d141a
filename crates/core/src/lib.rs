//! Commit-history analytics: load a line-level authorship log, aggregate it
//! into commits, and turn it into filterable scatter / file-composition /
//! narrative views.
//!
//! ```text
//!   loc.csv ──▶ loader ──▶ Commit::aggregate ──▶ History
//!                                │
//!            ┌───────────────────┼──────────────────────┐
//!            ▼                   ▼                      ▼
//!       CorpusStats         ScatterPlot           FileComposition
//!       (static)            (filter-reactive)     (filter-reactive)
//!            └──────▶ RenderCommand[] ◀─────────────────┘
//! ```
//!
//! Views are pure transforms from model state to `RenderCommand` lists;
//! renderers (TUI, SVG) consume those lists without knowing the model.

pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod scale;
pub mod svg;
pub mod views;

#[cfg(test)]
pub(crate) mod testutil;
