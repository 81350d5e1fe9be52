//! Dossier: research evidence gathering for a forecasting question.
//!
//! Given a question and a set of search queries, the tool searches the web,
//! renders each unique result in a headless browser, and writes the
//! extracted text into a cited Markdown dossier.
//!
//! # Architecture
//!
//! - **Gathering**: the [`dossier_gather`] crate runs search, dedup and
//!   bounded page rendering, producing one outcome per URL
//! - **Backend**: [`backend::Renderer`] picks local Chromium or a remote
//!   Browserless service from configuration
//! - **Writer**: [`dossier`] formats usable sources, failures and
//!   references, and saves the document

pub mod backend;
pub mod config;
pub mod dossier;
pub mod error;

pub use backend::Renderer;
pub use config::DossierConfig;
pub use dossier::{PlanInfo, render_dossier, save_dossier};
pub use error::{DossierError, Result};
