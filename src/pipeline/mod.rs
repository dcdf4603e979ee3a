//! The fetch → reconcile → write pipeline around the arm-assignment core.
//!
//! - [`fetch`]: loads every source dataset and centromere table concurrently on
//!   a fixed pool of three workers; each task returns its own report
//! - [`reconcile`]: reduces sources to one assembly per organism and applies
//!   the organism's strategy, isolating failures per organism
//! - [`writer`]: writes one `<organism>.js` band file per organism and a manifest

pub mod fetch;
pub mod reconcile;
pub mod writer;
