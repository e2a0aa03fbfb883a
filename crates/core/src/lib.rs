#![warn(missing_docs)]
//! Navigation domain shared across the workspace: the location catalog, the
//! step data model, and the session state machine that drives the demo.

pub mod catalog;
pub mod error;
pub mod session;
pub mod step;
pub mod timer;

pub use catalog::LocationCatalog;
pub use error::NavError;
pub use session::{transition, NavEvent, NavPhase, NavSession};
pub use step::{sample_route, NavStep, StepKind};
pub use timer::{StepTimer, STEP_INTERVAL};
