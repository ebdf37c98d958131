//! The turn-handling core of CodeLoom.
//!
//! One turn runs through a short, acyclic protocol:
//!
//! 1. **Classify** the user message (done by the session, before the
//!    orchestrator sees it)
//! 2. **Fast path**: a deterministic file-add resolves without any model
//!    call
//! 3. **Query the model** with history, a workspace summary, and the tool
//!    catalog
//! 4. **If a tool is requested**: execute it, then make one continuation
//!    call carrying the result
//! 5. **Emit exactly one result** and append the turn pair to the log
//!
//! At most two model calls and one tool call happen per turn; no phase is
//! ever revisited.

pub mod orchestrator;
pub mod session;

pub use orchestrator::{TurnOrchestrator, TurnPhase};
pub use session::Session;
