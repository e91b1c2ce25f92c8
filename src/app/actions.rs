//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions bridge pure state transformations and effectful operations: today
//! that means provider fetches, the only side effect this core delegates
//! (ledger persistence happens synchronously inside the handler, so it never
//! appears here).
//!
//! The host executes the actions in sequence and feeds each fetch's completion
//! back in as an [`Event::Provider`](crate::app::Event) whenever it arrives.

use crate::provider::messages::ProviderRequest;

/// Commands the host runs on the core's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Runs a fetch against the data provider.
    ///
    /// The request carries the token the issuing store recorded; the host may
    /// execute requests in any order and report completions in any order.
    Dispatch(ProviderRequest),
}
