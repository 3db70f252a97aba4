pub mod delivery_flow;
pub mod distractor_flow;

pub use delivery_flow::{DeliveryFlow, DeliveryOutcome, FallbackReason};
pub use distractor_flow::{DistractorFlow, Leftover, RewriteOutcome, RewriteReport};
