pub mod event;
pub mod ics;

pub use event::{ValidatedEvent, repair, repair_at};
pub use ics::serialize;
