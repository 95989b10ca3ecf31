//! Domain models for archive hits, threads and emails.

mod email;
mod hit;
mod thread;

pub(crate) use email::EmailEnvelope;
pub use email::EmailDetail;
pub use hit::{DocumentHit, Hit, ThreadHit};
pub use thread::ThreadDetail;
