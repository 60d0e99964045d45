//! Headline batches and rotation
//!
//! A batch is fetched rarely; one headline from it is shown per render
//! cycle.

pub mod batch;
pub mod rotator;

pub use batch::{Headline, HeadlineBatch, MAX_HEADLINES, MAX_HEADLINE_LEN};
pub use rotator::{HeadlineRotator, HEADLINES_UNAVAILABLE, NO_HEADLINES};
