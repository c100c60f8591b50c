//! The incrementally loaded movie listing: accumulation, paging and filtering.

pub mod accumulator;
pub mod controller;
pub mod filter;
pub mod sequencer;
pub mod session;
pub mod trigger;

pub use accumulator::merge;
pub use controller::{FeedController, FeedSnapshot, PageTask};
pub use filter::filter;
pub use sequencer::PageSequencer;
pub use session::FeedSession;
pub use trigger::{CatalogHorizon, ScrollPosition, ScrollTrigger};

/// The first page of the popular listing.
pub const FIRST_PAGE: u32 = 1;
