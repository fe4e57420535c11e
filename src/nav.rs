//! Directory navigation: current/home path, the active listing, and the
//! bookkeeping that keeps overlapping listing requests from racing.

mod navigator;

pub use navigator::*;
