//! 웹훅 릴레이 도메인 모델.

mod classifier;
mod format;
mod payload;
mod secret;
mod target;

pub use classifier::*;
pub use format::*;
pub use payload::*;
pub use secret::*;
pub use target::*;
