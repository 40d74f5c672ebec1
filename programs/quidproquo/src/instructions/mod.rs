pub mod accept;
pub mod cancel;
pub mod make;

pub use accept::*;
pub use cancel::*;
pub use make::*;
