// Application layer - the vending session that clients drive.
// The console loop in `cli` is one such client; tests are another.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;
