mod catalog;
mod category;
mod item;
mod ledger;
mod money;
mod purchase;

pub use catalog::*;
pub use category::*;
pub use item::*;
pub use ledger::*;
pub use money::*;
pub use purchase::*;
