pub mod add;
pub mod create;
pub mod get;
pub mod list;
pub mod remove;

pub use add::*;
pub use create::*;
pub use get::*;
pub use list::*;
pub use remove::*;
