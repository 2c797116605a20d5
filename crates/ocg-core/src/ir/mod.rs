pub mod actions;
pub mod connections;
pub mod finalize;
pub mod grouping;
pub mod inputs;
pub mod types;

pub use actions::*;
pub use connections::*;
pub use finalize::Finalize;
pub use grouping::{ActionGroup, group_actions};
pub use inputs::*;
pub use types::{DEFAULT_ICON_PATH, IrComponent, IrDisplay};
