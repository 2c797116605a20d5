pub mod actions;
pub mod assemble;
pub mod connections;
pub mod inputs;
pub mod naming;

pub use actions::build_action;
pub use assemble::{AssembleOptions, assemble, assemble_with_options};
pub use connections::build_connections;
pub use inputs::{DerivedInputs, SeenKeys, derive_inputs, merge_parameters};
pub use naming::{clean_identifier, component_key, title_case, to_group_tag};
