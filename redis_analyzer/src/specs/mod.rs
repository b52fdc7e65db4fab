//! Command specification table
//!
//! The table is built once and then only read. Validation receives it by
//! reference; [`CommandSpecTable::shared`] exists for callers that just
//! want the standard commands.

mod builtin;
mod error;
pub mod loader;
mod table;

pub use error::{SpecError, SpecResult};
pub use loader::load_specs;
pub use table::{
    CommandSpec, CommandSpecTable, CommandSpecTableBuilder, OptionSpec, OptionValueType,
    ValueCategory,
};

use crate::logging::codes;
use crate::log_success;
use std::collections::BTreeMap;

/// Read-only view of the shared builtin table
pub fn command_specs() -> &'static BTreeMap<String, CommandSpec> {
    CommandSpecTable::shared().command_specs()
}

/// Builtin table extended with definitions from TOML text
pub fn table_with_extra_specs(toml_text: &str) -> SpecResult<CommandSpecTable> {
    let mut builder = CommandSpecTableBuilder::with_builtins();
    builder.register_all(load_specs(toml_text)?)?;
    let table = builder.build();

    log_success!(codes::success::SPEC_TABLE_LOADED, "Command specification table built",
        "commands" => table.len()
    );
    Ok(table)
}
