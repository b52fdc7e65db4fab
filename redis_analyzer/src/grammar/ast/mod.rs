//! Abstract syntax tree for parsed commands

pub mod nodes;
