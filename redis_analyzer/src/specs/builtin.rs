//! The standard command set

use crate::specs::table::{CommandSpec, OptionSpec, OptionValueType, ValueCategory};
use ValueCategory::*;

pub fn builtin_specs() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("GET", 1, Some(1), "Get the value of a key")
            .with_key(0)
            .with_value_types(&[Key]),
        CommandSpec::new("SET", 2, None, "Set the string value of a key")
            .with_key(0)
            .with_value_types(&[Key, Value])
            .with_option(
                "EX",
                OptionSpec::valued(OptionValueType::Integer, "Set expiry in seconds")
                    .conflicts_with(&["PX"])
                    .positive(),
            )
            .with_option(
                "PX",
                OptionSpec::valued(OptionValueType::Integer, "Set expiry in milliseconds")
                    .conflicts_with(&["EX"])
                    .positive(),
            )
            .with_option(
                "NX",
                OptionSpec::flag("Only set if key doesn't exist").conflicts_with(&["XX"]),
            )
            .with_option(
                "XX",
                OptionSpec::flag("Only set if key exists").conflicts_with(&["NX"]),
            ),
        CommandSpec::new("DEL", 1, None, "Delete one or more keys")
            .with_key(0)
            .with_value_types(&[Key]),
        CommandSpec::new("HGET", 2, Some(2), "Get the value of a hash field")
            .with_key(0)
            .with_value_types(&[Key, Field]),
        CommandSpec::new("HSET", 3, None, "Set the string value of a hash field")
            .with_key(0)
            .with_value_types(&[Key, Field, Value]),
        CommandSpec::new("ZADD", 3, None, "Add one or more members to a sorted set")
            .with_key(0)
            .with_value_types(&[Key, Score, Member])
            .with_option(
                "NX",
                OptionSpec::flag("Only add new elements").conflicts_with(&["XX"]),
            )
            .with_option(
                "XX",
                OptionSpec::flag("Only update existing elements").conflicts_with(&["NX"]),
            ),
        CommandSpec::new("ZRANGE", 3, None, "Return a range of members in a sorted set")
            .with_key(0)
            .with_value_types(&[Key, Start, Stop])
            .with_option(
                "WITHSCORES",
                OptionSpec::flag("Return scores along with members"),
            ),
        CommandSpec::new("SCAN", 1, None, "Incrementally iterate over keys")
            .with_value_types(&[Cursor])
            .with_option(
                "MATCH",
                OptionSpec::valued(OptionValueType::Pattern, "Match pattern"),
            )
            .with_option(
                "COUNT",
                OptionSpec::valued(OptionValueType::Integer, "Number of elements to return"),
            )
            .with_option(
                "TYPE",
                OptionSpec::valued(OptionValueType::String, "Filter by type"),
            ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::CommandSpecTable;

    #[test]
    fn test_builtin_specs_pass_builder_checks() {
        let mut builder = CommandSpecTable::builder();
        assert!(builder.register_all(builtin_specs()).is_ok());
        assert_eq!(builder.build(), CommandSpecTable::builtin());
    }

    #[test]
    fn test_builtin_command_names() {
        let table = CommandSpecTable::builtin();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(
            names,
            vec!["DEL", "GET", "HGET", "HSET", "SCAN", "SET", "ZADD", "ZRANGE"]
        );
    }

    #[test]
    fn test_expiry_options_conflict_both_ways() {
        let table = CommandSpecTable::builtin();
        let set = table.get("SET").expect("SET");
        for (a, b) in [("EX", "PX"), ("PX", "EX"), ("NX", "XX"), ("XX", "NX")] {
            let option = set.option(a).expect("option");
            assert!(option.conflicts.iter().any(|c| c == b), "{a} vs {b}");
        }
        assert!(set.option("EX").is_some_and(|o| o.positive_only));
        assert!(set.option("NX").is_some_and(|o| !o.has_value));
    }

    #[test]
    fn test_scan_has_no_key() {
        let table = CommandSpecTable::builtin();
        let scan = table.get("SCAN").expect("SCAN");
        assert!(!scan.has_key());
        assert_eq!(scan.max_args, None);
    }
}
