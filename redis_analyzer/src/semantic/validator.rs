//! Specification-driven command validation

use crate::grammar::{Expression, Program, RedisCommand};
use crate::logging::codes;
use crate::semantic::options::OptionScanner;
use crate::semantic::types::{CommandInfo, SemanticError, SemanticErrorKind, ValidationResult};
use crate::specs::{CommandSpec, CommandSpecTable, ValueCategory};
use crate::{log_debug, log_success};

/// Validates commands against one specification table
#[derive(Debug, Clone, Copy)]
pub struct Validator<'t> {
    table: &'t CommandSpecTable,
}

impl<'t> Validator<'t> {
    pub fn new(table: &'t CommandSpecTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t CommandSpecTable {
        self.table
    }

    pub fn validate(&self, command: &RedisCommand) -> ValidationResult {
        let name = command.command_name();
        let mut result = ValidationResult::new();

        let Some(spec) = self.table.get(&name) else {
            result.push_error(SemanticError::new(
                SemanticErrorKind::UnknownCommand,
                &name,
                format!("Unknown command: {}", name),
            ));
            log_debug!("Unknown command", "command" => name);
            return result;
        };

        check_arity(&name, spec, command.arguments.len(), &mut result);
        check_argument_types(&name, spec, &command.arguments, &mut result);
        OptionScanner::new(&name, spec).scan(&command.arguments, &mut result);

        result.command_info = Some(CommandInfo {
            name: name.clone(),
            description: spec.description.clone(),
            has_key: spec.has_key(),
            key: spec
                .key_position
                .and_then(|position| command.arguments.get(position))
                .map(Expression::to_text),
        });

        if result.valid {
            log_success!(codes::success::VALIDATION_PASSED, "Command validated",
                "command" => name,
                "warnings" => result.warnings.len()
            );
        } else {
            log_debug!("Command failed validation",
                "command" => name,
                "errors" => result.errors.len()
            );
        }

        result
    }

    /// One independent verdict per statement, in order
    pub fn validate_program(&self, program: &Program) -> Vec<ValidationResult> {
        program
            .statements
            .iter()
            .map(|command| self.validate(command))
            .collect()
    }
}

// ============================================================================
// RULES
// ============================================================================

fn check_arity(name: &str, spec: &CommandSpec, count: usize, result: &mut ValidationResult) {
    if count < spec.min_args {
        result.push_error(SemanticError::new(
            SemanticErrorKind::InsufficientArgs,
            name,
            format!(
                "Too few arguments. Expected at least {}, got {}",
                spec.min_args, count
            ),
        ));
    }

    if let Some(max) = spec.max_args {
        if count > max {
            result.push_error(SemanticError::new(
                SemanticErrorKind::ExcessiveArgs,
                name,
                format!("Too many arguments. Expected at most {}, got {}", max, count),
            ));
        }
    }
}

/// Only positions with a declared category are checked
fn check_argument_types(
    name: &str,
    spec: &CommandSpec,
    arguments: &[Expression],
    result: &mut ValidationResult,
) {
    for (index, (argument, category)) in arguments.iter().zip(&spec.value_types).enumerate() {
        if accepts(*category, argument) {
            continue;
        }

        let expected = match category {
            ValueCategory::Key => "a key (identifier or string)",
            ValueCategory::Field => "a field name",
            ValueCategory::Member => "a member name",
            ValueCategory::Score => "a numeric score",
            ValueCategory::Cursor => "a cursor (integer)",
            ValueCategory::Start | ValueCategory::Stop => "an index (integer)",
            ValueCategory::Value => "a value",
        };

        result.push_error(SemanticError::new(
            SemanticErrorKind::TypeMismatch,
            name,
            format!(
                "Argument {} should be {}, got {}",
                index + 1,
                expected,
                argument.type_name()
            ),
        ));
    }
}

fn accepts(category: ValueCategory, argument: &Expression) -> bool {
    use Expression::*;

    match category {
        ValueCategory::Key => matches!(argument, Identifier(_) | StringLiteral(_) | Pattern(_)),
        ValueCategory::Value => true,
        ValueCategory::Field | ValueCategory::Member => {
            matches!(argument, Identifier(_) | StringLiteral(_))
        }
        ValueCategory::Score => matches!(argument, IntegerLiteral(_) | FloatLiteral(_)),
        ValueCategory::Cursor | ValueCategory::Start | ValueCategory::Stop => {
            matches!(argument, IntegerLiteral(_))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_command;

    fn check(text: &str) -> ValidationResult {
        let (command, errors) = parse_command(text);
        assert!(errors.is_empty(), "{text}: {errors:?}");
        let table = CommandSpecTable::builtin();
        Validator::new(&table).validate(&command.expect("command"))
    }

    #[test]
    fn test_get_valid_with_key() {
        let result = check("GET mykey");
        assert!(result.valid);
        let info = result.command_info.expect("info");
        assert_eq!(info.name, "GET");
        assert_eq!(info.key.as_deref(), Some("mykey"));
        assert!(info.has_key);
    }

    #[test]
    fn test_unknown_command_skips_other_checks() {
        let result = check("flushall now EX");
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::UnknownCommand]);
        assert_eq!(result.errors[0].message, "Unknown command: FLUSHALL");
        assert!(result.warnings.is_empty());
        assert!(result.command_info.is_none());
    }

    #[test]
    fn test_too_few_and_too_many() {
        let result = check("GET");
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::InsufficientArgs]);
        assert_eq!(
            result.errors[0].message,
            "Too few arguments. Expected at least 1, got 0"
        );

        let result = check("HGET h f extra");
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::ExcessiveArgs]);
        assert_eq!(
            result.errors[0].message,
            "Too many arguments. Expected at most 2, got 3"
        );
    }

    #[test]
    fn test_type_mismatches_continue() {
        let result = check("ZADD 5 high alice");
        assert_eq!(
            result.error_kinds(),
            vec![SemanticErrorKind::TypeMismatch, SemanticErrorKind::TypeMismatch]
        );
        assert_eq!(
            result.errors[0].message,
            "Argument 1 should be a key (identifier or string), got IntegerLiteral"
        );
        assert_eq!(
            result.errors[1].message,
            "Argument 2 should be a numeric score, got Identifier"
        );
        assert!(result.errors.iter().all(|e| e.command == "ZADD"));
    }

    #[test]
    fn test_positions_beyond_categories_are_unchecked() {
        // DEL declares one key category; later keys are never type-checked
        let result = check("DEL a 42 [1, 2]");
        assert!(result.valid);
    }

    #[test]
    fn test_zrange_indexes() {
        assert!(check("ZRANGE board 0 -1 WITHSCORES").valid);
        let result = check("ZRANGE board first -1");
        assert_eq!(
            result.errors[0].message,
            "Argument 2 should be an index (integer), got Identifier"
        );
    }

    #[test]
    fn test_pattern_key_is_accepted() {
        let result = check("GET user:*");
        assert!(result.valid);
        assert_eq!(
            result.command_info.and_then(|i| i.key).as_deref(),
            Some("user:*")
        );
    }

    #[test]
    fn test_expiry_must_be_positive() {
        let result = check("set key \"value\" px 0");
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::InvalidValueRange]);
        assert_eq!(result.errors[0].command, "SET");
        assert_eq!(result.errors[0].message, "Option 'PX' must be positive, got 0");
    }

    #[test]
    fn test_conflict_is_order_dependent_message() {
        let result = check("SET k v XX NX");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Option 'NX' conflicts with 'XX'");
    }

    #[test]
    fn test_validate_program_is_per_statement() {
        let (program, _) = crate::syntax::parse_program("GET a\nNOPE\nDEL a b");
        let table = CommandSpecTable::builtin();
        let results = Validator::new(&table).validate_program(&program);
        let valid: Vec<bool> = results.iter().map(|r| r.valid).collect();
        assert_eq!(valid, vec![true, false, true]);
    }
}
