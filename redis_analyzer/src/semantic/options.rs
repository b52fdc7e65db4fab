//! Keyword-option scan
//!
//! The scan is a two-state machine. In `Scanning` every keyword argument
//! is resolved against the command's options; a known option that takes a
//! value moves the machine to `AwaitingValue`, and the next argument is
//! consumed as that value whatever its kind.

use crate::grammar::Expression;
use crate::logging::codes;
use crate::semantic::types::{SemanticError, SemanticErrorKind, ValidationResult};
use crate::specs::{CommandSpec, OptionSpec, OptionValueType};
use crate::{log_debug, log_warning};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState<'s> {
    Scanning,
    AwaitingValue {
        option: &'s str,
        spec: &'s OptionSpec,
    },
}

pub(crate) struct OptionScanner<'s> {
    command: &'s str,
    spec: &'s CommandSpec,
    seen: HashSet<&'s str>,
    state: ScanState<'s>,
}

impl<'s> OptionScanner<'s> {
    pub(crate) fn new(command: &'s str, spec: &'s CommandSpec) -> Self {
        Self {
            command,
            spec,
            seen: HashSet::new(),
            state: ScanState::Scanning,
        }
    }

    pub(crate) fn scan(mut self, arguments: &[Expression], result: &mut ValidationResult) {
        for argument in arguments {
            self.step(argument, result);
        }
        self.finish(result);
    }

    fn step(&mut self, argument: &Expression, result: &mut ValidationResult) {
        match self.state {
            ScanState::AwaitingValue { option, spec } => {
                self.check_value(option, spec, argument, result);
                self.state = ScanState::Scanning;
            }
            ScanState::Scanning => {
                if let Some(name) = argument.as_keyword() {
                    self.resolve(name, result);
                }
            }
        }
    }

    fn resolve(&mut self, name: &str, result: &mut ValidationResult) {
        let command_spec: &'s CommandSpec = self.spec;
        let Some((option, spec)) = command_spec.options.get_key_value(name) else {
            let warning = format!("Unknown option '{}' for command {}", name, self.command);
            log_warning!(code = codes::semantic::UNKNOWN_OPTION, &warning);
            result.push_warning(warning);
            return;
        };
        let option = option.as_str();

        for conflict in &spec.conflicts {
            if self.seen.contains(conflict.as_str()) {
                result.push_error(SemanticError::new(
                    SemanticErrorKind::OptionConflict,
                    self.command,
                    format!("Option '{}' conflicts with '{}'", option, conflict),
                ));
            }
        }
        self.seen.insert(option);

        if spec.has_value {
            self.state = ScanState::AwaitingValue { option, spec };
        }
    }

    fn check_value(
        &self,
        option: &str,
        spec: &OptionSpec,
        value: &Expression,
        result: &mut ValidationResult,
    ) {
        log_debug!("Checking option value",
            "option" => option,
            "value_type" => value.type_name()
        );

        match spec.value_type {
            OptionValueType::Integer => match value {
                Expression::IntegerLiteral(int) if spec.positive_only && int.value <= 0 => {
                    result.push_error(SemanticError::new(
                        SemanticErrorKind::InvalidValueRange,
                        self.command,
                        format!("Option '{}' must be positive, got {}", option, int.value),
                    ));
                }
                Expression::IntegerLiteral(_) => {}
                other => result.push_error(SemanticError::new(
                    SemanticErrorKind::OptionTypeMismatch,
                    self.command,
                    format!(
                        "Option '{}' expects an integer value, got {}",
                        option,
                        other.type_name()
                    ),
                )),
            },
            OptionValueType::Pattern => {
                if !matches!(
                    value,
                    Expression::Pattern(_) | Expression::StringLiteral(_) | Expression::Identifier(_)
                ) {
                    self.loose_value(
                        format!("Option '{}' expects a pattern, got {}", option, value.type_name()),
                        result,
                    );
                }
            }
            OptionValueType::String => {
                if !matches!(value, Expression::StringLiteral(_) | Expression::Identifier(_)) {
                    self.loose_value(
                        format!("Option '{}' expects a string, got {}", option, value.type_name()),
                        result,
                    );
                }
            }
            OptionValueType::None => {}
        }
    }

    fn loose_value(&self, warning: String, result: &mut ValidationResult) {
        log_warning!(code = codes::semantic::LOOSE_OPTION_VALUE, &warning,
            "command" => self.command
        );
        result.push_warning(warning);
    }

    fn finish(self, result: &mut ValidationResult) {
        if let ScanState::AwaitingValue { option, .. } = self.state {
            result.push_error(SemanticError::new(
                SemanticErrorKind::MissingOptionValue,
                self.command,
                format!("Option '{}' requires a value", option),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::CommandSpecTable;

    fn scan(command: &str, arguments: Vec<Expression>) -> ValidationResult {
        let table = CommandSpecTable::builtin();
        let spec = table.get(command).expect("builtin");
        let mut result = ValidationResult::new();
        OptionScanner::new(command, spec).scan(&arguments, &mut result);
        result
    }

    #[test]
    fn test_value_is_consumed_even_if_keyword() {
        let result = scan(
            "SET",
            vec![
                Expression::identifier("k"),
                Expression::identifier("v"),
                Expression::keyword("EX"),
                Expression::keyword("NX"),
            ],
        );
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::OptionTypeMismatch]);
        assert_eq!(
            result.errors[0].message,
            "Option 'EX' expects an integer value, got KeywordExpression"
        );
    }

    #[test]
    fn test_unknown_option_does_not_consume_value() {
        let result = scan(
            "ZRANGE",
            vec![
                Expression::identifier("z"),
                Expression::integer(0),
                Expression::integer(1),
                Expression::keyword("LIMIT"),
                Expression::keyword("WITHSCORES"),
            ],
        );
        assert!(result.valid);
        assert_eq!(result.warnings, vec!["Unknown option 'LIMIT' for command ZRANGE"]);
    }

    #[test]
    fn test_trailing_option_missing_value() {
        let result = scan(
            "SCAN",
            vec![Expression::integer(0), Expression::keyword("COUNT")],
        );
        assert_eq!(result.error_kinds(), vec![SemanticErrorKind::MissingOptionValue]);
        assert_eq!(result.errors[0].message, "Option 'COUNT' requires a value");
    }

    #[test]
    fn test_loose_values_only_warn() {
        let result = scan(
            "SCAN",
            vec![
                Expression::integer(0),
                Expression::keyword("MATCH"),
                Expression::integer(5),
                Expression::keyword("TYPE"),
                Expression::pattern("h*"),
            ],
        );
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec![
                "Option 'MATCH' expects a pattern, got IntegerLiteral",
                "Option 'TYPE' expects a string, got PatternExpression",
            ]
        );
    }

    #[test]
    fn test_count_accepts_zero() {
        let result = scan(
            "SCAN",
            vec![
                Expression::integer(0),
                Expression::keyword("COUNT"),
                Expression::integer(0),
            ],
        );
        assert!(result.valid);
    }
}
