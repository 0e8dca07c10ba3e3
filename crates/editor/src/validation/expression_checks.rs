//! Expression checks: leaf granularity and bounds, operator arity.

use tempo_core::{EditorConfig, Expression, LeafRule, Operator, OperatorNode, Recurrence};

use super::ValidationResult;

pub(super) fn validate_node(
    node: &OperatorNode,
    path: &str,
    config: &EditorConfig,
    result: &mut ValidationResult,
) {
    if node.operands.is_empty() {
        result.warn(path, format!("{} has no operands and matches nothing", node.operator));
    }

    if node.operator == Operator::Not && node.operands.len() != 1 {
        let message = format!("NOT takes a single operand, got {}", node.operands.len());
        if config.strict_not_arity {
            result.error(path, message);
        } else {
            result.warn(path, message);
        }
    }

    for (i, operand) in node.operands.iter().enumerate() {
        let child = format!("{path}.{i}");
        match operand {
            Expression::Operator(inner) => validate_node(inner, &child, config, result),
            Expression::Leaf(rule) => validate_leaf(rule, &child, result),
        }
    }
}

fn validate_leaf(rule: &LeafRule, path: &str, result: &mut ValidationResult) {
    if let Recurrence::Every(every) = rule.recurrence {
        if rule.unit.order() >= every.order() {
            result.error(
                format!("{path}.unit"),
                format!(
                    "'{}' cannot repeat every {}: the unit must be finer than the recurrence",
                    rule.unit, every
                ),
            );
        }
    }

    if rule.from.is_nan() {
        result.warn(format!("{path}.from"), "from is not a number");
    }
    if rule.to.is_nan() {
        result.warn(format!("{path}.to"), "to is not a number");
    }
    if rule.from > rule.to {
        result.warn(
            path,
            format!("from ({}) is after to ({})", rule.from, rule.to),
        );
    }
}

#[cfg(test)]
mod tests {
    use tempo_core::{EditorConfig, TimeUnit};

    use crate::codec::parse;
    use crate::validation::{validate_expression, validate_json};

    #[test]
    fn default_expression_is_clean() {
        let config = EditorConfig::default();
        let result = validate_json(r#"["OR",[10,12,"hour","day"]]"#, &config);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unit_must_be_finer_than_recurrence() {
        let node = parse(r#"["OR",["AND",[1,2,"day","hour"]],[1,2,"week","week"]]"#).unwrap();
        let result = validate_expression(&node, &EditorConfig::default());
        assert!(!result.valid);
        let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["$.0.0.unit", "$.1.unit"]);
    }

    #[test]
    fn no_recurrence_skips_granularity() {
        let node = parse(r#"["AND",[1,2,"year","null"]]"#).unwrap();
        assert!(validate_expression(&node, &EditorConfig::default()).valid);
    }

    #[test]
    fn bounds_produce_warnings() {
        let node = parse(r#"["AND",[5,2,"hour","day"],["x",3,"minute","hour"]]"#).unwrap();
        let result = validate_expression(&node, &EditorConfig::default());
        assert!(result.valid);
        let paths: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["$.0", "$.1.from"]);
    }

    #[test]
    fn not_arity_escalates_when_strict() {
        let node = parse(r#"["NOT",[1,2,"hour","day"],[3,4,"hour","day"]]"#).unwrap();

        let lenient = validate_expression(&node, &EditorConfig::default());
        assert!(lenient.valid);
        assert!(lenient.warnings.iter().any(|w| w.message.contains("NOT")));

        let strict = EditorConfig {
            strict_not_arity: true,
            ..EditorConfig::default()
        };
        let result = validate_expression(&node, &strict);
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "$");
    }

    #[test]
    fn empty_operator_nodes_warn() {
        let node = parse(r#"["OR",["AND"]]"#).unwrap();
        let result = validate_expression(&node, &EditorConfig::default());
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "$.0");
    }

    #[test]
    fn parse_failures_become_errors() {
        let config = EditorConfig::default();
        let result = validate_json(r#"["OR",[1,2,"hourz","day"]]"#, &config);
        assert!(!result.valid);
        assert_eq!(result.errors[0].suggestion.as_deref(), Some(TimeUnit::Hour.as_str()));

        let result = validate_json(r#"["XOR"]"#, &config);
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("Wrong expression format"));
    }
}
