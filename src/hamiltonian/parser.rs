// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hamiltonian expression parsing.
//!
//! The term language is parsed by right-to-left factoring: trailing
//! `*<Op><qubit>` tokens are stripped one at a time and the remaining prefix
//! is handed to the scalar evaluator as the coefficient expression. This
//! keeps operator products unambiguous without a full expression grammar.
//!
//! Three entry points mirror the three term variants; `TermTree::try_parse`
//! dispatches Sum → Dependent → Independent and returns the first success.
//! All failures are `None`; no partial trees escape.

use num_complex::Complex64;

use crate::algebra::{PauliOp, QubitOperand};
use crate::expr::{self, VarBinding};

use super::TermTree;

const SUM_PREFIX: &str = "_SUM[";

pub(super) fn dispatch(expr: &str, vars: &VarBinding) -> Option<TermTree> {
    let expr = strip_whitespace(expr);
    try_sum(&expr, vars)
        .or_else(|| try_dependent(&expr, vars))
        .or_else(|| try_independent(&expr, vars))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Interpret `token` as an atomic operand: an alphabetic operator name
/// followed by a decimal qubit index, e.g. `X0` or `sp12`.
fn parse_operand_token(token: &str) -> Option<QubitOperand> {
    let token = token.to_ascii_uppercase();
    let split = token.find(|c: char| !c.is_ascii_alphabetic())?;
    let (op_str, idx_str) = token.split_at(split);
    if op_str.is_empty() || !all_digits(idx_str) {
        return None;
    }
    let op = PauliOp::parse(op_str).ok()?;
    let qubit = idx_str.parse().ok()?;
    Some(QubitOperand::new(op, qubit))
}

/// Strip the trailing `*<operand>` token. Returns the operand and the
/// remaining prefix.
fn last_operator(s: &str) -> Option<(QubitOperand, &str)> {
    let pos = s.rfind('*')?;
    let operand = parse_operand_token(&s[pos + 1..])?;
    Some((operand, &s[..pos]))
}

/// Factor a product expression into (coefficient, operand list).
///
/// A leading bare operand (a product with no scalar prefix, e.g. `X0*Y1`)
/// takes an implicit coefficient of 1.
fn parse_product(expr: &str, vars: &VarBinding) -> Option<(Complex64, Vec<QubitOperand>)> {
    let mut ops = Vec::new();
    let mut rest = expr;
    while let Some((operand, prefix)) = last_operator(rest) {
        ops.push(operand);
        rest = prefix;
    }

    let coeff = if let Some(operand) = parse_operand_token(rest) {
        ops.push(operand);
        1.0
    } else {
        expr::eval(rest, vars)?
    };

    // Operators were collected back to front.
    ops.reverse();
    Some((Complex64::new(coeff, 0.0), ops))
}

/// Rewrite `P*(A ± B)` as `[P*A, (±1.0)*P*B]`.
///
/// Recognized only when the product trails in `)` and the parenthesized body
/// holds exactly one top-level `+` or `-` with no nested parentheses; the
/// general distributive law is out of the language.
fn unwrap_product(s: &str) -> Option<[String; 2]> {
    if !s.ends_with(')') {
        return None;
    }
    let open = s.rfind('(')?;
    let coeff = &s[..open];
    let inner = &s[open + 1..s.len() - 1];
    if inner.contains('(') || inner.contains(')') {
        // Nested parentheses: not parseable in this language.
        return None;
    }
    let pm = inner.find('+').or_else(|| inner.find('-'))?;
    let lhs = &inner[..pm];
    let rhs = &inner[pm + 1..];
    let sign = &inner[pm..=pm];
    Some([
        format!("{coeff}{lhs}"),
        format!("({sign}1.0)*{coeff}{rhs}"),
    ])
}

pub(super) fn try_independent(expr: &str, vars: &VarBinding) -> Option<TermTree> {
    let expr = strip_whitespace(expr);
    if expr.is_empty() || expr.contains("||") {
        return None;
    }

    if expr.ends_with(')') {
        let [lhs, rhs] = unwrap_product(&expr)?;
        let first = try_independent(&lhs, vars)?;
        let second = try_independent(&rhs, vars)?;
        return Some(TermTree::Sum(vec![first, second]));
    }

    let (coeff, ops) = parse_product(&expr, vars)?;
    Some(TermTree::Independent { coeff, ops })
}

pub(super) fn try_dependent(expr: &str, vars: &VarBinding) -> Option<TermTree> {
    let expr = strip_whitespace(expr);
    let sep = expr.find("||")?;
    let channel = expr[sep + 2..].to_ascii_uppercase();
    if channel.len() < 2
        || !(channel.starts_with('D') || channel.starts_with('U'))
        || !all_digits(&channel[1..])
    {
        return None;
    }

    let op_expr = &expr[..sep];
    if op_expr.is_empty() {
        return None;
    }

    if op_expr.ends_with(')') {
        let [lhs, rhs] = unwrap_product(op_expr)?;
        let first = try_dependent(&format!("{lhs}||{channel}"), vars)?;
        let second = try_dependent(&format!("{rhs}||{channel}"), vars)?;
        return Some(TermTree::Sum(vec![first, second]));
    }

    let (coeff, ops) = parse_product(op_expr, vars)?;
    Some(TermTree::Dependent { coeff, ops, channel })
}

pub(super) fn try_sum(expr: &str, vars: &VarBinding) -> Option<TermTree> {
    let expr = strip_whitespace(expr);
    if !expr.starts_with(SUM_PREFIX) || !expr.ends_with(']') {
        return None;
    }
    let body = &expr[SUM_PREFIX.len()..expr.len() - 1];

    let (loop_var, rest) = body.split_once(',')?;
    let (lo_str, rest) = rest.split_once(',')?;
    let (hi_str, template) = rest.split_once(',')?;
    let placeholder = format!("{{{loop_var}}}");

    if loop_var.is_empty()
        || template.is_empty()
        || !all_digits(lo_str)
        || !all_digits(hi_str)
        || !template.contains(&placeholder)
    {
        return None;
    }

    let lo: i64 = lo_str.parse().ok()?;
    let hi: i64 = hi_str.parse().ok()?;
    if lo > hi {
        return None;
    }

    // The first iteration fixes the variant; a later iteration that parses
    // differently (or not at all) fails the whole sum. Mixing variants
    // within one summation is rejected rather than silently coerced.
    let first = resolve_loop_template(template, loop_var, lo)?;
    let (variant, first_term) = if let Some(t) = try_independent(&first, vars) {
        (Variant::Independent, t)
    } else if let Some(t) = try_dependent(&first, vars) {
        (Variant::Dependent, t)
    } else if let Some(t) = try_sum(&first, vars) {
        (Variant::Sum, t)
    } else {
        return None;
    };

    let mut children = vec![first_term];
    for v in (lo + 1)..=hi {
        let resolved = resolve_loop_template(template, loop_var, v)?;
        let child = match variant {
            Variant::Independent => try_independent(&resolved, vars),
            Variant::Dependent => try_dependent(&resolved, vars),
            Variant::Sum => try_sum(&resolved, vars),
        }?;
        children.push(child);
    }
    Some(TermTree::Sum(children))
}

#[derive(Clone, Copy)]
enum Variant {
    Independent,
    Dependent,
    Sum,
}

/// Substitute every `{…}` placeholder in `template` for the loop value `v`.
///
/// The trivial `{i}` short-circuits to `v`; anything else (e.g. `{i+1}`,
/// `{2*i}`) goes through the scalar evaluator with the single binding
/// `i ↦ v` and is truncated to an integer.
fn resolve_loop_template(template: &str, loop_var: &str, v: i64) -> Option<String> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut loop_binding = VarBinding::new();
    loop_binding.insert(loop_var.to_string(), v as f64);

    while let Some(open) = rest.find('{') {
        let close = rest[open..].find('}')? + open;
        let inner = &rest[open + 1..close];
        let value = if inner == loop_var {
            v
        } else {
            expr::eval(inner, &loop_binding)?.trunc() as i64
        };
        result.push_str(&rest[..open]);
        result.push_str(&value.to_string());
        rest = &rest[close + 1..];
    }
    result.push_str(rest);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vars(pairs: &[(&str, f64)]) -> VarBinding {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn parse(expr: &str) -> Option<TermTree> {
        TermTree::try_parse(expr, &VarBinding::new())
    }

    fn expect_independent(term: &TermTree) -> (Complex64, &[QubitOperand]) {
        match term {
            TermTree::Independent { coeff, ops } => (*coeff, ops),
            other => panic!("expected independent term, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_independent_term() {
        let term = parse("0.5*X0").unwrap();
        let (coeff, ops) = expect_independent(&term);
        assert_relative_eq!(coeff.re, 0.5);
        assert_relative_eq!(coeff.im, 0.0);
        assert_eq!(ops, &[QubitOperand::new(PauliOp::X, 0)]);
    }

    #[test]
    fn test_dependent_term_with_variable() {
        let binding = vars(&[("omega", 1.5)]);
        let term = TermTree::try_parse("omega*Z0 || D0", &binding).unwrap();
        match term {
            TermTree::Dependent { coeff, ops, channel } => {
                assert_relative_eq!(coeff.re, 1.5);
                assert_eq!(ops, vec![QubitOperand::new(PauliOp::Z, 0)]);
                assert_eq!(channel, "D0");
            }
            other => panic!("expected dependent term, got {other:?}"),
        }
    }

    #[test]
    fn test_two_operator_product() {
        let binding = vars(&[("J", 0.1)]);
        let term = TermTree::try_parse("J*X0*X1", &binding).unwrap();
        let (coeff, ops) = expect_independent(&term);
        assert_relative_eq!(coeff.re, 0.1);
        assert_eq!(
            ops,
            &[
                QubitOperand::new(PauliOp::X, 0),
                QubitOperand::new(PauliOp::X, 1)
            ]
        );
    }

    #[test]
    fn test_bare_product_has_unit_coefficient() {
        let term = parse("X0*Y1").unwrap();
        let (coeff, ops) = expect_independent(&term);
        assert_relative_eq!(coeff.re, 1.0);
        assert_eq!(
            ops,
            &[
                QubitOperand::new(PauliOp::X, 0),
                QubitOperand::new(PauliOp::Y, 1)
            ]
        );
    }

    #[test]
    fn test_coefficient_expression_with_pi() {
        let term = parse("2*pi*0.5*Z0").unwrap();
        let (coeff, _) = expect_independent(&term);
        assert_relative_eq!(coeff.re, std::f64::consts::PI);
    }

    #[test]
    fn test_lowercase_operator_and_channel_accepted() {
        let term = parse("0.5*sp0 || d1").unwrap();
        match term {
            TermTree::Dependent { ops, channel, .. } => {
                assert_eq!(ops, vec![QubitOperand::new(PauliOp::Sp, 0)]);
                assert_eq!(channel, "D1");
            }
            other => panic!("expected dependent term, got {other:?}"),
        }
    }

    #[test]
    fn test_distribution_plus() {
        let term = parse("0.5*(X0+Y1)").unwrap();
        match term {
            TermTree::Sum(children) => {
                assert_eq!(children.len(), 2);
                let (c0, ops0) = expect_independent(&children[0]);
                assert_relative_eq!(c0.re, 0.5);
                assert_eq!(ops0, &[QubitOperand::new(PauliOp::X, 0)]);
                let (c1, ops1) = expect_independent(&children[1]);
                assert_relative_eq!(c1.re, 0.5);
                assert_eq!(ops1, &[QubitOperand::new(PauliOp::Y, 1)]);
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_distribution_minus_negates_second_summand() {
        let term = parse("0.5*(X0-Y1)").unwrap();
        match term {
            TermTree::Sum(children) => {
                let (c0, _) = expect_independent(&children[0]);
                let (c1, _) = expect_independent(&children[1]);
                assert_relative_eq!(c0.re, 0.5);
                assert_relative_eq!(c1.re, -0.5);
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_distribution_on_dependent_term() {
        let term = parse("0.5*(X0+Y0)||U2").unwrap();
        match term {
            TermTree::Sum(children) => {
                for child in &children {
                    match child {
                        TermTree::Dependent { channel, .. } => assert_eq!(channel, "U2"),
                        other => panic!("expected dependent child, got {other:?}"),
                    }
                }
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_parentheses_rejected() {
        assert!(parse("0.5*((X0+Y0)+Z0)").is_none());
    }

    #[test]
    fn test_sum_inclusive_bounds() {
        let term = parse("_SUM[i,0,2, X{i}]").unwrap();
        match term {
            TermTree::Sum(children) => {
                assert_eq!(children.len(), 3);
                for (qubit, child) in children.iter().enumerate() {
                    let (coeff, ops) = expect_independent(child);
                    assert_relative_eq!(coeff.re, 1.0);
                    assert_eq!(ops, &[QubitOperand::new(PauliOp::X, qubit)]);
                }
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_sum_placeholder_arithmetic() {
        let term = parse("_SUM[i,0,1, X{i}*Y{i+1}]").unwrap();
        match term {
            TermTree::Sum(children) => {
                assert_eq!(children.len(), 2);
                let (_, ops0) = expect_independent(&children[0]);
                assert_eq!(
                    ops0,
                    &[
                        QubitOperand::new(PauliOp::X, 0),
                        QubitOperand::new(PauliOp::Y, 1)
                    ]
                );
                let (_, ops1) = expect_independent(&children[1]);
                assert_eq!(
                    ops1,
                    &[
                        QubitOperand::new(PauliOp::X, 1),
                        QubitOperand::new(PauliOp::Y, 2)
                    ]
                );
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_sum_with_variable_coefficient() {
        let binding = vars(&[("omega", 1.0)]);
        let term = TermTree::try_parse("_SUM[i,0,1,omega*Z{i}]", &binding).unwrap();
        match term {
            TermTree::Sum(children) => assert_eq!(children.len(), 2),
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_sum_body_without_loop_var_rejected() {
        assert!(parse("_SUM[i,0,2, X0]").is_none());
    }

    #[test]
    fn test_sum_reversed_bounds_rejected() {
        assert!(parse("_SUM[i,2,0, X{i}]").is_none());
    }

    #[test]
    fn test_sum_non_numeric_bounds_rejected() {
        assert!(parse("_SUM[i,a,2, X{i}]").is_none());
        assert!(parse("_SUM[i,0,-2, X{i}]").is_none());
    }

    #[test]
    fn test_sum_of_dependent_terms() {
        let term = parse("_SUM[i,0,1, Z{i}||D{i}]").unwrap();
        match term {
            TermTree::Sum(children) => {
                for (i, child) in children.iter().enumerate() {
                    match child {
                        TermTree::Dependent { channel, ops, .. } => {
                            assert_eq!(channel, &format!("D{i}"));
                            assert_eq!(ops, &vec![QubitOperand::new(PauliOp::Z, i)]);
                        }
                        other => panic!("expected dependent child, got {other:?}"),
                    }
                }
            }
            other => panic!("expected sum, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operator_rejected() {
        assert!(parse("0.5*Q0").is_none());
    }

    #[test]
    fn test_malformed_channel_rejected() {
        assert!(parse("0.5*X0 || C0").is_none());
        assert!(parse("0.5*X0 || D").is_none());
        assert!(parse("0.5*X0 || D1x").is_none());
    }

    #[test]
    fn test_bad_coefficient_rejected() {
        assert!(parse("oops*X0").is_none());
        assert!(parse("*X0").is_none());
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
    }

    #[test]
    fn test_whitespace_ignored() {
        let term = parse("  0.5 * X 0 ").unwrap();
        let (coeff, ops) = expect_independent(&term);
        assert_relative_eq!(coeff.re, 0.5);
        assert_eq!(ops, &[QubitOperand::new(PauliOp::X, 0)]);
    }

    #[test]
    fn test_loop_template_resolution() {
        assert_eq!(
            resolve_loop_template("X{i}*Y{i+1}", "i", 3).unwrap(),
            "X3*Y4"
        );
        assert_eq!(resolve_loop_template("Z{2*i}", "i", 2).unwrap(), "Z4");
        // Repeated occurrences are all replaced.
        assert_eq!(
            resolve_loop_template("X{i}*X{i}", "i", 1).unwrap(),
            "X1*X1"
        );
        // Unterminated placeholder fails.
        assert!(resolve_loop_template("X{i", "i", 0).is_none());
    }
}
