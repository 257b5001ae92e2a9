//! Operator lexicon: source operators to their SQF spelling.
//!
//! Operators without an entry return `None` and are reported as unsupported
//! by the caller.

use crate::ast::{BinaryOp, BoolOp, CmpOp, UnaryOp};

pub fn unary(op: UnaryOp) -> Option<&'static str> {
    match op {
        UnaryOp::Not => Some("!"),
        UnaryOp::Neg | UnaryOp::Pos | UnaryOp::Invert => None,
    }
}

/// Both true and floor division map to `/`; SQF has no floor division operator.
pub fn binary(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Add => Some("+"),
        BinaryOp::Sub => Some("-"),
        BinaryOp::Mult => Some("*"),
        BinaryOp::Div | BinaryOp::FloorDiv => Some("/"),
        BinaryOp::Mod => Some("mod"),
        BinaryOp::Pow => Some("^"),
        BinaryOp::MatMult
        | BinaryOp::BitOr
        | BinaryOp::BitAnd
        | BinaryOp::BitXor
        | BinaryOp::LShift
        | BinaryOp::RShift => None,
    }
}

/// Boolean joiners carry their own surrounding spaces.
pub fn boolean(op: BoolOp) -> &'static str {
    match op {
        BoolOp::And => " && ",
        BoolOp::Or => " || ",
    }
}

pub fn compare(op: CmpOp) -> Option<&'static str> {
    match op {
        CmpOp::Eq => Some("=="),
        CmpOp::NotEq => Some("!="),
        CmpOp::Lt => Some("<"),
        CmpOp::LtE => Some("<="),
        CmpOp::Gt => Some(">"),
        CmpOp::GtE => Some(">="),
        CmpOp::In | CmpOp::NotIn | CmpOp::Is | CmpOp::IsNot => None,
    }
}

/// Source spelling, used in diagnostics.
pub fn source_spelling(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mult => "*",
        BinaryOp::Div => "/",
        BinaryOp::FloorDiv => "//",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::MatMult => "@",
        BinaryOp::BitOr => "|",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitXor => "^",
        BinaryOp::LShift => "<<",
        BinaryOp::RShift => ">>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_is_a_keyword() {
        assert_eq!(binary(BinaryOp::Mod), Some("mod"));
    }

    #[test]
    fn test_floor_division_collapses_to_division() {
        assert_eq!(binary(BinaryOp::FloorDiv), binary(BinaryOp::Div));
    }

    #[test]
    fn test_power_is_caret() {
        assert_eq!(binary(BinaryOp::Pow), Some("^"));
    }

    #[test]
    fn test_only_logical_not_is_mapped() {
        assert_eq!(unary(UnaryOp::Not), Some("!"));
        assert_eq!(unary(UnaryOp::Neg), None);
        assert_eq!(unary(UnaryOp::Invert), None);
    }

    #[test]
    fn test_membership_and_identity_are_unmapped() {
        for op in [CmpOp::In, CmpOp::NotIn, CmpOp::Is, CmpOp::IsNot] {
            assert_eq!(compare(op), None);
        }
    }
}
