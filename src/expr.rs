// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scalar expression evaluator.
//!
//! Evaluates infix arithmetic over a variable binding: `+ - * /`, unary
//! signs, `^` powers, parentheses, numeric literals (including scientific
//! notation), the constant `pi`, and the functions `sin cos tan exp log ln
//! sqrt abs`. Used for Hamiltonian coefficient reduction and for summation
//! placeholder resolution. Deterministic and side-effect-free; failure is
//! `None`, never a partial value.

use std::collections::HashMap;

/// Variable name to real value, immutable for the lifetime of one parse.
pub type VarBinding = HashMap<String, f64>;

/// Evaluate `expr` over `vars`. Returns `None` on any syntax error, unknown
/// identifier, trailing input, or a non-finite result.
pub fn eval(expr: &str, vars: &VarBinding) -> Option<f64> {
    let mut cursor = Cursor {
        src: expr.as_bytes(),
        pos: 0,
        vars,
    };
    cursor.skip_ws();
    if cursor.at_end() {
        return None;
    }
    let value = cursor.sum()?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return None;
    }
    value.is_finite().then_some(value)
}

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
    vars: &'a VarBinding,
}

impl Cursor<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Consume `c` if it is next (after whitespace).
    fn accept(&mut self, c: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // sum := product (('+'|'-') product)*
    fn sum(&mut self) -> Option<f64> {
        let mut acc = self.product()?;
        loop {
            if self.accept(b'+') {
                acc += self.product()?;
            } else if self.accept(b'-') {
                acc -= self.product()?;
            } else {
                return Some(acc);
            }
        }
    }

    // product := unary (('*'|'/') unary)*
    fn product(&mut self) -> Option<f64> {
        let mut acc = self.unary()?;
        loop {
            if self.accept(b'*') {
                acc *= self.unary()?;
            } else if self.accept(b'/') {
                acc /= self.unary()?;
            } else {
                return Some(acc);
            }
        }
    }

    // unary := ('+'|'-') unary | power
    fn unary(&mut self) -> Option<f64> {
        if self.accept(b'-') {
            return Some(-self.unary()?);
        }
        if self.accept(b'+') {
            return self.unary();
        }
        self.power()
    }

    // power := atom ('^' unary)?   (right-associative through unary)
    fn power(&mut self) -> Option<f64> {
        let base = self.atom()?;
        if self.accept(b'^') {
            let exponent = self.unary()?;
            return Some(base.powf(exponent));
        }
        Some(base)
    }

    // atom := number | ident ['(' sum ')'] | '(' sum ')'
    fn atom(&mut self) -> Option<f64> {
        self.skip_ws();
        match self.peek()? {
            b'(' => {
                self.pos += 1;
                let value = self.sum()?;
                self.accept(b')').then_some(value)
            }
            b'0'..=b'9' | b'.' => self.number(),
            c if c.is_ascii_alphabetic() || c == b'_' => self.identifier(),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
            self.pos += 1;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            // Only a well-formed exponent tail belongs to the literal;
            // otherwise 'e' starts an identifier and the parse fails later.
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(b'0'..=b'9')) {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).ok()?;
        text.parse::<f64>().ok()
    }

    fn identifier(&mut self) -> Option<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        let name = std::str::from_utf8(&self.src[start..self.pos]).ok()?;

        if self.accept(b'(') {
            let arg = self.sum()?;
            if !self.accept(b')') {
                return None;
            }
            return apply_function(name, arg);
        }

        if let Some(value) = self.vars.get(name) {
            return Some(*value);
        }
        match name {
            "pi" => Some(std::f64::consts::PI),
            _ => None,
        }
    }
}

fn apply_function(name: &str, arg: f64) -> Option<f64> {
    match name {
        "sin" => Some(arg.sin()),
        "cos" => Some(arg.cos()),
        "tan" => Some(arg.tan()),
        "exp" => Some(arg.exp()),
        "log" | "ln" => Some(arg.ln()),
        "sqrt" => Some(arg.sqrt()),
        "abs" => Some(arg.abs()),
        _ => None,
    }
}
