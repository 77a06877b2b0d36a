//! Group code / value pair model for ASCII DXF.
//!
//! A DXF text file is a flat sequence of two-line records: an integer
//! group code followed by its value.  The scanner keeps line numbers so
//! parse errors point at the offending input.

use crate::error::{CoreError, Result};
use crate::types::Handle;

/// One group code / value record
#[derive(Debug, Clone, PartialEq)]
pub struct CodePair {
    /// Group code
    pub code: i32,
    /// Raw value text, trimmed
    pub value: String,
    /// 1-based line number of the value
    pub line: usize,
}

impl CodePair {
    /// Parse the value as a floating point number
    pub fn as_f64(&self) -> Result<f64> {
        self.value
            .parse()
            .map_err(|_| CoreError::parse(self.line, format!("expected a number, got '{}'", self.value)))
    }

    /// Parse the value as an integer
    pub fn as_i32(&self) -> Result<i32> {
        self.value
            .parse()
            .map_err(|_| CoreError::parse(self.line, format!("expected an integer, got '{}'", self.value)))
    }

    /// Parse the value as a hexadecimal handle
    pub fn as_handle(&self) -> Result<Handle> {
        u64::from_str_radix(&self.value, 16)
            .map(Handle::new)
            .map_err(|_| CoreError::parse(self.line, format!("expected a handle, got '{}'", self.value)))
    }

    /// Whether this pair starts a record (code 0) with the given value
    pub fn is_record(&self, value: &str) -> bool {
        self.code == 0 && self.value == value
    }
}

/// Line-oriented scanner producing [`CodePair`]s with one pair of lookahead
#[derive(Debug)]
pub struct CodePairScanner<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
    peeked: Option<CodePair>,
}

impl<'a> CodePairScanner<'a> {
    /// Create a scanner over DXF text
    pub fn new(text: &'a str) -> Self {
        CodePairScanner {
            lines: text.lines(),
            line_no: 0,
            peeked: None,
        }
    }

    /// Read the next pair; `None` at end of input
    pub fn read_pair(&mut self) -> Result<Option<CodePair>> {
        if let Some(pair) = self.peeked.take() {
            return Ok(Some(pair));
        }
        let Some(code_line) = self.next_line() else {
            return Ok(None);
        };
        let code_line_no = self.line_no;
        let code: i32 = code_line.trim().parse().map_err(|_| {
            CoreError::parse(code_line_no, format!("expected a group code, got '{}'", code_line.trim()))
        })?;
        let Some(value_line) = self.next_line() else {
            return Err(CoreError::parse(code_line_no, "group code without a value"));
        };
        Ok(Some(CodePair {
            code,
            value: value_line.trim().to_string(),
            line: self.line_no,
        }))
    }

    /// Look at the next pair without consuming it
    pub fn peek(&mut self) -> Result<Option<&CodePair>> {
        if self.peeked.is_none() {
            self.peeked = self.read_pair()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pairs() {
        let mut scanner = CodePairScanner::new("  0\nSECTION\n  2\nHEADER\n");
        let pair = scanner.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "SECTION");
        assert!(pair.is_record("SECTION"));
        let pair = scanner.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 2);
        assert_eq!(pair.value, "HEADER");
        assert!(scanner.read_pair().unwrap().is_none());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = CodePairScanner::new("  0\nLINE\n 10\n1.5\n");
        assert_eq!(scanner.peek().unwrap().unwrap().code, 0);
        assert_eq!(scanner.read_pair().unwrap().unwrap().value, "LINE");
        let pair = scanner.read_pair().unwrap().unwrap();
        assert_eq!(pair.as_f64().unwrap(), 1.5);
    }

    #[test]
    fn test_bad_code_reports_line() {
        let mut scanner = CodePairScanner::new("  0\nLINE\nnot-a-code\n1.0\n");
        scanner.read_pair().unwrap();
        match scanner.read_pair() {
            Err(CoreError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_pair() {
        let mut scanner = CodePairScanner::new(" 10\n");
        assert!(scanner.read_pair().is_err());
    }

    #[test]
    fn test_handle_parsing() {
        let mut scanner = CodePairScanner::new("  5\n1A\n");
        let pair = scanner.read_pair().unwrap().unwrap();
        assert_eq!(pair.as_handle().unwrap().value(), 0x1A);
    }
}
