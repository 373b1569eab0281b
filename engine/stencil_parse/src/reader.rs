//! Recursive-descent reader for the segment grammar.
//!
//! A source string is a sequence of segments: `$` introduces an embedded
//! call `(target arg*)`, read recursively; any other run of characters up
//! to the next `$` or end of input is a literal-text segment. Plain text is
//! sugar for printing it, so a text segment is wrapped as an implicit
//! `(print "text")` call. Row/column bookkeeping rides along in a [`Sloc`]
//! attached to every form.

use memchr::memchr;
use tracing::trace;

use stencil_value::errors::{missing_call_target, syntax_error};
use stencil_value::{EvalResult, Sloc, Value};

use crate::form::{Args, Form};

/// Reader state over one source string.
pub struct Reader<'a> {
    src: &'a str,
    pos: usize,
    sloc: Sloc,
}

impl<'a> Reader<'a> {
    /// Reader at the start of `src`, reporting locations under `source`.
    pub fn new(source: &'static str, src: &'a str) -> Self {
        Reader {
            src,
            pos: 0,
            sloc: Sloc::new(source, 0, 0),
        }
    }

    /// Current location.
    pub fn sloc(&self) -> Sloc {
        self.sloc
    }

    /// Read every top-level segment.
    pub fn read_all(&mut self) -> EvalResult<Vec<Form>> {
        let mut forms = Vec::new();
        while let Some(form) = self.read_next()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Read the next top-level segment, or `None` at end of input.
    pub fn read_next(&mut self) -> EvalResult<Option<Form>> {
        if self.peek() == Some('$') {
            self.bump();
            return self.read_call().map(Some);
        }
        self.read_text()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        self.sloc.advance(c);
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Literal text up to the next `$` or end of input, wrapped as an
    /// implicit print call.
    fn read_text(&mut self) -> EvalResult<Option<Form>> {
        let floc = self.sloc;
        let rest = self.rest();
        let len = memchr(b'$', rest.as_bytes()).unwrap_or(rest.len());
        if len == 0 {
            return Ok(None);
        }
        let text = &rest[..len];
        for c in text.chars() {
            self.sloc.advance(c);
        }
        self.pos += len;
        trace!(len, "text segment");
        let mut args = Args::new();
        args.push(Box::new(Form::literal(Value::string(text), floc)));
        Ok(Some(Form::call(Form::id("print", floc), args, floc)))
    }

    /// Read one expression: an identifier or a parenthesized call.
    fn read_expr(&mut self) -> EvalResult<Option<Form>> {
        self.skip_ws();
        match self.peek() {
            Some('(') => self.read_call().map(Some),
            Some(c) if c.is_alphabetic() => Ok(Some(self.read_id())),
            _ => Ok(None),
        }
    }

    /// Read a call form; the cursor sits on the `(`.
    fn read_call(&mut self) -> EvalResult<Form> {
        let floc = self.sloc;
        if self.peek() != Some('(') {
            return Err(syntax_error("Invalid call syntax").with_sloc(self.sloc));
        }
        self.bump();
        let target = self
            .read_expr()?
            .ok_or_else(|| missing_call_target().with_sloc(self.sloc))?;
        let mut args = Args::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(syntax_error("Open call form").with_sloc(self.sloc)),
                Some(')') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let arg = self
                        .read_expr()?
                        .ok_or_else(|| syntax_error("Invalid call syntax").with_sloc(self.sloc))?;
                    args.push(Box::new(arg));
                }
            }
        }
        trace!(%floc, args = args.len(), "call form");
        Ok(Form::call(target, args, floc))
    }

    /// Read an identifier: everything up to whitespace or a parenthesis.
    fn read_id(&mut self) -> Form {
        let floc = self.sloc;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == '(' || c == ')' {
                break;
            }
            self.bump();
        }
        Form::id(&self.src[start..self.pos], floc)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read_one(src: &str) -> Form {
        let mut reader = Reader::new("test", src);
        let form = reader.read_next().unwrap().unwrap();
        assert!(reader.read_next().unwrap().is_none());
        form
    }

    #[test]
    fn reads_a_call_form() {
        let mut reader = Reader::new("test", "( foo bar )");
        let form = reader.read_call().unwrap();
        assert!(matches!(form, Form::Call { .. }));
        assert_eq!(form.to_string(), "(foo bar)");
    }

    #[test]
    fn expressions_skip_leading_whitespace() {
        let mut reader = Reader::new("test", " foo)");
        let expr = reader.read_expr().unwrap().unwrap();
        assert!(matches!(expr, Form::Id { .. }));
        assert_eq!(expr.to_string(), "foo");
    }

    #[test]
    fn text_becomes_an_implicit_print_call() {
        let form = read_one("abc def");
        assert_eq!(form.to_string(), "(print \"abc def\")");
    }

    #[test]
    fn dollar_call_splits_surrounding_text() {
        let mut reader = Reader::new("test", "abc $(print foo) def");
        let first = reader.read_next().unwrap().unwrap();
        let second = reader.read_next().unwrap().unwrap();
        let third = reader.read_next().unwrap().unwrap();
        assert!(reader.read_next().unwrap().is_none());
        assert_eq!(first.to_string(), "(print \"abc \")");
        assert_eq!(second.to_string(), "(print foo)");
        assert_eq!(third.to_string(), "(print \" def\")");
    }

    #[test]
    fn nested_calls_read_recursively() {
        let form = read_one("$(print (upcase foo))");
        assert_eq!(form.to_string(), "(print (upcase foo))");
    }

    #[test]
    fn slocs_track_rows_across_newlines() {
        let mut reader = Reader::new("test", "ab\ncd$(print foo)");
        let text = reader.read_next().unwrap().unwrap();
        assert_eq!(text.sloc(), Sloc::new("test", 0, 0));
        let call = reader.read_next().unwrap().unwrap();
        // The call starts just past the `$` on the second row.
        assert_eq!(call.sloc(), Sloc::new("test", 1, 3));
    }

    #[test]
    fn dollar_without_paren_is_invalid_call_syntax() {
        let mut reader = Reader::new("test", "$foo");
        let err = reader.read_next().unwrap_err();
        assert!(matches!(err.kind, stencil_value::EvalErrorKind::Syntax { .. }));
        assert_eq!(err.message, "Invalid call syntax");
    }

    #[test]
    fn empty_call_is_missing_target() {
        let mut reader = Reader::new("test", "$()");
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind, stencil_value::EvalErrorKind::MissingCallTarget);
    }

    #[test]
    fn unterminated_call_is_open_call_form() {
        let mut reader = Reader::new("test", "$(print foo");
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.message, "Open call form");
    }

    #[test]
    fn empty_input_reads_nothing() {
        let mut reader = Reader::new("test", "");
        assert!(reader.read_all().unwrap().is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn dollar_free_text_is_one_print_form(text in "[^$]{1,64}") {
                let mut reader = Reader::new("prop", &text);
                let forms = reader.read_all().unwrap();
                prop_assert_eq!(forms.len(), 1);
                match &forms[0] {
                    Form::Call { args, .. } => match args[0].as_ref() {
                        Form::Literal { value, .. } => {
                            prop_assert_eq!(value.as_str(), Some(text.as_str()));
                        }
                        other => prop_assert!(false, "unexpected arg {other}"),
                    },
                    other => prop_assert!(false, "unexpected form {other}"),
                }
            }

            #[test]
            fn reader_never_panics(input in any::<String>()) {
                let mut reader = Reader::new("prop", &input);
                let _ = reader.read_all();
            }
        }
    }
}
