//! The token cursor shared by the recursive descent.
//!
//! A [`Cursor`] owns the raw token vector and a single read position. The
//! matchers rewrite tokens in place while consuming them — combined short
//! forms are split apart, `-f=value` tokens are divided at the separator,
//! matched triggers are normalized to their preferred form — so the cursor
//! exposes narrow in-place mutation alongside peek/take.
//!
//! [`Cursor::mark`] captures `(position, generation)` where the generation
//! counter is bumped by every in-place mutation. Comparing marks across loop
//! iterations detects the no-progress condition that terminates parsing on
//! pathological grammars.

/// Opaque progress mark; equal marks mean no token was consumed or rewritten
/// in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    position: usize,
    generation: u64,
}

/// Owned, sequential cursor over the argument tokens of one parse.
#[derive(Debug, Clone)]
pub struct Cursor {
    tokens: Vec<String>,
    position: usize,
    generation: u64,
}

impl Cursor {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Cursor {
            tokens: tokens.into_iter().map(Into::into).collect(),
            position: 0,
            generation: 0,
        }
    }

    /// Whether an unconsumed token remains.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// The next unconsumed token, without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    /// Consumes and returns the next token.
    pub fn take(&mut self) -> Option<String> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Rewrites the next unconsumed token in place.
    pub fn replace_next(&mut self, token: String) {
        if self.position < self.tokens.len() {
            self.tokens[self.position] = token;
            self.generation += 1;
        }
    }

    /// Inserts a token so it becomes the next one consumed.
    pub fn insert_next(&mut self, token: String) {
        self.tokens.insert(self.position, token);
        self.generation += 1;
    }

    /// Inserts a token directly after the next unconsumed one.
    pub fn insert_after_next(&mut self, token: String) {
        let at = (self.position + 1).min(self.tokens.len());
        self.tokens.insert(at, token);
        self.generation += 1;
    }

    /// Removes and returns the next unconsumed token.
    pub fn remove_next(&mut self) -> Option<String> {
        if self.position < self.tokens.len() {
            self.generation += 1;
            Some(self.tokens.remove(self.position))
        } else {
            None
        }
    }

    /// Captures the current progress mark.
    pub fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_take_sequence() {
        let mut cursor = Cursor::new(["-a", "-b"]);
        assert_eq!(cursor.peek(), Some("-a"));
        assert_eq!(cursor.take(), Some("-a".to_string()));
        assert_eq!(cursor.peek(), Some("-b"));
        assert_eq!(cursor.take(), Some("-b".to_string()));
        assert!(!cursor.has_next());
        assert_eq!(cursor.take(), None);
    }

    #[test]
    fn test_replace_and_insert_rewrite_the_stream() {
        let mut cursor = Cursor::new(["-hv"]);
        cursor.replace_next("-h".to_string());
        assert_eq!(cursor.take(), Some("-h".to_string()));
        cursor.insert_next("-v".to_string());
        assert_eq!(cursor.take(), Some("-v".to_string()));
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_insert_after_next_keeps_head_first() {
        let mut cursor = Cursor::new(["-f=x", "rest"]);
        cursor.replace_next("-f".to_string());
        cursor.insert_after_next("x".to_string());
        assert_eq!(cursor.take(), Some("-f".to_string()));
        assert_eq!(cursor.take(), Some("x".to_string()));
        assert_eq!(cursor.take(), Some("rest".to_string()));
    }

    #[test]
    fn test_marks_detect_lack_of_progress() {
        let mut cursor = Cursor::new(["-a"]);
        let first = cursor.mark();
        assert_eq!(first, cursor.mark());

        cursor.replace_next("-b".to_string());
        let rewritten = cursor.mark();
        assert_ne!(first, rewritten);

        cursor.take();
        assert_ne!(rewritten, cursor.mark());
    }

    #[test]
    fn test_remove_next_drops_the_token() {
        let mut cursor = Cursor::new(["--", "a", "b"]);
        assert_eq!(cursor.remove_next(), Some("--".to_string()));
        assert_eq!(cursor.take(), Some("a".to_string()));
    }
}
