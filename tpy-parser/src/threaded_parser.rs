//! Running the parser on a thread with a configurable stack size
//!
//! Each nesting level of an expression costs a chain of recursive calls, so
//! inputs near the configured depth limit can outrun a default thread stack.
//! [`run_with_stack`] runs a closure on a scoped thread with a larger stack;
//! the closure may borrow the source, diagnostics and arena of the caller.

use crate::error::ParseError;
use std::thread;

/// Configuration for threaded parsing
#[derive(Debug, Clone)]
pub struct ThreadedParserConfig {
    /// Stack size in bytes for the parser thread
    pub stack_size: usize,
    /// Thread name (for debugging)
    pub thread_name: String,
}

impl Default for ThreadedParserConfig {
    fn default() -> Self {
        Self {
            stack_size: 64 * 1024 * 1024,
            thread_name: "tpy-parser".to_string(),
        }
    }
}

impl ThreadedParserConfig {
    /// Create a new configuration with the specified stack size
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size;
        self
    }

    /// Set the thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Run `job` on a scoped thread built from `config` and return its result.
pub fn run_with_stack<T, F>(config: &ThreadedParserConfig, job: F) -> Result<T, ParseError>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .stack_size(config.stack_size)
            .spawn_scoped(scope, job)
            .map_err(|e| ParseError::Thread(format!("failed to spawn parser thread: {}", e)))?;

        handle
            .join()
            .map_err(|_| ParseError::Thread("parser thread panicked".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_expression, Lexer, Parser};
    use tpy_core::{Arena, ByteBuffer, Diagnostics, FrontendConfig, SourceFile};

    #[test]
    fn test_job_result_is_returned() {
        let config = ThreadedParserConfig::default().with_thread_name("test-parser");
        let result = run_with_stack(&config, || thread::current().name().map(String::from));
        assert_eq!(result.unwrap().as_deref(), Some("test-parser"));
    }

    #[test]
    fn test_job_may_borrow_caller_state() {
        let file = SourceFile::new("t.py", 0, ByteBuffer::from_bytes("[1, 2] + [3]"));
        let mut diagnostics = Diagnostics::new();

        let nodes = run_with_stack(&ThreadedParserConfig::default(), || {
            let arena = Arena::new();
            let config = FrontendConfig::default();
            let parsed = parse_expression(&file, &mut diagnostics, &arena, &config);
            parsed.map(|expr| expr.map(|expr| expr.node_count()))
        })
        .unwrap()
        .unwrap();

        assert_eq!(nodes, Some(6));
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_deep_nesting_on_large_stack() {
        let depth = 900;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let file = SourceFile::new("deep.py", 0, ByteBuffer::from_bytes(source));
        let mut diagnostics = Diagnostics::new();

        let count = run_with_stack(&ThreadedParserConfig::default(), || {
            let arena = Arena::new();
            let lexer = Lexer::new(&file, &mut diagnostics);
            let mut parser = Parser::new(lexer, &arena)?.with_max_depth(1000);
            let expr = parser.parse_compilation_unit()?;
            Ok::<_, ParseError>(expr.map(|expr| expr.node_count()))
        })
        .unwrap()
        .unwrap();

        assert_eq!(count, Some(depth + 1));
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_panicking_job_is_an_error() {
        let config = ThreadedParserConfig::default().with_stack_size(1024 * 1024);
        let result: Result<(), _> = run_with_stack(&config, || panic!("boom"));
        assert!(matches!(result, Err(ParseError::Thread(_))));
    }
}
