//! Recording doubles for the client, terminal and prompter seams.
use std::cell::RefCell;
use std::io::{Cursor, Read, Write};

use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::client::{GraphQL, parse_response};
use crate::error::QueryError;
use crate::prompt::Prompter;
use crate::terminal::Terminal;

pub const SPONSORS_BODY: &str = r#"
    {
        "data": {
            "user": {
                "sponsors": {
                    "edges": [
                        {"node": {"__typename": "User", "login": "foo", "name": "Foo"}},
                        {"node": {"__typename": "Organization", "login": "bar", "name": "Bar"}}
                    ]
                }
            }
        }
    }"#;

pub const EMPTY_BODY: &str = r#"{"data": {"user": {"sponsors": {"edges": []}}}}"#;

pub const ERROR_BODY: &str = r#"{"data":{}, "errors": [{"message": "some gql error"}]}"#;

/// Answers every query with a canned body and records the variables.
pub struct MockClient {
    body: &'static str,
    pub calls: RefCell<Vec<Value>>,
}

impl MockClient {
    pub fn new(body: &'static str) -> Self {
        Self {
            body,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl GraphQL for MockClient {
    fn query(
        &self,
        _operation: &str,
        _query: &str,
        variables: Value,
    ) -> Result<Value, QueryError> {
        self.calls.borrow_mut().push(variables);
        parse_response("https://api.github.com/graphql", 200, self.body)
    }
}

pub struct MockTerminal {
    pub stdin: Cursor<Vec<u8>>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    tty: bool,
}

impl MockTerminal {
    pub fn new(tty: bool) -> Self {
        Self::with_stdin(tty, "")
    }

    pub fn with_stdin(tty: bool, stdin: &str) -> Self {
        Self {
            stdin: Cursor::new(stdin.as_bytes().to_vec()),
            stdout: Vec::new(),
            stderr: Vec::new(),
            tty,
        }
    }

    pub fn stdout(&self) -> &str {
        std::str::from_utf8(&self.stdout).unwrap()
    }

    pub fn stderr(&self) -> &str {
        std::str::from_utf8(&self.stderr).unwrap()
    }
}

impl Terminal for MockTerminal {
    fn input(&mut self) -> &mut dyn Read {
        &mut self.stdin
    }

    fn out_and_err(&mut self) -> (&mut dyn Write, &mut dyn Write) {
        (&mut self.stdout, &mut self.stderr)
    }

    fn is_terminal_output(&self) -> bool {
        self.tty
    }

    fn color_enabled(&self) -> bool {
        false
    }

    fn size(&self) -> Option<(u16, u16)> {
        Some((999, 999))
    }
}

pub struct MockPrompter {
    answer: Result<&'static str, &'static str>,
    pub asked: RefCell<Vec<(String, String)>>,
}

impl MockPrompter {
    pub fn answering(answer: Result<&'static str, &'static str>) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for MockPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        self.asked
            .borrow_mut()
            .push((prompt.to_string(), default.to_string()));
        self.answer.map(str::to_string).map_err(|e| anyhow!(e))
    }
}
