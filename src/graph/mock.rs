//! Recording test double for the graph boundary.
//!
//! `MockConnector` implements [`Connector`] and logs every call made through
//! it and the connections, sessions and results it hands out. Failures can
//! be injected at each step, and queries can be scripted to return records.
//!
//! # Example
//!
//! ```
//! use boltrun::graph::{Endpoint, GraphValue, MockCall, MockConnector, Record};
//! use boltrun::workflow::{Statement, Workflow, WorkflowRunner};
//!
//! let mock = MockConnector::new();
//! mock.script("MATCH (n) RETURN n", vec![Record::from_iter([("n", GraphValue::Int(1))])]);
//!
//! let workflow = Workflow::new("demo", vec![
//!     Statement::new("CREATE (n)"),
//!     Statement::new("MATCH (n) RETURN n"),
//! ]);
//! let endpoint = Endpoint::new("bolt://localhost:7687", "admin", "pw", "default");
//!
//! let mut records: Vec<Record> = Vec::new();
//! WorkflowRunner::new(&mock).run(&endpoint, &workflow, &mut records).unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(mock.executed_queries(), ["CREATE (n)", "MATCH (n) RETURN n"]);
//! assert_eq!(mock.count(&MockCall::CloseSession), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{
    Close, Connection, Connector, DriverError, Endpoint, Record, ResultHandle, Session,
};
use crate::workflow::Statement;

/// A call observed by the mock, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect { uri: String },
    OpenSession { database: String },
    Execute { index: usize, query: String },
    Collect { index: usize },
    Consume { index: usize },
    CloseSession,
    CloseConnection,
}

/// Where to inject a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Connect,
    OpenSession,
    /// Execution of the statement with this zero-based index.
    Execute(usize),
    /// Draining the result of the statement with this index.
    Consume(usize),
    Collect,
    CloseSession,
    CloseConnection,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    faults: Vec<Fault>,
    scripted: HashMap<String, Vec<Record>>,
    executed: usize,
}

impl MockState {
    fn fails(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }
}

/// Recording, fault-injecting [`Connector`].
///
/// Cloning shares the underlying log.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    state: Rc<RefCell<MockState>>,
}

impl MockConnector {
    /// Create a mock with no scripted results and no faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `records` whenever `query` is executed.
    pub fn script(&self, query: impl Into<String>, records: Vec<Record>) {
        self.state
            .borrow_mut()
            .scripted
            .insert(query.into(), records);
    }

    /// Inject a failure.
    pub fn fail(&self, fault: Fault) {
        self.state.borrow_mut().faults.push(fault);
    }

    /// Builder form of [`fail`](Self::fail).
    pub fn failing(self, fault: Fault) -> Self {
        self.fail(fault);
        self
    }

    /// Every call observed so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of times `call` was observed.
    pub fn count(&self, call: &MockCall) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    /// Queries passed to `execute`, in order.
    pub fn executed_queries(&self) -> Vec<String> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Execute { query, .. } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn fails(&self, fault: Fault) -> bool {
        self.state.borrow().fails(fault)
    }
}

impl Connector for MockConnector {
    fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Connection>, DriverError> {
        self.record(MockCall::Connect {
            uri: endpoint.uri.clone(),
        });
        if self.fails(Fault::Connect) {
            return Err(DriverError::new("connection refused"));
        }
        Ok(Box::new(MockConnection { mock: self.clone() }))
    }
}

struct MockConnection {
    mock: MockConnector,
}

impl Connection for MockConnection {
    fn open_session(&mut self, database: &str) -> Result<Box<dyn Session>, DriverError> {
        self.mock.record(MockCall::OpenSession {
            database: database.to_string(),
        });
        if self.mock.fails(Fault::OpenSession) {
            return Err(DriverError::new(format!("graph '{}' not found", database)));
        }
        Ok(Box::new(MockSession {
            mock: self.mock.clone(),
        }))
    }
}

impl Close for MockConnection {
    fn close(&mut self) -> Result<(), DriverError> {
        self.mock.record(MockCall::CloseConnection);
        if self.mock.fails(Fault::CloseConnection) {
            return Err(DriverError::new("close failed"));
        }
        Ok(())
    }
}

struct MockSession {
    mock: MockConnector,
}

impl Session for MockSession {
    fn execute(
        &mut self,
        statement: &Statement,
    ) -> Result<Box<dyn ResultHandle + '_>, DriverError> {
        let index = {
            let mut state = self.mock.state.borrow_mut();
            let index = state.executed;
            state.executed += 1;
            index
        };
        self.mock.record(MockCall::Execute {
            index,
            query: statement.query.clone(),
        });
        if self.mock.fails(Fault::Execute(index)) {
            return Err(DriverError::new(format!(
                "syntax error in statement {}",
                index
            )));
        }

        let records = self
            .mock
            .state
            .borrow()
            .scripted
            .get(&statement.query)
            .cloned()
            .unwrap_or_default();

        Ok(Box::new(MockResult {
            mock: self.mock.clone(),
            index,
            records,
        }))
    }
}

impl Close for MockSession {
    fn close(&mut self) -> Result<(), DriverError> {
        self.mock.record(MockCall::CloseSession);
        if self.mock.fails(Fault::CloseSession) {
            return Err(DriverError::new("close failed"));
        }
        Ok(())
    }
}

struct MockResult {
    mock: MockConnector,
    index: usize,
    records: Vec<Record>,
}

impl ResultHandle for MockResult {
    fn collect_all(self: Box<Self>) -> Result<Vec<Record>, DriverError> {
        self.mock.record(MockCall::Collect { index: self.index });
        if self.mock.fails(Fault::Collect) {
            return Err(DriverError::new("stream interrupted"));
        }
        Ok(self.records)
    }

    fn consume(self: Box<Self>) -> Result<(), DriverError> {
        self.mock.record(MockCall::Consume { index: self.index });
        if self.mock.fails(Fault::Consume(self.index)) {
            return Err(DriverError::new("constraint violation"));
        }
        Ok(())
    }
}
