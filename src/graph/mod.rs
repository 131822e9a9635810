//! Graph database capability boundary.
//!
//! The workflow runner never talks to a driver directly. It consumes the
//! small set of traits defined here:
//!
//! - [`Connector`] opens a [`Connection`] to an [`Endpoint`]
//! - [`Connection`] opens a [`Session`] on a named database
//! - [`Session`] executes a [`Statement`] and hands back a [`ResultHandle`]
//! - [`ResultHandle`] either materializes its rows or drains them
//!
//! [`bolt`] implements the boundary on top of `neo4rs`; [`mock`] is a
//! recording test double with fault injection.

pub mod bolt;
pub mod mock;
pub mod record;
pub mod value;

pub use bolt::BoltConnector;
pub use mock::{MockCall, MockConnector};
pub use record::Record;
pub use value::{GraphValue, Node, ParamValue, Relationship};

use std::fmt;

use crate::workflow::Statement;

/// Error reported by the driver or the remote server.
///
/// Opaque on purpose: the runner only wraps it into the workflow error
/// taxonomy and never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<neo4rs::Error> for DriverError {
    fn from(err: neo4rs::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Where and as whom to connect.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Connection URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// Username for basic auth.
    pub username: String,
    /// Password for basic auth.
    pub password: String,
    /// Database the session is bound to.
    pub database: String,
}

impl Endpoint {
    /// Create an endpoint descriptor.
    pub fn new(
        uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            username: username.into(),
            password: password.into(),
            database: database.into(),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Scoped resource release.
///
/// Implementations must be idempotent: closing twice is not an error.
pub trait Close {
    /// Release the resource.
    fn close(&mut self) -> Result<(), DriverError>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> Result<(), DriverError> {
        (**self).close()
    }
}

/// Opens connections to a graph database endpoint.
pub trait Connector {
    /// Connect and authenticate.
    fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Connection>, DriverError>;
}

/// An open, authenticated connection.
pub trait Connection: Close {
    /// Open a session bound to `database`.
    fn open_session(&mut self, database: &str) -> Result<Box<dyn Session>, DriverError>;
}

/// A stateful context bound to one database.
pub trait Session: Close {
    /// Send a statement and start its result stream.
    fn execute(&mut self, statement: &Statement)
        -> Result<Box<dyn ResultHandle + '_>, DriverError>;
}

/// The pending result of one executed statement.
pub trait ResultHandle {
    /// Materialize every remaining row, in server order.
    fn collect_all(self: Box<Self>) -> Result<Vec<Record>, DriverError>;

    /// Drain the stream without keeping any rows.
    fn consume(self: Box<Self>) -> Result<(), DriverError>;
}
