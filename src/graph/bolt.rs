//! Bolt adapter built on `neo4rs`.
//!
//! `neo4rs` is async; the workflow is strictly sequential, so every call
//! blocks on a current-thread tokio runtime owned by the connector.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph, Query, Row, RowStream, Txn,
};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::value::{GraphValue, Node, ParamValue, Relationship};
use super::{Close, Connection, Connector, DriverError, Endpoint, Record, ResultHandle, Session};
use crate::workflow::Statement;

/// Rows requested per PULL.
pub const DEFAULT_FETCH_SIZE: usize = 200;

/// Pool size; one sequential workflow never needs more than one.
pub const DEFAULT_MAX_CONNECTIONS: usize = 1;

/// Statement used to verify reachability, credentials and database names.
const PROBE: &str = "RETURN 1";

/// Opens Bolt connections through `neo4rs`.
pub struct BoltConnector {
    runtime: Arc<Runtime>,
    fetch_size: usize,
    max_connections: usize,
}

impl BoltConnector {
    /// Create a connector with default driver options.
    pub fn new() -> Result<Self, DriverError> {
        Self::with_options(DEFAULT_FETCH_SIZE, DEFAULT_MAX_CONNECTIONS)
    }

    /// Create a connector with explicit fetch size and pool size.
    pub fn with_options(fetch_size: usize, max_connections: usize) -> Result<Self, DriverError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DriverError::new(format!("failed to start runtime: {}", e)))?;

        Ok(Self {
            runtime: Arc::new(runtime),
            fetch_size,
            max_connections,
        })
    }
}

impl Connector for BoltConnector {
    fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Connection>, DriverError> {
        let config = ConfigBuilder::default()
            .uri(endpoint.uri.as_str())
            .user(endpoint.username.as_str())
            .password(endpoint.password.as_str())
            .fetch_size(self.fetch_size)
            .max_connections(self.max_connections)
            .build()?;

        let graph = self.runtime.block_on(async {
            let graph = Graph::connect(config).await?;
            graph.run(neo4rs::query(PROBE)).await?;
            Ok::<_, neo4rs::Error>(graph)
        })?;
        debug!("Connected to {}", endpoint.uri);

        Ok(Box::new(BoltConnection {
            runtime: Arc::clone(&self.runtime),
            graph: Some(graph),
        }))
    }
}

struct BoltConnection {
    runtime: Arc<Runtime>,
    graph: Option<Graph>,
}

impl Connection for BoltConnection {
    fn open_session(&mut self, database: &str) -> Result<Box<dyn Session>, DriverError> {
        let graph = self
            .graph
            .clone()
            .ok_or_else(|| DriverError::new("connection is closed"))?;

        self.runtime
            .block_on(graph.run_on(database, neo4rs::query(PROBE)))?;
        debug!("Opened session on database '{}'", database);

        Ok(Box::new(BoltSession {
            runtime: Arc::clone(&self.runtime),
            graph: Some(graph),
            database: database.to_string(),
        }))
    }
}

impl Close for BoltConnection {
    fn close(&mut self) -> Result<(), DriverError> {
        // Dropping the last handle shuts the pool down.
        if self.graph.take().is_some() {
            debug!("Closed connection");
        }
        Ok(())
    }
}

struct BoltSession {
    runtime: Arc<Runtime>,
    graph: Option<Graph>,
    database: String,
}

impl Session for BoltSession {
    fn execute(
        &mut self,
        statement: &Statement,
    ) -> Result<Box<dyn ResultHandle + '_>, DriverError> {
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| DriverError::new("session is closed"))?;

        let (txn, stream) = self.runtime.block_on(async {
            let mut txn = graph.start_txn_on(self.database.as_str()).await?;
            let stream = txn.execute(to_query(statement)).await?;
            Ok::<_, neo4rs::Error>((txn, stream))
        })?;

        Ok(Box::new(BoltResult {
            runtime: self.runtime.as_ref(),
            txn,
            stream,
        }))
    }
}

impl Close for BoltSession {
    fn close(&mut self) -> Result<(), DriverError> {
        if self.graph.take().is_some() {
            debug!("Closed session on database '{}'", self.database);
        }
        Ok(())
    }
}

/// Rows of one statement, streamed inside its own transaction.
///
/// The transaction commits once the stream is drained, so each statement
/// behaves as auto-commit. An undrained result is never committed.
struct BoltResult<'a> {
    runtime: &'a Runtime,
    txn: Txn,
    stream: RowStream,
}

impl BoltResult<'_> {
    fn drain(
        self,
        mut on_row: impl FnMut(Row) -> Result<(), DriverError>,
    ) -> Result<(), DriverError> {
        let BoltResult {
            runtime,
            mut txn,
            mut stream,
        } = self;

        while let Some(row) = runtime.block_on(stream.next(txn.handle()))? {
            on_row(row)?;
        }
        runtime.block_on(txn.commit())?;
        Ok(())
    }
}

impl ResultHandle for BoltResult<'_> {
    fn collect_all(self: Box<Self>) -> Result<Vec<Record>, DriverError> {
        let mut records = Vec::new();
        (*self).drain(|row| {
            records.push(row_to_record(&row)?);
            Ok(())
        })?;
        Ok(records)
    }

    fn consume(self: Box<Self>) -> Result<(), DriverError> {
        (*self).drain(|_| Ok(()))
    }
}

/// Build a driver query with bound parameters.
pub fn to_query(statement: &Statement) -> Query {
    statement
        .params
        .iter()
        .fold(neo4rs::query(&statement.query), |query, (key, value)| {
            query.param(key, param_to_bolt(value))
        })
}

/// Decode a driver row.
///
/// Rows arrive as unordered maps, so fields are ordered by name.
pub fn row_to_record(row: &Row) -> Result<Record, DriverError> {
    let fields: HashMap<String, BoltType> = row
        .to()
        .map_err(|e| DriverError::new(format!("failed to decode row: {}", e)))?;

    let sorted: BTreeMap<String, BoltType> = fields.into_iter().collect();
    Ok(sorted
        .into_iter()
        .map(|(name, value)| (name, bolt_to_graph(value)))
        .collect())
}

/// Convert a parameter into its Bolt representation.
pub fn param_to_bolt(value: &ParamValue) -> BoltType {
    match value {
        ParamValue::Null => BoltType::Null(BoltNull),
        ParamValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        ParamValue::Int(i) => BoltType::Integer(BoltInteger::new(*i)),
        ParamValue::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        ParamValue::String(s) => BoltType::String(BoltString::new(s)),
        ParamValue::List(items) => BoltType::List(BoltList::from(
            items.iter().map(param_to_bolt).collect::<Vec<_>>(),
        )),
        ParamValue::Map(entries) => {
            let mut map = BoltMap::new();
            for (key, value) in entries {
                map.put(BoltString::new(key), param_to_bolt(value));
            }
            BoltType::Map(map)
        }
    }
}

/// Convert a Bolt value into a [`GraphValue`].
pub fn bolt_to_graph(value: BoltType) -> GraphValue {
    match value {
        BoltType::Null(_) => GraphValue::Null,
        BoltType::Boolean(b) => GraphValue::Bool(b.value),
        BoltType::Integer(i) => GraphValue::Int(i.value),
        BoltType::Float(f) => GraphValue::Float(f.value),
        BoltType::String(s) => GraphValue::String(s.value),
        BoltType::List(list) => {
            GraphValue::List(list.value.into_iter().map(bolt_to_graph).collect())
        }
        BoltType::Map(map) => GraphValue::Map(convert_map(map)),
        BoltType::Node(node) => GraphValue::Node(Node {
            id: node.id.value,
            labels: node
                .labels
                .value
                .into_iter()
                .filter_map(|label| match label {
                    BoltType::String(s) => Some(s.value),
                    _ => None,
                })
                .collect(),
            properties: convert_map(node.properties),
        }),
        BoltType::Relation(rel) => GraphValue::Relationship(Relationship {
            id: rel.id.value,
            rel_type: rel.typ.value,
            start: rel.start_node_id.value,
            end: rel.end_node_id.value,
            properties: convert_map(rel.properties),
        }),
        other => GraphValue::String(format!("{:?}", other)),
    }
}

fn convert_map(map: BoltMap) -> BTreeMap<String, GraphValue> {
    map.value
        .into_iter()
        .map(|(key, value)| (key.value, bolt_to_graph(value)))
        .collect()
}
