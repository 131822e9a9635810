//! Integration tests for running workflows through the public API.

use boltrun::graph::mock::Fault;
use boltrun::graph::{Endpoint, GraphValue, MockCall, MockConnector, Node, Record};
use boltrun::workflow::{sink_for, RecordFormat, RunProgress, Statement, Workflow, WorkflowRunner};
use boltrun::BoltrunError;
use std::collections::BTreeMap;

const READ_BACK: &str = "match (n)-[r]->(m) return n,r,m";

fn endpoint() -> Endpoint {
    Endpoint::new("bolt://localhost:7687", "admin", "73@TuGraph", "default")
}

fn people_workflow() -> Workflow {
    Workflow::new(
        "people",
        vec![
            Statement::new("create (n:person {name: $name, id: $id})")
                .param("id", 1)
                .param("name", "jack"),
            Statement::new("create (n:person {name: $name, id: $id})")
                .param("id", 2)
                .param("name", "lucy"),
            Statement::new(READ_BACK),
        ],
    )
}

fn person(id: i64, name: &str) -> GraphValue {
    GraphValue::Node(Node {
        id,
        labels: vec!["person".to_string()],
        properties: BTreeMap::from([("name".to_string(), GraphValue::String(name.to_string()))]),
    })
}

fn releases(mock: &MockConnector) -> (usize, usize) {
    (
        mock.count(&MockCall::CloseSession),
        mock.count(&MockCall::CloseConnection),
    )
}

#[test]
fn only_final_statement_records_reach_the_sink() {
    let mock = MockConnector::new();
    mock.script(
        "create (n:person {name: $name, id: $id})",
        vec![Record::from_iter([("ignored", GraphValue::Int(0))])],
    );
    mock.script(
        READ_BACK,
        vec![Record::from_iter([
            ("n", person(0, "jack")),
            ("m", person(1, "lucy")),
        ])],
    );

    let mut records: Vec<Record> = Vec::new();
    let result = WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap();

    assert_eq!(result.workflow, "people");
    assert_eq!(result.statements, 3);
    assert_eq!(result.records, 1);
    assert_eq!(records.len(), 1);
    assert!(records[0].get("ignored").is_none());
    assert_eq!(releases(&mock), (1, 1));
}

#[test]
fn release_happens_in_reverse_order() {
    let mock = MockConnector::new();
    let mut records: Vec<Record> = Vec::new();
    WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap();

    let calls = mock.calls();
    assert_eq!(
        calls.first(),
        Some(&MockCall::Connect {
            uri: "bolt://localhost:7687".to_string()
        })
    );
    assert_eq!(
        &calls[calls.len() - 2..],
        &[MockCall::CloseSession, MockCall::CloseConnection]
    );
}

#[test]
fn failing_statement_stops_the_run_and_releases() {
    let mock = MockConnector::new().failing(Fault::Execute(1));
    let mut records: Vec<Record> = Vec::new();

    let err = WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap_err();

    assert!(matches!(err, BoltrunError::StatementError { index: 1, .. }));
    assert_eq!(mock.executed_queries().len(), 2);
    assert!(records.is_empty());
    assert_eq!(releases(&mock), (1, 1));
}

#[test]
fn connect_failure_releases_nothing() {
    let mock = MockConnector::new().failing(Fault::Connect);
    let mut records: Vec<Record> = Vec::new();

    let err = WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap_err();

    assert!(matches!(err, BoltrunError::ConnectionError { .. }));
    assert!(mock.executed_queries().is_empty());
    assert_eq!(releases(&mock), (0, 0));
}

#[test]
fn session_failure_releases_connection_only() {
    let mock = MockConnector::new().failing(Fault::OpenSession);
    let mut records: Vec<Record> = Vec::new();

    let err = WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap_err();

    assert!(matches!(err, BoltrunError::SessionError { ref database, .. } if database == "default"));
    assert_eq!(releases(&mock), (0, 1));
}

#[test]
fn collection_failure_is_reported_after_all_statements() {
    let mock = MockConnector::new().failing(Fault::Collect);
    let mut records: Vec<Record> = Vec::new();

    let err = WorkflowRunner::new(&mock)
        .run(&endpoint(), &people_workflow(), &mut records)
        .unwrap_err();

    assert!(matches!(err, BoltrunError::CollectionError { .. }));
    assert_eq!(mock.executed_queries().len(), 3);
    assert_eq!(releases(&mock), (1, 1));
}

#[test]
fn release_failures_do_not_fail_the_run() {
    let mock = MockConnector::new()
        .failing(Fault::CloseSession)
        .failing(Fault::CloseConnection);
    let mut records: Vec<Record> = Vec::new();

    let result = WorkflowRunner::new(&mock).run(&endpoint(), &people_workflow(), &mut records);
    assert!(result.is_ok());
    assert_eq!(releases(&mock), (1, 1));
}

#[test]
fn empty_workflow_never_connects() {
    let mock = MockConnector::new();
    let mut records: Vec<Record> = Vec::new();

    let err = WorkflowRunner::new(&mock)
        .run(&endpoint(), &Workflow::new("empty", vec![]), &mut records)
        .unwrap_err();

    assert!(matches!(err, BoltrunError::ConfigValidationError { .. }));
    assert!(mock.calls().is_empty());
}

#[test]
fn progress_events_follow_the_run() {
    let mock = MockConnector::new();
    let mut records: Vec<Record> = Vec::new();
    let mut started = Vec::new();
    let mut collected = None;

    WorkflowRunner::new(&mock)
        .run_with_progress(&endpoint(), &people_workflow(), &mut records, |event| {
            match event {
                RunProgress::StatementStarting { index, total, .. } => {
                    started.push((index, total))
                }
                RunProgress::RecordsCollected { count } => collected = Some(count),
                _ => {}
            }
        })
        .unwrap();

    assert_eq!(started, [(0, 3), (1, 3), (2, 3)]);
    assert_eq!(collected, Some(0));
}

#[test]
fn json_sink_writes_one_line_per_record() {
    let mock = MockConnector::new();
    mock.script(
        READ_BACK,
        vec![
            Record::from_iter([("n", GraphValue::Int(1))]),
            Record::from_iter([("n", GraphValue::Int(2))]),
        ],
    );

    let mut out = Vec::new();
    {
        let mut sink = sink_for(RecordFormat::Json, &mut out);
        WorkflowRunner::new(&mock)
            .run(&endpoint(), &people_workflow(), sink.as_mut())
            .unwrap();
    }

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, [r#"{"n":1}"#, r#"{"n":2}"#]);
}
