//! Workflow definition and execution.
//!
//! - [`statement`] - [`Statement`] and [`Workflow`], the workflow as data
//! - [`runner`] - [`WorkflowRunner`], the fail-fast sequential executor
//! - [`scope`] - [`Scoped`], release-on-drop guard for sessions and connections
//! - [`sink`] - [`RecordSink`] and the text/JSON renderers

pub mod runner;
pub mod scope;
pub mod sink;
pub mod statement;

pub use runner::{RunProgress, WorkflowResult, WorkflowRunner};
pub use scope::Scoped;
pub use sink::{sink_for, JsonSink, RecordFormat, RecordSink, TextSink};
pub use statement::{Statement, Workflow};
