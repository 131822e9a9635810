//! Output sinks for emitted records.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;

use crate::graph::Record;

/// Destination for records emitted by a workflow run.
pub trait RecordSink {
    /// Write one record.
    fn emit(&mut self, record: &Record) -> io::Result<()>;

    /// Flush buffered output once all records are emitted.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RecordSink for Vec<Record> {
    fn emit(&mut self, record: &Record) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// How records are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `field: value` pairs, values in Cypher literal style.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown record format: {}", s)),
        }
    }
}

/// Writes each record as one line of `field: value` pairs.
///
/// # Example
///
/// ```
/// use boltrun::graph::{GraphValue, Record};
/// use boltrun::workflow::{RecordSink, TextSink};
///
/// let mut out = Vec::new();
/// let mut sink = TextSink::new(&mut out);
/// sink.emit(&Record::from_iter([("count", GraphValue::Int(2))])).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "count: 2\n");
/// ```
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn emit(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.writer, "{}", record)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writes each record as a JSON object on its own line.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn emit(&mut self, record: &Record) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Create the sink for `format` over `writer`.
pub fn sink_for<'a, W: Write + 'a>(format: RecordFormat, writer: W) -> Box<dyn RecordSink + 'a> {
    match format {
        RecordFormat::Text => Box::new(TextSink::new(writer)),
        RecordFormat::Json => Box::new(JsonSink::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphValue, Node, Relationship};
    use std::collections::BTreeMap;

    fn friendship() -> Record {
        let node = |id: i64, name: &str| {
            let mut properties = BTreeMap::new();
            properties.insert("id".to_string(), GraphValue::Int(id));
            properties.insert("name".to_string(), GraphValue::String(name.to_string()));
            GraphValue::Node(Node {
                id,
                labels: vec!["person".to_string()],
                properties,
            })
        };
        Record::from_iter([
            ("n", node(1, "jack")),
            (
                "r",
                GraphValue::Relationship(Relationship {
                    id: 0,
                    rel_type: "is_friend".to_string(),
                    start: 1,
                    end: 2,
                    properties: BTreeMap::new(),
                }),
            ),
            ("m", node(2, "lucy")),
        ])
    }

    #[test]
    fn text_sink_renders_one_line_per_record() {
        let mut out = Vec::new();
        {
            let mut sink = TextSink::new(&mut out);
            sink.emit(&friendship()).unwrap();
            sink.emit(&Record::from_iter([("x", GraphValue::Null)])).unwrap();
            sink.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#"n: (:person {id: 1, name: "jack"}), r: [:is_friend], m: (:person {id: 2, name: "lucy"})"#
        );
        assert_eq!(lines[1], "x: null");
    }

    #[test]
    fn json_sink_writes_json_lines() {
        let mut out = Vec::new();
        {
            let mut sink = JsonSink::new(&mut out);
            sink.emit(&friendship()).unwrap();
            sink.emit(&friendship()).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["r"]["type"], "is_friend");
        assert_eq!(value["m"]["properties"]["name"], "lucy");
    }

    #[test]
    fn vec_sink_collects() {
        let mut records: Vec<Record> = Vec::new();
        records.emit(&friendship()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn sink_for_selects_format() {
        let mut out = Vec::new();
        {
            let mut sink = sink_for(RecordFormat::Json, &mut out);
            sink.emit(&Record::from_iter([("a", GraphValue::Int(1))]))
                .unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n");
    }

    #[test]
    fn record_format_parses() {
        assert_eq!("JSON".parse::<RecordFormat>(), Ok(RecordFormat::Json));
        assert!("xml".parse::<RecordFormat>().is_err());
    }
}
