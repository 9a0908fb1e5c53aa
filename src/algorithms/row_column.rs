//! Row-oriented JSON to column storage.
//!
//! Walks an array of JSON objects field by field and appends each value to
//! its column. A column first seen late is back-filled with `null`; a row
//! missing a known column gets `null` for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::generator::{
    reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

const DEFAULT_ROWS: &str = r#"[{"id": 1, "name": "Ada", "age": 36}, {"id": 2, "name": "Alan", "age": 41}, {"id": 3, "name": "Grace"}]"#;

/// Row/column input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowColumnParams {
    /// JSON array of flat objects.
    pub json: String,
}

impl Default for RowColumnParams {
    fn default() -> Self {
        Self {
            json: DEFAULT_ROWS.to_string(),
        }
    }
}

/// One column, values rendered as compact JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name.
    pub name: String,
    /// One value per processed row.
    pub values: Vec<String>,
}

/// Row/column visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowColumnFrame {
    /// Number of input rows.
    pub row_count: usize,
    /// Row being read.
    pub row: Option<usize>,
    /// Field being read.
    pub field: Option<String>,
    /// Columns in first-seen order.
    pub columns: Vec<Column>,
}

impl FrameView for RowColumnFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mark = if self.field.as_deref() == Some(c.name.as_str()) {
                    '>'
                } else {
                    ' '
                };
                format!("{mark}{}: [{}]", c.name, c.values.join(", "))
            })
            .collect();
        if let Some(row) = self.row {
            lines.push(format!("row {} of {}", row + 1, self.row_count));
        }
        lines
    }
}

/// Row/column generator.
#[derive(Debug, Clone)]
pub struct RowColumnGenerator {
    max_rows: usize,
}

impl RowColumnGenerator {
    /// Create a generator accepting up to `max_rows` rows.
    #[must_use]
    pub const fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    fn parse(&self, json: &str) -> Result<Vec<serde_json::Map<String, Value>>, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {e}"))?;
        let Value::Array(items) = value else {
            return Err("Expected a JSON array of objects".to_string());
        };
        if items.is_empty() {
            return Err("Please enter at least one row".to_string());
        }
        if items.len() > self.max_rows {
            return Err(format!("Please enter at most {} rows", self.max_rows));
        }
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                _ => Err(format!("Row {} is not an object", i + 1)),
            })
            .collect()
    }
}

impl TraceGenerator for RowColumnGenerator {
    type Params = RowColumnParams;
    type Frame = RowColumnFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "row-column",
            name: "Row to Column Storage",
            category: Category::Storage,
            summary: "Pivot JSON records into one array per field",
            params: &["json"],
        }
    }

    fn generate(&self, params: &RowColumnParams) -> Trace<RowColumnFrame> {
        let rows = match self.parse(&params.json) {
            Ok(rows) => rows,
            Err(message) => return Trace::invalid(message, RowColumnFrame::default()),
        };

        let mut frame = RowColumnFrame {
            row_count: rows.len(),
            ..RowColumnFrame::default()
        };
        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == RowColumnParams::default(),
            format!("Press play to split {} rows into columns", rows.len()),
            format!("Read {} rows, no columns yet", rows.len()),
            frame.clone(),
        );

        for (r, row) in rows.iter().enumerate() {
            frame.row = Some(r);
            frame.field = None;
            for (key, value) in row {
                let rendered = value.to_string();
                let message = match frame.columns.iter().position(|c| &c.name == key) {
                    Some(at) => {
                        frame.columns[at].values.push(rendered.clone());
                        format!("Row {}: append {rendered} to \"{key}\"", r + 1)
                    }
                    None => {
                        let mut values = vec!["null".to_string(); r];
                        values.push(rendered.clone());
                        frame.columns.push(Column {
                            name: key.clone(),
                            values,
                        });
                        format!("Row {}: new column \"{key}\" starting with {rendered}", r + 1)
                    }
                };
                frame.field = Some(key.clone());
                rec.emit(message, frame.clone());
            }

            let mut missing = Vec::new();
            for column in &mut frame.columns {
                if column.values.len() == r {
                    column.values.push("null".to_string());
                    missing.push(column.name.clone());
                }
            }
            if !missing.is_empty() {
                frame.field = None;
                rec.emit(
                    format!("Row {} has no {}: fill null", r + 1, missing.join(", ")),
                    frame.clone(),
                );
            }
        }

        frame.row = None;
        frame.field = None;
        let count = frame.columns.len() as u64;
        rec.finish(
            format!("{count} columns of {} values each", frame.row_count),
            frame,
            Outcome::Count(count),
        )
    }

    fn apply_args(&self, current: &RowColumnParams, args: &ParamArgs) -> VizResult<RowColumnParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(json) = text_arg(args, "json") {
            next.json = json;
        }
        Ok(next)
    }
}
