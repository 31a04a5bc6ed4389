/*!
Wire format spoken with the numeric-processing service.

One JSON object per line in each direction:

  -> {"op":"ping"}
  -> {"op":"echo","text":"hi"}
  -> {"op":"generate","count":3,"number_type":"integer","min":0,"max":9}
  -> {"op":"sort","numbers":[3,1.5,2]}

  <- {"status":"ok","result":<any>}
  <- {"status":"error","error":"message"}
*/

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::NumberType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Ping,
    Echo {
        text: String,
    },
    Generate {
        count: u64,
        number_type: NumberType,
        min: i64,
        max: i64,
    },
    Sort {
        numbers: Vec<serde_json::Number>,
    },
}

impl Request {
    /// Short name for log lines.
    pub fn op(&self) -> &'static str {
        match self {
            Request::Ping => "ping",
            Request::Echo { .. } => "echo",
            Request::Generate { .. } => "generate",
            Request::Sort { .. } => "sort",
        }
    }

    /// Serialize as a single newline-terminated line.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self).context("failed to encode request")?;
        line.push('\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Ok {
        #[serde(default)]
        result: serde_json::Value,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub fn from_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim_end())
            .with_context(|| format!("malformed server response: {}", line.trim_end()))
    }

    /// Payload of an `ok` response; an `error` response becomes an `Err`.
    pub fn into_result(self) -> Result<serde_json::Value> {
        match self {
            Response::Ok { result } => Ok(result),
            Response::Error { error } => bail!("server error: {error}"),
        }
    }
}

/// Pull an array of numbers out of a response payload.
pub fn numbers_from(value: serde_json::Value) -> Result<Vec<serde_json::Number>> {
    let serde_json::Value::Array(items) = value else {
        bail!("expected an array of numbers from server");
    };
    items
        .into_iter()
        .map(|v| match v {
            serde_json::Value::Number(n) => Ok(n),
            other => bail!("non-numeric value in server result: {other}"),
        })
        .collect()
}
