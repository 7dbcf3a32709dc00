// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(anyhow::anyhow!(
                "Invalid status '{}', expected pending|accepted|refused",
                other
            )),
        }
    }
}

/// An expense bill as the store knows it. Partial records (right after the
/// receipt upload) leave the form fields empty.
///
/// Decoding never fails on a single bad field: values of the wrong shape
/// become empty, and `date` keeps whatever text the store sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub r#type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String, // YYYY-MM-DD, kept raw
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::opt_decimal")]
    pub vat: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub pct: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub commentary: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: BillStatus,
}

mod lenient {
    use super::BillStatus;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn raw(v: Value) -> Option<String> {
        match v {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(raw(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(raw(Value::deserialize(d)?))
    }

    pub fn opt_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        let Some(s) = raw(Value::deserialize(d)?) else {
            return Ok(None);
        };
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<Decimal>().or_else(|_| Decimal::from_scientific(s)) {
            Ok(v) => Ok(Some(v)),
            Err(_) => {
                log::warn!("ignoring non-numeric amount '{}'", s);
                Ok(None)
            }
        }
    }

    pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(raw(Value::deserialize(d)?).and_then(|s| s.trim().parse().ok()))
    }

    pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<BillStatus, D::Error> {
        let Some(s) = raw(Value::deserialize(d)?) else {
            return Ok(BillStatus::default());
        };
        Ok(s.parse().unwrap_or_else(|_| {
            log::warn!("unknown bill status '{}', reading it as pending", s);
            BillStatus::default()
        }))
    }
}

/// A receipt picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("'{}' is not a file path", path.display()))?;
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let mime = mime_for(&name).to_string();
        Ok(Self { name, mime, bytes })
    }

    /// Lowercased text after the last dot. Names without a dot have none.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

pub fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, e)| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Multipart payload of the create call.
#[derive(Debug, Clone)]
pub struct NewBillUpload {
    pub file: UploadFile,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    pub key: String,
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub r#type: String,
}
