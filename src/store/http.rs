// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{BillStore, StoreError};
use crate::models::{Bill, CreatedBill, NewBillUpload};
use crate::utils::http_client;
use anyhow::Result;
use reqwest::blocking::{multipart, Client, Response};

pub struct HttpStore {
    client: Client,
    base: String,
}

impl HttpStore {
    pub fn new(api_url: &str, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: http_client(token)?,
            base: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(StoreError::Status {
        code: status.as_u16(),
        body,
    })
}

impl BillStore for HttpStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let url = self.url("bills");
        log::debug!("GET {}", url);
        let resp = check(self.client.get(url).send()?)?;
        Ok(serde_json::from_str(&resp.text()?)?)
    }

    fn create(&self, upload: NewBillUpload) -> Result<CreatedBill, StoreError> {
        let url = self.url("bills");
        log::debug!("POST {} ({} bytes)", url, upload.file.bytes.len());
        let part = multipart::Part::bytes(upload.file.bytes)
            .file_name(upload.file.name)
            .mime_str(&upload.file.mime)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", upload.email);
        let resp = check(self.client.post(url).multipart(form).send()?)?;
        Ok(serde_json::from_str(&resp.text()?)?)
    }

    fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        let url = self.url(&format!("bills/{}", bill.id));
        log::debug!("PATCH {}", url);
        let resp = check(self.client.patch(url).json(bill).send()?)?;
        Ok(serde_json::from_str(&resp.text()?)?)
    }
}
