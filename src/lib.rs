// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod cli;
pub mod commands;
pub mod db;
pub mod models;
pub mod new_bill;
pub mod routes;
pub mod store;
pub mod utils;
