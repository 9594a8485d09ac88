// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image fetching module

pub mod fetcher;

pub use fetcher::{FetchError, ImageFetcher, ImageSource};
