//! Chart data contract
//!
//! `GET /get_chart_data/{serverId}` answers with
//! `{"labels": ["14:05", ...], "data": [37, ...]}`: one label per sample,
//! oldest first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ChartError, ChartResult};

/// Labelled load series for one server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartData {
    pub fn new(labels: Vec<String>, data: Vec<f64>) -> Self {
        Self { labels, data }
    }

    /// Decode the endpoint's JSON body
    pub fn from_json(bytes: &[u8]) -> ChartResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Number of values in the series
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Label/value pairs; a shorter side truncates the other
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }

    /// Most recent label/value pair
    pub fn latest(&self) -> Option<(&str, f64)> {
        self.points().last()
    }
}

/// Numeric server identifier taken from the selection control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServerId(u32);

impl ServerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Parse a `<select>` value, ignoring surrounding whitespace
    pub fn parse_selection(value: &str) -> ChartResult<Self> {
        value.parse()
    }
}

impl FromStr for ServerId {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ServerId)
            .map_err(|_| ChartError::InvalidServerId(s.to_string()))
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ServerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
