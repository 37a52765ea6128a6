use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{GameBatch, GameId, GameRun};

/// Summary of a generated batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub game: GameId,
    pub seed: u32,
    pub lines: usize,
    /// Lines per anomaly kind, keyed like the CSV `kind` column.
    pub anomaly_counts: BTreeMap<String, u64>,
    /// SHA-256 of the batch's JSON encoding, hex encoded.
    pub fingerprint: String,
}

impl BatchReport {
    pub fn from_run(run: &GameRun) -> Result<Self, serde_json::Error> {
        let mut anomaly_counts = BTreeMap::new();
        for row in run.batch.rows() {
            *anomaly_counts.entry(row.kind).or_insert(0) += 1;
        }

        Ok(Self {
            game: run.game,
            seed: run.seed,
            lines: run.batch.len(),
            anomaly_counts,
            fingerprint: fingerprint(&run.batch)?,
        })
    }
}

/// Hex SHA-256 of a value's compact JSON encoding.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&encoded)))
}

impl GameBatch {
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        fingerprint(self)
    }
}
