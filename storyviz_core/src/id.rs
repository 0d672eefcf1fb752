// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable mark identity.

/// A stable mark identifier.
///
/// Identity is what the [`crate::Scene`] reconciles on: a mark keeps its id across renders
/// when it represents the same datum (same bin, same state, same guide slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for a row-like datum inside a namespace.
    ///
    /// The namespace keeps ids of different mark groups (bars, labels, legend rows) apart.
    pub fn for_row(namespace: u64, row_key: u64) -> Self {
        let mut h = FNV_OFFSET;
        for b in namespace.to_le_bytes().iter().chain(row_key.to_le_bytes().iter()) {
            h ^= u64::from(*b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Self(h)
    }

    /// Derives an id for a datum keyed by a string (a category name, a region name).
    pub fn for_key(namespace: u64, key: &str) -> Self {
        let mut h = FNV_OFFSET;
        for b in namespace.to_le_bytes().iter().chain(key.as_bytes().iter()) {
            h ^= u64::from(*b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Self(h)
    }
}
