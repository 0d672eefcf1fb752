// Copyright 2025 the Storyviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A clamped cursor over an ordered category list.

/// The active position in a fixed list of categories.
///
/// Stepping stops at either end; there is no wrap-around and no reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCursor {
    categories: Vec<String>,
    index: usize,
}

impl CategoryCursor {
    /// A cursor at the first of `categories`. Repeated categories keep their first position.
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for c in categories {
            let c = c.into();
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self {
            categories: out,
            index: 0,
        }
    }

    /// The active category, or `None` for an empty list.
    pub fn current(&self) -> Option<&str> {
        self.categories.get(self.index).map(String::as_str)
    }

    /// The active position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Steps back; returns `true` if the position changed.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Steps forward; returns `true` if the position changed.
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.categories.len() {
            return false;
        }
        self.index += 1;
        true
    }
}
