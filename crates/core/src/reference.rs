//! Cell reference encoding.
//!
//! Columns use bijective base-26 letters (`A` = 0, `Z` = 25, `AA` = 26, ...)
//! and rows are written 1-based, so the top-left cell is `A1`.

use std::fmt;
use std::str::FromStr;

/// Letters naming the zero-based column `index`.
pub fn column_name_of(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.into_iter().rev().map(char::from).collect()
}

/// Zero-based column index named by `name`. Returns `None` for empty input,
/// anything other than `A`-`Z`, or a name too long to index.
pub fn column_index_of(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    // One past the index; the last column name needs a value above usize::MAX.
    let mut count: u128 = 0;
    for b in name.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        count = count
            .checked_mul(26)?
            .checked_add(u128::from(b - b'A') + 1)?;
    }
    usize::try_from(count - 1).ok()
}

/// A parsed cell reference with zero-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        CellRef { row, column }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name_of(self.column), self.row + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCellRef(pub String);

impl fmt::Display for InvalidCellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell reference '{}'", self.0)
    }
}

impl std::error::Error for InvalidCellRef {}

impl FromStr for CellRef {
    type Err = InvalidCellRef;

    /// Accepts `^[A-Z]+[0-9]+$` with a row of at least 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidCellRef(s.to_string());
        let split = s
            .find(|c: char| !c.is_ascii_uppercase())
            .ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let column = column_index_of(letters).ok_or_else(invalid)?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(CellRef::new(row - 1, column))
    }
}
