use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::PROB_PRECISION;
use crate::Probability;
use crate::Result;
use crate::product;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a [`Table`] holds its entries. Chosen once, at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Storage {
    #[default]
    Dense,
    Sparse,
}

/// A row-stochastic probability table.
///
/// Dense tables store every entry row-major. Sparse tables store only the
/// nonzero entries of each row, so `row` walks exactly the support.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Dense {
        cols: usize,
        cells: Vec<Probability>,
    },
    Sparse {
        cols: usize,
        rows: Vec<BTreeMap<usize, Probability>>,
    },
}

impl Table {
    /// All-zero `rows x cols` table. Fails when a dense table would not be addressable.
    pub fn new(storage: Storage, rows: usize, cols: usize) -> Result<Self> {
        match storage {
            Storage::Dense => Ok(Self::Dense {
                cols,
                cells: vec![0.; product([rows as Index, cols as Index])?.slot()?],
            }),
            Storage::Sparse => Ok(Self::Sparse {
                cols,
                rows: vec![BTreeMap::new(); rows],
            }),
        }
    }
    pub fn storage(&self) -> Storage {
        match self {
            Self::Dense { .. } => Storage::Dense,
            Self::Sparse { .. } => Storage::Sparse,
        }
    }
    pub fn rows(&self) -> usize {
        match self {
            Self::Dense { cols: 0, .. } => 0,
            Self::Dense { cols, cells } => cells.len() / cols,
            Self::Sparse { rows, .. } => rows.len(),
        }
    }
    pub fn cols(&self) -> usize {
        match self {
            Self::Dense { cols, .. } | Self::Sparse { cols, .. } => *cols,
        }
    }

    /// Entry `(row, col)`; zero outside the table.
    pub fn get(&self, row: usize, col: usize) -> Probability {
        match self {
            Self::Dense { cols, cells } if col < *cols => {
                cells.get(row * cols + col).copied().unwrap_or(0.)
            }
            Self::Dense { .. } => 0.,
            Self::Sparse { rows, .. } => rows
                .get(row)
                .and_then(|r| r.get(&col))
                .copied()
                .unwrap_or(0.),
        }
    }

    pub fn set(&mut self, row: usize, col: usize, p: Probability) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(MadpError::InvalidIndex(format!(
                "cell ({}, {}) outside {}x{} table",
                row,
                col,
                self.rows(),
                self.cols()
            )));
        }
        if !(0. ..=1.).contains(&p) {
            return Err(MadpError::Sanity(format!(
                "probability {} at ({}, {})",
                p, row, col
            )));
        }
        match self {
            Self::Dense { cols, cells } => cells[row * *cols + col] = p,
            Self::Sparse { rows, .. } if p == 0. => {
                rows[row].remove(&col);
            }
            Self::Sparse { rows, .. } => {
                rows[row].insert(col, p);
            }
        }
        Ok(())
    }

    /// Nonzero entries of `row`, by column.
    pub fn row(&self, row: usize) -> Vec<(usize, Probability)> {
        match self {
            Self::Dense { cols, cells } => cells
                .chunks((*cols).max(1))
                .nth(row)
                .map(|r| {
                    r.iter()
                        .copied()
                        .enumerate()
                        .filter(|&(_, p)| p > 0.)
                        .collect()
                })
                .unwrap_or_default(),
            Self::Sparse { rows, .. } => rows
                .get(row)
                .map(|r| r.iter().map(|(&c, &p)| (c, p)).collect())
                .unwrap_or_default(),
        }
    }

    /// Every row sums to one within [`PROB_PRECISION`].
    pub fn sanity_check(&self) -> Result<()> {
        for row in 0..self.rows() {
            let sum = self.row(row).iter().map(|(_, p)| p).sum::<Probability>();
            if (sum - 1.).abs() > PROB_PRECISION {
                return Err(MadpError::Sanity(format!("row {} sums to {}", row, sum)));
            }
        }
        Ok(())
    }
}
