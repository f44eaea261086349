use crate::Index;
use crate::MadpError;
use crate::Result;

/// Overflow-checked arithmetic on history and policy counts.
///
/// Policy counts are towers of exponentials, so every multiply and add
/// that feeds a count or an index goes through here and fails with
/// [`MadpError::Overflow`] instead of wrapping.
pub trait Checked: Sized + Copy {
    fn times(self, rhs: Self) -> Result<Self>;
    fn plus(self, rhs: Self) -> Result<Self>;
    fn power(self, exp: usize) -> Result<Self>;
    /// Convert to a position usable for slice access.
    fn slot(self) -> Result<usize>;
}

impl Checked for Index {
    fn times(self, rhs: Self) -> Result<Self> {
        self.checked_mul(rhs)
            .ok_or_else(|| MadpError::Overflow(format!("{} * {}", self, rhs)))
    }
    fn plus(self, rhs: Self) -> Result<Self> {
        self.checked_add(rhs)
            .ok_or_else(|| MadpError::Overflow(format!("{} + {}", self, rhs)))
    }
    fn power(self, exp: usize) -> Result<Self> {
        match self {
            0 if exp == 0 => Ok(1),
            0 => Ok(0),
            1 => Ok(1),
            _ => u32::try_from(exp)
                .ok()
                .and_then(|exp| self.checked_pow(exp))
                .ok_or_else(|| MadpError::Overflow(format!("{} ^ {}", self, exp))),
        }
    }
    fn slot(self) -> Result<usize> {
        usize::try_from(self)
            .map_err(|_| MadpError::Overflow(format!("{} does not fit in usize", self)))
    }
}

/// Overflow-checked product of a sequence of counts. Empty product is 1.
pub fn product<I>(counts: I) -> Result<Index>
where
    I: IntoIterator<Item = Index>,
{
    counts
        .into_iter()
        .try_fold(1 as Index, |acc, n| acc.times(n))
}

/// Overflow-checked `Σ_{t < n} base^t`, the number of histories shorter than `n`.
pub fn series(base: Index, n: usize) -> Result<Index> {
    let mut term = 1 as Index;
    let mut total = 0 as Index;
    for t in 0..n {
        total = total.plus(term)?;
        if t + 1 < n {
            term = term.times(base)?;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_small() {
        assert_eq!((3 as Index).power(0), Ok(1));
        assert_eq!((3 as Index).power(4), Ok(81));
        assert_eq!((0 as Index).power(3), Ok(0));
        assert_eq!((0 as Index).power(0), Ok(1));
    }

    #[test]
    fn power_of_unit_base_is_immediate() {
        assert_eq!((1 as Index).power(usize::MAX), Ok(1));
        assert_eq!((0 as Index).power(usize::MAX), Ok(0));
        assert!(matches!((2 as Index).power(usize::MAX), Err(MadpError::Overflow(_))));
    }

    #[test]
    fn power_overflow() {
        let err = (2 as Index).power(Index::BITS as usize);
        assert!(matches!(err, Err(MadpError::Overflow(_))));
        assert!((2 as Index).power(Index::BITS as usize - 1).is_ok());
    }

    #[test]
    fn product_overflow() {
        assert_eq!(product(vec![2, 3, 7]), Ok(42));
        assert_eq!(product(vec![]), Ok(1));
        assert!(matches!(
            product(vec![Index::MAX, 2]),
            Err(MadpError::Overflow(_))
        ));
    }

    #[test]
    fn series_counts_histories() {
        // 1 + 2 + 4
        assert_eq!(series(2, 3), Ok(7));
        // 1 + 4 + 16 + 64
        assert_eq!(series(4, 4), Ok(85));
        assert_eq!(series(5, 0), Ok(0));
        assert_eq!(series(0, 3), Ok(1));
    }

    #[test]
    fn series_overflow() {
        let base = (1 as Index) << (Index::BITS / 4);
        assert!(series(base, 4).is_ok());
        assert!(matches!(series(base, 5), Err(MadpError::Overflow(_))));
    }
}
