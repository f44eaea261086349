use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::Result;

/// Encode `symbols` (oldest first) as `Σ symbols[i] * base^(t-1-i)`.
pub fn encode(symbols: &[Index], base: Index) -> Result<Index> {
    symbols.iter().try_fold(0 as Index, |acc, &s| {
        if s >= base {
            Err(MadpError::InvalidIndex(format!(
                "symbol {} outside alphabet of size {}",
                s, base
            )))
        } else {
            acc.times(base)?.plus(s)
        }
    })
}

/// Recover the `length` symbols of `index`, oldest first.
/// Fails if `index` needs more than `length` digits.
pub fn decode(index: Index, length: usize, base: Index) -> Result<Vec<Index>> {
    if base == 0 && length > 0 {
        return Err(MadpError::InvalidIndex(String::from("empty alphabet")));
    }
    let mut rest = index;
    let mut symbols = vec![0 as Index; length];
    for slot in symbols.iter_mut().rev() {
        *slot = rest % base;
        rest /= base;
    }
    match rest {
        0 => Ok(symbols),
        _ => Err(MadpError::InvalidIndex(format!(
            "{} has more than {} digits in base {}",
            index, length, base
        ))),
    }
}

/// Split a joint index into per-agent indices. The last agent is the
/// least significant digit.
pub fn joint_to_individual(joint: Index, sizes: &[Index]) -> Result<Vec<Index>> {
    let mut rest = joint;
    let mut individual = vec![0 as Index; sizes.len()];
    for (slot, &size) in individual.iter_mut().zip(sizes).rev() {
        if size == 0 {
            return Err(MadpError::InvalidIndex(String::from("empty alphabet")));
        }
        *slot = rest % size;
        rest /= size;
    }
    match rest {
        0 => Ok(individual),
        _ => Err(MadpError::InvalidIndex(format!(
            "joint index {} outside {:?}",
            joint, sizes
        ))),
    }
}

/// Inverse of [`joint_to_individual`].
pub fn individual_to_joint(individual: &[Index], sizes: &[Index]) -> Result<Index> {
    if individual.len() != sizes.len() {
        return Err(MadpError::InvalidIndex(format!(
            "{} indices for {} agents",
            individual.len(),
            sizes.len()
        )));
    }
    individual
        .iter()
        .zip(sizes)
        .try_fold(0 as Index, |acc, (&i, &size)| {
            if i >= size {
                Err(MadpError::InvalidIndex(format!(
                    "index {} outside alphabet of size {}",
                    i, size
                )))
            } else {
                acc.times(size)?.plus(i)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_oldest_most_significant() {
        assert_eq!(encode(&[1, 0, 1], 2), Ok(5));
        assert_eq!(encode(&[2, 1], 3), Ok(7));
        assert_eq!(encode(&[], 7), Ok(0));
    }

    #[test]
    fn encode_rejects_large_symbol() {
        assert!(matches!(encode(&[0, 2], 2), Err(MadpError::InvalidIndex(_))));
    }

    #[test]
    fn encode_overflow() {
        let symbols = vec![1 as Index; Index::BITS as usize + 1];
        assert!(matches!(encode(&symbols, 2), Err(MadpError::Overflow(_))));
    }

    #[test]
    fn decode_rejects_long_index() {
        assert_eq!(decode(3, 2, 2), Ok(vec![1, 1]));
        assert!(matches!(decode(4, 2, 2), Err(MadpError::InvalidIndex(_))));
        assert_eq!(decode(0, 0, 2), Ok(vec![]));
    }

    #[test]
    fn joint_last_agent_fastest() {
        assert_eq!(joint_to_individual(5, &[2, 3]), Ok(vec![1, 2]));
        assert_eq!(individual_to_joint(&[1, 2], &[2, 3]), Ok(5));
        assert_eq!(joint_to_individual(0, &[]), Ok(vec![]));
        assert!(joint_to_individual(6, &[2, 3]).is_err());
        assert!(individual_to_joint(&[2, 0], &[2, 3]).is_err());
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(base in 1u64..9, symbols in prop::collection::vec(0u64..9, 0..12)) {
            let symbols = symbols.into_iter().map(|s| (s % base) as Index).collect::<Vec<_>>();
            let index = encode(&symbols, base as Index).unwrap();
            prop_assert_eq!(decode(index, symbols.len(), base as Index).unwrap(), symbols);
        }

        #[test]
        fn joint_inverts_individual(pairs in prop::collection::vec((1u64..8, 0u64..8), 0..8)) {
            let sizes = pairs.iter().map(|&(n, _)| n as Index).collect::<Vec<_>>();
            let individual = pairs.iter().map(|&(n, i)| (i % n) as Index).collect::<Vec<_>>();
            let joint = individual_to_joint(&individual, &sizes).unwrap();
            prop_assert_eq!(joint_to_individual(joint, &sizes).unwrap(), individual);
        }
    }
}
