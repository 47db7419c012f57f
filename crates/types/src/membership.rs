//! Membership vectors.

use rand::Rng;
use std::fmt;

/// A fixed-length digit string that assigns a node to one group per level.
///
/// Digits are drawn from `0..base`. Two nodes belong to the same level-k
/// group exactly when their vectors share a leading prefix of k digits, so
/// level 0 always holds the whole population and groups only shrink as the
/// level increases. Vectors are immutable once assigned to a node, and every
/// vector in an overlay has the same length and base.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MembershipVector {
    digits: Box<[u8]>,
}

impl MembershipVector {
    /// Build a vector from raw digits.
    ///
    /// Callers must ensure every digit is below the overlay base; digits are
    /// not re-validated on lookup paths.
    pub fn new(digits: Vec<u8>) -> Self {
        Self {
            digits: digits.into_boxed_slice(),
        }
    }

    /// Draw `len` independent uniform digits in `0..base` from the supplied
    /// RNG.
    ///
    /// The RNG is the single entropy source for a run; threading it through
    /// here keeps runs replayable from one seed.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, len: usize, base: u8) -> Self {
        let digits = (0..len).map(|_| rng.gen_range(0..base)).collect::<Vec<_>>();
        Self::new(digits)
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether the vector has no digits.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn digit(&self, index: usize) -> u8 {
        self.digits[index]
    }

    /// All digits in order.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Length of the shared leading digit run, in `0..=len`.
    pub fn common_prefix_len(&self, other: &MembershipVector) -> usize {
        self.digits
            .iter()
            .zip(other.digits.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Whether both vectors share at least a `level`-digit prefix, i.e.
    /// belong to the same level-`level` group.
    ///
    /// Level 0 is the whole population, so this is always true at level 0.
    pub fn same_group_at(&self, other: &MembershipVector, level: usize) -> bool {
        self.common_prefix_len(other) >= level
    }
}

impl fmt::Display for MembershipVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits.iter() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MembershipVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MembershipVector({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_common_prefix() {
        let a = MembershipVector::new(vec![0, 1, 1, 0]);
        let b = MembershipVector::new(vec![0, 1, 0, 0]);
        assert_eq!(a.common_prefix_len(&b), 2);
        assert_eq!(b.common_prefix_len(&a), 2);
    }

    #[test]
    fn test_common_prefix_identical() {
        let a = MembershipVector::new(vec![2, 0, 1]);
        assert_eq!(a.common_prefix_len(&a.clone()), 3);
    }

    #[test]
    fn test_common_prefix_disjoint() {
        let a = MembershipVector::new(vec![1, 1]);
        let b = MembershipVector::new(vec![0, 1]);
        assert_eq!(a.common_prefix_len(&b), 0);
    }

    #[test]
    fn test_same_group_at_level_zero_always() {
        let a = MembershipVector::new(vec![1, 1]);
        let b = MembershipVector::new(vec![0, 0]);
        assert!(a.same_group_at(&b, 0));
        assert!(!a.same_group_at(&b, 1));
    }

    #[test]
    fn test_generate_respects_base_and_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for base in [2u8, 3, 16] {
            let mv = MembershipVector::generate(&mut rng, 32, base);
            assert_eq!(mv.len(), 32);
            assert!(mv.digits().iter().all(|&d| d < base));
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = MembershipVector::generate(&mut ChaCha8Rng::seed_from_u64(42), 16, 2);
        let b = MembershipVector::generate(&mut ChaCha8Rng::seed_from_u64(42), 16, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_digit_string() {
        let mv = MembershipVector::new(vec![0, 1, 1, 0]);
        assert_eq!(mv.to_string(), "0110");
    }
}
