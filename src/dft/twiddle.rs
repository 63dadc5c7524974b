use std::ops::Index;

use num_traits::{Float, FloatConst};

use crate::dft::element::{Complex, Element};
use crate::dft::gf::Gf;

/// Read-only root-of-unity table for a size-n transform.
///
/// `get` accepts an arbitrary index and reduces it mod n, so butterfly code
/// can index with `i * n / block_size` without wrapping concerns.
pub trait TwiddleTable<E> {
    fn size(&self) -> usize;
    fn get(&self, i: usize) -> E;
}

/// Floating-point FFT twiddle factors, ω^i = (cos 2πi/n, sin 2πi/n).
///
/// Only the first quadrant (n/4 + 1 entries) is stored; the other three
/// quadrants are recovered on lookup by quarter-wave symmetry:
/// negated conjugate reflection about n/2, negation, and conjugation.
#[derive(Debug, Clone, PartialEq)]
pub struct FftTwiddles<T> {
    n: usize,
    inverse: bool,
    quarter: Vec<Complex<T>>,
}

impl<T: Float + FloatConst> FftTwiddles<T> {
    /// Builds the table for a power-of-two `n >= 2`. `inverse` conjugates
    /// the root, giving the table of the inverse transform.
    pub fn new(n: usize, inverse: bool) -> Option<Self> {
        if !n.is_power_of_two() || n < 2 {
            return None;
        }
        let mut quarter = Vec::with_capacity(n / 4 + 1);
        for i in 0..=n / 4 {
            quarter.push(Self::root(n, inverse, i));
        }
        Some(Self {
            n,
            inverse,
            quarter,
        })
    }

    fn root(n: usize, inverse: bool, i: usize) -> Complex<T> {
        let t = T::from(2 * i).unwrap() * T::PI() / T::from(n).unwrap();
        let w = Complex::new(t.cos(), t.sin());
        if inverse {
            w.conj()
        } else {
            w
        }
    }
}

impl<T: Float + FloatConst> TwiddleTable<Complex<T>> for FftTwiddles<T> {
    #[inline(always)]
    fn size(&self) -> usize {
        self.n
    }

    fn get(&self, i: usize) -> Complex<T> {
        let n = self.n;
        let i = i % n;
        if n == 2 {
            // degenerate table, no quadrants to fold
            return if i == 0 {
                Complex::one()
            } else {
                -Complex::one()
            };
        }
        if i <= n / 4 {
            self.quarter[i]
        } else if i < n / 2 {
            -self.quarter[n / 2 - i].conj()
        } else if i < 3 * n / 4 {
            -self.quarter[i - n / 2]
        } else {
            self.quarter[n - i].conj()
        }
    }
}

/// NTT twiddle factors over GF(P): all n powers of the order-n generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttTwiddles<const P: u64> {
    n: usize,
    table: Vec<Gf<P>>,
}

impl<const P: u64> NttTwiddles<P> {
    /// Builds the power table of `generator`, which must have
    /// multiplicative order exactly `n` (power of two, >= 2).
    pub fn new(n: usize, generator: Gf<P>) -> Option<Self> {
        if !n.is_power_of_two() || n < 2 {
            return None;
        }
        if generator.pow(n as u64) != Gf::one() || generator.pow(n as u64 / 2) == Gf::one() {
            return None;
        }
        let mut table = Vec::with_capacity(n);
        let mut cur = Gf::one();
        for _ in 0..n {
            table.push(cur);
            cur = cur * generator;
        }
        Some(Self { n, table })
    }
}

impl<const P: u64> TwiddleTable<Gf<P>> for NttTwiddles<P> {
    #[inline(always)]
    fn size(&self) -> usize {
        self.n
    }

    #[inline(always)]
    fn get(&self, i: usize) -> Gf<P> {
        self.table[i % self.n]
    }
}

/// Bit-reversal permutation table for a power-of-two n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReverse {
    table: Vec<usize>,
}

impl BitReverse {
    pub fn new(n: usize) -> Option<Self> {
        if !n.is_power_of_two() || n < 2 {
            return None;
        }
        let log_n = n.trailing_zeros();
        let table = (0..n)
            .map(|i| i.reverse_bits() >> (usize::BITS - log_n))
            .collect();
        Some(Self { table })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Index<usize> for BitReverse {
    type Output = usize;
    #[inline(always)]
    fn index(&self, i: usize) -> &usize {
        &self.table[i]
    }
}
