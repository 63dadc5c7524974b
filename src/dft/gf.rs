use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::dft::element::Element;

/// A value of GF(P), held in `[0, P)` after every operation.
///
/// Products are widened to u128 before reduction, so any prime `P < 2^64`
/// is safe against intermediate overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf<const P: u64> {
    value: u64,
}

impl<const P: u64> Gf<P> {
    #[inline(always)]
    pub fn new(value: u64) -> Self {
        Self { value: value % P }
    }

    #[inline(always)]
    pub fn value(self) -> u64 {
        self.value
    }

    /// self^exp mod P by square-and-multiply. `pow(_, 0) == 1`.
    #[inline]
    pub fn pow(self, exp: u64) -> Self {
        let mut result = Self::new(1);
        let mut base = self;
        let mut e = exp;
        while e > 0 {
            if (e & 1) == 1 {
                result = result * base;
            }
            base = base * base;
            e >>= 1;
        }
        result
    }

    /// Multiplicative inverse via the signed extended Euclidean algorithm
    /// over (value, P). `None` for zero; any other value is invertible
    /// because P is prime.
    #[inline]
    pub fn reciprocal(self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }
        let (_, x, _) = extended_gcd(self.value as i128, P as i128);
        let mut x = x % P as i128;
        if x < 0 {
            x += P as i128;
        }
        Some(Self { value: x as u64 })
    }

    /// One of the two square roots of `self`, by the Tonelli–Shanks
    /// algorithm. `sqrt(0) == 0`, `sqrt(1) == 1`; no canonical sign is
    /// chosen between the two roots.
    ///
    /// The caller must supply a quadratic residue; the residue property is
    /// not verified and a non-residue input yields an incorrect value.
    pub fn sqrt(self) -> Self {
        if self.value == 0 || self.value == 1 {
            return self;
        }

        // P - 1 = q * 2^s with q odd
        let mut q = P - 1;
        let mut s = 0u32;
        while q & 1 == 0 {
            q >>= 1;
            s += 1;
        }
        if s == 1 {
            // P ≡ 3 (mod 4)
            return self.pow((P + 1) / 4);
        }

        // smallest quadratic non-residue, by Euler's criterion
        let mut z = Self::new(2);
        while z.pow((P - 1) / 2).value != P - 1 {
            z = z + Self::new(1);
        }

        let mut c = z.pow(q);
        let mut t = self.pow(q);
        let mut r = self.pow((q + 1) / 2);
        let mut m = s;

        while t.value != 1 {
            // least i with t^(2^i) == 1
            let mut i = 0u32;
            let mut t2 = t;
            while t2.value != 1 {
                t2 = t2 * t2;
                i += 1;
            }
            let b = c.pow(1u64 << (m - i - 1));
            c = b * b;
            t = t * c;
            r = r * b;
            m = i;
        }
        r
    }
}

impl<const P: u64> Add for Gf<P> {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // widened so the sum cannot wrap for P close to 2^64
        let s = self.value as u128 + rhs.value as u128;
        Self {
            value: if s >= P as u128 { (s - P as u128) as u64 } else { s as u64 },
        }
    }
}

impl<const P: u64> Sub for Gf<P> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: if self.value >= rhs.value {
                self.value - rhs.value
            } else {
                (self.value as u128 + P as u128 - rhs.value as u128) as u64
            },
        }
    }
}

impl<const P: u64> Mul for Gf<P> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let prod = (self.value as u128) * (rhs.value as u128);
        Self {
            value: (prod % (P as u128)) as u64,
        }
    }
}

impl<const P: u64> Div for Gf<P> {
    type Output = Self;
    /// Multiplies by the reciprocal. Panics on a zero divisor.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.reciprocal().expect("division by zero in GF(P)")
    }
}

impl<const P: u64> Neg for Gf<P> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            value: if self.value == 0 { 0 } else { P - self.value },
        }
    }
}

impl<const P: u64> Element for Gf<P> {
    #[inline(always)]
    fn zero() -> Self {
        Self { value: 0 }
    }
    #[inline(always)]
    fn one() -> Self {
        Self::new(1)
    }
    #[inline(always)]
    fn recip(self) -> Option<Self> {
        self.reciprocal()
    }
}

/// Extended GCD on (r0, r1); returns (gcd, s0, t0) with gcd = r0*s0 + r1*t0.
#[inline]
fn extended_gcd(mut r0: i128, mut r1: i128) -> (i128, i128, i128) {
    let (mut s0, mut s1) = (1i128, 0i128);
    let (mut t0, mut t1) = (0i128, 1i128);

    while r1 != 0 {
        let quot = r0 / r1;

        let next_r = r0 - quot * r1;
        r0 = r1;
        r1 = next_r;

        let next_s = s0 - quot * s1;
        s0 = s1;
        s1 = next_s;

        let next_t = t0 - quot * t1;
        t0 = t1;
        t1 = next_t;
    }
    (r0, s0, t0)
}

#[cfg(test)]
mod tests {
    use super::*;

    type F337 = Gf<337>;
    type F7681 = Gf<7681>;

    #[test]
    fn arithmetic_stays_reduced() {
        let a = F337::new(336);
        let b = F337::new(335);
        assert_eq!((a + b).value(), 334);
        assert_eq!((b - a).value(), 336);
        assert_eq!((a * b).value(), 2);
        assert_eq!((-F337::new(0)).value(), 0);
        assert_eq!((-a).value(), 1);
    }

    #[test]
    fn arithmetic_near_u64_boundary() {
        // largest 64-bit prime, 2^64 - 59; add/sub intermediates exceed u64
        const BIG: u64 = 18446744073709551557;
        type F = Gf<BIG>;

        let a = F::new(BIG - 1);
        let b = F::new(BIG - 2);
        assert_eq!((a + a).value(), BIG - 2);
        assert_eq!((a + b).value(), BIG - 3);
        assert_eq!((b - a).value(), BIG - 1);
        assert_eq!((F::new(0) - F::new(1)).value(), BIG - 1);
        assert_eq!(a * a, F::new(1));
        assert_eq!((-a).value(), 1);

        let r = b.reciprocal().expect("nonzero must invert");
        assert_eq!(b * r, F::new(1));
    }

    #[test]
    fn pow_basics() {
        let a = F337::new(85);
        assert_eq!(a.pow(0), F337::new(1));
        assert_eq!(a.pow(1), a);
        // 85 has order 8 mod 337
        assert_eq!(a.pow(8), F337::new(1));
        assert_eq!(a.pow(4), F337::new(336));
    }

    #[test]
    fn reciprocal_all_nonzero() {
        for v in 1..337u64 {
            let a = F337::new(v);
            let r = a.reciprocal().expect("nonzero must invert");
            assert_eq!(a * r, F337::new(1), "inverse wrong for {v}");
        }
        assert_eq!(F337::new(0).reciprocal(), None);
    }

    #[test]
    fn extended_gcd_identity() {
        let (g, x, y) = extended_gcd(30, 18);
        assert_eq!(g, 6);
        assert_eq!(30 * x + 18 * y, 6);
    }

    #[test]
    fn sqrt_all_residues_337() {
        // 337 ≡ 1 (mod 4), exercises the full Tonelli–Shanks loop
        for v in 0..337u64 {
            let a = F337::new(v);
            if v > 1 && a.pow((337 - 1) / 2).value() != 1 {
                continue;
            }
            let r = a.sqrt();
            assert_eq!(r * r, a, "sqrt wrong for {v}");
        }
    }

    #[test]
    fn sqrt_all_residues_7681() {
        for v in 0..7681u64 {
            let a = F7681::new(v);
            if v > 1 && a.pow((7681 - 1) / 2).value() != 1 {
                continue;
            }
            let r = a.sqrt();
            assert_eq!(r * r, a, "sqrt wrong for {v}");
        }
    }

    #[test]
    fn sqrt_p_3_mod_4() {
        // 19 ≡ 3 (mod 4) takes the (P+1)/4 shortcut
        for v in 0..19u64 {
            let a = Gf::<19>::new(v);
            if v > 1 && a.pow(9).value() != 1 {
                continue;
            }
            let r = a.sqrt();
            assert_eq!(r * r, a);
        }
    }

    #[test]
    fn division() {
        let a = F337::new(100);
        let b = F337::new(7);
        assert_eq!(a / b * b, a);
    }
}
