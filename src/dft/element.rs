use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Float;

/// Arithmetic capability set shared by the transform element kinds.
///
/// Both the complex floating-point element and the finite-field element
/// implement this; the butterfly network only ever needs add, sub, mul
/// and the identities, while `recip` backs division and the inverse-table
/// construction.
pub trait Element:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Multiplicative inverse. `None` for the additive identity.
    fn recip(self) -> Option<Self>;
}

/// Complex number over a real scalar `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    #[inline(always)]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// re^2 + im^2
    #[inline(always)]
    pub fn abs_squared(self) -> T {
        self.re * self.re + self.im * self.im
    }

    #[inline(always)]
    pub fn abs(self) -> T {
        self.abs_squared().sqrt()
    }
}

impl<T: Float> Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Float> Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Float> Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<T: Float> Div for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        let d = rhs.abs_squared();
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / d,
            (self.im * rhs.re - self.re * rhs.im) / d,
        )
    }
}

impl<T: Float> Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl<T: Float> Element for Complex<T> {
    #[inline(always)]
    fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }
    #[inline(always)]
    fn one() -> Self {
        Self::new(T::one(), T::zero())
    }
    #[inline(always)]
    fn recip(self) -> Option<Self> {
        let d = self.abs_squared();
        if d == T::zero() {
            return None;
        }
        Some(Self::new(self.re / d, -self.im / d))
    }
}
