use num_traits::{Float, FloatConst};
use rand::Rng;

use crate::dft::element::{Complex, Element};
use crate::dft::gf::Gf;

/// Finds a primitive 2n-th root of unity modulo P by random sampling.
/// Requires (P - 1) divisible by 2n; a candidate g = x^((P-1)/2n) is kept
/// when g^n == -1 and g^(2n) == 1. Returns (g, g_inv).
pub fn find_primitive_2nth_root_of_unity<const P: u64>(n: usize) -> Option<(Gf<P>, Gf<P>)> {
    let two_n = 2 * n as u64;
    if (P - 1) % two_n != 0 {
        return None;
    }
    let exponent = (P - 1) / two_n;
    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        let x = Gf::<P>::new(rng.gen_range(1..P));
        let g = x.pow(exponent);
        if g.pow(n as u64) == -Gf::one() && g.pow(two_n) == Gf::one() {
            if let Some(g_inv) = g.reciprocal() {
                return Some((g, g_inv));
            }
        }
    }
    None
}

/// Naive negacyclic polynomial multiplication over GF(P).
/// Interprets x^n = -1 and subtracts terms whose index wraps past n.
/// Reference oracle for the NTT-based multiplier tests.
#[inline]
pub fn naive_negacyclic<const P: u64>(a: &[Gf<P>], b: &[Gf<P>]) -> Vec<Gf<P>> {
    let n = a.len();
    let mut c = vec![Gf::zero(); n];

    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            let prod = ai * bj;
            let idx = i + j;
            if idx < n {
                c[idx] = c[idx] + prod;
            } else {
                c[idx - n] = c[idx - n] - prod;
            }
        }
    }
    c
}

/// Elementwise product of two vectors over GF(P), in place on `a`.
#[inline]
pub fn pointwise<const P: u64>(a: &mut [Gf<P>], b: &[Gf<P>]) {
    for (x, &y) in a.iter_mut().zip(b.iter()) {
        *x = *x * y;
    }
}

/// O(n²) discrete transform with ω = e^(2πj/n), the same root convention
/// as the radix-2 engine. Reference oracle for the FFT tests.
pub fn reference_dft<T: Float + FloatConst>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    let n = input.len();
    let mut output = vec![Complex::zero(); n];
    for (k, bin) in output.iter_mut().enumerate() {
        for (i, &x) in input.iter().enumerate() {
            let t = T::from(2 * ((i * k) % n)).unwrap() * T::PI() / T::from(n).unwrap();
            *bin = *bin + x * Complex::new(t.cos(), t.sin());
        }
    }
    output
}

/// Deterministic Miller–Rabin primality test for 64-bit integers.
/// The fixed base set is exact for every n < 2^64.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0u32;
    while d & 1 == 0 {
        d >>= 1;
        s += 1;
    }

    'witness: for a in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 0..s - 1 {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[inline(always)]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128) * (b as u128) % (m as u128)) as u64
}

#[inline]
fn pow_mod(base: u64, exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    let mut cur = base % m;
    let mut e = exp;
    while e > 0 {
        if (e & 1) == 1 {
            result = mul_mod(result, cur, m);
        }
        cur = mul_mod(cur, cur, m);
        e >>= 1;
    }
    result
}
