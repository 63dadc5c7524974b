use crate::dft::element::Element;
use crate::dft::fft::CooleyTukeyFft;
use crate::dft::gf::Gf;
use crate::dft::twiddle::NttTwiddles;
use crate::dft::util::{find_primitive_2nth_root_of_unity, is_prime_u64, pointwise};

/// NTT-based negacyclic polynomial multiplier over GF(P).
///
/// Computes `a(x)·b(x) mod (x^n + 1) mod P` with two forward NTTs, a
/// pointwise product and one inverse NTT. The inverse transform reuses the
/// forward twiddle table: running the forward butterfly network over the
/// pointwise product and then reading the result with reversed indices is
/// the inverse NTT up to the 1/n scale applied in the postprocess.
///
/// The negacyclic wrap is obtained with the phi trick: inputs are scaled
/// by powers of a primitive 2n-th root φ before the cyclic convolution and
/// outputs by powers of φ⁻¹ after it, avoiding a dedicated size-2n
/// transform.
#[derive(Debug, Clone)]
pub struct PolynomialMultiplier<const P: u64> {
    n: usize,
    fft: CooleyTukeyFft<NttTwiddles<P>>,
    /// phi[i] = φ^i
    phi: Vec<Gf<P>>,
    /// phi_inv[i] = φ^(-i)
    phi_inv: Vec<Gf<P>>,
    /// n^(-1) mod P, the inverse-transform scale
    inv_n: Gf<P>,
}

impl<const P: u64> PolynomialMultiplier<P> {
    /// Builds a multiplier for transform size `n` from a base root `g` of
    /// multiplicative order `m` (a multiple of n). The transform generator
    /// is g^(m/n) and φ is its square root.
    ///
    /// Returns `None` when P is not prime, `n` is not a power of two >= 2,
    /// `m` is not a multiple of n, 2n does not divide P - 1, or the derived
    /// generator does not have order exactly n.
    pub fn new(n: usize, g: u64, m: u64) -> Option<Self> {
        if !is_prime_u64(P) {
            return None;
        }
        if !n.is_power_of_two() || n < 2 {
            return None;
        }
        if m % n as u64 != 0 || (P - 1) % (2 * n as u64) != 0 {
            return None;
        }
        let generator = Gf::<P>::new(g).pow(m / n as u64);
        Self::from_generator(n, generator)
    }

    /// Builds a multiplier by searching for a primitive 2n-th root of
    /// unity, for callers that only know (P, n).
    pub fn with_params(n: usize) -> Option<Self> {
        if !is_prime_u64(P) || !n.is_power_of_two() || n < 2 {
            return None;
        }
        let (psi, _) = find_primitive_2nth_root_of_unity::<P>(n)?;
        Self::from_generator(n, psi * psi)
    }

    fn from_generator(n: usize, generator: Gf<P>) -> Option<Self> {
        // order exactly n
        if generator.pow(n as u64) != Gf::one() || generator.pow(n as u64 / 2) == Gf::one() {
            return None;
        }

        // Any square root of a primitive n-th root has order 2n; the sign
        // Tonelli–Shanks picks does not matter, both give the same product.
        let phi_root = generator.sqrt();
        if phi_root.pow(n as u64) != -Gf::<P>::one() {
            return None;
        }
        let phi_inv_root = phi_root.reciprocal()?;

        let mut phi = Vec::with_capacity(n);
        let mut phi_inv = Vec::with_capacity(n);
        let (mut f, mut b) = (Gf::<P>::one(), Gf::<P>::one());
        for _ in 0..n {
            phi.push(f);
            phi_inv.push(b);
            f = f * phi_root;
            b = b * phi_inv_root;
        }

        // General inverse of n; the n^(n-2) closed form only holds for
        // parameter sets where n^(n-1) ≡ 1 mod P.
        let inv_n = Gf::<P>::new(n as u64).reciprocal()?;
        debug_assert_eq!(Gf::<P>::new(n as u64) * inv_n, Gf::one());

        let w = NttTwiddles::new(n, generator)?;
        let fft = CooleyTukeyFft::with_table(n, w)?;

        Some(Self {
            n,
            fft,
            phi,
            phi_inv,
            inv_n,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn modulus(&self) -> u64 {
        P
    }

    /// Scales `a` by the φ powers and applies the forward NTT. The result
    /// is the pretransformed representation accepted by
    /// [`run_pretransformed`](Self::run_pretransformed); keep it around to
    /// multiply repeatedly against a fixed operand.
    pub fn forward(&self, a: &[Gf<P>]) -> Vec<Gf<P>> {
        assert_eq!(a.len(), self.n, "input length must equal transform size");
        let conv: Vec<Gf<P>> = a.iter().zip(&self.phi).map(|(&x, &p)| x * p).collect();
        let mut out = vec![Gf::zero(); self.n];
        self.fft.run(&conv, &mut out);
        out
    }

    /// Negacyclic product of the coefficient vectors `a` and `b`.
    pub fn run(&self, a: &[Gf<P>], b: &[Gf<P>]) -> Vec<Gf<P>> {
        self.run_pretransformed(&self.forward(a), b)
    }

    /// Like [`run`](Self::run), with `fa` already pretransformed by
    /// [`forward`](Self::forward).
    pub fn run_pretransformed(&self, fa: &[Gf<P>], b: &[Gf<P>]) -> Vec<Gf<P>> {
        let n = self.n;
        assert_eq!(fa.len(), n, "input length must equal transform size");
        let fb = self.forward(b);

        let mut multiplied = fa.to_vec();
        pointwise(&mut multiplied, &fb);
        let mut convoluted = vec![Gf::zero(); n];
        self.fft.run(&multiplied, &mut convoluted);

        // Reversed read realizes the inverse transform; inv_n and the
        // φ^(-i) factors undo the forward scale and the phi preprocess.
        let mut output = vec![Gf::zero(); n];
        output[0] = convoluted[0] * self.inv_n * self.phi_inv[0];
        for i in 1..n {
            output[i] = convoluted[n - i] * self.inv_n * self.phi_inv[i];
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dft::util::naive_negacyclic;
    use rand::Rng;

    fn gf_vec<const P: u64>(values: &[u64]) -> Vec<Gf<P>> {
        values.iter().map(|&v| Gf::new(v)).collect()
    }

    #[test]
    fn regression_n8_p337() {
        // fixed vectors, cross-checked against the naive negacyclic product
        let mp = PolynomialMultiplier::<337>::new(8, 85, 8).unwrap();
        let a = gf_vec::<337>(&[19, 112, 123, 72, 283, 335, 180, 334]);
        let b = gf_vec::<337>(&[272, 191, 83, 127, 76, 135, 304, 325]);

        let out = mp.run(&a, &b);
        let values: Vec<u64> = out.iter().map(|x| x.value()).collect();
        assert_eq!(values, [278, 197, 16, 7, 258, 287, 209, 209]);

        assert_eq!(out, naive_negacyclic(&a, &b));
    }

    #[test]
    fn matches_naive_negacyclic_998244353() {
        const Q: u64 = 998244353;
        let mut rng = rand::thread_rng();
        for n in [8usize, 64, 256] {
            let mp = PolynomialMultiplier::<Q>::new(n, 15311432, 1 << 23).unwrap();
            let a: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();
            let b: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();

            assert_eq!(mp.run(&a, &b), naive_negacyclic(&a, &b), "n = {n}");
        }
    }

    #[test]
    fn pretransformed_equals_run() {
        const Q: u64 = 7681;
        let n = 16usize;
        let mp = PolynomialMultiplier::<Q>::with_params(n).unwrap();

        let mut rng = rand::thread_rng();
        let a: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();
        let fa = mp.forward(&a);

        for _ in 0..4 {
            let b: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();
            assert_eq!(mp.run_pretransformed(&fa, &b), mp.run(&a, &b));
        }
    }

    #[test]
    fn with_params_matches_naive() {
        const Q: u64 = 7681;
        let n = 32usize;
        let mp = PolynomialMultiplier::<Q>::with_params(n).unwrap();
        let mut rng = rand::thread_rng();
        let a: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();
        let b: Vec<Gf<Q>> = (0..n).map(|_| Gf::new(rng.gen_range(0..Q))).collect();
        assert_eq!(mp.run(&a, &b), naive_negacyclic(&a, &b));
    }

    #[test]
    fn multiply_by_one_is_identity() {
        let mp = PolynomialMultiplier::<337>::new(8, 85, 8).unwrap();
        let a = gf_vec::<337>(&[5, 0, 11, 0, 0, 336, 2, 77]);
        let mut one = vec![Gf::<337>::zero(); 8];
        one[0] = Gf::one();
        assert_eq!(mp.run(&a, &one), a);
    }

    #[test]
    fn construction_rejects_bad_parameters() {
        // composite modulus
        assert!(PolynomialMultiplier::<15>::new(4, 2, 4).is_none());
        // size not a power of two / too small
        assert!(PolynomialMultiplier::<337>::new(6, 85, 8).is_none());
        assert!(PolynomialMultiplier::<337>::new(1, 85, 8).is_none());
        // m not a multiple of n
        assert!(PolynomialMultiplier::<337>::new(8, 85, 12).is_none());
        // 2n does not divide P - 1 (337 - 1 = 336 = 16·21)
        assert!(PolynomialMultiplier::<337>::new(32, 85, 32).is_none());
        // g of wrong order: 336 has order 2, so gen = 336^(8/8) is not order 8
        assert!(PolynomialMultiplier::<337>::new(8, 336, 8).is_none());
    }
}
