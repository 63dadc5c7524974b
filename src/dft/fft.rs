use num_traits::{Float, FloatConst};

use crate::dft::element::{Complex, Element};
use crate::dft::twiddle::{BitReverse, FftTwiddles, TwiddleTable};
use crate::dft::Transform;

/// Radix-2 decimation-in-time Cooley–Tukey transform engine.
///
/// Owns its twiddle-factor table `W` and the bit-reversal permutation;
/// both are built once at construction and read-only afterwards, so a
/// single engine can serve concurrent callers. The element kind is fixed
/// by the table: complex twiddles give the floating FFT, generator-power
/// tables over GF(P) give the NTT.
#[derive(Debug, Clone)]
pub struct CooleyTukeyFft<W> {
    n: usize,
    stages: usize,
    w: W,
    bitrev: BitReverse,
}

impl<W> CooleyTukeyFft<W> {
    /// Wraps a caller-supplied twiddle table. `n` must be a power of two,
    /// at least 2, and match the table size.
    pub fn with_table<E>(n: usize, w: W) -> Option<Self>
    where
        W: TwiddleTable<E>,
    {
        if !n.is_power_of_two() || n < 2 || w.size() != n {
            return None;
        }
        let bitrev = BitReverse::new(n)?;
        Some(Self {
            n,
            stages: n.trailing_zeros() as usize,
            w,
            bitrev,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn stages(&self) -> usize {
        self.stages
    }

    #[inline(always)]
    pub fn twiddles(&self) -> &W {
        &self.w
    }

    /// Forward transform: `output[k] = Σ input[i]·ω^(ik)`.
    ///
    /// No 1/n normalization is applied; an inverse transform is an engine
    /// built on the reciprocal (conjugate) root plus caller-side scaling.
    /// Panics if either slice length differs from the configured n.
    pub fn run<E>(&self, input: &[E], output: &mut [E])
    where
        E: Element,
        W: TwiddleTable<E>,
    {
        let n = self.n;
        assert_eq!(input.len(), n, "input length must equal transform size");
        assert_eq!(output.len(), n, "output length must equal transform size");

        // decimation-in-time ordering
        let mut cur = Vec::with_capacity(n);
        for i in 0..n {
            cur.push(input[self.bitrev[i]]);
        }
        let mut next = vec![E::zero(); n];

        for stage in 0..self.stages {
            let block_size = 1usize << (stage + 1);
            let half = block_size / 2;
            let last = stage == self.stages - 1;
            let dst: &mut [E] = if last { &mut *output } else { &mut next };

            for block in 0..n / block_size {
                let block_offset = block * block_size;
                for i in 0..half {
                    let index_0 = block_offset + i;
                    let index_1 = index_0 + half;

                    let a = cur[index_0];
                    let b = cur[index_1] * self.w.get(i * n / block_size);
                    dst[index_0] = a + b;
                    dst[index_1] = a - b;
                }
            }
            if !last {
                std::mem::swap(&mut cur, &mut next);
            }
        }
    }
}

impl<T: Float + FloatConst> CooleyTukeyFft<FftTwiddles<T>> {
    /// Complex FFT engine with the forward root ω = e^(2πj/n).
    pub fn complex_forward(n: usize) -> Option<Self> {
        Self::with_table(n, FftTwiddles::new(n, false)?)
    }

    /// Complex engine on the conjugate root; together with a caller-side
    /// 1/n scaling this realizes the inverse FFT.
    pub fn complex_inverse(n: usize) -> Option<Self> {
        Self::with_table(n, FftTwiddles::new(n, true)?)
    }
}

impl<E, W> Transform<E> for CooleyTukeyFft<W>
where
    E: Element,
    W: TwiddleTable<E>,
{
    #[inline(always)]
    fn run(&self, input: &[E], output: &mut [E]) {
        CooleyTukeyFft::run(self, input, output)
    }
}
