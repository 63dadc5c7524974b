pub mod element;
pub mod fft;
pub mod gf;
pub mod polymul;
pub mod twiddle;
pub mod util;

/// A length-preserving transform from an input sequence to an output sequence.
///
/// Both slices must have the engine's configured length.
pub trait Transform<E> {
    fn run(&self, input: &[E], output: &mut [E]);
}
