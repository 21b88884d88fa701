use rand::Rng;

/// Swaps the voiced source for white noise.
///
/// The F0 track is discarded wholesale: every frame gets an independent
/// uniform draw on `[0, 1)`, so no periodic excitation survives synthesis.
pub struct ExcitationReplacer;

impl ExcitationReplacer {
    pub fn replace<R: Rng + ?Sized>(excitation: &[f64], rng: &mut R) -> Vec<f64> {
        excitation.iter().map(|_| rng.gen::<f64>()).collect()
    }
}
