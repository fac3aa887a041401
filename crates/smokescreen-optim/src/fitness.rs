//! The objective the swarm maximizes.

/// Scalar fitness of a coordinate vector. Larger is better.
///
/// Must be safe to call from several threads at once: with
/// `OptimizerConfig::parallel` set, a whole swarm is scored concurrently.
pub trait Fitness: Sync {
    fn evaluate(&self, params: &[f64]) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, params: &[f64]) -> f64 {
        self(params)
    }
}

/// Map non-finite scores to the lowest finite value so comparisons and the
/// Metropolis rule stay well defined.
pub(crate) fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        f64::MIN
    }
}
