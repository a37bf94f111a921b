//! Point-evaluation trait and external function leaves.
//!
//! [`NoiseFn`] is the contract every sampler exposes: a pure function of a 3D coordinate.
//! Callers plug their own fields into a graph by wrapping them in an [`ExternalFn`].
use std::fmt;
use std::sync::Arc;

/// A scalar field sampled at 3D coordinates.
///
/// Implementations must be pure: the same coordinate always yields the same value, no matter
/// which thread asks.
pub trait NoiseFn: Send + Sync {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<F> NoiseFn for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

/// Shared handle to a caller-defined [`NoiseFn`], usable as a generator leaf.
#[derive(Clone)]
pub struct ExternalFn(Arc<dyn NoiseFn>);

impl ExternalFn {
    /// Wraps `function` in a shareable handle.
    pub fn new<F>(function: F) -> Self
    where
        F: NoiseFn + 'static,
    {
        Self(Arc::new(function))
    }

    /// Wraps an already shared function.
    pub fn from_arc(function: Arc<dyn NoiseFn>) -> Self {
        Self(function)
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.0.sample(x, y, z)
    }
}

impl fmt::Debug for ExternalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalFn(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_noise_functions() {
        let f = |x: f64, y: f64, z: f64| x + 2.0 * y + 3.0 * z;
        assert_eq!(f.sample(1.0, 1.0, 1.0), 6.0);
    }

    #[test]
    fn external_fn_delegates_to_wrapped_function() {
        let ext = ExternalFn::new(|x: f64, _y: f64, _z: f64| x * 10.0);
        let clone = ext.clone();
        assert_eq!(ext.sample(0.5, 0.0, 0.0), 5.0);
        assert_eq!(clone.sample(0.25, 0.0, 0.0), 2.5);
        assert_eq!(format!("{ext:?}"), "ExternalFn(..)");
    }
}
