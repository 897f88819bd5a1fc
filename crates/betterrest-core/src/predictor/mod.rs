//! Sleep-need predictors.
//!
//! The estimator only knows the [`Predictor`] trait. Concrete models live
//! in the submodules; anything else (a lookup table, a remote model) can be
//! plugged in by implementing the trait or wrapping a closure in
//! [`FnPredictor`].

mod artifact;
mod linear;

pub use artifact::ArtifactPredictor;
pub use linear::{FeatureDomain, LinearModel};

use crate::error::PredictionError;
use crate::inputs::PredictionInput;

/// Maps (wake seconds, desired sleep hours, coffee cups) to the hours of
/// sleep actually needed.
pub trait Predictor: Send + Sync {
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        (**self).predict(input)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        (**self).predict(input)
    }
}

/// Adapts a closure into a [`Predictor`].
pub struct FnPredictor<F>(F);

impl<F> FnPredictor<F>
where
    F: Fn(&PredictionInput) -> Result<f64, PredictionError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&PredictionInput) -> Result<f64, PredictionError> + Send + Sync,
{
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        (self.0)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PredictionInput {
        PredictionInput {
            wake: 25_200.0,
            estimated_sleep: 8.0,
            coffee: 1.0,
        }
    }

    #[test]
    fn closure_predictor_receives_input() {
        let p = FnPredictor::new(|i: &PredictionInput| Ok(i.estimated_sleep - 0.5));
        assert_eq!(p.predict(&input()).unwrap(), 7.5);
    }

    #[test]
    fn boxed_and_borrowed_predictors_delegate() {
        let boxed: Box<dyn Predictor> = Box::new(FnPredictor::new(|_: &PredictionInput| Ok(6.0)));
        assert_eq!(boxed.predict(&input()).unwrap(), 6.0);
        let borrowed = &boxed;
        assert_eq!(borrowed.predict(&input()).unwrap(), 6.0);
    }
}
