use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular};

/// Source of the random draws used by the timeline simulation.
pub trait DurationSampler {
    fn triangular(&mut self, min: f64, mode: f64, max: f64) -> f64;
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;
    /// Draw from `[min, max)`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;
    /// Returns true with the given probability.
    fn occurs(&mut self, probability: f64) -> bool;
}

pub struct RandomSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DurationSampler for RandomSampler<R> {
    fn triangular(&mut self, min: f64, mode: f64, max: f64) -> f64 {
        if max - min < f64::EPSILON {
            return min;
        }
        match Triangular::new(min, max, mode) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(_) => mode.clamp(min, max),
        }
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max - min < f64::EPSILON {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn occurs(&mut self, probability: f64) -> bool {
        self.rng.r#gen::<f64>() < probability
    }
}
