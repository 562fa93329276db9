// Non-negative matrix factorization.
//
// Approximates a documents x terms matrix X as W * H, with W (documents x
// topics) and H (topics x terms) both non-negative, by minimizing the
// Frobenius reconstruction error with multiplicative updates:
//
//   W <- W * (X Hᵀ) / (W H Hᵀ)
//   H <- H * (Wᵀ X) / (Wᵀ W H)
//
// Both factors start from uniform noise scaled by sqrt(mean(X) / k), drawn
// from a seeded StdRng, so a given input and seed always produce the same
// factors. Every 10 rounds the error is checked; the loop stops when the
// improvement relative to the starting error falls below `tolerance`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::matrix::Matrix;
use crate::error::{AnalyticsError, Result};

const CONVERGENCE_CHECK_INTERVAL: usize = 10;

/// Factorization settings.
#[derive(Debug, Clone)]
pub struct Nmf {
    pub components: usize,
    pub max_iter: usize,
    pub tolerance: f64,
    pub seed: u64,
}

/// Result of fitting: the two factors plus convergence details.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// Documents x components
    pub doc_topic: Matrix,
    /// Components x terms
    pub topic_term: Matrix,
    pub iterations: usize,
    pub reconstruction_error: f64,
}

impl Nmf {
    pub fn new(components: usize, seed: u64) -> Self {
        Self {
            components,
            max_iter: 200,
            tolerance: 1e-4,
            seed,
        }
    }

    /// Factor `x` into `components` non-negative topics.
    pub fn fit(&self, x: &Matrix) -> Result<Factorization> {
        let k = self.components;
        if k == 0 {
            return Err(AnalyticsError::config("component count must be positive"));
        }
        if x.rows() < k {
            return Err(AnalyticsError::insufficient(format!(
                "{} documents cannot support {k} topics",
                x.rows()
            )));
        }
        if x.values().iter().any(|v| *v < 0.0 || !v.is_finite()) {
            return Err(AnalyticsError::config(
                "factorization input must be finite and non-negative",
            ));
        }
        let mean = x.mean();
        if mean <= 0.0 {
            return Err(AnalyticsError::insufficient("document-term matrix is all zeros"));
        }

        let scale = (mean / k as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut h = random_matrix(&mut rng, k, x.cols(), scale);
        let mut w = random_matrix(&mut rng, x.rows(), k, scale);

        let initial_error = reconstruction_error(x, &w, &h);
        let mut previous_error = initial_error;
        let mut iterations = 0;

        for iter in 1..=self.max_iter {
            iterations = iter;
            update_w(x, &mut w, &h);
            update_h(x, &w, &mut h);

            if self.tolerance > 0.0 && iter % CONVERGENCE_CHECK_INTERVAL == 0 {
                let error = reconstruction_error(x, &w, &h);
                if (previous_error - error) / initial_error < self.tolerance {
                    break;
                }
                previous_error = error;
            }
        }

        let error = reconstruction_error(x, &w, &h);
        debug!(
            components = k,
            iterations,
            error,
            "NMF converged"
        );

        Ok(Factorization {
            doc_topic: w,
            topic_term: h,
            iterations,
            reconstruction_error: error,
        })
    }
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize, scale: f64) -> Matrix {
    let mut m = Matrix::zeros(rows, cols);
    for r in 0..rows {
        for value in m.row_mut(r) {
            *value = scale * rng.random::<f64>();
        }
    }
    m
}

fn update_w(x: &Matrix, w: &mut Matrix, h: &Matrix) {
    let numerator = x.mul_transpose(h); // n x k
    let hht = h.mul_transpose(h); // k x k
    let denominator = w.mul(&hht); // n x k
    apply_ratio(w, &numerator, &denominator);
}

fn update_h(x: &Matrix, w: &Matrix, h: &mut Matrix) {
    let numerator = w.transpose_mul(x); // k x m
    let wtw = w.transpose_mul(w); // k x k
    let denominator = wtw.mul(h); // k x m
    apply_ratio(h, &numerator, &denominator);
}

fn apply_ratio(target: &mut Matrix, numerator: &Matrix, denominator: &Matrix) {
    for r in 0..target.rows() {
        let num = numerator.row(r);
        let den = denominator.row(r);
        for ((value, n), d) in target.row_mut(r).iter_mut().zip(num).zip(den) {
            *value *= n / (d + f64::EPSILON);
        }
    }
}

/// ||X - W H|| (Frobenius)
fn reconstruction_error(x: &Matrix, w: &Matrix, h: &Matrix) -> f64 {
    let approx = w.mul(h);
    x.values()
        .iter()
        .zip(approx.values())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}
