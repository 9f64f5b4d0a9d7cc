use crate::backend::{Backend, Scalar};

/// Signed margins beyond this magnitude use the linear/saturated regimes
/// instead of evaluating `exp` directly.
pub const MARGIN_CUTOFF: f64 = 35.0;

/// A differentiable loss over the signed margin of one labeled pair.
///
/// For a pair with bipolar target `y ∈ {+1, -1}` and raw margin
/// `s = w·dx + b`, the signed margin is `z = y * s`. Implementors define:
/// - the per-pair loss value (for epoch diagnostics), and
/// - the sigmoid term of the gradient, i.e. the probability mass on the
///   wrong side of the decision boundary.
///
/// The trainer turns the sigmoid term into the gradient scale `-y * sig`,
/// which the model's `backward()` maps to parameter gradients.
pub trait PairwiseLoss<B: Backend> {
    /// Computes the per-pair loss value for a signed margin.
    fn loss(&self, margin: &Scalar<B>) -> Scalar<B>;

    /// Computes the gradient's sigmoid term for a signed margin.
    fn sigmoid_term(&self, margin: &Scalar<B>) -> Scalar<B>;
}

/// Pairwise logistic (Bradley-Terry) loss: `L(z) = log(1 + exp(-z))`.
///
/// Uses a three-regime formulation to avoid floating-point overflow in
/// `exp` at extreme margins while preserving the exact function in the
/// safe region:
///
/// - `z > 35`: the target is already confidently satisfied; loss and
///   sigmoid term are both `0`.
/// - `z < -35`: the linear regime; loss is `-z` and the sigmoid term is
///   `1` (maximally wrong).
/// - otherwise: `L = log1p(exp(-z))`, sigmoid term `1 / (1 + exp(z))`,
///   which is `sigmoid(-z)`.
pub struct PairwiseLogisticLoss;

impl<B: Backend> PairwiseLoss<B> for PairwiseLogisticLoss {
    fn loss(&self, margin: &Scalar<B>) -> Scalar<B> {
        let z = margin.to_f64();
        let ell = if z > MARGIN_CUTOFF {
            0.0
        } else if z < -MARGIN_CUTOFF {
            -z
        } else {
            (-z).exp().ln_1p()
        };
        Scalar::new(ell)
    }

    fn sigmoid_term(&self, margin: &Scalar<B>) -> Scalar<B> {
        let z = margin.to_f64();
        let sig = if z > MARGIN_CUTOFF {
            0.0
        } else if z < -MARGIN_CUTOFF {
            1.0
        } else {
            // sigmoid(-z)
            1.0 / (1.0 + z.exp())
        };
        Scalar::new(sig)
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn terms(z: f64) -> (f64, f64) {
        let loss = PairwiseLogisticLoss;
        let z = Scalar::<CpuBackend>::new(z);
        (
            PairwiseLoss::<CpuBackend>::loss(&loss, &z).to_f64(),
            PairwiseLoss::<CpuBackend>::sigmoid_term(&loss, &z).to_f64(),
        )
    }

    #[test]
    fn test_zero_margin() {
        let (ell, sig) = terms(0.0);
        assert!((ell - std::f64::consts::LN_2).abs() < 1e-15);
        assert_eq!(sig, 0.5);
    }

    #[test]
    fn test_safe_region_matches_naive_formula() {
        for z in [-30.0, -5.0, -0.1, 0.7, 10.0, 34.9] {
            let (ell, sig) = terms(z);
            assert!((ell - (1.0 + (-z).exp()).ln()).abs() < 1e-12);
            assert!((sig - 1.0 / (1.0 + z.exp())).abs() < 1e-15);
        }
    }

    #[test]
    fn test_confident_margin_saturates() {
        let (ell, sig) = terms(100.0);
        assert_eq!(ell, 0.0);
        assert_eq!(sig, 0.0);
    }

    #[test]
    fn test_wrong_margin_is_linear() {
        let (ell, sig) = terms(-100.0);
        assert_eq!(ell, 100.0);
        assert_eq!(sig, 1.0);
    }

    #[test]
    fn test_numerical_stability() {
        // Magnitudes that would overflow a naive exp(-z)
        for z in [-1e6, -750.0, 750.0, 1e6] {
            let (ell, sig) = terms(z);
            assert!(ell.is_finite());
            assert!(sig.is_finite());
        }
    }

    #[test]
    fn test_cutoff_boundary_uses_safe_formula() {
        // Exactly +/-35 falls in the safe region; exp(35) is well inside f64 range.
        let (ell_hi, sig_hi) = terms(MARGIN_CUTOFF);
        assert!(ell_hi > 0.0 && ell_hi < 1e-14);
        assert!(sig_hi > 0.0 && sig_hi < 1e-14);

        let (ell_lo, sig_lo) = terms(-MARGIN_CUTOFF);
        assert!((ell_lo - 35.0).abs() < 1e-12);
        assert!((sig_lo - 1.0).abs() < 1e-12);
    }
}
