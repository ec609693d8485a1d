// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kronecker-product lifting into the Liouville space.
//!
//! The density matrix is vectorized column-stacked: vec(ρ)[j·d + i] = ρ_ij,
//! so vec(AρB) = (Bᵀ ⊗ A)·vec(ρ). Under that convention
//!
//!   −i[H, ρ]  ↦  −i(I ⊗ H) + i(Hᵀ ⊗ I)
//!   D[L](ρ)   ↦  (L̄ ⊗ L) − ½(I ⊗ L†L) − ½((L†L)ᵀ ⊗ I)
//!
//! Qubit 0 is the leftmost (most significant) tensor factor of the Hilbert
//! space, so the computational-basis index of |q₀ q₁ … q_{N−1}⟩ reads the
//! qubits as binary digits from the left.

use ndarray::linalg::kron;
use ndarray::Array2;
use num_complex::Complex64;

/// Complex identity matrix.
pub fn identity(n: usize) -> Array2<Complex64> {
    Array2::eye(n)
}

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Embed a 2×2 operator on `qubit` of an `num_qubits`-qubit register:
/// I ⊗ … ⊗ op ⊗ … ⊗ I.
pub fn embed(op: &Array2<Complex64>, qubit: usize, num_qubits: usize) -> Array2<Complex64> {
    debug_assert!(qubit < num_qubits);
    let left = identity(1 << qubit);
    let right = identity(1 << (num_qubits - qubit - 1));
    kron(&kron(&left, op), &right)
}

/// Lift a Hilbert-space Hamiltonian term into the commutator superoperator
/// −i(I ⊗ H) + i(Hᵀ ⊗ I).
pub fn lift_hamiltonian(h: &Array2<Complex64>) -> Array2<Complex64> {
    let d = h.nrows();
    let eye = identity(d);
    let i = Complex64::new(0.0, 1.0);
    kron(&eye, h) * (-i) + kron(&h.t(), &eye) * i
}

/// Lift a collapse operator into its Lindblad dissipator superoperator.
/// The rate is carried by the operator itself (L = √κ·σ).
pub fn lift_dissipator(l: &Array2<Complex64>) -> Array2<Complex64> {
    let d = l.nrows();
    let eye = identity(d);
    let half = Complex64::new(0.5, 0.0);
    let l_conj = l.mapv(|z| z.conj());
    let ldl = dagger(l).dot(l);
    kron(&l_conj, l) - kron(&eye, &ldl) * half - kron(&ldl.t(), &eye) * half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::PauliOp;
    use approx::assert_abs_diff_eq;
    use ndarray::Array1;

    fn vectorize(rho: &Array2<Complex64>) -> Array1<Complex64> {
        let d = rho.nrows();
        Array1::from_shape_fn(d * d, |k| rho[[k % d, k / d]])
    }

    fn unvectorize(v: &Array1<Complex64>, d: usize) -> Array2<Complex64> {
        Array2::from_shape_fn((d, d), |(i, j)| v[j * d + i])
    }

    fn assert_matrix_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for ((i, j), val) in a.indexed_iter() {
            let diff = (val - b[[i, j]]).norm();
            assert!(diff < tol, "mismatch at ({i}, {j}): {val:?} vs {:?}", b[[i, j]]);
        }
    }

    #[test]
    fn test_embed_places_operator_on_correct_qubit() {
        // Z on qubit 1 of 2: I ⊗ Z = diag(1, −1, 1, −1).
        let z1 = embed(&PauliOp::Z.matrix(), 1, 2);
        let expected = [1.0, -1.0, 1.0, -1.0];
        for (i, want) in expected.iter().enumerate() {
            assert_abs_diff_eq!(z1[[i, i]].re, *want);
        }
        // Z on qubit 0 of 2: Z ⊗ I = diag(1, 1, −1, −1).
        let z0 = embed(&PauliOp::Z.matrix(), 0, 2);
        let expected = [1.0, 1.0, -1.0, -1.0];
        for (i, want) in expected.iter().enumerate() {
            assert_abs_diff_eq!(z0[[i, i]].re, *want);
        }
    }

    #[test]
    fn test_lift_hamiltonian_matches_commutator() {
        // Apply the lifted superoperator to vec(ρ) and compare against the
        // dense commutator −i[H, ρ].
        let h = PauliOp::X.matrix() * Complex64::new(0.7, 0.0);
        let sup = lift_hamiltonian(&h);

        let mut rho = Array2::zeros((2, 2));
        rho[[0, 0]] = Complex64::new(0.25, 0.0);
        rho[[0, 1]] = Complex64::new(0.1, 0.2);
        rho[[1, 0]] = Complex64::new(0.1, -0.2);
        rho[[1, 1]] = Complex64::new(0.75, 0.0);

        let lifted = unvectorize(&sup.dot(&vectorize(&rho)), 2);
        let minus_i = Complex64::new(0.0, -1.0);
        let commutator = (h.dot(&rho) - rho.dot(&h)) * minus_i;
        assert_matrix_close(&lifted, &commutator, 1e-14);
    }

    #[test]
    fn test_lift_dissipator_matches_dense_form() {
        // L = σ₋-style lowering operator with rate folded in.
        let kappa: f64 = 0.3;
        let mut l = Array2::<Complex64>::zeros((2, 2));
        l[[0, 1]] = Complex64::new(kappa.sqrt(), 0.0);
        let sup = lift_dissipator(&l);

        let mut rho = Array2::zeros((2, 2));
        rho[[0, 0]] = Complex64::new(0.4, 0.0);
        rho[[0, 1]] = Complex64::new(0.05, 0.1);
        rho[[1, 0]] = Complex64::new(0.05, -0.1);
        rho[[1, 1]] = Complex64::new(0.6, 0.0);

        let lifted = unvectorize(&sup.dot(&vectorize(&rho)), 2);

        let l_dag = dagger(&l);
        let ldl = l_dag.dot(&l);
        let half = Complex64::new(0.5, 0.0);
        let dense =
            l.dot(&rho).dot(&l_dag) - ldl.dot(&rho) * half - rho.dot(&ldl) * half;
        assert_matrix_close(&lifted, &dense, 1e-14);
    }

    #[test]
    fn test_dissipator_is_traceless_on_states() {
        let mut l = Array2::<Complex64>::zeros((2, 2));
        l[[0, 1]] = Complex64::new(1.0, 0.0);
        let sup = lift_dissipator(&l);

        let mut rho = Array2::zeros((2, 2));
        rho[[0, 0]] = Complex64::new(0.5, 0.0);
        rho[[1, 1]] = Complex64::new(0.5, 0.0);
        let out = unvectorize(&sup.dot(&vectorize(&rho)), 2);
        let trace = out[[0, 0]] + out[[1, 1]];
        assert_abs_diff_eq!(trace.norm(), 0.0, epsilon = 1e-14);
    }
}
