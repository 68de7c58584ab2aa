/// Probability-weighted mean binding enthalpy per lattice, `Σ p_i H_i` (J/mol).
///
/// Multiply by the total protein concentration for the heat per unit volume.
pub fn predicted_heat(probabilities: &[f64], enthalpies: &[f64]) -> f64 {
    probabilities
        .iter()
        .zip(enthalpies)
        .map(|(p, h)| p * h)
        .sum()
}
