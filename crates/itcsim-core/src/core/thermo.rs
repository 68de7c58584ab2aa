use super::energy::{EnergyModelError, ModelKind};

/// Molar gas constant in J/(K·mol).
pub const GAS_CONSTANT: f64 = 8.3144621;

/// Thermal energy `R·T` in J/mol.
#[inline]
pub fn thermal_energy(temperature: f64) -> f64 {
    GAS_CONSTANT * temperature
}

/// Integrated van't Hoff enthalpy at `temperature` for a constant heat capacity change.
#[inline]
pub fn enthalpy_at(dh0: f64, dcp: f64, temperature: f64, reference: f64) -> f64 {
    dh0 + dcp * (temperature - reference)
}

/// Integrated Gibbs-Helmholtz free energy at `temperature` for a constant heat capacity
/// change. `dg0` and `dh0` are the values at `reference`.
#[inline]
pub fn free_energy_at(dg0: f64, dh0: f64, dcp: f64, temperature: f64, reference: f64) -> f64 {
    let ds0 = (dh0 - dg0) / reference;
    dh0 - temperature * ds0
        + dcp * ((temperature - reference) - temperature * (temperature / reference).ln())
}

fn is_valid_temperature(t: f64) -> bool {
    t.is_finite() && t > 0.0
}

/// Moves a model's parameter vector from `reference` to `temperature`.
///
/// Every free energy is paired with the enthalpy in the same position of the second half
/// of the vector and with one heat capacity change, so `heat_capacities` holds half as
/// many values as the model has parameters.
pub fn extrapolate_parameters(
    kind: ModelKind,
    parameters: &[f64],
    heat_capacities: &[f64],
    temperature: f64,
    reference: f64,
) -> Result<Vec<f64>, EnergyModelError> {
    kind.validate(parameters)?;
    if !kind.supports_extrapolation() {
        return Err(EnergyModelError::NotExtrapolatable(kind));
    }
    let pairs = kind.arity() / 2;
    if heat_capacities.len() != pairs {
        return Err(EnergyModelError::HeatCapacityMismatch {
            model: kind,
            expected: pairs,
            found: heat_capacities.len(),
        });
    }
    if !is_valid_temperature(temperature) || !is_valid_temperature(reference) {
        return Err(EnergyModelError::InvalidTemperature {
            temperature,
            reference,
        });
    }

    let (free, enthalpic) = parameters.split_at(pairs);
    let mut extrapolated = vec![0.0; parameters.len()];
    for (k, ((&dg0, &dh0), &dcp)) in free.iter().zip(enthalpic).zip(heat_capacities).enumerate() {
        extrapolated[k] = free_energy_at(dg0, dh0, dcp, temperature, reference);
        extrapolated[pairs + k] = enthalpy_at(dh0, dcp, temperature, reference);
    }

    kind.validate(&extrapolated)?;
    Ok(extrapolated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn extrapolation_is_identity_at_reference_temperature() {
        let parameters = [-5000.0, 1200.0, -800.0, -8000.0, 300.0, -2500.0];
        let heat_capacities = [-150.0, 20.0, 45.0];
        let result = extrapolate_parameters(
            ModelKind::Additive,
            &parameters,
            &heat_capacities,
            298.15,
            298.15,
        )
        .unwrap();

        for (got, want) in result.iter().zip(parameters) {
            assert!((got - want).abs() < TOLERANCE, "{got} != {want}");
        }
    }

    #[test]
    fn free_energy_without_heat_capacity_is_linear_in_temperature() {
        // dG = dH - T dS with dS = (dH - dG0) / T0
        let g = free_energy_at(-5000.0, -8000.0, 0.0, 310.0, 300.0);
        assert!((g - (-8000.0 - 310.0 * (-3000.0 / 300.0))).abs() < TOLERANCE);
        assert_eq!(enthalpy_at(-8000.0, 0.0, 310.0, 300.0), -8000.0);
    }

    #[test]
    fn enthalpy_shifts_by_heat_capacity_times_temperature_difference() {
        let h = enthalpy_at(-8000.0, -200.0, 308.15, 298.15);
        assert!((h - -10000.0).abs() < 1e-6, "{h}");
    }

    #[test]
    fn free_energy_slope_equals_minus_entropy() {
        let (dg0, dh0, dcp, t0) = (-5000.0, -8000.0, -300.0, 298.15);
        let h = 1e-3;
        let t = 305.0;
        let slope = (free_energy_at(dg0, dh0, dcp, t + h, t0) - free_energy_at(dg0, dh0, dcp, t - h, t0))
            / (2.0 * h);
        let entropy = (enthalpy_at(dh0, dcp, t, t0) - free_energy_at(dg0, dh0, dcp, t, t0)) / t;
        assert!((slope + entropy).abs() < 1e-5, "slope {slope}, entropy {entropy}");
    }

    #[test]
    fn extrapolate_rejects_multiplicative_models() {
        let parameters = [-5000.0, 1.0, 1.0, 1.0, -8000.0, 1.0, 1.0, 1.0];
        for kind in [ModelKind::Jump2, ModelKind::SaroffKiefer] {
            let result = extrapolate_parameters(kind, &parameters, &[0.0; 4], 310.0, 298.15);
            assert_eq!(result, Err(EnergyModelError::NotExtrapolatable(kind)));
        }
    }

    #[test]
    fn extrapolate_rejects_wrong_heat_capacity_count() {
        let result =
            extrapolate_parameters(ModelKind::Simple, &[-5000.0, -8000.0], &[0.0, 0.0], 310.0, 298.15);
        assert_eq!(
            result,
            Err(EnergyModelError::HeatCapacityMismatch {
                model: ModelKind::Simple,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn extrapolate_rejects_non_physical_temperatures() {
        for (temperature, reference) in [(0.0, 298.15), (310.0, -1.0), (f64::NAN, 298.15)] {
            let result = extrapolate_parameters(
                ModelKind::Simple,
                &[-5000.0, -8000.0],
                &[0.0],
                temperature,
                reference,
            );
            assert!(matches!(
                result,
                Err(EnergyModelError::InvalidTemperature { .. })
            ));
        }
    }
}
