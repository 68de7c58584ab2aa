use serde::Serialize;

/// The solved state of one titration point. Concentrations are molar, heat in J/mol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitrationPoint {
    pub protein: f64,
    pub ligand: f64,
    pub free_ligand: f64,
    /// Mean binding enthalpy per lattice at this point.
    pub heat: f64,
    /// Mean fraction of occupied sites.
    pub saturation: f64,
}

impl TitrationPoint {
    #[inline]
    pub fn bound_ligand(&self) -> f64 {
        self.ligand - self.free_ligand
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitrationResult {
    pub points: Vec<TitrationPoint>,
}

impl TitrationResult {
    pub fn heats(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.heat).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
