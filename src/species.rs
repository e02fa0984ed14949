//! Chemical species registry
//!
//! The species set is an **ordered, fixed-size** list shared by every vector
//! and matrix in the diffusion pipeline: index `s` means the same species in
//! the density vector, the Dtilde vector, the scale-height vector and every
//! Jacobian row/column. The registry is immutable once built — downstream
//! evaluators keep plain `usize` indices into it.

use crate::numeric::Real;

// =================================================================================================
// SpeciesDef — one chemical species
// =================================================================================================

/// Physical identity of a chemical species
///
/// # Example
///
/// ```
/// use atmodiff::species::SpeciesDef;
///
/// let n2 = SpeciesDef::new("N2", 28.016_f64);
/// assert!(n2.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SpeciesDef<S: Real> {
    /// Species name (used for error messages and demo output)
    pub name: String,

    /// Molar mass **\[g/mol\]**, must be > 0
    pub molar_mass: S,
}

impl<S: Real> SpeciesDef<S> {
    /// Creates a species definition (no validation — call [`validate`](Self::validate))
    pub fn new(name: impl Into<String>, molar_mass: S) -> Self {
        Self {
            name: name.into(),
            molar_mass,
        }
    }

    /// Checks physical constraints
    ///
    /// # Rules
    ///
    /// - molar mass must be strictly positive (it appears as a divisor in
    ///   scale heights and in the mass-ratio diffusion law)
    pub fn validate(&self) -> Result<(), String> {
        if self.molar_mass <= S::zero() {
            return Err(format!(
                "Species '{}': molar mass must be > 0 g/mol, got {:?}",
                self.name, self.molar_mass
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// SpeciesTable — the ordered species set
// =================================================================================================

/// Ordered, immutable set of chemical species
///
/// Order is significant: it defines the index convention of every density
/// vector and derivative matrix exchanged with the transport solver.
///
/// # Example
///
/// ```
/// use atmodiff::species::{SpeciesDef, SpeciesTable};
///
/// let table = SpeciesTable::new(vec![
///     SpeciesDef::new("N2", 28.016_f64),
///     SpeciesDef::new("CH4", 16.043),
/// ]).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.index_of("CH4"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct SpeciesTable<S: Real> {
    species: Vec<SpeciesDef<S>>,
}

impl<S: Real> SpeciesTable<S> {
    /// Builds a species table
    ///
    /// # Errors
    ///
    /// - empty species list
    /// - any species fails [`SpeciesDef::validate`]
    /// - duplicate species name
    pub fn new(species: Vec<SpeciesDef<S>>) -> Result<Self, String> {
        if species.is_empty() {
            return Err("Species table must contain at least one species".to_string());
        }

        for sp in &species {
            sp.validate()?;
        }

        let mut seen = std::collections::HashSet::new();
        for sp in &species {
            if !seen.insert(sp.name.as_str()) {
                return Err(format!("Duplicate species name '{}' in species table", sp.name));
            }
        }

        Ok(Self { species })
    }

    /// Number of species
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// True if the table is empty (never the case after construction)
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Molar mass of species `s` **\[g/mol\]**
    ///
    /// # Panics
    ///
    /// Panics if `s` is out of range — an index past the species count is a
    /// caller contract violation, not a recoverable state.
    pub fn molar_mass(&self, s: usize) -> S {
        self.species[s].molar_mass
    }

    /// Name of species `s`
    pub fn name(&self, s: usize) -> &str {
        &self.species[s].name
    }

    /// Index of a species by name, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|sp| sp.name == name)
    }

    /// Species names in index order
    pub fn names(&self) -> Vec<&str> {
        self.species.iter().map(|sp| sp.name.as_str()).collect()
    }

    /// Iterator over the definitions in index order
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDef<S>> {
        self.species.iter()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn titan_neutrals() -> SpeciesTable<f64> {
        SpeciesTable::new(vec![
            SpeciesDef::new("N2", 28.016),
            SpeciesDef::new("CH4", 16.043),
            SpeciesDef::new("C2H", 25.030),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_preserves_order() {
        let t = titan_neutrals();
        assert_eq!(t.names(), vec!["N2", "CH4", "C2H"]);
        assert_eq!(t.index_of("N2"), Some(0));
        assert_eq!(t.index_of("C2H"), Some(2));
        assert_eq!(t.index_of("Ar"), None);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(SpeciesTable::<f64>::new(vec![]).is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = SpeciesTable::new(vec![
            SpeciesDef::new("N2", 28.016_f64),
            SpeciesDef::new("N2", 28.016),
        ])
        .unwrap_err();
        assert!(err.contains("Duplicate") && err.contains("N2"));
    }

    #[test]
    fn test_nonpositive_molar_mass_rejected() {
        assert!(SpeciesTable::new(vec![SpeciesDef::new("X", 0.0_f64)]).is_err());
        assert!(SpeciesTable::new(vec![SpeciesDef::new("X", -1.0_f64)]).is_err());
    }

    #[test]
    fn test_molar_mass_lookup() {
        let t = titan_neutrals();
        assert_eq!(t.molar_mass(1), 16.043);
    }
}
