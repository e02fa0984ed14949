//! Mixture-averaged molecular diffusion
//!
//! [`MolecularDiffusion`] owns the full table of binary coefficients between
//! the **medium** species (the subset of the species set that forms the
//! diffusing background — trace species and ions do not act as a medium) and
//! every species, and combines them into the effective per-species
//! coefficient "Dtilde". The base value is the Wilke mixture rule
//!
//! $$D_s = \frac{N_{tot} - n_s}{\sum_{m \in \text{medium},\, m \ne s} n_m / D_{sm}(T, P)}$$
//!
//! divided by the minor-constituent correction
//!
//! $$\tilde{D}_s = \frac{D_s}{1 - x_s\,(1 - M_s / M_{\ne s})}$$
//!
//! where `x_s = n_s/N_tot` and `M_{≠s}` is the density-weighted mean molar
//! mass of the *other* species, `Σ_{j≠s} n_j·M_j / (N_tot − n_s)`. The
//! correction keeps the effective coefficient meaningful when `s` is a major
//! constituent rather than a trace species.
//!
//! `Dtilde_s` is the diffusion coefficient of species `s` through the rest
//! of the mixture. Its exact density Jacobian is assembled term by term from
//! the quotient rule of both factors — the downstream Newton solver
//! linearizes the transport operator with it, so finite-difference shortcuts
//! are not acceptable here.
//!
//! # Pair table
//!
//! Each (medium, species) pair resolves at construction to a tagged entry:
//! an explicit fitted coefficient when one was supplied, or a coefficient
//! derived from the medium's self-diffusion fit by mass-ratio scaling. A
//! pair with neither is a fatal configuration error reported by
//! [`MolecularDiffusion::new`] — there is no sentinel state to hit later.

use nalgebra::{DMatrix, DVector};

use crate::diffusion::binary::{mass_ratio_scaling, BinaryDiffusion};
use crate::numeric::Real;
use crate::species::SpeciesTable;

// =================================================================================================
// BinaryFit — one explicit fitted pair
// =================================================================================================

/// An explicit binary-diffusion fit between two species of the table
///
/// The pair is unordered: supplying (i, j) also covers (j, i).
#[derive(Debug, Clone)]
pub struct BinaryFit<S: Real> {
    /// First species index
    pub i: usize,

    /// Second species index
    pub j: usize,

    /// The fitted coefficient
    pub coefficient: BinaryDiffusion<S>,
}

impl<S: Real> BinaryFit<S> {
    /// Creates an explicit fit for the unordered pair (i, j)
    pub fn new(i: usize, j: usize, coefficient: BinaryDiffusion<S>) -> Self {
        Self { i, j, coefficient }
    }
}

// =================================================================================================
// Pair table entries
// =================================================================================================

/// Resolved coefficient for one (medium, species) pair
///
/// Tagged lookup instead of sentinel handling: a pair either has a direct
/// fit or is derived from a self-diffusion fit — never "missing".
#[derive(Debug, Clone)]
enum PairEntry<S: Real> {
    /// Directly fitted coefficient
    Fit(BinaryDiffusion<S>),

    /// Derived from the medium's self-diffusion fit by mass-ratio scaling
    Derived {
        self_coefficient: BinaryDiffusion<S>,
        m_medium: S,
        m_other: S,
    },
}

impl<S: Real> PairEntry<S> {
    #[inline]
    fn evaluate(&self, temperature: S, pressure: S) -> S {
        match self {
            PairEntry::Fit(c) => c.evaluate(temperature, pressure),
            PairEntry::Derived {
                self_coefficient,
                m_medium,
                m_other,
            } => mass_ratio_scaling(
                self_coefficient.evaluate(temperature, pressure),
                *m_medium,
                *m_other,
            ),
        }
    }
}

// =================================================================================================
// MolecularDiffusion
// =================================================================================================

/// Mixture-averaged molecular diffusion engine
///
/// Immutable after construction; every evaluation is a pure function of the
/// call inputs and the stored pair table, so one engine can be shared by
/// reference across concurrent per-altitude evaluations.
///
/// # Example
///
/// ```
/// use atmodiff::diffusion::{BinaryDiffusion, BinaryFit, DiffusionLaw, MolecularDiffusion};
/// use atmodiff::species::{SpeciesDef, SpeciesTable};
///
/// let species = SpeciesTable::new(vec![
///     SpeciesDef::new("N2", 28.016_f64),
///     SpeciesDef::new("CH4", 16.043),
/// ]).unwrap();
///
/// let engine = MolecularDiffusion::new(&species, vec![0, 1], vec![
///     BinaryFit::new(0, 0, BinaryDiffusion::new(0.1783, 1.81, DiffusionLaw::Massman)),
///     BinaryFit::new(0, 1, BinaryDiffusion::new(1.04e-5, 1.76, DiffusionLaw::Wakeham)),
///     BinaryFit::new(1, 1, BinaryDiffusion::new(5.73e16, 0.5, DiffusionLaw::Wilson)),
/// ]).unwrap();
///
/// let d = engine.binary_coefficient(0, 1, 180.0, 2.5e-3).unwrap();
/// assert!(d > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MolecularDiffusion<S: Real> {
    /// Species indices forming the diffusion background, in row order
    medium: Vec<usize>,

    /// Row index in `table` for each species, `None` outside the medium
    medium_row: Vec<Option<usize>>,

    /// Pair table, `[medium row][species column]`
    table: Vec<Vec<PairEntry<S>>>,

    /// Molar masses in species order \[g/mol\], for the minor-constituent
    /// correction
    molar_masses: Vec<S>,

    /// Total species count (column dimension)
    n_species: usize,
}

impl<S: Real> MolecularDiffusion<S> {
    /// Builds the engine, resolving every (medium, species) pair
    ///
    /// `medium` lists the species indices that participate as a diffusion
    /// background; `fits` supplies the explicit coefficients. A pair without
    /// an explicit fit falls back to the medium's self-diffusion fit scaled
    /// by the mass-ratio law.
    ///
    /// # Errors
    ///
    /// - empty medium, out-of-range or duplicate medium index
    /// - fit referencing an out-of-range species index
    /// - a (medium, species) pair with neither an explicit fit nor a
    ///   same-species fit on the medium to derive from
    pub fn new(
        species: &SpeciesTable<S>,
        medium: Vec<usize>,
        fits: Vec<BinaryFit<S>>,
    ) -> Result<Self, String> {
        let n = species.len();

        if medium.is_empty() {
            return Err("Molecular diffusion requires at least one medium species".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for &m in &medium {
            if m >= n {
                return Err(format!(
                    "Medium species index {} out of range for {} species",
                    m, n
                ));
            }
            if !seen.insert(m) {
                return Err(format!(
                    "Species '{}' listed twice in the diffusion medium",
                    species.name(m)
                ));
            }
        }
        for fit in &fits {
            if fit.i >= n || fit.j >= n {
                return Err(format!(
                    "Binary fit ({}, {}) out of range for {} species",
                    fit.i, fit.j, n
                ));
            }
        }

        let explicit = |a: usize, b: usize| -> Option<&BinaryDiffusion<S>> {
            fits.iter()
                .find(|f| (f.i == a && f.j == b) || (f.i == b && f.j == a))
                .map(|f| &f.coefficient)
        };

        let mut table = Vec::with_capacity(medium.len());
        for &m in &medium {
            let mut row = Vec::with_capacity(n);
            for j in 0..n {
                let entry = match explicit(m, j) {
                    Some(c) => PairEntry::Fit(*c),
                    None => match explicit(m, m) {
                        Some(self_c) => PairEntry::Derived {
                            self_coefficient: *self_c,
                            m_medium: species.molar_mass(m),
                            m_other: species.molar_mass(j),
                        },
                        None => {
                            return Err(format!(
                                "No binary-diffusion data for pair ({}, {}): \
                                 no explicit fit and no {} self-diffusion fit to derive from",
                                species.name(m),
                                species.name(j),
                                species.name(m)
                            ))
                        }
                    },
                };
                row.push(entry);
            }
            table.push(row);
        }

        let mut medium_row = vec![None; n];
        for (row, &m) in medium.iter().enumerate() {
            medium_row[m] = Some(row);
        }

        log::debug!(
            "molecular diffusion table resolved: {} medium species over {} species",
            medium.len(),
            n
        );

        Ok(Self {
            medium,
            medium_row,
            table,
            molar_masses: (0..n).map(|j| species.molar_mass(j)).collect(),
            n_species: n,
        })
    }

    /// Number of species (length of every density vector)
    pub fn species_count(&self) -> usize {
        self.n_species
    }

    /// Species indices of the diffusion medium, in table row order
    pub fn medium(&self) -> &[usize] {
        &self.medium
    }

    /// Binary coefficient for the unordered pair (i, j) at (T \[K\], P \[Pa\])
    ///
    /// Symmetric by construction: `binary_coefficient(i, j, ..)` and
    /// `binary_coefficient(j, i, ..)` resolve to the same table entry.
    ///
    /// # Errors
    ///
    /// - either index out of range
    /// - neither species belongs to the diffusion medium (no table entry)
    pub fn binary_coefficient(
        &self,
        i: usize,
        j: usize,
        temperature: S,
        pressure: S,
    ) -> Result<S, String> {
        if i >= self.n_species || j >= self.n_species {
            return Err(format!(
                "Binary coefficient ({}, {}) out of range for {} species",
                i, j, self.n_species
            ));
        }
        if let Some(row) = self.medium_row[i] {
            Ok(self.table[row][j].evaluate(temperature, pressure))
        } else if let Some(row) = self.medium_row[j] {
            Ok(self.table[row][i].evaluate(temperature, pressure))
        } else {
            Err(format!(
                "No binary-diffusion entry for pair ({}, {}): neither species is a medium",
                i, j
            ))
        }
    }

    /// Evaluates the whole pair table at (T, P): `d[row][species]` \[cm²/s\]
    ///
    /// The coefficients depend on temperature and pressure only, so one
    /// evaluation serves every species loop of a call.
    fn evaluate_table(&self, temperature: S, pressure: S) -> Vec<Vec<S>> {
        self.table
            .iter()
            .map(|row| {
                row.iter()
                    .map(|e| e.evaluate(temperature, pressure))
                    .collect()
            })
            .collect()
    }

    /// Effective diffusion coefficient of every species \[cm²/s\]
    ///
    /// Wilke mixture rule over the medium species divided by the
    /// minor-constituent correction; see the module docs. `densities` is in
    /// cm⁻³ per species, `temperature` in K, `pressure` in Pa. A zero total
    /// density propagates as a non-finite result (numerical-domain fault,
    /// detected by the caller).
    ///
    /// # Panics
    ///
    /// Asserts `densities.len()` equals the species count.
    pub fn dtilde(&self, densities: &DVector<S>, temperature: S, pressure: S) -> DVector<S> {
        assert_eq!(
            densities.len(),
            self.n_species,
            "dtilde: density vector has {} entries for {} species",
            densities.len(),
            self.n_species
        );

        let d = self.evaluate_table(temperature, pressure);
        let ntot: S = densities.iter().copied().fold(S::zero(), |a, n| a + n);

        DVector::from_iterator(
            self.n_species,
            (0..self.n_species).map(|s| {
                let denom = self.medium_sum(densities, &d, s);
                let (phi, _, _, _) = self.correction(densities, ntot, s);
                (ntot - densities[s]) / denom / phi
            }),
        )
    }

    /// Dtilde together with its exact density Jacobian
    ///
    /// Writes `Dtilde_s` into `dtilde` and `∂Dtilde_s/∂n_i` into
    /// `ddtilde_dn[(s, i)]`. With `S_s` the medium sum of the Wilke rule,
    /// the base factor `D_s = (N_{tot} − n_s)/S_s` differentiates as
    ///
    /// $$\frac{\partial D_s}{\partial n_i}
    ///   = \frac{1 - \delta_{si}}{S_s}
    ///   - \frac{D_s}{S_s} \cdot \frac{[\,i \in \text{medium},\, i \ne s\,]}{D_{si}}$$
    ///
    /// and the correction `φ_s = 1 − x_s·(1 − M_s·q_s/r_s)` (with
    /// `q_s = N_{tot} − n_s`, `r_s = Σ_{j≠s} n_j·M_j`) contributes its own
    /// quotient-rule channels through `x_s`, `q_s` and `r_s`:
    ///
    /// $$\frac{\partial \tilde{D}_s}{\partial n_i}
    ///   = \frac{1}{φ_s}\frac{\partial D_s}{\partial n_i}
    ///   - \frac{\tilde{D}_s}{φ_s}\frac{\partial φ_s}{\partial n_i}$$
    ///
    /// The binary coefficients are (T, P) functions only — no density
    /// derivative flows through them.
    ///
    /// # Panics
    ///
    /// Asserts the output buffers are pre-sized to the species count
    /// (vector) and species count squared (matrix).
    pub fn dtilde_and_derivs_dn(
        &self,
        densities: &DVector<S>,
        temperature: S,
        pressure: S,
        dtilde: &mut DVector<S>,
        ddtilde_dn: &mut DMatrix<S>,
    ) {
        let n = self.n_species;
        assert_eq!(
            densities.len(),
            n,
            "dtilde_and_derivs_dn: density vector has {} entries for {} species",
            densities.len(),
            n
        );
        assert_eq!(
            dtilde.len(),
            n,
            "dtilde_and_derivs_dn: output vector has {} entries for {} species",
            dtilde.len(),
            n
        );
        assert_eq!(
            (ddtilde_dn.nrows(), ddtilde_dn.ncols()),
            (n, n),
            "dtilde_and_derivs_dn: output matrix is {}x{} for {} species",
            ddtilde_dn.nrows(),
            ddtilde_dn.ncols(),
            n
        );

        let d = self.evaluate_table(temperature, pressure);
        let ntot: S = densities.iter().copied().fold(S::zero(), |a, n| a + n);

        for s in 0..n {
            let sum = self.medium_sum(densities, &d, s);
            let base = (ntot - densities[s]) / sum;
            let (phi, x, q, r) = self.correction(densities, ntot, s);
            let value = base / phi;
            dtilde[s] = value;

            let m_s = self.molar_masses[s];
            for i in 0..n {
                // Numerator: d(N_tot − n_s)/dn_i = 1, with an extra −1 on the
                // diagonal (the n_s contribution to N_tot cancels).
                let dnum = if i == s { S::zero() } else { S::one() };

                // Denominator: only the direct 1/D_si term survives when i is
                // a medium species other than s.
                let ddenom = match self.medium_row[i] {
                    Some(row) if i != s => S::one() / d[row][s],
                    _ => S::zero(),
                };

                let dbase = dnum / sum - base * ddenom / sum;

                // ∂x_s/∂n_i = δ_si/N_tot − n_s/N_tot²
                let dx = if i == s {
                    S::one() / ntot - densities[s] / (ntot * ntot)
                } else {
                    -densities[s] / (ntot * ntot)
                };

                // φ_s channels: x_s everywhere, q_s and r_s off the diagonal
                // only (both are sums over j ≠ s)
                let mut dphi = dx * (m_s * q / r - S::one());
                if i != s {
                    dphi += x * m_s * (r - q * self.molar_masses[i]) / (r * r);
                }

                ddtilde_dn[(s, i)] = dbase / phi - value * dphi / phi;
            }
        }
    }

    /// Minor-constituent correction `φ_s = 1 − x_s·(1 − M_s·q_s/r_s)`
    ///
    /// Returns `(φ_s, x_s, q_s, r_s)` with `x_s = n_s/N_tot`,
    /// `q_s = N_tot − n_s` and `r_s = Σ_{j≠s} n_j·M_j` (so `r_s/q_s` is the
    /// mean molar mass of the species other than `s`). Both evaluation paths
    /// share this helper so their values agree exactly.
    #[inline]
    fn correction(&self, densities: &DVector<S>, ntot: S, s: usize) -> (S, S, S, S) {
        let x = densities[s] / ntot;
        let q = ntot - densities[s];
        let r = (0..self.n_species)
            .filter(|&j| j != s)
            .fold(S::zero(), |acc, j| acc + densities[j] * self.molar_masses[j]);
        let phi = S::one() - x * (S::one() - self.molar_masses[s] * q / r);
        (phi, x, q, r)
    }

    /// Wilke denominator `S_s = Σ_{m ∈ medium, m≠s} n_m / D_ms`
    #[inline]
    fn medium_sum(&self, densities: &DVector<S>, d: &[Vec<S>], s: usize) -> S {
        self.medium
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m != s)
            .fold(S::zero(), |acc, (row, &m)| {
                acc + densities[m] / d[row][s]
            })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
