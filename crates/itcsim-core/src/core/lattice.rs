use std::fmt;
use thiserror::Error;

/// Largest lattice the engine will enumerate. The configuration table grows as
/// `2^size * size`, so this is a hard configuration limit rather than a hint.
pub const MAX_SITES: usize = 24;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("A lattice needs at least one binding site")]
    EmptyLattice,

    #[error("Lattice of {size} sites exceeds the supported maximum of {max} sites")]
    TooManySites { size: usize, max: usize },

    #[error("Failed to allocate storage for {configurations} lattice configurations")]
    Allocation { configurations: usize },
}

/// The complete set of occupancy configurations of a ring or chain of binding sites.
///
/// Configuration `i` is the big-endian binary expansion of `i`: site 0 is the most
/// significant bit, so for a three-site lattice configuration 1 is `001` and
/// configuration 4 is `100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    cyclic: bool,
    sites: Vec<bool>, // Row-major, one row of `size` sites per configuration
    occupancy: Vec<u32>,
}

impl Lattice {
    pub fn new(size: usize, cyclic: bool) -> Result<Self, LatticeError> {
        if size == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        if size > MAX_SITES {
            return Err(LatticeError::TooManySites {
                size,
                max: MAX_SITES,
            });
        }

        let count = 1usize << size;
        let allocation_error = |_| LatticeError::Allocation {
            configurations: count,
        };

        let mut sites = Vec::new();
        sites
            .try_reserve_exact(count * size)
            .map_err(allocation_error)?;
        let mut occupancy = Vec::new();
        occupancy
            .try_reserve_exact(count)
            .map_err(allocation_error)?;

        for index in 0..count {
            for site in 0..size {
                sites.push((index >> (size - 1 - site)) & 1 == 1);
            }
            occupancy.push(index.count_ones());
        }

        Ok(Self {
            size,
            cyclic,
            sites,
            occupancy,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Number of configurations, always `2^size`.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Occupancy of the fully bound configuration.
    #[inline]
    pub fn max_occupancy(&self) -> u32 {
        self.size as u32
    }

    /// Number of occupied sites in each configuration, indexed like the configurations.
    #[inline]
    pub fn occupancy(&self) -> &[u32] {
        &self.occupancy
    }

    pub fn configuration(&self, index: usize) -> Option<Configuration<'_>> {
        let occupancy = *self.occupancy.get(index)?;
        let start = index * self.size;
        Some(Configuration {
            index,
            sites: &self.sites[start..start + self.size],
            occupancy,
            cyclic: self.cyclic,
        })
    }

    pub fn configurations(&self) -> impl ExactSizeIterator<Item = Configuration<'_>> + '_ {
        self.sites
            .chunks_exact(self.size)
            .zip(self.occupancy.iter())
            .enumerate()
            .map(|(index, (sites, &occupancy))| Configuration {
                index,
                sites,
                occupancy,
                cyclic: self.cyclic,
            })
    }
}

/// A borrowed view of one row of the lattice configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration<'a> {
    index: usize,
    sites: &'a [bool],
    occupancy: u32,
    cyclic: bool,
}

impl<'a> Configuration<'a> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn sites(&self) -> &'a [bool] {
        self.sites
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    #[inline]
    pub fn is_occupied(&self, site: usize) -> bool {
        self.sites[site]
    }

    /// Index of the site `offset` positions away from `site`.
    ///
    /// Rings wrap modulo the lattice size. On a linear lattice, positions past either
    /// end do not exist and yield `None`.
    pub fn neighbor_index(&self, site: usize, offset: isize) -> Option<usize> {
        let size = self.sites.len() as isize;
        let target = site as isize + offset;
        if self.cyclic {
            Some(target.rem_euclid(size) as usize)
        } else if (0..size).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }

    /// Occupancy of the neighbour `offset` positions away, or `None` if it does not exist.
    #[inline]
    pub fn neighbor(&self, site: usize, offset: isize) -> Option<bool> {
        self.neighbor_index(site, offset)
            .map(|index| self.sites[index])
    }

    /// Whether the neighbour `offset` positions away exists and is occupied.
    #[inline]
    pub fn is_neighbor_occupied(&self, site: usize, offset: isize) -> bool {
        self.neighbor(site, offset).unwrap_or(false)
    }

    pub fn occupied_sites(&self) -> impl Iterator<Item = usize> + 'a {
        self.sites
            .iter()
            .enumerate()
            .filter_map(|(site, &occupied)| occupied.then_some(site))
    }
}

impl fmt::Display for Configuration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &occupied in self.sites {
            f.write_str(if occupied { "1" } else { "0" })?;
        }
        Ok(())
    }
}
