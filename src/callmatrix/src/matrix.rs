use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{
    call_code::CallCode,
    chromosome::ChrName,
    error::CallMatrixError,
    position::BpPosition,
    sdp::{sdp_from_calls, Sdp},
    views::{ReverseView, SubsetView},
};

/// Opaque sample identifier (a column label). `Arc<str>`-backed so cloning
/// a sample id across every row that references it is cheap.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleId(Arc<str>);

impl SampleId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for SampleId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}
impl From<&str> for SampleId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}
impl Display for SampleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque SNP row identifier (a row label, e.g. a marker name).
/// `Arc<str>`-backed for the same reason as [`SampleId`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnpId(Arc<str>);

impl SnpId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for SnpId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}
impl From<&str> for SnpId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}
impl Display for SnpId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only capability over a rectangular genotype call matrix: rows are
/// SNPs, columns are samples.
///
/// Implementors need only provide the accessors; compatibility scanning,
/// SDP derivation, reversal, and chromosome partitioning are all expressed
/// in terms of them as default methods, so [`views::SubsetView`] and
/// [`views::ReverseView`] get these behaviors for free.
///
/// [`views::SubsetView`]: crate::views::SubsetView
/// [`views::ReverseView`]: crate::views::ReverseView
pub trait CallMatrix {
    fn snp_count(&self) -> usize;
    fn sample_count(&self) -> usize;

    /// The calls at SNP row `snp_index`, one per sample, in sample order.
    fn calls_at(&self, snp_index: usize) -> &[CallCode];

    fn sample_ids(&self) -> &[SampleId];

    /// `None` if this matrix carries no chromosome metadata at all.
    fn chr_name(&self, snp_index: usize) -> Option<&ChrName>;

    /// `None` if this matrix carries no position metadata at all.
    fn position(&self, snp_index: usize) -> Option<BpPosition>;

    /// `None` if this matrix carries no SNP-id metadata at all.
    fn snp_id(&self, snp_index: usize) -> Option<&SnpId>;

    /// Whether every SNP row in this matrix carries chromosome metadata.
    fn has_chromosome_ids(&self) -> bool {
        (0..self.snp_count()).all(|i| self.chr_name(i).is_some())
    }

    /// The minority-normalized SDP bitset for SNP row `snp_index`.
    fn sdp_at(&self, snp_index: usize) -> Sdp {
        sdp_from_calls(self.calls_at(snp_index))
    }

    /// A read-only view over `[start, start+extent)` SNP rows.
    ///
    /// # Panics
    /// Panics if the range runs past `snp_count()`.
    fn subset_view(&self, start: usize, extent: usize) -> SubsetView<'_, Self>
    where
        Self: Sized,
    {
        SubsetView::new(self, start, extent)
    }

    /// A read-only view presenting this matrix's SNP rows in reverse order.
    fn reverse_view(&self) -> ReverseView<'_, Self>
    where
        Self: Sized,
    {
        ReverseView::new(self)
    }

    /// Partition the SNP rows into maximal contiguous runs that share the
    /// same chromosome identity, in chromosome order.
    ///
    /// # Errors
    /// Returns [`CallMatrixError::MissingChromosomeIds`] if any SNP row
    /// lacks chromosome metadata.
    fn chromosome_views(&self) -> Result<Vec<SubsetView<'_, Self>>, CallMatrixError>
    where
        Self: Sized,
    {
        if !self.has_chromosome_ids() {
            return Err(CallMatrixError::MissingChromosomeIds);
        }
        let mut runs = Vec::new();
        let mut start = 0usize;
        while start < self.snp_count() {
            let chr = self.chr_name(start).expect("checked above");
            let mut extent = 1usize;
            while start + extent < self.snp_count()
                && self.chr_name(start + extent).expect("checked above") == chr
            {
                extent += 1;
            }
            runs.push((chr, self.subset_view(start, extent)));
            start += extent;
        }
        runs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(runs.into_iter().map(|(_, view)| view).collect())
    }
}

/// Write capability over a [`CallMatrix`], used only during construction.
///
/// Every optional per-SNP array setter follows the same "null deletes"
/// semantics: passing `None` removes the array entirely (subsequent
/// accessors return `None` for every row), while passing `Some(values)`
/// requires `values.len() == snp_count()`.
pub trait MutableCallMatrix: CallMatrix {
    /// Overwrite the call at `(snp_index, sample_index)`. Passing `None`
    /// resets the cell to [`CallCode::N`] (null-deletes semantics).
    ///
    /// # Errors
    /// Returns an out-of-bounds error if either index is invalid.
    fn set_call(
        &mut self,
        snp_index: usize,
        sample_index: usize,
        call: Option<CallCode>,
    ) -> Result<(), CallMatrixError>;

    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `Some` and the
    /// wrong length.
    fn set_snp_ids(&mut self, ids: Option<Vec<SnpId>>) -> Result<(), CallMatrixError>;

    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `Some` and the
    /// wrong length.
    fn set_chr_ids(&mut self, ids: Option<Vec<ChrName>>) -> Result<(), CallMatrixError>;

    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `Some` and the
    /// wrong length.
    fn set_positions(&mut self, positions: Option<Vec<BpPosition>>) -> Result<(), CallMatrixError>;

    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `Some` and the
    /// wrong length.
    fn set_a_alleles(&mut self, alleles: Option<Vec<char>>) -> Result<(), CallMatrixError>;

    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `Some` and the
    /// wrong length.
    fn set_b_alleles(&mut self, alleles: Option<Vec<char>>) -> Result<(), CallMatrixError>;

    fn set_build_id(&mut self, build_id: Option<String>);

    fn set_sorted_by_position(&mut self, sorted: bool);
}
