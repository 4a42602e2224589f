use crate::{
    call_code::CallCode,
    chromosome::ChrName,
    matrix::{CallMatrix, SampleId, SnpId},
    position::BpPosition,
};

/// A read-only, contiguous `[start, start+extent)` slice of another
/// matrix's SNP rows. Sample columns are unaffected.
#[derive(Debug, Clone, Copy)]
pub struct SubsetView<'a, M: ?Sized> {
    inner: &'a M,
    start: usize,
    extent: usize,
}

impl<'a, M: CallMatrix + ?Sized> SubsetView<'a, M> {
    /// # Panics
    /// Panics if `start + extent` runs past `inner.snp_count()`.
    #[must_use]
    pub fn new(inner: &'a M, start: usize, extent: usize) -> Self {
        assert!(
            start + extent <= inner.snp_count(),
            "subset view [{start}, {start}+{extent}) runs past {} rows",
            inner.snp_count()
        );
        Self { inner, start, extent }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }
}

impl<M: CallMatrix + ?Sized> CallMatrix for SubsetView<'_, M> {
    fn snp_count(&self) -> usize {
        self.extent
    }

    fn sample_count(&self) -> usize {
        self.inner.sample_count()
    }

    fn calls_at(&self, snp_index: usize) -> &[CallCode] {
        self.inner.calls_at(self.start + snp_index)
    }

    fn sample_ids(&self) -> &[SampleId] {
        self.inner.sample_ids()
    }

    fn chr_name(&self, snp_index: usize) -> Option<&ChrName> {
        self.inner.chr_name(self.start + snp_index)
    }

    fn position(&self, snp_index: usize) -> Option<BpPosition> {
        self.inner.position(self.start + snp_index)
    }

    fn snp_id(&self, snp_index: usize) -> Option<&SnpId> {
        self.inner.snp_id(self.start + snp_index)
    }
}

/// A read-only view presenting another matrix's SNP rows in reverse order.
/// Per-row call bytes are left in their original sample order: only the
/// *row* sequence is mirrored, not the sample columns within each row.
#[derive(Debug, Clone, Copy)]
pub struct ReverseView<'a, M: ?Sized> {
    inner: &'a M,
}

impl<'a, M: CallMatrix + ?Sized> ReverseView<'a, M> {
    #[must_use]
    pub fn new(inner: &'a M) -> Self {
        Self { inner }
    }

    fn mirror(&self, snp_index: usize) -> usize {
        self.inner.snp_count() - 1 - snp_index
    }
}

impl<M: CallMatrix + ?Sized> CallMatrix for ReverseView<'_, M> {
    fn snp_count(&self) -> usize {
        self.inner.snp_count()
    }

    fn sample_count(&self) -> usize {
        self.inner.sample_count()
    }

    fn calls_at(&self, snp_index: usize) -> &[CallCode] {
        self.inner.calls_at(self.mirror(snp_index))
    }

    fn sample_ids(&self) -> &[SampleId] {
        self.inner.sample_ids()
    }

    fn chr_name(&self, snp_index: usize) -> Option<&ChrName> {
        self.inner.chr_name(self.mirror(snp_index))
    }

    fn position(&self, snp_index: usize) -> Option<BpPosition> {
        self.inner.position(self.mirror(snp_index))
    }

    fn snp_id(&self, snp_index: usize) -> Option<&SnpId> {
        self.inner.snp_id(self.mirror(snp_index))
    }
}
