use callmatrix::{
    BpPosition, CallCode, CallMatrix, CallMatrixError, ChrName, MutableCallMatrix, SampleId, SnpId,
};

/// In-memory [`CallMatrix`]/[`MutableCallMatrix`] implementation — the
/// "in-memory option" for a matrix store, as opposed to a disk-backed one.
///
/// Rows are stored as a flat `Vec<CallCode>` of `snp_count * sample_count`
/// cells rather than a `Vec<Vec<_>>`, avoiding one allocation per row.
#[derive(Debug, Clone)]
pub struct InMemoryCallMatrix {
    calls: Vec<CallCode>,
    sample_count: usize,
    samples: Vec<SampleId>,
    snp_ids: Option<Vec<SnpId>>,
    chr_ids: Option<Vec<ChrName>>,
    positions: Option<Vec<BpPosition>>,
    a_alleles: Option<Vec<char>>,
    b_alleles: Option<Vec<char>>,
    build_id: Option<String>,
    sorted_by_position: bool,
}

impl InMemoryCallMatrix {
    #[must_use]
    pub fn new(samples: Vec<SampleId>) -> Self {
        let sample_count = samples.len();
        Self {
            calls: Vec::new(),
            sample_count,
            samples,
            snp_ids: None,
            chr_ids: None,
            positions: None,
            a_alleles: None,
            b_alleles: None,
            build_id: None,
            sorted_by_position: false,
        }
    }

    /// Append one SNP row of calls.
    ///
    /// # Errors
    /// Returns [`CallMatrixError::ArrayLengthMismatch`] if `row.len() !=
    /// sample_count()`.
    pub fn push_row(&mut self, row: Vec<CallCode>) -> Result<(), CallMatrixError> {
        if row.len() != self.sample_count {
            return Err(CallMatrixError::ArrayLengthMismatch { got: row.len(), snp_count: self.sample_count });
        }
        self.calls.extend(row);
        Ok(())
    }

    #[must_use]
    pub fn build_id(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    #[must_use]
    pub fn sorted_by_position(&self) -> bool {
        self.sorted_by_position
    }

    #[must_use]
    pub fn a_allele(&self, snp_index: usize) -> Option<char> {
        self.a_alleles.as_ref().map(|a| a[snp_index])
    }

    #[must_use]
    pub fn b_allele(&self, snp_index: usize) -> Option<char> {
        self.b_alleles.as_ref().map(|b| b[snp_index])
    }

    fn check_len<T>(&self, values: &Option<Vec<T>>) -> Result<(), CallMatrixError> {
        if let Some(values) = values {
            if values.len() != self.snp_count() {
                return Err(CallMatrixError::ArrayLengthMismatch { got: values.len(), snp_count: self.snp_count() });
            }
        }
        Ok(())
    }
}

impl CallMatrix for InMemoryCallMatrix {
    fn snp_count(&self) -> usize {
        if self.sample_count == 0 { 0 } else { self.calls.len() / self.sample_count }
    }

    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn calls_at(&self, snp_index: usize) -> &[CallCode] {
        let start = snp_index * self.sample_count;
        &self.calls[start..start + self.sample_count]
    }

    fn sample_ids(&self) -> &[SampleId] {
        &self.samples
    }

    fn chr_name(&self, snp_index: usize) -> Option<&ChrName> {
        self.chr_ids.as_ref().map(|c| &c[snp_index])
    }

    fn position(&self, snp_index: usize) -> Option<BpPosition> {
        self.positions.as_ref().map(|p| p[snp_index])
    }

    fn snp_id(&self, snp_index: usize) -> Option<&SnpId> {
        self.snp_ids.as_ref().map(|s| &s[snp_index])
    }
}

impl MutableCallMatrix for InMemoryCallMatrix {
    fn set_call(&mut self, snp_index: usize, sample_index: usize, call: Option<CallCode>) -> Result<(), CallMatrixError> {
        let snp_count = self.snp_count();
        if snp_index >= snp_count {
            return Err(CallMatrixError::SnpIndexOutOfBounds { index: snp_index, snp_count });
        }
        if sample_index >= self.sample_count {
            return Err(CallMatrixError::SampleIndexOutOfBounds { index: sample_index, sample_count: self.sample_count });
        }
        self.calls[snp_index * self.sample_count + sample_index] = call.unwrap_or(CallCode::N);
        Ok(())
    }

    fn set_snp_ids(&mut self, ids: Option<Vec<SnpId>>) -> Result<(), CallMatrixError> {
        self.check_len(&ids)?;
        self.snp_ids = ids;
        Ok(())
    }

    fn set_chr_ids(&mut self, ids: Option<Vec<ChrName>>) -> Result<(), CallMatrixError> {
        self.check_len(&ids)?;
        self.chr_ids = ids;
        Ok(())
    }

    fn set_positions(&mut self, positions: Option<Vec<BpPosition>>) -> Result<(), CallMatrixError> {
        self.check_len(&positions)?;
        self.positions = positions;
        Ok(())
    }

    fn set_a_alleles(&mut self, alleles: Option<Vec<char>>) -> Result<(), CallMatrixError> {
        self.check_len(&alleles)?;
        self.a_alleles = alleles;
        Ok(())
    }

    fn set_b_alleles(&mut self, alleles: Option<Vec<char>>) -> Result<(), CallMatrixError> {
        self.check_len(&alleles)?;
        self.b_alleles = alleles;
        Ok(())
    }

    fn set_build_id(&mut self, build_id: Option<String>) {
        self.build_id = build_id;
    }

    fn set_sorted_by_position(&mut self, sorted: bool) {
        self.sorted_by_position = sorted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_rejects_wrong_length() {
        let mut m = InMemoryCallMatrix::new(vec![SampleId::from("s1"), SampleId::from("s2")]);
        let err = m.push_row(vec![CallCode::A]).unwrap_err();
        assert!(matches!(err, CallMatrixError::ArrayLengthMismatch { got: 1, snp_count: 2 }));
    }

    #[test]
    fn calls_at_indexes_correctly() {
        let mut m = InMemoryCallMatrix::new(vec![SampleId::from("s1"), SampleId::from("s2")]);
        m.push_row(vec![CallCode::A, CallCode::B]).unwrap();
        m.push_row(vec![CallCode::B, CallCode::A]).unwrap();
        assert_eq!(m.snp_count(), 2);
        assert_eq!(m.calls_at(0), &[CallCode::A, CallCode::B]);
        assert_eq!(m.calls_at(1), &[CallCode::B, CallCode::A]);
    }

    #[test]
    fn set_call_null_deletes_to_n() {
        let mut m = InMemoryCallMatrix::new(vec![SampleId::from("s1")]);
        m.push_row(vec![CallCode::A]).unwrap();
        m.set_call(0, 0, None).unwrap();
        assert_eq!(m.calls_at(0), &[CallCode::N]);
    }

    #[test]
    fn set_chr_ids_null_deletes() {
        let mut m = InMemoryCallMatrix::new(vec![SampleId::from("s1")]);
        m.push_row(vec![CallCode::A]).unwrap();
        m.set_chr_ids(Some(vec![ChrName::parse("1").unwrap()])).unwrap();
        assert!(m.chr_name(0).is_some());
        m.set_chr_ids(None).unwrap();
        assert!(m.chr_name(0).is_none());
    }

    #[test]
    fn set_chr_ids_rejects_wrong_length() {
        let mut m = InMemoryCallMatrix::new(vec![SampleId::from("s1")]);
        m.push_row(vec![CallCode::A]).unwrap();
        m.push_row(vec![CallCode::B]).unwrap();
        let err = m.set_chr_ids(Some(vec![ChrName::parse("1").unwrap()])).unwrap_err();
        assert!(matches!(err, CallMatrixError::ArrayLengthMismatch { got: 1, snp_count: 2 }));
    }
}
