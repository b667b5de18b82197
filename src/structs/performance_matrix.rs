use super::visit::SubjectId;

/// Per-subject, per-phase success ratios.
///
/// Rows follow the subject order and columns follow the phase order that
/// were supplied when the matrix was computed. A cell is [`None`] when the
/// subject had no qualifying visits in that phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMatrix {
    subjects: Vec<SubjectId>,
    phase_names: Vec<String>,
    /// Row-major.
    cells: Vec<Option<f64>>,
}

impl PerformanceMatrix {
    /// Assembles a matrix from its rows.
    ///
    /// # Panics
    ///
    /// If the number of rows does not match the number of subjects, or any
    /// row length does not match the number of phases.
    pub(crate) fn from_rows(
        subjects: Vec<SubjectId>,
        phase_names: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Self {
        assert_eq!(subjects.len(), rows.len());
        let mut cells = Vec::with_capacity(subjects.len() * phase_names.len());
        for row in rows {
            assert_eq!(row.len(), phase_names.len());
            cells.extend(row);
        }

        Self {
            subjects,
            phase_names,
            cells,
        }
    }

    pub fn subjects(&self) -> &[SubjectId] {
        &self.subjects
    }

    pub fn phase_names(&self) -> &[String] {
        &self.phase_names
    }

    pub fn num_subjects(&self) -> usize {
        self.subjects.len()
    }

    pub fn num_phases(&self) -> usize {
        self.phase_names.len()
    }

    pub fn cell(&self, subject: usize, phase: usize) -> Option<f64> {
        if subject >= self.num_subjects() || phase >= self.num_phases() {
            return None;
        }

        self.cells[subject * self.num_phases() + phase]
    }

    /// The performance curve of a single subject, [`None`] if out of range.
    pub fn row(&self, subject: usize) -> Option<&[Option<f64>]> {
        if subject >= self.num_subjects() {
            return None;
        }

        let width = self.num_phases();
        Some(&self.cells[subject * width..(subject + 1) * width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> + Clone {
        // chunks() rejects a zero width; a matrix without phases has no cells anyway.
        self.cells.chunks(self.num_phases().max(1))
    }

    /// All cells of one phase, one per subject, [`None`] if out of range.
    pub fn column(&self, phase: usize) -> Option<impl Iterator<Item = Option<f64>> + Clone + '_> {
        if phase >= self.num_phases() {
            return None;
        }

        Some(self.rows().map(move |row| row[phase]))
    }
}
