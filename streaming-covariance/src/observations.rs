use nalgebra::{DMatrix, DMatrixView, DVector, DVectorView, Scalar};

/// Borrowed input for a batch update.
///
/// `Rows` holds one observation per row. `Single` is a lone observation,
/// regardless of which way the vector is oriented.
#[derive(Debug, Clone)]
pub enum Observations<'a, T: Scalar> {
    Rows(DMatrixView<'a, T>),
    Single(DVectorView<'a, T>),
}

impl<'a, T: Scalar> Observations<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            Observations::Rows(rows) => rows.nrows(),
            Observations::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn feature_count(&self) -> usize {
        match self {
            Observations::Rows(rows) => rows.ncols(),
            Observations::Single(x) => x.len(),
        }
    }

    /// Observations as owned column vectors, in row order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = DVector<T>> + '_ {
        let (rows, single) = match self {
            Observations::Rows(rows) => (Some(rows), None),
            Observations::Single(x) => (None, Some(x.clone_owned())),
        };
        rows.into_iter()
            .flat_map(|rows| rows.row_iter().map(|row| row.transpose()))
            .chain(single)
    }
}

impl<'a, T: Scalar> From<&'a DMatrix<T>> for Observations<'a, T> {
    fn from(data: &'a DMatrix<T>) -> Self {
        Observations::Rows(data.rows(0, data.nrows()))
    }
}

impl<'a, T: Scalar> From<DMatrixView<'a, T>> for Observations<'a, T> {
    fn from(data: DMatrixView<'a, T>) -> Self {
        Observations::Rows(data)
    }
}

impl<'a, T: Scalar> From<&'a DVector<T>> for Observations<'a, T> {
    fn from(x: &'a DVector<T>) -> Self {
        Observations::Single(x.rows(0, x.len()))
    }
}

impl<'a, T: Scalar> From<&'a [T]> for Observations<'a, T> {
    fn from(x: &'a [T]) -> Self {
        Observations::Single(DVectorView::from_slice(x, x.len()))
    }
}
