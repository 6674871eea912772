//! Turning rows into columns.

use crate::{
    lifecycle::{SourceItem, SourceSet},
    tracer::{NoopTracer, SeqTracer},
};

/// Yields the columns of a sequence of rows.
///
/// Column `i` holds the `i`-th element of every row that has one, in row
/// order; rows that have run out are skipped. All rows are opened on the first
/// call to `next`.
///
/// ```
/// use moreseq::transpose;
///
/// let columns: Vec<_> = transpose([vec![10, 11], vec![20], vec![30, 31, 32]]).collect();
/// assert_eq!(columns, [vec![10, 20, 30], vec![11, 31], vec![32]]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Transpose<O, Tr = NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    rows: SourceSet<O, Tr>,
}

/// Transposes a sequence of rows.
pub fn transpose<O>(rows: O) -> Transpose<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    Transpose {
        rows: SourceSet::new(rows),
    }
}

impl<O, Tr> Transpose<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    /// Reports row lifecycle events to `tracer`.
    pub fn with_tracer<T2: SeqTracer>(self, tracer: T2) -> Transpose<O, T2> {
        Transpose {
            rows: self.rows.with_tracer(tracer),
        }
    }

    /// The tracer receiving lifecycle events.
    #[must_use]
    pub fn tracer(&self) -> &Tr {
        self.rows.tracer()
    }
}

impl<O, Tr> Iterator for Transpose<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    type Item = Vec<SourceItem<O>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.open_all();
        let mut column = Vec::with_capacity(self.rows.live_count());
        for index in 0..self.rows.len() {
            if let Some(item) = self.rows.advance(index) {
                column.push(item);
            }
        }
        if column.is_empty() {
            self.rows.dispose();
            return None;
        }
        Some(column)
    }
}
