/// Something which errors can be pushed into.
/// 
/// This allows errors to be handled with [`propagate`], merging the errors of one procedure into
/// the collection of the procedure which called it.
/// 
/// ```
/// # use errlist::{ErrorCollector, ErrorList};
/// let mut inner = ErrorList::<&str>::new();
/// inner.push("inner failure");
/// 
/// let mut outer: Vec<&str> = vec!["outer failure"];
/// inner.propagate(&mut outer);
/// assert_eq!(outer, vec!["outer failure", "inner failure"]);
/// ```
/// 
/// [`propagate`]: ErrorCollector::propagate
pub trait ErrorCollector<E> {
    /// Add a new error to the collection of errors.
    fn push_error(&mut self, error: E);

    /// Consumes this collector and pushes all of its errors into a different collector, in the
    /// order they were collected.
    fn propagate(self, other: &mut impl ErrorCollector<E>);
}

impl<E> ErrorCollector<E> for Vec<E> {
    fn push_error(&mut self, error: E) {
        self.push(error);
    }

    fn propagate(self, other: &mut impl ErrorCollector<E>) {
        for error in self {
            other.push_error(error);
        }
    }
}
