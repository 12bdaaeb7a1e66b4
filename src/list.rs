use std::{error::Error, fmt::{self, Debug, Display}};

use tracing::{debug, trace};

use crate::{comma_format, ErrorCollector, ErrorFormatter};

/// An ordered list of errors which can be reported as a single error.
/// 
/// `ErrorList` is intended for procedures which keep going after something fails, such as
/// validating every field of a config file or closing every handle in a batch. Errors are pushed
/// as they happen, and at the end the list is collapsed with [`as_error`](ErrorList::as_error)
/// into either nothing or one error value describing all of them.
/// 
/// ```
/// # use errlist::ErrorList;
/// fn parse_all(input: &[&str]) -> (Vec<u32>, ErrorList<std::num::ParseIntError>) {
///     let mut errors = ErrorList::new();
///     let mut values = vec![];
///     for item in input {
///         if let Some(v) = errors.push_result(item.parse::<u32>()) {
///             values.push(v);
///         }
///     }
///     (values, errors)
/// }
/// 
/// let (values, errors) = parse_all(&["1", "x", "3"]);
/// assert_eq!(values, vec![1, 3]);
/// assert_eq!(errors.len(), 1);
/// assert!(errors.as_error().is_some());
/// ```
/// 
/// # Formatting
/// 
/// The [`Display`] output is produced by a pluggable [`ErrorFormatter`]. Without one, the list
/// uses [`comma_format`], joining each error's message with `,`. The formatter only affects the
/// rendered message; it has no bearing on which errors are held or whether the list collapses to
/// an error.
/// 
/// # Concurrency
/// 
/// There is no internal locking. To push from several threads at once, wrap the list in a
/// [`Mutex`](std::sync::Mutex).
pub struct ErrorList<E> {
    errors: Vec<E>,
    formatter: Option<ErrorFormatter<E>>,
}

impl<E> ErrorList<E> {
    /// Constructs an empty `ErrorList` which renders with the default formatter.
    /// 
    /// ```
    /// # use errlist::ErrorList;
    /// let list = ErrorList::<String>::new();
    /// assert!(list.is_empty());
    /// assert!(list.as_error().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        ErrorList { errors: vec![], formatter: None }
    }

    /// Constructs an empty `ErrorList` which renders with a custom formatter.
    /// 
    /// ```
    /// # use errlist::{ErrorFormatter, ErrorList};
    /// let and = ErrorFormatter::new(|errs: &[&str]| errs.join(" and "));
    /// let mut list = ErrorList::with_formatter(and);
    /// list.push("this");
    /// list.push("that");
    /// assert_eq!(list.to_string(), "this and that");
    /// ```
    #[must_use]
    pub fn with_formatter(formatter: ErrorFormatter<E>) -> Self {
        ErrorList { errors: vec![], formatter: Some(formatter) }
    }

    /// Replaces the formatter used to render this list.
    pub fn set_formatter(&mut self, formatter: ErrorFormatter<E>) {
        self.formatter = Some(formatter);
    }

    /// Reverts to the default formatter.
    pub fn clear_formatter(&mut self) {
        self.formatter = None;
    }

    /// Adds an error to the end of the list. Passing `None` does nothing, so the result of an
    /// operation which might have failed can be pushed directly.
    /// 
    /// ```
    /// # use errlist::ErrorList;
    /// let mut list = ErrorList::<&str>::new();
    /// list.push("a");
    /// list.push(None);
    /// list.push(Some("b"));
    /// assert_eq!(list.errors(), &["a", "b"]);
    /// ```
    pub fn push(&mut self, error: impl Into<Option<E>>) {
        let Some(error) = error.into() else {
            trace!("ignoring absent error");
            return;
        };

        self.errors.push(error);
        trace!(count = self.errors.len(), "pushed error");
    }

    /// Pushes the error of a failed `result`, or returns the value of a successful one.
    /// 
    /// ```
    /// # use errlist::ErrorList;
    /// let mut list = ErrorList::new();
    /// assert_eq!(list.push_result("12".parse::<u8>()), Some(12));
    /// assert_eq!(list.push_result("nope".parse::<u8>()), None);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push_result<T>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Returns this list as an error if it holds any errors, or `None` if it is empty.
    /// 
    /// The returned reference is to this same list, so callers get every accumulated error and
    /// the configured formatting. To handle a list which might not exist, use the free function
    /// [`as_error`](crate::as_error).
    /// 
    /// ```
    /// # use errlist::ErrorList;
    /// let mut list = ErrorList::<&str>::new();
    /// assert!(list.as_error().is_none());
    /// 
    /// list.push("failed");
    /// let err = list.as_error().unwrap();
    /// assert!(std::ptr::eq(err, &list));
    /// ```
    pub fn as_error(&self) -> Option<&Self> {
        if self.errors.is_empty() {
            return None;
        }

        debug!(count = self.errors.len(), "error list collapsed to an error");
        Some(self)
    }

    /// Consumes this list, returning `Ok(())` if it is empty, or `Err` containing the list
    /// otherwise. Useful for finishing a function with `?`.
    /// 
    /// ```
    /// # use errlist::ErrorList;
    /// fn check(names: &[&str]) -> Result<(), ErrorList<String>> {
    ///     let mut errors = ErrorList::<String>::new();
    ///     for name in names {
    ///         if name.is_empty() {
    ///             errors.push("empty name".to_owned());
    ///         }
    ///     }
    ///     errors.into_result()
    /// }
    /// 
    /// assert!(check(&["a", "b"]).is_ok());
    /// assert_eq!(check(&["a", ""]).unwrap_err().to_string(), "empty name");
    /// ```
    pub fn into_result(self) -> Result<(), Self> {
        self.into_result_with(())
    }

    /// Like [`into_result`](ErrorList::into_result), but with a value to return when there are
    /// no errors.
    pub fn into_result_with<T>(self, value: T) -> Result<T, Self> {
        if self.as_error().is_some() {
            Err(self)
        } else {
            Ok(value)
        }
    }

    /// The accumulated errors, in the order they were pushed.
    /// 
    /// This borrows the list's own storage rather than copying it.
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Consumes this list, returning the accumulated errors.
    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }

    /// The number of errors in this list.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no errors have been pushed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the accumulated errors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.errors.iter()
    }
}

/// Collapses a list which may not exist into an optional error.
/// 
/// Both a missing list and an empty list produce `None`, so this can be called unconditionally
/// at the end of an accumulation loop, whether or not the list was ever created.
/// 
/// ```
/// # use errlist::{as_error, ErrorList};
/// assert!(as_error::<&str>(None).is_none());
/// assert!(as_error(Some(&ErrorList::<&str>::new())).is_none());
/// 
/// let mut list = ErrorList::<&str>::new();
/// list.push("oops");
/// assert!(as_error(Some(&list)).is_some());
/// ```
pub fn as_error<E>(list: Option<&ErrorList<E>>) -> Option<&ErrorList<E>> {
    list?.as_error()
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        ErrorList::new()
    }
}

impl<E: Clone> Clone for ErrorList<E> {
    fn clone(&self) -> Self {
        ErrorList {
            errors: self.errors.clone(),
            formatter: self.formatter.clone(),
        }
    }
}

impl<E: Display> Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.formatter {
            Some(formatter) => formatter.format(&self.errors),
            None => comma_format(&self.errors),
        };
        f.write_str(&message)
    }
}

impl<E: Debug> Debug for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorList")
            .field("errors", &self.errors)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

// No single source: the constituents are reached through `MultiError`.
impl<E: Debug + Display> Error for ErrorList<E> {}

impl<E> ErrorCollector<E> for ErrorList<E> {
    fn push_error(&mut self, error: E) {
        self.push(error);
    }

    fn propagate(self, other: &mut impl ErrorCollector<E>) {
        for error in self.errors {
            other.push_error(error);
        }
    }
}

impl<E> FromIterator<E> for ErrorList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = ErrorList::new();
        list.extend(iter);
        list
    }
}

impl<E> Extend<E> for ErrorList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

impl<E> IntoIterator for ErrorList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a ErrorList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{numbered, ErrorFormatter};

    #[derive(Debug, Clone, PartialEq, thiserror::Error)]
    enum StepError {
        #[error("x")]
        X,
        #[error("y")]
        Y,
    }

    #[test]
    fn absent_pushes_leave_no_entries() {
        let mut list = ErrorList::<StepError>::new();
        list.push(StepError::X);
        list.push(None);
        list.push(StepError::Y);
        assert_eq!(list.errors(), &[StepError::X, StepError::Y]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut list = ErrorList::<StepError>::new();
        list.push(StepError::X);
        list.push(StepError::X);
        assert_eq!(list.errors(), &[StepError::X, StepError::X]);
    }

    #[test]
    fn default_rendering() {
        let mut list = ErrorList::<StepError>::new();
        assert_eq!(list.to_string(), "");
        list.push(StepError::X);
        assert_eq!(list.to_string(), "x");
        list.push(StepError::Y);
        assert_eq!(list.to_string(), "x,y");
    }

    #[test]
    fn collapse_is_the_list_itself() {
        let mut list = ErrorList::<StepError>::new();
        assert!(list.as_error().is_none());
        assert!(as_error(Some(&list)).is_none());
        assert!(as_error::<StepError>(None).is_none());

        list.push(StepError::Y);
        let err = as_error(Some(&list)).unwrap();
        assert!(std::ptr::eq(err, &list));
    }

    #[test]
    fn constant_formatter_only_changes_rendering() {
        let mut plain = ErrorList::<StepError>::new();
        let mut custom = ErrorList::with_formatter(ErrorFormatter::new(|_: &[StepError]| {
            "constant".to_owned()
        }));
        assert_eq!(custom.to_string(), "constant");
        assert!(custom.as_error().is_none());

        for e in [StepError::X, StepError::Y] {
            plain.push(e.clone());
            custom.push(e);
        }

        assert_eq!(custom.to_string(), "constant");
        assert_eq!(custom.errors(), plain.errors());
        assert!(custom.as_error().is_some());
    }

    #[test]
    fn formatter_can_be_swapped_and_cleared() {
        let mut list: ErrorList<StepError> = [StepError::X, StepError::Y].into_iter().collect();
        list.set_formatter(numbered());
        assert_eq!(list.to_string(), "1. x\n2. y");
        list.clear_formatter();
        assert_eq!(list.to_string(), "x,y");
    }

    #[test]
    fn repeated_reads_agree() {
        let mut list = ErrorList::<StepError>::new();
        list.push(StepError::X);
        assert_eq!(list.to_string(), list.to_string());
        assert_eq!(list.errors(), list.errors());
        assert!(std::ptr::eq(list.as_error().unwrap(), list.as_error().unwrap()));
    }

    #[test]
    fn into_result_carries_the_errors() {
        let empty = ErrorList::<StepError>::new();
        assert_eq!(empty.into_result_with(5).unwrap(), 5);

        let mut list = ErrorList::<StepError>::new();
        list.push(StepError::Y);
        let err = list.into_result().unwrap_err();
        assert_eq!(err.into_errors(), vec![StepError::Y]);
    }

    #[test]
    fn has_no_source_chain() {
        let list: ErrorList<StepError> = vec![StepError::X, StepError::Y].into_iter().collect();
        let err: &dyn Error = &list;

        let mut chain = vec![];
        let mut current = Some(err);
        while let Some(e) = current {
            chain.push(e.to_string());
            current = e.source();
        }
        assert_eq!(chain, vec!["x,y"]);
    }

    #[test]
    fn mixed_boxed_errors_collapse_to_one_error() {
        let mut list = ErrorList::<Box<dyn Error + Send + Sync>>::new();
        let io: Box<dyn Error + Send + Sync> = Box::new(std::io::Error::other("disk full"));
        list.push(io);
        if let Err(e) = "x".parse::<u8>() {
            let parse: Box<dyn Error + Send + Sync> = Box::new(e);
            list.push(parse);
        }
        list.push(Box::<dyn Error + Send + Sync>::from(StepError::X));

        let err: &dyn Error = list.as_error().unwrap();
        assert_eq!(err.to_string(), "disk full,invalid digit found in string,x");
        assert!(err.source().is_none());
    }

    #[test]
    fn mixed_list_passes_through_question_mark() {
        fn run() -> Result<(), Box<dyn Error>> {
            let mut list = ErrorList::<Box<dyn Error + Send + Sync>>::new();
            list.push(Box::<dyn Error + Send + Sync>::from("bad input"));
            list.into_result()?;
            Ok(())
        }

        assert_eq!(run().unwrap_err().to_string(), "bad input");
    }

    #[test]
    fn debug_shows_errors_not_formatter() {
        let mut list = ErrorList::<StepError>::with_formatter(numbered());
        list.push(StepError::X);
        assert_eq!(
            format!("{list:?}"),
            "ErrorList { errors: [X], custom_formatter: true }",
        );
    }

    #[test]
    fn propagate_moves_errors_in_order() {
        let mut source = ErrorList::<StepError>::new();
        source.push(StepError::X);
        source.push(StepError::Y);

        let mut dest = ErrorList::<StepError>::new();
        dest.push(StepError::Y);
        source.propagate(&mut dest);

        assert_eq!(dest.errors(), &[StepError::Y, StepError::X, StepError::Y]);
    }

    #[test]
    fn clone_keeps_the_formatter() {
        let mut list = ErrorList::<StepError>::with_formatter(numbered());
        list.push(StepError::X);
        let copy = list.clone();
        assert_eq!(copy.to_string(), "1. x");
    }
}
