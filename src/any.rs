use std::{error::Error, fmt::{self, Debug, Display}};

use crate::{ErrorList, MultiError};

/// An error of any type, for lists which collect failures from unrelated sources.
/// 
/// `ErrorList<AnyError>` is both an [`Error`] and a [`MultiError`], so it can be returned with `?`
/// and still be taken apart with [`flatten`](crate::flatten). Another `ErrorList` converted into
/// an `AnyError` keeps its individual errors, and `flatten` reaches into it.
/// 
/// ```
/// # use errlist::{flatten, AnyError, ErrorList};
/// let mut inner = ErrorList::<std::io::Error>::new();
/// inner.push(std::io::Error::other("a"));
/// inner.push(std::io::Error::other("b"));
/// 
/// let mut outer = ErrorList::<AnyError>::new();
/// outer.push(AnyError::from(inner));
/// outer.push_any("x".parse::<u8>().unwrap_err());
/// 
/// assert_eq!(outer.to_string(), "a,b,invalid digit found in string");
/// 
/// let leaves: Vec<String> = flatten(&outer).iter().map(|e| e.to_string()).collect();
/// assert_eq!(leaves, vec!["a", "b", "invalid digit found in string"]);
/// ```
pub struct AnyError {
    inner: Inner,
}

enum Inner {
    Single(anyhow::Error),
    List(Box<dyn MultiError + Send + Sync>),
}

impl AnyError {
    /// Wraps a single error.
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        AnyError { inner: Inner::Single(anyhow::Error::new(error)) }
    }

    /// The errors inside, if this wraps a list of errors.
    pub fn as_multi(&self) -> Option<&(dyn MultiError + Send + Sync)> {
        match &self.inner {
            Inner::Single(_) => None,
            Inner::List(list) => Some(list.as_ref()),
        }
    }
}

impl From<anyhow::Error> for AnyError {
    fn from(error: anyhow::Error) -> Self {
        AnyError { inner: Inner::Single(error) }
    }
}

impl<E: Error + Send + Sync + 'static> From<ErrorList<E>> for AnyError {
    fn from(list: ErrorList<E>) -> Self {
        AnyError { inner: Inner::List(Box::new(list)) }
    }
}

impl Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Single(error) => Display::fmt(error, f),
            Inner::List(list) => Display::fmt(list, f),
        }
    }
}

impl Debug for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Single(error) => Debug::fmt(error, f),
            Inner::List(list) => Debug::fmt(list, f),
        }
    }
}

impl Error for AnyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.inner {
            Inner::Single(error) => error.chain().nth(1),
            Inner::List(_) => None,
        }
    }
}

impl ErrorList<AnyError> {
    /// Wraps `error` in an [`AnyError`] and pushes it.
    pub fn push_any(&mut self, error: impl Error + Send + Sync + 'static) {
        self.push(AnyError::new(error));
    }
}
