use std::error::Error;

use crate::{AnyError, ErrorList};

/// An error which is made up of several other errors.
/// 
/// [`Error::source`] can only describe a single chain of causes. Types implementing
/// `MultiError` additionally expose every constituent error, so that generic reporting code can
/// look inside an aggregate without knowing its concrete type.
pub trait MultiError: Error {
    /// The errors which make up this one, in order.
    fn wrapped_errors(&self) -> Vec<&(dyn Error + 'static)>;
}

impl<E: Error + 'static> MultiError for ErrorList<E> {
    fn wrapped_errors(&self) -> Vec<&(dyn Error + 'static)> {
        self.iter()
            .map(|e| e as &(dyn Error + 'static))
            .collect()
    }
}

/// Collects every error within a [`MultiError`], depth first.
/// 
/// Each wrapped error is followed by its own [`source`](Error::source) chain before moving on to
/// the next wrapped error. Nested lists, either an `ErrorList<AnyError>` or any list wrapped in
/// an [`AnyError`], are replaced by the errors inside them.
/// 
/// ```
/// # use errlist::{flatten, ErrorList};
/// use std::{error::Error, fmt, io};
/// 
/// #[derive(Debug)]
/// struct ReadConfig(io::Error);
/// 
/// impl fmt::Display for ReadConfig {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "could not read config")
///     }
/// }
/// 
/// impl Error for ReadConfig {
///     fn source(&self) -> Option<&(dyn Error + 'static)> {
///         Some(&self.0)
///     }
/// }
/// 
/// let mut list = ErrorList::<ReadConfig>::new();
/// list.push(ReadConfig(io::Error::other("disk on fire")));
/// 
/// let messages: Vec<String> = flatten(&list).iter().map(|e| e.to_string()).collect();
/// assert_eq!(messages, vec!["could not read config", "disk on fire"]);
/// ```
pub fn flatten<'a>(errors: &'a (impl MultiError + ?Sized)) -> Vec<&'a (dyn Error + 'static)> {
    let mut flat = vec![];
    for error in errors.wrapped_errors() {
        push_chain(error, &mut flat);
    }
    flat
}

fn push_chain<'a>(error: &'a (dyn Error + 'static), flat: &mut Vec<&'a (dyn Error + 'static)>) {
    let mut current = Some(error);
    while let Some(e) = current {
        if let Some(nested) = as_nested(e) {
            for inner in nested.wrapped_errors() {
                push_chain(inner, flat);
            }
            return;
        }

        flat.push(e);
        current = e.source();
    }
}

fn as_nested<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn MultiError> {
    if let Some(list) = error.downcast_ref::<ErrorList<AnyError>>() {
        return Some(list);
    }

    let multi = error.downcast_ref::<AnyError>()?.as_multi()?;
    Some(multi)
}
