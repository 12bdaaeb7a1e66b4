use std::{fmt::Display, sync::Arc};

/// A strategy for turning a list of errors into a single message.
/// 
/// Formatters are shared behind an [`Arc`] so that an [`ErrorList`] stays cheap to clone, and must
/// be `Send + Sync` so that a list is too whenever its errors are.
/// 
/// ```
/// # use errlist::{ErrorFormatter, ErrorList};
/// let shouting: ErrorFormatter<&str> = ErrorFormatter::new(|errs: &[&str]| {
///     errs.iter().map(|e| e.to_uppercase()).collect::<Vec<_>>().join("! ")
/// });
/// 
/// let mut list = ErrorList::with_formatter(shouting);
/// list.push("oh no");
/// list.push("not again");
/// assert_eq!(list.to_string(), "OH NO! NOT AGAIN");
/// ```
/// 
/// [`ErrorList`]: crate::ErrorList
pub struct ErrorFormatter<E> {
    func: Arc<dyn Fn(&[E]) -> String + Send + Sync>,
}

impl<E> ErrorFormatter<E> {
    /// Wraps a function as a formatter.
    pub fn new(func: impl Fn(&[E]) -> String + Send + Sync + 'static) -> Self {
        ErrorFormatter { func: Arc::new(func) }
    }

    /// Renders a list of errors with this formatter.
    pub fn format(&self, errors: &[E]) -> String {
        (self.func)(errors)
    }
}

impl<E> Clone for ErrorFormatter<E> {
    fn clone(&self) -> Self {
        ErrorFormatter { func: Arc::clone(&self.func) }
    }
}

/// The default formatter: each error's [`Display`] output, separated by commas.
/// 
/// ```
/// # use errlist::comma_format;
/// assert_eq!(comma_format::<&str>(&[]), "");
/// assert_eq!(comma_format(&["x"]), "x");
/// assert_eq!(comma_format(&["x", "y"]), "x,y");
/// ```
pub fn comma_format<E: Display>(errors: &[E]) -> String {
    join_with(errors, ",")
}

/// A formatter which separates each error's message with `sep`.
/// 
/// ```
/// # use errlist::{joined, ErrorList};
/// let mut list = ErrorList::<&str>::with_formatter(joined("; "));
/// list.push("a");
/// list.push("b");
/// assert_eq!(list.to_string(), "a; b");
/// ```
pub fn joined<E: Display + 'static>(sep: &str) -> ErrorFormatter<E> {
    let sep = sep.to_owned();
    ErrorFormatter::new(move |errors: &[E]| join_with(errors, &sep))
}

/// A formatter which puts each error on its own line, prefixed with `- `.
/// 
/// ```
/// # use errlist::{bulleted, ErrorList};
/// let mut list = ErrorList::<&str>::with_formatter(bulleted());
/// list.push("a");
/// list.push("b");
/// assert_eq!(list.to_string(), "- a\n- b");
/// ```
pub fn bulleted<E: Display + 'static>() -> ErrorFormatter<E> {
    ErrorFormatter::new(|errors: &[E]| {
        errors.iter()
            .map(|e| format!("- {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// A formatter which puts each error on its own line, numbered from 1.
/// 
/// ```
/// # use errlist::{numbered, ErrorList};
/// let mut list = ErrorList::<&str>::with_formatter(numbered());
/// list.push("a");
/// list.push("b");
/// assert_eq!(list.to_string(), "1. a\n2. b");
/// ```
pub fn numbered<E: Display + 'static>() -> ErrorFormatter<E> {
    ErrorFormatter::new(|errors: &[E]| {
        errors.iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {e}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn join_with<E: Display>(errors: &[E], sep: &str) -> String {
    errors.iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}
