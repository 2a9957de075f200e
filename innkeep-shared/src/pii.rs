use std::fmt;

const MASK: &str = "********";

/// Guest contact data as it may appear in log lines.
///
/// Both `{:?}` and `{}` print a fixed mask. Absent optional fields print
/// `None` so logs still show whether a value was supplied.
#[derive(Clone, Copy)]
pub struct Masked<T>(pub T);

impl<'a> Masked<&'a str> {
    pub fn field(value: Option<&'a String>) -> Option<Self> {
        value.map(|v| Masked(v.as_str()))
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}
