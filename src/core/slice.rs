use crate::error::{DaisyError, Result};
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A `start:stop:step` selection over a chain, every component optional.
///
/// Negative positions count from the end and a negative step walks backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Slice { start, stop, step }
    }

    /// Positions selected in a sequence of length `len`, in visiting order.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(DaisyError::InvalidSlice("slice step cannot be zero".to_string()));
        }

        let len = len as isize;
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(i) => {
                let i = if i < 0 { i + len } else { i };
                if i < 0 {
                    if step < 0 { -1 } else { 0 }
                } else if i >= len {
                    if step < 0 { len - 1 } else { len }
                } else {
                    i
                }
            }
        };

        let (start, stop) = if step > 0 {
            (clamp(self.start, 0), clamp(self.stop, len))
        } else {
            (clamp(self.start, len - 1), clamp(self.stop, -1))
        };

        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(out)
    }
}

/// Renders the bracket suffix used to name sliced chains, e.g. `[1:3]`.
impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<isize>| v.map(|v| v.to_string()).unwrap_or_default();
        let (s, e, st) = (show(self.start), show(self.stop), show(self.step));
        match (self.start.is_some(), self.stop.is_some(), self.step.is_some()) {
            (false, false, false) => write!(f, "[:]"),
            (false, false, true) => write!(f, "[::{}]", st),
            (false, true, false) => write!(f, "[:{}:]", e),
            (false, true, true) => write!(f, "[:{}:{}]", e, st),
            (true, false, false) => write!(f, "[{}:]", s),
            (true, false, true) => write!(f, "[{}::{}]", s, st),
            (true, true, false) => write!(f, "[{}:{}]", s, e),
            (true, true, true) => write!(f, "[{}:{}:{}]", s, e, st),
        }
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::default()
    }
}

impl From<Range<isize>> for Slice {
    fn from(r: Range<isize>) -> Self {
        Slice::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(r: RangeFrom<isize>) -> Self {
        Slice::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(r: RangeTo<isize>) -> Self {
        Slice::new(None, Some(r.end), None)
    }
}
