use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::syntax::*;

impl Display for GenericAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl Display for SdfMapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.delay, self.path, self.file)
    }
}

// the canonical form always spells out the name, even the default one.
impl Display for RunRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.top)?;
        if !self.generics.is_empty() {
            write!(f, ",{}", self.generics.iter().format(","))?;
        }
        if !self.sdf.is_empty() {
            write!(f, ";{}", self.sdf.iter().format(";"))?;
        }
        Ok(())
    }
}
