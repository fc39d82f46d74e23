//! Candidate from/to partitions of a query tail

/// One candidate reading of the tail: source phrase and (maybe empty) target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePair {
    pub from: String,
    pub to: String,
}

impl PhrasePair {
    pub fn new(from: &str, to: &str) -> Self {
        PhrasePair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Lazy iterator over every split point, narrowest `from` first
#[derive(Debug, Clone)]
pub struct Splits<'a> {
    atoms: Vec<&'a str>,
    next: usize,
}

/// `splits("a b c")` yields `("a", "b c")`, `("a b", "c")`, `("a b c", "")`.
pub fn splits(tail: &str) -> Splits<'_> {
    Splits {
        atoms: tail.split_whitespace().collect(),
        next: 0,
    }
}

impl<'a> Iterator for Splits<'a> {
    type Item = PhrasePair;

    fn next(&mut self) -> Option<PhrasePair> {
        if self.next >= self.atoms.len() {
            return None;
        }
        self.next += 1;
        let (from, to) = self.atoms.split_at(self.next);
        Some(PhrasePair {
            from: from.join(" "),
            to: to.join(" "),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.atoms.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Splits<'_> {}
