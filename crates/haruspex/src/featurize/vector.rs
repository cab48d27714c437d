/// An (input, extracted-value) pair produced by feature extraction.
///
/// Vectors are ephemeral: they exist between the extraction and prediction
/// stages of a single `predict()` call. Their order parallels the input
/// batch - the extractor produces exactly one vector per input, in input
/// order, and downstream code zips by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<I, V> {
    input: I,
    value: V,
}

impl<I, V> Vector<I, V> {
    /// Pairs an input with its extracted value.
    pub fn new(input: I, value: V) -> Self {
        Self { input, value }
    }

    /// The raw input this vector was extracted from.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The extracted feature value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the vector, returning both halves.
    pub fn into_parts(self) -> (I, V) {
        (self.input, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let vector = Vector::new("input", 0.5);

        assert_eq!(*vector.input(), "input");
        assert_eq!(*vector.value(), 0.5);
    }

    #[test]
    fn test_into_parts() {
        let vector = Vector::new(7, vec![1.0, 2.0]);
        let (input, value) = vector.into_parts();

        assert_eq!(input, 7);
        assert_eq!(value, vec![1.0, 2.0]);
    }
}
