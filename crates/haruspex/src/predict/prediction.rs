/// An (input, predicted-value) pair produced by the prediction stage.
///
/// One prediction per vector, in the extractor's output order. List order
/// is the only correlation guarantee callers get between inputs and
/// predictions, which is why the extraction stage is required to keep
/// vectors parallel to the input batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<I, P> {
    input: I,
    value: P,
}

impl<I, P> Prediction<I, P> {
    /// Pairs an input with its predicted value.
    pub fn new(input: I, value: P) -> Self {
        Self { input, value }
    }

    /// The raw input this prediction belongs to.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The predicted value.
    pub fn value(&self) -> &P {
        &self.value
    }

    /// Consumes the prediction, returning both halves.
    pub fn into_parts(self) -> (I, P) {
        (self.input, self.value)
    }
}
