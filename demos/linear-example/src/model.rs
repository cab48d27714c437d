use std::time::Duration;

use haruspex::{BoxError, Model, ModelId};
use tracing::info;

/// Coefficients of the toy regression model.
pub struct LinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearParams {
    pub fn score(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .map(|(w, f)| w * f)
            .sum::<f64>()
            + self.bias
    }
}

pub struct LinearModel {
    id: ModelId,
    params: LinearParams,
}

impl Model for LinearModel {
    type Instance = LinearParams;

    fn id(&self) -> &ModelId {
        &self.id
    }

    fn instance(&self) -> &LinearParams {
        &self.params
    }

    fn close(&self) {
        info!(model_id = %self.id, "model closed");
    }
}

/// Stands in for reading a checkpoint off disk.
pub fn load_model() -> Result<LinearModel, BoxError> {
    std::thread::sleep(Duration::from_millis(200));
    Ok(LinearModel {
        id: ModelId::new("linear-v1"),
        params: LinearParams {
            weights: vec![0.4, -0.2, 0.1],
            bias: 0.05,
        },
    })
}
