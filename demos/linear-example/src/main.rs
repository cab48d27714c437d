mod metrics;
mod model;

use std::sync::Arc;
use std::time::Duration;

use haruspex::featurize::ExtractFn;
use haruspex::loader::{MemoizedLoader, SupplierLoader};
use haruspex::predict::{PredictFn, PredictorBuilder};
use haruspex::{Model, Vector};
use rand::{Rng, thread_rng};
use tracing::{info, warn};

use crate::metrics::LogMetrics;
use crate::model::{LinearModel, load_model};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    // One model load shared by every request, started before traffic.
    let loader = MemoizedLoader::preloading(SupplierLoader::new(load_model));
    let extractor = ExtractFn::per_item(|x: &f64| Ok(vec![*x, x * x, x.sin()]));
    let predict_fn =
        PredictFn::per_vector(|model: &LinearModel, vector: &Vector<f64, Vec<f64>>| {
            Ok(model.instance().score(vector.value()))
        });

    let builder =
        PredictorBuilder::new(loader, extractor, predict_fn).instrumented(Arc::new(LogMetrics));
    let predictor = builder.predictor();

    let handles = (0..100)
        .map(|request| {
            let predictor = predictor.clone();
            let inputs: Vec<f64> = {
                let mut rng = thread_rng();
                (0..3).map(|_| rng.gen_range(-1.0..1.0)).collect()
            };

            tokio::spawn(async move {
                match predictor
                    .predict_within(inputs, Duration::from_secs(1))
                    .await
                {
                    Ok(predictions) => {
                        let scores: Vec<f64> =
                            predictions.iter().map(|p| *p.value()).collect();
                        info!(request, ?scores, "request served");
                    }
                    Err(error) => warn!(request, %error, "request failed"),
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in futures::future::join_all(handles).await {
        if let Err(e) = handle {
            warn!("Err joining handle: {:?}", e);
        }
    }
}
