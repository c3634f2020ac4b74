pub mod momentum;

pub use momentum::{
    MomentumError, MomentumEvaluator, MomentumMetrics, MomentumParams, MomentumSignal,
};
