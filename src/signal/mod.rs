mod model;

pub use model::{
    evaluate, SignalQuality, SignalState, ATTENUATION_COEFFICIENT, HORIZON_THRESHOLD_DEG, MAX_BARS,
    REFERENCE_ALTITUDE_KM,
};
