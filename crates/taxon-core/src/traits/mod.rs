mod clusterer;

pub use clusterer::IClusterer;
