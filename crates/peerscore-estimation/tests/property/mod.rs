mod estimator_properties;
mod evaluation_properties;
