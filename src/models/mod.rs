// src/models/mod.rs
//
// Built-in interactive sessions, one per class of the course.

pub mod aliasing;
pub mod antialias;
pub mod causality;
pub mod convolution;
pub mod dft;
pub mod filtering;
pub mod impulse_response;
pub mod lti_systems;
pub mod quantization;
pub mod reconstruction;
pub mod spectrum_replication;
pub mod windowing;
pub mod z_plane;
pub mod zero_padding;

use crate::session::SignalModel;

pub fn all_models() -> Vec<Box<dyn SignalModel>> {
    vec![
        Box::new(filtering::TwoToneFiltering),
        Box::new(aliasing::Aliasing),
        Box::new(spectrum_replication::SpectrumReplication),
        Box::new(antialias::AntiAliasPrefilter),
        Box::new(reconstruction::Reconstruction),
        Box::new(quantization::Quantization),
        Box::new(lti_systems::LinearSystems),
        Box::new(impulse_response::ImpulseResponse),
        Box::new(causality::CausalityStability),
        Box::new(convolution::Convolution),
        Box::new(windowing::Windowing),
        Box::new(dft::DiscreteFourier),
        Box::new(zero_padding::ZeroPadding),
        Box::new(z_plane::ZPlane),
    ]
}

pub fn model_for_class(class_number: u32) -> Option<Box<dyn SignalModel>> {
    all_models()
        .into_iter()
        .find(|m| m.class_number() == class_number)
}

pub fn has_model(class_number: u32) -> bool {
    all_models().iter().any(|m| m.class_number() == class_number)
}
